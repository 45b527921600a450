//! Scalar element types carried by buffers and views.
//!
//! [`ScalarType`] is the runtime tag a host reads to interpret a view.
//! [`ScalarElement`] ties each Rust element type to its tag at compile
//! time, and [`TagWord`] narrows that to the integer widths an engine may
//! use for global atom identifiers.

use std::fmt;
use std::hash::Hash;

use crate::view::ScalarSlice;

/// Element type of a [`BufferView`](crate::BufferView).
///
/// Values are ABI-stable; hosts switch on them to pick a typed array.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// IEEE-754 single precision.
    Float32 = 0,
    /// IEEE-754 double precision.
    Float64 = 1,
    /// Signed 32-bit integer.
    Int32 = 2,
    /// Signed 64-bit integer.
    Int64 = 3,
}

impl ScalarType {
    /// Size of one element in bytes.
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::Float32 | Self::Int32 => 4,
            Self::Float64 | Self::Int64 => 8,
        }
    }

    /// Whether the element type is an integer.
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
}

/// A Rust element type that maps onto exactly one [`ScalarType`].
///
/// Sealed: only `f32`, `f64`, `i32` and `i64` implement it.
pub trait ScalarElement:
    sealed::Sealed + bytemuck::Pod + Default + PartialEq + fmt::Debug + 'static
{
    /// The runtime tag for this element type.
    const SCALAR_TYPE: ScalarType;

    /// Wrap a slice of this element type into the type-erased slice enum.
    fn wrap(slice: &[Self]) -> ScalarSlice<'_>;
}

impl ScalarElement for f32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float32;
    fn wrap(slice: &[Self]) -> ScalarSlice<'_> {
        ScalarSlice::Float32(slice)
    }
}

impl ScalarElement for f64 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float64;
    fn wrap(slice: &[Self]) -> ScalarSlice<'_> {
        ScalarSlice::Float64(slice)
    }
}

impl ScalarElement for i32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Int32;
    fn wrap(slice: &[Self]) -> ScalarSlice<'_> {
        ScalarSlice::Int32(slice)
    }
}

impl ScalarElement for i64 {
    const SCALAR_TYPE: ScalarType = ScalarType::Int64;
    fn wrap(slice: &[Self]) -> ScalarSlice<'_> {
        ScalarSlice::Int64(slice)
    }
}

/// Integer width an engine build uses for global atom identifiers.
///
/// The width is a property of how the engine was compiled, so it is
/// fixed by the engine's associated `Tag` type and read through
/// [`ScalarElement::SCALAR_TYPE`]; it never changes at runtime.
pub trait TagWord: ScalarElement + Eq + Ord + Hash + fmt::Display {
    /// Widen to `i64` for logging and error reporting.
    fn to_i64(self) -> i64;

    /// Narrow from `i64`, returning `None` if the value does not fit.
    fn from_i64(value: i64) -> Option<Self>;
}

impl TagWord for i32 {
    fn to_i64(self) -> i64 {
        i64::from(self)
    }

    fn from_i64(value: i64) -> Option<Self> {
        i32::try_from(value).ok()
    }
}

impl TagWord for i64 {
    fn to_i64(self) -> i64 {
        self
    }

    fn from_i64(value: i64) -> Option<Self> {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_type_values_are_stable() {
        assert_eq!(ScalarType::Float32 as i32, 0);
        assert_eq!(ScalarType::Float64 as i32, 1);
        assert_eq!(ScalarType::Int32 as i32, 2);
        assert_eq!(ScalarType::Int64 as i32, 3);
    }

    #[test]
    fn element_tags_match_widths() {
        assert_eq!(f32::SCALAR_TYPE.size_bytes(), std::mem::size_of::<f32>());
        assert_eq!(f64::SCALAR_TYPE.size_bytes(), std::mem::size_of::<f64>());
        assert_eq!(i32::SCALAR_TYPE.size_bytes(), std::mem::size_of::<i32>());
        assert_eq!(i64::SCALAR_TYPE.size_bytes(), std::mem::size_of::<i64>());
        assert!(i64::SCALAR_TYPE.is_integer());
        assert!(!f32::SCALAR_TYPE.is_integer());
    }

    #[test]
    fn tag_word_narrowing() {
        assert_eq!(<i32 as TagWord>::from_i64(7), Some(7));
        assert_eq!(<i32 as TagWord>::from_i64(i64::MAX), None);
        assert_eq!(<i64 as TagWord>::from_i64(i64::MAX), Some(i64::MAX));
        assert_eq!(TagWord::to_i64(-3i32), -3);
    }

    #[test]
    fn display_names() {
        assert_eq!(ScalarType::Int64.to_string(), "int64");
        assert_eq!(ScalarType::Float32.to_string(), "float32");
    }
}
