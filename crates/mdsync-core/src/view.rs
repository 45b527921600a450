//! Borrowed, self-describing views handed to hosts.
//!
//! A [`BufferView`] is the unit of exchange with a rendering client: a
//! contiguous run of scalars grouped into fixed-size tuples, plus the
//! element type needed to interpret it. Views borrow their source, so a
//! view over a session buffer cannot outlive the next capture into that
//! buffer, and a view over engine memory cannot outlive the engine.

use crate::scalar::{ScalarElement, ScalarType};

/// A typed slice whose element type is only known at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarSlice<'a> {
    /// `f32` elements.
    Float32(&'a [f32]),
    /// `f64` elements.
    Float64(&'a [f64]),
    /// `i32` elements.
    Int32(&'a [i32]),
    /// `i64` elements.
    Int64(&'a [i64]),
}

impl<'a> ScalarSlice<'a> {
    /// Number of scalars.
    pub fn len(self) -> usize {
        match self {
            Self::Float32(s) => s.len(),
            Self::Float64(s) => s.len(),
            Self::Int32(s) => s.len(),
            Self::Int64(s) => s.len(),
        }
    }

    /// Whether the slice holds no scalars.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Element type tag.
    pub fn scalar_type(self) -> ScalarType {
        match self {
            Self::Float32(_) => ScalarType::Float32,
            Self::Float64(_) => ScalarType::Float64,
            Self::Int32(_) => ScalarType::Int32,
            Self::Int64(_) => ScalarType::Int64,
        }
    }

    /// Raw bytes of the slice in native endianness.
    pub fn as_bytes(self) -> &'a [u8] {
        match self {
            Self::Float32(s) => bytemuck::cast_slice(s),
            Self::Float64(s) => bytemuck::cast_slice(s),
            Self::Int32(s) => bytemuck::cast_slice(s),
            Self::Int64(s) => bytemuck::cast_slice(s),
        }
    }

    fn address(self) -> usize {
        self.as_bytes().as_ptr() as usize
    }
}

/// A read-only view over a contiguous buffer of scalars.
///
/// `len()` counts scalars and is always a whole multiple of
/// `components()`. An empty view has `handle() == 0`, `len() == 0` and
/// `components() == 0`, whatever its element type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferView<'a> {
    data: Option<ScalarSlice<'a>>,
    components: usize,
    scalar_type: ScalarType,
}

impl<'a> BufferView<'a> {
    /// The empty view of the given element type.
    pub const fn empty(scalar_type: ScalarType) -> Self {
        Self {
            data: None,
            components: 0,
            scalar_type,
        }
    }

    /// View over an owned buffer's current contents.
    ///
    /// An empty slice or zero `components` yields the empty view. A
    /// trailing partial tuple is excluded from the view.
    pub fn from_slice<T: ScalarElement>(slice: &'a [T], components: usize) -> Self {
        if slice.is_empty() || components == 0 {
            return Self::empty(T::SCALAR_TYPE);
        }
        let whole = slice.len() - slice.len() % components;
        if whole == 0 {
            return Self::empty(T::SCALAR_TYPE);
        }
        Self {
            data: Some(T::wrap(&slice[..whole])),
            components,
            scalar_type: T::SCALAR_TYPE,
        }
    }

    /// View over engine-owned memory holding `count` tuples.
    ///
    /// An absent source, a zero `count` or a zero `components` yields the
    /// empty view. A source shorter than `count * components` scalars also
    /// yields the empty view rather than reading past its end.
    pub fn raw<T: ScalarElement>(source: Option<&'a [T]>, count: usize, components: usize) -> Self {
        let Some(source) = source else {
            return Self::empty(T::SCALAR_TYPE);
        };
        if count == 0 || components == 0 {
            return Self::empty(T::SCALAR_TYPE);
        }
        let needed = match count.checked_mul(components) {
            Some(n) if n <= source.len() => n,
            _ => {
                tracing::warn!(
                    count,
                    components,
                    available = source.len(),
                    scalar_type = %T::SCALAR_TYPE,
                    "engine field shorter than reported count; publishing empty view"
                );
                return Self::empty(T::SCALAR_TYPE);
            }
        };
        Self {
            data: Some(T::wrap(&source[..needed])),
            components,
            scalar_type: T::SCALAR_TYPE,
        }
    }

    /// Address of the first scalar, or 0 for the empty view.
    pub fn handle(&self) -> usize {
        self.data.map_or(0, ScalarSlice::address)
    }

    /// Total number of scalars.
    pub fn len(&self) -> usize {
        self.data.map_or(0, ScalarSlice::len)
    }

    /// Whether the view holds no scalars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalars per tuple.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of whole tuples (`len / components`), or 0 when `components` is 0.
    pub fn count(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.len() / self.components
        }
    }

    /// Element type tag.
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar_type
    }

    /// The underlying typed slice, if any.
    pub fn data(&self) -> Option<ScalarSlice<'a>> {
        self.data
    }

    /// Typed access. Returns `None` if `T` does not match the element type.
    pub fn as_slice<T: ScalarElement>(&self) -> Option<&'a [T]> {
        if T::SCALAR_TYPE != self.scalar_type {
            return None;
        }
        match self.data {
            None => Some(&[]),
            Some(slice) => bytemuck::try_cast_slice(slice.as_bytes()).ok(),
        }
    }

    /// Raw bytes of the view, empty for the empty view.
    pub fn as_bytes(&self) -> &'a [u8] {
        match self.data {
            Some(slice) => slice.as_bytes(),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_view_is_all_zero() {
        let v = BufferView::empty(ScalarType::Float32);
        assert_eq!(v.handle(), 0);
        assert_eq!(v.len(), 0);
        assert_eq!(v.components(), 0);
        assert_eq!(v.count(), 0);
        assert!(v.as_bytes().is_empty());
    }

    #[test]
    fn from_empty_slice_forces_zero_components() {
        let data: [f32; 0] = [];
        let v = BufferView::from_slice(&data, 3);
        assert_eq!(v.components(), 0);
        assert_eq!(v.handle(), 0);
        assert_eq!(v.scalar_type(), ScalarType::Float32);
    }

    #[test]
    fn from_slice_reports_tuples() {
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let v = BufferView::from_slice(&data, 3);
        assert_eq!(v.len(), 6);
        assert_eq!(v.count(), 2);
        assert_eq!(v.handle(), data.as_ptr() as usize);
        assert_eq!(v.as_slice::<f32>(), Some(&data[..]));
        assert_eq!(v.as_slice::<f64>(), None);
        assert_eq!(v.as_bytes().len(), 24);
    }

    #[test]
    fn from_slice_drops_partial_tuple() {
        let data = [1i32, 2, 3, 4, 5];
        let v = BufferView::from_slice(&data, 2);
        assert_eq!(v.len(), 4);
        assert_eq!(v.count(), 2);
    }

    #[test]
    fn raw_absent_or_zero_is_empty() {
        let data = [1i64, 2, 3];
        assert!(BufferView::raw::<i64>(None, 3, 1).is_empty());
        assert_eq!(BufferView::raw(Some(&data[..]), 0, 1).handle(), 0);
        assert_eq!(BufferView::raw(Some(&data[..]), 3, 0).components(), 0);
    }

    #[test]
    fn raw_limits_to_count() {
        let data = [10i32, 20, 30, 40];
        let v = BufferView::raw(Some(&data[..]), 3, 1);
        assert_eq!(v.as_slice::<i32>(), Some(&data[..3]));
        assert_eq!(v.scalar_type(), ScalarType::Int32);
    }

    #[test]
    fn raw_short_source_is_empty() {
        let data = [10i32, 20];
        let v = BufferView::raw(Some(&data[..]), 3, 1);
        assert!(v.is_empty());
        assert_eq!(v.scalar_type(), ScalarType::Int32);
    }

    #[test]
    fn empty_typed_access_is_empty_slice() {
        let v = BufferView::empty(ScalarType::Int64);
        assert_eq!(v.as_slice::<i64>(), Some(&[][..]));
    }
}
