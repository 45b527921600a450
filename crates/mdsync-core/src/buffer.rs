//! Reusable typed output buffers.
//!
//! [`ScalarBuffer`] backs every per-step output array. Captures clear and
//! refill it each call; the backing allocation is kept across calls so a
//! steady-state simulation stops allocating once its counts stabilise.

use crate::scalar::ScalarElement;
use crate::view::BufferView;

/// Growable, reusable contiguous storage for one scalar element type.
#[derive(Clone, Debug, Default)]
pub struct ScalarBuffer<T> {
    /// Backing storage. Grows on demand, never shrinks.
    data: Vec<T>,
}

impl<T: ScalarElement> ScalarBuffer<T> {
    /// Create an empty buffer with no allocation.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty buffer able to hold `capacity` scalars.
    ///
    /// A capacity that cannot be allocated leaves the buffer unallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Self::new();
        buf.reserve_total(capacity);
        buf
    }

    /// Drop the contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Set the length to `len` scalars and return the whole buffer.
    ///
    /// Slots that existed before keep their stale values; callers are
    /// expected to overwrite every slot they publish.
    pub fn resize(&mut self, len: usize) -> &mut [T] {
        self.data.resize(len, T::default());
        &mut self.data
    }

    /// Ensure the buffer can hold `total` scalars without reallocating.
    ///
    /// Returns `false`, leaving the allocation untouched, when `total`
    /// cannot be allocated.
    pub fn reserve_total(&mut self, total: usize) -> bool {
        if total <= self.data.capacity() {
            return true;
        }
        self.data.try_reserve(total - self.data.len()).is_ok()
    }

    /// Append scalars at the end.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.data.extend_from_slice(values);
    }

    /// Overwrite every scalar with the default value, keeping the length.
    pub fn zero(&mut self) {
        self.data.fill(T::default());
    }

    /// Number of scalars currently held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no scalars.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scalars the backing allocation can hold.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Current contents.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View over the current contents grouped into `components`-tuples.
    ///
    /// An empty buffer yields the empty view.
    pub fn view(&self, components: usize) -> BufferView<'_> {
        BufferView::from_slice(&self.data, components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarType;

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = ScalarBuffer::<f32>::new();
        buf.resize(300);
        let cap = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn steady_state_does_not_reallocate() {
        let mut buf = ScalarBuffer::<f32>::new();
        buf.resize(90);
        let ptr = buf.as_slice().as_ptr();
        let cap = buf.capacity();
        for _ in 0..10 {
            buf.clear();
            buf.resize(90).fill(1.0);
        }
        assert_eq!(buf.as_slice().as_ptr(), ptr);
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn reserve_total_is_idempotent() {
        let mut buf = ScalarBuffer::<f32>::with_capacity(8);
        assert!(buf.reserve_total(64));
        let cap = buf.capacity();
        assert!(cap >= 64);
        assert!(buf.reserve_total(64));
        assert!(buf.reserve_total(10));
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn impossible_reservation_is_refused() {
        let mut buf = ScalarBuffer::<f32>::new();
        buf.extend_from_slice(&[1.0, 2.0, 3.0]);
        assert!(!buf.reserve_total(usize::MAX));
        assert!(!buf.reserve_total(isize::MAX as usize / 2));
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0]);

        let empty = ScalarBuffer::<f32>::with_capacity(usize::MAX / 3);
        assert_eq!(empty.capacity(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn extend_and_view() {
        let mut buf = ScalarBuffer::<f32>::new();
        buf.extend_from_slice(&[1.0, 2.0, 3.0]);
        buf.extend_from_slice(&[4.0, 5.0, 6.0]);
        let v = buf.view(3);
        assert_eq!(v.count(), 2);
        assert_eq!(v.scalar_type(), ScalarType::Float32);
        assert_eq!(v.handle(), buf.as_slice().as_ptr() as usize);
    }

    #[test]
    fn empty_buffer_gives_empty_view() {
        let buf = ScalarBuffer::<f32>::new();
        let v = buf.view(3);
        assert_eq!(v.handle(), 0);
        assert_eq!(v.len(), 0);
        assert_eq!(v.components(), 0);
    }

    #[test]
    fn zero_keeps_length() {
        let mut buf = ScalarBuffer::<f32>::new();
        buf.extend_from_slice(&[1.0, 2.0]);
        buf.zero();
        assert_eq!(buf.as_slice(), &[0.0, 0.0]);
    }
}
