use crate::{ContainerError, Vec, View, ViewMut};
use bytemuck::Pod;

/// Growable, heap-backed array of plain-old-data elements.
///
/// `T` must implement [`bytemuck::Pod`], so the contents can always be viewed
/// as raw bytes without copying.
///
/// # Examples
///
/// ## Basic Usage
///
/// ```
/// use raw_bytes::Container;
/// use bytemuck_derive::{Pod, Zeroable};
///
/// #[repr(C)]
/// #[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
/// struct Packet {
///     id: u32,
///     value: f32,
/// }
///
/// let mut container = Container::<Packet>::new();
///
/// container.push(Packet { id: 1, value: 10.0 });
/// container.push(Packet { id: 2, value: 20.0 });
///
/// assert_eq!(container.len(), 2);
/// assert_eq!(container.get(0).unwrap().id, 1);
///
/// container.write(0, Packet { id: 99, value: 99.0 }).unwrap();
/// assert_eq!(container.get(0).unwrap().id, 99);
///
/// assert_eq!(container.pop(), Some(Packet { id: 2, value: 20.0 }));
/// assert_eq!(container.len(), 1);
/// ```
///
/// ## Zero-filled buffers
///
/// ```
/// use raw_bytes::Container;
///
/// let bytes = Container::<u8>::try_zeroed(16).unwrap();
/// assert_eq!(bytes.len(), 16);
/// assert!(bytes.iter().all(|&b| b == 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container<T: Pod> {
    data: Vec<T>,
}

impl<T: Pod> Container<T> {
    /// Creates an empty container. Nothing is allocated until the first push.
    pub fn new() -> Self {
        Container { data: Vec::new() }
    }

    /// Creates an empty container with room for `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_bytes::Container;
    ///
    /// let mut container = Container::<u64>::with_capacity(1000);
    /// assert!(container.capacity() >= 1000);
    ///
    /// for i in 0..1000 {
    ///     container.push(i);
    /// }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Container {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Allocates `len` zeroed elements, reporting allocator failure instead of
    /// aborting.
    ///
    /// # Errors
    ///
    /// `ContainerError::AllocationFailed` if the request overflows or the
    /// allocator cannot satisfy it.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_bytes::{Container, ContainerError};
    ///
    /// assert!(Container::<u32>::try_zeroed(8).is_ok());
    /// assert_eq!(
    ///     Container::<u32>::try_zeroed(usize::MAX),
    ///     Err(ContainerError::AllocationFailed(usize::MAX))
    /// );
    /// ```
    pub fn try_zeroed(len: usize) -> Result<Self, ContainerError> {
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ContainerError::AllocationFailed(len))?;
        data.resize(len, <T as bytemuck::Zeroable>::zeroed());
        Ok(Container { data })
    }

    /// Creates a container holding a copy of `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_bytes::Container;
    ///
    /// let container = Container::from_slice(&[1u16, 2, 3]);
    /// assert_eq!(container.len(), 3);
    /// assert_eq!(container.get(1), Ok(&2));
    /// ```
    pub fn from_slice(values: &[T]) -> Self {
        Container {
            data: values.to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements the container can hold before reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// `ContainerError::OutOfBounds` if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, ContainerError> {
        self.data
            .get(index)
            .ok_or(ContainerError::OutOfBounds(index))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// `ContainerError::OutOfBounds` if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ContainerError> {
        self.data
            .get_mut(index)
            .ok_or(ContainerError::OutOfBounds(index))
    }

    /// Overwrites the element at `index`.
    ///
    /// Equivalent to `*container.get_mut(index)? = value`.
    pub fn write(&mut self, index: usize, value: T) -> Result<(), ContainerError> {
        let slot = self.get_mut(index)?;
        *slot = value;
        Ok(())
    }

    /// Appends an element, growing the buffer geometrically when full.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.data.extend_from_slice(values);
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Shortens the container to `len` elements. Longer lengths are ignored.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional);
    }

    /// Releases spare capacity so that `capacity()` approaches `len()`.
    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Length-tracked view over all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use raw_bytes::Container;
    ///
    /// let c = Container::from_slice(&[1u32, 2, 3, 4]);
    /// let head = c.view().truncate(2).unwrap();
    /// assert_eq!(head.as_slice(), &[1, 2]);
    /// assert_eq!(head.byte_len(), 8);
    /// ```
    pub fn view(&self) -> View<'_, T> {
        View::new(self.as_slice())
    }

    /// Mutable length-tracked view over all elements.
    pub fn view_mut(&mut self) -> ViewMut<'_, T> {
        ViewMut::new(self.as_mut_slice())
    }

    /// The elements as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(self.as_mut_slice())
    }

    /// Consumes the container, returning the backing vector.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: Pod> From<Vec<T>> for Container<T> {
    fn from(data: Vec<T>) -> Self {
        Container { data }
    }
}

impl<T: Pod> core::ops::Index<usize> for Container<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T: Pod> core::ops::IndexMut<usize> for Container<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: Pod> Default for Container<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Pod> IntoIterator for &'a Container<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
