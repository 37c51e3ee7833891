//! Length-tracked windows over `T: Pod` buffers.
//!
//! A view carries the element size and element count alongside the data, so
//! sub-ranges can be handed out without copying and without losing the bounds.
//!
//! # Examples
//!
//! ```
//! use raw_bytes::View;
//!
//! let words = [1u16, 2, 3, 4, 5];
//! let base = View::new(&words);
//!
//! // Narrow to elements 1..3
//! let inner = base.index(1).unwrap().truncate(2).unwrap();
//! assert_eq!(inner.as_slice(), &[2, 3]);
//!
//! // Everything after `inner`
//! let rest = base.after(inner).unwrap();
//! assert_eq!(rest.as_slice(), &[4, 5]);
//!
//! assert_eq!(base.elem_size(), 2);
//! assert_eq!(base.byte_len(), 10);
//! ```

use core::fmt;
use core::ops::Range;

use bytemuck::Pod;

use crate::ContainerError;

type Result<T> = core::result::Result<T, ContainerError>;

/// Read-only window over a buffer of `T`.
#[derive(Clone, Copy)]
pub struct View<'a, T: Pod> {
    data: &'a [T],
}

impl<'a, T: Pod> View<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// Number of elements in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size in bytes of one element.
    #[inline]
    pub fn elem_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    /// Total size in bytes of the window.
    #[inline]
    pub fn byte_len(&self) -> usize {
        core::mem::size_of_val(self.data)
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// The window as raw bytes, for bulk copy or transmission.
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.data)
    }

    /// Shrinks the window to its first `len` elements.
    ///
    /// # Errors
    ///
    /// `ContainerError::OutOfBounds` if `len > self.len()`; a view never grows.
    pub fn truncate(self, len: usize) -> Result<Self> {
        self.data
            .get(..len)
            .map(Self::new)
            .ok_or(ContainerError::OutOfBounds(len))
    }

    /// Advances the start of the window to element `index`.
    ///
    /// `index == len()` yields an empty view positioned at the end.
    ///
    /// # Errors
    ///
    /// `ContainerError::OutOfBounds` if `index > self.len()`.
    pub fn index(self, index: usize) -> Result<Self> {
        self.data
            .get(index..)
            .map(Self::new)
            .ok_or(ContainerError::OutOfBounds(index))
    }

    /// Returns the part of `self` that follows `inner`.
    ///
    /// `inner` is expected to come from `self` through [`View::index`] and
    /// [`View::truncate`].
    ///
    /// # Errors
    ///
    /// `ContainerError::NotASubView` if `inner` does not lie inside `self`.
    pub fn after(self, inner: View<'_, T>) -> Result<Self> {
        let base = self.data.as_ptr_range();
        let sub = inner.data.as_ptr_range();
        if sub.start < base.start || sub.end > base.end {
            return Err(ContainerError::NotASubView);
        }

        let start = match self.elem_size() {
            0 => 0,
            size => (sub.start as usize - base.start as usize) / size,
        };
        self.index(start + inner.len())
    }
}

impl<'a, T: Pod> From<&'a [T]> for View<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<T: Pod> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("elem_size", &self.elem_size())
            .field("len", &self.len())
            .finish()
    }
}

/// Views are equal when they hold the same number of elements with the same
/// byte contents.
impl<T: Pod> PartialEq<View<'_, T>> for View<'_, T> {
    fn eq(&self, other: &View<'_, T>) -> bool {
        self.len() == other.len() && self.as_bytes() == other.as_bytes()
    }
}

impl<T: Pod> Eq for View<'_, T> {}

/// Mutable window over a buffer of `T`.
pub struct ViewMut<'a, T: Pod> {
    data: &'a mut [T],
}

impl<'a, T: Pod> ViewMut<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        core::mem::size_of::<T>()
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        core::mem::size_of_val(&*self.data)
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data.as_mut_ptr()
    }

    pub fn as_slice(&self) -> &[T] {
        &*self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }

    pub fn into_slice(self) -> &'a mut [T] {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&*self.data)
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut *self.data)
    }

    /// Read-only view of the same window.
    pub fn as_view(&self) -> View<'_, T> {
        View::new(&*self.data)
    }

    /// Shorter-lived mutable view of the same window.
    pub fn reborrow(&mut self) -> ViewMut<'_, T> {
        ViewMut::new(&mut *self.data)
    }

    /// Mutable counterpart of [`View::truncate`].
    pub fn truncate(self, len: usize) -> Result<Self> {
        let data = self.data;
        if len > data.len() {
            return Err(ContainerError::OutOfBounds(len));
        }
        Ok(Self::new(&mut data[..len]))
    }

    /// Mutable counterpart of [`View::index`].
    pub fn index(self, index: usize) -> Result<Self> {
        let data = self.data;
        if index > data.len() {
            return Err(ContainerError::OutOfBounds(index));
        }
        Ok(Self::new(&mut data[index..]))
    }

    /// Copies as many elements of `src` as fit, returning the number copied.
    ///
    /// A shorter source leaves the tail of `self` untouched; a longer source
    /// is cut off at `self.len()`.
    pub fn copy_from(&mut self, src: View<'_, T>) -> usize {
        let n = self.len().min(src.len());
        self.data[..n].copy_from_slice(&src.as_slice()[..n]);
        n
    }

    /// Byte-level counterpart of [`copy_from`](Self::copy_from), for sources
    /// with a different element type. Copies `min(self.byte_len(), src.len())`
    /// bytes and returns that count.
    ///
    /// ```
    /// use raw_bytes::{View, ViewMut};
    ///
    /// let src = [0x0102u16.to_be(), 0x0304u16.to_be()];
    /// let mut dst = [0u8; 3];
    /// let copied = ViewMut::new(&mut dst).copy_from_bytes(View::new(&src).as_bytes());
    /// assert_eq!(copied, 3);
    /// assert_eq!(dst, [1, 2, 3]);
    /// ```
    pub fn copy_from_bytes(&mut self, src: &[u8]) -> usize {
        let dst = self.as_bytes_mut();
        let n = dst.len().min(src.len());
        dst[..n].copy_from_slice(&src[..n]);
        n
    }

    /// Copies `src` to the range starting at `dest`. The ranges may overlap.
    ///
    /// # Errors
    ///
    /// `ContainerError::OutOfBounds` if either range leaves the window.
    pub fn copy_within(&mut self, src: Range<usize>, dest: usize) -> Result<()> {
        let len = self.len();
        if src.start > src.end || src.end > len {
            return Err(ContainerError::OutOfBounds(src.end));
        }
        let count = src.end - src.start;
        if dest > len - count {
            return Err(ContainerError::OutOfBounds(dest));
        }
        self.data.copy_within(src, dest);
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<'a, T: Pod> From<&'a mut [T]> for ViewMut<'a, T> {
    fn from(data: &'a mut [T]) -> Self {
        Self::new(data)
    }
}

impl<T: Pod> fmt::Debug for ViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewMut")
            .field("elem_size", &self.elem_size())
            .field("len", &self.len())
            .finish()
    }
}
