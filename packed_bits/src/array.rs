//! Fixed-length array of `width`-bit unsigned values over an owned byte buffer.
//!
//! # Examples
//!
//! ## Validity-flag allocation
//!
//! ```rust
//! use packed_bits::PackedBitArray;
//!
//! let array = PackedBitArray::alloc(4, 3);
//! assert!(array.is_valid());
//!
//! let bad = PackedBitArray::alloc(-1, 8);
//! assert!(!bad.is_valid());
//!
//! let released = array.release();
//! assert!(!released.is_valid());
//! ```
//!
//! ## Checked and raw access
//!
//! ```rust
//! use packed_bits::{PackedBitArray, PackedBitsError};
//!
//! let mut array = PackedBitArray::new(4, 15).expect("failed to allocate");
//! array.set(0, 32767).unwrap();
//! array.set(3, 1000).unwrap();
//!
//! assert_eq!(array.get(0), Ok(32767));
//! assert_eq!(array.get(4), Err(PackedBitsError::IndexOutOfBounds(4, 4)));
//! assert_eq!(array.set(1, 1 << 15), Err(PackedBitsError::ValueOverflow(1 << 15, 15)));
//!
//! // The raw tier skips every check and truncates oversized values.
//! array.set_raw(1, 0x1_0005);
//! assert_eq!(array.get_raw(1), 5);
//! ```
//!
//! ## Transmitting the packed bytes
//!
//! ```rust
//! use packed_bits::PackedBitArray;
//!
//! let array = PackedBitArray::from_values(4, &[0xA, 0xB, 0xC]).unwrap();
//! let bytes = array.as_bytes().to_vec();
//! assert_eq!(bytes, [0xAB, 0xC0]);
//!
//! let restored = PackedBitArray::from_bytes(&bytes, 3, 4).unwrap();
//! assert_eq!(restored, array);
//! ```

use core::iter::FusedIterator;

use raw_bytes::{Container, View, ViewMut};

use crate::{MAX_WIDTH, PackedBitsError, bit_ops};

type Result<T> = core::result::Result<T, PackedBitsError>;

/// Validates the bit width.
#[inline(always)]
fn validate_width(width: u32) -> Result<()> {
    if (1..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(PackedBitsError::InvalidBitWidth(i64::from(width)))
    }
}

/// Exact storage size for `length` elements of `width` bits.
#[inline]
fn required_bytes(length: usize, width: u32) -> Result<usize> {
    bit_ops::byte_len(length, width).ok_or(PackedBitsError::CapacityOverflow { length, width })
}

/// A fixed-length array of unsigned integers, each exactly `width` bits wide,
/// packed most-significant bit first with no padding between elements.
///
/// An array without storage is *invalid*: it is what [`PackedBitArray::alloc`]
/// returns on failure and what [`PackedBitArray::release`] leaves behind.
/// Invalid arrays always have length 0.
#[derive(Debug, Clone, Eq)]
pub struct PackedBitArray {
    storage: Option<Container<u8>>,
    len: usize,
    width: u32,
}

/// Arrays are equal when they agree on validity, length, width and every
/// element. Padding bits never take part.
impl PartialEq for PackedBitArray {
    fn eq(&self, other: &Self) -> bool {
        self.is_valid() == other.is_valid()
            && self.len == other.len
            && self.width == other.width
            && self.iter().eq(other.iter())
    }
}

impl PackedBitArray {
    /// Allocates a zero-filled array, reporting failure through
    /// [`is_valid`](Self::is_valid) instead of an error value.
    ///
    /// Negative lengths or widths, widths outside `1..=MAX_WIDTH`, sizes that
    /// overflow and allocator exhaustion all produce an invalid array.
    pub fn alloc(length: isize, width: i32) -> Self {
        match Self::try_alloc(length, width) {
            Ok(array) => array,
            Err(err) => {
                log::debug!("packed bit array allocation of {length} x {width} bits rejected: {err}");
                Self::invalid(u32::try_from(width).unwrap_or(0))
            }
        }
    }

    /// Signed-input allocation reporting the reason for failure.
    pub fn try_alloc(length: isize, width: i32) -> Result<Self> {
        let length =
            usize::try_from(length).map_err(|_| PackedBitsError::InvalidLength(length as i64))?;
        let width =
            u32::try_from(width).map_err(|_| PackedBitsError::InvalidBitWidth(i64::from(width)))?;
        Self::new(length, width)
    }

    /// Allocates a zero-filled array of `length` elements of `width` bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use packed_bits::PackedBitArray;
    ///
    /// let array = PackedBitArray::new(1000, 10).expect("failed to allocate");
    /// assert_eq!(array.len(), 1000);
    /// assert_eq!(array.byte_len(), 1250);
    /// assert!(array.iter().all(|v| v == 0));
    /// ```
    pub fn new(length: usize, width: u32) -> Result<Self> {
        validate_width(width)?;
        let bytes = required_bytes(length, width)?;
        let storage = Container::try_zeroed(bytes)?;
        Ok(Self {
            storage: Some(storage),
            len: length,
            width,
        })
    }

    /// Wraps an existing packed buffer.
    ///
    /// The buffer must hold at least `ceil(length * width / 8)` bytes. Bytes
    /// past that are dropped and the unused low bits of the last byte are
    /// cleared, so the result is byte-identical to a freshly packed array.
    pub fn from_storage(mut storage: Container<u8>, length: usize, width: u32) -> Result<Self> {
        validate_width(width)?;
        let needed = required_bytes(length, width)?;
        if storage.len() < needed {
            return Err(PackedBitsError::InsufficientBytes {
                needed,
                found: storage.len(),
            });
        }
        storage.truncate(needed);

        // bits of the last byte past the final element
        let used = (length * width as usize % 8) as u32;
        if used != 0 {
            if let Some(last) = storage.as_mut_slice().last_mut() {
                *last &= 0xFFu8 << (8 - used);
            }
        }

        Ok(Self {
            storage: Some(storage),
            len: length,
            width,
        })
    }

    /// Copies an existing packed buffer into a new array.
    pub fn from_bytes(bytes: &[u8], length: usize, width: u32) -> Result<Self> {
        Self::from_storage(Container::from_slice(bytes), length, width)
    }

    /// Builds an array holding `values`, each of which must fit in `width` bits.
    pub fn from_values(width: u32, values: &[u64]) -> Result<Self> {
        let mut array = Self::new(values.len(), width)?;
        for (i, &value) in values.iter().enumerate() {
            array.set(i, value)?;
        }
        Ok(array)
    }

    fn invalid(width: u32) -> Self {
        Self {
            storage: None,
            len: 0,
            width,
        }
    }

    /// `true` if the array owns a buffer.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.storage.is_some()
    }

    /// Frees the buffer and returns an invalid array.
    ///
    /// Releasing an already invalid array is a no-op.
    pub fn release(self) -> Self {
        if let Some(storage) = &self.storage {
            log::trace!(
                "releasing packed bit array: {} x {} bits, {} bytes",
                self.len,
                self.width,
                storage.len()
            );
        }
        Self::invalid(self.width)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit width of every element.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Largest value an element can hold.
    #[inline]
    pub fn max_value(&self) -> u64 {
        bit_ops::max_value(self.width)
    }

    /// Size in bytes of the packed buffer (0 for an invalid array).
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.storage.as_ref().map_or(0, Container::len)
    }

    /// Backing buffer, or `None` for an invalid array.
    pub fn storage(&self) -> Option<&Container<u8>> {
        self.storage.as_ref()
    }

    /// Consumes the array, returning its buffer if it had one.
    pub fn into_storage(self) -> Option<Container<u8>> {
        self.storage
    }

    /// The packed bytes, in the MSB-first layout.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Some(storage) => storage.as_slice(),
            None => &[],
        }
    }

    /// Direct mutable access to the packed bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Some(storage) => storage.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Length-tracked view over the packed bytes, for bulk copy or
    /// sub-range access without copying.
    pub fn view(&self) -> View<'_, u8> {
        View::new(self.as_bytes())
    }

    /// Mutable view over the packed bytes.
    pub fn view_mut(&mut self) -> ViewMut<'_, u8> {
        ViewMut::new(self.as_bytes_mut())
    }

    #[inline]
    fn check_index(&self, index: usize) -> Result<()> {
        if !self.is_valid() {
            return Err(PackedBitsError::Released);
        }
        if index >= self.len {
            return Err(PackedBitsError::IndexOutOfBounds(index, self.len));
        }
        Ok(())
    }

    #[inline]
    fn check_value(&self, value: u64) -> Result<()> {
        if value > self.max_value() {
            return Err(PackedBitsError::ValueOverflow(value, self.width));
        }
        Ok(())
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// - `PackedBitsError::Released` if the array is invalid
    /// - `PackedBitsError::IndexOutOfBounds` if `index >= len()`
    pub fn get(&self, index: usize) -> Result<u64> {
        self.check_index(index)?;
        Ok(self.get_raw(index))
    }

    /// Stores `value` at `index`.
    ///
    /// # Errors
    ///
    /// - `PackedBitsError::Released` if the array is invalid
    /// - `PackedBitsError::IndexOutOfBounds` if `index >= len()`
    /// - `PackedBitsError::ValueOverflow` if `value` does not fit in `width()` bits
    pub fn set(&mut self, index: usize, value: u64) -> Result<()> {
        self.check_index(index)?;
        self.check_value(value)?;
        self.set_raw(index, value);
        Ok(())
    }

    /// Returns the element at `index` without checking it against `len()`.
    ///
    /// An index whose bits fall inside the buffer's trailing padding returns
    /// unspecified data.
    ///
    /// # Panics
    ///
    /// Panics if the element lies outside the buffer, including on an
    /// invalid array.
    #[inline]
    pub fn get_raw(&self, index: usize) -> u64 {
        bit_ops::get_bits(self.as_bytes(), index * self.width as usize, self.width)
    }

    /// Stores the low `width()` bits of `value` at `index` without any check.
    ///
    /// Higher bits of `value` are silently discarded.
    ///
    /// # Panics
    ///
    /// Panics if the element lies outside the buffer, including on an
    /// invalid array.
    #[inline]
    pub fn set_raw(&mut self, index: usize, value: u64) {
        let width = self.width;
        bit_ops::set_bits(self.as_bytes_mut(), index * width as usize, width, value);
    }

    /// Stores `value` in every element.
    pub fn fill(&mut self, value: u64) -> Result<()> {
        if !self.is_valid() {
            return Err(PackedBitsError::Released);
        }
        self.check_value(value)?;
        for i in 0..self.len {
            self.set_raw(i, value);
        }
        Ok(())
    }

    /// Iterates over the elements in index order. Empty for an invalid array.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            array: self,
            index: 0,
        }
    }
}

/// Iterator over the elements of a [`PackedBitArray`].
pub struct Iter<'a> {
    array: &'a PackedBitArray,
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.array.len() {
            None
        } else {
            let val = self.array.get_raw(self.index);
            self.index += 1;
            Some(val)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a PackedBitArray {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec::Vec;

    #[test]
    fn alloc_success() {
        let array = PackedBitArray::alloc(4, 3);
        assert!(array.is_valid());
        assert_eq!(array.len(), 4);
        assert_eq!(array.width(), 3);
        assert_eq!(array.byte_len(), 2);
    }

    #[test]
    fn alloc_rejects_negative_input() {
        assert!(!PackedBitArray::alloc(-1, 8).is_valid());
        assert!(!PackedBitArray::alloc(4, -1).is_valid());

        assert_eq!(
            PackedBitArray::try_alloc(-1, 8),
            Err(PackedBitsError::InvalidLength(-1))
        );
        assert_eq!(
            PackedBitArray::try_alloc(4, -1),
            Err(PackedBitsError::InvalidBitWidth(-1))
        );
    }

    #[test]
    fn alloc_rejects_unsupported_width() {
        assert!(!PackedBitArray::alloc(4, 0).is_valid());
        assert!(!PackedBitArray::alloc(4, 65).is_valid());
        assert!(PackedBitArray::alloc(4, 64).is_valid());
        assert_eq!(
            PackedBitArray::new(4, 65),
            Err(PackedBitsError::InvalidBitWidth(65))
        );
    }

    #[test]
    fn alloc_rejects_oversized_requests() {
        assert_eq!(
            PackedBitArray::try_alloc(isize::MAX, 16),
            Err(PackedBitsError::CapacityOverflow {
                length: isize::MAX as usize,
                width: 16
            })
        );
        assert!(matches!(
            PackedBitArray::try_alloc(isize::MAX, 1),
            Err(PackedBitsError::Container(_))
        ));
        assert!(!PackedBitArray::alloc(isize::MAX, 1).is_valid());
    }

    #[test]
    fn empty_array_is_valid() -> Result<()> {
        let array = PackedBitArray::new(0, 5)?;
        assert!(array.is_valid());
        assert!(array.is_empty());
        assert_eq!(array.byte_len(), 0);
        assert_eq!(array.get(0), Err(PackedBitsError::IndexOutOfBounds(0, 0)));
        Ok(())
    }

    #[test]
    fn release_invalidates() {
        let array = PackedBitArray::alloc(4, 8);
        assert!(array.is_valid());

        let released = array.release();
        assert!(!released.is_valid());
        assert_eq!(released.len(), 0);
        assert_eq!(released.get(0), Err(PackedBitsError::Released));

        let again = released.release();
        assert!(!again.is_valid());
    }

    #[test]
    fn get_byte_aligned() -> Result<()> {
        let mut array = PackedBitArray::new(4, 8)?;
        array
            .as_bytes_mut()
            .copy_from_slice(&[0xff, 0x00, 0x10, 0xcc]);

        assert_eq!(array.get(0)?, 0xff);
        assert_eq!(array.get(1)?, 0x00);
        assert_eq!(array.get(2)?, 0x10);
        assert_eq!(array.get(3)?, 0xcc);
        Ok(())
    }

    #[test]
    fn small_overlap() -> Result<()> {
        let mut array = PackedBitArray::new(4, 3)?;
        for (i, v) in [0o7, 0o0, 0o5, 0o3].into_iter().enumerate() {
            array.set(i, v)?;
        }

        assert_eq!(array.iter().collect::<Vec<_>>(), [7, 0, 5, 3]);
        // 111 000 10|1 011 0000
        assert_eq!(array.as_bytes(), &[0b1110_0010, 0b1011_0000]);
        Ok(())
    }

    #[test]
    fn large_overlap() -> Result<()> {
        let mut array = PackedBitArray::new(4, 15)?;
        array.set(0, 32767)?;
        array.set(1, 0)?;
        array.set(2, 10)?;
        array.set(3, 1000)?;

        assert_eq!(array.get(0)?, 32767);
        assert_eq!(array.get(1)?, 0);
        assert_eq!(array.get(2)?, 10);
        assert_eq!(array.get(3)?, 1000);
        Ok(())
    }

    #[test]
    fn set_does_not_disturb_neighbours() -> Result<()> {
        let mut array = PackedBitArray::new(5, 7)?;
        array.fill(0x7F)?;
        array.set(2, 0)?;
        assert_eq!(array.iter().collect::<Vec<_>>(), [0x7F, 0x7F, 0, 0x7F, 0x7F]);
        Ok(())
    }

    #[test]
    fn checked_set_rejects_oversized_values() -> Result<()> {
        let mut array = PackedBitArray::new(2, 4)?;
        assert_eq!(array.set(0, 16), Err(PackedBitsError::ValueOverflow(16, 4)));
        assert_eq!(array.fill(16), Err(PackedBitsError::ValueOverflow(16, 4)));
        assert_eq!(array.set(2, 1), Err(PackedBitsError::IndexOutOfBounds(2, 2)));
        assert_eq!(array.as_bytes(), &[0]);
        Ok(())
    }

    #[test]
    fn raw_set_truncates() -> Result<()> {
        let mut array = PackedBitArray::new(2, 4)?;
        array.set_raw(0, 0xF3);
        assert_eq!(array.get(0)?, 0x3);
        assert_eq!(array.get(1)?, 0);
        Ok(())
    }

    #[test]
    fn full_word_elements() -> Result<()> {
        let values = [u64::MAX, 0, 0x0123_4567_89AB_CDEF];
        let array = PackedBitArray::from_values(64, &values)?;
        assert_eq!(array.byte_len(), 24);
        assert_eq!(array.iter().collect::<Vec<_>>(), values);
        Ok(())
    }

    #[test]
    fn from_storage_checks_size() {
        let short = Container::from_slice(&[0u8; 1]);
        assert_eq!(
            PackedBitArray::from_storage(short, 4, 3),
            Err(PackedBitsError::InsufficientBytes {
                needed: 2,
                found: 1
            })
        );

        let padded = Container::from_slice(&[0xFFu8, 0xF0, 0xAA]);
        let array = PackedBitArray::from_storage(padded, 4, 3).unwrap();
        assert_eq!(array.iter().collect::<Vec<_>>(), [7, 7, 7, 7]);
        assert_eq!(array.byte_len(), 2);
        assert_eq!(array.as_bytes(), &[0xFF, 0xF0]);
    }

    #[test]
    fn from_bytes_discards_dirty_tail() -> Result<()> {
        let fresh = PackedBitArray::from_values(3, &[7, 0, 5, 3])?;
        let restored = PackedBitArray::from_bytes(&[0xE2, 0xBF, 0xAA, 0xBB], 4, 3)?;

        assert_eq!(restored.byte_len(), 2);
        assert_eq!(restored.view().len(), 2);
        assert_eq!(restored.as_bytes(), fresh.as_bytes());
        assert_eq!(restored, fresh);
        Ok(())
    }

    #[test]
    fn equality_ignores_padding_bits() -> Result<()> {
        let a = PackedBitArray::from_values(3, &[7, 0, 5, 3])?;
        let mut b = a.clone();
        // low four bits of the last byte are padding
        b.as_bytes_mut()[1] |= 0x0F;

        assert_eq!(a, b);
        assert_ne!(a, PackedBitArray::from_values(3, &[7, 0, 5, 2])?);
        assert_ne!(a, PackedBitArray::from_values(6, &[0o70, 0o53])?);
        assert_eq!(a.clone().release(), b.release());
        Ok(())
    }

    #[test]
    fn views_share_storage() -> Result<()> {
        let mut array = PackedBitArray::from_values(8, &[1, 2, 3, 4])?;
        assert_eq!(array.view().index(1)?.truncate(2)?.as_slice(), &[2, 3]);

        array.view_mut().index(3)?.fill(9);
        assert_eq!(array.get(3)?, 9);

        let storage = array.into_storage().unwrap();
        assert_eq!(storage.as_slice(), &[1, 2, 3, 9]);
        Ok(())
    }

    #[test]
    fn iter_is_exact_size() -> Result<()> {
        let array = PackedBitArray::new(10, 5)?;
        let mut iter = array.iter();
        assert_eq!(iter.len(), 10);
        iter.next();
        assert_eq!(iter.len(), 9);
        assert_eq!((&array).into_iter().count(), 10);
        assert_eq!(PackedBitArray::alloc(-1, 5).iter().count(), 0);
        Ok(())
    }
}
