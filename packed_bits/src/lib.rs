//! # packed_bits
//!
//! A `no_std` compatible array of arbitrary-width unsigned integers.
//!
//! Every element is exactly `width` bits wide (`1..=64`), stored
//! most-significant bit first with no padding between elements.
//!
//! ```rust
//! use packed_bits::PackedBitArray;
//!
//! // Store 12-bit values (0-4095)
//! let mut array = PackedBitArray::new(2, 12).expect("failed to allocate");
//! array.set(0, 0xABC).unwrap();
//! array.set(1, 0x123).unwrap();
//!
//! assert_eq!(array.get(0), Ok(0xABC));
//! assert_eq!(array.get(1), Ok(0x123));
//! assert_eq!(array.as_bytes(), &[0xAB, 0xC1, 0x23]);
//! ```
//!
//! ## Memory Savings Example
//!
//! ```rust
//! use packed_bits::PackedBitArray;
//!
//! // Standard Vec<u32>: 1000 elements × 4 bytes = 4000 bytes
//! let standard: Vec<u32> = (0..1000).collect();
//!
//! // 1000 elements × 10 bits = 1250 bytes
//! let mut packed = PackedBitArray::new(1000, 10).expect("failed to allocate");
//! for i in 0..1000 {
//!     packed.set(i, i as u64 % 1024).unwrap();
//! }
//! assert_eq!(packed.byte_len(), 1250);
//!
//! // 68.75% memory savings!
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub use error::PackedBitsError;

pub mod bit_ops;

pub mod array;
pub use array::PackedBitArray;

/// Widest supported element, in bits.
pub const MAX_WIDTH: u32 = u64::BITS;
