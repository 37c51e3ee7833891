//! # raw_bytes
//!
//! Owned and borrowed buffers of plain-old-data elements.
//!
//! - [`Container`]: a growable, heap-backed array of `T: Pod`.
//! - [`View`] / [`ViewMut`]: length-tracked windows over a buffer that can be
//!   narrowed to sub-ranges without copying.
//!
//! ```rust
//! use raw_bytes::Container;
//!
//! let mut c = Container::<u8>::try_zeroed(4).unwrap();
//! c.as_mut_slice().copy_from_slice(&[1, 2, 3, 4]);
//!
//! let middle = c.view().index(1).unwrap().truncate(2).unwrap();
//! assert_eq!(middle.as_slice(), &[2, 3]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
pub use std::vec::Vec;

#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;

pub mod container;
pub mod error;
pub mod view;

pub use container::Container;
pub use error::ContainerError;
pub use view::{View, ViewMut};
