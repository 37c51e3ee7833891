use raw_bytes::ContainerError;
#[cfg(feature = "std")]
use thiserror::Error;

use crate::MAX_WIDTH;

#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackedBitsError {
    #[cfg_attr(
        feature = "std",
        error("Bit width must be in the range 1..={max}, got {0}", max = MAX_WIDTH)
    )]
    InvalidBitWidth(i64),

    #[cfg_attr(feature = "std", error("Length must not be negative, got {0}"))]
    InvalidLength(i64),

    #[cfg_attr(
        feature = "std",
        error("{length} elements of {width} bits do not fit in addressable memory")
    )]
    CapacityOverflow { length: usize, width: u32 },

    #[cfg_attr(feature = "std", error("Value {0} does not fit in {1} bits"))]
    ValueOverflow(u64, u32),

    #[cfg_attr(feature = "std", error("Index {0} is out of bounds for length {1}"))]
    IndexOutOfBounds(usize, usize),

    #[cfg_attr(
        feature = "std",
        error("Insufficient bytes: need {needed}, found {found}")
    )]
    InsufficientBytes { needed: usize, found: usize },

    #[cfg_attr(feature = "std", error("array has no storage (allocation failed or released)"))]
    Released,

    #[cfg_attr(feature = "std", error("storage error: {0}"))]
    Container(#[cfg_attr(feature = "std", from)] ContainerError),
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for PackedBitsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PackedBitsError::InvalidBitWidth(n) => {
                write!(f, "Bit width must be in the range 1..={}, got {}", MAX_WIDTH, n)
            }
            PackedBitsError::InvalidLength(n) => {
                write!(f, "Length must not be negative, got {}", n)
            }
            PackedBitsError::CapacityOverflow { length, width } => write!(
                f,
                "{} elements of {} bits do not fit in addressable memory",
                length, width
            ),
            PackedBitsError::ValueOverflow(v, n) => {
                write!(f, "Value {} does not fit in {} bits", v, n)
            }
            PackedBitsError::IndexOutOfBounds(i, l) => {
                write!(f, "Index {} is out of bounds for length {}", i, l)
            }
            PackedBitsError::InsufficientBytes { needed, found } => {
                write!(f, "Insufficient bytes: need {}, found {}", needed, found)
            }
            PackedBitsError::Released => {
                write!(f, "array has no storage (allocation failed or released)")
            }
            PackedBitsError::Container(e) => write!(f, "storage error: {}", e),
        }
    }
}

#[cfg(not(feature = "std"))]
impl From<ContainerError> for PackedBitsError {
    fn from(err: ContainerError) -> Self {
        PackedBitsError::Container(err)
    }
}
