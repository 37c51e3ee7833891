#[cfg(feature = "std")]
use thiserror::Error;

/// Container and view errors
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Out-of-bounds access or sub-range
    #[cfg_attr(feature = "std", error("Index {0} out of bounds"))]
    OutOfBounds(usize),

    /// The allocator could not provide the requested number of elements
    #[cfg_attr(feature = "std", error("failed to allocate {0} elements"))]
    AllocationFailed(usize),

    /// `View::after` was given a view that does not lie inside the base view
    #[cfg_attr(feature = "std", error("view is not a sub-range of the base view"))]
    NotASubView,
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for ContainerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ContainerError::OutOfBounds(i) => write!(f, "Index {} out of bounds", i),
            ContainerError::AllocationFailed(n) => write!(f, "failed to allocate {} elements", n),
            ContainerError::NotASubView => write!(f, "view is not a sub-range of the base view"),
        }
    }
}
