pub mod rb_tree;

pub use rb_tree::RBTree;

/// The error type for `try_add` and `try_reserve` methods.
#[derive(Debug)]
pub struct TryReserveError {
    pub(crate) kind: TryReserveErrorKind,
}

impl TryReserveError {
    /// Details about the allocation that caused the error
    #[must_use]
    pub fn kind(&self) -> TryReserveErrorKind {
        self.kind.clone()
    }
}

impl std::fmt::Display for TryReserveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("memory allocation failed")?;
        match self.kind {
            TryReserveErrorKind::CapacityOverflow => {
                f.write_str(" because the computed capacity exceeded the tree's maximum")
            }
            TryReserveErrorKind::AllocError { .. } => {
                f.write_str(" because the memory allocator returned an error")
            }
        }
    }
}

impl std::error::Error for TryReserveError {}

/// Details of the allocation that caused a `TryReserveError`
#[derive(Debug, Clone)]
pub enum TryReserveErrorKind {
    /// Error due to the computed capacity exceeding the tree's maximum
    /// (usually `isize::MAX` bytes).
    CapacityOverflow,

    /// The memory allocator returned an error
    AllocError {
        /// The layout of allocation request that failed
        layout: std::alloc::Layout,
    },
}
