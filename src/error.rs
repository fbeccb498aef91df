use thiserror::Error;

/// Errors surfaced by handle-addressed list operations.
///
/// A failing call has no observable effect: the splice either completes
/// fully or leaves the list exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The handle is stale (its node was removed), foreign (issued by a
    /// different list), or its node's address has since been reused. The
    /// list detects this by registry lookup, never by dereferencing the
    /// handle.
    #[error("handle does not refer to a live node of this list")]
    InvalidHandle,

    /// An anchor-relative insertion was attempted on an empty list. Only
    /// `push_front`/`push_back` can populate an empty list.
    #[error("cannot anchor an insertion in an empty list")]
    EmptyAnchor,

    /// The global allocator could not provide memory for a new node.
    #[error("failed to allocate a list node")]
    AllocationFailed,
}
