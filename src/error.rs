use thiserror::Error;

/// Result type alias for tree and diff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations reported by [Tree][crate::Tree] queries and [compute_diff][crate::compute_diff].
///
/// None of these are transient; they always stem from misuse of positions or tree structure.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The position is zero, exceeds the tree size, or the preorder cache is stale.
    #[error("no node at preorder position {0}")]
    InvalidPosition(usize),

    /// There is no child of `ancestor` on the path up from `descendant`.
    #[error("no child of @{ancestor} lies on the path from @{descendant}")]
    NoQualifyingChild { ancestor: usize, descendant: usize },

    /// A cost table was read before the entry was populated.
    #[error("{table} has no entry for {key}")]
    MissingEntry { table: &'static str, key: String },
}
