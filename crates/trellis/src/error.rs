use thiserror::Error;

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by structural tree operations.
///
/// Everything else in the crate is deliberately infallible: malformed
/// geometry is clamped, unmatched touch identities and hit-test misses are
/// ignored, and ID lookup misses are reported as `None`. Only structural
/// misuse, which would corrupt ownership invariants, fails loudly.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The operation referenced a view that is not in the tree.
    #[error("unknown view")]
    UnknownView,
    /// The operation would violate a structural invariant.
    #[error("invalid: {0}")]
    Invalid(String),
}
