//! Errors returned by tree operations.

/// Shorthand for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when operating on a tree.
///
/// Operations on absent trees or subtrees are not errors: they are no-ops
/// (see [`OptionalTree`][crate::bst::OptionalTree]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A positional child operation was given an index outside the child list.
    #[error("index {index} out of range for a node with {len} children")]
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// How many children the node had at the time.
        len: usize,
    },
}
