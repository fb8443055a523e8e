use thiserror::Error;

/// Errors surfaced by the tree's public API. Lookups and removals of absent keys are not errors;
/// they return `None` or `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A traversal order was requested by a name that isn't one of `inorder`, `preorder` or
    /// `postorder`.
    #[error("unknown traversal order `{0}` (expected inorder, preorder or postorder)")]
    UnknownOrder(String),
}
