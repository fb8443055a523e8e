//! An unbalanced Binary Search Tree (BST) over ordered keys.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)`. This tree does no rebalancing, so its height depends
//! entirely on insertion order: inserting keys in sorted order builds a chain. Every walk over the
//! tree (insert, find, delete, height, traversals, clone, drop) uses an explicit stack or a
//! cursor rather than recursion, and `Debug` output never nests nodes, so such chains are safe
//! to build.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree: Tree<i32> = [4, 2, 1, 3, 6, 5, 7].into_iter().collect();
//!
//! assert_eq!(tree.len(), 7);
//! assert_eq!(tree.min(), Some(&1));
//! assert_eq!(tree.max(), Some(&7));
//! assert_eq!(tree.height(), 2);
//! assert!(tree.is_balanced());
//!
//! // Queries can be confined to a subtree.
//! let six = tree.find(&6).unwrap();
//! assert!(six.has(&5));
//! assert!(!six.has(&2));
//!
//! tree.remove(&4);
//! let preorder: Vec<_> = tree.preorder().map(|n| *n.key()).collect();
//! assert_eq!(preorder, [5, 2, 1, 3, 6, 7]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod node;
pub mod traverse;
mod tree;

pub use error::Error;
pub use node::Node;
pub use traverse::{InOrder, Order, PostOrder, PreOrder, Traversal};
pub use tree::Tree;
