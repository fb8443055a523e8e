//! Depth-first traversals. Each order is an explicit-stack state machine that yields nodes one at
//! a time without materializing the whole sequence or recursing.
//!
//! The iterators borrow the tree, so it can't be mutated while a traversal is in progress. They
//! are `Clone`: cloning an iterator part way through gives an independent cursor that resumes
//! from the same point.
//!
//! # Examples
//!
//! ```
//! use bstree::{Order, Tree};
//!
//! let tree: Tree<i32> = [4, 2, 1, 3, 6, 5, 7].into_iter().collect();
//! let keys = |order: Order| tree.traverse(order).map(|n| *n.key()).collect::<Vec<_>>();
//!
//! assert_eq!(keys(Order::InOrder), [1, 2, 3, 4, 5, 6, 7]);
//! assert_eq!(keys(Order::PreOrder), [4, 2, 1, 3, 6, 5, 7]);
//! assert_eq!(keys(Order::PostOrder), [1, 3, 2, 5, 7, 6, 4]);
//!
//! assert_eq!("postorder".parse::<Order>(), Ok(Order::PostOrder));
//! assert!("levelorder".parse::<Order>().is_err());
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::str::FromStr;

use tracing::debug;

use crate::error::Error;
use crate::node::Node;

/// The depth-first orders a tree can be walked in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree. Yields keys in ascending order.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl Order {
    /// The name this order parses from.
    pub fn name(self) -> &'static str {
        match self {
            Self::InOrder => "inorder",
            Self::PreOrder => "preorder",
            Self::PostOrder => "postorder",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inorder" => Ok(Self::InOrder),
            "preorder" => Ok(Self::PreOrder),
            "postorder" => Ok(Self::PostOrder),
            _ => {
                debug!(order = s, "rejected traversal order");
                Err(Error::UnknownOrder(s.to_string()))
            }
        }
    }
}

/// In-order iterator. Keeps the path of nodes whose left subtree is still being visited plus a
/// cursor for the next subtree to descend into.
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    current: Option<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }

        let node = self.stack.pop()?;
        self.current = node.right();
        Some(node)
    }
}

/// Pre-order iterator.
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is popped, and visited, first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

/// Post-order iterator. A node on the stack is only emitted once its right subtree is done, which
/// is detected by remembering the last node emitted.
pub struct PostOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    current: Option<&'a Node<K>>,
    last: Option<&'a Node<K>>,
}

impl<'a, K> PostOrder<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
            last: None,
        }
    }
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(node) = self.current {
                self.stack.push(node);
                self.current = node.left();
            }

            let top = *self.stack.last()?;
            match top.right() {
                Some(right) if !self.last.is_some_and(|last| ptr::eq(last, right)) => {
                    self.current = Some(right);
                }
                _ => {
                    self.stack.pop();
                    self.last = Some(top);
                    return Some(top);
                }
            }
        }
    }
}

/// A traversal in an order picked at runtime. Returned by `traverse` on [`Tree`][crate::Tree]
/// and [`Node`].
pub enum Traversal<'a, K> {
    /// See [`InOrder`].
    InOrder(InOrder<'a, K>),
    /// See [`PreOrder`].
    PreOrder(PreOrder<'a, K>),
    /// See [`PostOrder`].
    PostOrder(PostOrder<'a, K>),
}

impl<'a, K> Traversal<'a, K> {
    pub(crate) fn new(order: Order, root: Option<&'a Node<K>>) -> Self {
        match order {
            Order::InOrder => Self::InOrder(InOrder::new(root)),
            Order::PreOrder => Self::PreOrder(PreOrder::new(root)),
            Order::PostOrder => Self::PostOrder(PostOrder::new(root)),
        }
    }

    /// The order this traversal walks in.
    pub fn order(&self) -> Order {
        match self {
            Self::InOrder(_) => Order::InOrder,
            Self::PreOrder(_) => Order::PreOrder,
            Self::PostOrder(_) => Order::PostOrder,
        }
    }
}

impl<'a, K> Iterator for Traversal<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::InOrder(it) => it.next(),
            Self::PreOrder(it) => it.next(),
            Self::PostOrder(it) => it.next(),
        }
    }
}

// Manual implementations so cloning a cursor doesn't require `K: Clone`.
impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current,
        }
    }
}

impl<K> Clone for PreOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<K> Clone for PostOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current,
            last: self.last,
        }
    }
}

impl<K> Clone for Traversal<'_, K> {
    fn clone(&self) -> Self {
        match self {
            Self::InOrder(it) => Self::InOrder(it.clone()),
            Self::PreOrder(it) => Self::PreOrder(it.clone()),
            Self::PostOrder(it) => Self::PostOrder(it.clone()),
        }
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}
impl<K> FusedIterator for PreOrder<'_, K> {}
impl<K> FusedIterator for PostOrder<'_, K> {}
impl<K> FusedIterator for Traversal<'_, K> {}

/// Folds subtree heights bottom up in a single post-order pass. `accept` sees the heights of each
/// node's left and right subtrees; rejecting a node stops the walk and yields `None`. An absent
/// subtree has height -1.
fn fold_heights<K>(
    root: Option<&Node<K>>,
    mut accept: impl FnMut(isize, isize) -> bool,
) -> Option<isize> {
    // Post-order leaves exactly one entry per finished subtree, right above its left sibling's.
    let mut heights: Vec<isize> = Vec::new();
    for node in PostOrder::new(root) {
        let right = match node.right() {
            Some(_) => heights.pop()?,
            None => -1,
        };
        let left = match node.left() {
            Some(_) => heights.pop()?,
            None => -1,
        };
        if !accept(left, right) {
            return None;
        }
        heights.push(1 + left.max(right));
    }

    Some(heights.pop().unwrap_or(-1))
}

/// Height of the subtree at `root`: -1 when absent, 0 for a leaf.
pub(crate) fn height<K>(root: Option<&Node<K>>) -> isize {
    fold_heights(root, |_, _| true).unwrap_or(-1)
}

/// The height of the subtree at `root`, or `None` as soon as any node in it has subtrees whose
/// heights differ by more than one.
pub(crate) fn balanced_height<K>(root: Option<&Node<K>>) -> Option<isize> {
    fold_heights(root, |left, right| left.abs_diff(right) <= 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tree;

    fn keys<'a>(nodes: impl Iterator<Item = &'a Node<i32>>) -> Vec<i32> {
        nodes.map(|n| *n.key()).collect()
    }

    #[test]
    fn empty_tree_yields_nothing() {
        assert_eq!(InOrder::<i32>::new(None).next().map(Node::key), None);
        assert_eq!(PreOrder::<i32>::new(None).next().map(Node::key), None);
        assert_eq!(PostOrder::<i32>::new(None).next().map(Node::key), None);
    }

    #[test]
    fn orders_on_skewed_trees() {
        let right_chain: Tree<i32> = (1..=4).collect();
        assert_eq!(keys(right_chain.inorder()), [1, 2, 3, 4]);
        assert_eq!(keys(right_chain.preorder()), [1, 2, 3, 4]);
        assert_eq!(keys(right_chain.postorder()), [4, 3, 2, 1]);

        let left_chain: Tree<i32> = (1..=4).rev().collect();
        assert_eq!(keys(left_chain.inorder()), [1, 2, 3, 4]);
        assert_eq!(keys(left_chain.preorder()), [4, 3, 2, 1]);
        assert_eq!(keys(left_chain.postorder()), [1, 2, 3, 4]);
    }

    #[test]
    fn postorder_with_only_right_children_below_left() {
        // 10 -> left 5 -> right 7 -> right 8
        let tree: Tree<i32> = [10, 5, 7, 8].into_iter().collect();
        assert_eq!(keys(tree.postorder()), [8, 7, 5, 10]);
    }

    #[test]
    fn cloned_cursor_resumes_independently() {
        let tree: Tree<i32> = [4, 2, 1, 3, 6, 5, 7].into_iter().collect();
        let mut it = tree.postorder();
        it.next();
        it.next();

        let resumed = it.clone();
        assert_eq!(keys(it), [2, 5, 7, 6, 4]);
        assert_eq!(keys(resumed), [2, 5, 7, 6, 4]);
    }

    #[test]
    fn traversal_is_fused() {
        let tree: Tree<i32> = [1].into_iter().collect();
        let mut it = tree.traverse(Order::PreOrder);
        assert_eq!(it.next().map(Node::key), Some(&1));
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn parse_and_display_round_trip_names() {
        for order in [Order::InOrder, Order::PreOrder, Order::PostOrder] {
            assert_eq!(order.to_string().parse::<Order>(), Ok(order));
        }
        assert_eq!(Order::default(), Order::InOrder);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            "InOrder".parse::<Order>(),
            Err(Error::UnknownOrder("InOrder".to_string()))
        );
        assert!("".parse::<Order>().is_err());
    }

    #[test]
    fn heights() {
        assert_eq!(height::<i32>(None), -1);

        let tree: Tree<i32> = [8, 3, 1, 6, 4, 7, 10, 14, 13].into_iter().collect();
        assert_eq!(height(tree.root()), 3);
        assert_eq!(balanced_height(tree.root()), None);

        let tree: Tree<i32> = [3, 1, 4, 2].into_iter().collect();
        assert_eq!(balanced_height(tree.root()), Some(2));
    }
}
