//! The owning [`Tree`] type.
//!
//! # Examples
//!
//! ```
//! use bstree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.has(&1));
//! assert_eq!(tree.min(), None);
//!
//! tree.insert_all([50, 40, 70, 60, 80]);
//! assert_eq!(tree.len(), 5);
//!
//! // Inserting an existing key does nothing.
//! assert!(!tree.insert(60));
//! assert_eq!(tree.len(), 5);
//!
//! // Removing a node with two children promotes its in-order successor.
//! assert!(tree.remove(&50));
//! let root = tree.root().unwrap();
//! assert_eq!(root.key(), &60);
//! assert_eq!(root.left().map(|n| *n.key()), Some(40));
//! assert_eq!(root.right().map(|n| *n.key()), Some(70));
//! ```

use std::fmt;

use tracing::trace;

use crate::error::Error;
use crate::node::{self, Link, Node};
use crate::traverse::{self, InOrder, Order, PostOrder, PreOrder, Traversal};

/// A Binary Search Tree without self-balancing. Keys are unique; inserting a key that is already
/// present leaves the tree untouched. The shape of the tree depends only on the order keys were
/// inserted and removed in.
pub struct Tree<K> {
    root: Link<K>,
    size: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Copies node by node with an explicit stack, in `O(n)` whatever the shape.
impl<K> Clone for Tree<K>
where
    K: Clone,
{
    fn clone(&self) -> Self {
        let mut root = None;
        // Each source node is paired with the empty link its copy goes into.
        let mut pending: Vec<(&Node<K>, &mut Link<K>)> = Vec::new();
        if let Some(source) = self.root() {
            pending.push((source, &mut root));
        }

        while let Some((source, slot)) = pending.pop() {
            let copy = slot.insert(Box::new(Node::new(source.key.clone())));
            if let Some(left) = source.left() {
                pending.push((left, &mut copy.left));
            }
            if let Some(right) = source.right() {
                pending.push((right, &mut copy.right));
            }
        }

        Self {
            root,
            size: self.size,
        }
    }
}

/// Shows the size and the keys in ascending order.
impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("keys", &KeyList(self))
            .finish()
    }
}

struct KeyList<'a, K>(&'a Tree<K>);

impl<K> fmt::Debug for KeyList<'_, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.keys()).finish()
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.insert_all(keys);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        self.insert_all(keys);
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree has no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, or `None` when the tree is empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.release();
        trace!(size = self.size, "cleared tree");
    }

    /// Inserts `key` if it isn't already present. Returns whether a node was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(5));
    /// assert!(tree.insert(10));
    /// assert!(!tree.insert(5));
    ///
    /// assert_eq!(tree.root().and_then(|n| n.right()).map(|n| *n.key()), Some(10));
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let link = node::link_for(&mut self.root, &key);
        if link.is_some() {
            return false;
        }

        *link = Some(Box::new(Node::new(key)));
        self.size += 1;
        trace!(size = self.size, "attached leaf");
        true
    }

    /// Inserts each key in order. Returns how many were new.
    pub fn insert_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        keys.into_iter()
            .fold(0, |added, key| added + usize::from(self.insert(key)))
    }

    /// Removes the node holding `key`. Returns whether anything was removed; removing an absent
    /// key is a no-op.
    ///
    /// A node with a single child is replaced by that child. A node with two children keeps its
    /// place in the tree and takes the key of its in-order successor (the smallest key in its
    /// right subtree), whose node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree: Tree<i32> = [50, 20, 40, 60, 100].into_iter().collect();
    ///
    /// assert!(tree.remove(&20));
    /// assert!(!tree.remove(&20));
    ///
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.root().and_then(|n| n.left()).map(|n| *n.key()), Some(40));
    /// ```
    pub fn remove(&mut self, key: &K) -> bool
    where
        K: Ord,
    {
        let link = node::link_for(&mut self.root, key);
        let Some(target) = link.as_deref_mut() else {
            return false;
        };

        // `take_min` only comes back empty when the right subtree is, so `None` here means the
        // target has at most one child.
        let successor = match target.left {
            Some(_) => node::take_min(&mut target.right),
            None => None,
        };

        if let Some(successor) = successor {
            target.key = successor;
            trace!(size = self.size - 1, "promoted successor");
        } else if let Some(removed) = link.take() {
            let Node { left, right, .. } = *removed;
            *link = left.or(right);
            trace!(size = self.size - 1, "unlinked node");
        }

        self.size -= 1;
        true
    }

    /// Removes each key in order. Returns how many were present.
    pub fn remove_all<'k, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'k K>,
        K: Ord + 'k,
    {
        keys.into_iter()
            .fold(0, |removed, key| removed + usize::from(self.remove(key)))
    }

    /// Finds the node holding `key`. Use the returned [`Node`] to run queries confined to its
    /// subtree.
    pub fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        self.root().and_then(|root| root.find(key))
    }

    /// Whether `key` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<i32> = [5, 1, 10].into_iter().collect();
    ///
    /// assert!(tree.has(&1));
    /// assert!(tree.has(&10));
    /// assert!(!tree.has(&2));
    /// ```
    pub fn has(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Whether `key` is in the tree and its node has no children.
    pub fn is_leaf(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some_and(Node::is_leaf)
    }

    /// The smallest key, or `None` when the tree is empty.
    pub fn min(&self) -> Option<&K> {
        self.root().map(Node::min)
    }

    /// The largest key, or `None` when the tree is empty.
    pub fn max(&self) -> Option<&K> {
        self.root().map(Node::max)
    }

    /// Number of edges on the longest root-to-leaf path. An empty tree has height -1 and a tree
    /// with one node has height 0.
    pub fn height(&self) -> isize {
        traverse::height(self.root())
    }

    /// Alias of [`Tree::height`].
    pub fn depth(&self) -> isize {
        self.height()
    }

    /// Whether, for every node, the heights of its two subtrees differ by at most one. An empty
    /// tree is balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let bushy: Tree<i32> = [3, 1, 4, 2].into_iter().collect();
    /// assert!(bushy.is_balanced());
    ///
    /// let chain: Tree<i32> = (1..=6).collect();
    /// assert!(!chain.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        traverse::balanced_height(self.root()).is_some()
    }

    /// Visits every node in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'_, K> {
        Traversal::new(order, self.root())
    }

    /// Visits every node in the order named by `name` (`inorder`, `preorder` or `postorder`).
    ///
    /// # Errors
    ///
    /// [`Error::UnknownOrder`] for any other name.
    pub fn traverse_by_name(&self, name: &str) -> Result<Traversal<'_, K>, Error> {
        let order = name.parse::<Order>()?;
        Ok(self.traverse(order))
    }

    /// Visits every node left, node, right, yielding keys in ascending order.
    pub fn inorder(&self) -> InOrder<'_, K> {
        InOrder::new(self.root())
    }

    /// Visits every node node, left, right.
    pub fn preorder(&self) -> PreOrder<'_, K> {
        PreOrder::new(self.root())
    }

    /// Visits every node left, right, node.
    pub fn postorder(&self) -> PostOrder<'_, K> {
        PostOrder::new(self.root())
    }

    /// The keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.inorder().map(Node::key)
    }

    /// Frees every node with an explicit stack so skewed trees can't overflow the call stack.
    fn release(&mut self) {
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.size = 0;
    }
}
