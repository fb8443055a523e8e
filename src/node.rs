use std::cmp::Ordering;
use std::fmt;

use crate::traverse::{self, InOrder, Order, PostOrder, PreOrder, Traversal};

/// An owning edge to a subtree. `None` is the empty subtree below a leaf.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A `Node` stores one key and owns up to two children. Every key in the left subtree is smaller
/// than this node's key and every key in the right subtree is larger.
///
/// `Node`s are only handed out by reference from a [`Tree`][crate::Tree]. Any `&Node` can be used
/// as the root of a subtree query, which is how searches are confined to part of a tree.
///
/// # Examples
///
/// ```
/// use bstree::Tree;
///
/// let tree: Tree<i32> = [50, 40, 30, 10, 15, 5].into_iter().collect();
/// let ten = tree.find(&10).unwrap();
///
/// assert_eq!(ten.key(), &10);
/// assert!(ten.has(&15));
/// assert!(!ten.has(&50));
/// assert_eq!(ten.min(), &5);
/// assert_eq!(ten.max(), &15);
/// ```
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

/// Shows the key and only the keys of the children, so formatting never recurses down the tree.
impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Finds the node holding `key` in the subtree rooted here.
    pub fn find(&self, key: &K) -> Option<&Self>
    where
        K: Ord,
    {
        let mut current = Some(self);
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }

        None
    }

    /// Whether `key` is stored in the subtree rooted here.
    pub fn has(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// The smallest key in the subtree rooted here.
    pub fn min(&self) -> &K {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        &node.key
    }

    /// The largest key in the subtree rooted here.
    pub fn max(&self) -> &K {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        &node.key
    }

    /// Number of edges on the longest path from this node down to a leaf. A leaf has height 0.
    pub fn height(&self) -> isize {
        traverse::height(Some(self))
    }

    /// Alias of [`Node::height`].
    pub fn depth(&self) -> isize {
        self.height()
    }

    /// Whether, for every node in this subtree, the heights of its two subtrees differ by at most
    /// one.
    pub fn is_balanced(&self) -> bool {
        traverse::balanced_height(Some(self)).is_some()
    }

    /// Visits this subtree in the given order.
    pub fn traverse(&self, order: Order) -> Traversal<'_, K> {
        Traversal::new(order, Some(self))
    }

    /// Visits this subtree left, node, right. Keys come out in ascending order.
    pub fn inorder(&self) -> InOrder<'_, K> {
        InOrder::new(Some(self))
    }

    /// Visits this subtree node, left, right.
    pub fn preorder(&self) -> PreOrder<'_, K> {
        PreOrder::new(Some(self))
    }

    /// Visits this subtree left, right, node.
    pub fn postorder(&self) -> PostOrder<'_, K> {
        PostOrder::new(Some(self))
    }
}

/// Walks down from `link` and returns the link holding `key`. If `key` isn't present this is the
/// empty link where a node for `key` would be attached.
pub(crate) fn link_for<'a, K>(mut link: &'a mut Link<K>, key: &K) -> &'a mut Link<K>
where
    K: Ord,
{
    loop {
        let Some(ordering) = link.as_deref().map(|node| key.cmp(&node.key)) else {
            return link;
        };
        link = match (ordering, link) {
            (Ordering::Less, Some(node)) => &mut node.left,
            (Ordering::Greater, Some(node)) => &mut node.right,
            (_, link) => return link,
        };
    }
}

/// Unlinks the leftmost node under `link` and returns its key. The leftmost node has no left
/// child, so its right subtree takes its place.
pub(crate) fn take_min<K>(mut link: &mut Link<K>) -> Option<K> {
    while link.as_ref()?.left.is_some() {
        link = match link {
            Some(node) => &mut node.left,
            None => return None,
        };
    }

    let removed = link.take()?;
    let Node { key, right, .. } = *removed;
    *link = right;
    Some(key)
}
