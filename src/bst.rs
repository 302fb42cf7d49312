//! An unbalanced Binary Search Tree over any [`Element`].
//!
//! Every value is stored at most once: inserting a value that compares equal
//! to one already in the tree (neither is `less_than` the other) leaves the
//! tree untouched. Nodes own their children directly, so nothing outside the
//! tree can alias them.
//!
//! # Examples
//!
//! ```
//! use treekit::bst::Tree;
//!
//! let mut tree = Tree::from_elements([5, 3, 8, 1, 4]);
//!
//! assert!(tree.contains(&4));
//! assert_eq!(tree.min(), Some(&1));
//!
//! // Duplicates are dropped.
//! assert!(!tree.insert(3));
//! assert_eq!(tree.len(), 5);
//!
//! // Deleting a node returns its value.
//! assert_eq!(tree.delete(&3), Some(3));
//! assert_eq!(tree.delete(&3), None);
//! assert_eq!(format!("{:?}", tree), "[1, 4, 5, 8]");
//! ```

use std::fmt;
use std::mem;

use crate::Element;

type Link<E> = Option<Box<Node<E>>>;

/// A Binary Search Tree with no balancing. The tree starts out empty and owns
/// all of its nodes.
#[derive(Clone)]
pub struct Tree<E> {
    root: Link<E>,
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Drop for Tree<E> {
    // Dropping nodes recursively would recurse once per level, and a tree fed
    // sorted input is one long chain.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<E>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<E> fmt::Debug for Tree<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = Vec::new();
        if let Some(root) = self.root() {
            root.collect_in_order(&mut values);
        }
        f.debug_list()
            .entries(values.into_iter().map(Rendered))
            .finish()
    }
}

impl<E> Tree<E> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The root node, if the tree has any nodes.
    pub fn root(&self) -> Option<&Node<E>> {
        self.root.as_deref()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the nodes in the tree. This walks the whole tree.
    pub fn len(&self) -> usize {
        self.root().map_or(0, Node::len)
    }

    /// The smallest value in the tree, or `None` if the tree is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treekit::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.min(), None);
    ///
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&E> {
        self.root().map(Node::min_value)
    }
}

impl<E> Tree<E>
where
    E: Element,
{
    /// Builds a tree by inserting each element in order. Later duplicates are
    /// dropped, as with [`insert`][Tree::insert].
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut tree = Self::new();
        tree.extend(elements);
        tree
    }

    /// Inserts `value` into the tree. Returns `false`, leaving the tree as it
    /// was, if an equal value is already stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use treekit::bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: E) -> bool {
        self.insert_node(Node::new(value))
    }

    /// Places an already built node in the tree. The same duplicate policy as
    /// [`insert`][Tree::insert] applies: a node whose value is already present
    /// is dropped and `false` is returned.
    ///
    /// If `node` has children (say it was cloned from another tree), it is
    /// placed on its own and the values below it are then inserted one by
    /// one, in pre-order. The returned flag only describes `node` itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use treekit::bst::Tree;
    ///
    /// let source = Tree::from_elements([5, 3, 8]);
    /// let mut tree = Tree::from_elements([4]);
    ///
    /// assert!(tree.insert_node(source.root().unwrap().clone()));
    /// assert_eq!(format!("{:?}", tree), "[3, 4, 5, 8]");
    /// ```
    pub fn insert_node(&mut self, mut node: Node<E>) -> bool {
        let mut pending: Vec<Box<Node<E>>> = node.right.take().into_iter().collect();
        pending.extend(node.left.take());
        let inserted = self.place(Box::new(node));

        while let Some(mut next) = pending.pop() {
            pending.extend(next.right.take());
            pending.extend(next.left.take());
            self.place(next);
        }
        inserted
    }

    /// Places a childless node.
    fn place(&mut self, node: Box<Node<E>>) -> bool {
        match self.root.as_mut() {
            Some(root) => root.insert(node),
            None => {
                self.root = Some(node);
                true
            }
        }
    }

    /// Whether a value equal to `value` is stored in the tree.
    pub fn contains(&self, value: &E) -> bool {
        let mut head = self.root();
        while let Some(node) = head {
            head = if value.less_than(&node.value) {
                node.left()
            } else if node.value.less_than(value) {
                node.right()
            } else {
                return true;
            };
        }
        false
    }

    /// Deletes the node holding `value` and returns its value. If no such node
    /// exists nothing happens and `None` is returned.
    ///
    /// A node with two children is not unlinked: it takes over the smallest
    /// value of its right subtree, and that value's node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use treekit::bst::Tree;
    ///
    /// let mut tree = Tree::from_elements([2, 1, 3]);
    ///
    /// assert_eq!(tree.delete(&2), Some(2));
    /// assert_eq!(tree.root().map(|n| *n.value()), Some(3));
    /// assert_eq!(tree.delete(&42), None);
    /// ```
    pub fn delete(&mut self, value: &E) -> Option<E> {
        delete(&mut self.root, value)
    }
}

impl<E> FromIterator<E> for Tree<E>
where
    E: Element,
{
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<E> Extend<E> for Tree<E>
where
    E: Element,
{
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Operations on a tree handle that may not exist.
///
/// An `Option<Tree<E>>` that is `None` accepts inserts and deletes as no-ops
/// and logs that it did so, instead of failing.
///
/// # Examples
///
/// ```
/// use treekit::bst::{OptionalTree, Tree};
///
/// let mut missing: Option<Tree<i32>> = None;
/// assert!(!missing.insert_element(1));
/// assert!(missing.is_none());
///
/// let mut present = Some(Tree::new());
/// assert!(present.insert_element(1));
/// assert_eq!(present.delete_element(&1), Some(1));
/// ```
pub trait OptionalTree<E> {
    /// [`Tree::insert`], or nothing if the tree is absent.
    fn insert_element(&mut self, value: E) -> bool;

    /// [`Tree::insert_node`], or nothing if the tree is absent.
    fn insert_node(&mut self, node: Node<E>) -> bool;

    /// [`Tree::delete`], or nothing if the tree is absent.
    fn delete_element(&mut self, value: &E) -> Option<E>;
}

impl<E> OptionalTree<E> for Option<Tree<E>>
where
    E: Element,
{
    fn insert_element(&mut self, value: E) -> bool {
        OptionalTree::insert_node(self, Node::new(value))
    }

    fn insert_node(&mut self, node: Node<E>) -> bool {
        match self {
            Some(tree) => tree.insert_node(node),
            None => {
                log::debug!("insertion of {} skipped because the tree is absent", node.value);
                false
            }
        }
    }

    fn delete_element(&mut self, value: &E) -> Option<E> {
        match self {
            Some(tree) => tree.delete(value),
            None => {
                log::debug!("deletion of {} skipped because the tree is absent", value);
                None
            }
        }
    }
}

/// A node of a [`Tree`]. It holds one value and up to two children.
///
/// [`Node::new`] builds a childless node. A node cloned out of a tree keeps
/// its children, and [`Tree::insert_node`] re-inserts those values instead of
/// attaching the subtree as is.
#[derive(Clone)]
pub struct Node<E> {
    value: E,
    left: Link<E>,
    right: Link<E>,
}

impl<E> fmt::Debug for Node<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &Rendered(&self.value))
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<E> Node<E> {
    /// Construct a new childless `Node` holding `value`.
    pub fn new(value: E) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &E {
        &self.value
    }

    /// The subtree of values less than this node's value.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The subtree of values greater than this node's value.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The smallest value in the subtree rooted at this node, found by
    /// following left children until there are none.
    pub fn min_value(&self) -> &E {
        let mut head = self;
        while let Some(left) = head.left() {
            head = left;
        }
        &head.value
    }

    /// Number of nodes in the subtree rooted at this node, itself included.
    fn len(&self) -> usize {
        1 + self.left().map_or(0, Self::len) + self.right().map_or(0, Self::len)
    }

    fn collect_in_order<'a>(&'a self, values: &mut Vec<&'a E>) {
        if let Some(left) = self.left() {
            left.collect_in_order(values);
        }
        values.push(&self.value);
        if let Some(right) = self.right() {
            right.collect_in_order(values);
        }
    }

    fn insert(&mut self, node: Box<Self>) -> bool
    where
        E: Element,
    {
        if self.value.less_than(&node.value) {
            match self.right.as_mut() {
                Some(right) => right.insert(node),
                None => {
                    self.right = Some(node);
                    true
                }
            }
        } else if node.value.less_than(&self.value) {
            match self.left.as_mut() {
                Some(left) => left.insert(node),
                None => {
                    self.left = Some(node);
                    true
                }
            }
        } else {
            log::trace!("dropped {} because an equal value is already stored", node.value);
            false
        }
    }
}

/// Deletes `value` from the subtree in `link`, replacing the matched node with
/// whatever should take its place.
fn delete<E>(link: &mut Link<E>, value: &E) -> Option<E>
where
    E: Element,
{
    let Some(head) = link else {
        log::trace!("{} not found for deletion", value);
        return None;
    };

    if value.less_than(&head.value) {
        delete(&mut head.left, value)
    } else if head.value.less_than(value) {
        delete(&mut head.right, value)
    } else if head.left.is_none() {
        let removed = link.take()?;
        let Node { value, right, .. } = *removed;
        *link = right;
        Some(value)
    } else if head.right.is_none() {
        let removed = link.take()?;
        let Node { value, left, .. } = *removed;
        *link = left;
        Some(value)
    } else {
        let successor = delete_min(&mut head.right)?;
        Some(mem::replace(&mut head.value, successor))
    }
}

/// Deletes the minimum of the subtree in `link` and returns it. The minimum is
/// reached the same way as in [`Node::min_value`], and since it has no left
/// child its right subtree is spliced into its place.
fn delete_min<E>(link: &mut Link<E>) -> Option<E> {
    let head = link.as_mut()?;
    if head.left.is_some() {
        return delete_min(&mut head.left);
    }

    let removed = link.take()?;
    let Node { value, right, .. } = *removed;
    *link = right;
    Some(value)
}

/// Formats an element through its `Display` impl inside `Debug` output.
struct Rendered<'a, E>(&'a E);

impl<E> fmt::Debug for Rendered<'_, E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}
