//! A general purpose tree: every node holds a value and any number of ordered
//! children, with no ordering between values.
//!
//! [`Node`] is a shared handle. Cloning it gives another handle to the same
//! node, and a node lives as long as some handle to it (its parent's child
//! list included) does. A child only holds a weak back-reference to its
//! parent, so a parent and its children never keep each other alive.
//!
//! Handles use `Rc` and `RefCell`, so a tree belongs to one thread.
//!
//! # Examples
//!
//! ```
//! use treekit::general::{Node, Tree};
//!
//! let b = Node::new("B");
//! let root = Node::with_children("A", [b.clone(), Node::new("C")]);
//! b.add_child(Node::new("D"));
//!
//! let tree = Tree::new(Some(root));
//! assert_eq!(tree.size(), 4);
//!
//! let d = tree.find(&"D").unwrap();
//! assert_eq!(*d.value(), "D");
//! assert!(d.parent().unwrap().ptr_eq(&b));
//! assert!(tree.find(&"Z").is_none());
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use crate::{Element, Error, Result};

struct Inner<E> {
    value: E,
    parent: Weak<RefCell<Inner<E>>>,
    children: Vec<Node<E>>,
}

/// A handle to a node of a general tree.
pub struct Node<E>(Rc<RefCell<Inner<E>>>);

/// Manual implementation of `Clone` so cloning a handle doesn't require `E: Clone`.
impl<E> Clone for Node<E> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<E> fmt::Debug for Node<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Node")
            .field("value", &format_args!("{}", inner.value))
            .field("children", &inner.children)
            .finish()
    }
}

/// Nodes are equal when their values are. Their children are not compared.
impl<E> PartialEq for Node<E>
where
    E: Element,
{
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<E> Node<E> {
    /// Creates a childless, parentless node holding `value`.
    pub fn new(value: E) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    /// Creates a node holding `value` and adopts `children` in order, as if
    /// each had been passed to [`add_child`][Node::add_child].
    pub fn with_children<I>(value: E, children: I) -> Self
    where
        I: IntoIterator<Item = Node<E>>,
    {
        let node = Self::new(value);
        for child in children {
            node.add_child(child);
        }
        node
    }

    /// Borrows the value stored in this node.
    ///
    /// ## Panics
    ///
    /// If the value is being replaced through [`set_value`][Node::set_value]
    /// on another handle at the same time.
    pub fn value(&self) -> Ref<'_, E> {
        Ref::map(self.0.borrow(), |inner| &inner.value)
    }

    /// Replaces the value stored in this node, returning the old one.
    ///
    /// ## Panics
    ///
    /// If a [`value`][Node::value] borrow of this node is still alive.
    pub fn set_value(&self, value: E) -> E {
        mem::replace(&mut self.0.borrow_mut().value, value)
    }

    /// The node this one is a child of, if any.
    pub fn parent(&self) -> Option<Node<E>> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Handles to the children of this node, in order.
    pub fn children(&self) -> Vec<Node<E>> {
        self.0.borrow().children.clone()
    }

    /// Whether `self` and `other` are handles to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of direct children.
    pub fn number_of_children(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Whether this node has at least one child.
    pub fn has_children(&self) -> bool {
        self.number_of_children() > 0
    }

    /// Number of nodes below this one.
    pub fn number_of_descendants(&self) -> usize {
        self.size() - 1
    }

    /// Number of nodes in the subtree rooted here, this node included.
    pub fn size(&self) -> usize {
        1 + self
            .0
            .borrow()
            .children
            .iter()
            .map(Node::size)
            .sum::<usize>()
    }

    /// Appends `child` to the end of this node's children and makes this node
    /// its parent. A child that already had a parent is detached from it
    /// first, so adding an existing child again moves it to the end.
    ///
    /// Adding this node or one of its ancestors would form a cycle, so that
    /// add is skipped and the tree is left unchanged.
    pub fn add_child(&self, child: Node<E>) {
        if self.adopt(&child) {
            self.0.borrow_mut().children.push(child);
        }
    }

    /// Inserts `child` at `index`, shifting later children right, and makes
    /// this node its parent. `index` may equal the number of children, which
    /// appends. As with [`add_child`][Node::add_child], adding this node or one
    /// of its ancestors is skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use treekit::general::Node;
    /// use treekit::Error;
    ///
    /// let root = Node::with_children(0, [Node::new(1), Node::new(3)]);
    ///
    /// root.add_child_at(Node::new(2), 1).unwrap();
    /// assert_eq!(*root.get_child_at(1).unwrap().value(), 2);
    ///
    /// assert_eq!(
    ///     root.add_child_at(Node::new(9), 4),
    ///     Err(Error::IndexOutOfRange { index: 4, len: 3 }),
    /// );
    /// ```
    pub fn add_child_at(&self, child: Node<E>, index: usize) -> Result<()> {
        self.check_index(index, self.number_of_children() + 1)?;
        if !self.adopt(&child) {
            return Ok(());
        }

        let mut inner = self.0.borrow_mut();
        // Adopting a child of this very node shortened the list.
        let index = index.min(inner.children.len());
        inner.children.insert(index, child);
        Ok(())
    }

    /// Removes the child at `index`, shifting later children left, and
    /// returns it. The removed node no longer has a parent.
    pub fn remove_child_at(&self, index: usize) -> Result<Node<E>> {
        self.check_index(index, self.number_of_children())?;

        let child = self.0.borrow_mut().children.remove(index);
        child.0.borrow_mut().parent = Weak::new();
        Ok(child)
    }

    /// The child at `index`.
    pub fn get_child_at(&self, index: usize) -> Result<Node<E>> {
        self.check_index(index, self.number_of_children())?;
        Ok(self.0.borrow().children[index].clone())
    }

    /// Removes every child of this node. The removed nodes no longer have a
    /// parent.
    pub fn remove_children(&self) {
        let children = mem::take(&mut self.0.borrow_mut().children);
        for child in &children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    /// Searches this node and then its descendants, depth first and in child
    /// order, for a node whose value equals `value`.
    pub fn find(&self, value: &E) -> Option<Node<E>>
    where
        E: Element,
    {
        let inner = self.0.borrow();
        if inner.value.equals(value) {
            return Some(self.clone());
        }
        for child in &inner.children {
            if let Some(found) = child.find(value) {
                return Some(found);
            }
        }
        None
    }

    /// Whether this node's value equals `other`'s. Children are not compared.
    pub fn equals(&self, other: &Self) -> bool
    where
        E: Element,
    {
        self.value().equals(&other.value())
    }

    /// Detaches `child` from its current parent, if any, and points it at
    /// this node. Returns `false`, changing nothing, if `child` is this node or
    /// one of its ancestors.
    fn adopt(&self, child: &Node<E>) -> bool {
        if self.has_ancestor_or_self(child) {
            log::debug!("skipped adding a node below itself");
            return false;
        }

        if let Some(old_parent) = child.parent() {
            log::trace!("moving a child to a new parent");
            old_parent
                .0
                .borrow_mut()
                .children
                .retain(|sibling| !sibling.ptr_eq(child));
        }
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        true
    }

    fn has_ancestor_or_self(&self, node: &Node<E>) -> bool {
        let mut head = Some(self.clone());
        while let Some(current) = head {
            if current.ptr_eq(node) {
                return true;
            }
            head = current.parent();
        }
        false
    }

    fn check_index(&self, index: usize, bound: usize) -> Result<()> {
        if index < bound {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                len: self.number_of_children(),
            })
        }
    }
}

/// A general purpose tree: an optional root node of any shape.
pub struct Tree<E> {
    root: Option<Node<E>>,
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<E> fmt::Debug for Tree<E>
where
    E: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root).finish()
    }
}

impl<E> Tree<E> {
    /// Creates a tree with the given root, or an empty tree.
    pub fn new(root: Option<Node<E>>) -> Self {
        Self { root }
    }

    /// The root node, if there is one.
    pub fn root(&self) -> Option<&Node<E>> {
        self.root.as_ref()
    }

    /// Replaces the root node, returning the previous one.
    pub fn set_root(&mut self, root: Option<Node<E>>) -> Option<Node<E>> {
        mem::replace(&mut self.root, root)
    }

    /// Number of nodes in the tree. An empty tree has size 0.
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, Node::size)
    }

    /// The first node, depth first, whose value equals `value`. An empty tree
    /// finds nothing.
    pub fn find(&self, value: &E) -> Option<Node<E>>
    where
        E: Element,
    {
        self.root.as_ref().and_then(|root| root.find(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<E: Clone>(node: &Node<E>) -> Vec<E> {
        node.children().iter().map(|c| c.value().clone()).collect()
    }

    /// Asserts `size(node) == 1 + sum(size(child))` at every node.
    fn assert_size_law<E>(node: &Node<E>) {
        let children = node.children();
        let sum: usize = children.iter().map(Node::size).sum();
        assert_eq!(node.size(), 1 + sum);
        assert_eq!(node.number_of_descendants(), sum);
        for child in &children {
            assert_size_law(child);
        }
    }

    fn sample() -> (Node<&'static str>, Node<&'static str>) {
        let b = Node::new("B");
        let root = Node::with_children("A", [b.clone(), Node::new("C")]);
        b.add_child(Node::new("D"));
        (root, b)
    }

    #[test]
    fn size_counts_every_node() {
        let (root, b) = sample();

        assert_eq!(root.size(), 4);
        assert_eq!(root.number_of_descendants(), 3);
        assert_eq!(b.size(), 2);
        assert_eq!(Node::new(1).size(), 1);
        assert_size_law(&root);
    }

    #[test]
    fn has_children() {
        let (root, _) = sample();

        assert!(root.has_children());
        assert_eq!(root.number_of_children(), 2);
        assert!(!root.get_child_at(1).unwrap().has_children());
    }

    #[test]
    fn find_is_depth_first() {
        let (root, b) = sample();
        let second_d = Node::new("D");
        root.get_child_at(1).unwrap().add_child(second_d.clone());

        let found = root.find(&"D").unwrap();
        assert!(found.parent().unwrap().ptr_eq(&b));
        assert!(!found.ptr_eq(&second_d));
        assert!(root.find(&"A").unwrap().ptr_eq(&root));
        assert!(root.find(&"Z").is_none());
    }

    #[test]
    fn add_child_sets_parent() {
        let root = Node::new(0);
        let child = Node::new(1);
        root.add_child(child.clone());

        assert!(child.parent().unwrap().ptr_eq(&root));
        assert!(root.parent().is_none());
    }

    // Initial children are adopted, unlike a bare constructor that would leave
    // their parent unset.
    #[test]
    fn construction_adopts_initial_children() {
        let child = Node::new(1);
        let root = Node::with_children(0, [child.clone()]);

        assert!(child.parent().unwrap().ptr_eq(&root));
    }

    #[test]
    fn add_child_at_shifts_right() {
        let root = Node::with_children(0, [Node::new(1), Node::new(3)]);

        root.add_child_at(Node::new(2), 1).unwrap();
        root.add_child_at(Node::new(4), 3).unwrap();
        root.add_child_at(Node::new(-1), 0).unwrap();

        assert_eq!(values(&root), [-1, 1, 2, 3, 4]);
        assert!(root.get_child_at(2).unwrap().parent().unwrap().ptr_eq(&root));
    }

    #[test]
    fn add_child_at_out_of_range() {
        let root = Node::with_children(0, [Node::new(1), Node::new(2)]);
        let child = Node::new(3);

        assert_eq!(
            root.add_child_at(child.clone(), 3),
            Err(Error::IndexOutOfRange { index: 3, len: 2 })
        );
        assert_eq!(values(&root), [1, 2]);
        assert!(child.parent().is_none());
    }

    #[test]
    fn remove_child_at_shifts_left() {
        let root = Node::with_children(0, [Node::new(1), Node::new(2), Node::new(3)]);

        let removed = root.remove_child_at(1).unwrap();

        assert_eq!(*removed.value(), 2);
        assert_eq!(values(&root), [1, 3]);
    }

    #[test]
    fn remove_child_at_out_of_range() {
        let root = Node::with_children(0, [Node::new(1), Node::new(2)]);

        assert_eq!(
            root.remove_child_at(5).unwrap_err(),
            Error::IndexOutOfRange { index: 5, len: 2 }
        );
        assert!(root.remove_child_at(2).is_err());
        assert_eq!(values(&root), [1, 2]);
    }

    #[test]
    fn removal_clears_parent() {
        let root = Node::with_children(0, [Node::new(1), Node::new(2)]);
        let first = root.get_child_at(0).unwrap();
        let second = root.get_child_at(1).unwrap();

        root.remove_child_at(0).unwrap();
        assert!(first.parent().is_none());

        root.remove_children();
        assert!(second.parent().is_none());
        assert!(!root.has_children());
        assert_eq!(root.size(), 1);
    }

    #[test]
    fn get_child_at_bounds() {
        let root = Node::with_children(0, [Node::new(1)]);

        assert_eq!(*root.get_child_at(0).unwrap().value(), 1);
        assert!(root.get_child_at(1).is_err());
        assert!(Node::new(0).get_child_at(0).is_err());
    }

    #[test]
    fn adding_to_a_new_parent_moves_the_child() {
        let first = Node::new("first");
        let second = Node::new("second");
        let child = Node::new("child");

        first.add_child(child.clone());
        second.add_child(child.clone());

        assert!(!first.has_children());
        assert!(child.parent().unwrap().ptr_eq(&second));
    }

    #[test]
    fn re_adding_a_child_at_the_end() {
        let root = Node::with_children(0, [Node::new(1), Node::new(2)]);
        let first = root.get_child_at(0).unwrap();

        root.add_child_at(first, 2).unwrap();

        assert_eq!(values(&root), [2, 1]);
    }

    #[test]
    fn adding_self_or_ancestor_is_skipped() {
        let (root, b) = sample();
        let d = b.get_child_at(0).unwrap();

        root.add_child(root.clone());
        d.add_child(root.clone());
        d.add_child_at(b.clone(), 0).unwrap();

        assert_eq!(root.size(), 4);
        assert!(!d.has_children());
        assert!(b.parent().unwrap().ptr_eq(&root));
        assert!(root.parent().is_none());
        assert!(root.find(&"Z").is_none());
    }

    #[test]
    fn parent_does_not_keep_child_alive() {
        let root = Node::with_children(0, [Node::new(1)]);
        let child = root.get_child_at(0).unwrap();
        drop(root);

        assert!(child.parent().is_none());
    }

    #[test]
    fn set_value_replaces() {
        let node = Node::new(1);

        assert_eq!(node.set_value(2), 1);
        assert_eq!(*node.value(), 2);
    }

    #[test]
    fn node_equality_compares_values_only() {
        let a = Node::with_children(1, [Node::new(2)]);
        let b = Node::new(1);

        assert!(a.equals(&b));
        assert_eq!(Some(&a), Some(&b));
        assert_ne!(Some(&a), None);
        assert_eq!(None::<&Node<i32>>, None);
        assert_ne!(a, Node::new(2));
    }

    #[test]
    fn empty_tree() {
        let mut tree = Tree::<i32>::default();

        assert_eq!(tree.size(), 0);
        assert!(tree.find(&1).is_none());
        assert!(tree.root().is_none());

        assert!(tree.set_root(Some(Node::new(1))).is_none());
        assert_eq!(tree.size(), 1);
        assert!(tree.find(&1).is_some());
    }

    #[test]
    fn debug_shows_shape() {
        let root = Node::with_children(1, [Node::new(2)]);

        assert_eq!(
            format!("{:?}", root),
            "Node { value: 1, children: [Node { value: 2, children: [] }] }"
        );
    }
}
