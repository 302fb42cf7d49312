//! This crate provides two trees over a caller supplied [`Element`] type: an
//! unbalanced Binary Search Tree and a general purpose tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree (see [`bst`]) stores values in `Node`s that have at
//! most two children. Values are compared only through
//! [`Element::less_than`], and for every `Node`:
//!
//! - every value in its left subtree is `less_than` its value;
//! - its value is `less_than` every value in its right subtree.
//!
//! A value that is neither less nor greater than a stored one counts as
//! already present and is not stored a second time.
//!
//! This tree never rebalances, so its height depends on insertion order:
//! sorted input produces a tree that is one long chain.
//!
//! ## General Tree
//!
//! A general tree (see [`general`]) has no ordering between values. Every node
//! has an ordered list of children of any length and knows its parent.
//!
//! ## Elements
//!
//! Both trees only need to compare and print their values. [`Element`]
//! captures exactly that, and is implemented for the standard integer, `bool`,
//! `char` and string types.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod bst;
pub mod element;
pub mod error;
pub mod general;

pub use element::Element;
pub use error::{Error, Result};
