//! The value contract shared by every tree in this crate.
//!
//! Trees never construct elements. They only compare them, store them and
//! render them for diagnostics, so an [`Element`] needs three capabilities:
//! equality, a strict "less than" and a string form (through [`fmt::Display`],
//! which gives every element a `to_string`).
//!
//! # Examples
//!
//! ```
//! use std::fmt;
//! use treekit::Element;
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl fmt::Display for Person {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "<{}:{}>", self.name, self.age)
//!     }
//! }
//!
//! impl Element for Person {
//!     fn equals(&self, other: &Self) -> bool {
//!         self.name == other.name && self.age == other.age
//!     }
//!
//!     fn less_than(&self, other: &Self) -> bool {
//!         (&self.name, self.age) < (&other.name, other.age)
//!     }
//! }
//!
//! let john = Person { name: "John Doe".into(), age: 31 };
//! let jack = Person { name: "Jack Doe".into(), age: 31 };
//!
//! assert!(jack.less_than(&john));
//! assert_eq!(john.to_string(), "<John Doe:31>");
//! ```

use std::fmt;

/// A value that can be stored in a tree node.
///
/// `less_than` must be a strict total order consistent with `equals`: for any
/// two elements exactly one of `a.less_than(b)`, `b.less_than(a)` and
/// `a.equals(b)` holds. This is not checked at runtime. Trees built from an
/// element that breaks it stay memory safe but their shape is unspecified.
pub trait Element: fmt::Display {
    /// Whether this element equals `other`.
    fn equals(&self, other: &Self) -> bool;

    /// Whether this element strictly precedes `other`.
    fn less_than(&self, other: &Self) -> bool;
}

macro_rules! impl_element_for_ord {
    ($($t:ty),* $(,)?) => {
        $(
            impl Element for $t {
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }

                fn less_than(&self, other: &Self) -> bool {
                    self < other
                }
            }
        )*
    };
}

impl_element_for_ord!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String,
);

impl Element for &str {
    fn equals(&self, other: &Self) -> bool {
        self == other
    }

    fn less_than(&self, other: &Self) -> bool {
        self < other
    }
}
