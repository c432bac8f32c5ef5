//! # Overview
//!
//! This crate implements the tree-to-tree correction algorithm by Kuo-Chung Tai (J. ACM 26(3),
//! 1979), which finds the cheapest sequence of relabellings, insertions and deletions that
//! transforms one ordered, labeled tree into another, along with the node correspondences that
//! realize it.
//!
//! Relabelling, inserting and deleting a node cost one each, while mapping a node onto another
//! with the same label is free. The roots of both trees are always mapped onto each other.
//!
//! # Example
//!
//! ```rust
//! use tree_correction::*;
//! # use serde_json::Value;
//! #
//! # fn nested(value: &Value) -> Nested<String> {
//! #     let (label, children) = value.as_object().and_then(|m| m.iter().next()).unwrap();
//! #     let children = children
//! #         .as_array()
//! #         .map(|c| c.iter().map(nested).collect::<Vec<_>>())
//! #         .unwrap_or_default();
//! #     Nested::from((label.clone(), children))
//! # }
//!
//! macro_rules! tree {
//!     ($( $tokens:tt )*) => {
//!         // ...
//! #         Tree::from_nested(nested(&::serde_json::json!({$($tokens)*})))
//!     };
//! }
//!
//! let before = tree! {
//!     "A": [
//!         { "B": null },
//!         { "C": [{ "D": null }] }
//!     ]
//! };
//!
//! let after = tree! {
//!     "A": [
//!         { "B": null },
//!         { "C": [{ "D": [{ "E": null }] }] }
//!     ]
//! };
//!
//! let (distance, mapping) = compute_diff(&before, &after)?;
//!
//! assert_eq!(distance, 1);
//!
//! assert_eq!(&*mapping, &[
//!     Edit::Replace(1, 1),
//!     Edit::Replace(2, 2),
//!     Edit::Replace(3, 3),
//!     Edit::Replace(4, 4),
//!     Edit::Insert(5),
//! ]);
//!
//! assert_eq!(format_mapping(&mapping, &before, &after)?, [
//!     "No change for A (@1 and @1)",
//!     "No change for B (@2 and @2)",
//!     "No change for C (@3 and @3)",
//!     "No change for D (@4 and @4)",
//!     "Insert E (@5)",
//! ]);
//! # Ok::<(), Error>(())
//! ```

mod cost;
mod diff;
mod dot;
mod edit;
mod error;
mod format;
mod tree;

pub use cost::*;
pub use diff::*;
pub use dot::*;
pub use edit::*;
pub use error::*;
pub use format::*;
pub use tree::*;

mod script;

pub(crate) use script::*;
