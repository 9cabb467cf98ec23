//! Logical query algebra and the term-level rewriting of algebra trees.
//!
//! A [NodeTransform](transform::NodeTransform) decides which terms are replaced by variables.
//! The [rewrite](rewrite::rewrite) function applies a transform to every term of a
//! [LogicalOp] tree while sharing every unchanged sub-tree with the input.

mod algebra;
mod error;
mod options;
pub mod rewrite;
pub mod transform;

pub use algebra::LogicalOp;
pub use error::{InvalidPrefixError, RewriteError, UnsupportedGraphPatternError};
pub use options::RewriteOptions;
