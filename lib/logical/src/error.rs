use thiserror::Error;

/// An error raised while rewriting an algebra tree.
///
/// Rewriting fails fast: an operator that cannot be rewritten aborts the whole pass instead of
/// leaving a sub-tree with stale variable names behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// The operator kind has no rewrite rule.
    #[error("Rewriting the '{0}' operator is not implemented")]
    UnsupportedOperator(&'static str),
    /// The expression kind has no rewrite rule.
    #[error("Rewriting '{0}' expressions is not implemented")]
    UnsupportedExpression(&'static str),
}

/// A graph pattern that has no [LogicalOp](crate::LogicalOp) counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Graph pattern cannot be converted into a logical operator: {0}")]
pub struct UnsupportedGraphPatternError(pub String);

/// A variable prefix that cannot be used to allocate fresh variables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPrefixError {
    /// The prefix produces names a user could write in a query.
    #[error("The prefix '{0}' can produce variable names that collide with user variables")]
    UserVisible(String),
    /// One prefix starts with the other, so both policies could allocate the same name.
    #[error("The prefixes '{blank_node_prefix}' and '{renaming_prefix}' overlap")]
    Overlapping {
        blank_node_prefix: String,
        renaming_prefix: String,
    },
}
