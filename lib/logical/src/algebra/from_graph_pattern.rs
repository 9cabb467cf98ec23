use crate::error::UnsupportedGraphPatternError;
use crate::LogicalOp;
use spargebra::algebra::GraphPattern;
use std::sync::Arc;

impl TryFrom<&GraphPattern> for LogicalOp {
    type Error = UnsupportedGraphPatternError;

    /// Converts a parsed graph pattern.
    ///
    /// `GRAPH ?g {}` becomes [LogicalOp::DatasetNames] and each `BIND` becomes an
    /// [LogicalOp::Assign] with a single assignment.
    fn try_from(pattern: &GraphPattern) -> Result<Self, Self::Error> {
        Ok(match pattern {
            GraphPattern::Bgp { patterns } => LogicalOp::Bgp {
                patterns: patterns.clone(),
            },
            GraphPattern::Path {
                subject,
                path,
                object,
            } => LogicalOp::Path {
                subject: subject.clone(),
                path: path.clone(),
                object: object.clone(),
            },
            GraphPattern::Join { left, right } => LogicalOp::Join {
                left: convert(left)?,
                right: convert(right)?,
            },
            GraphPattern::LeftJoin {
                left,
                right,
                expression,
            } => LogicalOp::LeftJoin {
                left: convert(left)?,
                right: convert(right)?,
                expression: expression.clone(),
            },
            GraphPattern::Filter { expr, inner } => LogicalOp::Filter {
                inner: convert(inner)?,
                expressions: vec![expr.clone()],
            },
            GraphPattern::Union { left, right } => LogicalOp::Union {
                left: convert(left)?,
                right: convert(right)?,
            },
            GraphPattern::Graph { name, inner } => match inner.as_ref() {
                GraphPattern::Bgp { patterns } if patterns.is_empty() => LogicalOp::DatasetNames {
                    graph_name: name.clone(),
                },
                _ => LogicalOp::Graph {
                    name: name.clone(),
                    inner: convert(inner)?,
                },
            },
            GraphPattern::Extend {
                inner,
                variable,
                expression,
            } => LogicalOp::Assign {
                inner: convert(inner)?,
                assignments: vec![(variable.clone(), expression.clone())],
            },
            GraphPattern::Minus { left, right } => LogicalOp::Minus {
                left: convert(left)?,
                right: convert(right)?,
            },
            GraphPattern::Values {
                variables,
                bindings,
            } => LogicalOp::Values {
                variables: variables.clone(),
                bindings: bindings.clone(),
            },
            GraphPattern::OrderBy { inner, expression } => LogicalOp::OrderBy {
                inner: convert(inner)?,
                expressions: expression.clone(),
            },
            GraphPattern::Project { inner, variables } => LogicalOp::Project {
                inner: convert(inner)?,
                variables: variables.clone(),
            },
            GraphPattern::Distinct { inner } => LogicalOp::Distinct {
                inner: convert(inner)?,
            },
            GraphPattern::Reduced { inner } => LogicalOp::Reduced {
                inner: convert(inner)?,
            },
            GraphPattern::Slice {
                inner,
                start,
                length,
            } => LogicalOp::Slice {
                inner: convert(inner)?,
                start: *start,
                length: *length,
            },
            GraphPattern::Group {
                inner,
                variables,
                aggregates,
            } => LogicalOp::Group {
                inner: convert(inner)?,
                variables: variables.clone(),
                aggregates: aggregates.clone(),
            },
            GraphPattern::Service {
                name,
                inner,
                silent,
            } => LogicalOp::Service {
                name: name.clone(),
                inner: convert(inner)?,
                silent: *silent,
            },
            #[allow(
                unreachable_patterns,
                reason = "LATERAL depends on the enabled spargebra features"
            )]
            _ => return Err(UnsupportedGraphPatternError(pattern.to_string())),
        })
    }
}

fn convert(pattern: &GraphPattern) -> Result<Arc<LogicalOp>, UnsupportedGraphPatternError> {
    LogicalOp::try_from(pattern).map(Arc::new)
}
