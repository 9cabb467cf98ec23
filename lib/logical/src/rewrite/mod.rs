mod expression;

pub use expression::{rename_expression, rewrite_expression, ExpressionRewriter};

use crate::error::RewriteError;
use crate::transform::{NodeTransform, VariableRenamer};
use crate::LogicalOp;
use quadview_model::{TriplePattern, Variable};
use spargebra::algebra::{AggregateExpression, Expression, OrderExpression};
use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::trace;

/// Applies `transform` to every term of the tree rooted at `op`.
///
/// Sub-trees in which nothing changed are returned as the same [Arc]. Hence, if no term of the
/// tree is in the domain of `transform`, the result is pointer-equal to `op`.
pub fn rewrite<T: NodeTransform + ?Sized>(
    op: &Arc<LogicalOp>,
    transform: &mut T,
) -> Result<Arc<LogicalOp>, RewriteError> {
    let result = AlgebraRewriter::new(transform).rewrite(op)?;
    trace!(
        root = op.name(),
        changed = !Arc::ptr_eq(op, &result),
        "Rewrote algebra tree"
    );
    Ok(result)
}

/// Renames all variables in `op` except `protected` to fresh variables.
pub fn rename(
    op: &Arc<LogicalOp>,
    protected: impl IntoIterator<Item = Variable>,
) -> Result<Arc<LogicalOp>, RewriteError> {
    rewrite(op, &mut VariableRenamer::new(protected))
}

/// Rewrites an algebra tree bottom-up.
///
/// Each operator first rewrites its children and then its own terms and expressions. A new
/// node is only built if a child or a local term changed.
pub struct AlgebraRewriter<'t, T: ?Sized> {
    transform: &'t mut T,
}

impl<'t, T: NodeTransform + ?Sized> AlgebraRewriter<'t, T> {
    pub fn new(transform: &'t mut T) -> Self {
        Self { transform }
    }

    /// Rewrites the tree rooted at `op`.
    pub fn rewrite(&mut self, op: &Arc<LogicalOp>) -> Result<Arc<LogicalOp>, RewriteError> {
        Ok(match self.rewrite_node(op)? {
            Some(rewritten) => Arc::new(rewritten),
            None => Arc::clone(op),
        })
    }

    /// Returns [None] if neither `op` nor any of its descendants changed.
    fn rewrite_node(&mut self, op: &LogicalOp) -> Result<Option<LogicalOp>, RewriteError> {
        match op {
            LogicalOp::Bgp { patterns } => Ok(self
                .rewrite_patterns(patterns)
                .map(|patterns| LogicalOp::Bgp { patterns })),
            LogicalOp::Triple { pattern } => Ok(
                match self.transform.transform_triple_pattern(pattern) {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(pattern) => Some(LogicalOp::Triple { pattern }),
                },
            ),
            LogicalOp::QuadPattern {
                graph_name,
                patterns,
            } => {
                let new_graph_name = self.transform.transform_graph_name_pattern(graph_name);
                let new_patterns = self.rewrite_patterns(patterns);
                if matches!(new_graph_name, Cow::Borrowed(_)) && new_patterns.is_none() {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::QuadPattern {
                    graph_name: new_graph_name.into_owned(),
                    patterns: new_patterns.unwrap_or_else(|| patterns.clone()),
                }))
            }
            LogicalOp::Path { .. } => Err(RewriteError::UnsupportedOperator(op.name())),
            LogicalOp::Join { left, right } => Ok(self
                .rewrite_pair(left, right)?
                .map(|(left, right)| LogicalOp::Join { left, right })),
            LogicalOp::LeftJoin {
                left,
                right,
                expression,
            } => {
                let children = self.rewrite_pair(left, right)?;
                let new_expression = match expression {
                    None => None,
                    Some(expression) => match self.rewrite_expression(expression)? {
                        Cow::Borrowed(_) => None,
                        Cow::Owned(expression) => Some(expression),
                    },
                };
                if children.is_none() && new_expression.is_none() {
                    return Ok(None);
                }
                let (left, right) =
                    children.unwrap_or_else(|| (Arc::clone(left), Arc::clone(right)));
                Ok(Some(LogicalOp::LeftJoin {
                    left,
                    right,
                    expression: new_expression.or_else(|| expression.clone()),
                }))
            }
            LogicalOp::Union { left, right } => Ok(self
                .rewrite_pair(left, right)?
                .map(|(left, right)| LogicalOp::Union { left, right })),
            LogicalOp::Minus { left, right } => Ok(self
                .rewrite_pair(left, right)?
                .map(|(left, right)| LogicalOp::Minus { left, right })),
            LogicalOp::Filter { inner, expressions } => {
                let new_inner = self.rewrite(inner)?;
                let new_expressions =
                    rewrite_slice(expressions, |e| self.rewrite_expression(e))?;
                if Arc::ptr_eq(inner, &new_inner) && new_expressions.is_none() {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::Filter {
                    inner: new_inner,
                    expressions: new_expressions.unwrap_or_else(|| expressions.clone()),
                }))
            }
            LogicalOp::Graph { name, inner } => {
                let new_inner = self.rewrite(inner)?;
                let new_name = self.transform.transform_named_node_pattern(name);
                if Arc::ptr_eq(inner, &new_inner) && matches!(new_name, Cow::Borrowed(_)) {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::Graph {
                    name: new_name.into_owned(),
                    inner: new_inner,
                }))
            }
            LogicalOp::Assign { inner, assignments } => {
                let new_inner = self.rewrite(inner)?;
                let new_assignments = rewrite_slice(assignments, |assignment| {
                    let (variable, expression) = assignment;
                    let variable = self.transform.transform_variable(variable);
                    let expression = self.rewrite_expression(expression)?;
                    Ok(rebuild_pair(assignment, variable, expression))
                })?;
                if Arc::ptr_eq(inner, &new_inner) && new_assignments.is_none() {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::Assign {
                    inner: new_inner,
                    assignments: new_assignments.unwrap_or_else(|| assignments.clone()),
                }))
            }
            LogicalOp::Values {
                variables,
                bindings,
            } => {
                if op.is_join_identity() {
                    return Ok(None);
                }
                Ok(self
                    .rewrite_variables(variables)
                    .map(|variables| LogicalOp::Values {
                        variables,
                        bindings: bindings.clone(),
                    }))
            }
            LogicalOp::DatasetNames { graph_name } => Ok(
                match self.transform.transform_named_node_pattern(graph_name) {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(graph_name) => Some(LogicalOp::DatasetNames { graph_name }),
                },
            ),
            LogicalOp::Project { inner, variables } => {
                let new_inner = self.rewrite(inner)?;
                let new_variables = self.rewrite_variables(variables);
                if Arc::ptr_eq(inner, &new_inner) && new_variables.is_none() {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::Project {
                    inner: new_inner,
                    variables: new_variables.unwrap_or_else(|| variables.clone()),
                }))
            }
            LogicalOp::Distinct { inner } => Ok(self
                .rewrite_child(inner)?
                .map(|inner| LogicalOp::Distinct { inner })),
            LogicalOp::Reduced { inner } => Ok(self
                .rewrite_child(inner)?
                .map(|inner| LogicalOp::Reduced { inner })),
            LogicalOp::Slice {
                inner,
                start,
                length,
            } => Ok(self.rewrite_child(inner)?.map(|inner| LogicalOp::Slice {
                inner,
                start: *start,
                length: *length,
            })),
            LogicalOp::OrderBy { inner, expressions } => {
                let new_inner = self.rewrite(inner)?;
                let new_expressions =
                    rewrite_slice(expressions, |e| self.rewrite_order_expression(e))?;
                if Arc::ptr_eq(inner, &new_inner) && new_expressions.is_none() {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::OrderBy {
                    inner: new_inner,
                    expressions: new_expressions.unwrap_or_else(|| expressions.clone()),
                }))
            }
            LogicalOp::Group {
                inner,
                variables,
                aggregates,
            } => {
                let new_inner = self.rewrite(inner)?;
                let new_variables = self.rewrite_variables(variables);
                let new_aggregates = rewrite_slice(aggregates, |binding| {
                    let (variable, aggregate) = binding;
                    let variable = self.transform.transform_variable(variable);
                    let aggregate = self.rewrite_aggregate(aggregate)?;
                    Ok(rebuild_pair(binding, variable, aggregate))
                })?;
                if Arc::ptr_eq(inner, &new_inner)
                    && new_variables.is_none()
                    && new_aggregates.is_none()
                {
                    return Ok(None);
                }
                Ok(Some(LogicalOp::Group {
                    inner: new_inner,
                    variables: new_variables.unwrap_or_else(|| variables.clone()),
                    aggregates: new_aggregates.unwrap_or_else(|| aggregates.clone()),
                }))
            }
            LogicalOp::Service { .. } => Err(RewriteError::UnsupportedOperator(op.name())),
        }
    }

    /// Returns [None] if `inner` did not change.
    fn rewrite_child(
        &mut self,
        inner: &Arc<LogicalOp>,
    ) -> Result<Option<Arc<LogicalOp>>, RewriteError> {
        let new_inner = self.rewrite(inner)?;
        Ok((!Arc::ptr_eq(inner, &new_inner)).then_some(new_inner))
    }

    /// Returns [None] if neither `left` nor `right` changed.
    fn rewrite_pair(
        &mut self,
        left: &Arc<LogicalOp>,
        right: &Arc<LogicalOp>,
    ) -> Result<Option<(Arc<LogicalOp>, Arc<LogicalOp>)>, RewriteError> {
        let new_left = self.rewrite(left)?;
        let new_right = self.rewrite(right)?;
        if Arc::ptr_eq(left, &new_left) && Arc::ptr_eq(right, &new_right) {
            return Ok(None);
        }
        Ok(Some((new_left, new_right)))
    }

    fn rewrite_patterns(&mut self, patterns: &[TriplePattern]) -> Option<Vec<TriplePattern>> {
        let transform = &mut *self.transform;
        into_ok(rewrite_slice(patterns, |pattern| {
            Ok(transform.transform_triple_pattern(pattern))
        }))
    }

    fn rewrite_variables(&mut self, variables: &[Variable]) -> Option<Vec<Variable>> {
        let transform = &mut *self.transform;
        into_ok(rewrite_slice(variables, |variable| {
            Ok(transform.transform_variable(variable))
        }))
    }

    fn rewrite_expression<'e>(
        &mut self,
        expression: &'e Expression,
    ) -> Result<Cow<'e, Expression>, RewriteError> {
        ExpressionRewriter::new(&mut *self.transform).rewrite(expression)
    }

    fn rewrite_order_expression<'e>(
        &mut self,
        expression: &'e OrderExpression,
    ) -> Result<Cow<'e, OrderExpression>, RewriteError> {
        let (inner, build): (_, fn(Expression) -> OrderExpression) = match expression {
            OrderExpression::Asc(inner) => (inner, OrderExpression::Asc),
            OrderExpression::Desc(inner) => (inner, OrderExpression::Desc),
        };
        Ok(match self.rewrite_expression(inner)? {
            Cow::Borrowed(_) => Cow::Borrowed(expression),
            Cow::Owned(inner) => Cow::Owned(build(inner)),
        })
    }

    /// Rewrites the free variables of an aggregate.
    fn rewrite_aggregate<'e>(
        &mut self,
        aggregate: &'e AggregateExpression,
    ) -> Result<Cow<'e, AggregateExpression>, RewriteError> {
        match aggregate {
            AggregateExpression::CountSolutions { .. } => Ok(Cow::Borrowed(aggregate)),
            AggregateExpression::FunctionCall {
                name,
                expr,
                distinct,
            } => Ok(match self.rewrite_expression(expr)? {
                Cow::Borrowed(_) => Cow::Borrowed(aggregate),
                Cow::Owned(expr) => Cow::Owned(AggregateExpression::FunctionCall {
                    name: name.clone(),
                    expr,
                    distinct: *distinct,
                }),
            }),
        }
    }
}

/// Applies `f` to every item of `items`.
///
/// Returns [None] if `f` borrowed every item. Otherwise, returns the new items; only the
/// unchanged items are cloned.
pub(crate) fn rewrite_slice<'a, T: Clone, E>(
    items: &'a [T],
    mut f: impl FnMut(&'a T) -> Result<Cow<'a, T>, E>,
) -> Result<Option<Vec<T>>, E> {
    let mut result: Option<Vec<T>> = None;
    for (i, item) in items.iter().enumerate() {
        match f(item)? {
            Cow::Borrowed(_) => {
                if let Some(result) = &mut result {
                    result.push(item.clone());
                }
            }
            Cow::Owned(new_item) => result
                .get_or_insert_with(|| items[..i].to_vec())
                .push(new_item),
        }
    }
    Ok(result)
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Rebuilds `original` if one of its rewritten components is owned.
fn rebuild_pair<'a, A: Clone, B: Clone>(
    original: &'a (A, B),
    first: Cow<'a, A>,
    second: Cow<'a, B>,
) -> Cow<'a, (A, B)> {
    match (first, second) {
        (Cow::Borrowed(_), Cow::Borrowed(_)) => Cow::Borrowed(original),
        (first, second) => Cow::Owned((first.into_owned(), second.into_owned())),
    }
}
