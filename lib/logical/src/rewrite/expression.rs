use crate::error::RewriteError;
use crate::rewrite::rewrite_slice;
use crate::transform::{NodeTransform, VariableRenamer};
use quadview_model::{TermPatternRef, Variable};
use spargebra::algebra::Expression;
use std::borrow::Cow;

type BinaryConstructor = fn(Box<Expression>, Box<Expression>) -> Expression;
type UnaryConstructor = fn(Box<Expression>) -> Expression;

/// Applies `transform` to every term of `expression`.
///
/// Returns [Cow::Borrowed] if nothing changed.
pub fn rewrite_expression<'e, T: NodeTransform + ?Sized>(
    expression: &'e Expression,
    transform: &mut T,
) -> Result<Cow<'e, Expression>, RewriteError> {
    ExpressionRewriter::new(transform).rewrite(expression)
}

/// Renames all variables in `expression` except `protected` to fresh variables.
pub fn rename_expression(
    expression: &Expression,
    protected: impl IntoIterator<Item = Variable>,
) -> Result<Expression, RewriteError> {
    let mut renamer = VariableRenamer::new(protected);
    Ok(rewrite_expression(expression, &mut renamer)?.into_owned())
}

/// Rewrites the terms of an expression tree.
///
/// `EXISTS` and `NOT EXISTS` contain graph patterns and are not supported.
pub struct ExpressionRewriter<'t, T: ?Sized> {
    transform: &'t mut T,
}

impl<'t, T: NodeTransform + ?Sized> ExpressionRewriter<'t, T> {
    pub fn new(transform: &'t mut T) -> Self {
        Self { transform }
    }

    pub fn rewrite<'e>(
        &mut self,
        expression: &'e Expression,
    ) -> Result<Cow<'e, Expression>, RewriteError> {
        match expression {
            Expression::NamedNode(nn) => Ok(self.substitute(expression, nn.into())),
            Expression::Literal(literal) => Ok(self.substitute(expression, literal.into())),
            Expression::Variable(variable) => {
                Ok(self.substitute(expression, variable.into()))
            }
            Expression::Bound(variable) => {
                Ok(match self.transform.transform_variable(variable) {
                    Cow::Borrowed(_) => Cow::Borrowed(expression),
                    Cow::Owned(variable) => Cow::Owned(Expression::Bound(variable)),
                })
            }
            Expression::Or(lhs, rhs) => self.rewrite_binary(expression, lhs, rhs, Expression::Or),
            Expression::And(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::And)
            }
            Expression::Equal(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::Equal)
            }
            Expression::SameTerm(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::SameTerm)
            }
            Expression::Greater(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::Greater)
            }
            Expression::GreaterOrEqual(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::GreaterOrEqual)
            }
            Expression::Less(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::Less)
            }
            Expression::LessOrEqual(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::LessOrEqual)
            }
            Expression::Add(lhs, rhs) => self.rewrite_binary(expression, lhs, rhs, Expression::Add),
            Expression::Subtract(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::Subtract)
            }
            Expression::Multiply(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::Multiply)
            }
            Expression::Divide(lhs, rhs) => {
                self.rewrite_binary(expression, lhs, rhs, Expression::Divide)
            }
            Expression::UnaryPlus(inner) => {
                self.rewrite_unary(expression, inner, Expression::UnaryPlus)
            }
            Expression::UnaryMinus(inner) => {
                self.rewrite_unary(expression, inner, Expression::UnaryMinus)
            }
            Expression::Not(inner) => self.rewrite_unary(expression, inner, Expression::Not),
            Expression::In(lhs, list) => {
                let new_lhs = self.rewrite(lhs)?;
                let new_list = self.rewrite_list(list)?;
                if matches!(new_lhs, Cow::Borrowed(_)) && new_list.is_none() {
                    return Ok(Cow::Borrowed(expression));
                }
                Ok(Cow::Owned(Expression::In(
                    Box::new(new_lhs.into_owned()),
                    new_list.unwrap_or_else(|| list.clone()),
                )))
            }
            Expression::If(test, if_true, if_false) => {
                let new_test = self.rewrite(test)?;
                let new_if_true = self.rewrite(if_true)?;
                let new_if_false = self.rewrite(if_false)?;
                match (new_test, new_if_true, new_if_false) {
                    (Cow::Borrowed(_), Cow::Borrowed(_), Cow::Borrowed(_)) => {
                        Ok(Cow::Borrowed(expression))
                    }
                    (test, if_true, if_false) => Ok(Cow::Owned(Expression::If(
                        Box::new(test.into_owned()),
                        Box::new(if_true.into_owned()),
                        Box::new(if_false.into_owned()),
                    ))),
                }
            }
            Expression::Coalesce(args) => Ok(match self.rewrite_list(args)? {
                None => Cow::Borrowed(expression),
                Some(args) => Cow::Owned(Expression::Coalesce(args)),
            }),
            Expression::FunctionCall(function, args) => Ok(match self.rewrite_list(args)? {
                None => Cow::Borrowed(expression),
                Some(args) => Cow::Owned(Expression::FunctionCall(function.clone(), args)),
            }),
            Expression::Exists(_) => Err(RewriteError::UnsupportedExpression("EXISTS")),
        }
    }

    /// Replaces a constant or variable if the transform maps it.
    fn substitute<'e>(
        &mut self,
        expression: &'e Expression,
        term: TermPatternRef<'_>,
    ) -> Cow<'e, Expression> {
        match self.transform.substitute(term) {
            Some(variable) => Cow::Owned(Expression::Variable(variable)),
            None => Cow::Borrowed(expression),
        }
    }

    fn rewrite_unary<'e>(
        &mut self,
        expression: &'e Expression,
        inner: &'e Expression,
        build: UnaryConstructor,
    ) -> Result<Cow<'e, Expression>, RewriteError> {
        Ok(match self.rewrite(inner)? {
            Cow::Borrowed(_) => Cow::Borrowed(expression),
            Cow::Owned(inner) => Cow::Owned(build(Box::new(inner))),
        })
    }

    fn rewrite_binary<'e>(
        &mut self,
        expression: &'e Expression,
        lhs: &'e Expression,
        rhs: &'e Expression,
        build: BinaryConstructor,
    ) -> Result<Cow<'e, Expression>, RewriteError> {
        let new_lhs = self.rewrite(lhs)?;
        let new_rhs = self.rewrite(rhs)?;
        Ok(match (new_lhs, new_rhs) {
            (Cow::Borrowed(_), Cow::Borrowed(_)) => Cow::Borrowed(expression),
            (lhs, rhs) => Cow::Owned(build(
                Box::new(lhs.into_owned()),
                Box::new(rhs.into_owned()),
            )),
        })
    }

    /// Returns [None] if no expression in `list` changed.
    fn rewrite_list(
        &mut self,
        list: &[Expression],
    ) -> Result<Option<Vec<Expression>>, RewriteError> {
        rewrite_slice(list, |expression| self.rewrite(expression))
    }
}
