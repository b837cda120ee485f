//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for formula expressions.
//! CONTEXT: After the Lexer tokenizes a formula string, the grammar converts
//! those tokens into this tree structure. The Evaluator then traverses
//! this tree to compute the final result.
//!
//! SUPPORTED EXPRESSIONS:
//! - Integer literals: 3, 120
//! - Cell references: A0, A12
//! - Binary operations: +, -, *, /
//! - Ranges: A0:A2 (a binary operation with the `:` operator)
//! - Function calls with a single range argument: SUM(A0:A2)

use crate::token::Operator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a parsed formula expression.
/// Every node owns its children, so a tree is acyclic and immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expression {
    Number(i64),

    /// A single cell reference like A0. Rows count from zero.
    Reference { column: String, row: usize },

    /// `left op right`. A range `A0:A2` is a binary expression whose
    /// operator is `Operator::Range`.
    BinaryExpression {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// A function call like SUM(A0:A2).
    FunctionCall {
        name: String,
        argument: Box<Expression>,
    },
}

impl Expression {
    pub fn reference(column: impl Into<String>, row: usize) -> Self {
        Expression::Reference {
            column: column.into(),
            row,
        }
    }

    pub fn binary(op: Operator, left: Expression, right: Expression) -> Self {
        Expression::BinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `start:end`.
    pub fn range(start: Expression, end: Expression) -> Self {
        Expression::binary(Operator::Range, start, end)
    }

    pub fn call(name: impl Into<String>, argument: Expression) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            argument: Box::new(argument),
        }
    }

    /// Diagnostic rendering: the node kind followed by its formula text.
    pub fn describe(&self) -> String {
        match self {
            Expression::Number(_) => format!("Number: {}", self),
            Expression::Reference { .. } => format!("Reference: {}", self),
            Expression::BinaryExpression { .. } => format!("Binary Expression: {}", self),
            Expression::FunctionCall { .. } => format!("Function: {}", self),
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, Expression::Number(_) | Expression::Reference { .. })
    }

    /// Moves every non-leaf child into `pending`, leaving leaves behind.
    fn take_children(&mut self, pending: &mut Vec<Expression>) {
        let mut take = |child: &mut Box<Expression>| {
            if !child.is_leaf() {
                pending.push(std::mem::replace(child.as_mut(), Expression::Number(0)));
            }
        };
        match self {
            Expression::BinaryExpression { left, right, .. } => {
                take(left);
                take(right);
            }
            Expression::FunctionCall { argument, .. } => take(argument),
            Expression::Number(_) | Expression::Reference { .. } => {}
        }
    }

    fn precedence(&self) -> Option<u8> {
        match self {
            Expression::BinaryExpression { op, .. } => Some(op.precedence()),
            _ => None,
        }
    }

    /// Writes `operand` as a child of an operator with precedence `parent`,
    /// adding parentheses where the tree would otherwise re-parse differently.
    /// A right operand at equal precedence needs them since operators
    /// associate to the left.
    fn write_operand(
        f: &mut fmt::Formatter<'_>,
        operand: &Expression,
        parent: u8,
        is_right: bool,
    ) -> fmt::Result {
        let needs_parens = match operand.precedence() {
            Some(child) if is_right => child <= parent,
            Some(child) => child < parent,
            None => false,
        };
        if needs_parens {
            write!(f, "({})", operand)
        } else {
            write!(f, "{}", operand)
        }
    }
}

/// Renders formula text. Trees the grammar produces parse back to the same
/// tree. Hand-built trees may not: there is no unary minus for a negative
/// `Number`, and a function argument other than a range has no formula form.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Reference { column, row } => write!(f, "{}{}", column, row),
            Expression::BinaryExpression {
                op: Operator::Range,
                left,
                right,
            } => write!(f, "{}:{}", left, right),
            Expression::BinaryExpression { op, left, right } => {
                let precedence = op.precedence();
                Expression::write_operand(f, left, precedence, false)?;
                write!(f, " {} ", op)?;
                Expression::write_operand(f, right, precedence, true)
            }
            Expression::FunctionCall { name, argument } => write!(f, "{}({})", name, argument),
        }
    }
}

/// Left-folded chains are as deep as they are long, so nodes are torn down
/// from a worklist instead of recursively.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}
