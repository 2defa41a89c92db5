//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

/// A `true` expression. Used as the predicate of an unfiltered `WHERE`.
pub const TRUE_EXPR: Expression = Expression::Value(Value::Bool(true));

/// A `false` expression.
pub const FALSE_EXPR: Expression = Expression::Value(Value::Bool(false));

/// An empty `WHERE` clause.
pub fn empty_where() -> Where {
    Where(TRUE_EXPR)
}

/// A reference to a table in the default schema.
pub fn table_reference(name: &str) -> TableReference {
    TableReference::DBTable {
        schema: None,
        table: TableName(name.to_string()),
    }
}

/// An unqualified column reference.
pub fn column(name: &str) -> Expression {
    Expression::ColumnReference(ColumnReference::Column(ColumnName(name.to_string())))
}

/// `left = right`
pub fn equals(left: Expression, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator: BinaryOperator::Equals,
        right: Box::new(right),
    }
}

/// Combine two predicates with `AND`, dropping trivially true sides.
pub fn and(left: Expression, right: Expression) -> Expression {
    if left == TRUE_EXPR {
        right
    } else if right == TRUE_EXPR {
        left
    } else {
        Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Build a simple select * with no filter.
pub fn star_select(from: From) -> Select {
    Select {
        select_list: SelectList::SelectStar,
        from: Some(from),
        where_: empty_where(),
    }
}
