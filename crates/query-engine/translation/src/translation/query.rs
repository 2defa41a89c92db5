//! Build the select statements used to look rows up by id.

use query_engine_sql::sql::{ast, helpers, string::Query};

/// The table `select_by_id` reads from.
pub const TABLE_NAME: &str = "foo";

/// The column `select_by_id` filters on.
pub const ID_COLUMN: &str = "id";

/// Select every column of `foo`, filtered to `id = $1` when an id is given.
///
/// Any id is a filter, including `0` and negative numbers. Without one the
/// predicate is `TRUE` and no values are bound.
pub fn select_by_id(id: Option<i64>) -> Query {
    select_from(TABLE_NAME, id)
}

/// Select every column of `table`, filtered by id when one is given.
pub fn select_from(table: &str, id: Option<i64>) -> Query {
    let mut select = helpers::star_select(ast::From::Table {
        reference: helpers::table_reference(table),
        alias: None,
    });
    select.where_ = ast::Where(id_predicate(id));
    select.to_query()
}

fn id_predicate(id: Option<i64>) -> ast::Expression {
    match id {
        Some(id) => helpers::equals(
            helpers::column(ID_COLUMN),
            ast::Expression::Value(ast::Value::Int8(id)),
        ),
        None => helpers::TRUE_EXPR,
    }
}
