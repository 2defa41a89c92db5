use query_engine_sql::sql::{ast, helpers, string};
use similar_asserts::assert_eq;

fn foo() -> ast::From {
    ast::From::Table {
        reference: helpers::table_reference("foo"),
        alias: None,
    }
}

#[test]
fn it_converts_star_select() {
    let select = helpers::star_select(foo());
    assert_eq!(
        select.to_query(),
        string::Query::raw("SELECT * FROM foo WHERE TRUE")
    );
}

#[test]
fn it_converts_filtered_select() {
    let mut select = helpers::star_select(foo());
    select.where_ = ast::Where(helpers::equals(
        helpers::column("id"),
        ast::Expression::Value(ast::Value::Int8(32)),
    ));
    let query = select.to_query();

    insta::assert_snapshot!(query.text(), @"SELECT * FROM foo WHERE id = $1");
    assert_eq!(query.values().to_vec(), vec![string::Param::Int8(32)]);
}

#[test]
fn it_numbers_nested_params_in_order() {
    let mut select = helpers::star_select(foo());
    select.where_ = ast::Where(ast::Expression::Or {
        left: Box::new(helpers::and(
            helpers::equals(
                helpers::column("id"),
                ast::Expression::Value(ast::Value::Int8(1)),
            ),
            helpers::equals(
                helpers::column("name"),
                ast::Expression::Value(ast::Value::String("x".to_string())),
            ),
        )),
        right: Box::new(ast::Expression::Not(Box::new(helpers::equals(
            helpers::column("id"),
            ast::Expression::Value(ast::Value::Int8(2)),
        )))),
    });
    let query = select.to_query();

    insta::assert_snapshot!(
        query.text(),
        @"SELECT * FROM foo WHERE ((id = $1 AND name = $2) OR NOT id = $3)"
    );
    assert_eq!(
        query.values().to_vec(),
        vec![
            string::Param::Int8(1),
            string::Param::String("x".to_string()),
            string::Param::Int8(2),
        ]
    );
}

#[test]
fn it_quotes_identifiers_that_need_it() {
    let select = ast::Select {
        select_list: ast::SelectList::SelectList(vec![(
            ast::ColumnAlias {
                name: "Display Name".to_string(),
            },
            ast::Expression::ColumnReference(ast::ColumnReference::TableColumn {
                table: ast::TableReference::AliasedTable(ast::TableAlias {
                    name: "t".to_string(),
                }),
                name: ast::ColumnName("na\"me".to_string()),
            }),
        )]),
        from: Some(ast::From::Table {
            reference: ast::TableReference::DBTable {
                schema: Some(ast::SchemaName("Public".to_string())),
                table: ast::TableName("foo".to_string()),
            },
            alias: Some(ast::TableAlias {
                name: "t".to_string(),
            }),
        }),
        where_: helpers::empty_where(),
    };

    assert_eq!(
        select.to_query().text(),
        r#"SELECT t."na""me" AS "Display Name" FROM "Public".foo AS t WHERE TRUE"#
    );
}

#[test]
fn it_drops_trivially_true_conjuncts() {
    let predicate = helpers::equals(
        helpers::column("id"),
        ast::Expression::Value(ast::Value::Int8(7)),
    );
    assert_eq!(
        helpers::and(helpers::TRUE_EXPR, predicate.clone()),
        predicate
    );
    assert_eq!(
        helpers::and(predicate.clone(), helpers::TRUE_EXPR),
        predicate
    );
}

#[test]
fn it_inlines_booleans_and_nulls() {
    let mut sql = string::SQL::new();
    helpers::FALSE_EXPR.to_sql(&mut sql);
    sql.append_syntax(" OR ");
    ast::Expression::Value(ast::Value::Null).to_sql(&mut sql);
    assert_eq!(sql.sql, "FALSE OR NULL");
    assert!(sql.params.is_empty());
    assert_eq!(sql.param_index, 0);
}

#[test]
fn it_renders_subselects() {
    let select = helpers::star_select(ast::From::Select {
        select: Box::new(helpers::star_select(foo())),
        alias: ast::TableAlias {
            name: "rows".to_string(),
        },
    });
    assert_eq!(
        select.to_query().text(),
        "SELECT * FROM (SELECT * FROM foo WHERE TRUE) AS rows WHERE TRUE"
    );
}
