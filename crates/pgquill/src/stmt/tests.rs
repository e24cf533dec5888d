use super::*;
use crate::executor::from_fn;
use crate::expr::{ExpressionExt, count_all};
use crate::record;
use crate::table::ColumnDef;

fn db() -> Database {
    Database::new(from_fn(|_, _| async { Ok(QueryResult::default()) }))
}

fn foo() -> Table {
    Table::define("foo")
        .column(ColumnDef::uuid("id").primary_key().default("gen_random_uuid()"))
        .column(ColumnDef::timestamp_tz("createDate").not_null().default("now()"))
        .column(ColumnDef::text("name").not_null())
        .column(ColumnDef::integer("value"))
}

fn bar() -> Table {
    Table::define("bar")
        .column(ColumnDef::uuid("id"))
        .column(ColumnDef::uuid("fooId"))
}

#[test]
fn select_from_lists_every_column() {
    let foo = foo();
    let q = db().select_from(&foo);
    assert_eq!(
        q.to_sql(),
        "SELECT foo.id, foo.create_date \"createDate\", foo.name, foo.value FROM foo"
    );
    assert_eq!(q.returning_keys(), ["id", "createDate", "name", "value"]);
}

#[test]
fn select_from_without_columns_selects_star() {
    let q = db().select_from(&Table::define("events"));
    assert_eq!(q.to_sql(), "SELECT * FROM events");
    assert!(q.returning_keys().is_empty());
}

#[test]
fn where_splices_the_condition() {
    let foo = foo();
    let q = db()
        .select(&[&foo.col("id")])
        .from(&foo)
        .r#where(&foo.col("value").gt(1).and(&foo.col("name").eq("a")));
    let sq = q.serialize();
    assert_eq!(sq.text, "SELECT foo.id FROM foo WHERE (foo.value > $1 AND foo.name = $2)");
    assert_eq!(sq.parameters, vec![Value::Int(1), Value::Text("a".into())]);
}

#[test]
fn group_by_having_order_by_wrap_each_expression() {
    let foo = foo();
    let name = foo.col("name");
    let q = db()
        .select(&[&name, &count_all().as_("total")])
        .from(&foo)
        .group_by(&[&name])
        .having(&[&foo.col("value").sum().gt(10)])
        .order_by(&[&name.asc(), &foo.col("value").max().desc().nulls_last()]);

    let sq = q.serialize();
    assert_eq!(
        sq.text,
        "SELECT foo.name, COUNT(*) \"total\" FROM foo GROUP BY foo.name \
         HAVING SUM (foo.value) > $1 ORDER BY foo.name ASC, MAX (foo.value) DESC NULLS LAST"
    );
    assert_eq!(sq.parameters, vec![Value::Int(10)]);
    assert_eq!(q.returning_keys(), ["name", "total"]);
}

#[test]
fn joins_render_table_references() {
    let foo = foo();
    let bar = bar();
    let f = foo.as_("f");
    let base = db().select(&[&f.col("id")]).from(&f);

    assert_eq!(
        base.left_join(&bar).on(&bar.col("fooId").eq_expr(&f.col("id"))).to_sql(),
        "SELECT f.id FROM foo \"f\" LEFT JOIN bar ON (bar.foo_id = f.id)"
    );
    assert_eq!(
        base.inner_join(&bar).using(&[&bar.col("id")]).to_sql(),
        "SELECT f.id FROM foo \"f\" INNER JOIN bar USING (id)"
    );
    assert_eq!(
        base.cross_join(&bar).to_sql(),
        "SELECT f.id FROM foo \"f\" CROSS JOIN bar"
    );
    assert_eq!(base.join(&bar).to_sql(), "SELECT f.id FROM foo \"f\" JOIN bar");
    assert_eq!(
        base.left_outer_join(&bar).to_sql(),
        "SELECT f.id FROM foo \"f\" LEFT OUTER JOIN bar"
    );
    assert_eq!(base.right_join(&bar).to_sql(), "SELECT f.id FROM foo \"f\" RIGHT JOIN bar");
    assert_eq!(
        base.right_outer_join(&bar).to_sql(),
        "SELECT f.id FROM foo \"f\" RIGHT OUTER JOIN bar"
    );
    assert_eq!(base.full_join(&bar).to_sql(), "SELECT f.id FROM foo \"f\" FULL JOIN bar");
    assert_eq!(
        base.full_outer_join(&bar).to_sql(),
        "SELECT f.id FROM foo \"f\" FULL OUTER JOIN bar"
    );
}

#[test]
fn paging_clauses_bind_parameters() {
    let foo = foo();
    let q = db()
        .select_from(&foo)
        .limit(Limit::Count(10))
        .offset(20)
        .fetch(5);
    let sq = q.serialize();
    assert!(sq.text.ends_with("FROM foo LIMIT $1 OFFSET $2 FETCH FIRST $3 ROWS ONLY"));
    assert_eq!(sq.parameters, vec![Value::Int(10), Value::Int(20), Value::Int(5)]);

    let all = db().select_from(&foo).limit(Limit::All);
    assert!(all.to_sql().ends_with("FROM foo LIMIT ALL"));
    assert!(all.serialize().parameters.is_empty());

    assert!(db().select_from(&foo).limit(3_i64).to_sql().ends_with("LIMIT $1"));
}

#[test]
fn locking_clauses_are_plain_literals() {
    let foo = foo();
    let base = db().select_from(&foo);
    assert!(base.for_update().of(&foo).nowait().to_sql().ends_with("FOR UPDATE OF foo NOWAIT"));
    assert!(
        base.for_no_key_update()
            .skip_locked()
            .to_sql()
            .ends_with("FOR NO KEY UPDATE SKIP LOCKED")
    );
    assert!(base.for_share().to_sql().ends_with("FOR SHARE"));
    assert!(base.for_key_share().to_sql().ends_with("FOR KEY SHARE"));
}

#[test]
fn branching_leaves_the_base_untouched() {
    let foo = foo();
    let base = db().select_from(&foo);
    let before = base.to_sql();

    let left = base.r#where(&foo.col("name").eq("a"));
    let right = base.order_by(&[&foo.col("name")]);

    assert_eq!(base.to_sql(), before);
    assert_eq!(left.to_sql(), format!("{before} WHERE foo.name = $1"));
    assert_eq!(right.to_sql(), format!("{before} ORDER BY foo.name"));
    assert!(left.tokens().extends(base.tokens()));
    assert!(right.tokens().extends(base.tokens()));
}

#[test]
fn subquery_in_select_list_is_grouped() {
    let foo = foo();
    let bar = bar();
    let latest = db()
        .select(&[&bar.col("id")])
        .from(&bar)
        .r#where(&bar.col("fooId").eq_expr(&foo.col("id")))
        .limit(Limit::Count(1));
    let q = db().select(&[&foo.col("name"), &latest]).from(&foo);

    let sq = q.serialize();
    assert_eq!(
        sq.text,
        "SELECT foo.name, (SELECT bar.id FROM bar WHERE bar.foo_id = foo.id LIMIT $1) FROM foo"
    );
    assert_eq!(sq.parameters, vec![Value::Int(1)]);
    assert_eq!(q.returning_keys(), ["name", "id"]);
}

#[test]
fn values_fall_back_to_defaults_per_record() {
    let foo = foo();
    let q = db().insert_into(&foo).values(vec![
        record! { "name" => "a", "id" => Value::Null },
        record! { "name" => "b", "value" => 2 },
    ]);
    let sq = q.serialize();
    assert_eq!(
        sq.text,
        "INSERT INTO foo (id, name, value) VALUES ($1, $2, DEFAULT), (gen_random_uuid(), $3, $4)"
    );
    assert_eq!(
        sq.parameters,
        vec![Value::Null, Value::Text("a".into()), Value::Text("b".into()), Value::Int(2)]
    );
}

#[test]
fn values_accept_sql_names_and_follow_declaration_order() {
    let foo = foo();
    let now = chrono::Utc::now();
    let q = db()
        .insert_into(&foo)
        .values(record! { "value" => 1, "create_date" => now, "name" => "x" });
    assert_eq!(
        q.to_sql(),
        "INSERT INTO foo (create_date, name, value) VALUES ($1, $2, $3)"
    );
    assert_eq!(q.serialize().parameters[0], Value::Timestamp(now));
}

#[test]
fn values_with_explicit_columns_reuse_the_column_list() {
    let foo = foo();
    let q = db()
        .insert_into_columns(&foo, &["name", "createDate"])
        .values(record! { "name" => "x" });
    assert_eq!(
        q.to_sql(),
        "INSERT INTO foo (name, create_date) VALUES ($1, now())"
    );
}

#[test]
fn values_without_known_columns_become_default_values() {
    let foo = foo();
    let q = db().insert_into(&foo).values(record! { "nope" => 1 });
    assert_eq!(q.to_sql(), "INSERT INTO foo DEFAULT VALUES");
    assert!(q.serialize().parameters.is_empty());
}

#[test]
fn default_values_suppresses_later_values() {
    let foo = foo();
    let q = db()
        .insert_into(&foo)
        .default_values()
        .values(record! { "name" => "Test" })
        .on_conflict()
        .do_nothing();
    assert_eq!(q.to_sql(), "INSERT INTO foo DEFAULT VALUES ON CONFLICT DO NOTHING");
    assert!(q.serialize().parameters.is_empty());
}

#[test]
fn conflict_targets_use_sql_names() {
    let foo = foo();
    let q = db()
        .insert_into(&foo)
        .values(record! { "name" => "a" })
        .on_conflict_columns(&["id", "createDate"])
        .do_update_set(record! { "value" => 1, "name" => "b" });
    assert_eq!(
        q.to_sql(),
        "INSERT INTO foo (name) VALUES ($1) ON CONFLICT (id, create_date) DO UPDATE SET name = $2, value = $3"
    );
}

#[test]
fn insert_into_alias_uses_as() {
    let foo = foo();
    let q = db().insert_into(&foo.as_("f")).default_values();
    assert_eq!(q.to_sql(), "INSERT INTO foo AS f DEFAULT VALUES");
}

#[test]
fn returning_switches_keys() {
    let foo = foo();
    let q = db()
        .insert_into(&foo)
        .values(record! { "name" => "a" })
        .returning(&["id", "createDate"]);
    assert_eq!(
        q.to_sql(),
        "INSERT INTO foo (name) VALUES ($1) RETURNING id, create_date \"createDate\""
    );
    assert_eq!(q.returning_keys(), ["id", "createDate"]);
}

#[test]
fn standalone_update_and_delete() {
    let foo = foo();
    let update = db()
        .update(&foo)
        .set(record! { "value" => 5, "name" => "n" })
        .r#where(&foo.col("id").eq(uuid::Uuid::nil()))
        .returning(&["id"]);
    let sq = update.serialize();
    assert_eq!(
        sq.text,
        "UPDATE foo SET name = $1, value = $2 WHERE foo.id = $3 RETURNING id"
    );
    assert_eq!(sq.parameters[2], Value::Uuid(uuid::Uuid::nil()));

    let delete = db().delete_from(&foo).r#where(&foo.col("value").is_null());
    assert_eq!(delete.to_sql(), "DELETE FROM foo WHERE foo.value IS NULL");
}

#[test]
fn reserved_names_are_quoted_everywhere() {
    let user = Table::define("user")
        .column(ColumnDef::text("order"))
        .column(ColumnDef::text("name"));
    let q = db()
        .insert_into(&user)
        .values(record! { "order" => "a" })
        .returning(&["order"]);
    assert_eq!(
        q.to_sql(),
        "INSERT INTO \"user\" (\"order\") VALUES ($1) RETURNING \"order\""
    );
    assert_eq!(
        db().select_from(&user).to_sql(),
        "SELECT \"user\".\"order\", \"user\".name FROM \"user\""
    );
}

#[test]
fn rows_shape_projects_to_declared_keys() {
    let result = QueryResult::rows(vec![Row::new().with("b", 2).with("a", 1).with("x", 0)]);
    let rows = Rows::shape(result, &["a".to_string(), "b".to_string(), "c".to_string()]);
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(rows[0].get("c"), Some(&Value::Null));

    let affected = AffectedRows::shape(QueryResult::affected(3), &[]);
    assert_eq!(affected, Affected { affected_count: 3 });
}
