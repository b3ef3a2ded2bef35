//! Tests for the statement builders.

use crate::args::Args;
use crate::clause::Assignments;
use crate::fragment::{Fragment, raw, sql};
use crate::stmt::{
    Built, SqlStatement, build, build_with, delete, from, insert, select, update, values, where_,
};
use crate::value::Value;

fn parts(built: Built) -> (String, Vec<Value>) {
    built.into_parts()
}

#[test]
fn test_select_basic() {
    let built = select("a, b, c").build().unwrap();
    assert_eq!(built.sql, "select a, b, c");
    assert!(built.params.is_empty());
}

#[test]
fn test_from_selects_star() {
    assert_eq!(from("people").to_sql().unwrap(), "select * from people");
}

#[test]
fn test_select_multiple_expressions() {
    assert_eq!(select("a").select("b").to_sql().unwrap(), "select a, b");
}

#[test]
fn test_select_distinct() {
    let stmt = select("a, b, c").distinct();
    assert_eq!(stmt.to_sql().unwrap(), "select distinct a, b, c");

    let stmt = select("a, b, c").distinct_on("a");
    assert_eq!(stmt.to_sql().unwrap(), "select distinct on (a) a, b, c");

    let stmt = stmt.distinct_on("b");
    assert_eq!(stmt.to_sql().unwrap(), "select distinct on (a, b) a, b, c");
}

#[test]
fn test_select_where() {
    let stmt = select("a, b, c").from("t").where_("foo=?", [42]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        ("select a, b, c from t where (foo=$1)".into(), vec![Value::Int(42)])
    );
}

#[test]
fn test_select_or_where() {
    let stmt = from("t")
        .where_("a = ?", [1])
        .where_("b = ?", [2])
        .or_where("c = ?", [1]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "select * from t where ((a = $1) and (b = $2) or c = $1)".into(),
            vec![Value::Int(1), Value::Int(2)]
        )
    );
}

#[test]
fn test_select_where_expr() {
    let cond = sql("a = ?", [1]).or(sql("b = ?", [2]));
    let stmt = from("t").where_expr(cond).where_("c", ());
    assert_eq!(
        stmt.to_sql().unwrap(),
        "select * from t where (a = $1 or b = $2) and (c)"
    );
}

#[test]
fn test_select_order_limit_offset() {
    let stmt = select("a, b, c").from("t").order_by("c desc").limit(5);
    assert_eq!(
        stmt.to_sql().unwrap(),
        "select a, b, c from t order by c desc limit 5"
    );

    let stmt = stmt.offset(10);
    assert_eq!(
        stmt.to_sql().unwrap(),
        "select a, b, c from t order by c desc limit 5 offset 10"
    );

    let stmt = stmt.limit_expr(sql("?", [20])).offset_expr(sql("?", [20]));
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "select a, b, c from t order by c desc limit $1 offset $1".into(),
            vec![Value::Int(20)]
        )
    );
}

#[test]
fn test_predicate_carrier() {
    let carrier = where_("deleted_at is null", ());
    assert_eq!(carrier.to_sql().unwrap(), "where (deleted_at is null)");
}

#[test]
fn test_select_apply() {
    let base = from("people").where_("age > ?", [18]);
    let scope = where_("org_id = ?", [7]).limit(10);
    let paged = from("people_view").offset(20);

    let stmt = base.apply([&scope, &paged]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "select * from people_view where (age > $1) and (org_id = $2) limit 10 offset 20"
                .into(),
            vec![Value::Int(18), Value::Int(7)]
        )
    );
}

#[test]
fn test_select_merge() {
    let a = select("id").from("people").where_("a = ?", [1]).order_by("id");
    let b = select("name").distinct().where_("b = ?", [2]).order_by("name");

    let merged = a.merge([&b]);
    assert_eq!(
        merged.to_sql().unwrap(),
        "select distinct id, name from people where (a = $1) and (b = $2) order by id, name"
    );
}

#[test]
fn test_insert_values() {
    let stmt = insert("people")
        .columns(["name", "age"])
        .values(values().row(("Alice", 30)).row(("Bob", 30)))
        .returning("id");
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "insert into people (name, age) values ($1,$2), ($3,$2) returning id".into(),
            vec![Value::from("Alice"), Value::Int(30), Value::from("Bob")]
        )
    );
}

#[test]
fn test_insert_without_source() {
    assert_eq!(insert("people").to_sql().unwrap(), "insert into people");
}

#[test]
fn test_insert_query() {
    let stmt = insert("archive")
        .columns(vec!["id".to_string(), "name".to_string()])
        .query(select("id, name").from("people").where_("age > ?", [99]));
    assert_eq!(
        stmt.to_sql().unwrap(),
        "insert into archive (id, name) select id, name from people where (age > $1)"
    );
}

#[test]
fn test_insert_merge() {
    let a = insert("people").columns(["a"]).returning("id");
    let b = insert("ignored")
        .values(values().row([1]))
        .returning("created_at");

    let merged = a.merge([&b]);
    assert_eq!(
        merged.to_sql().unwrap(),
        "insert into people (a) values ($1) returning id, created_at"
    );
}

#[test]
fn test_update_set() {
    let data = Assignments::new()
        .set("name", "Alice")
        .set("updated_at", raw("now()"));
    let stmt = update("people").set(&data).where_("id=?", [42]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "update people set name = $1, updated_at = now() where (id=$2)".into(),
            vec![Value::from("Alice"), Value::Int(42)]
        )
    );
}

#[test]
fn test_update_set_sql_replaces_assignments() {
    let data = Assignments::new().set("name", "Alice");
    let stmt = update("counters")
        .set(&data)
        .set_sql("hits = hits + ?", [1])
        .where_("id = ?", [1]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "update counters set hits = hits + $1 where (id = $1)".into(),
            vec![Value::Int(1)]
        )
    );

    let stmt = stmt.set(&data);
    assert_eq!(
        stmt.to_sql().unwrap(),
        "update counters set name = $1 where (id = $2)"
    );
}

#[test]
fn test_update_apply_and_merge() {
    let stmt = update("people")
        .set_sql("active = false", ())
        .apply([&where_("age > ?", [90])]);
    let other = update("people")
        .where_("name = ?", ["x"])
        .returning("id");

    let merged = stmt.merge([&other]);
    assert_eq!(
        merged.to_sql().unwrap(),
        "update people set active = false where (age > $1) and (name = $2) returning id"
    );
}

#[test]
fn test_delete_apply() {
    let stmt = delete("people").where_("foo=?", [43]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        ("delete from people where (foo=$1)".into(), vec![Value::Int(43)])
    );

    let stmt = stmt.apply([&where_("bar=?", [7])]);
    assert_eq!(
        parts(stmt.build().unwrap()),
        (
            "delete from people where (foo=$1) and (bar=$2)".into(),
            vec![Value::Int(43), Value::Int(7)]
        )
    );
}

#[test]
fn test_delete_merge_and_returning() {
    let a = delete("people").where_("a = ?", [1]).returning("id");
    let b = delete("people").or_where("b = ?", [2]).returning("name");

    assert_eq!(
        a.merge([&b]).to_sql().unwrap(),
        "delete from people where (a = $1) and (b = $2) returning id, name"
    );
}

#[test]
fn test_delete_all_rows() {
    assert_eq!(delete("people").to_sql().unwrap(), "delete from people");
}

#[test]
fn test_values_statement() {
    let v = values().row(("a", "b"));
    assert_eq!(
        parts(v.build().unwrap()),
        (
            "values ($1,$2)".into(),
            vec![Value::from("a"), Value::from("b")]
        )
    );

    let v = v.row(("c", "d"));
    assert_eq!(v.len(), 2);
    assert_eq!(v.to_sql().unwrap(), "values ($1,$2), ($3,$4)");

    assert_eq!(values().to_sql().unwrap(), "");
}

#[test]
fn test_clone_diverges() {
    let base = delete("people").where_("a = ?", [1]);
    let first = base.clone().where_("b = ?", [2]);
    let second = base.clone().where_("c = ?", ["x"]);

    assert_eq!(base.to_sql().unwrap(), "delete from people where (a = $1)");
    assert_eq!(
        parts(first.build().unwrap()),
        (
            "delete from people where (a = $1) and (b = $2)".into(),
            vec![Value::Int(1), Value::Int(2)]
        )
    );
    assert_eq!(
        parts(second.build().unwrap()),
        (
            "delete from people where (a = $1) and (c = $2)".into(),
            vec![Value::Int(1), Value::from("x")]
        )
    );
}

#[test]
fn test_build_is_repeatable() {
    let stmt = select("*")
        .from("people")
        .where_("name = ? or nick = ?", ("a", "a"))
        .where_("blob = ? or blob = ?", (vec![1u8], vec![1u8]));
    let first = build(&stmt).unwrap();
    let second = build(&stmt).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.params.len(), 3);
}

#[test]
fn test_build_with_shared_args() {
    let mut args = Args::new();
    args.intern(7);

    let stmt = delete("people").where_("id = ? or id = ?", (7, 8));
    let sql = build_with(&stmt, &mut args).unwrap();
    assert_eq!(sql, "delete from people where (id = $1 or id = $2)");
    assert_eq!(args.values(), &[Value::Int(7), Value::Int(8)]);
}

#[test]
fn test_missing_argument_propagates() {
    let err = update("people")
        .set_sql("name = ?, age = ?", ["x"])
        .build()
        .unwrap_err();
    assert!(err.is_missing_argument());
}

#[test]
fn test_params_ref() {
    let built = from("people").where_("id = ?", [1]).build().unwrap();
    assert_eq!(built.params_ref().len(), 1);
}

fn no_filters() -> Fragment {
    Fragment::list(Vec::<Fragment>::new(), " or ", false)
}

#[test]
fn test_empty_list_fragments_drop_out() {
    assert_eq!(
        delete("t").where_expr(no_filters()).to_sql().unwrap(),
        "delete from t"
    );
    assert_eq!(
        from("t").where_expr(no_filters()).to_sql().unwrap(),
        "select * from t"
    );
    assert_eq!(
        delete("t").returning(no_filters()).to_sql().unwrap(),
        "delete from t"
    );
    assert_eq!(select(no_filters()).from("t").to_sql().unwrap(), "select * from t");
    assert_eq!(
        select("a").select(no_filters()).select("b").from("t").to_sql().unwrap(),
        "select a, b from t"
    );
    assert_eq!(
        from("t")
            .where_("a = ?", [1])
            .where_expr(no_filters())
            .where_("b = ?", [2])
            .to_sql()
            .unwrap(),
        "select * from t where (a = $1) and (b = $2)"
    );
    assert_eq!(
        from("t")
            .order_by(no_filters())
            .limit_expr(no_filters())
            .offset_expr(no_filters())
            .to_sql()
            .unwrap(),
        "select * from t"
    );
    assert_eq!(
        update("t").set(&Assignments::new()).to_sql().unwrap(),
        "update t"
    );
}

#[test]
fn test_empty_list_fragments_in_or_and_merge() {
    let stmt = from("t")
        .where_expr(no_filters())
        .or_where("a = ?", [1])
        .or_where("b = ?", [2]);
    assert_eq!(stmt.to_sql().unwrap(), "select * from t where (a = $1 or b = $2)");

    let stmt = delete("t").where_("a = ?", [1]).where_expr(no_filters());
    let stmt = stmt.or_where("b", ());
    assert_eq!(stmt.to_sql().unwrap(), "delete from t where (a = $1 or b)");

    let base = from("t").limit(5);
    let merged = base.apply([&from("ignored").limit_expr(no_filters())]);
    assert_eq!(merged.to_sql().unwrap(), "select * from ignored limit 5");
}

#[test]
fn test_template_without_arguments_is_not_checked() {
    let stmt = delete("t").where_("a = ?", ());
    assert_eq!(stmt.to_sql().unwrap(), "delete from t where (a = ?)");

    let err = delete("t").where_("a = ? and b = ?", [1]).build().unwrap_err();
    assert!(err.is_missing_argument());
}
