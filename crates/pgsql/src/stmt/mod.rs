//! Statement builders.
//!
//! Every builder is a consuming fluent API: each call takes the statement by
//! value and returns it updated. Clauses hold immutable, `Arc`-shared
//! fragments, so cloning a statement is cheap and both copies can keep
//! growing independently. Parameters are numbered only when the statement is
//! built.
//!
//! # Usage
//!
//! ```ignore
//! use pgsql::{SqlStatement, delete, select, where_};
//!
//! let active = where_("deleted_at is null", ());
//!
//! let built = select("id, name")
//!     .from("people")
//!     .where_("age > ?", [18])
//!     .apply([&active])
//!     .order_by("name")
//!     .limit(20)
//!     .build()?;
//! // select id, name from people where (age > $1) and (deleted_at is null) order by name limit 20
//!
//! let built = delete("people").where_("id = ?", [42]).returning("id").build()?;
//! // delete from people where (id = $1) returning id
//! ```

mod delete;
mod insert;
mod select;
mod traits;
mod update;
mod values;

#[cfg(test)]
mod tests;

pub use delete::DeleteStatement;
pub use insert::{InsertStatement, Insertable};
pub use select::SelectStatement;
pub use traits::{Built, SqlStatement};
pub use update::{UpdateStatement, Updateable};
pub use values::ValuesStatement;

use crate::args::Args;
use crate::error::Result;
use crate::fragment::{IntoArgs, IntoSql, WriteSql};

/// Create a SELECT statement with one output expression.
pub fn select(expr: impl IntoSql) -> SelectStatement {
    SelectStatement::new().select(expr)
}

/// Create a statement with only a FROM clause.
pub fn from(source: impl IntoSql) -> SelectStatement {
    SelectStatement::new().from(source)
}

/// Create a predicate carrier: a statement holding only a WHERE list, meant
/// to be passed to `apply` on other statements.
pub fn where_(template: impl Into<String>, args: impl IntoArgs) -> SelectStatement {
    SelectStatement::new().where_(template, args)
}

/// Create an INSERT statement.
pub fn insert(table: impl IntoSql) -> InsertStatement {
    InsertStatement::new(table)
}

/// Create an UPDATE statement.
pub fn update(table: impl IntoSql) -> UpdateStatement {
    UpdateStatement::new(table)
}

/// Create a DELETE statement.
pub fn delete(table: impl IntoSql) -> DeleteStatement {
    DeleteStatement::new(table)
}

/// Create an empty VALUES list.
pub fn values() -> ValuesStatement {
    ValuesStatement::new()
}

/// Render `stmt` against a fresh [`Args`].
pub fn build<S: WriteSql + ?Sized>(stmt: &S) -> Result<Built> {
    let mut args = Args::new();
    let sql = build_with(stmt, &mut args)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "pgsql.build",
        param_count = args.len(),
        sql = %sql,
        "built statement"
    );

    Ok(Built {
        sql,
        params: args.into_values(),
    })
}

/// Render `stmt` against a caller-supplied [`Args`], continuing its
/// numbering and reusing its placeholders.
pub fn build_with<S: WriteSql + ?Sized>(stmt: &S, args: &mut Args) -> Result<String> {
    let mut sql = String::new();
    stmt.write_sql(&mut sql, args)?;
    Ok(sql)
}
