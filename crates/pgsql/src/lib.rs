//! # pgsql
//!
//! Composable PostgreSQL statement builder.
//!
//! ## Features
//!
//! - **Numbered placeholders**: `?` markers become `$1, $2, ...` at build time
//! - **Deduplicated parameters**: the same scalar value bound twice is sent once
//! - **Composable**: statements clone cheaply and exchange predicates via `apply`/`merge`
//! - **Execution-agnostic**: `build` returns SQL text plus [`Value`]s that implement
//!   `tokio_postgres::types::ToSql`
//!
//! ## Usage
//!
//! ```ignore
//! use pgsql::{RowMap, SqlStatement, insert, select, update, where_};
//!
//! // SELECT
//! let built = select("id, name")
//!     .from("people")
//!     .where_("age > ? and city = ?", (18, "Paris"))
//!     .order_by("name")
//!     .limit(10)
//!     .build()?;
//! let rows = client.query(&built.sql, &built.params_ref()).await?;
//!
//! // INSERT
//! let row = RowMap::new().set("name", "Alice").set("age", 30);
//! let built = insert("people").data(&row).returning("id").build()?;
//! // insert into people (age, name) values ($1,$2) returning id
//!
//! // UPDATE, sharing a predicate
//! let tenant = where_("tenant_id = ?", [7]);
//! let built = update("people")
//!     .set(&row)
//!     .where_("id = ?", [42])
//!     .apply([&tenant])
//!     .build()?;
//! // update people set age = $1, name = $2 where (id = $3) and (tenant_id = $4)
//! ```

pub mod args;
mod clause;
pub mod error;
pub mod fragment;
mod row_map;
pub mod stmt;
pub mod value;

pub use args::{Args, DEFAULT_INDEX_THRESHOLD, Placeholder};
pub use clause::{
    Assignment, Assignments, FromClause, LimitClause, OffsetClause, OrderByClause,
    ReturningList, SelectClause, WhereList,
};
pub use error::{Error, Result};
pub use fragment::{Fragment, IntoArgs, IntoSql, WriteSql, param, raw, sql};
pub use row_map::RowMap;
pub use stmt::{
    Built, DeleteStatement, InsertStatement, Insertable, SelectStatement, SqlStatement,
    UpdateStatement, Updateable, ValuesStatement, build, build_with, delete, from, insert,
    select, update, values, where_,
};
pub use value::Value;

#[cfg(feature = "derive")]
pub use pgsql_derive::{Insertable, Updateable};
