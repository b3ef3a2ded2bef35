//! INSERT statement builder.

use crate::args::Args;
use crate::clause::{Clause, ReturningList, TableClause, write_clauses};
use crate::error::Result;
use crate::fragment::{IntoSql, WriteSql};
use crate::stmt::{SelectStatement, SqlStatement, ValuesStatement};

/// A record that can supply its own columns and one row of values.
pub trait Insertable {
    fn insert_data(&self) -> (Vec<String>, ValuesStatement);
}

impl<T: Insertable + ?Sized> Insertable for &T {
    fn insert_data(&self) -> (Vec<String>, ValuesStatement) {
        (**self).insert_data()
    }
}

#[derive(Debug, Clone, Default)]
struct ColumnList(Vec<String>);

impl WriteSql for ColumnList {
    fn write_sql(&self, sql: &mut String, _args: &mut Args) -> Result<()> {
        sql.push('(');
        sql.push_str(&self.0.join(", "));
        sql.push(')');
        Ok(())
    }
}

impl Clause for ColumnList {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where the inserted rows come from.
#[derive(Debug, Clone, Default)]
enum InsertSource {
    #[default]
    None,
    Values(ValuesStatement),
    Query(SelectStatement),
}

impl WriteSql for InsertSource {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        match self {
            InsertSource::None => Ok(()),
            InsertSource::Values(v) => v.write_sql(sql, args),
            InsertSource::Query(q) => q.write_sql(sql, args),
        }
    }
}

impl Clause for InsertSource {
    fn is_empty(&self) -> bool {
        match self {
            InsertSource::None => true,
            InsertSource::Values(v) => v.is_empty(),
            InsertSource::Query(_) => false,
        }
    }
}

/// INSERT statement builder.
///
/// ```ignore
/// insert("people")
///     .columns(["name", "age"])
///     .values(values().row(("Alice", 30)).row(("Bob", 25)))
///     .returning("id");
/// // insert into people (name, age) values ($1,$2), ($3,$4) returning id
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct InsertStatement {
    table: TableClause,
    columns: ColumnList,
    source: InsertSource,
    returning: ReturningList,
}

impl InsertStatement {
    /// Create an INSERT statement for a table.
    pub fn new(table: impl IntoSql) -> Self {
        Self {
            table: TableClause::new("insert into", table),
            columns: ColumnList::default(),
            source: InsertSource::None,
            returning: ReturningList::new(),
        }
    }

    /// Set the target column list, replacing any previous one.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns = ColumnList(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Insert explicit rows.
    pub fn values(mut self, values: ValuesStatement) -> Self {
        self.source = InsertSource::Values(values);
        self
    }

    /// Insert the rows produced by a query.
    pub fn query(mut self, query: SelectStatement) -> Self {
        self.source = InsertSource::Query(query);
        self
    }

    /// Take columns and values from a record.
    pub fn data<T: Insertable + ?Sized>(self, data: &T) -> Self {
        let (columns, values) = data.insert_data();
        self.columns(columns).values(values)
    }

    pub fn returning(mut self, expr: impl IntoSql) -> Self {
        self.returning.push(expr);
        self
    }

    /// Merge other INSERT statements: RETURNING lists append; columns and
    /// source are taken from `others` where set.
    pub fn merge<'a>(mut self, others: impl IntoIterator<Item = &'a InsertStatement>) -> Self {
        for other in others {
            if !other.columns.is_empty() {
                self.columns = other.columns.clone();
            }
            if !matches!(other.source, InsertSource::None) {
                self.source = other.source.clone();
            }
            self.returning.extend(&other.returning);
        }
        self
    }
}

impl WriteSql for InsertStatement {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        write_clauses(
            sql,
            &[&self.table, &self.columns, &self.source, &self.returning],
            args,
        )
    }
}

impl SqlStatement for InsertStatement {}
