//! DELETE statement builder.

use crate::args::Args;
use crate::clause::{ReturningList, TableClause, WhereList, write_clauses};
use crate::error::Result;
use crate::fragment::{Fragment, IntoArgs, IntoSql, WriteSql};
use crate::stmt::{SelectStatement, SqlStatement};

/// DELETE statement builder.
///
/// A statement without predicates deletes every row; nothing guards against
/// that here.
#[derive(Debug, Clone)]
#[must_use]
pub struct DeleteStatement {
    table: TableClause,
    where_list: WhereList,
    returning: ReturningList,
}

impl DeleteStatement {
    /// Create a DELETE statement for a table.
    pub fn new(table: impl IntoSql) -> Self {
        Self {
            table: TableClause::new("delete from", table),
            where_list: WhereList::new(),
            returning: ReturningList::new(),
        }
    }

    /// Add a predicate, and-ed with the others.
    pub fn where_(mut self, template: impl Into<String>, args: impl IntoArgs) -> Self {
        self.where_list.and(Fragment::template(template, args));
        self
    }

    /// Or a predicate with all predicates added so far.
    pub fn or_where(mut self, template: impl Into<String>, args: impl IntoArgs) -> Self {
        self.where_list.or(Fragment::template(template, args));
        self
    }

    pub fn where_expr(mut self, cond: impl IntoSql) -> Self {
        self.where_list.and(cond);
        self
    }

    pub fn returning(mut self, expr: impl IntoSql) -> Self {
        self.returning.push(expr);
        self
    }

    /// Append the predicates of each of `others`.
    pub fn apply<'a>(mut self, others: impl IntoIterator<Item = &'a SelectStatement>) -> Self {
        for other in others {
            self.where_list.extend(other.where_list());
        }
        self
    }

    /// Merge other DELETE statements: WHERE and RETURNING lists append.
    pub fn merge<'a>(mut self, others: impl IntoIterator<Item = &'a DeleteStatement>) -> Self {
        for other in others {
            self.where_list.extend(&other.where_list);
            self.returning.extend(&other.returning);
        }
        self
    }
}

impl WriteSql for DeleteStatement {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        write_clauses(sql, &[&self.table, &self.where_list, &self.returning], args)
    }
}

impl SqlStatement for DeleteStatement {}
