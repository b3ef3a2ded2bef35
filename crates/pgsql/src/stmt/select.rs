//! SELECT statement builder.

use crate::args::Args;
use crate::clause::{
    Clause, FromClause, LimitClause, OffsetClause, OrderByClause, SelectClause, WhereList,
    write_clauses,
};
use crate::error::Result;
use crate::fragment::{Fragment, IntoArgs, IntoSql, WriteSql};
use crate::stmt::SqlStatement;

/// SELECT statement builder.
///
/// With a FROM source but no output expressions it selects `*`. With neither
/// it is a bare predicate carrier (see [`where_`](crate::where_)) and renders
/// as `where ...`.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SelectStatement {
    select: SelectClause,
    from: FromClause,
    where_list: WhereList,
    order_by: OrderByClause,
    limit: LimitClause,
    offset: OffsetClause,
}

impl SelectStatement {
    /// Create an empty statement.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== SELECT list ====================

    /// Append an output expression.
    pub fn select(mut self, expr: impl IntoSql) -> Self {
        self.select.push(expr);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.select.set_distinct();
        self
    }

    /// Append a `distinct on` expression. Implies `distinct`.
    pub fn distinct_on(mut self, expr: impl IntoSql) -> Self {
        self.select.push_distinct_on(expr);
        self
    }

    // ==================== FROM ====================

    /// Set the FROM source. Last write wins.
    pub fn from(mut self, source: impl IntoSql) -> Self {
        self.from.set(source);
        self
    }

    // ==================== WHERE ====================

    /// Add a predicate, and-ed with the others.
    ///
    /// ```ignore
    /// select("*").from("people").where_("age between ? and ?", (18, 65));
    /// ```
    pub fn where_(mut self, template: impl Into<String>, args: impl IntoArgs) -> Self {
        self.where_list.and(Fragment::template(template, args));
        self
    }

    /// Or a predicate with all predicates added so far.
    pub fn or_where(mut self, template: impl Into<String>, args: impl IntoArgs) -> Self {
        self.where_list.or(Fragment::template(template, args));
        self
    }

    /// Add a prebuilt predicate, and-ed with the others.
    pub fn where_expr(mut self, cond: impl IntoSql) -> Self {
        self.where_list.and(cond);
        self
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================

    pub fn order_by(mut self, expr: impl IntoSql) -> Self {
        self.order_by.push(expr);
        self
    }

    pub fn limit(mut self, n: i64) -> Self {
        self.limit.set(n.to_string());
        self
    }

    /// Set LIMIT to an arbitrary expression, e.g. `sql("?", [n])`.
    pub fn limit_expr(mut self, expr: impl IntoSql) -> Self {
        self.limit.set(expr);
        self
    }

    pub fn offset(mut self, n: i64) -> Self {
        self.offset.set(n.to_string());
        self
    }

    pub fn offset_expr(mut self, expr: impl IntoSql) -> Self {
        self.offset.set(expr);
        self
    }

    // ==================== Composition ====================

    /// Append the predicates of each of `others`, and take their FROM,
    /// LIMIT and OFFSET where set.
    pub fn apply<'a>(mut self, others: impl IntoIterator<Item = &'a SelectStatement>) -> Self {
        for other in others {
            self.where_list.extend(&other.where_list);
            self.from.merge(&other.from);
            self.limit.merge(&other.limit);
            self.offset.merge(&other.offset);
        }
        self
    }

    /// Merge whole statements: lists append, FROM/LIMIT/OFFSET are taken
    /// from `others` where set.
    pub fn merge<'a>(mut self, others: impl IntoIterator<Item = &'a SelectStatement>) -> Self {
        for other in others {
            self.select.extend(&other.select);
            self.order_by.extend(&other.order_by);
            self = self.apply([other]);
        }
        self
    }

    /// Access the WHERE list.
    pub fn where_list(&self) -> &WhereList {
        &self.where_list
    }
}

impl WriteSql for SelectStatement {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        let rest: [&dyn Clause; 5] = [
            &self.from,
            &self.where_list,
            &self.order_by,
            &self.limit,
            &self.offset,
        ];

        // Predicate carriers have no select head.
        if self.select.is_empty() && self.from.is_empty() {
            return write_clauses(sql, &rest, args);
        }

        self.select.write_sql(sql, args)?;
        if rest.iter().any(|c| !c.is_empty()) {
            sql.push(' ');
        }
        write_clauses(sql, &rest, args)
    }
}

impl SqlStatement for SelectStatement {}
