//! UPDATE statement builder.

use std::sync::Arc;

use crate::args::Args;
use crate::clause::{
    Assignment, Assignments, Clause, ReturningList, SetClause, TableClause, WhereList,
    write_clauses,
};
use crate::error::Result;
use crate::fragment::{Fragment, IntoArgs, IntoSql, WriteSql};
use crate::stmt::{SelectStatement, SqlStatement};

/// A record that can supply its own `column = value` assignments.
pub trait Updateable {
    fn update_data(&self) -> Vec<Assignment>;
}

impl<T: Updateable + ?Sized> Updateable for &T {
    fn update_data(&self) -> Vec<Assignment> {
        (**self).update_data()
    }
}

impl Updateable for Assignments {
    fn update_data(&self) -> Vec<Assignment> {
        self.as_slice().to_vec()
    }
}

impl Updateable for [Assignment] {
    fn update_data(&self) -> Vec<Assignment> {
        self.to_vec()
    }
}

impl Updateable for Vec<Assignment> {
    fn update_data(&self) -> Vec<Assignment> {
        self.clone()
    }
}

/// UPDATE statement builder.
///
/// ```ignore
/// update("people")
///     .set(&Assignments::new().set("name", "Alice"))
///     .where_("id = ?", [42])
///     .returning("id");
/// // update people set name = $1 where (id = $2) returning id
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateStatement {
    table: TableClause,
    set: SetClause,
    where_list: WhereList,
    returning: ReturningList,
}

impl UpdateStatement {
    /// Create an UPDATE statement for a table.
    pub fn new(table: impl IntoSql) -> Self {
        Self {
            table: TableClause::new("update", table),
            set: SetClause::Empty,
            where_list: WhereList::new(),
            returning: ReturningList::new(),
        }
    }

    /// Replace the SET clause with the assignments of a record.
    pub fn set<T: Updateable + ?Sized>(mut self, data: &T) -> Self {
        self.set = SetClause::Assignments(data.update_data());
        self
    }

    /// Replace the SET clause with a single expression.
    ///
    /// ```ignore
    /// update("counters").set_sql("hits = hits + ?, seen_at = now()", [1]);
    /// ```
    pub fn set_sql(mut self, template: impl Into<String>, args: impl IntoArgs) -> Self {
        self.set = SetClause::Expr(Arc::new(Fragment::template(template, args)));
        self
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

    /// Merge other UPDATE statements: WHERE and RETURNING lists append; the
    /// SET clause is taken from `others` where set.
    pub fn merge<'a>(mut self, others: impl IntoIterator<Item = &'a UpdateStatement>) -> Self {
        for other in others {
            if !other.set.is_empty() {
                self.set = other.set.clone();
            }
            self.where_list.extend(&other.where_list);
            self.returning.extend(&other.returning);
        }
        self
    }
}

impl WriteSql for UpdateStatement {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        write_clauses(
            sql,
            &[&self.table, &self.set, &self.where_list, &self.returning],
            args,
        )
    }
}

impl SqlStatement for UpdateStatement {}
