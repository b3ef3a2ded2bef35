//! Clause building blocks shared by the statement builders.
//!
//! Each clause renders its keyword only when it holds something, so a
//! statement can write all of its clauses in canonical order and let the
//! empty ones drop out.

use std::sync::Arc;

use crate::args::Args;
use crate::error::Result;
use crate::fragment::{Fragment, IntoSql, WriteSql, all_empty, write_list};

/// A keyword-led piece of a statement.
pub(crate) trait Clause: WriteSql {
    /// Check if the clause renders nothing.
    fn is_empty(&self) -> bool;
}

/// Write the non-empty `clauses` separated by single spaces.
pub(crate) fn write_clauses(
    sql: &mut String,
    clauses: &[&dyn Clause],
    args: &mut Args,
) -> Result<()> {
    let mut first = true;
    for clause in clauses.iter().filter(|c| !c.is_empty()) {
        if !first {
            sql.push(' ');
        }
        clause.write_sql(sql, args)?;
        first = false;
    }
    Ok(())
}

fn arc(f: impl IntoSql) -> Arc<Fragment> {
    Arc::new(f.into_sql())
}

// ==================== Target table ====================

/// `<keyword> <table>` head of insert/update/delete.
#[derive(Debug, Clone)]
pub(crate) struct TableClause {
    keyword: &'static str,
    table: Arc<Fragment>,
}

impl TableClause {
    pub(crate) fn new(keyword: &'static str, table: impl IntoSql) -> Self {
        Self {
            keyword,
            table: arc(table),
        }
    }
}

impl WriteSql for TableClause {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        sql.push_str(self.keyword);
        sql.push(' ');
        self.table.write_sql(sql, args)
    }
}

impl Clause for TableClause {
    fn is_empty(&self) -> bool {
        false
    }
}

// ==================== SELECT ====================

/// `select [distinct [on (...)]] <list or *>`.
#[derive(Debug, Clone, Default)]
pub struct SelectClause {
    distinct: bool,
    distinct_on: Vec<Arc<Fragment>>,
    items: Vec<Arc<Fragment>>,
}

impl SelectClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an output expression.
    pub fn push(&mut self, expr: impl IntoSql) {
        self.items.push(arc(expr));
    }

    pub fn set_distinct(&mut self) {
        self.distinct = true;
    }

    /// Append a `distinct on` expression. Implies `distinct`.
    pub fn push_distinct_on(&mut self, expr: impl IntoSql) {
        self.distinct = true;
        self.distinct_on.push(arc(expr));
    }

    /// Take `other`'s distinct flag and append its expressions.
    pub fn extend(&mut self, other: &SelectClause) {
        self.distinct |= other.distinct;
        self.distinct_on.extend(other.distinct_on.iter().cloned());
        self.items.extend(other.items.iter().cloned());
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        !self.distinct && all_empty(&self.items)
    }
}

impl WriteSql for SelectClause {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        sql.push_str("select");
        if self.distinct {
            sql.push_str(" distinct");
        }
        if !all_empty(&self.distinct_on) {
            sql.push_str(" on (");
            write_list(sql, &self.distinct_on, ", ", false, args)?;
            sql.push(')');
        }
        sql.push(' ');
        if all_empty(&self.items) {
            sql.push('*');
        } else {
            write_list(sql, &self.items, ", ", false, args)?;
        }
        Ok(())
    }
}

impl Clause for SelectClause {
    fn is_empty(&self) -> bool {
        SelectClause::is_empty(self)
    }
}

// ==================== Singletons ====================

macro_rules! singleton_clause {
    ($(#[$meta:meta])* $name:ident, $keyword:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name(Option<Arc<Fragment>>);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Replace the clause expression. Last write wins.
            pub fn set(&mut self, expr: impl IntoSql) {
                self.0 = Some(arc(expr));
            }

            /// Take `other`'s expression if it has one.
            pub fn merge(&mut self, other: &Self) {
                if !other.is_empty() {
                    self.0 = other.0.clone();
                }
            }

            pub fn get(&self) -> Option<&Fragment> {
                self.0.as_deref()
            }

            pub fn is_empty(&self) -> bool {
                self.0.as_ref().is_none_or(|expr| expr.is_empty())
            }
        }

        impl WriteSql for $name {
            fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
                match &self.0 {
                    Some(expr) if !expr.is_empty() => {
                        sql.push_str(concat!($keyword, " "));
                        expr.write_sql(sql, args)
                    }
                    _ => Ok(()),
                }
            }
        }

        impl Clause for $name {
            fn is_empty(&self) -> bool {
                $name::is_empty(self)
            }
        }
    };
}

singleton_clause!(
    /// `from <expr>`.
    FromClause,
    "from"
);
singleton_clause!(
    /// `limit <expr>`.
    LimitClause,
    "limit"
);
singleton_clause!(
    /// `offset <expr>`.
    OffsetClause,
    "offset"
);

// ==================== Lists ====================

/// `where (p1) and (p2) ...`.
///
/// Predicates are kept as a list so statements can exchange them
/// (`apply`/`merge`) by appending.
#[derive(Debug, Clone, Default)]
pub struct WhereList(Vec<Arc<Fragment>>);

impl WhereList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate, and-ed with the others.
    pub fn and(&mut self, cond: impl IntoSql) {
        self.0.push(arc(cond));
    }

    /// Or `cond` with everything collected so far.
    ///
    /// The current predicates collapse into the left side of a single `or`
    /// node: `where ((a) and (b) or c)`.
    pub fn or(&mut self, cond: impl IntoSql) {
        let right = arc(cond);
        if right.is_empty() {
            return;
        }
        self.0.retain(|p| !p.is_empty());
        let left = match self.0.len() {
            0 => {
                self.0.push(right);
                return;
            }
            1 => self.0.remove(0),
            _ => Arc::new(Fragment::List {
                items: std::mem::take(&mut self.0),
                separator: " and ",
                wrap: true,
            }),
        };
        self.0.push(Arc::new(Fragment::Binary {
            left,
            op: "or",
            right,
        }));
    }

    /// Append all predicates of `other`.
    pub fn extend(&mut self, other: &WhereList) {
        self.0.extend(other.0.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        all_empty(&self.0)
    }
}

impl WriteSql for WhereList {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        sql.push_str("where ");
        write_list(sql, &self.0, " and ", true, args)
    }
}

impl Clause for WhereList {
    fn is_empty(&self) -> bool {
        WhereList::is_empty(self)
    }
}

macro_rules! list_clause {
    ($(#[$meta:meta])* $name:ident, $keyword:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name(Vec<Arc<Fragment>>);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn push(&mut self, expr: impl IntoSql) {
                self.0.push(arc(expr));
            }

            /// Append all entries of `other`.
            pub fn extend(&mut self, other: &Self) {
                self.0.extend(other.0.iter().cloned());
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                all_empty(&self.0)
            }
        }

        impl WriteSql for $name {
            fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
                if self.is_empty() {
                    return Ok(());
                }
                sql.push_str(concat!($keyword, " "));
                write_list(sql, &self.0, ", ", false, args)
            }
        }

        impl Clause for $name {
            fn is_empty(&self) -> bool {
                $name::is_empty(self)
            }
        }
    };
}

list_clause!(
    /// `order by e1, e2`.
    OrderByClause,
    "order by"
);
list_clause!(
    /// `returning c1, c2`.
    ReturningList,
    "returning"
);

// ==================== Assignments ====================

/// One `left = right` pair of an update.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub left: Arc<Fragment>,
    pub right: Arc<Fragment>,
}

impl Assignment {
    /// `column = value`. The column is raw SQL; a plain value is bound as a
    /// parameter, a [`Fragment`] (e.g. `raw("now()")`) renders inline.
    pub fn new(column: impl IntoSql, value: impl Into<Fragment>) -> Self {
        Self {
            left: arc(column),
            right: Arc::new(value.into()),
        }
    }
}

impl WriteSql for Assignment {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        self.left.write_sql(sql, args)?;
        sql.push_str(" = ");
        self.right.write_sql(sql, args)
    }
}

/// An ordered list of assignments, usable directly as update data.
///
/// ```ignore
/// let data = Assignments::new().set("name", "Alice").set("updated_at", raw("now()"));
/// update("people").set(&data).where_("id = ?", [42]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments(Vec<Assignment>);

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, column: impl IntoSql, value: impl Into<Fragment>) -> Self {
        self.0.push(Assignment::new(column, value));
        self
    }

    pub fn push(&mut self, assignment: Assignment) {
        self.0.push(assignment);
    }

    pub fn as_slice(&self) -> &[Assignment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Assignment>> for Assignments {
    fn from(v: Vec<Assignment>) -> Self {
        Self(v)
    }
}

impl FromIterator<Assignment> for Assignments {
    fn from_iter<I: IntoIterator<Item = Assignment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Assignments {
    type Item = Assignment;
    type IntoIter = std::vec::IntoIter<Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// `set ...`: either an assignment list or a single set expression.
#[derive(Debug, Clone, Default)]
pub(crate) enum SetClause {
    #[default]
    Empty,
    Assignments(Vec<Assignment>),
    Expr(Arc<Fragment>),
}

impl WriteSql for SetClause {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        if Clause::is_empty(self) {
            return Ok(());
        }
        match self {
            SetClause::Empty => {}
            SetClause::Assignments(list) => {
                sql.push_str("set ");
                for (i, a) in list.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    a.write_sql(sql, args)?;
                }
            }
            SetClause::Expr(expr) => {
                sql.push_str("set ");
                expr.write_sql(sql, args)?;
            }
        }
        Ok(())
    }
}

impl Clause for SetClause {
    fn is_empty(&self) -> bool {
        match self {
            SetClause::Empty => true,
            SetClause::Assignments(list) => list.is_empty(),
            SetClause::Expr(expr) => expr.is_empty(),
        }
    }
}
