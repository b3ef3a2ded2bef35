//! VALUES lists.

use std::sync::Arc;

use crate::args::Args;
use crate::clause::Clause;
use crate::error::Result;
use crate::fragment::{Fragment, IntoArgs, WriteSql, write_list};
use crate::stmt::SqlStatement;

/// `values ($1,$2), ($3,$4)`.
///
/// Usable on its own or as the source of an INSERT. Plain values are bound
/// as parameters; fragments such as `raw("default")` render inline.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ValuesStatement {
    rows: Vec<Vec<Arc<Fragment>>>,
}

impl ValuesStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn row(mut self, values: impl IntoArgs) -> Self {
        self.rows
            .push(values.into_args().into_iter().map(Arc::new).collect());
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl WriteSql for ValuesStatement {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        sql.push_str("values ");
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            write_list(sql, row, ",", false, args)?;
            sql.push(')');
        }
        Ok(())
    }
}

impl Clause for ValuesStatement {
    fn is_empty(&self) -> bool {
        ValuesStatement::is_empty(self)
    }
}

impl SqlStatement for ValuesStatement {}
