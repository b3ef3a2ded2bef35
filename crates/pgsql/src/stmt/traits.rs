//! Build output and the trait shared by all statements.

use tokio_postgres::types::ToSql;

use crate::error::Result;
use crate::fragment::WriteSql;
use crate::value::Value;

/// SQL text plus its positional parameters.
///
/// `params[i]` is bound to `$(i + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Built {
    /// Get parameters as references compatible with tokio-postgres.
    ///
    /// ```ignore
    /// let built = select("*").from("people").where_("id = ?", [42]).build()?;
    /// let rows = client.query(&built.sql, &built.params_ref()).await?;
    /// ```
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Base trait for all statement builders.
pub trait SqlStatement: WriteSql {
    /// Render into SQL text and an ordered parameter list.
    ///
    /// Pure: building twice yields identical output.
    fn build(&self) -> Result<Built> {
        super::build(self)
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> Result<String> {
        self.build().map(|b| b.sql)
    }
}
