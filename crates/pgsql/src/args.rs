//! Placeholder interning.
//!
//! [`Args`] owns the ordered list of bound values for one rendering pass and
//! hands out `$n` placeholders. A value that is already bound (by interning
//! equality, see [`Value`]) gets its existing placeholder back, so
//! `a = ? OR b = ?` bound to the same value twice only sends it once.
//!
//! ```ignore
//! let mut args = Args::new();
//! assert_eq!(args.intern(42).to_string(), "$1");
//! assert_eq!(args.intern(7).to_string(), "$2");
//! assert_eq!(args.intern(42).to_string(), "$1");
//! assert_eq!(args.format("array[?, ?, ?]", (1, 42, 7))?, "array[$3, $1, $2]");
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::fragment::{IntoArgs, write_template};
use crate::value::{InternKey, Value};

/// Number of distinct values after which lookups switch from a linear scan
/// to a hash index.
pub const DEFAULT_INDEX_THRESHOLD: usize = 32;

/// A 1-based reference to a bound value, rendered as `$n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(usize);

impl Placeholder {
    /// The 1-based position of the value in the parameter list.
    pub fn get(self) -> usize {
        self.0
    }

    pub(crate) fn push_to(self, sql: &mut String) {
        sql.push('$');
        sql.push_str(&self.0.to_string());
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Ordered, deduplicated parameter values.
///
/// `values()[i]` is always the value bound to `$(i + 1)`.
#[derive(Debug, Clone)]
pub struct Args {
    values: Vec<Value>,
    index: Option<HashMap<InternKey, Placeholder>>,
    index_threshold: usize,
}

impl Default for Args {
    fn default() -> Self {
        Self::new()
    }
}

impl Args {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::with_index_threshold(DEFAULT_INDEX_THRESHOLD)
    }

    /// Create an empty engine that builds its hash index once `threshold`
    /// values are bound. Only affects lookup cost, never output.
    pub fn with_index_threshold(threshold: usize) -> Self {
        Self {
            values: Vec::new(),
            index: None,
            index_threshold: threshold,
        }
    }

    /// Bind a value and return its placeholder.
    ///
    /// Comparable values reuse the placeholder of an equal value bound
    /// earlier; `Bytes` and `Json` always get a new one.
    pub fn intern(&mut self, value: impl Into<Value>) -> Placeholder {
        let value = value.into();
        if let Some(p) = self.existing_placeholder(&value) {
            return p;
        }

        if self.index.is_none() && self.values.len() >= self.index_threshold {
            self.build_index();
        }

        self.values.push(value);
        let p = Placeholder(self.values.len());

        if let (Some(index), Some(key)) = (
            self.index.as_mut(),
            self.values.last().and_then(Value::intern_key),
        ) {
            index.insert(key, p);
        }

        p
    }

    /// Bound values in placeholder order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the engine, returning the bound values in placeholder order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Number of bound values (the highest placeholder handed out).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no value has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace each `?` in `template` with the placeholder of the matching
    /// argument.
    ///
    /// The i-th marker consumes the i-th argument; values are interned,
    /// fragment arguments are rendered in place. There is no escape for a
    /// literal `?`. Fails if the template has more markers than arguments;
    /// surplus arguments are ignored.
    pub fn format(&mut self, template: &str, args: impl IntoArgs) -> Result<String> {
        let args = args.into_args();
        let mut sql = String::with_capacity(template.len());
        write_template(&mut sql, template, &args, self)?;
        Ok(sql)
    }

    fn existing_placeholder(&self, value: &Value) -> Option<Placeholder> {
        if !value.is_comparable() {
            return None;
        }

        if let Some(index) = &self.index {
            return value.intern_key().and_then(|key| index.get(&key).copied());
        }

        self.values
            .iter()
            .position(|v| v.interns_as(value))
            .map(|i| Placeholder(i + 1))
    }

    fn build_index(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "pgsql.args",
            values = self.values.len(),
            "switching placeholder lookup to hash index"
        );

        let mut index = HashMap::with_capacity(self.values.len() * 2);
        for (i, v) in self.values.iter().enumerate() {
            if let Some(key) = v.intern_key() {
                index.entry(key).or_insert(Placeholder(i + 1));
            }
        }
        self.index = Some(index);
    }
}
