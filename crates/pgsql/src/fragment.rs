//! SQL fragments: the renderable nodes every clause is built from.
//!
//! A [`Fragment`] is immutable once constructed. Clauses share fragments through
//! `Arc`, so cloning a statement never copies SQL text or bound values.
//!
//! Rendering goes through [`WriteSql`]: a node appends its SQL to the output
//! buffer and binds any values it carries in the supplied [`Args`]. Parameter
//! numbers are therefore assigned when a statement is built, not when the
//! fragment is created, which is what lets fragments move freely between
//! statements (see `apply`/`merge` on the statement builders).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::args::Args;
use crate::error::{Error, Result};
use crate::value::Value;

/// Anything that can render itself as SQL against an [`Args`] engine.
pub trait WriteSql {
    /// Append this node's SQL to `sql`, binding parameters in `args`.
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()>;
}

/// A renderable SQL expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Literal SQL text, written verbatim.
    Raw(String),

    /// A single bound value, written as its `$n` placeholder.
    Param(Value),

    /// `(left op right)`. Always parenthesized.
    Binary {
        left: Arc<Fragment>,
        op: &'static str,
        right: Arc<Fragment>,
    },

    /// Template with `?` markers, each replaced by the matching argument.
    /// Example: `Template { sql: "a = ? OR b = ?", args: [1, 2] }` -> `a = $1 OR b = $2`
    Template { sql: String, args: Vec<Fragment> },

    /// Items joined by `separator`; with `wrap`, each item is parenthesized.
    List {
        items: Vec<Arc<Fragment>>,
        separator: &'static str,
        wrap: bool,
    },
}

/// Create a raw SQL fragment.
pub fn raw(sql: impl Into<String>) -> Fragment {
    Fragment::Raw(sql.into())
}

/// Create a bound-parameter fragment.
pub fn param(value: impl Into<Value>) -> Fragment {
    Fragment::Param(value.into())
}

/// Create a template fragment with `?` placeholders.
///
/// Rendering fails with [`Error::MissingArgument`] when the template has more
/// markers than arguments, except that a template given no arguments at all
/// is kept as raw text and never checked for markers.
///
/// # Example
/// ```ignore
/// let f = pgsql::sql("lower(email) = lower(?)", ["alice@example.com"]);
/// ```
pub fn sql(template: impl Into<String>, args: impl IntoArgs) -> Fragment {
    Fragment::template(template, args)
}

impl Fragment {
    /// Create a template fragment.
    ///
    /// With no arguments the template is kept as raw text, so a literal `?`
    /// (e.g. the jsonb key-exists operator) survives untouched. Such a
    /// template is never checked for markers: `("a = ?", ())` renders
    /// `a = ?` rather than failing with [`Error::MissingArgument`].
    pub fn template(sql: impl Into<String>, args: impl IntoArgs) -> Self {
        let args = args.into_args();
        if args.is_empty() {
            return Fragment::Raw(sql.into());
        }
        Fragment::Template {
            sql: sql.into(),
            args,
        }
    }

    /// Create a binary expression: `(left op right)`.
    pub fn binary(
        left: impl Into<Arc<Fragment>>,
        op: &'static str,
        right: impl Into<Arc<Fragment>>,
    ) -> Self {
        Fragment::Binary {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Combine with another condition: `(self and rhs)`.
    pub fn and(self, rhs: impl IntoSql) -> Self {
        Fragment::binary(self, "and", rhs.into_sql())
    }

    /// Combine with another condition: `(self or rhs)`.
    pub fn or(self, rhs: impl IntoSql) -> Self {
        Fragment::binary(self, "or", rhs.into_sql())
    }

    /// Create a list fragment.
    pub fn list(
        items: impl IntoIterator<Item = Fragment>,
        separator: &'static str,
        wrap: bool,
    ) -> Self {
        Fragment::List {
            items: items.into_iter().map(Arc::new).collect(),
            separator,
            wrap,
        }
    }

    /// Check if this fragment renders nothing (an empty list).
    pub fn is_empty(&self) -> bool {
        match self {
            Fragment::List { items, .. } => all_empty(items),
            _ => false,
        }
    }
}

impl WriteSql for Fragment {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        match self {
            Fragment::Raw(text) => sql.push_str(text),
            Fragment::Param(value) => args.intern(value.clone()).push_to(sql),
            Fragment::Binary { left, op, right } => {
                sql.push('(');
                left.write_sql(sql, args)?;
                sql.push(' ');
                sql.push_str(op);
                sql.push(' ');
                right.write_sql(sql, args)?;
                sql.push(')');
            }
            Fragment::Template { sql: template, args: values } => {
                write_template(sql, template, values, args)?;
            }
            Fragment::List {
                items,
                separator,
                wrap,
            } => write_list(sql, items, separator, *wrap, args)?,
        }
        Ok(())
    }
}

impl<T: WriteSql + ?Sized> WriteSql for Arc<T> {
    fn write_sql(&self, sql: &mut String, args: &mut Args) -> Result<()> {
        (**self).write_sql(sql, args)
    }
}

/// Substitute `?` markers in `template` with the rendered `values`.
pub(crate) fn write_template(
    sql: &mut String,
    template: &str,
    values: &[Fragment],
    args: &mut Args,
) -> Result<()> {
    let mut rest = template;
    let mut used = 0;
    while let Some(pos) = rest.find('?') {
        sql.push_str(&rest[..pos]);
        let value = values
            .get(used)
            .ok_or_else(|| Error::missing_argument(template, used + 1, values.len()))?;
        value.write_sql(sql, args)?;
        used += 1;
        rest = &rest[pos + 1..];
    }
    sql.push_str(rest);
    Ok(())
}

/// Check if every item renders nothing (true for no items).
pub(crate) fn all_empty(items: &[Arc<Fragment>]) -> bool {
    items.iter().all(|item| item.is_empty())
}

/// Write the non-empty `items` joined by `separator`. Binary items are
/// already parenthesized and are not wrapped twice.
pub(crate) fn write_list(
    sql: &mut String,
    items: &[Arc<Fragment>],
    separator: &str,
    wrap: bool,
    args: &mut Args,
) -> Result<()> {
    let mut first = true;
    for item in items.iter().filter(|item| !item.is_empty()) {
        if !first {
            sql.push_str(separator);
        }
        first = false;
        let parens = wrap && !matches!(**item, Fragment::Binary { .. });
        if parens {
            sql.push('(');
        }
        item.write_sql(sql, args)?;
        if parens {
            sql.push(')');
        }
    }
    Ok(())
}

// ==================== Conversions ====================

/// Conversion into a SQL expression for clause-building methods.
///
/// Strings are taken as raw SQL (column lists, table names, ordering terms);
/// a [`Fragment`] is used as is.
pub trait IntoSql {
    fn into_sql(self) -> Fragment;
}

impl IntoSql for &str {
    fn into_sql(self) -> Fragment {
        Fragment::Raw(self.to_string())
    }
}

impl IntoSql for String {
    fn into_sql(self) -> Fragment {
        Fragment::Raw(self)
    }
}

impl IntoSql for &String {
    fn into_sql(self) -> Fragment {
        Fragment::Raw(self.clone())
    }
}

impl IntoSql for Fragment {
    fn into_sql(self) -> Fragment {
        self
    }
}

/// Template arguments: `()`, tuples, arrays, slices or `Vec`s of anything
/// convertible into a [`Fragment`].
///
/// Plain values become bound parameters; fragments render inline.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Fragment>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Fragment> {
        Vec::new()
    }
}

impl<T: Into<Fragment>> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Fragment> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Fragment>, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Fragment> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Fragment> + Clone> IntoArgs for &[T] {
    fn into_args(self) -> Vec<Fragment> {
        self.iter().cloned().map(Into::into).collect()
    }
}

macro_rules! impl_into_args_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Fragment>),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Fragment> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_args_for_tuple!(A);
impl_into_args_for_tuple!(A, B);
impl_into_args_for_tuple!(A, B, C);
impl_into_args_for_tuple!(A, B, C, D);
impl_into_args_for_tuple!(A, B, C, D, E);
impl_into_args_for_tuple!(A, B, C, D, E, F);
impl_into_args_for_tuple!(A, B, C, D, E, F, G);
impl_into_args_for_tuple!(A, B, C, D, E, F, G, H);
impl_into_args_for_tuple!(A, B, C, D, E, F, G, H, I);
impl_into_args_for_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_into_args_for_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_into_args_for_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

macro_rules! impl_fragment_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Fragment {
                fn from(v: $ty) -> Self {
                    Fragment::Param(v.into())
                }
            }
        )+
    };
}

impl_fragment_from_value!(
    bool,
    i16,
    i32,
    i64,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    &String,
    Vec<u8>,
    &[u8],
    Uuid,
    DateTime<Utc>,
    serde_json::Value,
    Value,
);

impl<T: Into<Value>> From<Option<T>> for Fragment {
    fn from(v: Option<T>) -> Self {
        Fragment::Param(v.into())
    }
}
