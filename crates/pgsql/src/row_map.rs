//! Map-backed records for INSERT and UPDATE.

use std::collections::HashMap;

use crate::clause::Assignment;
use crate::fragment::Fragment;
use crate::stmt::{Insertable, Updateable, ValuesStatement};

/// Column name to value map, usable as insert or update data.
///
/// Columns are always emitted in lexicographic order, so the generated SQL
/// does not depend on hash map iteration order.
///
/// ```ignore
/// let row = RowMap::new().set("name", "Alice").set("age", 30);
/// insert("people").data(&row);
/// // insert into people (age, name) values ($1,$2)
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowMap(HashMap<String, Fragment>);

impl RowMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Fragment>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Insert a column, returning the previous value if any.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        value: impl Into<Fragment>,
    ) -> Option<Fragment> {
        self.0.insert(column.into(), value.into())
    }

    pub fn get(&self, column: &str) -> Option<&Fragment> {
        self.0.get(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn sorted(&self) -> Vec<(&String, &Fragment)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<K: Into<String>, V: Into<Fragment>> FromIterator<(K, V)> for RowMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Insertable for RowMap {
    fn insert_data(&self) -> (Vec<String>, ValuesStatement) {
        let (columns, row): (Vec<String>, Vec<Fragment>) = self
            .sorted()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .unzip();
        (columns, ValuesStatement::new().row(row))
    }
}

impl Updateable for RowMap {
    fn update_data(&self) -> Vec<Assignment> {
        self.sorted()
            .into_iter()
            .map(|(k, v)| Assignment::new(k, v.clone()))
            .collect()
    }
}
