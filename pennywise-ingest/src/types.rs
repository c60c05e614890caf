use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Untrusted statement row as produced by CSV tokenization: header → cell text.
///
/// Nothing about its shape is guaranteed; `RowNormalizer` is the only way to
/// turn it into a `NormalizedTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Resolve a logical field to its first non-blank value.
    ///
    /// Exact header matches are tried in alias order first; failing that, any
    /// header equal to an alias after trimming and case folding is accepted.
    pub fn lookup(&self, field: Field) -> Option<&str> {
        let aliases = field.aliases();

        let exact = aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|v| !v.trim().is_empty());
        if exact.is_some() {
            return exact;
        }

        aliases.iter().find_map(|alias| {
            self.0
                .iter()
                .filter(|(k, _)| k.trim().eq_ignore_ascii_case(alias))
                .map(|(_, v)| v.as_str())
                .find(|v| !v.trim().is_empty())
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Logical columns of the fixed transaction schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    Description,
    Amount,
    Category,
}

impl Field {
    /// Recognized header spellings, in precedence order
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Date => &["Date", "date", "DATE"],
            Field::Description => &["Description", "description", "DESC", "desc"],
            Field::Amount => &["Amount", "amount", "AMOUNT"],
            Field::Category => &["Category", "category", "CAT", "cat"],
        }
    }
}
