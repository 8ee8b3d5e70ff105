// src/domain/product_lines.rs

use crate::domain::ModelCode;

/// Immutable code -> display-name table for the product lines a run covers.
///
/// Entry order is the partition query order.
#[derive(Debug, Clone)]
pub struct ProductLines {
    entries: Vec<(ModelCode, String)>,
}

impl ProductLines {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ModelCode, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(code, name)| (code, name.into()))
                .collect(),
        }
    }

    pub fn codes(&self) -> Vec<ModelCode> {
        self.entries.iter().map(|(code, _)| code.clone()).collect()
    }

    pub fn display_name(&self, code: &ModelCode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, name)| name.as_str())
    }

    /// Display name for `code`, or the raw code when the table doesn't know it.
    pub fn pretty_name<'a>(&'a self, code: &'a ModelCode) -> &'a str {
        self.display_name(code).unwrap_or_else(|| code.as_str())
    }
}

impl Default for ProductLines {
    fn default() -> Self {
        Self::new(
            ModelCode::KNOWN
                .into_iter()
                .zip(["Model S", "Model 3", "Model X", "Model Y"]),
        )
    }
}
