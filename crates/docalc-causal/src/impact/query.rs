//! Causal query builder.

use docalc_core::types::names::name_set;
use docalc_core::{NameSet, Values};
use serde::{Deserialize, Serialize};

/// `P(on | do(doing), knowing)`, optionally sliced at `values`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CausalQuery {
    pub on: NameSet,
    pub doing: NameSet,
    pub knowing: NameSet,
    pub values: Values,
}

impl CausalQuery {
    pub fn new<I, S>(on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            on: name_set(on),
            ..Self::default()
        }
    }

    pub fn doing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.doing.extend(name_set(names));
        self
    }

    pub fn knowing<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.knowing.extend(name_set(names));
        self
    }

    /// Slice the answer at `name = label`.
    pub fn value(mut self, name: &str, label: &str) -> Self {
        self.values.insert(name.to_string(), label.to_string());
        self
    }

    pub fn values(mut self, values: Values) -> Self {
        self.values.extend(values);
        self
    }

    /// Presentation order of the answer's axes.
    pub(crate) fn axis_order(&self) -> Vec<&str> {
        self.on
            .iter()
            .chain(&self.doing)
            .chain(&self.knowing)
            .map(String::as_str)
            .collect()
    }
}
