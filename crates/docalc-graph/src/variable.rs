//! Discrete random variables.

use serde::{Deserialize, Serialize};

/// A named discrete variable with an ordered list of labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscreteVariable {
    name: String,
    labels: Vec<String>,
}

impl DiscreteVariable {
    /// Create a variable from its labels.
    pub fn new<S: AsRef<str>>(name: &str, labels: &[S]) -> Self {
        Self {
            name: name.to_string(),
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        }
    }

    /// A variable labelled `"0"`, `"1"`, ….
    pub fn with_domain_size(name: &str, size: usize) -> Self {
        Self {
            name: name.to_string(),
            labels: (0..size).map(|i| i.to_string()).collect(),
        }
    }

    /// A two-state variable labelled `"0"` and `"1"`.
    pub fn binary(name: &str) -> Self {
        Self::with_domain_size(name, 2)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn domain_size(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Position of `label` in the domain.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

impl std::fmt::Display for DiscreteVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}<{}>", self.name, self.labels.join(","))
    }
}
