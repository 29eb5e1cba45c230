//! Probability tables over discrete variables.
//!
//! A [`Potential`] stores one non-negative real per joint assignment of its
//! variables, first variable varying fastest. Tables combine by aligning
//! their axes on variable names (see `ops`).

mod instantiation;
mod ops;

use std::fmt;

use docalc_core::constants::PROBABILITY_TOLERANCE;
use docalc_core::errors::PotentialError;
use docalc_core::types::collections::{FxHashSet, SmallVec8};
use docalc_core::{NameSet, Values};
use serde::Serialize;

use crate::variable::DiscreteVariable;

pub use instantiation::for_each_index;
use instantiation::{offset, strides};

/// Whether two probabilities agree within tolerance.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= PROBABILITY_TOLERANCE
}

/// A table of non-negative reals indexed by the joint assignments of an
/// ordered list of variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Potential {
    vars: Vec<DiscreteVariable>,
    values: Vec<f64>,
}

impl Potential {
    /// A table over `vars` filled with `fill`.
    pub fn filled(vars: Vec<DiscreteVariable>, fill: f64) -> Result<Self, PotentialError> {
        Self::check_vars(&vars)?;
        let len = vars.iter().map(DiscreteVariable::domain_size).product();
        Ok(Self {
            vars,
            values: vec![fill; len],
        })
    }

    /// A table over `vars` from values in first-variable-fastest order.
    pub fn from_values(
        vars: Vec<DiscreteVariable>,
        values: Vec<f64>,
    ) -> Result<Self, PotentialError> {
        Self::check_vars(&vars)?;
        let expected: usize = vars.iter().map(DiscreteVariable::domain_size).product();
        if values.len() != expected {
            return Err(PotentialError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        if let Some((offset, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| **v < 0.0 || v.is_nan())
        {
            return Err(PotentialError::NegativeValue { offset, value });
        }
        Ok(Self { vars, values })
    }

    /// A table with no variables holding a single value.
    pub fn scalar(value: f64) -> Self {
        Self {
            vars: Vec::new(),
            values: vec![value],
        }
    }

    pub fn variables(&self) -> &[DiscreteVariable] {
        &self.vars
    }

    /// Variable names in axis order.
    pub fn names(&self) -> Vec<&str> {
        self.vars.iter().map(DiscreteVariable::name).collect()
    }

    pub fn name_set(&self) -> NameSet {
        self.vars.iter().map(|v| v.name().to_string()).collect()
    }

    /// Raw values, first variable fastest.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Axis of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v.name() == name)
    }

    /// Value at the assignment `values`, which must label every variable.
    /// Extra entries are ignored.
    pub fn get(&self, values: &Values) -> Result<f64, PotentialError> {
        let index = self.index_of(values)?;
        Ok(self.values[offset(&index, &self.strides())])
    }

    /// Overwrite the value at the assignment `values`.
    pub fn set(&mut self, values: &Values, value: f64) -> Result<(), PotentialError> {
        let index = self.index_of(values)?;
        let at = offset(&index, &self.strides());
        self.values[at] = value;
        Ok(())
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Copy scaled to sum to 1. An all-zero table is returned unchanged.
    pub fn normalize(&self) -> Self {
        let total = self.total();
        let mut out = self.clone();
        if total > 0.0 {
            out.values.iter_mut().for_each(|v| *v /= total);
        }
        out
    }

    /// Copy with every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        out.values.iter_mut().for_each(|v| *v *= factor);
        out
    }

    /// Marginalize the variables of `names` out. Names absent from the table
    /// are ignored.
    pub fn sum_out(&self, names: &NameSet) -> Self {
        let keep: NameSet = self
            .vars
            .iter()
            .map(|v| v.name().to_string())
            .filter(|n| !names.contains(n))
            .collect();
        self.margin_onto(&keep)
    }

    /// Marginal over the variables of `names` (axis order of `self` kept).
    pub fn margin_onto(&self, names: &NameSet) -> Self {
        let kept: Vec<DiscreteVariable> = self
            .vars
            .iter()
            .filter(|v| names.contains(v.name()))
            .cloned()
            .collect();
        if kept.len() == self.vars.len() {
            return self.clone();
        }
        let kept_dims: SmallVec8<usize> = kept.iter().map(DiscreteVariable::domain_size).collect();
        let kept_strides = strides(&kept_dims);
        // Stride of each source axis inside the result, 0 for summed axes.
        let mut projected: SmallVec8<usize> = SmallVec8::new();
        let mut k = 0;
        for v in &self.vars {
            if names.contains(v.name()) {
                projected.push(kept_strides[k]);
                k += 1;
            } else {
                projected.push(0);
            }
        }
        let mut values = vec![0.0; kept_dims.iter().product()];
        let mut source = self.values.iter();
        for_each_index(&self.dims(), |idx| {
            if let Some(v) = source.next() {
                values[offset(idx, &projected)] += v;
            }
        });
        Self { vars: kept, values }
    }

    /// Slice of the table at the labels of `values`. Variables of `values`
    /// absent from the table are ignored; the sliced axes disappear.
    pub fn extract(&self, values: &Values) -> Result<Self, PotentialError> {
        let mut fixed: SmallVec8<Option<usize>> = SmallVec8::new();
        for v in &self.vars {
            match values.get(v.name()) {
                Some(label) => {
                    let i = v.index_of(label).ok_or_else(|| PotentialError::UnknownLabel {
                        variable: v.name().to_string(),
                        label: label.clone(),
                    })?;
                    fixed.push(Some(i));
                }
                None => fixed.push(None),
            }
        }
        let vars: Vec<DiscreteVariable> = self
            .vars
            .iter()
            .zip(&fixed)
            .filter(|(_, f)| f.is_none())
            .map(|(v, _)| v.clone())
            .collect();
        let mut out = Vec::new();
        let mut source = self.values.iter();
        for_each_index(&self.dims(), |idx| {
            let value = source.next().copied().unwrap_or_default();
            let matches = idx
                .iter()
                .zip(&fixed)
                .all(|(i, f)| f.map_or(true, |f| f == *i));
            if matches {
                out.push(value);
            }
        });
        Ok(Self { vars, values: out })
    }

    /// Copy whose axes start with the variables of `order` (those present,
    /// in that order), followed by the remaining axes in their current order.
    pub fn reorder<S: AsRef<str>>(&self, order: &[S]) -> Self {
        let mut perm: Vec<usize> = Vec::with_capacity(self.vars.len());
        for name in order {
            if let Some(p) = self.position(name.as_ref()) {
                if !perm.contains(&p) {
                    perm.push(p);
                }
            }
        }
        for p in 0..self.vars.len() {
            if !perm.contains(&p) {
                perm.push(p);
            }
        }
        if perm.iter().enumerate().all(|(i, p)| i == *p) {
            return self.clone();
        }
        let source_strides = self.strides();
        let vars: Vec<DiscreteVariable> = perm.iter().map(|&p| self.vars[p].clone()).collect();
        let dims: SmallVec8<usize> = vars.iter().map(DiscreteVariable::domain_size).collect();
        let permuted: SmallVec8<usize> = perm.iter().map(|&p| source_strides[p]).collect();
        let mut values = Vec::with_capacity(self.values.len());
        for_each_index(&dims, |idx| values.push(self.values[offset(idx, &permuted)]));
        Self { vars, values }
    }

    /// Every assignment with its value, in storage order.
    pub fn entries(&self) -> Vec<(Values, f64)> {
        let mut out = Vec::with_capacity(self.values.len());
        let mut source = self.values.iter();
        for_each_index(&self.dims(), |idx| {
            let assignment: Values = self
                .vars
                .iter()
                .zip(idx)
                .map(|(v, &i)| (v.name().to_string(), v.labels()[i].clone()))
                .collect();
            out.push((assignment, source.next().copied().unwrap_or_default()));
        });
        out
    }

    /// Largest absolute difference with a table over the same variables, in
    /// any axis order.
    pub fn max_difference(&self, other: &Potential) -> Result<f64, PotentialError> {
        if self.name_set() != other.name_set() {
            let missing = self
                .name_set()
                .symmetric_difference(&other.name_set())
                .next()
                .cloned()
                .unwrap_or_default();
            return Err(PotentialError::UnknownVariable(missing));
        }
        let aligned = other.reorder(&self.names());
        Ok(self
            .values
            .iter()
            .zip(&aligned.values)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    pub(crate) fn dims(&self) -> SmallVec8<usize> {
        self.vars.iter().map(DiscreteVariable::domain_size).collect()
    }

    fn strides(&self) -> SmallVec8<usize> {
        strides(&self.dims())
    }

    fn index_of(&self, values: &Values) -> Result<SmallVec8<usize>, PotentialError> {
        self.vars
            .iter()
            .map(|v| {
                let label = values
                    .get(v.name())
                    .ok_or_else(|| PotentialError::UnknownVariable(v.name().to_string()))?;
                v.index_of(label).ok_or_else(|| PotentialError::UnknownLabel {
                    variable: v.name().to_string(),
                    label: label.clone(),
                })
            })
            .collect()
    }

    fn check_vars(vars: &[DiscreteVariable]) -> Result<(), PotentialError> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        for v in vars {
            if v.domain_size() == 0 {
                return Err(PotentialError::EmptyDomain(v.name().to_string()));
            }
            if !seen.insert(v.name()) {
                return Err(PotentialError::DuplicateVariable(v.name().to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.names().join(", "))?;
        for (assignment, value) in self.entries() {
            let cells: Vec<String> = assignment
                .iter()
                .map(|(name, label)| format!("{name}={label}"))
                .collect();
            writeln!(f, "  {} : {value:.6}", cells.join(" "))?;
        }
        Ok(())
    }
}
