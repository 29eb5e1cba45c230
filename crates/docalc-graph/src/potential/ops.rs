//! Pointwise arithmetic between potentials.
//!
//! Operands are aligned on the union of their variables (the left operand's
//! axes first); a value is broadcast along every axis its table lacks.

use std::ops::{Add, Div, Mul, Sub};

use docalc_core::errors::PotentialError;
use docalc_core::types::collections::SmallVec8;

use super::instantiation::{offset, strides};
use super::{for_each_index, Potential};
use crate::variable::DiscreteVariable;

impl Potential {
    /// Pointwise combination over the union of both variable lists.
    pub fn combine(
        &self,
        other: &Potential,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<Potential, PotentialError> {
        let mut vars: Vec<DiscreteVariable> = self.vars.clone();
        for v in &other.vars {
            match self.vars.iter().find(|w| w.name() == v.name()) {
                Some(w) if w.labels() != v.labels() => {
                    return Err(PotentialError::IncompatibleDomains {
                        name: v.name().to_string(),
                        left: w.domain_size(),
                        right: v.domain_size(),
                    });
                }
                Some(_) => {}
                None => vars.push(v.clone()),
            }
        }

        let left = aligned_strides(&vars, self);
        let right = aligned_strides(&vars, other);
        let dims: SmallVec8<usize> = vars.iter().map(DiscreteVariable::domain_size).collect();
        let mut values = Vec::with_capacity(dims.iter().product());
        for_each_index(&dims, |idx| {
            let a = self.values[offset(idx, &left)];
            let b = other.values[offset(idx, &right)];
            values.push(op(a, b));
        });
        Ok(Potential { vars, values })
    }
}

/// Stride of each union axis inside `table`, 0 where `table` lacks the axis.
fn aligned_strides(union: &[DiscreteVariable], table: &Potential) -> SmallVec8<usize> {
    let own = strides(&table.dims());
    union
        .iter()
        .map(|v| table.position(v.name()).map_or(0, |p| own[p]))
        .collect()
}

fn quotient(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

impl Mul for &Potential {
    type Output = Result<Potential, PotentialError>;

    fn mul(self, rhs: &Potential) -> Self::Output {
        self.combine(rhs, |a, b| a * b)
    }
}

/// Division by zero yields 0.
impl Div for &Potential {
    type Output = Result<Potential, PotentialError>;

    fn div(self, rhs: &Potential) -> Self::Output {
        self.combine(rhs, quotient)
    }
}

impl Add for &Potential {
    type Output = Result<Potential, PotentialError>;

    fn add(self, rhs: &Potential) -> Self::Output {
        self.combine(rhs, |a, b| a + b)
    }
}

impl Sub for &Potential {
    type Output = Result<Potential, PotentialError>;

    fn sub(self, rhs: &Potential) -> Self::Output {
        self.combine(rhs, |a, b| a - b)
    }
}
