//! Expression trees over probability terms of the observational model.

use std::fmt;

use docalc_core::errors::InferenceError;
use docalc_core::NameSet;
use docalc_graph::{ExactInference, Potential};
use serde::Serialize;

/// A symbolic probability expression.
///
/// `Joint` and `Posterior` are queries on the observational distribution;
/// the remaining variants combine tables. Each node owns its children, so
/// cloning deep-copies the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// `P(vars)`; the empty set denotes the constant 1.
    Joint(NameSet),
    /// `P(targets | given)`.
    Posterior { targets: NameSet, given: NameSet },
    /// `Σ_vars term`.
    Sum { vars: NameSet, term: Box<Expr> },
    Mult(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn joint(vars: NameSet) -> Self {
        Expr::Joint(vars)
    }

    /// `P(targets | given)`, or `P(targets)` when `given` is empty.
    pub fn posterior(targets: NameSet, given: NameSet) -> Self {
        if given.is_empty() {
            Expr::Joint(targets)
        } else {
            Expr::Posterior { targets, given }
        }
    }

    /// `Σ_vars term`, restricted to the free variables of `term`.
    ///
    /// Summing a joint yields the smaller joint and nested sums merge.
    pub fn sum(vars: &NameSet, term: Expr) -> Self {
        let free = term.free_variables();
        let vars: NameSet = vars.intersection(&free).cloned().collect();
        if vars.is_empty() {
            return term;
        }
        match term {
            Expr::Joint(all) => Expr::Joint(all.difference(&vars).cloned().collect()),
            Expr::Sum { vars: inner, term } => Expr::Sum {
                vars: inner.union(&vars).cloned().collect(),
                term,
            },
            term => Expr::Sum {
                vars,
                term: Box::new(term),
            },
        }
    }

    pub fn mult(left: Expr, right: Expr) -> Self {
        Expr::Mult(Box::new(left), Box::new(right))
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Expr::Div(Box::new(left), Box::new(right))
    }

    pub fn plus(left: Expr, right: Expr) -> Self {
        Expr::Plus(Box::new(left), Box::new(right))
    }

    pub fn minus(left: Expr, right: Expr) -> Self {
        Expr::Minus(Box::new(left), Box::new(right))
    }

    /// Left-nested product of `factors`; the constant 1 when empty.
    pub fn product<I: IntoIterator<Item = Expr>>(factors: I) -> Self {
        factors
            .into_iter()
            .reduce(Expr::mult)
            .unwrap_or_else(|| Expr::Joint(NameSet::new()))
    }

    /// Variables the value of this expression depends on.
    pub fn free_variables(&self) -> NameSet {
        match self {
            Expr::Joint(vars) => vars.clone(),
            Expr::Posterior { targets, given } => targets.union(given).cloned().collect(),
            Expr::Sum { vars, term } => term.free_variables().difference(vars).cloned().collect(),
            Expr::Mult(a, b) | Expr::Div(a, b) | Expr::Plus(a, b) | Expr::Minus(a, b) => {
                let mut out = a.free_variables();
                out.extend(b.free_variables());
                out
            }
        }
    }

    /// Evaluate against an exact-inference engine.
    pub fn eval(&self, engine: &dyn ExactInference) -> Result<Potential, InferenceError> {
        match self {
            Expr::Joint(vars) => engine.joint(vars),
            Expr::Posterior { targets, given } => engine.posterior(targets, given),
            Expr::Sum { vars, term } => Ok(term.eval(engine)?.sum_out(vars)),
            Expr::Mult(a, b) => Ok((&a.eval(engine)? * &b.eval(engine)?)?),
            Expr::Div(a, b) => Ok((&a.eval(engine)? / &b.eval(engine)?)?),
            Expr::Plus(a, b) => Ok((&a.eval(engine)? + &b.eval(engine)?)?),
            Expr::Minus(a, b) => Ok((&a.eval(engine)? - &b.eval(engine)?)?),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::Joint(_) | Expr::Posterior { .. } => 1,
            Expr::Sum { term, .. } => 1 + term.size(),
            Expr::Mult(a, b) | Expr::Div(a, b) | Expr::Plus(a, b) | Expr::Minus(a, b) => {
                1 + a.size() + b.size()
            }
        }
    }

    pub(crate) fn is_atom(&self) -> bool {
        matches!(self, Expr::Joint(_) | Expr::Posterior { .. })
    }

    pub(crate) fn is_additive(&self) -> bool {
        matches!(self, Expr::Plus(..) | Expr::Minus(..))
    }
}

fn list(vars: &NameSet) -> String {
    vars.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

struct Operand<'e> {
    expr: &'e Expr,
    wrap: bool,
}

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wrap {
            write!(f, "({})", self.expr)
        } else {
            write!(f, "{}", self.expr)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Joint(vars) if vars.is_empty() => write!(f, "1"),
            Expr::Joint(vars) => write!(f, "P({})", list(vars)),
            Expr::Posterior { targets, given } => {
                write!(f, "P({}|{})", list(targets), list(given))
            }
            Expr::Sum { vars, term } => write!(f, "sum_{{{}}}[{}]", list(vars), term),
            Expr::Mult(a, b) => write!(
                f,
                "{} * {}",
                Operand { expr: a, wrap: a.is_additive() },
                Operand { expr: b, wrap: b.is_additive() }
            ),
            Expr::Div(a, b) => write!(
                f,
                "{} / {}",
                Operand { expr: a, wrap: !a.is_atom() },
                Operand { expr: b, wrap: !b.is_atom() }
            ),
            Expr::Plus(a, b) => write!(f, "{a} + {b}"),
            Expr::Minus(a, b) => write!(
                f,
                "{a} - {}",
                Operand { expr: b, wrap: b.is_additive() }
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docalc_core::types::names::name_set;

    #[test]
    fn summing_a_joint_shrinks_it() {
        let e = Expr::sum(&name_set(["z"]), Expr::joint(name_set(["y", "z"])));
        assert_eq!(e, Expr::joint(name_set(["y"])));
    }

    #[test]
    fn sums_ignore_bound_and_absent_variables() {
        let term = Expr::posterior(name_set(["y"]), name_set(["x"]));
        assert_eq!(Expr::sum(&name_set(["w"]), term.clone()), term);
        let nested = Expr::sum(
            &name_set(["x"]),
            Expr::sum(&name_set(["y"]), Expr::mult(term.clone(), Expr::joint(name_set(["y"])))),
        );
        match nested {
            Expr::Sum { vars, .. } => assert_eq!(vars, name_set(["x", "y"])),
            other => panic!("expected a sum, got {other}"),
        }
    }

    #[test]
    fn display_is_compact() {
        let z = name_set(["z"]);
        let e = Expr::sum(
            &z,
            Expr::mult(
                Expr::posterior(name_set(["y"]), name_set(["x", "z"])),
                Expr::joint(z.clone()),
            ),
        );
        assert_eq!(e.to_string(), "sum_{z}[P(y|x,z) * P(z)]");
        assert_eq!(e.free_variables(), name_set(["x", "y"]));
        assert_eq!(Expr::product(Vec::new()).to_string(), "1");
        let q = Expr::div(Expr::joint(name_set(["a"])), Expr::mult(Expr::joint(z.clone()), Expr::joint(z)));
        assert_eq!(q.to_string(), "P(a) / (P(z) * P(z))");
    }
}
