//! Symbolic estimands.

mod ast;
mod causal_formula;
mod latex;

pub use ast::Expr;
pub use causal_formula::CausalFormula;
