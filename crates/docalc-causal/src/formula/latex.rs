//! LaTeX rendering.

use docalc_core::NameSet;

use super::ast::Expr;

/// Escape a variable name for LaTeX.
pub(crate) fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '_' | '&' | '%' | '$' | '#' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn latex_list(vars: &NameSet) -> String {
    vars.iter()
        .map(|v| escape(v))
        .collect::<Vec<_>>()
        .join(",")
}

impl Expr {
    /// LaTeX rendering of the expression.
    pub fn to_latex(&self) -> String {
        match self {
            Expr::Joint(vars) if vars.is_empty() => "1".to_string(),
            Expr::Joint(vars) => format!("P\\left({}\\right)", latex_list(vars)),
            Expr::Posterior { targets, given } => format!(
                "P\\left({}\\mid {}\\right)",
                latex_list(targets),
                latex_list(given)
            ),
            Expr::Sum { vars, term } => {
                format!("\\sum_{{{}}}{{{}}}", latex_list(vars), term.to_latex())
            }
            Expr::Mult(a, b) => format!("{} \\cdot {}", factor(a), factor(b)),
            Expr::Div(a, b) => format!("\\frac{{{}}}{{{}}}", a.to_latex(), b.to_latex()),
            Expr::Plus(a, b) => format!("{} + {}", a.to_latex(), b.to_latex()),
            Expr::Minus(a, b) => format!("{} - {}", a.to_latex(), factor(b)),
        }
    }
}

fn factor(e: &Expr) -> String {
    if e.is_additive() {
        format!("\\left({}\\right)", e.to_latex())
    } else {
        e.to_latex()
    }
}
