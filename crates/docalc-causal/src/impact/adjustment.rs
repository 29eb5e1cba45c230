//! Closed-form adjustment estimands.

use docalc_core::NameSet;

use crate::formula::Expr;

/// `Σ_z P(y | x, z) · P(z)`.
pub fn backdoor_expression(x: &str, y: &str, z: &NameSet) -> Expr {
    let mut given = z.clone();
    given.insert(x.to_string());
    Expr::sum(
        z,
        Expr::mult(
            Expr::posterior(single(y), given),
            Expr::joint(z.clone()),
        ),
    )
}

/// `Σ_z P(z | x) · Σ_x' P(y | x', z) · P(x')`.
pub fn frontdoor_expression(x: &str, y: &str, z: &NameSet) -> Expr {
    let mut given = z.clone();
    given.insert(x.to_string());
    let inner = Expr::sum(
        &single(x),
        Expr::mult(Expr::posterior(single(y), given), Expr::joint(single(x))),
    );
    Expr::sum(z, Expr::mult(Expr::posterior(z.clone(), single(x)), inner))
}

fn single(name: &str) -> NameSet {
    NameSet::from([name.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use docalc_core::types::names::name_set;

    #[test]
    fn backdoor_shape() {
        let e = backdoor_expression("x", "y", &name_set(["z"]));
        assert_eq!(e.to_string(), "sum_{z}[P(y|x,z) * P(z)]");
        assert_eq!(e.free_variables(), name_set(["x", "y"]));
    }

    #[test]
    fn frontdoor_shape() {
        let e = frontdoor_expression("x", "y", &name_set(["m"]));
        assert_eq!(e.to_string(), "sum_{m}[P(m|x) * sum_{x}[P(y|m,x) * P(x)]]");
        assert_eq!(e.free_variables(), name_set(["x", "y"]));
    }
}
