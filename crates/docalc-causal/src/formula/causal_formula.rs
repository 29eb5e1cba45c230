//! An estimand bound to its model and query.

use std::fmt;

use docalc_core::config::InferenceConfig;
use docalc_core::errors::InferenceError;
use docalc_core::NameSet;
use docalc_graph::{Potential, VariableElimination};

use super::ast::Expr;
use super::latex::latex_list;
use crate::model::CausalModel;

/// The estimand of `P(on | do(doing), knowing)` in a causal model.
#[derive(Debug, Clone)]
pub struct CausalFormula<'a> {
    model: &'a CausalModel,
    root: Expr,
    on: NameSet,
    doing: NameSet,
    knowing: NameSet,
}

impl<'a> CausalFormula<'a> {
    pub fn new(
        model: &'a CausalModel,
        root: Expr,
        on: NameSet,
        doing: NameSet,
        knowing: NameSet,
    ) -> Self {
        Self {
            model,
            root,
            on,
            doing,
            knowing,
        }
    }

    pub fn model(&self) -> &'a CausalModel {
        self.model
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    pub fn into_root(self) -> Expr {
        self.root
    }

    pub fn on(&self) -> &NameSet {
        &self.on
    }

    pub fn doing(&self) -> &NameSet {
        &self.doing
    }

    pub fn knowing(&self) -> &NameSet {
        &self.knowing
    }

    /// Independent copy of this formula.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Same estimand presented as answering another query. Only the
    /// rendering changes.
    pub fn with_query(mut self, doing: NameSet, knowing: NameSet) -> Self {
        self.doing = doing;
        self.knowing = knowing;
        self
    }

    /// Evaluate against the observational network of the model.
    pub fn eval(&self) -> Result<Potential, InferenceError> {
        self.eval_with(&InferenceConfig::default())
    }

    pub fn eval_with(&self, config: &InferenceConfig) -> Result<Potential, InferenceError> {
        let engine = VariableElimination::with_config(self.model.observational_bn(), config);
        self.root.eval(&engine)
    }

    /// `P(on | do(doing), knowing)` in plain text.
    pub fn query_text(&self) -> String {
        let mut conditions = Vec::new();
        if !self.doing.is_empty() {
            conditions.push(format!("do({})", join(&self.doing, ", ")));
        }
        if !self.knowing.is_empty() {
            conditions.push(join(&self.knowing, ", "));
        }
        if conditions.is_empty() {
            format!("P({})", join(&self.on, ", "))
        } else {
            format!("P({} | {})", join(&self.on, ", "), conditions.join(", "))
        }
    }

    /// LaTeX rendering of the query.
    pub fn latex_query(&self) -> String {
        let mut conditions = Vec::new();
        if !self.doing.is_empty() {
            conditions.push(format!("\\operatorname{{do}}\\left({}\\right)", latex_list(&self.doing)));
        }
        if !self.knowing.is_empty() {
            conditions.push(latex_list(&self.knowing));
        }
        if conditions.is_empty() {
            format!("P\\left({}\\right)", latex_list(&self.on))
        } else {
            format!(
                "P\\left({}\\mid {}\\right)",
                latex_list(&self.on),
                conditions.join(",")
            )
        }
    }

    /// `query = estimand` in LaTeX.
    pub fn to_latex(&self) -> String {
        format!("{} = {}", self.latex_query(), self.root.to_latex())
    }
}

fn join(names: &NameSet, sep: &str) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(sep)
}

impl fmt::Display for CausalFormula<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.query_text(), self.root)
    }
}
