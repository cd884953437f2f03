use log::*;

use crate::{EGraph, Id, Pattern, Subst, Symbol};

/// A rewrite rule: when the left-hand pattern matches a class, the
/// instantiated right-hand side is united with it.
///
/// Use the [`rewrite!`](crate::rewrite!) macro to build one from
/// pattern strings:
///
/// ```
/// use saturate::rewrite;
///
/// let commute = rewrite!("commute-add"; "(+ ?a ?b)" => "(+ ?b ?a)");
/// assert_eq!(commute.name.as_str(), "commute-add");
/// ```
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// The name of the rewrite, used in logging.
    pub name: Symbol,
    lhs: Pattern,
    rhs: Pattern,
}

impl Rewrite {
    /// Creates a rewrite from two patterns.
    ///
    /// Fails if the right-hand side refers to a variable the left-hand
    /// side never binds; such a rule could never be instantiated.
    pub fn new(name: impl Into<Symbol>, lhs: Pattern, rhs: Pattern) -> Result<Self, String> {
        let name = name.into();
        let bound = lhs.vars();
        for var in rhs.vars() {
            if !bound.contains(&var) {
                return Err(format!("rewrite {} refers to unbound variable {}", name, var));
            }
        }
        Ok(Rewrite { name, lhs, rhs })
    }

    /// The left-hand (searched) pattern.
    pub fn lhs(&self) -> &Pattern {
        &self.lhs
    }

    /// The right-hand (instantiated) pattern.
    pub fn rhs(&self) -> &Pattern {
        &self.rhs
    }
}

impl EGraph {
    /// Applies a rewrite rule once across the whole egraph.
    ///
    /// All matches are collected up front, so they reflect only the
    /// pre-rewrite state; then each match instantiates both sides,
    /// the resulting pairs are united, and
    /// [`restore_invariants`](EGraph::restore_invariants) runs once.
    ///
    /// A single call is not guaranteed to reach fixpoint for rules
    /// that compose with themselves; callers drive saturation by
    /// calling repeatedly.
    pub fn rewrite(&mut self, rule: &Rewrite) {
        debug!("running rewrite '{}'", rule.name);
        let matches = rule.lhs.search(self);
        debug!(
            "rewrite '{}' matched {} classes",
            rule.name,
            matches.len()
        );

        let mut to_unite = Vec::new();
        for m in &matches {
            for subst in &m.substs {
                let lhs = self.instantiate(&rule.lhs, subst);
                let rhs = self.instantiate(&rule.rhs, subst);
                to_unite.push((lhs, rhs));
            }
        }

        let mut n_unions = 0;
        for (lhs, rhs) in to_unite {
            n_unions += self.unite(lhs, rhs) as usize;
        }
        debug!("rewrite '{}' united {} pairs", rule.name, n_unions);

        self.restore_invariants();
    }

    /// Instantiates a pattern under a substitution, adding any terms
    /// not already present, and returns the root's class id.
    ///
    /// Panics if the pattern contains an unbound variable.
    pub fn instantiate(&mut self, pattern: &Pattern, subst: &Subst) -> Id {
        match pattern {
            Pattern::Variable(v) => subst[*v],
            Pattern::Term(name, args) => {
                let children: Vec<Id> = args
                    .iter()
                    .map(|arg| self.instantiate(arg, subst))
                    .collect();
                self.add_operation(*name, children)
            }
        }
    }
}
