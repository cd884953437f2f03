use std::fmt;
use std::str::FromStr;

use log::*;
use symbolic_expressions::Sexp;

use crate::{EGraph, Id, Subst, Symbol, Var};

/// A syntactic pattern to match against an [`EGraph`].
///
/// A pattern is either a [`Var`] or an operator applied to
/// sub-patterns. Patterns parse from s-expressions, with `?`-prefixed
/// atoms as variables:
///
/// ```
/// use saturate::Pattern;
///
/// let pat: Pattern = "(* (+ ?x ?y) ?z)".parse().unwrap();
/// assert_eq!(pat.vars().len(), 3);
/// assert_eq!(pat.to_string(), "(* (+ ?x ?y) ?z)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A pattern variable, binding a whole class.
    Variable(Var),
    /// An operator name applied to argument patterns.
    Term(Symbol, Vec<Pattern>),
}

/// The result of searching one eclass for a [`Pattern`]: the canonical
/// id of the class and every substitution under which it matched.
#[derive(Debug, Clone)]
pub struct SearchMatches {
    /// The canonical id of the matched class.
    pub eclass: Id,
    /// The satisfying substitutions, one per match.
    pub substs: Vec<Subst>,
}

impl Pattern {
    /// Creates a childless term pattern.
    pub fn leaf(name: impl Into<Symbol>) -> Self {
        Pattern::Term(name.into(), vec![])
    }

    /// Creates an operation pattern over the given argument patterns.
    pub fn term(name: impl Into<Symbol>, args: Vec<Pattern>) -> Self {
        Pattern::Term(name.into(), args)
    }

    /// Returns the distinct variables of this pattern, in first-use
    /// order.
    pub fn vars(&self) -> Vec<Var> {
        fn walk(pattern: &Pattern, out: &mut Vec<Var>) {
            match pattern {
                Pattern::Variable(v) => {
                    if !out.contains(v) {
                        out.push(*v);
                    }
                }
                Pattern::Term(_, args) => {
                    for arg in args {
                        walk(arg, out);
                    }
                }
            }
        }
        let mut vars = Vec::new();
        walk(self, &mut vars);
        vars
    }

    /// Searches the whole egraph, returning matches for each class in
    /// which this pattern holds at least once.
    pub fn search(&self, egraph: &EGraph) -> Vec<SearchMatches> {
        egraph
            .classes()
            .filter_map(|class| self.search_eclass(egraph, class.id()))
            .collect()
    }

    /// Searches one eclass, returning `None` if nothing matched.
    pub fn search_eclass(&self, egraph: &EGraph, eclass: Id) -> Option<SearchMatches> {
        let substs = self.search_pat(egraph, eclass, Subst::default());
        trace!("pattern {} on {}: {} matches", self, eclass, substs.len());
        if substs.is_empty() {
            None
        } else {
            Some(SearchMatches {
                eclass: egraph.find(eclass),
                substs,
            })
        }
    }

    fn search_pat(&self, egraph: &EGraph, eclass: Id, mut subst: Subst) -> Vec<Subst> {
        let root = egraph.find(eclass);

        let (name, args) = match self {
            Pattern::Variable(v) => {
                return match subst.get(*v) {
                    // a repeated variable must land in the same class
                    Some(bound) => {
                        if egraph.find(bound) == root {
                            vec![subst]
                        } else {
                            vec![]
                        }
                    }
                    None => {
                        subst.insert(*v, root);
                        vec![subst]
                    }
                };
            }
            Pattern::Term(name, args) => (name, args),
        };

        let mut matches = Vec::new();
        for leaf in egraph.get_class(root).iter() {
            let term = egraph.term(leaf);
            if term.name != *name || term.arity() != args.len() {
                continue;
            }

            // thread the environment left to right so earlier bindings
            // constrain later ones
            let mut done = vec![subst.clone()];
            let mut next = Vec::new();
            for (arg, &child) in args.iter().zip(&term.children) {
                std::mem::swap(&mut done, &mut next);
                for s in next.drain(..) {
                    done.extend(arg.search_pat(egraph, child, s));
                }
                if done.is_empty() {
                    break;
                }
            }
            matches.extend(done);
        }
        matches
    }

    fn to_sexp(&self) -> Sexp {
        match self {
            Pattern::Variable(v) => Sexp::String(v.to_string()),
            Pattern::Term(name, args) => {
                if args.is_empty() {
                    Sexp::String(name.to_string())
                } else {
                    let mut vec = vec![Sexp::String(name.to_string())];
                    vec.extend(args.iter().map(Pattern::to_sexp));
                    Sexp::List(vec)
                }
            }
        }
    }
}

impl From<Var> for Pattern {
    fn from(var: Var) -> Self {
        Pattern::Variable(var)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sexp())
    }
}

impl FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn parse_sexp(sexp: &Sexp) -> Result<Pattern, String> {
            match sexp {
                Sexp::Empty => Err("found empty s-expression".into()),
                Sexp::String(s) if s.starts_with('?') => Ok(Pattern::Variable(s.parse()?)),
                Sexp::String(s) => Ok(Pattern::leaf(s.as_str())),
                Sexp::List(list) if list.is_empty() => Err("found empty s-expression".into()),
                Sexp::List(list) => match &list[0] {
                    Sexp::Empty => unreachable!("cannot be in head position"),
                    Sexp::List(l) => Err(format!("found a list in the head position: {:?}", l)),
                    Sexp::String(s) if s.starts_with('?') => {
                        Err(format!("variable {} cannot be applied to arguments", s))
                    }
                    Sexp::String(name) => {
                        let args: Result<Vec<Pattern>, _> =
                            list[1..].iter().map(parse_sexp).collect();
                        Ok(Pattern::term(name.as_str(), args?))
                    }
                },
            }
        }

        let sexp = symbolic_expressions::parser::parse_str(s.trim()).map_err(|e| e.to_string())?;
        parse_sexp(&sexp)
    }
}
