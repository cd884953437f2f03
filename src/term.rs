use std::fmt;
use std::str::FromStr;

use symbolic_expressions::Sexp;

use crate::{Id, Symbol};

/// A term, also known as an e-node.
///
/// The key trick of the e-graph is that a term's children are
/// equivalence *class* ids, not other terms. A term's content after
/// canonicalization is its name plus the union-find roots of its
/// children; the [`EGraph`](crate::EGraph) hash-conses on exactly
/// that, so structurally identical operators over equivalent
/// arguments collapse into one class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    /// The interned operator or leaf name.
    pub name: Symbol,
    /// The child class ids, in argument order.
    pub children: Vec<Id>,
}

impl Term {
    /// Creates a childless term.
    pub fn leaf(name: impl Into<Symbol>) -> Self {
        Self::new(name, vec![])
    }

    /// Creates an operation term over the given child classes.
    pub fn new(name: impl Into<Symbol>, children: impl IntoIterator<Item = Id>) -> Self {
        Term {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Returns `true` if this term has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of children.
    pub fn arity(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if `other` has the same name and arity.
    pub fn matches(&self, other: &Self) -> bool {
        self.name == other.name && self.arity() == other.arity()
    }

    /// Calls `f` on each child id in order.
    pub fn for_each(&self, f: impl FnMut(Id)) {
        self.children.iter().copied().for_each(f)
    }

    /// Rewrites each child id in place through `f`.
    pub fn update_children(&mut self, mut f: impl FnMut(Id) -> Id) {
        for id in &mut self.children {
            *id = f(*id);
        }
    }

    /// Like [`update_children`](Term::update_children), but by value.
    pub fn map_children(mut self, f: impl FnMut(Id) -> Id) -> Self {
        self.update_children(f);
        self
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A recursive expression, flattened into a vector of [`Term`]s.
///
/// Child ids of the contained terms index into the same vector, and
/// every child precedes its parent; the last term is the root. Parse
/// one from an s-expression string and hand it to
/// [`EGraph::add_expr`](crate::EGraph::add_expr):
///
/// ```
/// use saturate::RecExpr;
///
/// let expr: RecExpr = "(+ (+ a b) c)".parse().unwrap();
/// assert_eq!(expr.to_string(), "(+ (+ a b) c)");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecExpr {
    nodes: Vec<Term>,
}

impl RecExpr {
    /// Appends a term whose children must already be in the
    /// expression, returning its index.
    pub fn add(&mut self, term: Term) -> Id {
        debug_assert!(
            term.children.iter().all(|&id| usize::from(id) < self.nodes.len()),
            "a term's children must be added before the term"
        );
        self.nodes.push(term);
        Id::from(self.nodes.len() - 1)
    }

    /// Returns the root id, i.e. the index of the last term.
    ///
    /// Panics if the expression is empty.
    pub fn root(&self) -> Id {
        assert!(!self.nodes.is_empty(), "empty expression has no root");
        Id::from(self.nodes.len() - 1)
    }

    /// Returns `true` if no terms have been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of terms in the expression.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    fn to_sexp(&self, id: Id) -> Sexp {
        let term = &self.nodes[usize::from(id)];
        let name = Sexp::String(term.name.to_string());
        if term.is_leaf() {
            name
        } else {
            let mut vec = vec![name];
            term.for_each(|child| vec.push(self.to_sexp(child)));
            Sexp::List(vec)
        }
    }
}

impl AsRef<[Term]> for RecExpr {
    fn as_ref(&self) -> &[Term] {
        &self.nodes
    }
}

impl fmt::Display for RecExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            write!(f, "()")
        } else {
            write!(f, "{}", self.to_sexp(self.root()))
        }
    }
}

impl FromStr for RecExpr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn parse_sexp_into(sexp: &Sexp, expr: &mut RecExpr) -> Result<Id, String> {
            match sexp {
                Sexp::Empty => Err("found empty s-expression".into()),
                Sexp::String(s) if s.starts_with('?') => {
                    Err(format!("pattern variable {} in an expression", s))
                }
                Sexp::String(s) => Ok(expr.add(Term::leaf(s.as_str()))),
                Sexp::List(list) if list.is_empty() => Err("found empty s-expression".into()),
                Sexp::List(list) => match &list[0] {
                    Sexp::Empty => unreachable!("cannot be in head position"),
                    Sexp::List(l) => Err(format!("found a list in the head position: {:?}", l)),
                    Sexp::String(name) => {
                        let children: Result<Vec<Id>, _> =
                            list[1..].iter().map(|s| parse_sexp_into(s, expr)).collect();
                        Ok(expr.add(Term::new(name.as_str(), children?)))
                    }
                },
            }
        }

        let sexp = symbolic_expressions::parser::parse_str(s.trim()).map_err(|e| e.to_string())?;
        let mut expr = RecExpr::default();
        parse_sexp_into(&sexp, &mut expr)?;
        Ok(expr)
    }
}
