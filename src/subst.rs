use std::fmt;
use std::str::FromStr;

use crate::{Id, Symbol};

/// A pattern variable, written with a leading `?`.
///
/// ```
/// use saturate::Var;
///
/// let var: Var = "?x".parse().unwrap();
/// assert_eq!(var.to_string(), "?x");
/// assert!("x".parse::<Var>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(Symbol);

impl FromStr for Var {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('?') && s.len() > 1 {
            Ok(Var(s.into()))
        } else {
            Err(format!("{} doesn't start with '?'", s))
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A substitution mapping [`Var`]s to canonical class [`Id`]s.
///
/// Matching threads these through the pattern left to right; each
/// branch of the search owns its copy, so sibling matches never see
/// each other's bindings.
#[derive(Debug, Default, Clone)]
pub struct Subst {
    vec: smallvec::SmallVec<[(Var, Id); 3]>,
}

impl Subst {
    /// Inserts a binding, returning the old `Id` if present.
    pub fn insert(&mut self, var: Var, id: Id) -> Option<Id> {
        for pair in &mut self.vec {
            if pair.0 == var {
                return Some(std::mem::replace(&mut pair.1, id));
            }
        }
        self.vec.push((var, id));
        None
    }

    /// Retrieves the binding for `var`, if any.
    pub fn get(&self, var: Var) -> Option<Id> {
        self.vec
            .iter()
            .find_map(|&(v, id)| if v == var { Some(id) } else { None })
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }
}

impl std::ops::Index<Var> for Subst {
    type Output = Id;

    fn index(&self, var: Var) -> &Self::Output {
        self.vec
            .iter()
            .find_map(|(v, id)| if *v == var { Some(id) } else { None })
            .unwrap_or_else(|| panic!("var {} not found in {:?}", var, self))
    }
}
