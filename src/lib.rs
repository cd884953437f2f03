#![warn(missing_docs)]
/*!

`saturate` is a small e-graph library for congruence closure and
equality saturation.

An [`EGraph`] compactly represents many equivalent expressions at once:
terms (named operators over opaque leaf symbols) are hash-consed into
equivalence classes, and asserting one equality with [`EGraph::unite`]
propagates to every congruent context when
[`EGraph::restore_invariants`] runs. Pattern-based rewrite rules
([`Rewrite`]) discover new equalities by e-matching over the graph;
repeated application drives the graph toward saturation.

The engine itself makes no scheduling or extraction decisions: callers
decide which rules to run, in which order, and when to stop.

## Example

```
use saturate::{rewrite, EGraph};

let mut egraph = EGraph::default();
let a = egraph.add_term("a");
let one = egraph.add_term("1");
let a_times_one = egraph.add_operation("*", [a, one]);

let rule = rewrite!("mul-one"; "(* ?x 1)" => "?x");
egraph.rewrite(&rule);

assert_eq!(egraph.find(a_times_one), egraph.find(a));
```

## Logging

Many parts of `saturate` dump useful logging info using the
[`log`](https://docs.rs/log/) crate. The easiest way to see this info
is to use the [`env_logger`](https://docs.rs/env_logger/) crate in your
binary or test, putting `env_logger::init();` near the top of your
`main`. Then set the environment variable `RUST_LOG=saturate=debug`,
or use `info` or `trace` instead of `debug` for less or more logging.

*/

mod macros;

mod dot;
mod eclass;
mod egraph;
mod pattern;
mod rewrite;
mod serialize;
mod subst;
mod term;
mod unionfind;
mod util;

use serde::{Deserialize, Serialize};

/// A key to identify equivalence classes within an [`EGraph`].
///
/// Two flavors of `Id` coexist: the *leaf* id returned when a term was
/// first added, and the *canonical* id obtained from [`EGraph::find`].
/// Every operation on [`EGraph`] accepts either flavor; an id stays
/// valid as an input to `find` for the life of the graph, though its
/// canonical value may change after a [`unite`](EGraph::unite).
#[derive(Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u32);

impl From<usize> for Id {
    fn from(n: usize) -> Id {
        Id(n as u32)
    }
}

impl From<Id> for usize {
    fn from(id: Id) -> usize {
        id.0 as usize
    }
}

impl std::fmt::Debug for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub use {
    dot::Dot,
    eclass::EClass,
    egraph::EGraph,
    pattern::{Pattern, SearchMatches},
    rewrite::Rewrite,
    serialize::{ClassDTO, GraphDTO, SerializationError, TermDTO},
    subst::{Subst, Var},
    term::{RecExpr, Term},
    unionfind::UnionFind,
    util::Symbol,
};

#[cfg(test)]
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
