use hashbrown::hash_map::Entry;
use log::*;

use crate::util::{HashMap, IndexMap};
use crate::{Dot, EClass, Id, RecExpr, Symbol, Term, UnionFind};

/** A data structure to keep track of equalities between expressions.

An `EGraph` is three structures kept consistent with each other:

- a [`UnionFind`] over class ids, recording which classes have merged;
- a term table mapping each term's *leaf* id to the term itself, with a
  hash-cons index from canonicalized term content back to the leaf id;
- the class table, mapping each canonical id to its [`EClass`].

[`add_term`](EGraph::add_term) and
[`add_operation`](EGraph::add_operation) hash-cons new terms,
[`unite`](EGraph::unite) asserts an equality, and
[`restore_invariants`](EGraph::restore_invariants) repairs congruence
afterwards. [`rewrite`](EGraph::rewrite) bundles e-matching, union
scheduling, and repair for one rule.

# Example

```
use saturate::EGraph;

let mut egraph = EGraph::default();
let x = egraph.add_term("x");
let y = egraph.add_term("y");
assert_ne!(egraph.find(x), egraph.find(y));

egraph.unite(x, y);
egraph.restore_invariants();
assert_eq!(egraph.find(x), egraph.find(y));
```
**/
#[derive(Debug, Clone, Default)]
pub struct EGraph {
    pub(crate) unionfind: UnionFind,
    /// Leaf id to term. Children are rewritten to their union-find
    /// roots as invariants are restored, so `nodes[leaf]` always
    /// equals the hash-cons key the leaf was last filed under.
    pub(crate) nodes: Vec<Term>,
    /// Canonicalized term content to leaf id.
    pub(crate) memo: HashMap<Term, Id>,
    pub(crate) classes: IndexMap<Id, EClass>,
    /// Leaf ids whose hash-cons keys may have gone stale.
    pub(crate) pending: Vec<Id>,
}

impl EGraph {
    /// Adds a childless term with the given name.
    pub fn add_term(&mut self, name: impl Into<Symbol>) -> Id {
        self.add(Term::leaf(name))
    }

    /// Adds an operation term over the given child classes.
    pub fn add_operation(
        &mut self,
        name: impl Into<Symbol>,
        children: impl IntoIterator<Item = Id>,
    ) -> Id {
        self.add(Term::new(name, children))
    }

    /// Adds a term to the egraph, returning the id of the class that
    /// represents it.
    ///
    /// The term's children are canonicalized first; if a term with the
    /// same canonical content is already present, its id is returned
    /// and the graph is unchanged. Otherwise the term gets a fresh
    /// class and is registered as a parent of each child class.
    ///
    /// Panics if a child id does not resolve to a present class.
    pub fn add(&mut self, term: Term) -> Id {
        let term = term.map_children(|id| self.find(id));
        for &child in &term.children {
            assert!(
                self.classes.contains_key(&child),
                "no class for child id {}",
                child
            );
        }

        if let Some(&existing) = self.memo.get(&term) {
            trace!("adding (found {}): {:?}", existing, term);
            return existing;
        }

        let id = self.unionfind.make_set();
        debug_assert_eq!(usize::from(id), self.nodes.len());
        trace!("adding {}: {:?}", id, term);

        for &child in &term.children {
            // children are canonical here
            self.classes.get_mut(&child).unwrap().add_parent(id);
        }

        self.classes.insert(id, EClass::new(id, id));
        self.nodes.push(term.clone());
        self.memo.insert(term, id);
        self.pending.push(id);
        id
    }

    /// Adds every term of `expr`, child before parent, returning the
    /// id of the root.
    ///
    /// Panics if the expression is empty.
    pub fn add_expr(&mut self, expr: &RecExpr) -> Id {
        assert!(!expr.is_empty(), "cannot add an empty expression");
        let mut ids: Vec<Id> = Vec::with_capacity(expr.len());
        for term in expr.as_ref() {
            let term = term.clone().map_children(|i| ids[usize::from(i)]);
            ids.push(self.add(term));
        }
        *ids.last().unwrap()
    }

    /// Looks up the class of a term without adding it.
    pub fn lookup(&self, term: Term) -> Option<Id> {
        let term = term.map_children(|id| self.find(id));
        self.memo.get(&term).copied()
    }

    /// Canonicalizes a class id.
    pub fn find(&self, id: Id) -> Id {
        self.unionfind.find(id)
    }

    /// Like [`find`](EGraph::find), but compresses paths as it goes.
    pub fn find_mut(&mut self, id: Id) -> Id {
        self.unionfind.find_mut(id)
    }

    /// Asserts that `a` and `b` are equal, merging their classes.
    ///
    /// Returns `true` if a merge actually occurred, `false` if the two
    /// ids were already in the same class. The ids need not be
    /// canonical. Callers must eventually run
    /// [`restore_invariants`](EGraph::restore_invariants) to restore
    /// congruence.
    pub fn unite(&mut self, a: Id, b: Id) -> bool {
        let mut root1 = self.unionfind.find_mut(a);
        let mut root2 = self.unionfind.find_mut(b);
        if root1 == root2 {
            return false;
        }

        // keep the class with more parents alive, leaving less dirty work
        if self.classes[&root1].parents.len() < self.classes[&root2].parents.len() {
            std::mem::swap(&mut root1, &mut root2);
        }

        trace!("uniting {} <- {}", root1, root2);
        self.unionfind.union(root1, root2);

        let dead = self.classes.shift_remove(&root2).unwrap();
        self.pending.extend_from_slice(&dead.parents);
        self.classes.get_mut(&root1).unwrap().absorb(dead);
        true
    }

    /// Restores the egraph invariants after a batch of
    /// [`unite`](EGraph::unite)s: every child id canonical, at most
    /// one term per canonical content, congruent terms in one class.
    ///
    /// Works a dirty list of terms whose child classes may have
    /// merged. Re-canonicalizing such a term can make it collide with
    /// an existing hash-cons entry, in which case the two owning
    /// classes merge as well, which dirties *their* parents; the loop
    /// runs until no term is left to repair. Each class's term and
    /// parent lists are then sorted and deduplicated.
    pub fn restore_invariants(&mut self) {
        let mut n_unions = 0;

        while let Some(leaf) = self.pending.pop() {
            // the hash-cons key depends on canonical children, so the
            // stale entry must come out before the children change
            let stale = self.nodes[usize::from(leaf)].clone();
            self.memo.remove(&stale);

            let uf = &mut self.unionfind;
            let node = &mut self.nodes[usize::from(leaf)];
            node.update_children(|id| uf.find_mut(id));
            let node = node.clone();

            let congruent = match self.memo.entry(node) {
                Entry::Occupied(entry) => Some(*entry.get()),
                Entry::Vacant(entry) => {
                    entry.insert(leaf);
                    None
                }
            };

            if let Some(other) = congruent {
                n_unions += self.unite(other, leaf) as usize;
            }
        }

        self.rebuild_classes();

        debug!(
            "restored invariants: {} congruent unions, {} classes, {} terms",
            n_unions,
            self.classes.len(),
            self.memo.len()
        );
    }

    fn rebuild_classes(&mut self) {
        let nodes = &self.nodes;
        for class in self.classes.values_mut() {
            class.terms.sort_unstable_by(|&a, &b| {
                nodes[usize::from(a)]
                    .cmp(&nodes[usize::from(b)])
                    .then(a.cmp(&b))
            });
            class
                .terms
                .dedup_by(|a, b| nodes[usize::from(*a)] == nodes[usize::from(*b)]);

            class.parents.sort_unstable();
            class.parents.dedup();
        }
    }

    /// Returns `true` if no terms have been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if there is no repair work pending, i.e. the
    /// invariants hold.
    pub fn is_clean(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the number of equivalence classes.
    pub fn number_of_classes(&self) -> usize {
        self.classes.len()
    }

    /// Returns the number of terms ever added.
    pub fn total_size(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over the classes, in insertion order.
    pub fn classes(&self) -> impl ExactSizeIterator<Item = &EClass> {
        self.classes.values()
    }

    /// Returns the class that `id` belongs to.
    ///
    /// Panics if `id` was never returned from an `add`.
    pub fn get_class(&self, id: Id) -> &EClass {
        let root = self.find(id);
        self.classes
            .get(&root)
            .unwrap_or_else(|| panic!("no class for id {}", id))
    }

    /// Resolves a term's leaf id, as stored in [`EClass`] term and
    /// parent lists.
    pub fn term(&self, leaf: Id) -> &Term {
        &self.nodes[usize::from(leaf)]
    }

    /// Iterates over the terms of the class that `id` belongs to.
    pub fn class_terms(&self, id: Id) -> impl ExactSizeIterator<Item = &Term> {
        self.get_class(id).terms.iter().map(|&leaf| self.term(leaf))
    }

    /// Creates a [`Dot`] to visualize this egraph.
    pub fn dot(&self) -> Dot<'_> {
        Dot::new(self)
    }
}
