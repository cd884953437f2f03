use crate::util::concat_vecs;
use crate::Id;

/// An equivalence class of [`Term`](crate::Term)s.
///
/// Both the member terms and the parent back-references are stored as
/// *leaf* ids into the graph's term table; resolve them with
/// [`EGraph::term`](crate::EGraph::term). Parents are the terms
/// elsewhere in the graph that list this class among their children —
/// they are the ones whose hash-cons keys go stale when this class
/// merges away.
#[derive(Debug, Clone)]
pub struct EClass {
    pub(crate) id: Id,
    pub(crate) terms: Vec<Id>,
    pub(crate) parents: Vec<Id>,
}

impl EClass {
    pub(crate) fn new(id: Id, seed: Id) -> Self {
        EClass {
            id,
            terms: vec![seed],
            parents: vec![],
        }
    }

    /// This class's id, canonical at the time of construction.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the number of terms in this class.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the class has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the leaf ids of the terms in this class.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Id> + '_ {
        self.terms.iter().copied()
    }

    /// The leaf ids of the terms that reference this class as a child.
    ///
    /// Duplicates may appear between calls to
    /// [`EGraph::restore_invariants`](crate::EGraph::restore_invariants).
    pub fn parents(&self) -> &[Id] {
        &self.parents
    }

    pub(crate) fn add_parent(&mut self, leaf: Id) {
        self.parents.push(leaf);
    }

    /// Absorbs `other`'s terms and parents. The caller guarantees
    /// `other` is a different class.
    pub(crate) fn absorb(&mut self, other: EClass) {
        debug_assert_ne!(self.id, other.id);
        concat_vecs(&mut self.terms, other.terms);
        concat_vecs(&mut self.parents, other.parents);
    }
}
