use crate::Id;

/// A disjoint-set forest over class [`Id`]s.
///
/// [`EGraph`](crate::EGraph) layers the hash-cons and the class table
/// on top of this; most users never touch it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnionFind {
    parents: Vec<Id>,
}

impl UnionFind {
    /// Creates a fresh self-parented element and returns its id, which
    /// equals the previous size of the table.
    pub fn make_set(&mut self) -> Id {
        let id = Id::from(self.parents.len());
        self.parents.push(id);
        id
    }

    /// Returns the number of elements ever created.
    pub fn size(&self) -> usize {
        self.parents.len()
    }

    fn parent(&self, query: Id) -> Id {
        self.parents[usize::from(query)]
    }

    /// Finds the root of `current` without modifying the forest.
    pub fn find(&self, mut current: Id) -> Id {
        while current != self.parent(current) {
            current = self.parent(current);
        }
        current
    }

    /// Finds the root of `current`, halving the path along the way:
    /// every visited element is redirected to its grandparent.
    pub fn find_mut(&mut self, mut current: Id) -> Id {
        while current != self.parent(current) {
            let grandparent = self.parent(self.parent(current));
            self.parents[usize::from(current)] = grandparent;
            current = grandparent;
        }
        current
    }

    /// Given two distinct roots, unions the two sets making `root1`
    /// the new root.
    pub fn union(&mut self, root1: Id, root2: Id) -> Id {
        debug_assert_eq!(root1, self.find(root1));
        debug_assert_eq!(root2, self.find(root2));
        debug_assert_ne!(root1, root2);
        self.parents[usize::from(root2)] = root1;
        root1
    }

    pub(crate) fn parents(&self) -> &[Id] {
        &self.parents
    }

    pub(crate) fn from_parent_table(parents: Vec<Id>) -> Self {
        UnionFind { parents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_find() {
        let n = 10;
        let id = Id::from;

        let mut uf = UnionFind::default();
        for _ in 0..n {
            uf.make_set();
        }

        // test the initial condition of everyone in their own set
        assert_eq!(uf.parents, (0..n).map(id).collect::<Vec<_>>());

        // build up one set
        uf.union(id(0), id(1));
        uf.union(id(0), id(2));
        uf.union(id(0), id(3));

        // build up another set
        uf.union(id(6), id(7));
        uf.union(id(6), id(8));
        uf.union(id(6), id(9));

        for i in 0..n {
            uf.find_mut(id(i));
        }

        // indexes:         0, 1, 2, 3, 4, 5, 6, 7, 8, 9
        let expected = vec![0, 0, 0, 0, 4, 5, 6, 6, 6, 6];
        assert_eq!(uf.parents, expected.into_iter().map(id).collect::<Vec<_>>());
    }

    #[test]
    fn path_halving() {
        let id = Id::from;

        // chain 3 -> 2 -> 1 -> 0
        let mut uf = UnionFind::default();
        for _ in 0..4 {
            uf.make_set();
        }
        uf.union(id(2), id(3));
        uf.union(id(1), id(2));
        uf.union(id(0), id(1));

        assert_eq!(uf.find(id(3)), id(0));
        // the immutable walk leaves the chain alone
        assert_eq!(uf.parents, vec![id(0), id(0), id(1), id(2)]);

        assert_eq!(uf.find_mut(id(3)), id(0));
        // halving redirected 3 past its parent
        assert_eq!(uf.parents, vec![id(0), id(0), id(1), id(1)]);
        assert_eq!(uf.find_mut(id(3)), id(0));
        assert_eq!(uf.parents, vec![id(0), id(0), id(1), id(0)]);
    }
}
