#![allow(dead_code)]

use std::collections::HashSet;

use saturate::{EGraph, Id};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Checks the invariants that must hold after `restore_invariants`:
/// canonical children, hash-cons uniqueness, parent back-references,
/// idempotent `find`, and every id resolving to a present class.
pub fn assert_invariants(egraph: &EGraph) {
    assert!(egraph.is_clean());

    let mut contents = HashSet::new();
    for class in egraph.classes() {
        assert_eq!(egraph.find(class.id()), class.id());
        assert!(!class.is_empty());

        for leaf in class.iter() {
            let term = egraph.term(leaf);
            assert!(
                contents.insert((term.name, term.children.clone())),
                "two terms share canonical content: {:?}",
                term
            );

            for &child in &term.children {
                assert_eq!(egraph.find(child), child, "child of {:?} not canonical", term);
                let child_class = egraph.get_class(child);
                assert!(
                    child_class.parents().contains(&leaf),
                    "class {} is missing parent back-reference to {:?}",
                    child,
                    term
                );
            }
        }
    }

    for leaf in 0..egraph.total_size() {
        let leaf = Id::from(leaf);
        let root = egraph.find(leaf);
        assert_eq!(egraph.find(root), root);
        // panics if the root has no class
        let _ = egraph.get_class(leaf);
    }
}

/// Returns every pair of leaf ids currently in the same class. Used to
/// check that rewriting only ever grows the equivalence relation.
pub fn canonical_pairs(egraph: &EGraph) -> Vec<(Id, Id)> {
    let n = egraph.total_size();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let (i, j) = (Id::from(i), Id::from(j));
            if egraph.find(i) == egraph.find(j) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
