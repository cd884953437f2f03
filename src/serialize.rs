use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{HashMap, IndexMap};
use crate::{EClass, EGraph, Id, Term, UnionFind};

/// The error produced when decoding an [`EGraph`] from bytes or a
/// [`GraphDTO`] that does not describe a well-formed graph. No partial
/// graph is ever returned.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The data was truncated, unreadable, or internally inconsistent.
    #[error("invalid graph format: {0}")]
    InvalidFormat(String),
}

impl From<bincode::Error> for SerializationError {
    fn from(e: bincode::Error) -> Self {
        SerializationError::InvalidFormat(e.to_string())
    }
}

fn invalid(msg: impl Into<String>) -> SerializationError {
    SerializationError::InvalidFormat(msg.into())
}

/// One serialized term: its leaf id, name, and child class ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDTO {
    /// The term's leaf id.
    pub leaf_id: Id,
    /// The operator or leaf name.
    pub name: String,
    /// The child class ids, in argument order.
    pub children: Vec<Id>,
}

/// One serialized class: its id plus its term and parent lists, both
/// as term leaf ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDTO {
    /// The class id.
    pub class_id: Id,
    /// Leaf ids of the member terms.
    pub term_ids: Vec<Id>,
    /// Leaf ids of the parent terms.
    pub parent_ids: Vec<Id>,
}

/// The plain-data image of an [`EGraph`], the unit of (de)serialization.
///
/// The wire encoding is [`bincode`](https://docs.rs/bincode)'s default:
/// little-endian fixed-size integers with length-prefixed sequences.
/// The deserialized graph is canonical if and only if
/// [`restore_invariants`](EGraph::restore_invariants) had been called
/// before serialization; the dirty worklist itself is not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDTO {
    /// The union-find parent table, indexed by id.
    pub union_find: Vec<Id>,
    /// Every term in the graph, keyed by leaf id.
    pub terms: Vec<TermDTO>,
    /// Every equivalence class.
    pub classes: Vec<ClassDTO>,
}

impl EGraph {
    /// Copies this egraph into its plain-data image.
    pub fn to_dto(&self) -> GraphDTO {
        GraphDTO {
            union_find: self.unionfind.parents().to_vec(),
            terms: self
                .nodes
                .iter()
                .enumerate()
                .map(|(leaf, term)| TermDTO {
                    leaf_id: Id::from(leaf),
                    name: term.name.as_str().to_owned(),
                    children: term.children.clone(),
                })
                .collect(),
            classes: self
                .classes()
                .map(|class| ClassDTO {
                    class_id: class.id(),
                    term_ids: class.terms.clone(),
                    parent_ids: class.parents.clone(),
                })
                .collect(),
        }
    }

    /// Serializes this egraph to bytes.
    ///
    /// ```
    /// use saturate::EGraph;
    ///
    /// let mut egraph = EGraph::default();
    /// let x = egraph.add_term("x");
    /// let y = egraph.add_term("y");
    /// egraph.unite(x, y);
    /// egraph.restore_invariants();
    ///
    /// let bytes = egraph.to_bytes().unwrap();
    /// let copy = EGraph::from_bytes(&bytes).unwrap();
    /// assert_eq!(copy.find(x), copy.find(y));
    /// ```
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        Ok(bincode::serialize(&self.to_dto())?)
    }

    /// Deserializes an egraph from bytes produced by
    /// [`to_bytes`](EGraph::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<EGraph, SerializationError> {
        let dto: GraphDTO = bincode::deserialize(bytes)?;
        EGraph::from_dto(&dto)
    }

    /// Reconstructs an egraph from its plain-data image, validating it
    /// completely first.
    pub fn from_dto(dto: &GraphDTO) -> Result<EGraph, SerializationError> {
        let size = dto.union_find.len();
        let check = |id: Id, what: &str| {
            if usize::from(id) < size {
                Ok(())
            } else {
                Err(invalid(format!("{} {} out of range", what, id)))
            }
        };

        for &parent in &dto.union_find {
            check(parent, "union-find parent")?;
        }

        // rebind terms by leaf id; every slot must be filled exactly once
        if dto.terms.len() != size {
            return Err(invalid(format!(
                "expected {} terms, found {}",
                size,
                dto.terms.len()
            )));
        }
        let mut slots: Vec<Option<Term>> = vec![None; size];
        for term in &dto.terms {
            check(term.leaf_id, "term leaf id")?;
            for &child in &term.children {
                check(child, "term child id")?;
            }
            let slot = &mut slots[usize::from(term.leaf_id)];
            if slot.is_some() {
                return Err(invalid(format!("duplicate term leaf id {}", term.leaf_id)));
            }
            *slot = Some(Term::new(term.name.as_str(), term.children.iter().copied()));
        }
        let nodes: Vec<Term> = slots.into_iter().map(Option::unwrap).collect();

        let mut classes: IndexMap<Id, EClass> = IndexMap::default();
        for class in &dto.classes {
            check(class.class_id, "class id")?;
            for &leaf in class.term_ids.iter().chain(&class.parent_ids) {
                check(leaf, "class member leaf id")?;
            }
            let rebuilt = EClass {
                id: class.class_id,
                terms: class.term_ids.clone(),
                parents: class.parent_ids.clone(),
            };
            if classes.insert(class.class_id, rebuilt).is_some() {
                return Err(invalid(format!("duplicate class id {}", class.class_id)));
            }
        }

        // every id must walk to a root that owns a class, without cycles
        let mut roots: Vec<Option<Id>> = vec![None; size];
        for start in 0..size {
            let mut path = Vec::new();
            let mut current = Id::from(start);
            let root = loop {
                if let Some(root) = roots[usize::from(current)] {
                    break root;
                }
                let parent = dto.union_find[usize::from(current)];
                if parent == current {
                    break current;
                }
                if path.contains(&current) {
                    return Err(invalid(format!("union-find cycle at id {}", current)));
                }
                path.push(current);
                current = parent;
            };
            for id in path {
                roots[usize::from(id)] = Some(root);
            }
            roots[start] = Some(root);
            if !classes.contains_key(&root) {
                return Err(invalid(format!("no class for root id {}", root)));
            }
        }

        let mut memo: HashMap<Term, Id> = HashMap::default();
        for (leaf, term) in nodes.iter().enumerate() {
            memo.insert(term.clone(), Id::from(leaf));
        }

        Ok(EGraph {
            unionfind: UnionFind::from_parent_table(dto.union_find.clone()),
            nodes,
            memo,
            classes,
            pending: Vec::new(),
        })
    }
}
