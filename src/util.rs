/// An interned string.
///
/// This is provided by the
/// [`symbol_table`](https://crates.io/crates/symbol_table) crate.
///
/// `saturate` compares and hashes term names constantly, so names are
/// interned: creating a [`Symbol`] from a string looks it up in a
/// global table, and the returned index cheaply implements `Copy`,
/// `Eq`, `Ord`, and `Hash`. The table leaks its strings, which is fine
/// for things like operator names and identifiers.
pub use symbol_table::GlobalSymbol as Symbol;

pub(crate) type BuildHasher = fxhash::FxBuildHasher;

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, BuildHasher>;
pub(crate) type IndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasher>;

pub(crate) fn concat_vecs<T>(to: &mut Vec<T>, mut from: Vec<T>) {
    if to.len() < from.len() {
        std::mem::swap(to, &mut from)
    }
    to.extend(from);
}
