//! Hash-map and hash-set aliases used throughout this crate.
//!
//! Iteration order of these maps is never observable in the output of the
//! topology builder: results are always collected through index-ordered `Vec`s.

pub use hashbrown::hash_map::Entry;

/// Hashmap using [`hashbrown::HashMap`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;

/// Hashset using [`hashbrown::HashSet`].
pub type HashSet<K> = hashbrown::HashSet<K>;
