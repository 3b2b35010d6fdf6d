//! Hash containers with a fixed, seedless hasher.

pub(crate) type FixedState = foldhash::fast::FixedState;

pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

pub(crate) type HashSet<T> = hashbrown::HashSet<T, FixedState>;
