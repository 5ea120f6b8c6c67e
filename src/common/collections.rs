//! Hashing collections used throughout the crate. FxHash is faster than the
//! default SipHash for the small string and handle keys we store.

pub type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub type HashSet<T> = rustc_hash::FxHashSet<T>;
