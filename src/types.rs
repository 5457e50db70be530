/// Length of a reference sequence as declared by an `@SQ LN:` tag.
pub type RefLength = u64;

// Fast hash maps / sets using AHash instead of the default SipHash.
// Import with `use crate::types::{HashMap, HashSet}`, plus `HashMapExt` /
// `HashSetExt` when you need `::new()`.
pub(crate) type HashMap<K, V> = ahash::HashMap<K, V>;
pub(crate) type HashSet<K> = ahash::HashSet<K>;
pub(crate) use ahash::HashMapExt;
pub(crate) use ahash::HashSetExt;
