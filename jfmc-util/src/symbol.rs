//! Interned strings.
//!
//! Identifiers, struct/field names, and the mangled `Struct::method`
//! path names used throughout the AST and symbol table are all
//! [`Symbol`]s: a 4-byte handle into a process-global string table,
//! so two identifiers with the same spelling compare equal in O(1)
//! regardless of how many times the name appears in the source.
//!
//! Backed by `DashMap` rather than a `Mutex<HashMap>` so concurrent
//! interning (benches, parallel test runs) doesn't serialize on a
//! single lock.

use ahash::AHasher;
use dashmap::DashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// An interned string identifier. Cheap to copy, compare, and hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        table().intern(s)
    }

    pub fn as_str(&self) -> &'static str {
        table().get(*self)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

fn table() -> &'static StringTable {
    static TABLE: OnceLock<StringTable> = OnceLock::new();
    TABLE.get_or_init(StringTable::new)
}

struct StringTable {
    map: DashMap<u64, (&'static str, u32)>,
    next: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            map: DashMap::with_capacity(256),
            next: AtomicU32::new(0),
        }
    }

    fn hash_of(s: &str) -> u64 {
        let mut hasher = AHasher::default();
        s.hash(&mut hasher);
        hasher.finish()
    }

    fn intern(&self, s: &str) -> Symbol {
        let hash = Self::hash_of(s);
        if let Some(entry) = self.map.get(&hash) {
            if entry.value().0 == s {
                return Symbol(entry.value().1);
            }
        }
        match self.map.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) if entry.get().0 == s => {
                Symbol(entry.get().1)
            }
            dashmap::mapref::entry::Entry::Occupied(_) => self.intern_with_probing(s, hash),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
                let idx = self.next.fetch_add(1, Ordering::Relaxed);
                entry.insert((leaked, idx));
                Symbol(idx)
            }
        }
    }

    /// Two distinct strings hashed to the same slot. Linear-probe with a
    /// golden-ratio stride until we find either the string itself or a
    /// free slot, rather than silently overwriting the existing entry.
    fn intern_with_probing(&self, s: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_STRIDE: u64 = 0x9e3779b97f4a7c15;
        for i in 1..=MAX_PROBES {
            let probe = original_hash.wrapping_add(i.wrapping_mul(PROBE_STRIDE));
            match self.map.entry(probe) {
                dashmap::mapref::entry::Entry::Occupied(entry) if entry.get().0 == s => {
                    return Symbol(entry.get().1);
                }
                dashmap::mapref::entry::Entry::Occupied(_) => continue,
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
                    let idx = self.next.fetch_add(1, Ordering::Relaxed);
                    entry.insert((leaked, idx));
                    return Symbol(idx);
                }
            }
        }
        unreachable!("string interner exhausted {MAX_PROBES} collision probes")
    }

    fn get(&self, sym: Symbol) -> &'static str {
        self.map
            .iter()
            .find(|e| e.value().1 == sym.0)
            .map(|e| e.value().0)
            .unwrap_or("<invalid symbol>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_symbol() {
        assert_eq!(Symbol::intern("hello"), Symbol::intern("hello"));
    }

    #[test]
    fn distinct_text_interns_distinct_symbols() {
        assert_ne!(Symbol::intern("alpha"), Symbol::intern("beta"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let s = Symbol::intern("Point::sum");
        assert_eq!(s.as_str(), "Point::sum");
    }
}
