//! Object pool on top of a generational slot map.
//!
//! Live objects sit in a [`SlotMap`] keyed by a caller-defined key type.
//! Released objects are moved to a spare list and handed out again by the
//! next [`Pool::acquire`], so steady-state dropping never allocates. Keys
//! are generational: a key kept after its object went back to the pool no
//! longer resolves.
//!
//! # Example
//! ```ignore
//! let mut pool: Pool<PresentKey, Present> = Pool::with_capacity(16);
//! let (key, present) = pool.acquire();
//! present.on_init(120.0, &params);
//! // ... later
//! pool.release(key)?;
//! assert!(pool.get(key).is_none());
//! ```

use std::fmt;

use slotmap::{Key, KeyData, SlotMap};

/// Objects that can live in a [`Pool`].
///
/// `Default` builds the preallocated objects. [`Poolable::on_dispose`] runs
/// when an object goes back to the pool; re-initialisation is left to the
/// owner because init arguments differ per type.
pub trait Poolable: Default {
    /// Called once when the object is returned to the pool.
    fn on_dispose(&mut self) {}
}

/// Reasons a release can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The key was already released (or never issued by this pool).
    Stale { key: KeyData },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::Stale { key } => write!(f, "stale pool key {:?} used after release", key),
        }
    }
}

impl std::error::Error for PoolError {}

/// Live objects keyed by `K` plus a stock of spare ones.
pub struct Pool<K: Key, T: Poolable> {
    live: SlotMap<K, T>,
    spare: Vec<T>,
}

impl<K: Key, T: Poolable> Default for Pool<K, T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K: Key, T: Poolable> Pool<K, T> {
    /// Create a pool with `capacity` ready-to-use objects.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            live: SlotMap::with_capacity_and_key(capacity),
            spare: (0..capacity).map(|_| T::default()).collect(),
        }
    }

    /// Take an object out of the pool, building a new one if none is spare.
    pub fn acquire(&mut self) -> (K, &mut T) {
        let value = match self.spare.pop() {
            Some(value) => value,
            None => {
                log::debug!("pool exhausted, growing to {} objects", self.capacity() + 1);
                T::default()
            }
        };
        let key = self.live.insert(value);
        (key, &mut self.live[key])
    }

    /// Return an object to the pool.
    ///
    /// Runs [`Poolable::on_dispose`] and keeps the object for reuse. `key`
    /// and every copy of it stop resolving.
    pub fn release(&mut self, key: K) -> Result<(), PoolError> {
        let mut value = self
            .live
            .remove(key)
            .ok_or(PoolError::Stale { key: key.data() })?;
        value.on_dispose();
        self.spare.push(value);
        Ok(())
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.live.get(key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.live.get_mut(key)
    }

    /// Whether `key` still refers to a live object.
    pub fn contains(&self, key: K) -> bool {
        self.live.contains_key(key)
    }

    /// Keys of every live object. Collected so the pool can be mutated while
    /// walking them.
    pub fn keys(&self) -> Vec<K> {
        self.live.keys().collect()
    }

    /// Iterate live objects with their keys.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.live.iter()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn spare_count(&self) -> usize {
        self.spare.len()
    }

    /// Objects owned by the pool, live or spare.
    pub fn capacity(&self) -> usize {
        self.live.len() + self.spare.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::new_key_type;

    new_key_type! {
        struct TokenKey;
    }

    #[derive(Default)]
    struct Token {
        value: i32,
        disposed: u32,
    }

    impl Poolable for Token {
        fn on_dispose(&mut self) {
            self.disposed += 1;
        }
    }

    #[test]
    fn test_acquire_uses_preallocated_objects_first() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(2);
        let (a, _) = pool.acquire();
        let (b, _) = pool.acquire();
        assert_ne!(a, b);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.live_count(), 2);
        assert_eq!(pool.spare_count(), 0);
    }

    #[test]
    fn test_acquire_grows_when_exhausted() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(1);
        pool.acquire();
        let (key, _) = pool.acquire();
        assert!(pool.contains(key));
        assert_eq!(pool.capacity(), 2);
    }

    #[test]
    fn test_release_recycles_object_and_calls_dispose() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(1);
        let (key, token) = pool.acquire();
        token.value = 7;
        pool.release(key).unwrap();
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.spare_count(), 1);

        let (again, token) = pool.acquire();
        assert_ne!(again, key);
        // State survives recycling; the owner re-initialises it.
        assert_eq!(token.value, 7);
        assert_eq!(token.disposed, 1);
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn test_stale_key_does_not_resolve() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(1);
        let (old, _) = pool.acquire();
        pool.release(old).unwrap();
        assert!(pool.get(old).is_none());
        assert!(pool.get_mut(old).is_none());

        let (new, _) = pool.acquire();
        assert!(pool.get(old).is_none());
        assert!(pool.contains(new));
    }

    #[test]
    fn test_double_release_is_rejected() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(1);
        let (key, _) = pool.acquire();
        pool.release(key).unwrap();
        assert_eq!(pool.release(key), Err(PoolError::Stale { key: key.data() }));
        assert_eq!(pool.spare_count(), 1);
    }

    #[test]
    fn test_null_key_is_rejected() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(1);
        assert!(pool.release(TokenKey::null()).is_err());
        assert_eq!(pool.spare_count(), 1);
    }

    #[test]
    fn test_iter_and_keys_skip_released_objects() {
        let mut pool: Pool<TokenKey, Token> = Pool::with_capacity(3);
        let (a, _) = pool.acquire();
        let (b, _) = pool.acquire();
        let (c, _) = pool.acquire();
        pool.release(b).unwrap();
        let keys = pool.keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&a) && keys.contains(&c));
        assert_eq!(pool.iter().count(), 2);
    }
}
