//! Pool of falling presents.
//!
//! Wraps a [`Pool<Present>`] together with the physics constants every
//! present shares. Presents are acquired by the drop observer and released
//! by the present system once their fall ends.

use bevy_ecs::prelude::Resource;

use crate::components::present::{Present, PresentKey, PresentParams};
use crate::pool::{Pool, PoolError};

#[derive(Resource)]
pub struct PresentPool {
    pub pool: Pool<PresentKey, Present>,
    pub params: PresentParams,
}

impl PresentPool {
    pub fn new(capacity: usize, params: PresentParams) -> Self {
        Self {
            pool: Pool::with_capacity(capacity),
            params,
        }
    }

    /// Take a present from the pool and release it over `x`.
    pub fn drop_present(&mut self, x: f32) -> PresentKey {
        let params = self.params;
        let (key, present) = self.pool.acquire();
        present.on_init(x, &params);
        present.drop_at(x, &params);
        key
    }

    /// Return a present to the pool.
    pub fn remove(&mut self, key: PresentKey) -> Result<(), PoolError> {
        self.pool.release(key)
    }

    pub fn get(&self, key: PresentKey) -> Option<&Present> {
        self.pool.get(key)
    }

    pub fn get_mut(&mut self, key: PresentKey) -> Option<&mut Present> {
        self.pool.get_mut(key)
    }

    /// Keys of the presents currently falling.
    pub fn keys(&self) -> Vec<PresentKey> {
        self.pool.keys()
    }

    /// Presents currently falling.
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_present_initialises_from_params() {
        let params = PresentParams::default();
        let mut pool = PresentPool::new(2, params);
        let handle = pool.drop_present(100.0);
        let present = pool.get(handle).unwrap();
        assert_eq!(present.x, 100.0 - params.center());
        assert_eq!(present.y, params.start_y);
        assert_eq!(present.velocity, params.initial_velocity);
        assert!(present.dropping);
        assert!(!present.dead);
    }

    #[test]
    fn test_remove_then_reuse_present() {
        let mut pool = PresentPool::new(1, PresentParams::default());
        let first = pool.drop_present(10.0);
        pool.remove(first).unwrap();
        assert!(pool.get(first).is_none());
        assert!(pool.remove(first).is_err());

        let second = pool.drop_present(20.0);
        assert_ne!(second, first);
        let center = PresentParams::default().center();
        assert_eq!(pool.get(second).map(|present| present.x), Some(20.0 - center));
        assert_eq!(pool.live_count(), 1);
        assert_eq!(pool.pool.capacity(), 1);
    }
}
