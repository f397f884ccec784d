/// Items built up front by [`Pool::with_factory`].
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Handle to an item checked out of a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey(usize);

#[derive(Debug)]
struct Slot<T> {
    value: T,
    in_use: bool,
}

/// Reusable-object pool.
///
/// Items stay owned by the pool; callers hold a [`PoolKey`] while an item is
/// in use. Releasing a key that is not checked out does nothing, so a
/// double release cannot put the same item on the free list twice.
#[derive(Debug)]
pub struct Pool<T, F> {
    factory: F,
    slots: Vec<Slot<T>>,
    available: Vec<usize>,
    in_use: usize,
}

impl<T, F: FnMut() -> T> Pool<T, F> {
    pub fn new(mut factory: F, initial_size: usize) -> Self {
        let slots: Vec<Slot<T>> = (0..initial_size)
            .map(|_| Slot {
                value: factory(),
                in_use: false,
            })
            .collect();
        let available = (0..slots.len()).collect();
        Self {
            factory,
            slots,
            available,
            in_use: 0,
        }
    }

    pub fn with_factory(factory: F) -> Self {
        Self::new(factory, DEFAULT_POOL_SIZE)
    }

    /// Check out a free item, building a new one when none is left.
    pub fn acquire(&mut self) -> PoolKey {
        let index = match self.available.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    value: (self.factory)(),
                    in_use: false,
                });
                self.slots.len() - 1
            }
        };
        self.slots[index].in_use = true;
        self.in_use += 1;
        PoolKey(index)
    }

    /// Return an item to the free list. Returns `false` if `key` was not
    /// checked out.
    pub fn release(&mut self, key: PoolKey) -> bool {
        let Some(slot) = self.slots.get_mut(key.0) else {
            return false;
        };
        if !slot.in_use {
            return false;
        }
        slot.in_use = false;
        self.in_use -= 1;
        self.available.push(key.0);
        true
    }

    /// The checked-out item behind `key`.
    pub fn get(&self, key: PoolKey) -> Option<&T> {
        self.slots
            .get(key.0)
            .filter(|s| s.in_use)
            .map(|s| &s.value)
    }

    pub fn get_mut(&mut self, key: PoolKey) -> Option<&mut T> {
        self.slots
            .get_mut(key.0)
            .filter(|s| s.in_use)
            .map(|s| &mut s.value)
    }

    /// Number of items ready to be acquired.
    pub fn size(&self) -> usize {
        self.available.len()
    }

    /// Number of items currently checked out.
    pub fn in_use(&self) -> usize {
        self.in_use
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Particle {
        x: f64,
        ttl: u32,
    }

    #[test]
    fn prefills_to_initial_size() {
        let mut built = 0;
        let pool = Pool::new(
            || {
                built += 1;
                Particle::default()
            },
            4,
        );
        assert_eq!(pool.size(), 4);
        assert_eq!(pool.in_use(), 0);
        drop(pool);
        assert_eq!(built, 4);
    }

    #[test]
    fn default_size_is_ten() {
        let pool = Pool::with_factory(Particle::default);
        assert_eq!(pool.size(), DEFAULT_POOL_SIZE);
    }

    #[test]
    fn acquire_release_roundtrip_restores_counts() {
        let mut pool = Pool::new(Particle::default, 3);
        let key = pool.acquire();
        assert_eq!((pool.size(), pool.in_use()), (2, 1));
        assert!(pool.release(key));
        assert_eq!((pool.size(), pool.in_use()), (3, 0));
    }

    #[test]
    fn double_release_is_ignored() {
        let mut pool = Pool::new(Particle::default, 1);
        let key = pool.acquire();
        assert!(pool.release(key));
        assert!(!pool.release(key));
        assert_eq!((pool.size(), pool.in_use()), (1, 0));
    }

    #[test]
    fn releasing_unknown_key_is_ignored() {
        let mut pool = Pool::new(Particle::default, 2);
        assert!(!pool.release(PoolKey(0)));
        assert!(!pool.release(PoolKey(99)));
        assert_eq!((pool.size(), pool.in_use()), (2, 0));
    }

    #[test]
    fn grows_when_empty_and_reuses_items() {
        let mut pool = Pool::new(Particle::default, 1);
        let a = pool.acquire();
        let b = pool.acquire();
        assert_ne!(a, b);
        assert_eq!((pool.size(), pool.in_use()), (0, 2));

        if let Some(p) = pool.get_mut(a) {
            p.x = 3.5;
            p.ttl = 9;
        }
        pool.release(a);
        assert!(pool.get(a).is_none());

        let c = pool.acquire();
        assert_eq!(c, a);
        // Released items come back as they were left.
        assert_eq!(pool.get(c).map(|p| (p.x, p.ttl)), Some((3.5, 9)));
    }
}
