//! Reuse pool for attack modes.
//!
//! Attack modes are rebuilt every time a character's equipment or turn state
//! changes. The pool keeps released instances (and their string and vector
//! allocations) around so rebuilding does not churn the allocator.
//!
//! Ownership does the bookkeeping: [`AttackModePool::acquire`] hands out an
//! owned [`AttackMode`], and [`AttackModePool::release`] takes it back by
//! value. A released mode cannot be read again or released a second time.

use crate::attack_mode::{AttackBinding, AttackMode};
use crate::character::WeaponDescription;
use crate::combatant::Combatant;
use serde::Serialize;

/// Default cap on idle instances kept by the pool.
pub const DEFAULT_MAX_FREE: usize = 256;

/// Counters describing pool traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Instances handed out.
    pub acquired: u64,
    /// Instances handed back.
    pub released: u64,
    /// Releases of modes this pool never handed out, such as modes loaded
    /// with a saved character.
    pub adopted: u64,
    /// Acquisitions that needed a fresh allocation.
    pub allocated: u64,
    /// Acquisitions served from the free list.
    pub reused: u64,
    /// Releases dropped because the free list was full.
    pub discarded: u64,
}

impl PoolStats {
    /// Instances currently owned outside the pool.
    pub fn outstanding(&self) -> u64 {
        self.acquired.saturating_sub(self.released)
    }
}

/// Free list of attack modes.
#[derive(Debug)]
pub struct AttackModePool {
    free: Vec<AttackMode>,
    max_free: usize,
    stats: PoolStats,
}

impl AttackModePool {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_FREE)
    }

    /// Pool that keeps at most `max_free` idle instances.
    pub fn with_capacity(max_free: usize) -> Self {
        Self {
            free: Vec::new(),
            max_free,
            stats: PoolStats::default(),
        }
    }

    /// Allocate `count` idle instances up front, up to the capacity.
    pub fn prewarm(&mut self, count: usize) {
        let target = count.min(self.max_free);
        while self.free.len() < target {
            self.free.push(AttackMode::default());
        }
    }

    /// Hand out a zeroed attack mode.
    pub fn acquire(&mut self) -> AttackMode {
        self.stats.acquired += 1;
        match self.free.pop() {
            Some(mut mode) => {
                self.stats.reused += 1;
                mode.reset();
                mode
            }
            None => {
                self.stats.allocated += 1;
                AttackMode::default()
            }
        }
    }

    /// Hand out an attack mode populated from a weapon description.
    pub fn acquire_refreshed(
        &mut self,
        character: &dyn Combatant,
        weapon: &WeaponDescription,
        binding: &AttackBinding<'_>,
    ) -> AttackMode {
        let mut mode = self.acquire();
        mode.refresh(character, weapon, binding);
        mode
    }

    /// Take a mode back.
    ///
    /// Releases beyond the number of outstanding modes count as adopted, so
    /// `released` never exceeds `acquired`.
    pub fn release(&mut self, mode: AttackMode) {
        if self.stats.outstanding() > 0 {
            self.stats.released += 1;
        } else {
            self.stats.adopted += 1;
        }
        if self.free.len() < self.max_free {
            self.free.push(mode);
        } else {
            self.stats.discarded += 1;
        }
    }

    /// Take back every mode of an iterator.
    pub fn release_all(&mut self, modes: impl IntoIterator<Item = AttackMode>) {
        for mode in modes {
            self.release(mode);
        }
    }

    pub fn idle(&self) -> usize {
        self.free.len()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}

impl Default for AttackModePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack_mode::ActionType;

    #[test]
    fn test_acquire_allocates_then_reuses() {
        let mut pool = AttackModePool::new();
        let mut mode = pool.acquire();
        assert_eq!(pool.stats().allocated, 1);

        mode.source_definition.push_str("Longsword");
        mode.action_type = ActionType::Bonus;
        mode.attacks_number = 3;
        mode.add_attack_tag("melee");
        pool.release(mode);
        assert_eq!(pool.idle(), 1);

        let mode = pool.acquire();
        assert_eq!(mode, AttackMode::default());
        assert!(mode.source_definition.capacity() >= "Longsword".len());
        assert_eq!(pool.stats().reused, 1);
        assert_eq!(pool.stats().outstanding(), 1);
    }

    #[test]
    fn test_capacity_bounds_free_list() {
        let mut pool = AttackModePool::with_capacity(1);
        let a = pool.acquire();
        let b = pool.acquire();
        pool.release_all([a, b]);
        assert_eq!(pool.idle(), 1);

        let stats = pool.stats();
        assert_eq!(stats.released, 2);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.outstanding(), 0);
    }

    #[test]
    fn test_release_of_foreign_modes_is_adopted() {
        let mut pool = AttackModePool::new();
        let issued = pool.acquire();
        pool.release_all([AttackMode::default(), AttackMode::default()]);
        pool.release(issued);

        let stats = pool.stats();
        assert_eq!(stats.acquired, 1);
        assert_eq!(stats.released + stats.adopted, 3);
        assert!(stats.released <= stats.acquired);
        assert_eq!(stats.outstanding(), 0);
        assert_eq!(pool.idle(), 3);
    }

    #[test]
    fn test_prewarm() {
        let mut pool = AttackModePool::with_capacity(4);
        pool.prewarm(10);
        assert_eq!(pool.idle(), 4);
        let _mode = pool.acquire();
        assert_eq!(pool.stats().allocated, 0);
        assert_eq!(pool.stats().reused, 1);
    }
}
