//! Testing utilities for attack resolution.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted turns against one character
//! - Assertion helpers for verifying the attack list and pool bookkeeping

use crate::attack_mode::{ActionType, AttackMode};
use crate::catalog::RuleCatalog;
use crate::character::{create_sample_fighter, Character};
use crate::extra_attack::ExtraAttackRule;
use crate::pool::PoolStats;
use crate::resolver::{AttackResolver, RefreshReport, ResolutionOutcome};

/// A resolver, the standard catalog and one character.
pub struct TestHarness {
    pub resolver: AttackResolver,
    pub catalog: RuleCatalog,
    pub character: Character,
    /// Modes the character held before the harness took it over.
    preloaded: u64,
}

impl TestHarness {
    /// Create a harness with a sample fighter.
    pub fn new() -> Self {
        Self::with_character(create_sample_fighter("Test Hero"))
    }

    /// Create a harness with a specific character.
    pub fn with_character(character: Character) -> Self {
        Self {
            preloaded: character.attack_modes.len() as u64,
            resolver: AttackResolver::default(),
            catalog: RuleCatalog::standard()
                .unwrap_or_else(|e| panic!("standard catalog is invalid: {e}")),
            character,
        }
    }

    /// Apply a catalog rule by name.
    ///
    /// Panics if the catalog has no rule of that name.
    pub fn apply(&mut self, rule_name: &str) -> ResolutionOutcome {
        let rule = self
            .catalog
            .get(rule_name)
            .unwrap_or_else(|| panic!("No rule named {rule_name}"));
        self.resolver.try_add_extra_attack(&mut self.character, rule)
    }

    /// Apply a rule that is not in the catalog.
    pub fn apply_rule(&mut self, rule: &ExtraAttackRule) -> ResolutionOutcome {
        self.resolver.try_add_extra_attack(&mut self.character, rule)
    }

    /// Rebuild the attack list from equipment and features.
    pub fn refresh(&mut self) -> RefreshReport {
        self.resolver
            .refresh_attack_modes(&mut self.character, &self.catalog)
    }

    /// Record an attack and rebuild, as a host does after each attack.
    pub fn attack(&mut self) -> RefreshReport {
        self.character.record_attack();
        self.refresh()
    }

    /// Start a new turn and rebuild.
    pub fn next_turn(&mut self) -> RefreshReport {
        self.character.start_turn();
        self.refresh()
    }

    pub fn modes(&self) -> &[AttackMode] {
        &self.character.attack_modes
    }

    pub fn modes_of(&self, action_type: ActionType) -> Vec<&AttackMode> {
        self.character.attacks_of(action_type)
    }

    /// First mode with the given source and action type.
    pub fn find_mode(&self, source: &str, action_type: ActionType) -> Option<&AttackMode> {
        self.character
            .attack_modes
            .iter()
            .find(|m| m.source_definition == source && m.action_type == action_type)
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.resolver.pool_stats()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert every mode, acquired or brought in with the character, is either
/// on the character or back in the pool.
pub fn assert_pool_conserved(harness: &TestHarness) {
    let stats = harness.pool_stats();
    assert!(
        stats.released <= stats.acquired,
        "Pool counted more releases than acquisitions: {stats:?}"
    );
    assert_eq!(
        stats.acquired + harness.preloaded,
        stats.released + stats.adopted + harness.modes().len() as u64,
        "Pool leaked attack modes: {stats:?} with {} on the character and {} preloaded",
        harness.modes().len(),
        harness.preloaded
    );
}

/// Assert the number of modes with an action type.
pub fn assert_mode_count(harness: &TestHarness, action_type: ActionType, expected: usize) {
    let actual = harness.modes_of(action_type).len();
    assert_eq!(
        actual, expected,
        "Expected {expected} {action_type} attack modes, found {actual}"
    );
}

/// Assert a mode exists and return it.
pub fn assert_has_mode<'a>(
    harness: &'a TestHarness,
    source: &str,
    action_type: ActionType,
) -> &'a AttackMode {
    harness
        .find_mode(source, action_type)
        .unwrap_or_else(|| panic!("Expected a {action_type} attack with {source}"))
}

/// Assert no two modes are equal ignoring their number of attacks.
pub fn assert_no_duplicate_modes(harness: &TestHarness) {
    let modes = harness.modes();
    for (i, a) in modes.iter().enumerate() {
        for b in &modes[i + 1..] {
            assert!(
                !a.equals_ignoring_attack_count(b),
                "Duplicate attack modes: {a} and {b}"
            );
        }
    }
}
