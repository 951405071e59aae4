//! D&D 5e extra-attack resolution.
//!
//! This crate provides:
//! - Attack modes built from wielded weapons, with attributed to-hit and damage bonuses
//! - Extra-attack rules (unarmed, ranged, polearm follow-up, shield bash)
//!   gated by composable validators
//! - A rule catalog with named groups
//! - A resolver that merges duplicate attacks and recycles attack modes
//!   through a pool
//!
//! # Quick Start
//!
//! ```
//! use dnd_attacks::{create_sample_polearm_fighter, ActionType, AttackResolver, RuleCatalog};
//!
//! let catalog = RuleCatalog::standard().unwrap();
//! let mut resolver = AttackResolver::default();
//!
//! let mut fighter = create_sample_polearm_fighter("Gwen");
//! fighter.record_attack();
//! resolver.refresh_attack_modes(&mut fighter, &catalog);
//!
//! for mode in fighter.attacks_of(ActionType::Bonus) {
//!     println!("{mode}");
//! }
//! ```

pub mod attack_mode;
pub mod catalog;
pub mod character;
pub mod combatant;
pub mod config;
pub mod dice;
pub mod extra_attack;
pub mod items;
pub mod pool;
pub mod resolver;
pub mod testing;
pub mod validators;

// Primary public API
pub use attack_mode::{ActionType, AttackMode, DamageForm, FeatureSourceType, TrendInfo};
pub use catalog::{CatalogError, RuleCatalog};
pub use character::{
    create_sample_crossbow_ranger, create_sample_fighter, create_sample_monk,
    create_sample_polearm_fighter, Character, EquipmentSlot, EquippedItem,
};
pub use combatant::Combatant;
pub use config::{ConfigError, ResolverConfig};
pub use extra_attack::{ExtraAttackKind, ExtraAttackRule};
pub use pool::{AttackModePool, PoolStats};
pub use resolver::{AttackResolver, RefreshReport, ResolutionOutcome, ResolutionSummary};
pub use testing::TestHarness;
pub use validators::{CharacterValidator, WeaponValidator};
