//! Attack resolution.
//!
//! The [`AttackResolver`] owns the attack-mode pool and applies extra-attack
//! rules to a character's attack list:
//!
//! 1. **Gate**: every validator of the rule must pass, checked in order.
//! 2. **Purge**: rules that clear their action type drop the matching modes.
//! 3. **Generate**: the rule builds its candidate modes.
//! 4. **Tag**: the rule's additional tags go on every candidate.
//! 5. **Merge**: a candidate equal to an existing mode (ignoring the number
//!    of attacks) raises that mode's count instead of being added.
//!
//! Nothing here fails. An ineligible rule leaves the character untouched and
//! a rule that generates nothing is a normal outcome.

use crate::attack_mode::{ActionType, AttackBinding, AttackMode};
use crate::catalog::RuleCatalog;
use crate::character::EquipmentSlot;
use crate::combatant::Combatant;
use crate::config::ResolverConfig;
use crate::extra_attack::ExtraAttackRule;
use crate::pool::{AttackModePool, PoolStats};
use crate::validators::first_failing;
use serde::Serialize;
use tracing::{debug, trace};

/// What applying one rule did to the attack list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionSummary {
    /// Existing modes removed before generation.
    pub purged: usize,
    /// Candidates added as new modes.
    pub appended: usize,
    /// Candidates folded into an equal existing mode.
    pub merged: usize,
}

impl ResolutionSummary {
    pub fn changed(&self) -> bool {
        self.purged + self.appended + self.merged > 0
    }
}

/// Result of [`AttackResolver::try_add_extra_attack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// A validator rejected the character. Nothing changed.
    Ineligible { validator: String },
    Resolved(ResolutionSummary),
}

impl ResolutionOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved(_))
    }

    pub fn summary(&self) -> Option<&ResolutionSummary> {
        match self {
            ResolutionOutcome::Resolved(summary) => Some(summary),
            ResolutionOutcome::Ineligible { .. } => None,
        }
    }
}

/// One rule applied during a refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRule {
    /// Feature that named the rule.
    pub feature: String,
    pub rule: String,
    pub outcome: ResolutionOutcome,
}

/// Result of [`AttackResolver::refresh_attack_modes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Modes granted by the wielded weapons before any rule applied.
    pub base_modes: usize,
    pub applied: Vec<AppliedRule>,
    /// Features that name no rule or group.
    pub unmatched_features: Vec<String>,
}

/// Applies extra-attack rules to characters.
#[derive(Debug)]
pub struct AttackResolver {
    pool: AttackModePool,
    config: ResolverConfig,
}

impl AttackResolver {
    pub fn new(config: ResolverConfig) -> Self {
        let mut pool = AttackModePool::with_capacity(config.pool_capacity);
        pool.prewarm(config.prewarm);
        Self { pool, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Apply one extra-attack rule to a character's attack list.
    pub fn try_add_extra_attack(
        &mut self,
        character: &mut dyn Combatant,
        rule: &ExtraAttackRule,
    ) -> ResolutionOutcome {
        if let Some(failing) = first_failing(rule.validators(), &*character) {
            trace!(
                character = character.name(),
                rule = rule.name(),
                validator = failing.name(),
                "Extra attack rule not applicable"
            );
            return ResolutionOutcome::Ineligible {
                validator: failing.name().to_string(),
            };
        }

        let mut summary = ResolutionSummary::default();

        if rule.clears_same_action_type() {
            summary.purged = self.purge(character, rule.action_type());
        }

        let candidates = rule.generate(&*character, &mut self.pool);

        for mut candidate in candidates {
            for tag in rule.additional_tags() {
                candidate.add_attack_tag(tag);
            }

            let modes = character.attack_modes_mut();
            match modes
                .iter_mut()
                .find(|existing| existing.equals_ignoring_attack_count(&candidate))
            {
                Some(existing) => {
                    existing.attacks_number = existing.attacks_number.max(candidate.attacks_number);
                    self.pool.release(candidate);
                    summary.merged += 1;
                }
                None => {
                    modes.push(candidate);
                    summary.appended += 1;
                }
            }
        }

        debug!(
            character = character.name(),
            rule = rule.name(),
            purged = summary.purged,
            appended = summary.appended,
            merged = summary.merged,
            "Applied extra attack rule"
        );
        ResolutionOutcome::Resolved(summary)
    }

    /// Rebuild a character's attack list from its equipment and features.
    ///
    /// Current modes go back to the pool. The wielded weapons grant the base
    /// modes, then every catalog rule named by a feature applies in feature
    /// order.
    pub fn refresh_attack_modes(
        &mut self,
        character: &mut dyn Combatant,
        catalog: &RuleCatalog,
    ) -> RefreshReport {
        self.clear_attack_modes(character);

        let base = self.base_attack_modes(&*character);
        let mut report = RefreshReport {
            base_modes: base.len(),
            ..RefreshReport::default()
        };
        character.attack_modes_mut().extend(base);

        let features = character.feature_names().to_vec();
        for feature in features {
            let rules = catalog.rules_for(&feature);
            if rules.is_empty() {
                trace!(
                    character = character.name(),
                    feature = %feature,
                    "Feature grants no extra attack"
                );
                report.unmatched_features.push(feature);
                continue;
            }
            for rule in rules {
                let outcome = self.try_add_extra_attack(character, rule);
                report.applied.push(AppliedRule {
                    feature: feature.clone(),
                    rule: rule.name().to_string(),
                    outcome,
                });
            }
        }

        debug!(
            character = character.name(),
            modes = character.attack_modes().len(),
            "Refreshed attack modes"
        );
        report
    }

    /// Return every attack mode of a character to the pool.
    pub fn clear_attack_modes(&mut self, character: &mut dyn Combatant) -> usize {
        let modes = std::mem::take(character.attack_modes_mut());
        let count = modes.len();
        self.pool.release_all(modes);
        count
    }

    fn purge(&mut self, character: &mut dyn Combatant, action_type: ActionType) -> usize {
        let modes = std::mem::take(character.attack_modes_mut());
        let (purged, kept): (Vec<_>, Vec<_>) = modes
            .into_iter()
            .partition(|mode| mode.action_type == action_type);
        *character.attack_modes_mut() = kept;

        let count = purged.len();
        self.pool.release_all(purged);
        count
    }

    /// Main-action attack with the main hand, plus an off-hand bonus attack
    /// when both hands hold light weapons.
    fn base_attack_modes(&mut self, character: &dyn Combatant) -> Vec<AttackMode> {
        let mut modes = Vec::with_capacity(2);

        let main_hand = character
            .equipped_item(EquipmentSlot::MainHand)
            .and_then(|item| item.weapon_description().map(|weapon| (item, weapon)));

        let main_mode = match main_hand {
            Some((item, weapon)) => self.pool.acquire_refreshed(
                character,
                weapon,
                &AttackBinding {
                    action_type: ActionType::Main,
                    slot: EquipmentSlot::MainHand,
                    definition: item.name(),
                    item: Some(item),
                    free_off_hand: character.is_free_off_hand(),
                    add_ability_bonus: true,
                },
            ),
            None => {
                let strike = character.unarmed_strike();
                self.pool.acquire_refreshed(
                    character,
                    &strike.description,
                    &AttackBinding {
                        action_type: ActionType::Main,
                        slot: EquipmentSlot::MainHand,
                        definition: &strike.base.name,
                        item: None,
                        free_off_hand: character.is_free_off_hand_for_unarmed(),
                        add_ability_bonus: true,
                    },
                )
            }
        };
        modes.push(main_mode);

        let off_hand = character
            .equipped_item(EquipmentSlot::OffHand)
            .and_then(|item| item.weapon_description().map(|weapon| (item, weapon)));

        if let (Some((_, main)), Some((item, weapon))) = (main_hand, off_hand) {
            if main.is_light() && weapon.is_light() {
                modes.push(self.pool.acquire_refreshed(
                    character,
                    weapon,
                    &AttackBinding {
                        action_type: ActionType::Bonus,
                        slot: EquipmentSlot::OffHand,
                        definition: item.name(),
                        item: Some(item),
                        free_off_hand: false,
                        add_ability_bonus: character.can_add_ability_bonus_to_off_hand(),
                    },
                ));
            }
        }

        modes
    }
}

impl Default for AttackResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attack_mode::tags;
    use crate::catalog::FLURRY_TAG;
    use crate::character::{
        create_sample_crossbow_ranger, create_sample_fighter, create_sample_monk,
        create_sample_polearm_fighter, Character, Condition,
    };
    use crate::validators::CharacterValidator;

    fn mode_for(pool: &mut AttackModePool, name: &str, action_type: ActionType) -> AttackMode {
        let mut mode = pool.acquire();
        mode.source_definition.push_str(name);
        mode.action_type = action_type;
        mode.attacks_number = 1;
        mode
    }

    #[test]
    fn test_ineligible_leaves_character_untouched() {
        let mut resolver = AttackResolver::default();
        let mut fighter = create_sample_fighter("Roland");
        let rule = ExtraAttackRule::polearm_followup("Polearm Expert");

        let outcome = resolver.try_add_extra_attack(&mut fighter, &rule);
        assert_eq!(
            outcome,
            ResolutionOutcome::Ineligible {
                validator: "HasAttacked".to_string()
            }
        );
        assert!(fighter.attack_modes.is_empty());
        assert_eq!(resolver.pool_stats().acquired, 0);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        let rule = ExtraAttackRule::unarmed("Martial Arts", ActionType::Bonus);

        let first = resolver.try_add_extra_attack(&mut monk, &rule);
        let second = resolver.try_add_extra_attack(&mut monk, &rule);

        assert_eq!(first.summary().unwrap().appended, 1);
        assert_eq!(second.summary().unwrap().merged, 1);
        assert_eq!(monk.attack_modes.len(), 1);
        assert_eq!(monk.attack_modes[0].attacks_number, 1);
    }

    #[test]
    fn test_merge_keeps_higher_attack_count() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        let rule = ExtraAttackRule::unarmed("Martial Arts", ActionType::Bonus);

        resolver.try_add_extra_attack(&mut monk, &rule);
        monk.attack_modes[0].attacks_number = 3;
        resolver.try_add_extra_attack(&mut monk, &rule);

        assert_eq!(monk.attack_modes.len(), 1);
        assert_eq!(monk.attack_modes[0].attacks_number, 3);
    }

    #[test]
    fn test_tags_prevent_merge() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        let plain = ExtraAttackRule::unarmed("Martial Arts", ActionType::Bonus);
        let tagged = ExtraAttackRule::unarmed("Tagged", ActionType::Bonus).with_tags(["ki"]);

        resolver.try_add_extra_attack(&mut monk, &plain);
        resolver.try_add_extra_attack(&mut monk, &tagged);

        assert_eq!(monk.attack_modes.len(), 2);
        assert!(monk.attack_modes[1].has_attack_tag("ki"));
        assert!(monk.attack_modes[1].has_attack_tag(tags::MELEE));
    }

    #[test]
    fn test_purge_runs_before_generation() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        monk.attack_modes = vec![
            mode_for(&mut resolver.pool, "Bonus A", ActionType::Bonus),
            mode_for(&mut resolver.pool, "Strike", ActionType::Main),
            mode_for(&mut resolver.pool, "Bonus B", ActionType::Bonus),
        ];
        let rule = ExtraAttackRule::unarmed("Flurry", ActionType::Bonus).clearing_same_action_type();

        let outcome = resolver.try_add_extra_attack(&mut monk, &rule);
        let summary = outcome.summary().unwrap();
        assert_eq!(summary.purged, 2);
        assert_eq!(summary.appended, 1);

        assert_eq!(monk.attack_modes.len(), 2);
        assert_eq!(monk.attack_modes[0].source_definition, "Strike");
        assert_eq!(monk.attack_modes[1].source_definition, "Unarmed Strike");
        assert_eq!(resolver.pool_stats().released, 2);
    }

    #[test]
    fn test_purge_removes_first_entry() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        monk.attack_modes = vec![mode_for(&mut resolver.pool, "Only", ActionType::Bonus)];
        let rule = ExtraAttackRule::bonus_shield("Nothing To Bash").clearing_same_action_type();

        let outcome = resolver.try_add_extra_attack(&mut monk, &rule);
        assert_eq!(
            outcome,
            ResolutionOutcome::Resolved(ResolutionSummary {
                purged: 1,
                appended: 0,
                merged: 0
            })
        );
        assert!(monk.attack_modes.is_empty());
    }

    #[test]
    fn test_empty_generation_is_resolved() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        let outcome =
            resolver.try_add_extra_attack(&mut monk, &ExtraAttackRule::bonus_shield("Shield Expert"));
        assert!(outcome.is_eligible());
        assert!(!outcome.summary().unwrap().changed());
    }

    #[test]
    fn test_validators_short_circuit() {
        let mut resolver = AttackResolver::default();
        let mut monk = create_sample_monk("Li");
        let rule = ExtraAttackRule::unarmed("Guarded", ActionType::Bonus).with_validators([
            CharacterValidator::has_no_armor(),
            CharacterValidator::new("Never", |_| false),
            CharacterValidator::new("Boom", |_| panic!("evaluated after a failure")),
        ]);
        let outcome = resolver.try_add_extra_attack(&mut monk, &rule);
        assert_eq!(
            outcome,
            ResolutionOutcome::Ineligible {
                validator: "Never".to_string()
            }
        );
    }

    #[test]
    fn test_refresh_fighter() {
        let mut resolver = AttackResolver::default();
        let catalog = RuleCatalog::standard().unwrap();
        let mut fighter = create_sample_fighter("Roland");

        let report = resolver.refresh_attack_modes(&mut fighter, &catalog);
        assert_eq!(report.base_modes, 1);
        assert_eq!(report.unmatched_features, ["Second Wind".to_string()]);
        assert_eq!(fighter.attack_modes.len(), 1);
        assert_eq!(
            fighter.attack_modes[0].to_string(),
            "Longsword [Main] +6 to hit, 1d8+3 slashing x2"
        );
    }

    #[test]
    fn test_refresh_releases_previous_modes() {
        let mut resolver = AttackResolver::default();
        let catalog = RuleCatalog::standard().unwrap();
        let mut fighter = create_sample_fighter("Roland");

        resolver.refresh_attack_modes(&mut fighter, &catalog);
        resolver.refresh_attack_modes(&mut fighter, &catalog);

        let stats = resolver.pool_stats();
        assert_eq!(stats.acquired, 2);
        assert_eq!(stats.released, 1);
        assert_eq!(stats.reused, 1);
        assert_eq!(stats.outstanding(), fighter.attack_modes.len() as u64);
    }

    #[test]
    fn test_refresh_dual_wield_light_weapons() {
        let mut resolver = AttackResolver::default();
        let catalog = RuleCatalog::standard().unwrap();
        let mut ranger = create_sample_crossbow_ranger("Vex");

        let report = resolver.refresh_attack_modes(&mut ranger, &catalog);
        assert_eq!(report.base_modes, 2);
        // Ranged Expert needs an attack first
        assert!(!report.applied[0].outcome.is_eligible());
        assert_eq!(ranger.attacks_of(ActionType::Bonus).len(), 1);
        let off_hand = ranger.attacks_of(ActionType::Bonus)[0];
        assert_eq!(off_hand.slot, EquipmentSlot::OffHand);
        assert_eq!(
            off_hand.effect_description.first_damage_form().unwrap().bonus_damage,
            0
        );

        ranger.record_attack();
        let report = resolver.refresh_attack_modes(&mut ranger, &catalog);
        assert_eq!(report.applied[0].outcome.summary().unwrap().appended, 2);
        assert_eq!(ranger.attacks_of(ActionType::Bonus).len(), 3);
    }

    #[test]
    fn test_refresh_expands_groups() {
        let mut resolver = AttackResolver::default();
        let catalog = RuleCatalog::standard().unwrap();
        let mut archer = Character::new("Robin");
        archer.equipment.main_hand = crate::items::get_weapon("Shortbow").map(Into::into);
        archer.add_feature("RangedCombat");
        archer.record_attack();

        let report = resolver.refresh_attack_modes(&mut archer, &catalog);
        let rules: Vec<_> = report.applied.iter().map(|a| a.rule.as_str()).collect();
        assert_eq!(rules, ["Bow Mastery", "Ranged Expert"]);
        assert!(report.applied.iter().all(|a| a.feature == "RangedCombat"));
        assert_eq!(archer.attacks_of(ActionType::Bonus).len(), 1);
    }

    #[test]
    fn test_refresh_polearm_followup() {
        let mut resolver = AttackResolver::default();
        let catalog = RuleCatalog::standard().unwrap();
        let mut fighter = create_sample_polearm_fighter("Gwen");
        fighter.record_attack();

        resolver.refresh_attack_modes(&mut fighter, &catalog);
        let bonus = fighter.attacks_of(ActionType::Bonus);
        assert_eq!(bonus.len(), 1);
        assert_eq!(bonus[0].to_string(), "Glaive [Bonus] +5 to hit, 1d4+3 bludgeoning");
    }

    #[test]
    fn test_flurry_replaces_bonus_attacks() {
        let mut resolver = AttackResolver::default();
        let catalog = RuleCatalog::standard().unwrap();
        let mut monk = create_sample_monk("Li");
        monk.add_feature("Flurry Of Blows");
        monk.record_attack();

        resolver.refresh_attack_modes(&mut monk, &catalog);
        let bonus = monk.attacks_of(ActionType::Bonus);
        assert_eq!(bonus.len(), 1);
        assert!(bonus[0].has_attack_tag(FLURRY_TAG));

        monk.add_condition(Condition::Custom("Flurry Exhausted".to_string()), "Ki spent");
        resolver.refresh_attack_modes(&mut monk, &catalog);
        let bonus = monk.attacks_of(ActionType::Bonus);
        assert_eq!(bonus.len(), 1);
        assert!(!bonus[0].has_attack_tag(FLURRY_TAG));
    }

    #[test]
    fn test_config_applies_to_pool() {
        let resolver = AttackResolver::new(ResolverConfig::new().with_pool_capacity(2).with_prewarm(5));
        assert_eq!(resolver.pool.idle(), 2);
        assert_eq!(resolver.config().pool_capacity, 2);
    }
}
