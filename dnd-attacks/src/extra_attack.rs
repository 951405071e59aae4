//! Extra-attack rules.
//!
//! A rule says when a character gets additional attack modes and what those
//! modes look like. Rules are built once, registered in a
//! [`RuleCatalog`](crate::catalog::RuleCatalog), and then only read. The
//! [`AttackResolver`](crate::resolver::AttackResolver) applies them.
//!
//! There are four rule families, see [`ExtraAttackKind`].

use crate::attack_mode::{tags, ActionType, AttackBinding, AttackMode, FeatureSourceType, TrendInfo};
use crate::character::{DamageType, EquipmentSlot};
use crate::combatant::Combatant;
use crate::dice::DieType;
use crate::items::SHIELD_STRIKE;
use crate::pool::AttackModePool;
use crate::validators::{CharacterValidator, WeaponValidator};

/// The rule families and their family-specific configuration.
#[derive(Debug, Clone)]
pub enum ExtraAttackKind {
    /// Strike with an unarmed weapon held in the main hand, or bare-handed.
    Unarmed,
    /// Fire each hand's qualifying weapon as a ranged attack.
    Ranged { weapon_validator: WeaponValidator },
    /// Haft strike with a polearm: 1d4 bludgeoning at reach.
    PolearmFollowup,
    /// Bash with the off-hand shield, adding its magic armor bonus.
    BonusShield,
}

impl ExtraAttackKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExtraAttackKind::Unarmed => "Unarmed",
            ExtraAttackKind::Ranged { .. } => "Ranged",
            ExtraAttackKind::PolearmFollowup => "PolearmFollowup",
            ExtraAttackKind::BonusShield => "BonusShield",
        }
    }
}

/// One extra-attack rule.
#[derive(Debug, Clone)]
pub struct ExtraAttackRule {
    name: String,
    action_type: ActionType,
    clear_same_action_type: bool,
    validators: Vec<CharacterValidator>,
    additional_tags: Vec<String>,
    kind: ExtraAttackKind,
}

impl ExtraAttackRule {
    pub fn new(name: impl Into<String>, action_type: ActionType, kind: ExtraAttackKind) -> Self {
        Self {
            name: name.into(),
            action_type,
            clear_same_action_type: false,
            validators: Vec::new(),
            additional_tags: Vec::new(),
            kind,
        }
    }

    pub fn unarmed(name: impl Into<String>, action_type: ActionType) -> Self {
        Self::new(name, action_type, ExtraAttackKind::Unarmed)
    }

    pub fn ranged(
        name: impl Into<String>,
        weapon_validator: WeaponValidator,
        action_type: ActionType,
    ) -> Self {
        Self::new(name, action_type, ExtraAttackKind::Ranged { weapon_validator })
    }

    /// Bonus-action haft strike, available after attacking with a polearm.
    pub fn polearm_followup(name: impl Into<String>) -> Self {
        Self::new(name, ActionType::Bonus, ExtraAttackKind::PolearmFollowup).with_validators([
            CharacterValidator::has_attacked(),
            CharacterValidator::has_polearm(),
        ])
    }

    /// Bonus-action shield bash.
    pub fn bonus_shield(name: impl Into<String>) -> Self {
        Self::new(name, ActionType::Bonus, ExtraAttackKind::BonusShield)
    }

    /// Remove existing modes of the target action type before generating.
    pub fn clearing_same_action_type(mut self) -> Self {
        self.clear_same_action_type = true;
        self
    }

    pub fn with_validator(mut self, validator: CharacterValidator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn with_validators(mut self, validators: impl IntoIterator<Item = CharacterValidator>) -> Self {
        self.validators.extend(validators);
        self
    }

    /// Tags stamped on every generated mode.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn clears_same_action_type(&self) -> bool {
        self.clear_same_action_type
    }

    pub fn validators(&self) -> &[CharacterValidator] {
        &self.validators
    }

    pub fn additional_tags(&self) -> &[String] {
        &self.additional_tags
    }

    pub fn kind(&self) -> &ExtraAttackKind {
        &self.kind
    }

    /// Build this rule's candidate modes for a character.
    ///
    /// Every returned mode comes from `pool`; the caller owns them. Validators
    /// are not consulted here.
    pub fn generate(&self, character: &dyn Combatant, pool: &mut AttackModePool) -> Vec<AttackMode> {
        match &self.kind {
            ExtraAttackKind::Unarmed => self.unarmed_attack(character, pool).into_iter().collect(),
            ExtraAttackKind::Ranged { weapon_validator } => EquipmentSlot::hands()
                .into_iter()
                .filter_map(|slot| self.ranged_attack(character, pool, slot, weapon_validator))
                .collect(),
            ExtraAttackKind::PolearmFollowup => EquipmentSlot::hands()
                .into_iter()
                .filter_map(|slot| self.polearm_attack(character, pool, slot))
                .collect(),
            ExtraAttackKind::BonusShield => self.shield_attack(character, pool).into_iter().collect(),
        }
    }

    fn unarmed_attack(&self, character: &dyn Combatant, pool: &mut AttackModePool) -> Option<AttackMode> {
        let main_hand = character
            .equipped_item(EquipmentSlot::MainHand)
            .filter(|item| item.is_unarmed_weapon());

        let (definition, weapon) = match main_hand {
            Some(item) => (item.name(), item.weapon_description()?),
            None => {
                let strike = character.unarmed_strike();
                (strike.base.name.as_str(), &strike.description)
            }
        };

        let binding = AttackBinding {
            action_type: self.action_type,
            slot: EquipmentSlot::MainHand,
            definition,
            item: main_hand,
            free_off_hand: character.is_free_off_hand_for_unarmed(),
            add_ability_bonus: true,
        };
        Some(pool.acquire_refreshed(character, weapon, &binding))
    }

    fn ranged_attack(
        &self,
        character: &dyn Combatant,
        pool: &mut AttackModePool,
        slot: EquipmentSlot,
        weapon_validator: &WeaponValidator,
    ) -> Option<AttackMode> {
        let item = character.equipped_item(slot)?;
        let weapon = item.as_weapon()?;
        if !weapon_validator.is_valid(weapon, character) {
            return None;
        }

        let binding = AttackBinding {
            action_type: self.action_type,
            slot,
            definition: item.name(),
            item: Some(item),
            free_off_hand: character.is_free_off_hand(),
            add_ability_bonus: true,
        };
        let mut mode = pool.acquire_refreshed(character, &weapon.description, &binding);

        mode.reach = false;
        mode.ranged = true;
        mode.thrown = weapon.description.is_thrown();
        mode.remove_attack_tag(tags::MELEE);

        Some(mode)
    }

    fn polearm_attack(
        &self,
        character: &dyn Combatant,
        pool: &mut AttackModePool,
        slot: EquipmentSlot,
    ) -> Option<AttackMode> {
        let item = character.equipped_item(slot)?;
        let weapon = item
            .weapon_description()
            .filter(|d| d.weapon_type.is_polearm())?;

        let binding = AttackBinding {
            action_type: self.action_type,
            slot,
            definition: item.name(),
            item: Some(item),
            free_off_hand: character.is_free_off_hand(),
            add_ability_bonus: true,
        };
        let mut mode = pool.acquire_refreshed(character, weapon, &binding);

        mode.reach = true;
        mode.ranged = false;
        mode.thrown = false;

        // The haft keeps the weapon's flat bonuses but not its dice.
        mode.effect_description.damage_forms.truncate(1);
        if let Some(damage) = mode.effect_description.first_damage_form_mut() {
            damage.die_type = DieType::D4;
            damage.versatile_die_type = DieType::D4;
            damage.versatile = false;
            damage.dice_number = 1;
            damage.damage_type = DamageType::Bludgeoning;
        }

        Some(mode)
    }

    fn shield_attack(&self, character: &dyn Combatant, pool: &mut AttackModePool) -> Option<AttackMode> {
        let item = character.equipped_item(EquipmentSlot::OffHand)?;
        let shield = item.as_shield()?;

        let binding = AttackBinding {
            action_type: self.action_type,
            slot: EquipmentSlot::OffHand,
            definition: item.name(),
            item: Some(item),
            free_off_hand: character.is_free_off_hand(),
            add_ability_bonus: character.can_add_ability_bonus_to_off_hand(),
        };
        let mut mode = pool.acquire_refreshed(character, &SHIELD_STRIKE, &binding);

        let bonus = shield.additive_ac_bonus();
        if bonus == 0 {
            return Some(mode);
        }

        let trend = TrendInfo::new(bonus, FeatureSourceType::Equipment, item.name());
        mode.add_to_hit(trend.clone());
        if let Some(damage) = mode.effect_description.first_damage_form_mut() {
            damage.add_bonus(trend);
        }

        Some(mode)
    }
}
