//! Attack modes: the concrete, parameterized description of one attack a
//! character can take this turn.
//!
//! Attack modes are mutable records handed out by the
//! [`AttackModePool`](crate::pool::AttackModePool). Rules populate them from a
//! weapon description with [`AttackMode::refresh`], then override whatever
//! their rule family changes. The resolver merges modes that are equal in
//! every field except [`AttackMode::attacks_number`].

use crate::character::{DamageType, EquipmentSlot, EquippedItem, ItemId, WeaponDescription};
use crate::combatant::Combatant;
use crate::dice::{DamageDice, DieType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Well-known attack tags.
pub mod tags {
    pub const MELEE: &str = "melee";
    pub const RANGED: &str = "ranged";
}

// ============================================================================
// Action Types
// ============================================================================

/// Which action an attack consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ActionType {
    #[default]
    Main,
    Bonus,
    Reaction,
    NoCost,
}

impl ActionType {
    pub fn name(&self) -> &'static str {
        match self {
            ActionType::Main => "Main",
            ActionType::Bonus => "Bonus",
            ActionType::Reaction => "Reaction",
            ActionType::NoCost => "NoCost",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Trends & Modifiers
// ============================================================================

/// Where a bonus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureSourceType {
    Ability,
    Proficiency,
    Equipment,
    Feat,
    FightingStyle,
    Condition,
}

/// An attributable contribution to a to-hit or damage bonus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrendInfo {
    pub value: i32,
    pub source_type: FeatureSourceType,
    pub source_name: String,
}

impl TrendInfo {
    pub fn new(value: i32, source_type: FeatureSourceType, source_name: impl Into<String>) -> Self {
        Self {
            value,
            source_type,
            source_name: source_name.into(),
        }
    }
}

/// Which attacks an [`AttackModifier`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttackScope {
    #[default]
    Any,
    Melee,
    Ranged,
}

impl AttackScope {
    pub fn applies_to(&self, ranged: bool) -> bool {
        match self {
            AttackScope::Any => true,
            AttackScope::Melee => !ranged,
            AttackScope::Ranged => ranged,
        }
    }
}

/// A flat to-hit and damage bonus granted by a feature or an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackModifier {
    pub source_name: String,
    pub source_type: FeatureSourceType,
    #[serde(default)]
    pub scope: AttackScope,
    #[serde(default)]
    pub to_hit: i32,
    #[serde(default)]
    pub damage: i32,
}

impl AttackModifier {
    pub fn new(source_name: impl Into<String>, source_type: FeatureSourceType) -> Self {
        Self {
            source_name: source_name.into(),
            source_type,
            scope: AttackScope::Any,
            to_hit: 0,
            damage: 0,
        }
    }

    pub fn with_scope(mut self, scope: AttackScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_to_hit(mut self, to_hit: i32) -> Self {
        self.to_hit = to_hit;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }
}

// ============================================================================
// Effects
// ============================================================================

/// One damage entry of an attack's effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageForm {
    pub dice_number: u32,
    pub die_type: DieType,
    pub versatile_die_type: DieType,
    pub versatile: bool,
    pub damage_type: DamageType,
    pub bonus_damage: i32,
    #[serde(default)]
    pub damage_bonus_trends: Vec<TrendInfo>,
}

impl DamageForm {
    pub fn new(dice: DamageDice, damage_type: DamageType) -> Self {
        Self {
            dice_number: dice.count,
            die_type: dice.die_type,
            versatile_die_type: dice.die_type,
            versatile: false,
            damage_type,
            bonus_damage: 0,
            damage_bonus_trends: Vec::new(),
        }
    }

    /// Add a flat damage bonus and record where it came from.
    pub fn add_bonus(&mut self, trend: TrendInfo) {
        if trend.value == 0 {
            return;
        }
        self.bonus_damage += trend.value;
        self.damage_bonus_trends.push(trend);
    }
}

/// The effect an attack has when it lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EffectDescription {
    pub damage_forms: Vec<DamageForm>,
}

impl EffectDescription {
    pub fn first_damage_form(&self) -> Option<&DamageForm> {
        self.damage_forms.first()
    }

    pub fn first_damage_form_mut(&mut self) -> Option<&mut DamageForm> {
        self.damage_forms.first_mut()
    }

    pub fn clear(&mut self) {
        self.damage_forms.clear();
    }
}

// ============================================================================
// Attack Mode
// ============================================================================

/// Everything an attack mode is bound to besides its weapon.
#[derive(Debug, Clone, Copy)]
pub struct AttackBinding<'a> {
    pub action_type: ActionType,
    pub slot: EquipmentSlot,
    /// Name of the definition that strikes (the weapon, shield or unarmed strike).
    pub definition: &'a str,
    /// The equipped item instance, if the strike comes from one.
    pub item: Option<&'a EquippedItem>,
    pub free_off_hand: bool,
    /// Whether the ability modifier is added to damage (penalties always apply).
    pub add_ability_bonus: bool,
}

/// One possible attack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttackMode {
    pub action_type: ActionType,
    pub source_definition: String,
    pub source_object: Option<ItemId>,
    pub slot: EquipmentSlot,

    pub ranged: bool,
    pub thrown: bool,
    pub reach: bool,
    pub free_off_hand: bool,
    pub automatic_hit: bool,
    pub after_charge_only: bool,
    pub use_versatile_damage: bool,

    pub reach_range: u32,
    pub close_range: u32,
    pub max_range: u32,
    pub to_hit_bonus: i32,
    #[serde(default)]
    pub to_hit_bonus_trends: Vec<TrendInfo>,
    pub attacks_number: u32,

    pub effect_description: EffectDescription,
    pub attack_tags: BTreeSet<String>,
}

impl AttackMode {
    /// Two modes describe the same attack if everything but the number of
    /// attacks matches.
    pub fn equals_ignoring_attack_count(&self, other: &AttackMode) -> bool {
        // Destructured so a new field cannot be silently left out.
        let AttackMode {
            action_type,
            source_definition,
            source_object,
            slot,
            ranged,
            thrown,
            reach,
            free_off_hand,
            automatic_hit,
            after_charge_only,
            use_versatile_damage,
            reach_range,
            close_range,
            max_range,
            to_hit_bonus,
            to_hit_bonus_trends,
            attacks_number: _,
            effect_description,
            attack_tags,
        } = self;

        *action_type == other.action_type
            && *source_definition == other.source_definition
            && *source_object == other.source_object
            && *slot == other.slot
            && *ranged == other.ranged
            && *thrown == other.thrown
            && *reach == other.reach
            && *free_off_hand == other.free_off_hand
            && *automatic_hit == other.automatic_hit
            && *after_charge_only == other.after_charge_only
            && *use_versatile_damage == other.use_versatile_damage
            && *reach_range == other.reach_range
            && *close_range == other.close_range
            && *max_range == other.max_range
            && *to_hit_bonus == other.to_hit_bonus
            && *to_hit_bonus_trends == other.to_hit_bonus_trends
            && *effect_description == other.effect_description
            && *attack_tags == other.attack_tags
    }

    /// Return to the zeroed state, keeping allocated capacity.
    pub fn reset(&mut self) {
        self.action_type = ActionType::default();
        self.source_definition.clear();
        self.source_object = None;
        self.slot = EquipmentSlot::default();
        self.ranged = false;
        self.thrown = false;
        self.reach = false;
        self.free_off_hand = false;
        self.automatic_hit = false;
        self.after_charge_only = false;
        self.use_versatile_damage = false;
        self.reach_range = 0;
        self.close_range = 0;
        self.max_range = 0;
        self.to_hit_bonus = 0;
        self.to_hit_bonus_trends.clear();
        self.attacks_number = 0;
        self.effect_description.clear();
        self.attack_tags.clear();
    }

    /// Populate this mode from a weapon description.
    ///
    /// Flags and ranges follow the weapon. To-hit is ability modifier plus
    /// proficiency plus every applicable attack modifier of the character, of
    /// its fighting styles and of the striking item; damage gets the same
    /// modifiers and the ability modifier when `binding.add_ability_bonus` is
    /// set.
    pub fn refresh(
        &mut self,
        character: &dyn Combatant,
        weapon: &WeaponDescription,
        binding: &AttackBinding<'_>,
    ) {
        self.reset();

        self.action_type = binding.action_type;
        self.source_definition.push_str(binding.definition);
        self.source_object = binding.item.map(EquippedItem::id);
        self.slot = binding.slot;

        self.ranged = weapon.is_ranged();
        self.thrown = weapon.is_thrown();
        self.reach = !self.ranged;
        self.free_off_hand = binding.free_off_hand;
        self.use_versatile_damage = weapon.versatile_damage().is_some()
            && binding.free_off_hand
            && binding.slot == EquipmentSlot::MainHand;

        self.reach_range = weapon.reach_range();
        let (close, max) = weapon.range.unwrap_or((self.reach_range, self.reach_range));
        self.close_range = close;
        self.max_range = max;

        self.attacks_number = match binding.action_type {
            ActionType::Main => character.attacks_per_action().max(1),
            _ => 1,
        };

        let mut damage = DamageForm::new(weapon.damage, weapon.damage_type);
        if let Some(versatile) = weapon.versatile_damage() {
            damage.versatile = true;
            damage.versatile_die_type = versatile.die_type;
        }

        let ability = character.attack_ability(weapon);
        let ability_modifier = character.ability_modifier(ability);
        self.add_to_hit(TrendInfo::new(
            ability_modifier,
            FeatureSourceType::Ability,
            ability.name(),
        ));
        self.add_to_hit(TrendInfo::new(
            character.proficiency_bonus(),
            FeatureSourceType::Proficiency,
            "Proficiency",
        ));
        let ability_damage = if binding.add_ability_bonus {
            ability_modifier
        } else {
            ability_modifier.min(0)
        };
        damage.add_bonus(TrendInfo::new(
            ability_damage,
            FeatureSourceType::Ability,
            ability.name(),
        ));

        let off_hand_weapon = binding.slot == EquipmentSlot::MainHand
            && character
                .equipped_item(EquipmentSlot::OffHand)
                .and_then(EquippedItem::weapon_description)
                .is_some_and(|off| !off.weapon_type.is_unarmed());
        let style_modifiers: Vec<AttackModifier> = character
            .fighting_styles()
            .iter()
            .filter_map(|style| {
                style.attack_modifier(
                    weapon,
                    binding.slot,
                    self.use_versatile_damage,
                    off_hand_weapon,
                )
            })
            .collect();
        let item_modifiers = binding
            .item
            .into_iter()
            .flat_map(|item| item.base().attack_modifiers());
        for modifier in character
            .attack_modifiers()
            .iter()
            .chain(&style_modifiers)
            .chain(item_modifiers)
        {
            if !modifier.scope.applies_to(self.ranged) {
                continue;
            }
            self.add_to_hit(TrendInfo::new(
                modifier.to_hit,
                modifier.source_type,
                &modifier.source_name,
            ));
            damage.add_bonus(TrendInfo::new(
                modifier.damage,
                modifier.source_type,
                &modifier.source_name,
            ));
        }

        self.effect_description.damage_forms.push(damage);

        let range_tag = if self.ranged { tags::RANGED } else { tags::MELEE };
        self.add_attack_tag(range_tag);
        for property in &weapon.properties {
            self.add_attack_tag(property.tag());
        }
    }

    /// Add a to-hit bonus and record where it came from.
    pub fn add_to_hit(&mut self, trend: TrendInfo) {
        if trend.value == 0 {
            return;
        }
        self.to_hit_bonus += trend.value;
        self.to_hit_bonus_trends.push(trend);
    }

    /// Add a tag unless it is already present.
    pub fn add_attack_tag(&mut self, tag: &str) {
        if !self.attack_tags.contains(tag) {
            self.attack_tags.insert(tag.to_string());
        }
    }

    pub fn remove_attack_tag(&mut self, tag: &str) -> bool {
        self.attack_tags.remove(tag)
    }

    pub fn has_attack_tag(&self, tag: &str) -> bool {
        self.attack_tags.contains(tag)
    }

    /// Dice actually rolled for the first damage form, honoring versatile grip.
    pub fn damage_dice(&self) -> Option<DamageDice> {
        self.effect_description.first_damage_form().map(|form| {
            let die_type = if self.use_versatile_damage && form.versatile {
                form.versatile_die_type
            } else {
                form.die_type
            };
            DamageDice::new(form.dice_number, die_type)
        })
    }
}

impl fmt::Display for AttackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {:+} to hit",
            self.source_definition, self.action_type, self.to_hit_bonus
        )?;
        if let (Some(dice), Some(form)) = (
            self.damage_dice(),
            self.effect_description.first_damage_form(),
        ) {
            write!(f, ", {}{:+} {}", dice, form.bonus_damage, form.damage_type.name())?;
        }
        if self.attacks_number > 1 {
            write!(f, " x{}", self.attacks_number)?;
        }
        Ok(())
    }
}
