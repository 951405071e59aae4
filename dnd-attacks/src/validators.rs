//! Eligibility predicates for extra-attack rules.
//!
//! Validators are named, shareable closures. A rule holds an ordered list of
//! [`CharacterValidator`]s that must all pass; ranged rules additionally hold
//! a [`WeaponValidator`] that each hand's weapon must pass.

use crate::character::{Condition, EquipmentSlot, EquippedItem, WeaponItem, WeaponType};
use crate::combatant::Combatant;
use std::fmt;
use std::sync::Arc;

type CharacterCheck = dyn Fn(&dyn Combatant) -> bool + Send + Sync;
type WeaponCheck = dyn Fn(&WeaponItem, &dyn Combatant) -> bool + Send + Sync;

/// A pure check over a character.
#[derive(Clone)]
pub struct CharacterValidator {
    name: String,
    check: Arc<CharacterCheck>,
}

impl CharacterValidator {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&dyn Combatant) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self, character: &dyn Combatant) -> bool {
        (self.check)(character)
    }

    /// The character made at least one attack this turn.
    pub fn has_attacked() -> Self {
        Self::new("HasAttacked", |c| c.has_attacked_this_turn())
    }

    /// A polearm is held in either hand.
    pub fn has_polearm() -> Self {
        Self::new("HasPolearm", |c| {
            EquipmentSlot::hands().into_iter().any(|slot| {
                c.equipped_item(slot)
                    .and_then(EquippedItem::weapon_description)
                    .is_some_and(|d| d.weapon_type.is_polearm())
            })
        })
    }

    /// None of the given conditions is active.
    pub fn has_none_of_conditions(conditions: impl IntoIterator<Item = Condition>) -> Self {
        let conditions: Vec<Condition> = conditions.into_iter().collect();
        let names: Vec<&str> = conditions.iter().map(Condition::name).collect();
        let name = format!("HasNoneOf({})", names.join(", "));
        Self::new(name, move |c| {
            !conditions.iter().any(|condition| c.has_condition(condition))
        })
    }

    pub fn is_free_off_hand() -> Self {
        Self::new("IsFreeOffHand", |c| c.is_free_off_hand())
    }

    pub fn is_free_off_hand_for_unarmed() -> Self {
        Self::new("IsFreeOffHandForUnarmed", |c| {
            c.is_free_off_hand_for_unarmed()
        })
    }

    pub fn has_no_armor() -> Self {
        Self::new("HasNoArmor", |c| !c.wears_armor())
    }

    pub fn has_no_shield() -> Self {
        Self::new("HasNoShield", |c| {
            !EquipmentSlot::hands()
                .into_iter()
                .any(|slot| c.equipped_item(slot).is_some_and(|i| i.as_shield().is_some()))
        })
    }
}

impl fmt::Debug for CharacterValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharacterValidator").field(&self.name).finish()
    }
}

/// First validator in `validators` that rejects the character, if any.
///
/// Evaluation stops at the first failure.
pub fn first_failing<'a>(
    validators: &'a [CharacterValidator],
    character: &dyn Combatant,
) -> Option<&'a CharacterValidator> {
    validators.iter().find(|v| !v.is_valid(character))
}

/// A pure check over a weapon in the hands of a character.
#[derive(Clone)]
pub struct WeaponValidator {
    name: String,
    check: Arc<WeaponCheck>,
}

impl WeaponValidator {
    pub fn new(
        name: impl Into<String>,
        check: impl Fn(&WeaponItem, &dyn Combatant) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self, weapon: &WeaponItem, character: &dyn Combatant) -> bool {
        (self.check)(weapon, character)
    }

    pub fn always_valid() -> Self {
        Self::new("AlwaysValid", |_, _| true)
    }

    /// The weapon is one of the given types.
    pub fn is_of_weapon_type(types: impl IntoIterator<Item = WeaponType>) -> Self {
        let types: Vec<WeaponType> = types.into_iter().collect();
        let names: Vec<String> = types.iter().map(|t| format!("{t:?}")).collect();
        let name = format!("IsOfWeaponType({})", names.join(", "));
        Self::new(name, move |weapon, _| {
            types.contains(&weapon.description.weapon_type)
        })
    }

    pub fn is_thrown() -> Self {
        Self::new("IsThrown", |weapon, _| weapon.description.is_thrown())
    }

    pub fn is_ranged() -> Self {
        Self::new("IsRanged", |weapon, _| weapon.description.is_ranged())
    }
}

impl fmt::Debug for WeaponValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WeaponValidator").field(&self.name).finish()
    }
}
