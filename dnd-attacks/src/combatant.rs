//! The host contract: what the resolver needs to know about a character.

use crate::attack_mode::{AttackMode, AttackModifier};
use crate::character::{
    Ability, ActiveCondition, Condition, EquipmentSlot, EquippedItem, FightingStyle,
    WeaponDescription, WeaponItem,
};

/// A character whose attack modes the resolver maintains.
///
/// Everything but [`Combatant::attack_modes_mut`] is read-only. The resolver
/// assumes nothing else mutates the character while a call is running, which
/// the `&mut` borrow enforces.
pub trait Combatant {
    fn name(&self) -> &str;

    /// The item held in a hand, if any.
    fn equipped_item(&self, slot: EquipmentSlot) -> Option<&EquippedItem>;

    fn wears_armor(&self) -> bool;

    fn active_conditions(&self) -> &[ActiveCondition];

    fn has_condition(&self, condition: &Condition) -> bool {
        self.active_conditions()
            .iter()
            .any(|active| active.condition.matches(condition))
    }

    /// Ability used to attack with a weapon.
    fn attack_ability(&self, weapon: &WeaponDescription) -> Ability;

    fn ability_modifier(&self, ability: Ability) -> i32;

    fn proficiency_bonus(&self) -> i32;

    /// Flat bonuses from feats, fighting styles and active effects.
    fn attack_modifiers(&self) -> &[AttackModifier];

    /// Fighting styles, whose bonuses depend on the strike and are worked out
    /// when a mode is built.
    fn fighting_styles(&self) -> &[FightingStyle] {
        &[]
    }

    /// The innate strike used when no unarmed weapon is held.
    fn unarmed_strike(&self) -> &WeaponItem;

    fn has_attacked_this_turn(&self) -> bool;

    /// Attacks granted by one use of the Attack action.
    fn attacks_per_action(&self) -> u32;

    fn can_add_ability_bonus_to_off_hand(&self) -> bool;

    /// Names of the feats and features the character has.
    fn feature_names(&self) -> &[String];

    fn attack_modes(&self) -> &[AttackMode];

    fn attack_modes_mut(&mut self) -> &mut Vec<AttackMode>;

    fn is_free_off_hand(&self) -> bool {
        self.equipped_item(EquipmentSlot::OffHand).is_none()
    }

    /// An off hand holding nothing, or an unarmed weapon, still counts as free
    /// for unarmed strikes.
    fn is_free_off_hand_for_unarmed(&self) -> bool {
        self.equipped_item(EquipmentSlot::OffHand)
            .map_or(true, EquippedItem::is_unarmed_weapon)
    }
}
