//! Standard D&D 5e item database.
//!
//! Weapons, armor and shields that characters and tests can look up by name,
//! plus the two strikes that do not come from a weapon: the innate unarmed
//! strike and the shield bash.

use crate::character::{
    ArmorItem, DamageType, ShieldItem, WeaponDescription, WeaponItem, WeaponProperty,
    WeaponType,
};
use crate::dice::{DamageDice, DieType};

/// Get a standard weapon by name. Each call returns a new item instance.
pub fn get_weapon(name: &str) -> Option<WeaponItem> {
    let name_lower = name.to_lowercase();
    WEAPONS
        .iter()
        .find(|w| w.base.name.to_lowercase() == name_lower)
        .cloned()
        .map(WeaponItem::with_fresh_id)
}

/// Get a standard armor piece by name.
pub fn get_armor(name: &str) -> Option<ArmorItem> {
    let name_lower = name.to_lowercase();
    ARMORS
        .iter()
        .find(|a| a.base.name.to_lowercase() == name_lower)
        .cloned()
}

/// Get a standard shield by name. Each call returns a new item instance.
pub fn get_shield(name: &str) -> Option<ShieldItem> {
    let name_lower = name.to_lowercase();
    SHIELDS
        .iter()
        .find(|s| s.base.name.to_lowercase() == name_lower)
        .cloned()
        .map(ShieldItem::with_fresh_id)
}

const fn dice(count: u32, die_type: DieType) -> DamageDice {
    DamageDice::new(count, die_type)
}

lazy_static::lazy_static! {
    /// Strike used by a character with nothing suitable in hand.
    pub static ref UNARMED_STRIKE: WeaponItem =
        WeaponItem::new("Unarmed Strike", WeaponType::Unarmed, dice(1, DieType::D1), DamageType::Bludgeoning);

    /// How a shield strikes when used as a weapon.
    pub static ref SHIELD_STRIKE: WeaponDescription =
        WeaponDescription::new(WeaponType::ShieldBash, dice(1, DieType::D4), DamageType::Bludgeoning);

    /// Standard D&D 5e weapons.
    pub static ref WEAPONS: Vec<WeaponItem> = vec![
        // Unarmed weapons
        WeaponItem::new("Handwraps", WeaponType::Unarmed, dice(1, DieType::D4), DamageType::Bludgeoning)
            .with_properties(vec![WeaponProperty::Finesse, WeaponProperty::Light]),

        // Simple Melee Weapons
        WeaponItem::new("Club", WeaponType::Club, dice(1, DieType::D4), DamageType::Bludgeoning)
            .with_properties(vec![WeaponProperty::Light]),
        WeaponItem::new("Dagger", WeaponType::Dagger, dice(1, DieType::D4), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Finesse, WeaponProperty::Light, WeaponProperty::Thrown])
            .with_range(20, 60),
        WeaponItem::new("Handaxe", WeaponType::Handaxe, dice(1, DieType::D6), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Light, WeaponProperty::Thrown])
            .with_range(20, 60),
        WeaponItem::new("Javelin", WeaponType::Javelin, dice(1, DieType::D6), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Thrown])
            .with_range(30, 120),
        WeaponItem::new("Mace", WeaponType::Mace, dice(1, DieType::D6), DamageType::Bludgeoning),
        WeaponItem::new("Quarterstaff", WeaponType::Quarterstaff, dice(1, DieType::D6), DamageType::Bludgeoning)
            .with_properties(vec![WeaponProperty::Versatile(dice(1, DieType::D8))]),
        WeaponItem::new("Spear", WeaponType::Spear, dice(1, DieType::D6), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Thrown, WeaponProperty::Versatile(dice(1, DieType::D8))])
            .with_range(20, 60),

        // Martial Melee Weapons
        WeaponItem::new("Battleaxe", WeaponType::Battleaxe, dice(1, DieType::D8), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Versatile(dice(1, DieType::D10))]),
        WeaponItem::new("Glaive", WeaponType::Glaive, dice(1, DieType::D10), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Heavy, WeaponProperty::Reach, WeaponProperty::TwoHanded]),
        WeaponItem::new("Greataxe", WeaponType::Greataxe, dice(1, DieType::D12), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Heavy, WeaponProperty::TwoHanded]),
        WeaponItem::new("Greatsword", WeaponType::Greatsword, dice(2, DieType::D6), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Heavy, WeaponProperty::TwoHanded]),
        WeaponItem::new("Halberd", WeaponType::Halberd, dice(1, DieType::D10), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Heavy, WeaponProperty::Reach, WeaponProperty::TwoHanded]),
        WeaponItem::new("Longsword", WeaponType::Longsword, dice(1, DieType::D8), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Versatile(dice(1, DieType::D10))]),
        WeaponItem::new("Pike", WeaponType::Pike, dice(1, DieType::D10), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Heavy, WeaponProperty::Reach, WeaponProperty::TwoHanded]),
        WeaponItem::new("Rapier", WeaponType::Rapier, dice(1, DieType::D8), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Finesse]),
        WeaponItem::new("Scimitar", WeaponType::Scimitar, dice(1, DieType::D6), DamageType::Slashing)
            .with_properties(vec![WeaponProperty::Finesse, WeaponProperty::Light]),
        WeaponItem::new("Shortsword", WeaponType::Shortsword, dice(1, DieType::D6), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Finesse, WeaponProperty::Light]),
        WeaponItem::new("Warhammer", WeaponType::Warhammer, dice(1, DieType::D8), DamageType::Bludgeoning)
            .with_properties(vec![WeaponProperty::Versatile(dice(1, DieType::D10))]),

        // Simple Ranged Weapons
        WeaponItem::new("Light Crossbow", WeaponType::LightCrossbow, dice(1, DieType::D8), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Ammunition, WeaponProperty::Loading, WeaponProperty::TwoHanded])
            .with_range(80, 320),
        WeaponItem::new("Shortbow", WeaponType::Shortbow, dice(1, DieType::D6), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Ammunition, WeaponProperty::TwoHanded])
            .with_range(80, 320),

        // Martial Ranged Weapons
        WeaponItem::new("Hand Crossbow", WeaponType::HandCrossbow, dice(1, DieType::D6), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Ammunition, WeaponProperty::Light, WeaponProperty::Loading])
            .with_range(30, 120),
        WeaponItem::new("Heavy Crossbow", WeaponType::HeavyCrossbow, dice(1, DieType::D10), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Ammunition, WeaponProperty::Heavy, WeaponProperty::Loading, WeaponProperty::TwoHanded])
            .with_range(100, 400),
        WeaponItem::new("Longbow", WeaponType::Longbow, dice(1, DieType::D8), DamageType::Piercing)
            .with_properties(vec![WeaponProperty::Ammunition, WeaponProperty::Heavy, WeaponProperty::TwoHanded])
            .with_range(150, 600),
    ];

    /// Standard D&D 5e armor.
    pub static ref ARMORS: Vec<ArmorItem> = vec![
        ArmorItem::new("Leather Armor"),
        ArmorItem::new("Studded Leather"),
        ArmorItem::new("Chain Shirt"),
        ArmorItem::new("Half Plate"),
        ArmorItem::new("Chain Mail"),
        ArmorItem::new("Plate Armor"),
    ];

    /// Standard shields.
    pub static ref SHIELDS: Vec<ShieldItem> = vec![
        ShieldItem::new("Shield", 2),
        ShieldItem::new("Sentinel Shield", 2).with_enhancement(1),
    ];
}
