//! D&D 5e character and equipment types.
//!
//! The resolver only sees characters through the
//! [`Combatant`](crate::combatant::Combatant) trait. [`Character`] is the
//! reference implementation used by the CLI and the tests: ability scores,
//! conditions, equipped items and the live attack mode list.

use crate::attack_mode::{ActionType, AttackMode, AttackModifier, AttackScope, FeatureSourceType};
use crate::combatant::Combatant;
use crate::dice::DamageDice;
use crate::items;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an item instance.
///
/// Two longswords from the same definition have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Ability Scores
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

/// Ability scores container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl AbilityScores {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        // Floor division: 8-9 = -1, 10-11 = 0, 12-13 = +1
        (i32::from(self.get(ability)) - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

// ============================================================================
// Conditions
// ============================================================================

/// D&D 5e conditions, plus named conditions introduced by feats and powers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Blinded,
    Charmed,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
    Exhaustion(u8),
    Custom(String),
}

impl Condition {
    pub fn name(&self) -> &str {
        match self {
            Condition::Blinded => "Blinded",
            Condition::Charmed => "Charmed",
            Condition::Frightened => "Frightened",
            Condition::Grappled => "Grappled",
            Condition::Incapacitated => "Incapacitated",
            Condition::Invisible => "Invisible",
            Condition::Paralyzed => "Paralyzed",
            Condition::Poisoned => "Poisoned",
            Condition::Prone => "Prone",
            Condition::Restrained => "Restrained",
            Condition::Stunned => "Stunned",
            Condition::Unconscious => "Unconscious",
            Condition::Exhaustion(_) => "Exhaustion",
            Condition::Custom(name) => name,
        }
    }

    /// Same condition, ignoring exhaustion level.
    pub fn matches(&self, other: &Condition) -> bool {
        match (self, other) {
            (Condition::Exhaustion(_), Condition::Exhaustion(_)) => true,
            _ => self == other,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Exhaustion(level) => write!(f, "Exhaustion ({level})"),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// A condition applied to a creature with tracking info.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveCondition {
    pub condition: Condition,
    pub source: String,
}

impl ActiveCondition {
    pub fn new(condition: Condition, source: impl Into<String>) -> Self {
        Self {
            condition,
            source: source.into(),
        }
    }
}

// ============================================================================
// Items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Shield,
}

/// Character attribute touched by an item feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    ArmorClass,
    Speed,
    Initiative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierOperation {
    Additive,
    Set,
    Multiplicative,
}

/// A modifier to one character attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub attribute: Attribute,
    pub operation: ModifierOperation,
    pub value: i32,
}

impl AttributeModifier {
    pub fn additive(attribute: Attribute, value: i32) -> Self {
        Self {
            attribute,
            operation: ModifierOperation::Additive,
            value,
        }
    }
}

/// A feature granted by an item while it is equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemFeature {
    Attribute(AttributeModifier),
    Attack(AttackModifier),
}

/// Base item data shared by every kind of item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub magical: bool,
    #[serde(default)]
    pub features: Vec<ItemFeature>,
}

impl Item {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            item_type,
            magical: false,
            features: Vec::new(),
        }
    }

    pub fn attribute_modifiers(&self) -> impl Iterator<Item = &AttributeModifier> {
        self.features.iter().filter_map(|feature| match feature {
            ItemFeature::Attribute(modifier) => Some(modifier),
            ItemFeature::Attack(_) => None,
        })
    }

    pub fn attack_modifiers(&self) -> impl Iterator<Item = &AttackModifier> {
        self.features.iter().filter_map(|feature| match feature {
            ItemFeature::Attack(modifier) => Some(modifier),
            ItemFeature::Attribute(_) => None,
        })
    }
}

// ============================================================================
// Weapons
// ============================================================================

/// Damage type dealt by weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Slashing => "slashing",
            DamageType::Piercing => "piercing",
            DamageType::Bludgeoning => "bludgeoning",
        }
    }
}

/// Weapon classification used by validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    Unarmed,
    ShieldBash,
    Club,
    Dagger,
    Handaxe,
    Javelin,
    Mace,
    Quarterstaff,
    Spear,
    Battleaxe,
    Glaive,
    Greataxe,
    Greatsword,
    Halberd,
    Longsword,
    Pike,
    Rapier,
    Scimitar,
    Shortsword,
    Warhammer,
    LightCrossbow,
    Shortbow,
    HandCrossbow,
    HeavyCrossbow,
    Longbow,
}

impl WeaponType {
    pub fn is_polearm(&self) -> bool {
        matches!(
            self,
            WeaponType::Quarterstaff
                | WeaponType::Spear
                | WeaponType::Glaive
                | WeaponType::Halberd
                | WeaponType::Pike
        )
    }

    pub fn is_unarmed(&self) -> bool {
        matches!(self, WeaponType::Unarmed)
    }
}

/// Weapon properties per D&D 5e.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponProperty {
    Finesse,
    Light,
    Heavy,
    TwoHanded,
    Versatile(DamageDice),
    Thrown,
    Ammunition,
    Loading,
    Reach,
}

impl WeaponProperty {
    /// Attack tag stamped on modes made with a weapon with this property.
    pub fn tag(&self) -> &'static str {
        match self {
            WeaponProperty::Finesse => "finesse",
            WeaponProperty::Light => "light",
            WeaponProperty::Heavy => "heavy",
            WeaponProperty::TwoHanded => "two-handed",
            WeaponProperty::Versatile(_) => "versatile",
            WeaponProperty::Thrown => "thrown",
            WeaponProperty::Ammunition => "ammunition",
            WeaponProperty::Loading => "loading",
            WeaponProperty::Reach => "reach",
        }
    }
}

/// How a weapon strikes: dice, damage type, properties and range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponDescription {
    pub weapon_type: WeaponType,
    pub damage: DamageDice,
    pub damage_type: DamageType,
    #[serde(default)]
    pub properties: Vec<WeaponProperty>,
    /// Normal and long range in feet, for ranged and thrown weapons.
    #[serde(default)]
    pub range: Option<(u32, u32)>,
}

impl WeaponDescription {
    pub fn new(weapon_type: WeaponType, damage: DamageDice, damage_type: DamageType) -> Self {
        Self {
            weapon_type,
            damage,
            damage_type,
            properties: Vec::new(),
            range: None,
        }
    }

    pub fn has_property(&self, property: &WeaponProperty) -> bool {
        self.properties.contains(property)
    }

    pub fn is_finesse(&self) -> bool {
        self.has_property(&WeaponProperty::Finesse)
    }

    pub fn is_light(&self) -> bool {
        self.has_property(&WeaponProperty::Light)
    }

    pub fn is_thrown(&self) -> bool {
        self.has_property(&WeaponProperty::Thrown)
    }

    /// Ranged weapons fire ammunition; thrown melee weapons are not ranged.
    pub fn is_ranged(&self) -> bool {
        self.has_property(&WeaponProperty::Ammunition)
    }

    pub fn versatile_damage(&self) -> Option<DamageDice> {
        self.properties.iter().find_map(|prop| match prop {
            WeaponProperty::Versatile(dice) => Some(*dice),
            _ => None,
        })
    }

    /// Melee reach in feet.
    pub fn reach_range(&self) -> u32 {
        if self.has_property(&WeaponProperty::Reach) {
            10
        } else {
            5
        }
    }
}

/// A weapon item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponItem {
    pub base: Item,
    pub description: WeaponDescription,
}

impl WeaponItem {
    pub fn new(
        name: impl Into<String>,
        weapon_type: WeaponType,
        damage: DamageDice,
        damage_type: DamageType,
    ) -> Self {
        Self {
            base: Item::new(name, ItemType::Weapon),
            description: WeaponDescription::new(weapon_type, damage, damage_type),
        }
    }

    pub fn with_properties(mut self, properties: Vec<WeaponProperty>) -> Self {
        self.description.properties = properties;
        self
    }

    pub fn with_range(mut self, normal: u32, long: u32) -> Self {
        self.description.range = Some((normal, long));
        self
    }

    pub fn with_feature(mut self, feature: ItemFeature) -> Self {
        self.base.features.push(feature);
        self
    }

    /// Make this a +N magic weapon.
    pub fn with_enhancement(self, bonus: i32) -> Self {
        let source = format!("{} +{bonus}", self.base.name);
        let mut weapon = self.with_feature(ItemFeature::Attack(
            AttackModifier::new(source, FeatureSourceType::Equipment)
                .with_to_hit(bonus)
                .with_damage(bonus),
        ));
        weapon.base.magical = true;
        weapon.base.name = format!("{} +{bonus}", weapon.base.name);
        weapon
    }

    /// Give this copy its own instance id.
    pub fn with_fresh_id(mut self) -> Self {
        self.base.id = ItemId::new();
        self
    }
}

// ============================================================================
// Armor & Shields
// ============================================================================

/// Body armor. Wearing any blocks unarmored techniques such as Martial Arts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorItem {
    pub base: Item,
}

impl ArmorItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: Item::new(name, ItemType::Armor),
        }
    }
}

/// A shield held in the off hand.
///
/// The base AC bonus is part of the shield itself; enchantments add
/// [`ItemFeature::Attribute`] armor class modifiers on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldItem {
    pub base: Item,
    pub ac_bonus: u8,
}

impl ShieldItem {
    pub fn new(name: impl Into<String>, ac_bonus: u8) -> Self {
        Self {
            base: Item::new(name, ItemType::Shield),
            ac_bonus,
        }
    }

    /// Make this a +N magic shield.
    pub fn with_enhancement(mut self, bonus: i32) -> Self {
        self.base
            .features
            .push(ItemFeature::Attribute(AttributeModifier::additive(
                Attribute::ArmorClass,
                bonus,
            )));
        self.base.magical = true;
        self.base.name = format!("{} +{bonus}", self.base.name);
        self
    }

    pub fn with_fresh_id(mut self) -> Self {
        self.base.id = ItemId::new();
        self
    }

    /// Sum of the additive armor class modifiers among this shield's features.
    pub fn additive_ac_bonus(&self) -> i32 {
        self.base
            .attribute_modifiers()
            .filter(|m| m.attribute == Attribute::ArmorClass)
            .filter(|m| m.operation == ModifierOperation::Additive)
            .map(|m| m.value)
            .sum()
    }
}

// ============================================================================
// Equipment
// ============================================================================

/// Hand slots an attack can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EquipmentSlot {
    #[default]
    MainHand,
    OffHand,
}

impl EquipmentSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::MainHand => "MainHand",
            EquipmentSlot::OffHand => "OffHand",
        }
    }

    pub fn hands() -> [EquipmentSlot; 2] {
        [EquipmentSlot::MainHand, EquipmentSlot::OffHand]
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Something held in a hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EquippedItem {
    Weapon(WeaponItem),
    Shield(ShieldItem),
}

impl EquippedItem {
    pub fn base(&self) -> &Item {
        match self {
            EquippedItem::Weapon(w) => &w.base,
            EquippedItem::Shield(s) => &s.base,
        }
    }

    pub fn id(&self) -> ItemId {
        self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn as_weapon(&self) -> Option<&WeaponItem> {
        match self {
            EquippedItem::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_shield(&self) -> Option<&ShieldItem> {
        match self {
            EquippedItem::Shield(s) => Some(s),
            _ => None,
        }
    }

    /// The base weapon description, if this item can strike as a weapon.
    pub fn weapon_description(&self) -> Option<&WeaponDescription> {
        self.as_weapon().map(|w| &w.description)
    }

    pub fn is_unarmed_weapon(&self) -> bool {
        self.weapon_description()
            .is_some_and(|d| d.weapon_type.is_unarmed())
    }
}

impl From<WeaponItem> for EquippedItem {
    fn from(weapon: WeaponItem) -> Self {
        EquippedItem::Weapon(weapon)
    }
}

impl From<ShieldItem> for EquippedItem {
    fn from(shield: ShieldItem) -> Self {
        EquippedItem::Shield(shield)
    }
}

/// What's actively equipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub armor: Option<ArmorItem>,
    pub main_hand: Option<EquippedItem>,
    pub off_hand: Option<EquippedItem>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        match slot {
            EquipmentSlot::MainHand => self.main_hand.as_ref(),
            EquipmentSlot::OffHand => self.off_hand.as_ref(),
        }
    }

    /// Put an item in a hand, returning what was there.
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item: impl Into<EquippedItem>,
    ) -> Option<EquippedItem> {
        let hand = match slot {
            EquipmentSlot::MainHand => &mut self.main_hand,
            EquipmentSlot::OffHand => &mut self.off_hand,
        };
        hand.replace(item.into())
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<EquippedItem> {
        match slot {
            EquipmentSlot::MainHand => self.main_hand.take(),
            EquipmentSlot::OffHand => self.off_hand.take(),
        }
    }
}

// ============================================================================
// Character
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FightingStyle {
    Archery,
    Dueling,
    TwoWeaponFighting,
}

impl FightingStyle {
    pub fn name(&self) -> &'static str {
        match self {
            FightingStyle::Archery => "Archery",
            FightingStyle::Dueling => "Dueling",
            FightingStyle::TwoWeaponFighting => "Two-Weapon Fighting",
        }
    }

    /// The flat bonus this style grants to one strike, if any.
    ///
    /// Archery adds +2 to hit with ranged weapons. Dueling adds +2 damage to
    /// a main-hand melee weapon held in one hand while the off hand holds no
    /// weapon. Two-Weapon Fighting changes off-hand damage instead, see
    /// [`Combatant::can_add_ability_bonus_to_off_hand`].
    pub fn attack_modifier(
        &self,
        weapon: &WeaponDescription,
        slot: EquipmentSlot,
        two_handed_grip: bool,
        off_hand_weapon: bool,
    ) -> Option<AttackModifier> {
        match self {
            FightingStyle::Archery if weapon.is_ranged() => Some(
                AttackModifier::new(self.name(), FeatureSourceType::FightingStyle)
                    .with_scope(AttackScope::Ranged)
                    .with_to_hit(2),
            ),
            FightingStyle::Dueling
                if slot == EquipmentSlot::MainHand
                    && !weapon.is_ranged()
                    && !weapon.weapon_type.is_unarmed()
                    && !weapon.has_property(&WeaponProperty::TwoHanded)
                    && !two_handed_grip
                    && !off_hand_weapon =>
            {
                Some(
                    AttackModifier::new(self.name(), FeatureSourceType::FightingStyle)
                        .with_scope(AttackScope::Melee)
                        .with_damage(2),
                )
            }
            _ => None,
        }
    }
}

/// Per-turn bookkeeping the host resets at the start of each turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnState {
    pub attacks_made: u32,
}

impl TurnState {
    pub fn has_attacked(&self) -> bool {
        self.attacks_made > 0
    }
}

/// A character as seen by the attack resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub id: CharacterId,
    pub name: String,

    pub ability_scores: AbilityScores,
    pub level: u8,
    /// Attacks beyond the first granted by the Attack action.
    #[serde(default)]
    pub extra_attacks: u8,

    #[serde(default)]
    pub conditions: Vec<ActiveCondition>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub fighting_styles: Vec<FightingStyle>,
    #[serde(default)]
    pub attack_modifiers: Vec<AttackModifier>,
    /// Feats and class features, by name.
    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub turn: TurnState,
    #[serde(default)]
    pub attack_modes: Vec<AttackMode>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            ability_scores: AbilityScores::default(),
            level: 1,
            extra_attacks: 0,
            conditions: Vec::new(),
            equipment: Equipment::default(),
            fighting_styles: Vec::new(),
            attack_modifiers: Vec::new(),
            features: Vec::new(),
            turn: TurnState::default(),
            attack_modes: Vec::new(),
        }
    }

    pub fn proficiency_bonus(&self) -> i8 {
        match self.level {
            0..=4 => 2,
            5..=8 => 3,
            9..=12 => 4,
            13..=16 => 5,
            _ => 6,
        }
    }

    /// Add a condition if not already present. Returns true if the condition was added.
    pub fn add_condition(&mut self, condition: Condition, source: impl Into<String>) -> bool {
        if self.has_condition(&condition) {
            false
        } else {
            self.conditions.push(ActiveCondition::new(condition, source));
            true
        }
    }

    pub fn remove_condition(&mut self, condition: &Condition) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| !c.condition.matches(condition));
        self.conditions.len() != before
    }

    /// Learn a fighting style. Returns false if it was already known.
    pub fn add_fighting_style(&mut self, style: FightingStyle) -> bool {
        if self.fighting_styles.contains(&style) {
            return false;
        }
        self.fighting_styles.push(style);
        true
    }

    pub fn add_feature(&mut self, name: impl Into<String>) {
        self.features.push(name.into());
    }

    /// Record an attack made this turn.
    pub fn record_attack(&mut self) {
        self.turn.attacks_made += 1;
    }

    /// Start-of-turn reset.
    pub fn start_turn(&mut self) {
        self.turn = TurnState::default();
    }

    /// Attack modes with the given action type.
    pub fn attacks_of(&self, action_type: ActionType) -> Vec<&AttackMode> {
        self.attack_modes
            .iter()
            .filter(|m| m.action_type == action_type)
            .collect()
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn equipped_item(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.equipment.get(slot)
    }

    fn wears_armor(&self) -> bool {
        self.equipment.armor.is_some()
    }

    fn active_conditions(&self) -> &[ActiveCondition] {
        &self.conditions
    }

    fn attack_ability(&self, weapon: &WeaponDescription) -> Ability {
        let strength = self.ability_scores.modifier(Ability::Strength);
        let dexterity = self.ability_scores.modifier(Ability::Dexterity);
        if weapon.is_ranged() || (weapon.is_finesse() && dexterity > strength) {
            Ability::Dexterity
        } else {
            Ability::Strength
        }
    }

    fn ability_modifier(&self, ability: Ability) -> i32 {
        self.ability_scores.modifier(ability)
    }

    fn proficiency_bonus(&self) -> i32 {
        Character::proficiency_bonus(self) as i32
    }

    fn attack_modifiers(&self) -> &[AttackModifier] {
        &self.attack_modifiers
    }

    fn fighting_styles(&self) -> &[FightingStyle] {
        &self.fighting_styles
    }

    fn unarmed_strike(&self) -> &WeaponItem {
        &items::UNARMED_STRIKE
    }

    fn has_attacked_this_turn(&self) -> bool {
        self.turn.has_attacked()
    }

    fn attacks_per_action(&self) -> u32 {
        1 + self.extra_attacks as u32
    }

    fn can_add_ability_bonus_to_off_hand(&self) -> bool {
        self.fighting_styles
            .contains(&FightingStyle::TwoWeaponFighting)
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn attack_modes(&self) -> &[AttackMode] {
        &self.attack_modes
    }

    fn attack_modes_mut(&mut self) -> &mut Vec<AttackMode> {
        &mut self.attack_modes
    }
}

// ============================================================================
// Sample Characters
// ============================================================================

/// Level 5 fighter with longsword, shield and chain mail.
pub fn create_sample_fighter(name: &str) -> Character {
    let mut character = Character::new(name);
    character.ability_scores = AbilityScores::new(16, 14, 14, 10, 12, 8);
    character.level = 5;
    character.extra_attacks = 1;
    character.equipment.armor = items::get_armor("Chain Mail");
    character.equipment.main_hand = items::get_weapon("Longsword").map(Into::into);
    character.equipment.off_hand = items::get_shield("Shield").map(Into::into);
    character.add_feature("Second Wind");
    character
}

/// Level 5 ranger wielding a hand crossbow in each hand.
pub fn create_sample_crossbow_ranger(name: &str) -> Character {
    let mut character = Character::new(name);
    character.ability_scores = AbilityScores::new(10, 18, 14, 10, 14, 8);
    character.level = 5;
    character.extra_attacks = 1;
    character.equipment.armor = items::get_armor("Studded Leather");
    character.equipment.main_hand = items::get_weapon("Hand Crossbow").map(Into::into);
    character.equipment.off_hand = items::get_weapon("Hand Crossbow").map(Into::into);
    character.add_fighting_style(FightingStyle::Archery);
    character.add_feature("Ranged Expert");
    character
}

/// Level 4 fighter with a glaive.
pub fn create_sample_polearm_fighter(name: &str) -> Character {
    let mut character = Character::new(name);
    character.ability_scores = AbilityScores::new(17, 12, 14, 10, 12, 8);
    character.level = 4;
    character.equipment.armor = items::get_armor("Half Plate");
    character.equipment.main_hand = items::get_weapon("Glaive").map(Into::into);
    character.add_feature("Polearm Expert");
    character
}

/// Level 3 monk fighting with bare hands.
pub fn create_sample_monk(name: &str) -> Character {
    let mut character = Character::new(name);
    character.ability_scores = AbilityScores::new(12, 16, 14, 10, 15, 8);
    character.level = 3;
    character.add_feature("Martial Arts");
    character
}
