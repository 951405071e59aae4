//! Named extra-attack rules and rule groups.
//!
//! Features on a character refer to rules by name. A name may also denote a
//! group, which stands for every rule of its members in order.

use crate::attack_mode::ActionType;
use crate::character::{Condition, WeaponType};
use crate::extra_attack::ExtraAttackRule;
use crate::validators::{CharacterValidator, WeaponValidator};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Tag carried by attacks granted by Flurry Of Blows.
pub const FLURRY_TAG: &str = "flurry";

/// Condition that suppresses Flurry Of Blows.
pub const FLURRY_EXHAUSTED: &str = "Flurry Exhausted";

/// Errors from building a rule catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Rule name must not be empty")]
    EmptyName,

    #[error("Rule {rule} has a blank attack tag")]
    BlankTag { rule: String },

    #[error("Name already registered: {0}")]
    DuplicateName(String),

    #[error("Group {group} refers to unknown rule or group {member}")]
    UnknownMember { group: String, member: String },

    #[error("Group {0} has no members")]
    EmptyGroup(String),
}

#[derive(Debug, Clone, Copy)]
enum Entry {
    Rule(usize),
    Group(usize),
}

#[derive(Debug, Clone)]
struct Group {
    name: String,
    /// Flattened indexes into `rules`, in order, without duplicates.
    members: Vec<usize>,
}

/// Registry of extra-attack rules. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    rules: Vec<ExtraAttackRule>,
    groups: Vec<Group>,
    names: HashMap<String, Entry>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the standard extra-attack feats and features.
    pub fn standard() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        catalog.register(
            ExtraAttackRule::ranged(
                "Bow Mastery",
                WeaponValidator::is_of_weapon_type([WeaponType::Shortbow]),
                ActionType::Bonus,
            )
            .with_validator(CharacterValidator::has_attacked()),
        )?;
        catalog.register(
            ExtraAttackRule::ranged(
                "Ranged Expert",
                WeaponValidator::is_of_weapon_type([WeaponType::HandCrossbow]),
                ActionType::Bonus,
            )
            .with_validator(CharacterValidator::has_attacked()),
        )?;
        catalog.register(ExtraAttackRule::polearm_followup("Polearm Expert"))?;
        catalog.register(ExtraAttackRule::bonus_shield("Shield Expert"))?;
        catalog.register(
            ExtraAttackRule::unarmed("Martial Arts", ActionType::Bonus).with_validators([
                CharacterValidator::has_attacked(),
                CharacterValidator::has_no_armor(),
                CharacterValidator::has_no_shield(),
                CharacterValidator::is_free_off_hand_for_unarmed(),
            ]),
        )?;
        catalog.register(
            ExtraAttackRule::unarmed("Flurry Of Blows", ActionType::Bonus)
                .clearing_same_action_type()
                .with_tags([FLURRY_TAG])
                .with_validator(CharacterValidator::has_none_of_conditions([
                    Condition::Custom(FLURRY_EXHAUSTED.to_string()),
                ])),
        )?;

        catalog.make_group("RangedCombat", ["Bow Mastery", "Ranged Expert"])?;

        Ok(catalog)
    }

    /// Add a rule under its own name.
    pub fn register(&mut self, rule: ExtraAttackRule) -> Result<(), CatalogError> {
        let name = rule.name();
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if rule.additional_tags().iter().any(|tag| tag.trim().is_empty()) {
            return Err(CatalogError::BlankTag {
                rule: name.to_string(),
            });
        }
        if self.names.contains_key(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }

        debug!(
            rule = name,
            kind = rule.kind().name(),
            action = %rule.action_type(),
            "Registered extra attack rule"
        );
        self.names
            .insert(name.to_string(), Entry::Rule(self.rules.len()));
        self.rules.push(rule);
        Ok(())
    }

    /// Define a group standing for the rules of its members.
    ///
    /// Members may be rules or groups already in the catalog.
    pub fn make_group<I, S>(&mut self, name: &str, members: I) -> Result<(), CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.names.contains_key(name) {
            return Err(CatalogError::DuplicateName(name.to_string()));
        }

        let mut flattened = Vec::new();
        for member in members {
            let member = member.as_ref();
            let indexes = match self.names.get(member) {
                Some(Entry::Rule(index)) => std::slice::from_ref(index),
                Some(Entry::Group(index)) => self.groups[*index].members.as_slice(),
                None => {
                    return Err(CatalogError::UnknownMember {
                        group: name.to_string(),
                        member: member.to_string(),
                    })
                }
            };
            for index in indexes {
                if !flattened.contains(index) {
                    flattened.push(*index);
                }
            }
        }
        if flattened.is_empty() {
            return Err(CatalogError::EmptyGroup(name.to_string()));
        }

        debug!(group = name, members = flattened.len(), "Registered rule group");
        self.names
            .insert(name.to_string(), Entry::Group(self.groups.len()));
        self.groups.push(Group {
            name: name.to_string(),
            members: flattened,
        });
        Ok(())
    }

    /// Look up a single rule by name.
    pub fn get(&self, name: &str) -> Option<&ExtraAttackRule> {
        match self.names.get(name)? {
            Entry::Rule(index) => self.rules.get(*index),
            Entry::Group(_) => None,
        }
    }

    pub fn is_group(&self, name: &str) -> bool {
        matches!(self.names.get(name), Some(Entry::Group(_)))
    }

    /// The rules a name denotes: one rule, every rule of a group, or none.
    pub fn rules_for(&self, name: &str) -> Vec<&ExtraAttackRule> {
        match self.names.get(name) {
            Some(Entry::Rule(index)) => vec![&self.rules[*index]],
            Some(Entry::Group(index)) => self.groups[*index]
                .members
                .iter()
                .map(|member| &self.rules[*member])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &ExtraAttackRule> {
        self.rules.iter()
    }

    /// Groups with their flattened rule names, in registration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.groups.iter().map(|group| {
            let members = group
                .members
                .iter()
                .map(|member| self.rules[*member].name())
                .collect();
            (group.name.as_str(), members)
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
