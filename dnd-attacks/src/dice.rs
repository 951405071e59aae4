//! Damage dice for weapon and attack descriptions.
//!
//! Weapons declare their damage in standard notation (`1d8`, `2d6`). Attack
//! modes keep the die count and die type apart so rules can rewrite either.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for dice notation parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid dice notation: {0}")]
    InvalidNotation(String),
    #[error("Invalid die size: {0}")]
    InvalidDieSize(u32),
    #[error("No dice specified")]
    NoDice,
}

/// Standard D&D die types.
///
/// `D1` is the flat single point of damage dealt by an unarmed strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DieType {
    #[default]
    D1,
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieType {
    pub fn sides(&self) -> u32 {
        match self {
            DieType::D1 => 1,
            DieType::D4 => 4,
            DieType::D6 => 6,
            DieType::D8 => 8,
            DieType::D10 => 10,
            DieType::D12 => 12,
            DieType::D20 => 20,
            DieType::D100 => 100,
        }
    }

    pub fn from_sides(sides: u32) -> Option<DieType> {
        match sides {
            1 => Some(DieType::D1),
            4 => Some(DieType::D4),
            6 => Some(DieType::D6),
            8 => Some(DieType::D8),
            10 => Some(DieType::D10),
            12 => Some(DieType::D12),
            20 => Some(DieType::D20),
            100 => Some(DieType::D100),
            _ => None,
        }
    }
}

impl fmt::Display for DieType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A count of identical dice, e.g. `2d6`.
///
/// Serialized as its notation so item files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DamageDice {
    pub count: u32,
    pub die_type: DieType,
}

impl DamageDice {
    pub const fn new(count: u32, die_type: DieType) -> Self {
        Self { count, die_type }
    }

    /// Parse a dice notation string such as `1d8` or `d4`.
    ///
    /// Modifiers are rejected: flat bonuses live on damage forms, not dice.
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let notation = notation.trim().to_lowercase();
        if notation.is_empty() {
            return Err(DiceError::NoDice);
        }

        let d_pos = notation
            .find('d')
            .ok_or_else(|| DiceError::InvalidNotation(notation.clone()))?;
        let count_str = &notation[..d_pos];
        let sides_str = &notation[d_pos + 1..];

        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DiceError::InvalidNotation(notation.clone()))?
        };
        if count == 0 {
            return Err(DiceError::NoDice);
        }

        let sides: u32 = sides_str
            .parse()
            .map_err(|_| DiceError::InvalidNotation(notation.clone()))?;
        let die_type = DieType::from_sides(sides).ok_or(DiceError::InvalidDieSize(sides))?;

        Ok(Self { count, die_type })
    }

    /// Highest total these dice can roll, capped at `u32::MAX`.
    pub fn maximum(&self) -> u32 {
        self.count.saturating_mul(self.die_type.sides())
    }
}

impl FromStr for DamageDice {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DamageDice {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DamageDice> for String {
    fn from(dice: DamageDice) -> Self {
        dice.to_string()
    }
}

impl fmt::Display for DamageDice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.die_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let dice = DamageDice::parse("2d6").unwrap();
        assert_eq!(dice.count, 2);
        assert_eq!(dice.die_type, DieType::D6);
    }

    #[test]
    fn test_parse_implicit_count() {
        let dice: DamageDice = "D8".parse().unwrap();
        assert_eq!(dice, DamageDice::new(1, DieType::D8));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(DamageDice::parse(""), Err(DiceError::NoDice));
        assert_eq!(DamageDice::parse("0d6"), Err(DiceError::NoDice));
        assert_eq!(DamageDice::parse("1d7"), Err(DiceError::InvalidDieSize(7)));
        assert!(matches!(
            DamageDice::parse("1d6+2"),
            Err(DiceError::InvalidNotation(_))
        ));
        assert!(matches!(
            DamageDice::parse("sword"),
            Err(DiceError::InvalidNotation(_))
        ));
    }

    #[test]
    fn test_display_matches_notation() {
        assert_eq!(DamageDice::new(1, DieType::D10).to_string(), "1d10");
        assert_eq!(DamageDice::new(1, DieType::D1).maximum(), 1);
    }

    #[test]
    fn test_maximum_saturates() {
        assert_eq!(DamageDice::parse("3d6").unwrap().maximum(), 18);
        let huge = DamageDice::parse("4294967295d100").unwrap();
        assert_eq!(huge.maximum(), u32::MAX);
    }

    #[test]
    fn test_serde_as_notation() {
        let dice = DamageDice::new(1, DieType::D12);
        let json = serde_json::to_string(&dice).unwrap();
        assert_eq!(json, "\"1d12\"");
        let back: DamageDice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dice);
        assert!(serde_json::from_str::<DamageDice>("\"3d5\"").is_err());
    }
}
