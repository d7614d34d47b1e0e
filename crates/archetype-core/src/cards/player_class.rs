use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DataError;

/// Playable hero class. Every deck belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    #[serde(rename = "DEATHKNIGHT")]
    DeathKnight,
    #[serde(rename = "DRUID")]
    Druid,
    #[serde(rename = "HUNTER")]
    Hunter,
    #[serde(rename = "MAGE")]
    Mage,
    #[serde(rename = "PALADIN")]
    Paladin,
    #[serde(rename = "PRIEST")]
    Priest,
    #[serde(rename = "ROGUE")]
    Rogue,
    #[serde(rename = "SHAMAN")]
    Shaman,
    #[serde(rename = "WARLOCK")]
    Warlock,
    #[serde(rename = "WARRIOR")]
    Warrior,
    #[serde(rename = "DEMONHUNTER")]
    DemonHunter,
}

impl PlayerClass {
    pub const ALL: [PlayerClass; 11] = [
        PlayerClass::DeathKnight,
        PlayerClass::Druid,
        PlayerClass::Hunter,
        PlayerClass::Mage,
        PlayerClass::Paladin,
        PlayerClass::Priest,
        PlayerClass::Rogue,
        PlayerClass::Shaman,
        PlayerClass::Warlock,
        PlayerClass::Warrior,
        PlayerClass::DemonHunter,
    ];

    /// Stable numeric class id.
    pub fn id(self) -> u32 {
        match self {
            Self::DeathKnight => 1,
            Self::Druid => 2,
            Self::Hunter => 3,
            Self::Mage => 4,
            Self::Paladin => 5,
            Self::Priest => 6,
            Self::Rogue => 7,
            Self::Shaman => 8,
            Self::Warlock => 9,
            Self::Warrior => 10,
            Self::DemonHunter => 14,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Upper-case name, as used in serialized snapshots.
    pub fn name(self) -> &'static str {
        match self {
            Self::DeathKnight => "DEATHKNIGHT",
            Self::Druid => "DRUID",
            Self::Hunter => "HUNTER",
            Self::Mage => "MAGE",
            Self::Paladin => "PALADIN",
            Self::Priest => "PRIEST",
            Self::Rogue => "ROGUE",
            Self::Shaman => "SHAMAN",
            Self::Warlock => "WARLOCK",
            Self::Warrior => "WARRIOR",
            Self::DemonHunter => "DEMONHUNTER",
        }
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerClass {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == upper)
            .ok_or(DataError::UnknownPlayerClass {
                name: s.to_string(),
            })
    }
}
