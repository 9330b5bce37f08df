use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::*;

/// Rarity tier of a medal, ordered from the most common to the rarest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
)]
pub enum Rarity {
    N,
    R,
    SR,
    SSR,
    UR,
}

impl Rarity {
    /// Score a single medal of this tier is worth in the ranking.
    pub const fn points(&self) -> u32 {
        match self {
            Rarity::N => 1,
            Rarity::R => 2,
            Rarity::SR => 3,
            Rarity::SSR => 4,
            Rarity::UR => 5,
        }
    }

    /// Position of the tier in [`Rarity::iter`] order.
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Parses the trimmed rarity code from the spreadsheet, e.g. `"SSR"`.
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }
}

pub const RARITY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
    pub id: MedalId,
    pub name: String,
    pub description: String,
    /// `None` when the sheet holds a code outside the known tiers.
    pub rarity: Option<Rarity>,
    pub image_url: String,
}

impl MedalRecord {
    pub fn from_row(row: &Row) -> Self {
        Self {
            id: field(row, medal_columns::ID).to_string(),
            name: field(row, medal_columns::NAME).to_string(),
            description: field(row, medal_columns::DESCRIPTION).to_string(),
            rarity: Rarity::from_code(field(row, medal_columns::RARITY)),
            image_url: field(row, medal_columns::IMAGE_URL).to_string(),
        }
    }

    pub fn points(&self) -> u32 {
        self.rarity.map(|r| r.points()).unwrap_or_default()
    }
}
