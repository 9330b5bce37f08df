use std::collections::HashSet;

use shared::{IntoEnumIterator, MedalCatalog, MedalRecord, Rarity};

use crate::ownership::OwnershipStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Sheet order.
    #[default]
    Table,
    RarityDesc,
}

impl std::str::FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "table" => Ok(SortOrder::Table),
            "rarity" => Ok(SortOrder::RarityDesc),
            other => anyhow::bail!("Unknown sort order: {other}"),
        }
    }
}

/// State of the gallery controls.
#[derive(Debug, Clone)]
pub struct GalleryFilter {
    pub search: String,
    pub rarities: HashSet<Rarity>,
    pub hide_obtained: bool,
    pub sort: SortOrder,
}

impl Default for GalleryFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            rarities: Rarity::iter().collect(),
            hide_obtained: false,
            sort: SortOrder::Table,
        }
    }
}

impl GalleryFilter {
    fn all_rarities_enabled(&self) -> bool {
        Rarity::iter().all(|rarity| self.rarities.contains(&rarity))
    }

    pub fn matches(&self, medal: &MedalRecord, ownership: &OwnershipStore) -> bool {
        if self.hide_obtained && ownership.is_obtained(&medal.id) {
            return false;
        }

        let rarity_matches = match medal.rarity {
            Some(rarity) => self.rarities.contains(&rarity),
            None => self.all_rarities_enabled(),
        };

        rarity_matches
            && medal
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    pub fn apply<'a>(
        &self,
        catalog: &'a MedalCatalog,
        ownership: &OwnershipStore,
    ) -> Vec<&'a MedalRecord> {
        let mut medals: Vec<&MedalRecord> = catalog
            .medals()
            .iter()
            .filter(|medal| self.matches(medal, ownership))
            .collect();

        if self.sort == SortOrder::RarityDesc {
            medals.sort_by(|a, b| b.points().cmp(&a.points()));
        }
        medals
    }
}
