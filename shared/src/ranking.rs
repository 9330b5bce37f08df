use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::*;

/// Per-tier medal counters, always holding all five tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityCounts([u32; RARITY_COUNT]);

impl RarityCounts {
    pub fn get(&self, rarity: Rarity) -> u32 {
        self.0[rarity.index()]
    }

    pub fn increment(&mut self, rarity: Rarity) {
        self.0[rarity.index()] += 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Rarity, u32)> + '_ {
        Rarity::iter().map(|rarity| (rarity, self.get(rarity)))
    }

    pub fn to_map(&self) -> BTreeMap<Rarity, u32> {
        self.iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub username: Username,
    pub avatar_url: String,
    pub counts: RarityCounts,
    /// Owned medals that resolved to a catalog entry.
    pub total_medals: u32,
    pub total_points: u32,
}

impl RankingEntry {
    pub fn for_user(user: &UserRecord, catalog: &MedalCatalog) -> Self {
        let mut entry = Self {
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            counts: RarityCounts::default(),
            total_medals: 0,
            total_points: 0,
        };

        let rarities = user
            .owned_medal_ids()
            .filter_map(|id| catalog.find_by_id(id))
            .filter_map(|medal| medal.rarity);
        for rarity in rarities {
            entry.counts.increment(rarity);
            entry.total_medals += 1;
            entry.total_points += rarity.points();
        }
        entry
    }
}

/// Ranks every user by total points, highest first. Users with equal points
/// keep their directory order.
pub fn compute_ranking(users: &UserDirectory, catalog: &MedalCatalog) -> Vec<RankingEntry> {
    users
        .users()
        .iter()
        .map(|user| RankingEntry::for_user(user, catalog))
        .sorted_by(|a, b| b.total_points.cmp(&a.total_points))
        .collect()
}

/// 1-based place of the entry whose username is exactly `username`.
pub fn ranking_place(ranking: &[RankingEntry], username: &str) -> Option<usize> {
    ranking
        .iter()
        .position(|entry| entry.username == username)
        .map(|index| index + 1)
}
