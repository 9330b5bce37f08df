use shared::{MedalRecord, RankingEntry};

use crate::profile::{profile_link, Profile};

pub fn medal_line(medal: &MedalRecord, obtained: bool) -> String {
    let mark = if obtained { "[x]" } else { "[ ]" };
    let rarity = medal
        .rarity
        .map(|r| r.to_string())
        .unwrap_or_else(|| "?".to_string());
    let mut result = format!("{mark} {:<4} {} (ID: {})", rarity, medal.name, medal.id);
    if !medal.description.is_empty() {
        result.push_str(&format!("\n      {}", medal.description));
    }
    result
}

pub fn ranking_line(place: usize, entry: &RankingEntry) -> String {
    format!(
        "{place:>3}. {} | Medals: {} | Points: {}  {}",
        entry.username,
        entry.total_medals,
        entry.total_points,
        profile_link(&entry.username)
    )
}

pub fn ranking(entries: &[RankingEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ranking_line(i + 1, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn rarity_breakdown(entry: &RankingEntry) -> String {
    entry
        .counts
        .iter()
        .map(|(rarity, count)| format!("{rarity}: {count}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn profile(profile: &Profile<'_>) -> String {
    let place = profile
        .place
        .map(|p| format!("#{p}"))
        .unwrap_or_else(|| "N/A".to_string());
    let mut result = format!(
        "{} (place {place})\nAvatar: {}\nMedals: {} | Points: {}\n{}",
        profile.user.username,
        profile.user.avatar_url,
        profile.entry.total_medals,
        profile.entry.total_points,
        rarity_breakdown(&profile.entry)
    );
    for medal in &profile.medals {
        result.push('\n');
        result.push_str(&medal_line(medal, true));
    }
    result
}
