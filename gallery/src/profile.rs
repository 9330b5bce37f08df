use serde::Serialize;
use shared::{ranking_place, MedalCatalog, MedalRecord, RankingEntry, UserRecord};
use url::form_urlencoded;

pub const PROFILE_PAGE: &str = "perfil.html";
pub const USER_PARAM: &str = "user";

/// Extracts the `user` parameter from a profile page query string.
pub fn username_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == USER_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub fn profile_link(username: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(USER_PARAM, username)
        .finish();
    format!("{PROFILE_PAGE}?{query}")
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile<'a> {
    pub user: &'a UserRecord,
    pub medals: Vec<&'a MedalRecord>,
    pub entry: RankingEntry,
    pub place: Option<usize>,
}

impl<'a> Profile<'a> {
    pub fn build(user: &'a UserRecord, catalog: &'a MedalCatalog, ranking: &[RankingEntry]) -> Self {
        let medals = user
            .owned_medal_ids()
            .filter_map(|id| catalog.find_by_id(id))
            .collect();
        Self {
            user,
            medals,
            entry: RankingEntry::for_user(user, catalog),
            place: ranking_place(ranking, &user.username),
        }
    }
}
