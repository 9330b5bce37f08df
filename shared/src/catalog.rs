use std::collections::HashMap;

use tracing::warn;

use super::*;

/// Medals of one load cycle, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct MedalCatalog {
    medals: Vec<MedalRecord>,
    by_id: HashMap<MedalId, usize>,
}

impl MedalCatalog {
    pub fn new(medals: Vec<MedalRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(medals.len());
        for (index, medal) in medals.iter().enumerate() {
            if by_id.contains_key(&medal.id) {
                warn!("Duplicate medal id {} in catalog, keeping the first", medal.id);
                continue;
            }
            by_id.insert(medal.id.clone(), index);
        }
        Self { medals, by_id }
    }

    pub fn from_rows(rows: &[Row]) -> Self {
        Self::new(rows.iter().map(MedalRecord::from_row).collect())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&MedalRecord> {
        self.by_id.get(id).map(|&index| &self.medals[index])
    }

    /// All medals in sheet order.
    pub fn medals(&self) -> &[MedalRecord] {
        &self.medals
    }

    pub fn len(&self) -> usize {
        self.medals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medals.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<UserRecord>,
}

impl UserDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn from_rows(rows: &[Row]) -> Self {
        Self::new(rows.iter().map(UserRecord::from_row).collect())
    }

    /// Case-insensitive exact match. A blank name never matches.
    pub fn find_by_username(&self, name: &str) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.matches_username(name))
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEDALS: &str = "ID,Nombre,Descripción,Rareza,ImagenURL
A,Alpha,First,SSR,a.png
B,Beta,Second,N,b.png
A,Shadow,Duplicate,UR,c.png
";

    const USERS: &str = "NombreUsuario,AvatarURL,MedallasObtenidas
Alice,alice.png,\"A,B\"
Bob,bob.png,
";

    #[test]
    fn find_medal() {
        let catalog = MedalCatalog::from_rows(&parse_table(MEDALS));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find_by_id("B").map(|m| m.name.as_str()), Some("Beta"));
        assert!(catalog.find_by_id("ZZZ").is_none());
    }

    #[test]
    fn duplicate_id_resolves_to_first_row() {
        let catalog = MedalCatalog::from_rows(&parse_table(MEDALS));
        let medal = catalog.find_by_id("A").unwrap();
        assert_eq!(medal.name, "Alpha");
        assert_eq!(medal.rarity, Some(Rarity::SSR));
    }

    #[test]
    fn find_user_case_insensitive() {
        let users = UserDirectory::from_rows(&parse_table(USERS));
        assert_eq!(users.len(), 2);
        for query in ["Alice", "alice", "ALICE"] {
            assert_eq!(
                users.find_by_username(query).map(|u| u.avatar_url.as_str()),
                Some("alice.png")
            );
        }
        assert!(users.find_by_username("").is_none());
        assert!(users.find_by_username(" alice ").is_none());
        assert!(users.find_by_username("Carol").is_none());
        assert_eq!(users.find_by_username("bob").unwrap().owned_medals, "");
    }
}
