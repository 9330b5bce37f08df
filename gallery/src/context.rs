use std::sync::Arc;

use shared::{
    compute_ranking,
    loader::{TableLoader, Tables},
    MedalCatalog, MedalRecord, RankingEntry, UserDirectory, UserRecord,
};
use tracing::{info, instrument};

use crate::{
    config::Config,
    gallery::GalleryFilter,
    ownership::{FileStorage, OwnershipStore},
    profile::Profile,
};

/// Everything the views read from, built once at startup.
#[derive(Debug)]
pub struct Context {
    pub catalog: Arc<MedalCatalog>,
    pub users: Arc<UserDirectory>,
    pub ownership: OwnershipStore,
}

impl Context {
    pub fn new(tables: &Tables, ownership: OwnershipStore) -> Self {
        Self {
            catalog: MedalCatalog::from_rows(&tables.medals).into(),
            users: UserDirectory::from_rows(&tables.users).into(),
            ownership,
        }
    }

    /// Loads both sheets and the local ownership slot. Any sheet failure
    /// aborts the whole startup.
    #[instrument(skip(config))]
    pub async fn load(config: &Config) -> anyhow::Result<Self> {
        let loader = TableLoader::new(config.fetch_timeout())?;
        let tables = loader
            .load_tables(&config.medals_sheet_url, &config.users_sheet_url)
            .await?;
        let ownership = OwnershipStore::load(
            FileStorage::new(config.storage_dir.clone()),
            &config.storage_slot,
        );

        let context = Self::new(&tables, ownership);
        info!(
            "Loaded {} medals and {} users, {} medals obtained locally",
            context.catalog.len(),
            context.users.len(),
            context.ownership.len()
        );
        Ok(context)
    }

    pub fn list_medals(&self) -> &[MedalRecord] {
        self.catalog.medals()
    }

    pub fn list_filtered(&self, filter: &GalleryFilter) -> Vec<&MedalRecord> {
        filter.apply(&self.catalog, &self.ownership)
    }

    pub fn is_obtained(&self, id: &str) -> bool {
        self.ownership.is_obtained(id)
    }

    pub fn toggle(&mut self, id: &str) -> anyhow::Result<bool> {
        self.ownership.toggle(id)
    }

    pub fn compute_ranking(&self) -> Vec<RankingEntry> {
        compute_ranking(&self.users, &self.catalog)
    }

    pub fn find_user(&self, name: &str) -> Option<&UserRecord> {
        self.users.find_by_username(name)
    }

    pub fn profile(&self, name: &str) -> Option<Profile<'_>> {
        let user = self.find_user(name)?;
        Some(Profile::build(user, &self.catalog, &self.compute_ranking()))
    }
}
