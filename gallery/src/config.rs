use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

pub const DEFAULT_MEDALS_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1uxeXCUyWi2kLAWEGJjZ91zutr18sr7_QjHqxfPVzgCA/export?format=csv&gid=0";
pub const DEFAULT_USERS_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1Pri9HhHGipD08e847iUKruXPLzG9tWki3N5rQPu2cMw/export?format=csv&gid=0";
pub const DEFAULT_STORAGE_SLOT: &str = "misMedallas";

/// Settings read from the environment (and `.env`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_medals_sheet_url")]
    pub medals_sheet_url: String,
    #[serde(default = "default_users_sheet_url")]
    pub users_sheet_url: String,
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    #[serde(default = "default_storage_slot")]
    pub storage_slot: String,
    pub fetch_timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(envy::from_env::<Self>()?)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }
}

fn default_medals_sheet_url() -> String {
    DEFAULT_MEDALS_SHEET_URL.to_string()
}

fn default_users_sheet_url() -> String {
    DEFAULT_USERS_SHEET_URL.to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".gallery")
}

fn default_storage_slot() -> String {
    DEFAULT_STORAGE_SLOT.to_string()
}
