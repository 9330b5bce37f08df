mod catalog;
mod csv;
mod medal;
mod ranking;
mod user;

#[cfg(feature = "client")]
pub mod loader;

pub use catalog::*;
pub use csv::*;
pub use medal::*;
pub use ranking::*;
pub use user::*;

pub use strum::IntoEnumIterator;

pub type MedalId = String;
pub type Username = String;

/// Column names of the medal spreadsheet export.
pub mod medal_columns {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Nombre";
    pub const DESCRIPTION: &str = "Descripción";
    pub const RARITY: &str = "Rareza";
    pub const IMAGE_URL: &str = "ImagenURL";
}

/// Column names of the user spreadsheet export.
pub mod user_columns {
    pub const USERNAME: &str = "NombreUsuario";
    pub const AVATAR_URL: &str = "AvatarURL";
    pub const OWNED_MEDALS: &str = "MedallasObtenidas";
}
