//! # configs
//! campus-hub/crates/configs/src/lib.rs
//! Typed runtime settings, layered from an optional `campus-hub.toml` and
//! `CAMPUS_HUB__*` environment variables (a `.env` file is honored).

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory the JSON collection slots live under.
    pub data_dir: String,
    pub profile: ProfileSettings,
    pub notifications: NotificationSettings,
}

/// The account acting as the signed-in user for this process.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileSettings {
    pub email: String,
    pub full_name: String,
    /// "student" or "admin".
    pub role: String,
    pub roll_no: Option<String>,
    pub course: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationSettings {
    /// Entries kept per user in the notification log; older ones are pruned.
    pub retention: usize,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let settings: Settings = config::Config::builder()
            .set_default("data_dir", "./data")?
            .set_default("profile.email", "dev@campus.test")?
            .set_default("profile.full_name", "Dev User")?
            .set_default("profile.role", "student")?
            .set_default("notifications.retention", 200)?
            .add_source(config::File::with_name("campus-hub").required(false))
            .add_source(config::Environment::with_prefix("CAMPUS_HUB").separator("__"))
            .build()?
            .try_deserialize()?;

        debug!(data_dir = %settings.data_dir, "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_a_bare_environment() {
        let settings = Settings::load().expect("defaults should satisfy the schema");
        assert_eq!(settings.notifications.retention, 200);
        assert!(!settings.profile.email.is_empty());
    }
}
