//! `SQLite` implementation of the `SettingsRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use parlons_core::{RepositoryError, Settings, SettingsRepository};

/// Stores settings as a JSON blob in a key-value table.
pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    /// Create a new `SQLite` settings repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SETTINGS_KEY: &str = "app_settings";

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        let row = sqlx::query("SELECT value FROM settings_kv WHERE key = ?")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        match row {
            Some(r) => {
                let json: String = r.get("value");
                serde_json::from_str(&json)
                    .map_err(|e| RepositoryError::Serialization(e.to_string()))
            }
            None => Ok(Settings::default()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let updated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        sqlx::query("INSERT OR REPLACE INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(SETTINGS_KEY)
            .bind(&json)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_test_database;
    use parlons_core::PromptLanguage;

    #[tokio::test]
    async fn test_load_returns_defaults_when_empty() {
        let repo = SqliteSettingsRepository::new(setup_test_database().await.unwrap());

        let settings = repo.load().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = SqliteSettingsRepository::new(setup_test_database().await.unwrap());

        let settings = Settings {
            api_key: "sk-test".to_string(),
            voice_id_fr: "EXAVITQu4vr4xnSDxMaL".to_string(),
            prompt_language: PromptLanguage::Secondary,
            ..Settings::default()
        };

        repo.save(&settings).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_old_record_gets_new_defaults() {
        let pool = setup_test_database().await.unwrap();
        sqlx::query("INSERT INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(SETTINGS_KEY)
            .bind(r#"{"api_key":"k","prompt_language":"en"}"#)
            .bind("2024-01-01 00:00:00")
            .execute(&pool)
            .await
            .unwrap();

        let loaded = SqliteSettingsRepository::new(pool).load().await.unwrap();
        assert_eq!(loaded.api_key, "k");
        assert_eq!(loaded.prompt_language, PromptLanguage::Secondary);
        assert_eq!(loaded.model_id, parlons_core::DEFAULT_MODEL_ID);
    }
}
