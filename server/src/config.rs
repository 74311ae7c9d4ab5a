use std::path::PathBuf;

use anyhow::{Context, Result};
use platform_api::MessageCatalog;
use platform_db::DatabaseSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub cors_allowed_origins: Vec<String>,
    pub messages_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let database = DatabaseSettings::from_env().context("invalid database settings")?;

        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let messages_path = std::env::var("MESSAGES_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database,
            cors_allowed_origins,
            messages_path,
        })
    }

    /// Violation messages from `MESSAGES_PATH`, or an empty catalog.
    pub fn message_catalog(&self) -> Result<MessageCatalog> {
        match &self.messages_path {
            Some(path) => MessageCatalog::from_path(path)
                .with_context(|| format!("failed to load messages from {}", path.display())),
            None => Ok(MessageCatalog::default()),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use products_hr::{EmployeePayload, Mode, validation::violations};

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test, ,http://b.test ,"),
            vec!["http://a.test", "http://b.test"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn missing_messages_file_is_an_error() {
        let config = AppConfig {
            database: DatabaseSettings::default(),
            cors_allowed_origins: Vec::new(),
            messages_path: Some(PathBuf::from("/nonexistent/messages.json")),
        };
        assert!(config.message_catalog().is_err());
    }

    #[test]
    fn shipped_catalog_matches_builtin_messages() {
        let config = AppConfig {
            database: DatabaseSettings::default(),
            cors_allowed_origins: Vec::new(),
            messages_path: Some(PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/messages.json"
            ))),
        };
        let shipped = config.message_catalog().unwrap();
        assert!(!shipped.is_empty());

        let builtin = MessageCatalog::default();
        let samples = [
            (payload(Some(1), "", -1, ""), Mode::Create),
            (payload(None, "Foo", 1, "it"), Mode::Update { path_id: 7 }),
            (payload(Some(3), "Foo", 1, "it"), Mode::Update { path_id: 7 }),
            (EmployeePayload::default(), Mode::Create),
        ];
        for (body, mode) in samples {
            let found = violations(&body, mode);
            assert!(!found.is_empty());
            for violation in &found {
                assert_eq!(violation.render(&shipped), violation.render(&builtin));
            }
        }
    }

    fn payload(id: Option<i64>, name: &str, salary: i32, department: &str) -> EmployeePayload {
        EmployeePayload {
            id,
            name: Some(name.to_string()),
            salary: Some(salary),
            department: Some(department.to_string()),
        }
    }

    #[test]
    fn no_messages_path_means_empty_catalog() {
        let config = AppConfig {
            database: DatabaseSettings::default(),
            cors_allowed_origins: Vec::new(),
            messages_path: None,
        };
        assert!(config.message_catalog().unwrap().is_empty());
    }
}
