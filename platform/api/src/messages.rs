use std::{collections::HashMap, path::Path};

use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;

use crate::Violation;

static INSTALLED: OnceCell<MessageCatalog> = OnceCell::new();
static EMPTY: Lazy<MessageCatalog> = Lazy::new(MessageCatalog::default);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read message catalog {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("message catalog is not a JSON object of strings")]
    Parse(#[from] serde_json::Error),
    #[error("message catalog already installed")]
    AlreadyInstalled,
}

/// Localized violation messages keyed by rule code.
///
/// Lookup tries `<code>.<object>.<field>`, then `<code>.<field>`, then
/// `<code>`, and falls back to the violation's default message.
#[derive(Clone, Debug, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, String> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, violation: &Violation) -> String {
        let keys = [
            format!("{}.{}.{}", violation.code, violation.object, violation.field),
            format!("{}.{}", violation.code, violation.field),
            violation.code.to_string(),
        ];
        let Some(template) = keys.iter().find_map(|key| self.entries.get(key)) else {
            return violation.default_message.clone();
        };
        match &violation.argument {
            Some(argument) => template.replace("{0}", argument),
            None => template.clone(),
        }
    }
}

/// Install the process-wide catalog used when rendering error responses.
pub fn install_catalog(catalog: MessageCatalog) -> Result<(), CatalogError> {
    INSTALLED
        .set(catalog)
        .map_err(|_| CatalogError::AlreadyInstalled)
}

/// The installed catalog, or an empty one when nothing was installed.
pub fn catalog() -> &'static MessageCatalog {
    INSTALLED.get().unwrap_or(&*EMPTY)
}
