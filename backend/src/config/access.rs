//! Portal access configuration

use serde::Deserialize;

use super::error::ValidationError;

/// First admins of portals that have no grants yet
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Comma-separated `portal:user_id` pairs, e.g.
    /// `company.bitrix24.ru:1,other.bitrix24.ru:7`
    pub bootstrap_admins: Option<String>,
}

impl AccessConfig {
    /// Parsed `(portal, user_id)` pairs; blank entries are skipped.
    pub fn bootstrap_pairs(&self) -> Result<Vec<(String, String)>, ValidationError> {
        let Some(raw) = self.bootstrap_admins.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.rsplit_once(':') {
                Some((portal, user)) if !portal.trim().is_empty() && !user.trim().is_empty() => {
                    Ok((portal.trim().to_string(), user.trim().to_string()))
                }
                _ => Err(ValidationError::InvalidBootstrapAdmin(entry.to_string())),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bootstrap_pairs().map(|_| ())
    }
}
