//! Per-request isolation keys.

use chrono::Utc;
use uuid::Uuid;

use batchforge_core::{
    application::ports::IsolationKeyStrategy,
    domain::IsolationKey,
    error::ForgeResult,
};

/// Longest artifact prefix kept in a key.
const MAX_PREFIX: usize = 48;

/// Keys from wall-clock time plus a random UUID.
///
/// * key: `<artifact>-<yyyyMMddHHmmssSSS>-<uuid>`, where `<artifact>` keeps
///   only ASCII alphanumerics, `-`, `_` and `.`
/// * archive token: `<unix millis>-<first 8 uuid hex digits>`
///
/// The UUID alone makes keys unique; the prefix and timestamp are there for
/// whoever reads the temp directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIsolationKeys;

impl RequestIsolationKeys {
    pub fn new() -> Self {
        Self
    }
}

impl IsolationKeyStrategy for RequestIsolationKeys {
    fn next_key(&self, artifact_id: &str) -> ForgeResult<IsolationKey> {
        let now = Utc::now();
        let id = Uuid::new_v4().simple().to_string();

        let key = format!(
            "{}-{}-{}",
            sanitize(artifact_id),
            now.format("%Y%m%d%H%M%S%3f"),
            id
        );
        let token = format!("{}-{}", now.timestamp_millis(), &id[..8]);
        Ok(IsolationKey::new(key, token)?)
    }
}

fn sanitize(artifact_id: &str) -> String {
    let cleaned: String = artifact_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .take(MAX_PREFIX)
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "project".to_string()
    } else {
        cleaned.to_string()
    }
}
