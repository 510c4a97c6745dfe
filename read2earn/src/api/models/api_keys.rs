//! API response models for upstream news provider keys.

use crate::db::models::api_keys::ProviderApiKey;
use crate::types::ApiKeyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Characters of the raw key left visible after masking.
const VISIBLE_SUFFIX: usize = 4;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ApiKeysQuery {
    /// Only keys for this provider, e.g. "newsapi"
    pub provider: Option<String>,
}

/// Provider key as shown to admins. The raw value never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderApiKeyInfo {
    #[schema(value_type = String, format = "uuid")]
    pub id: ApiKeyId,
    pub provider: String,
    /// e.g. "********a1b2"
    pub masked_key: String,
    pub is_active: bool,
    pub usage_count: i32,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ProviderApiKey> for ProviderApiKeyInfo {
    fn from(key: ProviderApiKey) -> Self {
        Self {
            masked_key: mask_key(&key.key_value),
            id: key.id,
            provider: key.provider,
            is_active: key.is_active,
            usage_count: key.usage_count,
            last_used_at: key.last_used_at,
            created_at: key.created_at,
        }
    }
}

/// Replace all but the last few characters with `*`. Short keys are masked entirely.
pub fn mask_key(raw: &str) -> String {
    let len = raw.chars().count();
    if len <= VISIBLE_SUFFIX * 2 {
        return "*".repeat(len.max(VISIBLE_SUFFIX));
    }
    let suffix: String = raw.chars().skip(len - VISIBLE_SUFFIX).collect();
    format!("{}{suffix}", "*".repeat(8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_last_four_characters() {
        assert_eq!(mask_key("sk-live-0123456789abcdef"), "********cdef");
    }

    #[test]
    fn short_keys_reveal_nothing() {
        assert_eq!(mask_key("abcd1234"), "********");
        assert_eq!(mask_key(""), "****");
    }
}
