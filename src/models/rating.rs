use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::errors::AppError;

/// Ordinal scales for the four blend profile attributes, matching the ones
/// the blend popup renders. Submitted profile labels must come from here.
pub static PROFILE_SCALES: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (
            "strength",
            vec![
                "Extremely Mild",
                "Very Mild",
                "Mild",
                "Mild to Medium",
                "Medium",
                "Medium to Strong",
                "Strong",
                "Very Strong",
                "Extremely Strong",
                "Overwhelming",
            ],
        ),
        (
            "flavoring",
            vec![
                "None Detected",
                "Extremely Mild",
                "Very Mild",
                "Mild",
                "Mild to Medium",
                "Medium",
                "Medium to Strong",
                "Strong",
                "Very Strong",
                "Overwhelming",
            ],
        ),
        (
            "roomNote",
            vec![
                "Unnoticeable",
                "Pleasant",
                "Very Pleasant",
                "Pleasant to Tolerable",
                "Tolerable",
                "Tolerable to Strong",
                "Strong",
                "Very Strong",
                "Extra Strong",
                "Overwhelming",
            ],
        ),
        (
            "taste",
            vec![
                "Extremely Mild",
                "Very Mild",
                "Mild",
                "Mild to Medium",
                "Medium",
                "Medium to Full",
                "Full",
                "Very Full",
                "Extra Full",
                "Overwhelming",
            ],
        ),
    ])
});

/// A stored blend rating. Append-only: nothing in the crate updates or
/// deletes one of these once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: Uuid,
    pub blend_key: String,
    pub timestamp: DateTime<Utc>,
    pub star_rating: f32,
    pub profiles: HashMap<String, String>,
    pub user_name: String,
    pub user_email: Option<String>,
    pub comments: Option<String>,
    pub ip_hash: String,
    pub dedupe_key: String,
}

/// Incoming rating body. Accepts the current `blendKey` field as well as the
/// legacy `blendId` scheme (a blend data filename) that cached pages still
/// send; `normalize` folds both into one shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPayload {
    pub blend_key: Option<String>,
    pub blend_id: Option<String>,
    pub rating: Option<f32>,
    #[serde(default)]
    pub profiles: HashMap<String, String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub comments: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A payload that passed validation, ready to be stamped with the submitter
/// hash and persisted.
#[derive(Debug, Clone)]
pub struct NormalizedRating {
    pub blend_key: String,
    pub star_rating: f32,
    pub profiles: HashMap<String, String>,
    pub user_name: String,
    pub user_email: Option<String>,
    pub comments: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl RatingPayload {
    pub fn normalize(self) -> Result<NormalizedRating, AppError> {
        let blend_key = self
            .blend_key
            .filter(|key| !key.is_empty())
            .or_else(|| {
                self.blend_id
                    .as_deref()
                    .map(|id| id.strip_suffix(".json").unwrap_or(id).to_string())
                    .filter(|key| !key.is_empty())
            });

        let (blend_key, star_rating) = match (blend_key, self.rating) {
            (Some(key), Some(value)) => (key, value),
            (key, value) => {
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push("blendKey".to_string());
                }
                if value.is_none() {
                    missing.push("rating".to_string());
                }
                return Err(AppError::MissingFields(missing));
            }
        };

        validate_star_rating(star_rating)?;
        validate_profiles(&self.profiles)?;

        Ok(NormalizedRating {
            blend_key,
            star_rating,
            profiles: self.profiles,
            user_name: self
                .user_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string()),
            user_email: self.user_email,
            comments: self.comments,
            timestamp: self.timestamp,
        })
    }
}

impl NormalizedRating {
    pub fn into_rating(self, ip_hash: String) -> Rating {
        let dedupe_key = dedupe_key(&ip_hash, &self.blend_key);
        Rating {
            id: Uuid::new_v4(),
            blend_key: self.blend_key,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            star_rating: self.star_rating,
            profiles: self.profiles,
            user_name: self.user_name,
            user_email: self.user_email,
            comments: self.comments,
            ip_hash,
            dedupe_key,
        }
    }
}

pub fn validate_star_rating(value: f32) -> Result<(), AppError> {
    if !(0.5..=4.0).contains(&value) || (value * 2.0).fract() != 0.0 {
        return Err(AppError::InvalidValue(
            "Invalid rating value. Must be between 0.5 and 4 in half-star increments.".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_profiles(profiles: &HashMap<String, String>) -> Result<(), AppError> {
    for (attribute, label) in profiles {
        let Some(scale) = PROFILE_SCALES.get(attribute.as_str()) else {
            return Err(AppError::InvalidValue(format!(
                "Unknown profile attribute: {attribute}"
            )));
        };
        if !scale.contains(&label.as_str()) {
            return Err(AppError::InvalidValue(format!(
                "Invalid {attribute} label: {label}"
            )));
        }
    }
    Ok(())
}

/// One-way hash of the submitter address. Only the hash is ever stored.
pub fn hash_ip(address: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.as_bytes());
    hasher.update(salt.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

pub fn dedupe_key(ip_hash: &str, blend_key: &str) -> String {
    format!("{ip_hash}:{blend_key}")
}
