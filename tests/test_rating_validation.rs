use blend_ratings_be::errors::AppError;
use blend_ratings_be::models::rating::{
    PROFILE_SCALES, RatingPayload, dedupe_key, hash_ip, validate_star_rating,
};
use blend_ratings_be::models::redis::RedisKey;
use chrono::{TimeZone, Utc};
use serde_json::json;

fn payload_from(value: serde_json::Value) -> RatingPayload {
    serde_json::from_value(value).expect("payload should deserialize")
}

#[test]
fn test_normalize_current_scheme() {
    let payload = payload_from(json!({
        "blendKey": "latakia-blend-1",
        "rating": 3.5,
        "profiles": { "strength": "Medium" },
        "userName": "Briar",
        "userEmail": "briar@example.com",
        "comments": "Smoky."
    }));

    let normalized = payload.normalize().expect("valid payload");
    assert_eq!(normalized.blend_key, "latakia-blend-1");
    assert_eq!(normalized.star_rating, 3.5);
    assert_eq!(
        normalized.profiles.get("strength").map(String::as_str),
        Some("Medium")
    );
    assert_eq!(normalized.user_name, "Briar");
    assert_eq!(normalized.user_email.as_deref(), Some("briar@example.com"));
    assert_eq!(normalized.comments.as_deref(), Some("Smoky."));
}

#[test]
fn test_normalize_legacy_blend_id() {
    // Legacy pages send the blend data filename instead of the key.
    let payload = payload_from(json!({ "blendId": "navy-flake.json", "rating": 2.0 }));
    let normalized = payload.normalize().expect("valid payload");
    assert_eq!(normalized.blend_key, "navy-flake");

    // A legacy id without the suffix passes through untouched.
    let payload = payload_from(json!({ "blendId": "navy-flake", "rating": 2.0 }));
    assert_eq!(payload.normalize().unwrap().blend_key, "navy-flake");

    // The current field wins when both schemes are present.
    let payload = payload_from(json!({
        "blendKey": "virginia-no-27",
        "blendId": "navy-flake.json",
        "rating": 2.0
    }));
    assert_eq!(payload.normalize().unwrap().blend_key, "virginia-no-27");
}

#[test]
fn test_missing_fields_are_enumerated() {
    match payload_from(json!({})).normalize() {
        Err(AppError::MissingFields(fields)) => {
            assert_eq!(fields, vec!["blendKey".to_string(), "rating".to_string()]);
        }
        other => panic!("Expected MissingFields, got {:?}", other),
    }

    match payload_from(json!({ "blendKey": "navy-flake" })).normalize() {
        Err(AppError::MissingFields(fields)) => {
            assert_eq!(fields, vec!["rating".to_string()]);
        }
        other => panic!("Expected MissingFields, got {:?}", other),
    }

    match payload_from(json!({ "rating": 5.0 })).normalize() {
        Err(AppError::MissingFields(fields)) => {
            assert_eq!(fields, vec!["blendKey".to_string()]);
        }
        other => panic!("Expected MissingFields, got {:?}", other),
    }

    // An empty key is as good as a missing one.
    match payload_from(json!({ "blendKey": "", "rating": 2.0 })).normalize() {
        Err(AppError::MissingFields(fields)) => {
            assert_eq!(fields, vec!["blendKey".to_string()]);
        }
        other => panic!("Expected MissingFields, got {:?}", other),
    }
}

#[test]
fn test_star_rating_half_star_grid() {
    // Every half step between 0.5 and 4.0 is accepted
    for step in 1..=8 {
        let value = step as f32 * 0.5;
        assert!(validate_star_rating(value).is_ok(), "{} should pass", value);
    }

    // Everything else is rejected
    for value in [0.0, 0.25, 0.75, 3.9, 4.5, 5.0, -1.0, f32::NAN] {
        assert!(validate_star_rating(value).is_err(), "{} should fail", value);
    }

    let result = validate_star_rating(4.5);
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("half-star increments")
    );
}

#[test]
fn test_out_of_range_rating_rejected_in_normalize() {
    let payload = payload_from(json!({ "blendKey": "navy-flake", "rating": 5.0 }));
    match payload.normalize() {
        Err(AppError::InvalidValue(msg)) => {
            assert!(msg.contains("between 0.5 and 4"));
        }
        other => panic!("Expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_profile_validation() {
    let payload = payload_from(json!({
        "blendKey": "navy-flake",
        "rating": 3.0,
        "profiles": {
            "strength": "Mild to Medium",
            "taste": "Very Full",
            "roomNote": "Pleasant",
            "flavoring": "None Detected"
        }
    }));
    assert!(payload.normalize().is_ok());

    let payload = payload_from(json!({
        "blendKey": "navy-flake",
        "rating": 3.0,
        "profiles": { "nicotine": "Medium" }
    }));
    let result = payload.normalize();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Unknown profile attribute: nicotine")
    );

    let payload = payload_from(json!({
        "blendKey": "navy-flake",
        "rating": 3.0,
        "profiles": { "strength": "Full" }
    }));
    let result = payload.normalize();
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Invalid strength label: Full")
    );
}

#[test]
fn test_profile_scales_shape() {
    assert_eq!(PROFILE_SCALES.len(), 4);
    for attribute in ["strength", "flavoring", "roomNote", "taste"] {
        let scale = PROFILE_SCALES
            .get(attribute)
            .unwrap_or_else(|| panic!("Scale '{}' not found", attribute));
        assert_eq!(scale.len(), 10, "{} scale should have 10 labels", attribute);
    }
}

#[test]
fn test_hash_ip_is_stable_hex() {
    let hash = hash_ip("203.0.113.9", "TabacWikiSalt");
    assert_eq!(
        hash,
        "2da321201212ec9ed591ad125421092613a1d505c86781d0c485882362cb68a1"
    );

    // Same inputs, same hash
    assert_eq!(hash, hash_ip("203.0.113.9", "TabacWikiSalt"));

    // Different address or salt, different hash
    assert_ne!(hash, hash_ip("203.0.113.10", "TabacWikiSalt"));
    assert_ne!(hash, hash_ip("203.0.113.9", "OtherSalt"));

    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn test_dedupe_key_shape() {
    assert_eq!(dedupe_key("abc123", "navy-flake"), "abc123:navy-flake");
}

#[test]
fn test_into_rating_stamps_identity() {
    let payload = payload_from(json!({ "blendKey": "navy-flake", "rating": 1.5 }));
    let normalized = payload.normalize().expect("valid payload");

    let hash = hash_ip("203.0.113.9", "TabacWikiSalt");
    let rating = normalized.clone().into_rating(hash.clone());

    assert_eq!(rating.blend_key, "navy-flake");
    assert_eq!(rating.star_rating, 1.5);
    assert_eq!(rating.ip_hash, hash);
    assert_eq!(rating.dedupe_key, format!("{}:navy-flake", hash));
    assert_eq!(rating.user_name, "Anonymous");

    // Ids are freshly generated per rating
    let again = normalized.into_rating(hash);
    assert_ne!(rating.id, again.id);
}

#[test]
fn test_into_rating_keeps_client_timestamp() {
    let submitted = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
    let payload = payload_from(json!({
        "blendKey": "navy-flake",
        "rating": 1.5,
        "timestamp": submitted.to_rfc3339()
    }));

    let rating = payload
        .normalize()
        .expect("valid payload")
        .into_rating("hash".to_string());
    assert_eq!(rating.timestamp, submitted);
}

#[test]
fn test_redis_key_shapes() {
    assert_eq!(RedisKey::rating("abc:navy-flake"), "rating:abc:navy-flake");
    assert_eq!(
        RedisKey::blend_ratings("navy-flake"),
        "ratings:blend:navy-flake"
    );
    assert_eq!(RedisKey::all_ratings(), "ratings:all");
}
