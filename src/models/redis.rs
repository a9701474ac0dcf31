pub struct RedisKey;

impl RedisKey {
    /// One record per rating, keyed by the dedupe key so SET NX enforces
    /// the one-rating-per-submitter-per-blend invariant.
    pub fn rating(dedupe_key: &str) -> String {
        format!("rating:{dedupe_key}")
    }

    pub fn blend_ratings(blend_key: &str) -> String {
        format!("ratings:blend:{blend_key}")
    }

    pub fn all_ratings() -> String {
        "ratings:all".to_string()
    }
}
