pub mod rating;

pub use rating::{get_all_ratings, get_ratings_for_blend, submit_rating};
