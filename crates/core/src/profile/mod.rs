//! User profile normalization and registration defaults.

pub mod error;
pub mod normalize;
pub mod types;

pub use error::ProfileError;
pub use normalize::{normalize_email, title_case};
pub use types::{PROFILE_DEFAULTS, ProfileDefaults, ProfileUpdate, ValidatedProfileUpdate};
