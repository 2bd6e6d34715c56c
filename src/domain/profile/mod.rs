pub mod entity;
pub mod form;
pub mod invariants;

pub use entity::{Profile, ProfileField, RegistrationKind};
pub use form::{normalize_date_of_birth, ProfileForm};
pub use invariants::validate_profile_form;
