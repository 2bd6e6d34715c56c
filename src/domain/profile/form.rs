use chrono::{DateTime, NaiveDate};
use std::collections::HashSet;

use super::entity::{Profile, ProfileField};
use crate::domain::{DomainError, DomainResult};

/// Editable copy of a profile plus the set of fields the user may no longer change.
///
/// Locks are a presentation concern; the backend rejects changes to frozen
/// fields on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    values: Profile,
    locked: HashSet<ProfileField>,
}

impl ProfileForm {
    /// Empty form for a first-time profile. Email comes from the session.
    pub fn blank(session_email: &str) -> Self {
        Self {
            values: Profile::with_email(session_email),
            locked: HashSet::new(),
        }
    }

    /// Form seeded from a persisted profile
    pub fn from_profile(profile: &Profile, session_email: Option<&str>) -> Self {
        let mut values = profile.clone();
        values.date_of_birth = normalize_date_of_birth(&profile.date_of_birth);
        if values.email.trim().is_empty() {
            values.email = session_email.unwrap_or_default().to_string();
        }

        let locked = ProfileField::IMMUTABLE_ONCE_SAVED
            .iter()
            .copied()
            .filter(|field| match field {
                ProfileField::RegisterAs => profile.registration_kind().is_some(),
                other => !profile.value(*other).trim().is_empty(),
            })
            .collect();

        Self { values, locked }
    }

    pub fn get(&self, field: ProfileField) -> &str {
        self.values.value(field)
    }

    pub fn values(&self) -> &Profile {
        &self.values
    }

    pub fn is_locked(&self, field: ProfileField) -> bool {
        field == ProfileField::Email || self.locked.contains(&field)
    }

    /// Apply a user edit. Email and locked fields refuse every change.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) -> DomainResult<()> {
        if self.is_locked(field) {
            return Err(DomainError::FieldLocked(field.wire_name()));
        }

        let value = value.into();
        let slot = match field {
            ProfileField::FirstName => &mut self.values.first_name,
            ProfileField::LastName => &mut self.values.last_name,
            ProfileField::ContactNumber => &mut self.values.contact_number,
            ProfileField::DateOfBirth => &mut self.values.date_of_birth,
            ProfileField::Country => &mut self.values.country,
            ProfileField::Address => &mut self.values.address,
            ProfileField::RegisterAs => &mut self.values.register_as,
            ProfileField::Email => return Err(DomainError::FieldLocked(field.wire_name())),
        };
        *slot = value;
        Ok(())
    }

    /// Hint rendered under a field, if any
    pub fn hint(&self, field: ProfileField) -> Option<&'static str> {
        match field {
            ProfileField::Email => {
                Some("This email is linked to your Google account and cannot be changed")
            }
            ProfileField::FirstName if self.is_locked(field) => {
                Some("First name cannot be changed once saved")
            }
            ProfileField::LastName if self.is_locked(field) => {
                Some("Last name cannot be changed once saved")
            }
            ProfileField::DateOfBirth if self.is_locked(field) => {
                Some("Date of birth cannot be changed once saved")
            }
            ProfileField::RegisterAs if self.is_locked(field) => {
                Some("Registration type cannot be changed after initial submission")
            }
            _ => None,
        }
    }
}

/// Reduce a backend date of birth to the `YYYY-MM-DD` form input value.
///
/// Accepts RFC 3339 timestamps and plain dates; anything else is returned
/// untouched so the user can see and fix it.
pub fn normalize_date_of_birth(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.date_naive().format("%Y-%m-%d").to_string();
    }

    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved_profile() -> Profile {
        Profile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            contact_number: "555".to_string(),
            date_of_birth: "1990-12-10T00:00:00.000Z".to_string(),
            country: "UK".to_string(),
            address: "London".to_string(),
            register_as: "sales".to_string(),
            is_profile_submitted: true,
        }
    }

    #[test]
    fn test_blank_form_only_has_email() {
        let form = ProfileForm::blank("a@x.com");
        assert_eq!(form.get(ProfileField::Email), "a@x.com");
        for field in ProfileField::REQUIRED {
            assert_eq!(form.get(field), "", "{} should be blank", field);
            assert!(!form.is_locked(field));
        }
    }

    #[test]
    fn test_saved_register_as_is_locked() {
        let mut form = ProfileForm::from_profile(&saved_profile(), None);

        assert!(form.is_locked(ProfileField::RegisterAs));
        let result = form.set_field(ProfileField::RegisterAs, "company");
        assert!(matches!(result, Err(DomainError::FieldLocked("registerAs"))));
        assert_eq!(form.get(ProfileField::RegisterAs), "sales");
    }

    #[test]
    fn test_editable_fields_stay_editable() {
        let mut form = ProfileForm::from_profile(&saved_profile(), None);

        form.set_field(ProfileField::Country, "France").unwrap();
        form.set_field(ProfileField::ContactNumber, "777").unwrap();
        form.set_field(ProfileField::Address, "Paris").unwrap();

        assert_eq!(form.get(ProfileField::Country), "France");
        assert!(form.set_field(ProfileField::FirstName, "Grace").is_err());
        assert!(form.set_field(ProfileField::Email, "b@x.com").is_err());
    }

    #[test]
    fn test_partial_profile_locks_only_filled_fields() {
        let profile = Profile {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            ..Profile::default()
        };
        let mut form = ProfileForm::from_profile(&profile, Some("a@x.com"));

        assert!(form.is_locked(ProfileField::FirstName));
        assert!(!form.is_locked(ProfileField::RegisterAs));
        assert_eq!(form.get(ProfileField::Email), "a@x.com");
        form.set_field(ProfileField::RegisterAs, "company").unwrap();
    }

    #[test]
    fn test_unrecognised_register_as_stays_editable() {
        let profile = Profile {
            last_name: "B".to_string(),
            register_as: "Company".to_string(),
            ..Profile::default()
        };
        let mut form = ProfileForm::from_profile(&profile, Some("a@x.com"));

        assert!(!form.is_locked(ProfileField::RegisterAs));
        form.set_field(ProfileField::RegisterAs, "company").unwrap();
        assert_eq!(form.get(ProfileField::RegisterAs), "company");
    }

    #[test]
    fn test_normalize_date_of_birth() {
        assert_eq!(normalize_date_of_birth("1990-12-10T00:00:00.000Z"), "1990-12-10");
        assert_eq!(normalize_date_of_birth("1990-12-10"), "1990-12-10");
        assert_eq!(normalize_date_of_birth(""), "");
        assert_eq!(normalize_date_of_birth("soon"), "soon");
    }

    #[test]
    fn test_locked_hint() {
        let form = ProfileForm::from_profile(&saved_profile(), None);
        assert_eq!(
            form.hint(ProfileField::RegisterAs),
            Some("Registration type cannot be changed after initial submission")
        );
        assert_eq!(form.hint(ProfileField::Country), None);
    }
}
