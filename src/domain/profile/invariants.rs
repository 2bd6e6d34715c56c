use super::entity::{Profile, ProfileField, RegistrationKind};
use super::form::ProfileForm;
use crate::domain::ValidationError;

/// Validates a profile form before submission
///
/// Rules:
/// 1. All seven required fields are non-empty (whitespace counts as empty)
/// 2. registerAs is exactly "company" or "sales"
///
/// On success returns the payload to send.
pub fn validate_profile_form(form: &ProfileForm) -> Result<Profile, ValidationError> {
    let mut errors = ValidationError::new();

    for field in ProfileField::REQUIRED {
        if form.get(field).trim().is_empty() {
            errors.missing(field.wire_name());
        }
    }

    let register_as = form.get(ProfileField::RegisterAs);
    if !register_as.trim().is_empty() && register_as.parse::<RegistrationKind>().is_err() {
        errors.problem(format!(
            "registerAs must be one of: {}",
            RegistrationKind::ALL
                .iter()
                .map(|kind| kind.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    errors.into_result()?;
    Ok(form.values().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ProfileForm {
        let mut form = ProfileForm::blank("a@x.com");
        form.set_field(ProfileField::FirstName, "Ada").unwrap();
        form.set_field(ProfileField::LastName, "Lovelace").unwrap();
        form.set_field(ProfileField::ContactNumber, "555").unwrap();
        form.set_field(ProfileField::DateOfBirth, "1990-12-10").unwrap();
        form.set_field(ProfileField::Country, "UK").unwrap();
        form.set_field(ProfileField::Address, "London").unwrap();
        form.set_field(ProfileField::RegisterAs, "company").unwrap();
        form
    }

    #[test]
    fn test_valid_form() {
        let profile = validate_profile_form(&filled_form()).unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert!(profile.is_company());
    }

    #[test]
    fn test_reports_exactly_the_missing_fields() {
        let mut form = filled_form();
        form.set_field(ProfileField::ContactNumber, "").unwrap();
        form.set_field(ProfileField::Address, "   ").unwrap();

        let err = validate_profile_form(&form).unwrap_err();
        assert_eq!(err.missing_fields, vec!["contactNumber", "address"]);
        assert!(err.problems.is_empty());
    }

    #[test]
    fn test_blank_form_reports_all_required_fields() {
        let err = validate_profile_form(&ProfileForm::blank("a@x.com")).unwrap_err();
        assert_eq!(
            err.missing_fields,
            vec![
                "firstName",
                "lastName",
                "contactNumber",
                "dateOfBirth",
                "country",
                "address",
                "registerAs"
            ]
        );
    }

    #[test]
    fn test_rejects_unknown_registration_kind() {
        let mut form = filled_form();
        form.set_field(ProfileField::RegisterAs, "admin").unwrap();

        let err = validate_profile_form(&form).unwrap_err();
        assert!(err.missing_fields.is_empty());
        assert_eq!(err.problems, vec!["registerAs must be one of: company, sales"]);
    }
}
