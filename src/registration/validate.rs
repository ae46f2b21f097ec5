//! Identity payload validation.

use crate::error::{RegistryError, Result};
use crate::types::Participant;

/// Validates a registrant identity payload.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidRequest`] naming the first offending
/// field.
pub fn validate_participant(participant: &Participant) -> Result<()> {
    if participant.name.trim().is_empty() {
        return Err(RegistryError::InvalidRequest("Name is required".to_string()));
    }
    if !is_valid_email(&participant.email) {
        return Err(RegistryError::InvalidRequest(format!(
            "Invalid email address: {}",
            participant.email
        )));
    }
    if participant.registration_no.trim().is_empty() {
        return Err(RegistryError::InvalidRequest(
            "Registration number is required".to_string(),
        ));
    }
    if !is_valid_mobile(&participant.mobile_no) {
        return Err(RegistryError::InvalidRequest(format!(
            "Invalid mobile number: {}",
            participant.mobile_no
        )));
    }
    if participant.semester.trim().is_empty() {
        return Err(RegistryError::InvalidRequest(
            "Semester is required".to_string(),
        ));
    }
    Ok(())
}

/// Structural email check: one `@`, non-empty local part, and a dotted
/// domain. Deliverability is not our concern here.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Mobile number check: 10 digits, or 11-12 digits when a country code is
/// included. A single leading `+` is tolerated.
#[must_use]
pub fn is_valid_mobile(mobile: &str) -> bool {
    let digits = mobile.strip_prefix('+').unwrap_or(mobile);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    matches!(digits.len(), 10 | 11 | 12)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_ten_digit_mobile() {
        assert!(is_valid_mobile("9876543210"));
    }

    #[test]
    fn accepts_country_code_variants() {
        assert!(is_valid_mobile("919876543210"));
        assert!(is_valid_mobile("+919876543210"));
        assert!(is_valid_mobile("09876543210"));
    }

    #[test]
    fn rejects_wrong_lengths_and_non_digits() {
        assert!(!is_valid_mobile("98765"));
        assert!(!is_valid_mobile("9876543210123"));
        assert!(!is_valid_mobile("98765-43210"));
        assert!(!is_valid_mobile(""));
    }

    #[test]
    fn email_needs_local_part_and_dotted_domain() {
        assert!(is_valid_email("asha@example.com"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("asha.example.com"));
        assert!(!is_valid_email("asha@.com"));
    }

    #[test]
    fn participant_validation_names_the_offending_field() {
        let mut p = Participant {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            registration_no: "21BCE1001".to_string(),
            mobile_no: "9876543210".to_string(),
            semester: "5".to_string(),
        };
        assert!(validate_participant(&p).is_ok());

        p.mobile_no = "12".to_string();
        let err = validate_participant(&p).unwrap_err();
        assert!(err.to_string().contains("mobile"));
    }
}
