//! Company profile wire types. The backend speaks camelCase JSON and wraps
//! profiles in a `{ "data": ... }` envelope.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};

/// Accepted values for `companySize`. A blank size is also accepted.
pub const COMPANY_SIZES: [&str; 6] = ["1-10", "11-50", "51-200", "201-500", "501-1000", "1001+"];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub company_name: String,
    pub company_domain: String,
    pub operating_sectors: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state_or_province: String,
    pub postal_code: String,
    pub country: String,
    pub company_size: String,
    pub year_founded: String,
    pub company_mission: String,
    pub company_website: String,
    pub linked_in_profile: String,
    pub twitter_profile: String,
}

impl CompanyProfile {
    /// Local checks run before any request is sent.
    ///
    /// # Errors
    /// Returns `AppError::Validation` with the message shown on the form.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.company_name.trim().is_empty() || self.contact_email.trim().is_empty() {
            return Err(AppError::Validation(
                "Company Name and Contact Email are required.".to_string(),
            ));
        }
        let size = self.company_size.trim();
        if !size.is_empty() && !COMPANY_SIZES.contains(&size) {
            return Err(AppError::Validation(format!(
                "Company size must be one of {}.",
                COMPANY_SIZES.join(", ")
            )));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub(crate) struct ProfileEnvelope {
    pub(crate) data: CompanyProfile,
}

/// Save body: the profile fields plus the owning user id.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfilePayload<'a> {
    #[serde(flatten)]
    pub(crate) profile: &'a CompanyProfile,
    pub(crate) user_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named() -> CompanyProfile {
        CompanyProfile {
            company_name: "Acme".to_string(),
            contact_email: "hr@acme.test".to_string(),
            ..CompanyProfile::default()
        }
    }

    #[test]
    fn serializes_camel_case_with_user_id() {
        let profile = CompanyProfile {
            linked_in_profile: "https://linkedin.com/company/acme".to_string(),
            address_line1: "1 Main St".to_string(),
            ..named()
        };
        let payload = serde_json::to_value(ProfilePayload {
            profile: &profile,
            user_id: "uid-1",
        })
        .unwrap();

        assert_eq!(payload["companyName"], "Acme");
        assert_eq!(payload["linkedInProfile"], "https://linkedin.com/company/acme");
        assert_eq!(payload["addressLine1"], "1 Main St");
        assert_eq!(payload["userId"], "uid-1");
    }

    #[test]
    fn missing_fields_default_to_blank() {
        let profile: CompanyProfile =
            serde_json::from_value(json!({"companyName": "Acme", "_id": "abc"})).unwrap();
        assert_eq!(profile.company_name, "Acme");
        assert_eq!(profile.address_line2, "");
    }

    #[test]
    fn name_and_email_are_required() {
        let err = CompanyProfile::default().validate().unwrap_err();
        assert_eq!(
            err.user_message(),
            "Company Name and Contact Email are required."
        );

        let only_name = CompanyProfile {
            company_name: "Acme".to_string(),
            ..CompanyProfile::default()
        };
        assert!(only_name.validate().is_err());
    }

    #[test]
    fn size_must_be_a_known_choice_or_blank() {
        assert!(named().validate().is_ok());
        let sized = CompanyProfile {
            company_size: "51-200".to_string(),
            ..named()
        };
        assert!(sized.validate().is_ok());
        let odd = CompanyProfile {
            company_size: "about fifty".to_string(),
            ..named()
        };
        assert!(matches!(odd.validate(), Err(AppError::Validation(_))));
    }
}
