//! Job posting request and response shapes. Field names are snake_case on
//! the wire.

use crate::app_lib::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPostingInput {
    pub job_title: String,
    pub job_location: String,
    pub job_type: String,
    pub job_summary: String,
    pub key_responsibilities: String,
    pub educational_qualifications: String,
    pub experience: String,
    pub hard_skills: String,
    pub soft_skills: String,
    pub language_fluency: String,
    pub desired_qualifications: String,
    pub company_name: String,
    pub company_introduction: String,
    pub salary_range: String,
    pub benefits_and_perks: String,
    pub growth_opportunities: String,
    pub application_instructions: String,
    pub required_documents: String,
    pub application_deadline: String,
    pub contact_information: String,
    pub equal_opportunity_statement: String,
}

impl JobPostingInput {
    /// # Errors
    /// Returns `AppError::Validation` when a required field is blank.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            &self.job_title,
            &self.job_location,
            &self.job_type,
            &self.job_summary,
            &self.application_instructions,
            &self.contact_information,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(AppError::Validation(
                "Job title, location, type, summary, application instructions and contact \
                 information are required."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Server-assigned id; backends return either a string or a number.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Text(String),
    Number(i64),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Text(id) => f.write_str(id),
            JobId::Number(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CreatedJob {
    pub id: JobId,
}

#[derive(Deserialize)]
pub(crate) struct JobEnvelope {
    pub(crate) job: CreatedJob,
}

#[derive(Deserialize)]
pub(crate) struct JobErrorBody {
    #[serde(default)]
    pub(crate) error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_fields_are_checked_after_trimming() {
        let input = JobPostingInput {
            job_title: "Engineer".to_string(),
            job_location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            job_summary: "   ".to_string(),
            application_instructions: "Apply online".to_string(),
            contact_information: "jobs@example.com".to_string(),
            ..JobPostingInput::default()
        };
        assert_eq!(
            input.validate().unwrap_err().user_message(),
            "Job title, location, type, summary, application instructions and contact \
             information are required."
        );
    }

    #[test]
    fn application_and_contact_details_are_required() {
        let mut input = JobPostingInput {
            job_title: "Engineer".to_string(),
            job_location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            job_summary: "Ship things".to_string(),
            ..JobPostingInput::default()
        };
        assert!(matches!(input.validate(), Err(AppError::Validation(_))));

        input.application_instructions = "Apply online".to_string();
        assert!(input.validate().is_err());

        input.contact_information = "jobs@example.com".to_string();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn job_ids_display_as_given() {
        let text: CreatedJob = serde_json::from_value(json!({"id": "665f1c"})).unwrap();
        let number: CreatedJob = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(text.id.to_string(), "665f1c");
        assert_eq!(number.id.to_string(), "42");
    }

    #[test]
    fn serializes_every_field_in_snake_case() {
        let value = serde_json::to_value(JobPostingInput::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 21);
        assert!(object.contains_key("equal_opportunity_statement"));
        assert!(object.contains_key("benefits_and_perks"));
    }
}
