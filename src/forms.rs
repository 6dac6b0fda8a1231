//! Form payloads for the mail-relay endpoints. Validation only checks that
//! required fields are present and non-empty; anything beyond that is the
//! reader's problem, not the relay's.

use serde::Deserialize;

/// Raw contact-form body. All fields optional at the wire level so a missing
/// one can be reported by name instead of failing deserialization.
#[derive(Debug, Deserialize, Default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

/// A contact form that passed validation.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields in declaration order; the first missing or
    /// empty one is reported by its wire name.
    pub fn validate(self) -> Result<ContactSubmission, &'static str> {
        Ok(ContactSubmission {
            name: required(self.name, "name")?,
            email: required(self.email, "email")?,
            subject: required(self.subject, "subject")?,
            message: required(self.message, "message")?,
        })
    }
}

/// Raw membership-application body.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JoinForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub study_program: Option<String>,
    pub year_of_study: Option<String>,
    pub interests: Option<Vec<String>>,
    pub experience: Option<String>,
    pub motivation: Option<String>,
    pub how_did_you_hear: Option<String>,
    pub additional_info: Option<String>,
}

/// A membership application that passed validation.
#[derive(Debug, Clone)]
pub struct JoinApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: Option<String>,
    pub study_program: String,
    pub year_of_study: String,
    pub interests: Vec<String>,
    pub experience: String,
    pub motivation: String,
    pub how_did_you_hear: String,
    pub additional_info: Option<String>,
}

impl JoinForm {
    pub fn validate(self) -> Result<JoinApplication, &'static str> {
        Ok(JoinApplication {
            first_name: required(self.first_name, "firstName")?,
            last_name: required(self.last_name, "lastName")?,
            email: required(self.email, "email")?,
            study_program: required(self.study_program, "studyProgram")?,
            year_of_study: required(self.year_of_study, "yearOfStudy")?,
            interests: self.interests.ok_or("interests")?,
            experience: required(self.experience, "experience")?,
            motivation: required(self.motivation, "motivation")?,
            how_did_you_hear: required(self.how_did_you_hear, "howDidYouHear")?,
            student_id: self.student_id.filter(|s| !s.is_empty()),
            additional_info: self.additional_info.filter(|s| !s.is_empty()),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, &'static str> {
    value.filter(|v| !v.is_empty()).ok_or(field)
}
