// Form validation: field-keyed messages for the auth forms and the wizard.
//
// Validation failure is ordinary data. A validator returns every problem it
// found, keyed by the form's own field enum, and the view annotates those
// fields instead of submitting.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Field issues
// ---------------------------------------------------------------------------

/// Why a single field was rejected. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldIssue {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("{label} must be at least {min} characters")]
    TooShort { label: &'static str, min: usize },

    #[error("{label} must be at least {min}")]
    BelowMinimum { label: &'static str, min: i64 },

    #[error("{label} is required")]
    Required { label: &'static str },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Field-keyed validation messages for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F> {
    entries: Vec<(F, FieldIssue)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        FieldErrors {
            entries: Vec::new(),
        }
    }
}

impl<F: Copy + PartialEq> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: F, issue: FieldIssue) {
        self.entries.push((field, issue));
    }

    /// First issue recorded for `field`.
    pub fn get(&self, field: F) -> Option<&FieldIssue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, issue)| issue)
    }

    /// Message for `field`, ready to render under it.
    pub fn message(&self, field: F) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn contains(&self, field: F) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(F, FieldIssue)> {
        self.entries.iter()
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.entries.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

// ---------------------------------------------------------------------------
// Primitive checks
// ---------------------------------------------------------------------------

/// Structural email check: one `@`, a non-empty local part, and a dotted
/// domain whose labels are non-empty and whose last label has 2+ letters.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || local.starts_with('.') || local.ends_with('.') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    if labels
        .iter()
        .any(|l| l.starts_with('-') || l.ends_with('-') || !l.chars().all(|c| c.is_alphanumeric() || c == '-'))
    {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
}

/// Length in characters, not bytes.
fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Email,
    Password,
}

/// Login form values; passed to the login callback once valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors<LoginField>> {
        let mut errors = FieldErrors::new();
        if !is_valid_email(&self.email) {
            errors.push(LoginField::Email, FieldIssue::InvalidEmail);
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            errors.push(
                LoginField::Password,
                FieldIssue::TooShort {
                    label: "Password",
                    min: MIN_PASSWORD_LEN,
                },
            );
        }
        errors.into_result(())
    }
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validate every field; a confirmation mismatch is attributed to
    /// `ConfirmPassword`, never to `Password`.
    pub fn validate(&self) -> Result<(), FieldErrors<SignupField>> {
        let mut errors = FieldErrors::new();
        if char_len(&self.name) < MIN_NAME_LEN {
            errors.push(
                SignupField::Name,
                FieldIssue::TooShort {
                    label: "Name",
                    min: MIN_NAME_LEN,
                },
            );
        }
        if !is_valid_email(&self.email) {
            errors.push(SignupField::Email, FieldIssue::InvalidEmail);
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            errors.push(
                SignupField::Password,
                FieldIssue::TooShort {
                    label: "Password",
                    min: MIN_PASSWORD_LEN,
                },
            );
        }
        if self.password != self.confirm_password {
            errors.push(SignupField::ConfirmPassword, FieldIssue::PasswordMismatch);
        }
        errors.into_result(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
