//! Registration form validation
//!
//! Local checks run before any network call. Field errors the server reports
//! are folded into the same [`FieldErrors`] slots, so the form has a single
//! error-rendering path.

use std::collections::BTreeMap;

use serde_json::Value;

/// Minimum username length
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Inputs of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Username,
        FormField::Email,
        FormField::Password,
        FormField::ConfirmPassword,
    ];

    /// Name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Username => "username",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirm_password",
        }
    }

    /// Map a server error key onto a form input
    pub fn from_server_key(key: &str) -> Option<Self> {
        match key {
            "username" => Some(FormField::Username),
            "email" => Some(FormField::Email),
            "password" => Some(FormField::Password),
            "confirm_password" | "confirmPassword" => Some(FormField::ConfirmPassword),
            _ => None,
        }
    }
}

/// Per-field error messages plus errors not tied to an input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<FormField, String>,
    general: Vec<String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: FormField) {
        self.fields.remove(&field);
    }

    /// Messages that do not belong to a specific input
    pub fn general(&self) -> &[String] {
        &self.general
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Build from a server error body
    ///
    /// Accepts `{field: "msg"}` and `{field: ["msg", ...]}`; lists are joined
    /// with `", "`. Unknown keys (`non_field_errors`, `detail`, ...) become
    /// general messages.
    pub fn from_server(body: &Value) -> Self {
        let mut errors = Self::new();
        let Some(map) = body.as_object() else {
            if let Some(message) = body.as_str() {
                errors.general.push(message.to_string());
            }
            return errors;
        };

        for (key, value) in map {
            let Some(message) = flatten_messages(value) else {
                continue;
            };
            match FormField::from_server_key(key) {
                Some(field) => errors.insert(field, message),
                None => errors.general.push(message),
            }
        }
        errors
    }
}

fn flatten_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(message) => Some(message.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join(", "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Values typed into the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Run every local check; an empty result means the form may be sent
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.username.trim().is_empty() {
            errors.insert(FormField::Username, "Username is required");
        } else if self.username.chars().count() < MIN_USERNAME_LENGTH {
            errors.insert(
                FormField::Username,
                format!("Username must be at least {MIN_USERNAME_LENGTH} characters"),
            );
        }

        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, "Email is required");
        } else if !is_plausible_email(&self.email) {
            errors.insert(FormField::Email, "Email is invalid");
        }

        if self.password.is_empty() {
            errors.insert(FormField::Password, "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert(
                FormField::Password,
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }

        if self.password != self.confirm_password {
            errors.insert(FormField::ConfirmPassword, "Passwords do not match");
        }

        errors
    }
}

/// Some whitespace-free run shaped like `local@domain.tld`
pub fn is_plausible_email(value: &str) -> bool {
    value.split_whitespace().any(|word| {
        word.char_indices().any(|(at, c)| {
            if c != '@' || at == 0 {
                return false;
            }
            let domain = &word[at + 1..];
            domain
                .char_indices()
                .any(|(dot, c)| c == '.' && dot > 0 && dot + 1 < domain.len())
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "123456".to_string(),
            confirm_password: "123456".to_string(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_short_username() {
        let form = RegistrationForm {
            username: "ab".to_string(),
            email: "x@y.com".to_string(),
            ..valid_form()
        };
        let errors = form.validate();

        assert_eq!(errors.len(), 1);
        assert!(
            errors
                .get(FormField::Username)
                .unwrap()
                .contains("at least 3 characters")
        );
    }

    #[test]
    fn test_blank_username_is_required() {
        let form = RegistrationForm {
            username: "   ".to_string(),
            ..valid_form()
        };
        assert_eq!(form.validate().get(FormField::Username), Some("Username is required"));
    }

    #[test]
    fn test_mismatched_confirmation_is_single_error() {
        let form = RegistrationForm {
            confirm_password: "654321".to_string(),
            ..valid_form()
        };
        let errors = form.validate();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn test_short_password() {
        let form = RegistrationForm {
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..valid_form()
        };
        assert_eq!(
            form.validate().get(FormField::Password),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_every_field_empty() {
        let errors = RegistrationForm::default().validate();

        assert_eq!(errors.get(FormField::Username), Some("Username is required"));
        assert_eq!(errors.get(FormField::Email), Some("Email is required"));
        assert_eq!(errors.get(FormField::Password), Some("Password is required"));
        assert_eq!(errors.get(FormField::ConfirmPassword), None);
    }

    #[test]
    fn test_email_plausibility() {
        for good in ["a@b.co", "first.last@sub.example.org", " x@y.com "] {
            assert!(is_plausible_email(good), "{good}");
        }
        for bad in ["plain", "@b.co", "a@.co", "a@b.", "a@b", "a @b.co"] {
            assert!(!is_plausible_email(bad), "{bad}");
        }
    }

    #[test]
    fn test_server_errors_map_to_same_slots() {
        let errors = FieldErrors::from_server(&json!({
            "username": ["A user with that username already exists."],
            "confirm_password": "Passwords don't match",
            "password": ["Too short.", "Too common."],
            "non_field_errors": ["Something else"]
        }));

        assert_eq!(
            errors.get(FormField::Username),
            Some("A user with that username already exists.")
        );
        assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords don't match"));
        assert_eq!(errors.get(FormField::Password), Some("Too short., Too common."));
        assert_eq!(errors.general(), ["Something else".to_string()]);
    }

    #[test]
    fn test_server_errors_ignore_empty_values() {
        let errors = FieldErrors::from_server(&json!({"email": [], "username": null}));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_clear_field() {
        let mut errors = RegistrationForm::default().validate();
        errors.clear_field(FormField::Email);
        assert_eq!(errors.get(FormField::Email), None);
        assert_eq!(errors.iter().count(), 2);
    }
}
