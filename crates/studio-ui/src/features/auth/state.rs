//! Login and sign-up form state.

use crate::core::forms::{FormErrors, FormModel, FormState};
use studio_api_models::{LoginRequest, RegisterRequest};

/// Auth slice of the app store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// Login form.
    pub login: FormState<LoginForm>,
    /// Sign-up form.
    pub signup: FormState<SignUpForm>,
}

/// Login inputs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl FormModel for LoginForm {
    type Output = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("email", &self.email, "validation.email_required");
        errors.require("password", &self.password, "validation.password_required");
        errors.into_result(|| LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Sign-up inputs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    /// Email address.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl std::fmt::Debug for SignUpForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpForm")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl FormModel for SignUpForm {
    type Output = RegisterRequest;

    fn validate(&self) -> Result<RegisterRequest, FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("email", &self.email, "validation.email_required");
        errors.require("username", &self.username, "validation.username_required");
        errors.require("password", &self.password, "validation.password_required");
        errors.into_result(|| RegisterRequest {
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().expect_err("empty");
        assert_eq!(errors.get("email"), Some("validation.email_required"));
        assert_eq!(errors.get("password"), Some("validation.password_required"));
    }

    #[test]
    fn password_is_not_trimmed_or_logged() {
        let form = LoginForm {
            email: " owner@studio.test ".into(),
            password: " secret ".into(),
        };
        let request = form.validate().expect("valid");
        assert_eq!(request.email, "owner@studio.test");
        assert_eq!(request.password, " secret ");
        assert!(!format!("{form:?}").contains("secret"));
    }
}
