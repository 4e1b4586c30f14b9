use crate::validate::{validate_email, validate_password, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    SignedOut,
    SigningIn,
    SignedIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }

    /// Prefills the form from a remembered identity and ticks "remember me".
    pub(crate) fn restore(&mut self, remembered: Option<String>) {
        if let Some(email) = remembered {
            self.email = email;
            self.remember_me = true;
        }
    }
}
