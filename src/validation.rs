//! Email format checking.

use validator::ValidateEmail;

use crate::error::Result;

/// Format-checks an email address.
///
/// Implementations may fail on malformed input; the caller converts such
/// failures into a generic server error.
pub trait EmailValidator: Send + Sync {
    fn is_valid(&self, email: &str) -> Result<bool>;
}

/// [`EmailValidator`] backed by the `validator` crate rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmailValidatorAdapter;

impl EmailValidator for EmailValidatorAdapter {
    fn is_valid(&self, email: &str) -> Result<bool> {
        Ok(email.validate_email())
    }
}
