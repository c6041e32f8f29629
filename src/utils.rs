//! Utility functions

use std::borrow::Cow;

/// Hide a secret for log output, keeping only its length visible
pub fn mask(secret: &str) -> Cow<'static, str> {
    if secret.is_empty() {
        Cow::Borrowed("<empty>")
    } else {
        Cow::Owned("*".repeat(secret.chars().count()))
    }
}
