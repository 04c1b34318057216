//! Input validation functions
//!
//! Emails are compared exactly as supplied: no trimming, no case folding.

use crate::errors::ValidationError;

/// Require both an email and a password. Empty strings count as absent.
pub fn require_credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str), ValidationError> {
    match (email, password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => Ok((e, p)),
        _ => Err(ValidationError::MissingCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("a@x.com"), None)]
    #[case(None, Some("secret123"))]
    #[case(Some(""), Some("secret123"))]
    #[case(Some("a@x.com"), Some(""))]
    fn test_missing_credentials_rejected(
        #[case] email: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        assert_eq!(
            require_credentials(email, password),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn test_email_preserved_verbatim() {
        let (email, password) = require_credentials(Some(" A@X.com"), Some("pw")).unwrap();
        assert_eq!(email, " A@X.com");
        assert_eq!(password, "pw");
    }

    proptest! {
        #[test]
        fn prop_non_empty_credentials_accepted(
            email in ".{1,64}",
            password in ".{1,64}",
        ) {
            let result = require_credentials(Some(email.as_str()), Some(password.as_str()));
            prop_assert_eq!(result, Ok((email.as_str(), password.as_str())));
        }
    }
}
