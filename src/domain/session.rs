// src/domain/session.rs
//
// Session - the signed-in identity as the client remembers it

use serde::{Deserialize, Serialize};

/// Token plus cached display fields.
///
/// Empty strings are treated as absent, so a session read back from storage
/// never reports a blank token as signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>, user_name: Option<String>, user_email: Option<String>) -> Self {
        Self {
            token: non_blank(token),
            user_name: non_blank(user_name),
            user_email: non_blank(user_email),
        }
    }

    /// Session with no stored fields
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    /// A token is present. Says nothing about whether the backend still accepts it.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Either a token or an email is present
    pub fn has_identity(&self) -> bool {
        self.token.is_some() || self.user_email.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_not_authenticated() {
        let session = Session::new(Some("  ".to_string()), None, Some("a@x.com".to_string()));
        assert!(!session.is_authenticated());
        assert!(session.has_identity());
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(!session.has_identity());
    }
}
