//! Authentication capability handed to views
//!
//! Views never look up the signed-in user on their own; whoever builds a
//! view passes the session in explicitly.

use crate::models::User;

/// Who is using the front end right now
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_user() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_authenticated_exposes_user() {
        let session = Session::authenticated(User::new(7, "Ravi", "ravi@x.io"));
        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.id), Some(7));
    }
}
