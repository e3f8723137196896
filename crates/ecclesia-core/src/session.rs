//! Session accessor.
//!
//! Authentication happens elsewhere; views only ask who is signed in and
//! whether that is still being resolved. The accessor is passed to the view
//! layer explicitly.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            id: email.clone(),
            email,
        }
    }

    /// Uppercase first letter of the email, for the avatar.
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Who is signed in.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    /// Whether the session is still being resolved.
    fn is_loading(&self) -> bool;

    fn sign_out(&self);
}

/// Session held in memory, seeded from configuration.
#[derive(Debug, Default)]
pub struct LocalSession {
    user: RwLock<Option<User>>,
}

impl LocalSession {
    pub fn new(user: Option<User>) -> Self {
        Self {
            user: RwLock::new(user),
        }
    }

    pub fn signed_in(email: impl Into<String>) -> Self {
        Self::new(Some(User::new(email)))
    }

    pub fn sign_in(&self, user: User) {
        match self.user.write() {
            Ok(mut guard) => *guard = Some(user),
            Err(poisoned) => *poisoned.into_inner() = Some(user),
        }
    }
}

impl SessionProvider for LocalSession {
    fn current_user(&self) -> Option<User> {
        match self.user.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn is_loading(&self) -> bool {
        false
    }

    fn sign_out(&self) {
        let previous = match self.user.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(user) = previous {
            tracing::info!(email = %user.email, "signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_clears_user() {
        let session = LocalSession::signed_in("pastor@church.org");
        let user = session.current_user().unwrap();
        assert_eq!(user.initial(), "P");
        assert!(!session.is_loading());

        session.sign_out();
        assert!(session.current_user().is_none());

        session.sign_in(User::new("ana@church.org"));
        assert_eq!(session.current_user().unwrap().email, "ana@church.org");
    }

    #[test]
    fn empty_email_initial() {
        assert_eq!(User::new("").initial(), "?");
    }
}
