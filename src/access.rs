//! Email allow-list gating the admin commands.

use serde::Serialize;

/// Normalize an email for comparison: trimmed, lowercase.
fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fixed set of authorized email addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    emails: Vec<String>,
}

impl AllowList {
    pub fn new<S: AsRef<str>>(emails: &[S]) -> Self {
        let mut emails: Vec<String> = emails
            .iter()
            .map(|e| normalize(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        emails.sort();
        emails.dedup();
        Self { emails }
    }

    pub fn is_allowed(&self, email: &str) -> bool {
        let email = normalize(email);
        !email.is_empty() && self.emails.binary_search(&email).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Decide what a (possibly absent) signed-in email gets to see.
    pub fn check(&self, email: Option<&str>) -> Access {
        match email {
            None => Access::SignedOut,
            Some(email) if self.is_allowed(email) => Access::Granted {
                email: normalize(email),
            },
            Some(email) => Access::Denied {
                email: normalize(email),
            },
        }
    }
}

/// Result of gating a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum Access {
    /// No session; the caller should offer sign-in.
    SignedOut,
    /// Signed in but not on the list; show access denied with a sign-out action.
    Denied { email: String },
    Granted { email: String },
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted { .. })
    }
}
