//! Authenticated user identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{MobileNumber, UserId};

/// A shop user. Its presence in client state means the session is authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub mobile: MobileNumber,
    #[serde(default)]
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full name, falling back to the mobile number when none was given.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            self.mobile.as_str()
        } else {
            &self.full_name
        }
    }

    /// First word of the full name, falling back to the mobile number.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or_else(|| self.mobile.as_str())
    }
}
