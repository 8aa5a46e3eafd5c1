//! User accounts and sign-in.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Applicant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Applicant => "applicant",
        })
    }
}

/// An account known to a [`UserDirectory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub application_id: Option<String>,
}

impl UserRecord {
    pub fn session(&self) -> SessionUser {
        SessionUser {
            email: self.email.clone(),
            role: self.role,
            name: self.name.clone(),
            organization: self.organization.clone(),
            country: self.country.clone(),
            application_id: self.application_id.clone(),
        }
    }
}

/// Identity of the signed-in user, as persisted under the session key.
/// The password stays in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub email: String,
    pub role: Role,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
}

impl SessionUser {
    /// First letter of each word of the display name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

pub trait UserDirectory {
    fn lookup(&self, email: &str) -> Option<&UserRecord>;
}

/// Checks `password` against the directory entry for `email`.
pub fn authenticate(
    directory: &dyn UserDirectory,
    email: &str,
    password: &str,
) -> DomainResult<SessionUser> {
    match directory.lookup(email.trim()) {
        Some(user) if user.password == password => Ok(user.session()),
        _ => {
            tracing::warn!(email = %email.trim(), "rejected sign-in");
            Err(DomainError::InvalidCredentials)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InMemoryDirectory {
    #[serde(default)]
    users: Vec<UserRecord>,
    #[serde(skip)]
    by_email: HashMap<String, usize>,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        let mut directory = Self { users, by_email: HashMap::new() };
        directory.reindex();
        directory
    }

    /// The demonstration accounts: one admin, one member, one applicant.
    pub fn demo() -> Self {
        Self::new(vec![
            UserRecord {
                email: "admin@yan.org".to_string(),
                password: "admin123".to_string(),
                role: Role::Admin,
                name: "Admin User".to_string(),
                organization: Some("YAN Administration".to_string()),
                country: None,
                application_id: None,
            },
            UserRecord {
                email: "member@yan.org".to_string(),
                password: "member123".to_string(),
                role: Role::Member,
                name: "John Doe".to_string(),
                organization: Some("Youth Innovation Hub".to_string()),
                country: Some("Rwanda".to_string()),
                application_id: None,
            },
            UserRecord {
                email: "applicant@yan.org".to_string(),
                password: "applicant123".to_string(),
                role: Role::Applicant,
                name: "Jane Smith".to_string(),
                organization: None,
                country: None,
                application_id: Some("APP001".to_string()),
            },
        ])
    }

    /// Rebuilds the email index; needed after deserializing.
    pub fn reindex(&mut self) {
        self.by_email = self
            .users
            .iter()
            .enumerate()
            .map(|(i, user)| (user.email.to_lowercase(), i))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for InMemoryDirectory {
    fn lookup(&self, email: &str) -> Option<&UserRecord> {
        self.by_email
            .get(&email.to_lowercase())
            .and_then(|i| self.users.get(*i))
    }
}
