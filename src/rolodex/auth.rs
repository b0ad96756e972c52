//! Bearer credentials handed to the backend on every request.
//!
//! The cache and the search never look inside a [`Credential`]; it is an opaque
//! string that only a [`Backend`](crate::store::backend::Backend) may inspect.

use crate::error::{Result, RolodexError};
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// An empty credential, for backends that do not authenticate.
    pub fn anonymous() -> Self {
        Self(String::new())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }
}

// Tokens must not end up in logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "Credential(anonymous)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

/// Supplies a credential per request.
pub trait CredentialSource {
    fn credential(&self) -> Result<Credential>;
}

/// A fixed token.
#[derive(Debug, Clone)]
pub struct StaticCredential(Credential);

impl StaticCredential {
    pub fn new(credential: Credential) -> Self {
        Self(credential)
    }
}

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Result<Credential> {
        Ok(self.0.clone())
    }
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
    allow_missing: bool,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            allow_missing: false,
        }
    }

    /// Fall back to an anonymous credential when the variable is unset.
    pub fn or_anonymous(mut self) -> Self {
        self.allow_missing = true;
        self
    }
}

impl CredentialSource for EnvCredential {
    fn credential(&self) -> Result<Credential> {
        match std::env::var(&self.var) {
            Ok(token) => Ok(Credential::bearer(token)),
            Err(_) if self.allow_missing => Ok(Credential::anonymous()),
            Err(e) => Err(RolodexError::Credential(format!("{}: {}", self.var, e))),
        }
    }
}
