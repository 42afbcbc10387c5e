//! Port for the external identity provider.
//!
//! Credential verification is delegated entirely to this collaborator; the
//! core only ever handles the opaque [`UserId`] it issues.

use async_trait::async_trait;

use crate::domain::{LoginCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The credentials were well-formed but not accepted.
        InvalidCredentials => "credentials were not accepted",
        /// The provider could not be reached.
        Unavailable { message: String } =>
            "identity provider unavailable: {message}",
    }
}

/// Port for resolving credentials into an authenticated identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the opaque user identifier.
    async fn verify(&self, credentials: &LoginCredentials)
    -> Result<UserId, IdentityProviderError>;
}

/// Fixture provider accepting a single development credential pair.
///
/// Accepts `admin` / `password` and resolves it to a stable fixture id so
/// local sessions survive restarts. Everything else is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    const FIXTURE_USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn verify(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<UserId, IdentityProviderError> {
        if credentials.username() == "admin" && credentials.password() == "password" {
            UserId::new(Self::FIXTURE_USER_ID)
                .map_err(|err| IdentityProviderError::unavailable(err.to_string()))
        } else {
            Err(IdentityProviderError::invalid_credentials())
        }
    }
}
