//! Session issuance, refresh rotation, and logout.
//!
//! The [`Authenticator`] is the only component that combines the token
//! codec, the member lookup, and the refresh store. It is generic over
//! both collaborators so tests can run against a fixture resolver and the
//! in-memory store.

use std::time::Duration;

use tracing::instrument;

use membergate_config::JwtConfig;
use membergate_store::{RefreshStore, StoreError};

use crate::claims::{AccessClaims, RefreshClaims};
use crate::error::AuthError;
use crate::jwt::{
    create_access_token, create_refresh_token, verify_access_token, verify_refresh_token,
};
use crate::principal::{Principal, PrincipalResolver};

/// The token pair handed to a caller at login and at every refresh.
#[derive(Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct Authenticator<R, S> {
    resolver: R,
    store: S,
    config: JwtConfig,
}

impl<R, S> Authenticator<R, S>
where
    R: PrincipalResolver,
    S: RefreshStore,
{
    pub fn new(resolver: R, store: S, config: JwtConfig) -> Self {
        Self {
            resolver,
            store,
            config,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Refresh record TTL equals the refresh token's validity window.
    fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.config.refresh_token_expiry.max(0) as u64)
    }

    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AuthError> {
        verify_access_token(token, &self.config)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        verify_refresh_token(token, &self.config)
    }

    /// Turns verified access claims into a usable [`Principal`].
    ///
    /// The role is re-resolved through the member lookup on every call, so
    /// a role change applies from the next authentication onwards.
    #[instrument(skip_all, fields(member_id = %claims.member_id))]
    pub async fn authenticate(&self, claims: &AccessClaims) -> Result<Principal, AuthError> {
        self.resolver.resolve_by_email(&claims.sub).await
    }

    pub fn issue_access_token(&self, principal: &Principal) -> Result<String, AuthError> {
        create_access_token(principal.member_id, &principal.email, &self.config)
    }

    pub fn issue_refresh_token(&self, principal: &Principal) -> Result<String, AuthError> {
        create_refresh_token(principal.member_id, &principal.email, &self.config)
    }

    /// Issues a new refresh token and records it unconditionally,
    /// superseding whatever was on record for this member.
    ///
    /// Unconditional overwrite is correct only where replacing a prior
    /// session is the intent (login); the refresh flow goes through
    /// [`Self::refresh_session`] instead, which checks the presented
    /// token first.
    #[instrument(skip_all, fields(member_id = %principal.member_id))]
    pub async fn rotate_refresh(&self, principal: &Principal) -> Result<String, AuthError> {
        let token = self.issue_refresh_token(principal)?;
        self.store
            .put(principal.member_id, &token, self.refresh_ttl())
            .await?;
        Ok(token)
    }

    /// Login path: issues the access/refresh pair and records the refresh
    /// token under the member's key.
    #[instrument(skip_all, fields(member_id = %principal.member_id))]
    pub async fn start_session(&self, principal: &Principal) -> Result<SessionTokens, AuthError> {
        let access_token = self.issue_access_token(principal)?;
        let refresh_token = self.rotate_refresh(principal).await?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }

    /// Refresh path: validates the presented refresh token, rotates the
    /// record, and issues a fresh pair.
    ///
    /// The store swap only succeeds while the presented token is the one
    /// on record; a superseded or unknown token fails with
    /// [`AuthError::SessionNotFound`] even though its signature and expiry
    /// are fine. Two concurrent refreshes with the same token therefore
    /// leave exactly one winner.
    #[instrument(skip_all)]
    pub async fn refresh_session(
        &self,
        presented: &str,
    ) -> Result<(Principal, SessionTokens), AuthError> {
        let claims = self.verify_refresh(presented)?;
        let principal = self.resolver.resolve_by_email(&claims.sub).await?;

        let refresh_token = self.issue_refresh_token(&principal)?;
        let swapped = self
            .store
            .swap_if_current(
                principal.member_id,
                presented,
                &refresh_token,
                self.refresh_ttl(),
            )
            .await?;
        if !swapped {
            return Err(AuthError::SessionNotFound);
        }

        let access_token = self.issue_access_token(&principal)?;

        Ok((
            principal,
            SessionTokens {
                access_token,
                refresh_token,
            },
        ))
    }

    /// Logout path: drops the member's refresh record. Deleting an absent
    /// record is not an error.
    #[instrument(skip_all)]
    pub async fn end_session(&self, presented: &str) -> Result<(), AuthError> {
        let claims = self.verify_refresh(presented)?;
        self.store.delete(claims.member_id).await?;
        Ok(())
    }

    /// Reads the token currently on record for a member.
    ///
    /// The record, not the token's own signature or expiry, is the source
    /// of truth for whether a refresh session is still live.
    pub async fn current_refresh_token(&self, member_id: i64) -> Result<String, AuthError> {
        self.store.get(member_id).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::SessionNotFound,
            other => AuthError::Store(other),
        })
    }
}
