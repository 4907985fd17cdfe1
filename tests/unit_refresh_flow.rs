//! Refresh rotation protocol, driven through the authenticator against
//! the in-memory store and a fixture member lookup.

use membergate_auth::{
    AuthError, Authenticator, Principal, PrincipalResolver, Role,
};
use membergate_config::JwtConfig;
use membergate_store::InMemoryRefreshStore;

struct FixtureResolver;

impl PrincipalResolver for FixtureResolver {
    async fn resolve_by_email(&self, email: &str) -> Result<Principal, AuthError> {
        match email {
            "a@x.com" => Ok(Principal {
                member_id: 1,
                email: email.to_string(),
                role: Role::User,
            }),
            "admin@x.com" => Ok(Principal {
                member_id: 2,
                email: email.to_string(),
                role: Role::Admin,
            }),
            _ => Err(AuthError::UnknownPrincipal),
        }
    }
}

fn test_authenticator() -> Authenticator<FixtureResolver, InMemoryRefreshStore> {
    let config = JwtConfig {
        access_secret: "refresh-flow-access-secret-material".to_string(),
        refresh_secret: "refresh-flow-refresh-secret-material".to_string(),
        access_token_expiry: 1800,
        refresh_token_expiry: 604800,
    };
    Authenticator::new(FixtureResolver, InMemoryRefreshStore::new(), config)
}

fn member() -> Principal {
    Principal {
        member_id: 1,
        email: "a@x.com".to_string(),
        role: Role::User,
    }
}

#[tokio::test]
async fn test_login_records_the_refresh_token() {
    let auth = test_authenticator();

    let tokens = auth.start_session(&member()).await.unwrap();

    assert_eq!(
        auth.current_refresh_token(1).await.unwrap(),
        tokens.refresh_token
    );
    // And the pair authenticates.
    let claims = auth.verify_access(&tokens.access_token).unwrap();
    let principal = auth.authenticate(&claims).await.unwrap();
    assert_eq!(principal.member_id, 1);
}

#[tokio::test]
async fn test_rotation_supersedes_the_previous_token() {
    let auth = test_authenticator();
    let first = auth.start_session(&member()).await.unwrap();

    let (principal, second) = auth.refresh_session(&first.refresh_token).await.unwrap();
    assert_eq!(principal.member_id, 1);
    assert_ne!(second.refresh_token, first.refresh_token);
    assert_eq!(
        auth.current_refresh_token(1).await.unwrap(),
        second.refresh_token
    );

    // The first token still carries a valid signature and a future expiry;
    // only the store record makes it stale.
    assert!(auth.verify_refresh(&first.refresh_token).is_ok());
    assert!(matches!(
        auth.refresh_session(&first.refresh_token).await,
        Err(AuthError::SessionNotFound)
    ));
}

#[tokio::test]
async fn test_double_spend_of_one_refresh_token_has_one_winner() {
    let auth = test_authenticator();
    let tokens = auth.start_session(&member()).await.unwrap();

    let first_attempt = auth.refresh_session(&tokens.refresh_token).await;
    let second_attempt = auth.refresh_session(&tokens.refresh_token).await;

    assert!(first_attempt.is_ok());
    assert!(matches!(second_attempt, Err(AuthError::SessionNotFound)));
}

#[tokio::test]
async fn test_refresh_with_no_session_on_record() {
    let auth = test_authenticator();

    // Well-signed, unexpired, but never recorded.
    let orphan = auth.issue_refresh_token(&member()).unwrap();

    assert!(matches!(
        auth.refresh_session(&orphan).await,
        Err(AuthError::SessionNotFound)
    ));
}

#[tokio::test]
async fn test_logout_ends_the_session_idempotently() {
    let auth = test_authenticator();
    let tokens = auth.start_session(&member()).await.unwrap();

    auth.end_session(&tokens.refresh_token).await.unwrap();
    auth.end_session(&tokens.refresh_token).await.unwrap();

    assert!(matches!(
        auth.current_refresh_token(1).await,
        Err(AuthError::SessionNotFound)
    ));
    assert!(matches!(
        auth.refresh_session(&tokens.refresh_token).await,
        Err(AuthError::SessionNotFound)
    ));
}

#[tokio::test]
async fn test_second_login_invalidates_the_first_sessions_refresh_token() {
    let auth = test_authenticator();

    let first = auth.start_session(&member()).await.unwrap();
    let second = auth.start_session(&member()).await.unwrap();

    assert!(matches!(
        auth.refresh_session(&first.refresh_token).await,
        Err(AuthError::SessionNotFound)
    ));
    assert!(auth.refresh_session(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_sessions_are_tracked_per_member() {
    let auth = test_authenticator();

    let user = auth.start_session(&member()).await.unwrap();
    let admin = auth
        .start_session(&Principal {
            member_id: 2,
            email: "admin@x.com".to_string(),
            role: Role::Admin,
        })
        .await
        .unwrap();

    // Rotating one member's session leaves the other untouched.
    auth.refresh_session(&user.refresh_token).await.unwrap();
    assert_eq!(
        auth.current_refresh_token(2).await.unwrap(),
        admin.refresh_token
    );
}
