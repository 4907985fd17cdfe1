//! Member persistence and token transport.
//!
//! `MemberService` owns the members-table queries; [`PgPrincipalResolver`]
//! is the production member lookup behind the authenticator; the free
//! functions at the bottom shape how tokens travel: access token in the
//! `Authorization` response header, refresh token in the `RefreshToken`
//! cookie.

use anyhow::anyhow;
use axum::http::{HeaderMap, header};
use sqlx::PgPool;
use tracing::instrument;

use membergate_auth::{AuthError, Principal, PrincipalResolver, Role};
use membergate_core::{AppError, hash_password, verify_password};

use super::model::{Member, SignupRequest};

pub struct MemberService;

impl MemberService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn signup(db: &PgPool, dto: SignupRequest) -> Result<Member, AppError> {
        let taken = sqlx::query_scalar::<_, i64>("SELECT id FROM members WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if taken.is_some() {
            return Err(AppError::bad_request(anyhow!("Email already registered")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let member = sqlx::query_as::<_, Member>(
            "INSERT INTO members (email, password, role, pic)
             VALUES ($1, $2, 'user', $3)
             RETURNING id, email, role, pic, created_at",
        )
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.pic)
        .fetch_one(db)
        .await?;

        Ok(member)
    }

    /// Checks the presented credentials and returns the member as a
    /// [`Principal`].
    ///
    /// Wrong email and wrong password produce the same answer.
    #[instrument(skip(db, password))]
    pub async fn verify_credentials(
        db: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<Principal, AppError> {
        #[derive(sqlx::FromRow)]
        struct MemberWithPassword {
            id: i64,
            email: String,
            role: String,
            password: String,
        }

        let row = sqlx::query_as::<_, MemberWithPassword>(
            "SELECT id, email, role, password FROM members WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid email or password")))?;

        if !verify_password(password, &row.password)? {
            return Err(AppError::unauthorized(anyhow!("Invalid email or password")));
        }

        let role = Role::parse(&row.role)
            .ok_or_else(|| AppError::internal(anyhow!("member {} has unrecognized role", row.id)))?;

        Ok(Principal {
            member_id: row.id,
            email: row.email,
            role,
        })
    }

    #[instrument(skip(db))]
    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Member>, AppError> {
        let members = sqlx::query_as::<_, Member>(
            "SELECT id, email, role, pic, created_at FROM members
             ORDER BY id
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(members)
    }

    #[instrument(skip(db))]
    pub async fn count(db: &PgPool) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(db)
            .await?;

        Ok(total)
    }
}

/// Production member lookup, queried per authentication so role changes
/// apply without waiting for tokens to lapse.
#[derive(Debug, Clone)]
pub struct PgPrincipalResolver {
    db: PgPool,
}

impl PgPrincipalResolver {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl PrincipalResolver for PgPrincipalResolver {
    async fn resolve_by_email(&self, email: &str) -> Result<Principal, AuthError> {
        #[derive(sqlx::FromRow)]
        struct MemberRow {
            id: i64,
            email: String,
            role: String,
        }

        let row =
            sqlx::query_as::<_, MemberRow>("SELECT id, email, role FROM members WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.db)
                .await
                .map_err(|e| AuthError::Lookup(e.into()))?
                .ok_or(AuthError::UnknownPrincipal)?;

        let role = Role::parse(&row.role)
            .ok_or_else(|| AuthError::Lookup(anyhow!("member {} has unrecognized role", row.id)))?;

        Ok(Principal {
            member_id: row.id,
            email: row.email,
            role,
        })
    }
}

/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "RefreshToken";

/// `Authorization` response header value for a freshly issued access token.
pub fn bearer_header(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

/// `Set-Cookie` value delivering the refresh token. HttpOnly keeps it away
/// from scripts; SameSite=None + Secure because the SPA lives on another
/// origin.
pub fn refresh_cookie(refresh_token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Secure; SameSite=None",
        REFRESH_COOKIE, refresh_token
    )
}

/// `Set-Cookie` value clearing the refresh cookie at logout.
pub fn expired_refresh_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; Secure; SameSite=None; Max-Age=0",
        REFRESH_COOKIE
    )
}

/// Reads the refresh token out of the request's `Cookie` headers.
pub fn refresh_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == REFRESH_COOKIE).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = refresh_cookie("token-value");
        assert!(cookie.starts_with("RefreshToken=token-value"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=None"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_refresh_cookie();
        assert!(cookie.starts_with("RefreshToken=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_refresh_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; RefreshToken=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            refresh_token_from_headers(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_refresh_token_missing_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(refresh_token_from_headers(&headers), None);
        assert_eq!(refresh_token_from_headers(&HeaderMap::new()), None);
    }
}
