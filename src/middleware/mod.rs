//! Middleware for request processing.
//!
//! # Modules
//!
//! - [`authn`]: the per-request authentication filter and the
//!   [`authn::CurrentMember`] extractor
//! - [`role`]: role gate for the administrator subtree
//!
//! # Authentication Flow
//!
//! 1. The filter lets public paths and CORS pre-flights straight through
//! 2. Requests without an `Authorization` header continue as anonymous;
//!    protected handlers reject them via the `CurrentMember` extractor (401)
//! 3. A presented token is verified and its subject resolved exactly once;
//!    failures terminate the request with 401
//! 4. The resolved principal rides in the request extensions for this one
//!    request only
//! 5. `/manager` routes additionally require the admin role; an ordinary
//!    authenticated member gets 403 there

pub mod authn;
pub mod role;
