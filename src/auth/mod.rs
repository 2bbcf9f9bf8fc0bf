//! Authentication module
//!
//! Supports: HTTP Basic (communication user) and anonymous access.
//!
//! The `Authenticator` applies credentials to outgoing requests and manages
//! the CSRF token some IBP services expect alongside them.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, CSRF_HEADER};
pub use types::{AuthConfig, CsrfToken};
