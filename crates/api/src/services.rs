//! Internal services.
//!
//! ## Services
//!
//! - **token** - signed, time-limited quiz tokens (HS256 JWT)

mod token;

pub use token::{Claims, TOKEN_TTL_SECS, TokenService};
