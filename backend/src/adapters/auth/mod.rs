//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 tokens minted and checked by this service
//! - `mock` - Table-driven validator for tests

mod jwt;
mod mock;

pub use jwt::{IssuedTokens, JwtTokenService, REFRESH_COOKIE};
pub use mock::MockSessionValidator;
