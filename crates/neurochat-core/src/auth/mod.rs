//! Account registration, login and session identity.
//!
//! - `hasher`: password hashing port (Argon2id in infra)
//! - `token`: opaque session token generation and hashing port
//! - `session`: the `SessionIdentity` capability used by the HTTP layer
//! - `service`: `AuthService`, which implements all of the above flows

pub mod hasher;
pub mod service;
pub mod session;
pub mod token;
