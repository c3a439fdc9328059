//! HTTP surface for Neurochat.
//!
//! Flat JSON routes (`/register`, `/chat`, `/config`, ...) authenticated by
//! the `neurochat_session` cookie.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
