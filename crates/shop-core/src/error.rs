//! Base error type.
//!
//! Sub-crates may define their own error enums and convert them into
//! `ShopError` via `From` impls, or keep them separate and wrap `ShopError`
//! as one variant.  Both patterns are acceptable; prefer whichever keeps
//! error sites clean.

use thiserror::Error;

/// The top-level error type for `shop-core` and a common base for sub-crates.
///
/// Configuration errors are startup-time only: once a sim is built, no
/// per-tick operation returns `ShopError` — recoverable runtime conditions
/// (transient navigation state, no matching station) are handled by the
/// state machines falling back to a safe state instead.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `shop-*` crates.
pub type ShopResult<T> = Result<T, ShopError>;
