//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - The unified error type ([`error::app_error::AppError`]) and its HTTP classification
//! - Typed numeric identifiers for persisted records
//!
//! Anything placed here must mean the same thing in every crate that uses it.

pub mod error {
    pub mod app_error;
    #[cfg(feature = "axum")]
    pub mod conversions;
    pub mod kind;
}
pub mod id;
