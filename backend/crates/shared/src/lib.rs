//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every backend crate:
//! - The unified error type and its status classification
//! - Typed identifiers
//!
//! Only things with a stable meaning across domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
