//! # schoolhub-core
//!
//! Core crate for the SchoolHub client. Contains the configuration schema,
//! the closed role enumeration, the session record, the seam traits that
//! the other crates implement, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SchoolHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
