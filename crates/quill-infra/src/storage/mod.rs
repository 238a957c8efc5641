//! Object storage implementations for post images.

mod memory;

#[cfg(feature = "s3")]
mod s3;

pub use memory::InMemoryStorage;

#[cfg(feature = "s3")]
pub use s3::{S3Config, S3Storage};
