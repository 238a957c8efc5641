//! # Quill Core
//!
//! The domain layer of the Quill blogging platform.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the entities, the error taxonomy, the ports (trait seams) and the three
//! services built on top of them - authentication, the author-only mutation
//! guard, and the post lifecycle workflow.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
