//! Request middleware: identity extraction and error responses.

pub mod auth;
pub mod error;
