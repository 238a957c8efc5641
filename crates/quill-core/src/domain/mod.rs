//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{Post, PostState, estimate_read_time};
pub use user::User;
