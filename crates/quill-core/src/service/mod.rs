//! Domain services - the workflows behind the HTTP boundary.

mod auth;
mod guard;
mod posts;
mod users;

pub use auth::AuthService;
pub use guard::authorize_mutation;
pub use posts::{DEFAULT_PAGE_SIZE, ImageUpload, NewPost, PostPage, PostPatch, PostService};
pub use users::{UserPatch, UserService};

#[cfg(test)]
pub(crate) mod testing;
