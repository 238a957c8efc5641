//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/verify", web::post().to(auth::verify))
                    .route("/google", web::get().to(auth::google_redirect))
                    .route("/google/callback", web::get().to(auth::google_callback)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("", web::get().to(posts::list_posts))
                    .route("/search", web::get().to(posts::search_posts))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::patch().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/state", web::patch().to(posts::set_post_state)),
            )
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("/{id}", web::get().to(users::get_user))
                    .route("/{id}", web::put().to(users::update_user))
                    .route("/{id}", web::delete().to(users::delete_user)),
            ),
    );
}
