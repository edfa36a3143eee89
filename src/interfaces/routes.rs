use actix_web::web;

use crate::handlers::home::{health, home};

mod auth;
mod files;
mod posts;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .service(health)
            .configure(auth::config_routes)
            .configure(posts::config_routes)
            .configure(files::config_routes),
    );
}
