use actix_web::web;

use crate::handlers::uploads;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Write-method gated: everything but POST lands on the 405 catch-all.
    cfg.service(
        web::resource("/files/create-url")
            .route(web::post().to(uploads::create_upload_url))
            .default_service(web::route().to(uploads::method_not_allowed)),
    );
}
