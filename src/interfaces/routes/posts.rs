use actix_web::web;

use crate::handlers::posts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .service(
                web::resource("")
                    .route(web::post().to(posts::create_post))
                    .route(web::get().to(posts::list_posts)),
            )
            .service(web::resource("/mine").route(web::get().to(posts::my_posts)))
            .service(web::resource("/preview").route(web::post().to(posts::preview_markdown)))
            .service(web::resource("/{slug}").route(web::get().to(posts::get_post_by_slug))),
    );
}
