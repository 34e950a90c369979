use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/cart")
                        .service(
                            web::resource("")
                                .route(web::get().to(handlers::get_cart))
                                .route(web::post().to(handlers::add_to_cart)),
                        )
                        .service(
                            web::resource("/{book_id}")
                                .route(web::delete().to(handlers::remove_from_cart)),
                        ),
                )
                .service(
                    web::scope("/favorites")
                        .service(web::resource("").route(web::get().to(handlers::get_favorites)))
                        .service(
                            web::resource("/toggle")
                                .route(web::post().to(handlers::toggle_favorite)),
                        ),
                )
                .service(
                    web::scope("/checkout")
                        .service(
                            web::resource("")
                                .route(web::post().to(handlers::place_order)),
                        )
                        .service(
                            web::resource("/options")
                                .route(web::get().to(handlers::get_checkout_options)),
                        ),
                ),
        );
}
