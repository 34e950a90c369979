use paperclip::actix::web;

use crate::handlers;

pub fn config_app(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(handlers::health)))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/book/{book_id}")
                        .service(
                            web::resource("/reviews").route(web::get().to(handlers::get_reviews)),
                        )
                        .service(
                            web::resource("/review").route(web::post().to(handlers::add_review)),
                        )
                        .service(
                            web::resource("/report").route(web::post().to(handlers::report_book)),
                        )
                        .service(
                            web::resource("/reports").route(web::get().to(handlers::get_reports)),
                        ),
                )
                .service(
                    web::resource("/contact")
                        .route(web::post().to(handlers::add_contact_message))
                        .route(web::get().to(handlers::get_contact_messages)),
                ),
        );
}
