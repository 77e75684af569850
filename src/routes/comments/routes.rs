use crate::authentication;
use crate::routes;
use actix_web::{guard, middleware, web};

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public GET routes. Each route's method guard becomes a resource guard, so order
        // only matters among GETs: fixed segments must precede `/{post_id}`
        .route("/paginate", web::get().to(routes::paginate_comments))
        .service(
            web::resource(["/search", "/keyword"])
                .guard(guard::Get())
                .to(routes::search_comments),
        )
        .route("/comment/{comment_id}", web::get().to(routes::show_comment))
        .route("/user/{user_id}", web::get().to(routes::show_comments_for_user))
        .route("/{post_id}", web::get().to(routes::show_comments_for_post))
        // Protected routes (require a caller identity)
        .service(
            web::resource(["", "/"])
                .guard(guard::Post())
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .to(routes::create_comment),
        )
        .service(
            web::resource("/{comment_id}")
                .guard(guard::Put())
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .to(routes::update_comment),
        )
        .service(
            web::resource(["/{comment_id}", "/delete/{comment_id}"])
                .guard(guard::Delete())
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .to(routes::delete_comment),
        )
        .service(
            web::resource("/{comment_id}/like")
                .guard(guard::Post())
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .to(routes::like_comment),
        )
        .service(
            web::resource("/{comment_id}/unlike")
                .guard(guard::Post())
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .to(routes::unlike_comment),
        );
}
