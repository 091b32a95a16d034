mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use serde_json::json;
use tracing::info;

use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::data::comment_repository::MongoCommentRepository;
use crate::data::post_repository::MongoPostRepository;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::database::connect;
use crate::infrastructure::logging::init_logging;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, TimingMiddleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let (client, database) = connect(&config.mongo_url, &config.mongo_db)
        .await
        .expect("failed to connect to MongoDB");

    let post_repo = Arc::new(MongoPostRepository::new(&database));
    let comment_repo = Arc::new(MongoCommentRepository::new(&database));

    let post_service = PostService::new(Arc::clone(&post_repo));
    let comment_service = CommentService::new(Arc::clone(&post_repo), Arc::clone(&comment_repo));

    let config_data = config.clone();

    info!(host = %config.host, port = config.port, "starting HTTP server");

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(TimingMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(json_config())
            .route("/", web::get().to(hello))
            .service(handlers::post::list_posts)
            .service(handlers::post::get_post)
            .service(handlers::post::create_post)
            .service(handlers::post::update_post)
            .service(handlers::post::delete_post)
            .service(handlers::comment::create_comment)
            .service(handlers::comment::list_comments)
            .service(handlers::comment::update_comment)
            .service(handlers::comment::delete_comment)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    client.shutdown().await;
    info!("MongoDB connection closed");

    Ok(())
}

async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Hello World!")
}

// Undeserializable bodies answer 400 with the same shape as every other error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(json!({ "message": "request data is not well formed" }));
        InternalError::from_response(err, response).into()
    })
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600);

    for origin in &config.cors_origins {
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}
