use crate::application::post_service::PostService;
use crate::data::post_repository::MongoPostRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    CreatePostRequest, DeletePostRequest, PostResponse, PostSummaryResponse, UpdatePostRequest,
};
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::json;
use tracing::info;

#[get("/posts")]
pub async fn list_posts(
    req: HttpRequest,
    service: web::Data<PostService<MongoPostRepository>>,
) -> Result<HttpResponse, DomainError> {
    let posts = service.list_posts().await?;
    let data: Vec<PostSummaryResponse> = posts.into_iter().map(PostSummaryResponse::from).collect();

    info!(
        request_id = %request_id(&req),
        count = data.len(),
        "posts listed"
    );

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

#[get("/posts/{post_id}")]
pub async fn get_post(
    req: HttpRequest,
    service: web::Data<PostService<MongoPostRepository>>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let post = service.get_post(&post_id).await?;
    let response = PostResponse::from(post);

    info!(
        request_id = %request_id(&req),
        post_id = %response.id,
        "post retrieved"
    );

    Ok(HttpResponse::Ok().json(json!({ "data": response })))
}

#[post("/posts")]
pub async fn create_post(
    req: HttpRequest,
    service: web::Data<PostService<MongoPostRepository>>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    payload.validate()?;
    let post = service.create_post(payload.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(json!({ "message": "post created" })))
}

#[put("/posts/{post_id}")]
pub async fn update_post(
    req: HttpRequest,
    service: web::Data<PostService<MongoPostRepository>>,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    payload.validate()?;
    let post_id = path.into_inner();
    let post = service.update_post(&post_id, payload.into_inner()).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post updated"
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "post updated" })))
}

#[delete("/posts/{post_id}")]
pub async fn delete_post(
    req: HttpRequest,
    service: web::Data<PostService<MongoPostRepository>>,
    path: web::Path<String>,
    payload: web::Json<DeletePostRequest>,
) -> Result<HttpResponse, DomainError> {
    payload.validate()?;
    let post_id = path.into_inner();
    service.delete_post(&post_id, &payload.password).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        "post deleted"
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "post deleted" })))
}
