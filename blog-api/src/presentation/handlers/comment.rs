use crate::application::comment_service::CommentService;
use crate::data::comment_repository::MongoCommentRepository;
use crate::data::post_repository::MongoPostRepository;
use crate::domain::error::DomainError;
use crate::presentation::dto::{
    CommentResponse, CreateCommentRequest, DeleteCommentRequest, UpdateCommentRequest,
};
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde_json::json;
use tracing::info;

type Service = CommentService<MongoPostRepository, MongoCommentRepository>;

#[post("/posts/{post_id}/comments")]
pub async fn create_comment(
    req: HttpRequest,
    service: web::Data<Service>,
    path: web::Path<String>,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, DomainError> {
    payload.validate()?;
    let post_id = path.into_inner();
    let comment = service
        .create_comment(&post_id, payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        comment_id = %comment.id,
        "comment created"
    );

    Ok(HttpResponse::Created().json(json!({ "message": "comment created" })))
}

#[get("/posts/{post_id}/comments")]
pub async fn list_comments(
    req: HttpRequest,
    service: web::Data<Service>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let comments = service.list_comments(&post_id).await?;
    let data: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        count = data.len(),
        "comments listed"
    );

    Ok(HttpResponse::Ok().json(json!({ "data": data })))
}

#[put("/posts/{post_id}/comments/{comment_id}")]
pub async fn update_comment(
    req: HttpRequest,
    service: web::Data<Service>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, comment_id) = path.into_inner();
    let comment = service
        .update_comment(&post_id, &comment_id, payload.into_inner())
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        comment_id = %comment.id,
        "comment updated"
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "comment updated" })))
}

#[delete("/posts/{post_id}/comments/{comment_id}")]
pub async fn delete_comment(
    req: HttpRequest,
    service: web::Data<Service>,
    path: web::Path<(String, String)>,
    payload: web::Json<DeleteCommentRequest>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, comment_id) = path.into_inner();
    service
        .delete_comment(&post_id, &comment_id, &payload.password)
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        comment_id = %comment_id,
        "comment deleted"
    );

    Ok(HttpResponse::Ok().json(json!({ "message": "comment deleted" })))
}
