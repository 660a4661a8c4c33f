//! Mutation endpoints. Every route is a POST with a JSON body.

use actix_web::{HttpResponse, web};

use cookbook_core::domain::{NewPost, PostPatch};
use cookbook_shared::ApiResponse;
use cookbook_shared::dto::{
    CreateCategoryRequest, CreatePostRequest, CredentialsRequest, DeleteCategoryRequest,
    DeletePostRequest, UpdateCategoryRequest, UpdatePostRequest, UpdateUserEmailPassRequest,
    UpdateUserProfileRequest,
};

use super::convert::{
    auth_response, category_response, parse_status, post_response, user_response,
};
use crate::middleware::auth::BearerToken;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/mutations/signUp
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let payload = state.mutations.sign_up(&body.email, &body.password).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(auth_response(payload))))
}

/// POST /api/mutations/authUser
pub async fn auth_user(
    state: web::Data<AppState>,
    body: web::Json<CredentialsRequest>,
) -> AppResult<HttpResponse> {
    let payload = state.mutations.auth_user(&body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(auth_response(payload))))
}

/// POST /api/mutations/updateUserProfile
pub async fn update_user_profile(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<UpdateUserProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .mutations
        .update_user_profile(token.as_deref(), req.id, req.name, req.lastname)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(user))))
}

/// POST /api/mutations/updateUserEmailPass
pub async fn update_user_email_pass(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<UpdateUserEmailPassRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let payload = state
        .mutations
        .update_user_email_pass(token.as_deref(), req.id, req.email, req.password)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(auth_response(payload))))
}

/// POST /api/mutations/createPost
pub async fn create_post(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let fields = NewPost {
        title: req.title,
        excerpt: req.excerpt,
        content: req.content,
        category_id: req.category_id,
        status: parse_status(req.status)?,
    };

    let post = state.mutations.create_post(token.as_deref(), fields).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(post_response(post))))
}

/// POST /api/mutations/updatePost
pub async fn update_post(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.fields.title,
        excerpt: req.fields.excerpt,
        content: req.fields.content,
        category_id: req.fields.category_id,
        status: parse_status(req.fields.status)?,
    };

    let post = state
        .mutations
        .update_post(token.as_deref(), req.post_id, patch)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// POST /api/mutations/deletePost
pub async fn delete_post(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<DeletePostRequest>,
) -> AppResult<HttpResponse> {
    let post = state
        .mutations
        .delete_post(token.as_deref(), body.post_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post_response(post))))
}

/// POST /api/mutations/createCategory
pub async fn create_category(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .mutations
        .create_category(token.as_deref(), body.into_inner().name)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(category_response(category))))
}

/// POST /api/mutations/updateCategory
pub async fn update_category(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let category = state
        .mutations
        .update_category(token.as_deref(), req.cat_id, req.name)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category_response(category))))
}

/// POST /api/mutations/deleteCategory
pub async fn delete_category(
    state: web::Data<AppState>,
    token: BearerToken,
    body: web::Json<DeleteCategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .mutations
        .delete_category(token.as_deref(), body.cat_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(category_response(category))))
}
