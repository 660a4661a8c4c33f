//! Read endpoints that resolve an entity's relations.
//!
//! A relation that fails to resolve is reported under `errors` and left
//! null; the parent entity is still returned.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use cookbook_shared::ApiResponse;
use cookbook_shared::dto::{CategoryDetailResponse, PostDetailResponse};

use super::convert::{FieldErrors, category_response, post_response, user_response};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/{id}
pub async fn get_post(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let view = state.relations.resolve_post(path.into_inner()).await?;

    let mut errors = FieldErrors::default();
    let author = errors.take("author", view.author).map(user_response);
    let category = errors.take("category", view.category).map(category_response);
    let related = errors
        .take("related", view.related)
        .unwrap_or_default()
        .into_iter()
        .map(post_response)
        .collect();

    let body = PostDetailResponse {
        post: post_response(view.post),
        author,
        category,
        related,
        errors: errors.into_inner(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let view = state.relations.resolve_category(path.into_inner()).await?;

    let mut errors = FieldErrors::default();
    let author = errors.take("author", view.author).map(user_response);
    let posts = errors
        .take("posts", view.posts)
        .unwrap_or_default()
        .into_iter()
        .map(post_response)
        .collect();

    let body = CategoryDetailResponse {
        category: category_response(view.category),
        author,
        posts,
        errors: errors.into_inner(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}
