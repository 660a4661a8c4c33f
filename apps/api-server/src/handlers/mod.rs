//! HTTP handlers and route configuration.

mod convert;
mod health;
mod mutations;
mod queries;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/posts/{id}", web::get().to(queries::get_post))
            .route("/categories/{id}", web::get().to(queries::get_category))
            // Mutations; all but signUp/authUser require a bearer token
            .service(
                web::scope("/mutations")
                    .route("/signUp", web::post().to(mutations::sign_up))
                    .route("/authUser", web::post().to(mutations::auth_user))
                    .route(
                        "/updateUserProfile",
                        web::post().to(mutations::update_user_profile),
                    )
                    .route(
                        "/updateUserEmailPass",
                        web::post().to(mutations::update_user_email_pass),
                    )
                    .route("/createPost", web::post().to(mutations::create_post))
                    .route("/updatePost", web::post().to(mutations::update_post))
                    .route("/deletePost", web::post().to(mutations::delete_post))
                    .route("/createCategory", web::post().to(mutations::create_category))
                    .route("/updateCategory", web::post().to(mutations::update_category))
                    .route("/deleteCategory", web::post().to(mutations::delete_category)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use cookbook_infra::auth::{Argon2PasswordService, JwtConfig};

    use super::configure_routes;
    use crate::state::AppState;

    fn state() -> web::Data<AppState> {
        let passwords = Argon2PasswordService::with_params(1024, 1, 1).unwrap();
        web::Data::new(AppState::in_memory(&JwtConfig::default(), Arc::new(passwords)).unwrap())
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(state())
                    .app_data(crate::json_config())
                    .configure(configure_routes),
            )
            .await
        };
    }

    /// POST a mutation and return (status, body).
    macro_rules! mutate {
        ($app:expr, $op:literal, $token:expr, $body:expr) => {{
            let mut req = test::TestRequest::post()
                .uri(concat!("/api/mutations/", $op))
                .set_json($body);
            if let Some(token) = $token {
                req = req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)));
            }
            let resp = test::call_service(&$app, req.to_request()).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    macro_rules! sign_up {
        ($app:expr, $email:expr) => {{
            let (status, body) = mutate!(
                $app,
                "signUp",
                None::<&str>,
                json!({ "email": $email, "password": "secret1" })
            );
            assert_eq!(status, StatusCode::CREATED);
            (
                body["data"]["user"]["id"].as_str().unwrap().to_owned(),
                body["data"]["accessToken"].as_str().unwrap().to_owned(),
            )
        }};
    }

    #[actix_web::test]
    async fn test_health() {
        let app = app!();
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "memory");
    }

    #[actix_web::test]
    async fn test_sign_up_returns_token_and_public_user() {
        let app = app!();
        let (status, body) = mutate!(
            app,
            "signUp",
            None::<&str>,
            json!({ "email": "Alice@Example.com", "password": "secret1" })
        );

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["tokenType"], "Bearer");
        assert_eq!(body["data"]["user"]["email"], "alice@example.com");
        assert!(body["data"]["user"].get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn test_missing_token_is_problem_401() {
        let app = app!();
        let (status, body) = mutate!(
            app,
            "createCategory",
            None::<&str>,
            json!({ "name": "Soups" })
        );

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status"], 401);
        assert_eq!(body["type"], "about:blank");
    }

    #[actix_web::test]
    async fn test_foreign_post_delete_is_403() {
        let app = app!();
        let (_, alice) = sign_up!(app, "alice@example.com");
        let (_, bob) = sign_up!(app, "bob@example.com");

        let (_, cat) = mutate!(app, "createCategory", Some(&alice), json!({ "name": "Soups" }));
        let (_, post) = mutate!(
            app,
            "createPost",
            Some(&alice),
            json!({ "title": "Minestrone", "categoryId": cat["data"]["id"] })
        );

        let (status, _) = mutate!(
            app,
            "deletePost",
            Some(&bob),
            json!({ "postId": post["data"]["id"] })
        );
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = mutate!(
            app,
            "deletePost",
            Some(&alice),
            json!({ "postId": post["data"]["id"] })
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["title"], "Minestrone");
    }

    #[actix_web::test]
    async fn test_unknown_status_is_400() {
        let app = app!();
        let (_, alice) = sign_up!(app, "alice@example.com");
        let (_, cat) = mutate!(app, "createCategory", Some(&alice), json!({ "name": "Soups" }));

        let (status, body) = mutate!(
            app,
            "createPost",
            Some(&alice),
            json!({ "title": "Borscht", "categoryId": cat["data"]["id"], "status": "archived" })
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_400() {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/api/mutations/signUp")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"email\":")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_get_post_resolves_relations() {
        let app = app!();
        let (alice_id, alice) = sign_up!(app, "alice@example.com");
        let (_, cat) = mutate!(app, "createCategory", Some(&alice), json!({ "name": "Breads" }));
        let cat_id = cat["data"]["id"].as_str().unwrap().to_owned();

        let (_, focaccia) = mutate!(
            app,
            "createPost",
            Some(&alice),
            json!({ "title": "Focaccia", "categoryId": cat_id, "status": "published" })
        );
        mutate!(
            app,
            "createPost",
            Some(&alice),
            json!({ "title": "Pita", "categoryId": cat_id })
        );

        let uri = format!("/api/posts/{}", focaccia["data"]["id"].as_str().unwrap());
        let req = test::TestRequest::get().uri(&uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let data = &body["data"];
        assert_eq!(data["title"], "Focaccia");
        assert_eq!(data["status"], "published");
        assert_eq!(data["author"]["id"], alice_id.as_str());
        assert_eq!(data["category"]["name"], "Breads");
        assert_eq!(data["related"].as_array().unwrap().len(), 1);
        assert_eq!(data["related"][0]["title"], "Pita");
        assert!(data.get("errors").is_none());
    }

    #[actix_web::test]
    async fn test_get_post_after_category_delete_reports_field_error() {
        let app = app!();
        let (_, alice) = sign_up!(app, "alice@example.com");
        let (_, cat) = mutate!(app, "createCategory", Some(&alice), json!({ "name": "Breads" }));
        let (_, post) = mutate!(
            app,
            "createPost",
            Some(&alice),
            json!({ "title": "Focaccia", "categoryId": cat["data"]["id"] })
        );
        mutate!(
            app,
            "deleteCategory",
            Some(&alice),
            json!({ "catId": cat["data"]["id"] })
        );

        let uri = format!("/api/posts/{}", post["data"]["id"].as_str().unwrap());
        let req = test::TestRequest::get().uri(&uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let data = &body["data"];
        assert!(data["category"].is_null());
        assert_eq!(data["errors"][0]["field"], "category");
        assert_eq!(data["author"]["email"], "alice@example.com");
    }

    #[actix_web::test]
    async fn test_get_missing_category_is_404() {
        let app = app!();
        let uri = format!("/api/categories/{}", uuid::Uuid::new_v4());
        let req = test::TestRequest::get().uri(&uri).to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
