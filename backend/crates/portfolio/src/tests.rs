//! Router-level tests for the portfolio crate
//!
//! The admin guard is stood in for by a layer that only admits requests
//! carrying an `x-admin` header.

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::extract::Request as AxumRequest;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::{Next, from_fn};
    use axum::response::{IntoResponse, Response};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{
        InMemoryPortfolioRepository, LoggingMailRelay, contact_router, portfolio_router_generic,
    };

    async fn test_guard(req: AxumRequest, next: Next) -> Response {
        if req.headers().contains_key("x-admin") {
            next.run(req).await
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }

    fn app() -> Router {
        Router::new().nest(
            "/api",
            portfolio_router_generic(InMemoryPortfolioRepository::new(), from_fn(test_guard)),
        )
    }

    fn request(method: &str, path: &str, admin: bool, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if admin {
            builder = builder.header("x-admin", "1");
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn project_body(title: &str) -> Value {
        json!({
            "title": { "fr": title, "en": title },
            "description": { "fr": "Une description", "en": "A description" },
            "image": "/images/card.png",
            "technologies": ["Rust", "PostgreSQL"],
            "link": "https://example.com"
        })
    }

    async fn create(app: &Router, title: &str) -> Value {
        let response = app
            .clone()
            .oneshot(request("POST", "/api/projects", true, Some(project_body(title))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_list_is_public_and_starts_empty() {
        let response = app()
            .oneshot(request("GET", "/api/projects", false, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "member": [] }));
    }

    #[tokio::test]
    async fn test_writes_require_admin() {
        let app = app();
        let id = create(&app, "Guarded").await["id"].as_str().unwrap().to_string();

        let attempts = [
            request("POST", "/api/projects", false, Some(project_body("x"))),
            request("PUT", &format!("/api/projects/{id}"), false, Some(json!({}))),
            request("DELETE", &format!("/api/projects/{id}"), false, None),
            request("PUT", "/api/availability", false, Some(json!({ "status": "unavailable" }))),
        ];
        for req in attempts {
            let response = app.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = app
            .oneshot(request("GET", "/api/projects", false, None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["member"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_returns_project() {
        let body = create(&app(), "Portfolio").await;

        assert!(body["id"].as_str().is_some());
        assert_eq!(body["title"]["fr"], "Portfolio");
        assert_eq!(body["technologies"], json!(["Rust", "PostgreSQL"]));
        assert_eq!(body["categories"], json!([]));
        assert_eq!(body["link"], "https://example.com");
    }

    #[tokio::test]
    async fn test_create_reports_missing_fields() {
        let response = app()
            .oneshot(request(
                "POST",
                "/api/projects",
                true,
                Some(json!({ "title": { "fr": "Titre", "en": "Title" }, "image": "" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body["message"],
            "Missing required fields: description, technologies, image"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let response = app()
            .oneshot(
                Request::post("/api/projects")
                    .header("x-admin", "1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let app = app();
        create(&app, "Older").await;
        create(&app, "Newer").await;

        let response = app
            .oneshot(request("GET", "/api/projects", false, None))
            .await
            .unwrap();
        let body = json_body(response).await;
        let titles: Vec<&str> = body["member"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"]["en"].as_str().unwrap())
            .collect();

        assert_eq!(titles, vec!["Newer", "Older"]);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let app = app();
        let id = create(&app, "Before").await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                &format!("/api/projects/{id}"),
                true,
                Some(json!({ "image": "", "categories": ["web"], "link": null })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["title"]["en"], "Before");
        assert_eq!(body["image"], "/images/card.png");
        assert_eq!(body["categories"], json!(["web"]));
        assert_eq!(body["link"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_or_malformed_id_is_not_found() {
        let app = app();
        let unknown = uuid::Uuid::new_v4();

        for path in [format!("/api/projects/{unknown}"), "/api/projects/42".to_string()] {
            let response = app
                .clone()
                .oneshot(request("PUT", &path, true, Some(json!({}))))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);

            let response = app
                .clone()
                .oneshot(request("DELETE", &path, true, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_delete() {
        let app = app();
        let id = create(&app, "Doomed").await["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(request("DELETE", &format!("/api/projects/{id}"), true, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(request("GET", "/api/projects", false, None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!({ "member": [] }));
    }

    #[tokio::test]
    async fn test_availability_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request("GET", "/api/availability", false, None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!({ "status": "available" }));

        let response = app
            .clone()
            .oneshot(request(
                "PUT",
                "/api/availability",
                true,
                Some(json!({ "status": "partially" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({
                "message": "Availability status updated successfully",
                "status": "partially"
            })
        );

        let response = app
            .oneshot(request("GET", "/api/availability", false, None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await, json!({ "status": "partially" }));
    }

    #[tokio::test]
    async fn test_invalid_availability_is_rejected() {
        let app = app();

        for body in [json!({ "status": "busy" }), json!({})] {
            let response = app
                .clone()
                .oneshot(request("PUT", "/api/availability", true, Some(body)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    // ========================================================================
    // Contact
    // ========================================================================

    fn contact_app(repo: InMemoryPortfolioRepository) -> Router {
        Router::new().nest("/api", contact_router(repo, LoggingMailRelay))
    }

    fn contact_body() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Mission",
            "message": "Are you available in March?"
        })
    }

    #[tokio::test]
    async fn test_contact_is_public_and_stored() {
        let repo = InMemoryPortfolioRepository::new();

        let response = contact_app(repo.clone())
            .oneshot(request("POST", "/api/contact", false, Some(contact_body())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "success": true }));

        let stored = repo.contact_messages().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email.as_str(), "ada@example.com");
        assert_eq!(stored[0].subject, "Mission");
    }

    #[tokio::test]
    async fn test_contact_missing_fields() {
        let repo = InMemoryPortfolioRepository::new();

        let response = contact_app(repo.clone())
            .oneshot(request(
                "POST",
                "/api/contact",
                false,
                Some(json!({ "name": "Ada", "message": "" })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Missing required fields: email, subject, message");
        assert!(repo.contact_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_contact_invalid_email() {
        let repo = InMemoryPortfolioRepository::new();
        let mut body = contact_body();
        body["email"] = json!("ada at example dot com");

        let response = contact_app(repo.clone())
            .oneshot(request("POST", "/api/contact", false, Some(body)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Invalid email format");
        assert!(repo.contact_messages().await.is_empty());
    }

    #[tokio::test]
    async fn test_contact_malformed_body() {
        let response = contact_app(InMemoryPortfolioRepository::new())
            .oneshot(
                Request::post("/api/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"name\":"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
