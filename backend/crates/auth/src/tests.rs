//! Router-level tests for the auth crate
//!
//! Drives the login endpoints and both guards through a real axum `Router`
//! backed by the in-memory repository.

#[cfg(test)]
mod http_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::response::Response;
    use axum::routing::get;
    use chrono::{Duration, Utc};
    use platform::client::TrustedProxies;
    use platform::rate_limit::RateLimitConfig;
    use serde_json::Value;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    use crate::application::ManageAdminUseCase;
    use crate::domain::value_object::AdminId;
    use crate::{
        AuthAppState, AuthConfig, InMemoryAdminRepository, auth_router_with_state,
        guard_admin_pages, require_admin_api,
    };

    type State = AuthAppState<InMemoryAdminRepository>;

    async fn app_with(config: AuthConfig) -> (Router, State) {
        let state = AuthAppState::new(InMemoryAdminRepository::new(), config);
        ManageAdminUseCase::new(state.repo.clone(), state.config.clone())
            .create("admin", "correct-pw".to_string())
            .await
            .unwrap();

        let guard = state.guard_state();
        let router = Router::new()
            .nest("/api/auth", auth_router_with_state(state.clone()))
            .route("/admin", get(|| async { "admin home" }))
            .route("/admin/login", get(|| async { "login page" }))
            .route("/admin/{*rest}", get(|| async { "admin page" }))
            .route(
                "/api/private",
                get(|| async { "private" })
                    .route_layer(from_fn_with_state(guard.clone(), require_admin_api)),
            )
            .route("/", get(|| async { "home" }))
            .layer(from_fn_with_state(guard, guard_admin_pages));

        (router, state)
    }

    async fn app() -> (Router, State) {
        app_with(AuthConfig::development()).await
    }

    fn login_request(body: &str) -> Request<Body> {
        Request::post("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_cookie(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// "admin_token=<jwt>" from a login response
    async fn login_cookie(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(login_request(r#"{"username":"admin","password":"correct-pw"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response).unwrap();
        cookie.split(';').next().unwrap().to_string()
    }

    // ========================================================================
    // Login
    // ========================================================================

    #[tokio::test]
    async fn test_login_success_sets_cookie_and_admits_to_admin() {
        let (router, _) = app().await;

        let response = router
            .clone()
            .oneshot(login_request(r#"{"username":"admin","password":"correct-pw"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("admin_token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["username"], "admin");
        assert!(body["expiresAt"].is_string());
        assert!(body.get("token").is_none());

        let pair = cookie.split(';').next().unwrap();
        let response = router
            .oneshot(get_with_cookie("/admin", Some(pair)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"admin home");
    }

    #[tokio::test]
    async fn test_production_cookie_is_secure() {
        let (router, _) = app_with(AuthConfig::default()).await;

        let response = router
            .oneshot(login_request(r#"{"username":"admin","password":"correct-pw"}"#))
            .await
            .unwrap();
        assert!(set_cookie(&response).unwrap().contains("; Secure"));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_byte_identical() {
        let (router, _) = app().await;

        let wrong = router
            .clone()
            .oneshot(login_request(r#"{"username":"admin","password":"wrong"}"#))
            .await
            .unwrap();
        let unknown = router
            .oneshot(login_request(r#"{"username":"ghost","password":"correct-pw"}"#))
            .await
            .unwrap();

        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&wrong).is_none());
        assert!(set_cookie(&unknown).is_none());

        let wrong = body_bytes(wrong).await;
        let unknown = body_bytes(unknown).await;
        assert_eq!(wrong, unknown);

        let body: Value = serde_json::from_slice(&wrong).unwrap();
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_bad_bodies_are_400() {
        let (router, _) = app().await;

        for body in [
            "{}",
            r#"{"username":"admin"}"#,
            r#"{"password":"correct-pw"}"#,
            r#"{"username":"","password":""}"#,
            "not json",
            r#"{"username":42,"password":"x"}"#,
        ] {
            let response = router.clone().oneshot(login_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
            assert!(set_cookie(&response).is_none());
        }

        let no_content_type = Request::post("/api/auth/login")
            .body(Body::from(r#"{"username":"admin","password":"correct-pw"}"#))
            .unwrap();
        let response = router.oneshot(no_content_type).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Failed login from `peer`, optionally claiming another client address
    fn failed_login_from(peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(xff) = forwarded_for {
            builder = builder.header("x-forwarded-for", xff);
        }
        let mut req = builder
            .body(Body::from(r#"{"username":"admin","password":"nope"}"#))
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::new(peer.parse().unwrap(), 50000)));
        req
    }

    #[tokio::test]
    async fn test_login_is_throttled() {
        let (router, _) = app_with(AuthConfig {
            login_rate_limit: RateLimitConfig::new(3, 900),
            ..AuthConfig::development()
        })
        .await;

        for _ in 0..3 {
            let response = router
                .clone()
                .oneshot(failed_login_from("198.51.100.9", None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = router
            .clone()
            .oneshot(failed_login_from("198.51.100.9", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));

        // Other clients are unaffected
        let response = router
            .oneshot(login_request(r#"{"username":"admin","password":"correct-pw"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rotating_forwarded_for_does_not_reset_budget() {
        let (router, _) = app_with(AuthConfig {
            login_rate_limit: RateLimitConfig::new(3, 900),
            ..AuthConfig::development()
        })
        .await;

        let claimed = ["10.1.0.1", "10.1.0.2", "10.1.0.3", "10.1.0.4"];
        for xff in &claimed[..3] {
            let response = router
                .clone()
                .oneshot(failed_login_from("203.0.113.50", Some(xff)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }

        let response = router
            .oneshot(failed_login_from("203.0.113.50", Some(claimed[3])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_trusted_proxy_keeps_clients_apart() {
        let proxy = "10.0.0.1";
        let (router, _) = app_with(AuthConfig {
            login_rate_limit: RateLimitConfig::new(2, 900),
            trusted_proxies: TrustedProxies::new(vec![proxy.parse().unwrap()]),
            ..AuthConfig::development()
        })
        .await;

        for _ in 0..2 {
            let response = router
                .clone()
                .oneshot(failed_login_from(proxy, Some("198.51.100.1")))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
        let response = router
            .clone()
            .oneshot(failed_login_from(proxy, Some("198.51.100.1")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        // A different client behind the same proxy has its own budget
        let response = router
            .oneshot(failed_login_from(proxy, Some("198.51.100.2")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // ========================================================================
    // Page guard
    // ========================================================================

    #[tokio::test]
    async fn test_guard_without_cookie_redirects() {
        let (router, _) = app().await;

        let response = router
            .oneshot(get_with_cookie("/admin/dashboard", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn test_guard_with_valid_cookie_passes() {
        let (router, _) = app().await;
        let cookie = login_cookie(&router).await;

        let response = router
            .oneshot(get_with_cookie("/admin/dashboard", Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"admin page");
    }

    #[tokio::test]
    async fn test_guard_with_expired_cookie_redirects_and_clears() {
        let (router, state) = app().await;
        let expired = state
            .tokens
            .issue_at(&AdminId::new(), "admin", Utc::now() - Duration::hours(25))
            .unwrap();

        let response = router
            .oneshot(get_with_cookie(
                "/admin/dashboard",
                Some(&format!("admin_token={}", expired.token)),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.starts_with("admin_token=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_guard_with_tampered_cookie_redirects_and_clears() {
        let (router, _) = app().await;
        let cookie = login_cookie(&router).await;
        let tampered = format!("{}x", cookie);

        let response = router
            .oneshot(get_with_cookie("/admin", Some(&tampered)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_token_from_another_secret_is_rejected() {
        let (router, _) = app().await;
        let (other_router, _) = app().await;
        let foreign = login_cookie(&other_router).await;

        let response = router
            .oneshot(get_with_cookie("/admin", Some(&foreign)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    }

    #[tokio::test]
    async fn test_login_page_is_always_reachable() {
        let (router, _) = app().await;
        let cookie = login_cookie(&router).await;

        for cookie in [None, Some("admin_token=garbage"), Some(cookie.as_str())] {
            let response = router
                .clone()
                .oneshot(get_with_cookie("/admin/login", cookie))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(set_cookie(&response).is_none());
        }
    }

    #[tokio::test]
    async fn test_public_paths_are_not_guarded() {
        let (router, _) = app().await;

        let response = router
            .oneshot(get_with_cookie("/", Some("admin_token=garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // ========================================================================
    // API guard, logout, session
    // ========================================================================

    #[tokio::test]
    async fn test_api_guard() {
        let (router, _) = app().await;

        let response = router
            .clone()
            .oneshot(get_with_cookie("/api/private", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router
            .clone()
            .oneshot(get_with_cookie("/api/private", Some("admin_token=garbage")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&response).unwrap().contains("Max-Age=0"));

        let cookie = login_cookie(&router).await;
        let response = router
            .oneshot(get_with_cookie("/api/private", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let (router, _) = app().await;

        let response = router
            .oneshot(
                Request::post("/api/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cleared = set_cookie(&response).unwrap();
        assert!(cleared.starts_with("admin_token=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_session_status() {
        let (router, _) = app().await;

        let response = router
            .clone()
            .oneshot(get_with_cookie("/api/auth/session", None))
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, serde_json::json!({ "authenticated": false }));

        let cookie = login_cookie(&router).await;
        let response = router
            .oneshot(get_with_cookie("/api/auth/session", Some(&cookie)))
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["username"], "admin");
        assert!(body["expiresAt"].is_string());
    }
}
