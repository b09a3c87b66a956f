//! Admin Page Placeholders
//!
//! The site itself is rendered by the frontend. These stand in for the
//! admin pages so the page guard has something to protect.

use axum::extract::OriginalUri;
use axum::response::Html;

/// GET /admin/login
pub async fn admin_login() -> Html<&'static str> {
    Html(
        "<!doctype html><html><head><title>Admin sign-in</title></head>\
         <body><h1>Admin sign-in</h1></body></html>",
    )
}

/// GET /admin and GET /admin/*
pub async fn admin_page(OriginalUri(uri): OriginalUri) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>Admin</title></head>\
         <body><h1>Admin</h1><p>{}</p></body></html>",
        escape(uri.path())
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
