
use axum::{
    body::{to_bytes, Body},
    http::{header, Request},
    response::Response,
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::Settings;
use crate::models::StoveDocument;
use crate::services::TemplateSource;
use crate::{build_router, AppState};

pub(crate) fn app_with(templates: impl TemplateSource + 'static) -> (AppState, Router) {
    let state = AppState::new(Settings::default(), Arc::new(templates)).unwrap();
    (state.clone(), build_router(state))
}

pub(crate) fn stove(stove_id: &str) -> StoveDocument {
    serde_json::from_value(json!({
        "stoveID": stove_id,
        "name": format!("Stove {}", stove_id),
        "controls": { "onOff": true, "heatingPower": 65 }
    }))
    .unwrap()
}

pub(crate) async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub(crate) fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::post("/web/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("email={}&password={}", email, password)))
        .unwrap()
}

pub(crate) fn get_with_cookie(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// `name=value` part of the response's Set-Cookie header.
pub(crate) fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

pub(crate) async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
