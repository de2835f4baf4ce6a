use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::response::Css;

use super::{BuildVersionRoute, ClaimCssRoute, ErrorCssRoute, ErrorPage, HealthRoute, RobotRoute};

pub(super) async fn healthz(_: HealthRoute) -> &'static str {
    "Yup, I'm alive"
}

pub(super) async fn build_version(_: BuildVersionRoute) -> &'static str {
    drop_exes::build_version()
}

pub(super) async fn robots_txt(_: RobotRoute) -> Response {
    let mut res = include_str!("../../../../static/robots.txt").into_response();
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    res
}

pub(super) async fn claim_css(_: ClaimCssRoute) -> Css<&'static str> {
    Css(include_str!("../../../../static/claim.css"))
}

pub(super) async fn error_css(_: ErrorCssRoute) -> Css<&'static str> {
    Css(include_str!("../../../../static/error.css"))
}

pub(super) async fn not_found() -> ErrorPage<&'static str> {
    ErrorPage {
        error: "Page not found",
        code: StatusCode::NOT_FOUND,
    }
}
