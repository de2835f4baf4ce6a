mod claim_page;
mod common;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use askama::Template;
use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use axum_extra::routing::{RouterExt, TypedPath};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{app::App, cli::ServeOpt};

#[derive(TypedPath)]
#[typed_path("/")]
pub(crate) struct HomeRoute;

#[derive(TypedPath)]
#[typed_path("/api/claim-state")]
pub(crate) struct ClaimStateRoute;

#[derive(TypedPath)]
#[typed_path("/healthz")]
pub(crate) struct HealthRoute;

#[derive(TypedPath)]
#[typed_path("/build-version")]
pub(crate) struct BuildVersionRoute;

#[derive(TypedPath)]
#[typed_path("/claim.css")]
pub(crate) struct ClaimCssRoute;

#[derive(TypedPath)]
#[typed_path("/error.css")]
pub(crate) struct ErrorCssRoute;

#[derive(TypedPath)]
#[typed_path("/robots.txt")]
pub(crate) struct RobotRoute;

pub(crate) fn router(app: Arc<App>) -> Router {
    Router::new()
        .typed_get(claim_page::home)
        .typed_get(claim_page::claim_state)
        .typed_get(common::healthz)
        .typed_get(common::build_version)
        .typed_get(common::claim_css)
        .typed_get(common::error_css)
        .typed_get(common::robots_txt)
        .with_state(app)
        .fallback(common::not_found)
}

pub(crate) async fn launch(app: App, opt: ServeOpt) -> Result<()> {
    let router = router(Arc::new(app))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([Method::GET, Method::HEAD])
                .allow_headers([CONTENT_TYPE]),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            opt.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http());

    tracing::info!("Launching server on {}", opt.bind);
    let listener = tokio::net::TcpListener::bind(opt.bind)
        .await
        .with_context(|| format!("Cannot bind claim page server to {}", opt.bind))?;
    axum::serve(listener, router)
        .await
        .context("Background task should never complete")
}

#[derive(askama::Template)]
#[template(path = "error.html")]
pub(crate) struct ErrorPage<T: std::fmt::Display> {
    error: T,
    code: StatusCode,
}

impl<T: std::fmt::Display> IntoResponse for ErrorPage<T> {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(page) => {
                let mut res = Html(page).into_response();
                *res.status_mut() = self.code;
                res
            }
            Err(e) => {
                tracing::error!("Unable to render error page: {e:?}");
                (self.code, self.error.to_string()).into_response()
            }
        }
    }
}
