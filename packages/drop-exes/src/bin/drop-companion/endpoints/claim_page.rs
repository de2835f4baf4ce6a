use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use claim::prelude::*;

use super::{ClaimStateRoute, ErrorPage, HomeRoute};
use crate::app::App;

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(super) enum OutcomeKind {
    Success,
    Error,
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub(super) struct PageQuery {
    wallet: Option<Address>,
    /// Set by the wallet widget when it redirects back after a claim
    outcome: Option<OutcomeKind>,
    message: Option<String>,
}

impl PageQuery {
    fn claim_outcome(&self) -> Option<ClaimOutcome> {
        self.outcome.map(|kind| match kind {
            OutcomeKind::Success => ClaimOutcome::Success,
            OutcomeKind::Error => ClaimOutcome::Error {
                message: self
                    .message
                    .clone()
                    .unwrap_or_else(|| "Claim failed".to_owned()),
            },
        })
    }
}

#[derive(serde::Deserialize, Debug)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub(super) struct StateQuery {
    wallet: Option<Address>,
}

#[derive(Template)]
#[template(path = "claim.html")]
struct ClaimPage<'a> {
    contract: Address,
    quantity: u64,
    view: &'a ClaimView,
    outcome: Option<ClaimOutcome>,
}

impl ClaimPage<'_> {
    fn name(&self) -> &str {
        self.view
            .metadata
            .as_ref()
            .map_or("", |metadata| metadata.name.as_str())
    }

    fn image(&self) -> Option<&str> {
        self.view.metadata.as_ref()?.image.as_deref()
    }

    fn notification(&self) -> Option<&str> {
        self.outcome.as_ref().map(ClaimOutcome::notification)
    }

    fn notification_class(&self) -> &'static str {
        match &self.outcome {
            Some(ClaimOutcome::Success) => "notification success",
            _ => "notification error",
        }
    }

    fn supply_line(&self) -> String {
        let supply = &self.view.supply;
        match supply.total {
            Some(total) => format!("{} / {total} claimed", supply.claimed),
            None => format!("{} claimed", supply.claimed),
        }
    }
}

pub(super) async fn home(
    _: HomeRoute,
    State(app): State<Arc<App>>,
    Query(query): Query<PageQuery>,
) -> Response {
    let view = app.claim_view(query.wallet).await;
    let page = ClaimPage {
        contract: app.config().contract,
        quantity: app.config().quantity.get(),
        view: &view,
        outcome: query.claim_outcome(),
    };
    match page.render() {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failure rendering claim page: {e:?}");
            ErrorPage {
                error: "Unable to render claim page",
                code: StatusCode::INTERNAL_SERVER_ERROR,
            }
            .into_response()
        }
    }
}

pub(super) async fn claim_state(
    _: ClaimStateRoute,
    State(app): State<Arc<App>>,
    Query(query): Query<StateQuery>,
) -> Json<ClaimView> {
    Json(app.claim_view(query.wallet).await)
}
