use crate::infra::{build_report_view, AppState, LedgerState, ReportQuery};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::Deserialize;
use serde_json::json;
use staff_ledger::admin::{SheetLine, UserSummary};
use staff_ledger::dashboard::StaffDashboard;
use staff_ledger::error::AppError;
use staff_ledger::load::{load_contribution_sheet, load_dashboard, load_directory, Listing};
use staff_ledger::report::{to_csv_string, ReportSnapshot};

pub(crate) fn with_ledger_routes(ledger: LedgerState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/report", get(report_endpoint))
        .route("/api/v1/report/query", post(report_query_endpoint))
        .route("/api/v1/report/print", get(report_print_endpoint))
        .route("/api/v1/report/export", get(report_export_endpoint))
        .route("/api/v1/dashboard", get(dashboard_endpoint))
        .route("/api/v1/admin/users", get(admin_users_endpoint))
        .route(
            "/api/v1/admin/contributions",
            get(admin_contributions_endpoint),
        )
        .layer(Extension(ledger))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn report_endpoint(
    Extension(ledger): Extension<LedgerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ReportSnapshot>, AppError> {
    let query = ReportQuery::from_pairs(pairs)?;
    let view = build_report_view(ledger.api.as_ref(), ledger.page_size, query).await?;
    Ok(Json(view.snapshot()))
}

pub(crate) async fn report_query_endpoint(
    Extension(ledger): Extension<LedgerState>,
    Json(query): Json<ReportQuery>,
) -> Result<Json<ReportSnapshot>, AppError> {
    let view = build_report_view(ledger.api.as_ref(), ledger.page_size, query).await?;
    Ok(Json(view.snapshot()))
}

pub(crate) async fn report_print_endpoint(
    Extension(ledger): Extension<LedgerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let query = ReportQuery::from_pairs(pairs)?;
    let view = build_report_view(ledger.api.as_ref(), ledger.page_size, query).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        view.print_html(),
    ))
}

pub(crate) async fn report_export_endpoint(
    Extension(ledger): Extension<LedgerState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let mut query = ReportQuery::from_pairs(pairs)?;
    query.page_index = 0;
    let view = build_report_view(ledger.api.as_ref(), ledger.page_size, query).await?;
    let csv = to_csv_string(view.filtered_rows())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contribution-report.csv\"",
            ),
        ],
        csv,
    ))
}

pub(crate) async fn dashboard_endpoint(
    Extension(ledger): Extension<LedgerState>,
) -> Result<Json<StaffDashboard>, AppError> {
    let dashboard = load_dashboard(ledger.api.as_ref()).await?;
    Ok(Json(dashboard))
}

pub(crate) async fn admin_users_endpoint(
    Extension(ledger): Extension<LedgerState>,
) -> Json<Listing<UserSummary>> {
    Json(load_directory(ledger.api.as_ref()).await)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContributionSearch {
    #[serde(default)]
    pub(crate) q: String,
}

pub(crate) async fn admin_contributions_endpoint(
    Extension(ledger): Extension<LedgerState>,
    Query(search): Query<ContributionSearch>,
) -> Json<Listing<SheetLine>> {
    Json(load_contribution_sheet(ledger.api.as_ref(), &search.q).await)
}
