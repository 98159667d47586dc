use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use staff_ledger::api::{HttpStaffApi, SnapshotStaffApi, StaffApi};
use staff_ledger::config::AppConfig;
use staff_ledger::error::AppError;
use staff_ledger::load::load_report;
use staff_ledger::report::{FilterPredicate, PageError, ReportView};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only state shared by the report, dashboard and admin handlers.
#[derive(Clone)]
pub(crate) struct LedgerState {
    pub(crate) api: Arc<dyn StaffApi>,
    pub(crate) page_size: NonZeroUsize,
}

/// Which rows of the report to show and how to page them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) filters: Vec<FilterPredicate>,
    #[serde(default)]
    pub(crate) page_index: usize,
    #[serde(default)]
    pub(crate) page_size: Option<usize>,
}

impl ReportQuery {
    /// Reads `page`, `page_size` and repeated `filter=field:operator:value` pairs; other keys are ignored.
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, AppError> {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "filter" => query.filters.push(value.parse()?),
                "page" => query.page_index = parse_count("page", &value)?,
                "page_size" => query.page_size = Some(parse_count("page_size", &value)?),
                _ => {}
            }
        }
        Ok(query)
    }
}

pub(crate) fn parse_filter(raw: &str) -> Result<FilterPredicate, String> {
    raw.parse()
        .map_err(|err| format!("failed to parse filter '{raw}' ({err})"))
}

fn parse_count(name: &'static str, raw: &str) -> Result<usize, PageError> {
    raw.trim().parse().map_err(|_| PageError::NotANumber {
        name,
        value: raw.to_string(),
    })
}

/// Fetches the caller's record and positions the view as `query` asks.
pub(crate) async fn build_report_view(
    api: &dyn StaffApi,
    default_page_size: NonZeroUsize,
    query: ReportQuery,
) -> Result<ReportView, AppError> {
    let page_size = match query.page_size {
        Some(size) => NonZeroUsize::new(size).ok_or(PageError::ZeroPageSize)?,
        None => default_page_size,
    };

    let mut view = load_report(api, page_size).await;
    view.apply_filters(query.filters);
    view.set_page(query.page_index);
    Ok(view)
}

/// A snapshot file when given, otherwise the configured upstream API.
pub(crate) async fn staff_api(
    snapshot: Option<&Path>,
    config: &AppConfig,
) -> Result<Arc<dyn StaffApi>, AppError> {
    match snapshot {
        Some(path) => Ok(Arc::new(SnapshotStaffApi::from_path(path).await?)),
        None => Ok(Arc::new(HttpStaffApi::new(&config.upstream))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staff_ledger::report::RowField;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn collects_repeated_filters_in_order() {
        let query = ReportQuery::from_pairs(pairs(&[
            ("filter", "description:contains:jan"),
            ("page", "2"),
            ("filter", "date:after:2024-01-01"),
            ("utm_source", "mail"),
        ]))
        .expect("valid query");

        assert_eq!(query.page_index, 2);
        assert_eq!(query.page_size, None);
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[1].field, RowField::Date);
    }

    #[test]
    fn cli_filters_report_the_offending_text() {
        let err = parse_filter("colour:equals:red").expect_err("unknown field");
        assert!(err.contains("colour:equals:red"));
        assert_eq!(
            parse_filter("withdrawal:equals:5").map(|filter| filter.field),
            Ok(RowField::Withdrawal)
        );
    }

    #[test]
    fn rejects_unparseable_numbers_and_filters() {
        let err = ReportQuery::from_pairs(pairs(&[("page_size", "ten")])).expect_err("bad size");
        assert!(matches!(err, AppError::Page(PageError::NotANumber { .. })));

        let err = ReportQuery::from_pairs(pairs(&[("filter", "date")])).expect_err("bad filter");
        assert!(matches!(err, AppError::Filter(_)));
    }
}
