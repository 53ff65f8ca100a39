//! Dashboard page

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

/// Served for every path other than the API
pub async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
