//! Treaty report, treaty comparison and gross-up calculator endpoints

pub mod handlers;

pub use handlers::{
    GrossUpRequest, GrossUpResponse, ReportAppState, build_report, calculate_gross_up,
    compare_treaties, get_treaty_report,
};

use axum::{
    Router,
    routing::{get, post},
};

/// Routes served by this module, relative to the API prefix
pub fn build_report_routes(state: ReportAppState) -> Router {
    Router::new()
        .route("/contracts/{id}/report", get(get_treaty_report))
        .route("/reports/compare", get(compare_treaties))
        .route("/analytics/gross-up-factor", post(calculate_gross_up))
        .with_state(state)
}
