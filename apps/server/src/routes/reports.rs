//! Sales report endpoints.
//!
//! Read-only aggregation; both handlers surface only storage errors beyond
//! parameter validation.

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use vela_core::SalesReport;
use vela_db::Database;

use crate::error::ApiError;

/// Query parameters for `GET /reports`.
///
/// Both dates are local calendar days; the window runs from the start of
/// `start_date` to the end of `end_date` (inclusive).
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// `GET /reports?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
pub async fn by_date_range(
    State(db): State<Database>,
    Query(params): Query<ReportParams>,
) -> Result<Json<SalesReport>, ApiError> {
    if params.start_date > params.end_date {
        return Err(ApiError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }

    let report = db
        .reports()
        .for_dates(params.start_date, params.end_date)
        .await?;
    Ok(Json(report))
}

/// `GET /reports/today` - convenience window for the current local day.
pub async fn today(State(db): State<Database>) -> Result<Json<SalesReport>, ApiError> {
    let report = db.reports().today().await?;
    Ok(Json(report))
}
