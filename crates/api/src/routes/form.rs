//! Form Description Route
//!
//! Describes the input form so a front end can render it: every numeric
//! field with its bounds and default, and every dropdown with its options.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use video_metrics::{Category, Country, Device, OneHot, VideoMetrics};

use crate::AppState;

/// Numeric input
#[derive(Debug, Serialize)]
pub struct NumericField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    /// None when unbounded
    pub max: Option<f64>,
    pub default: f64,
    /// Whether fractional values are accepted
    pub fractional: bool,
}

/// Dropdown input
#[derive(Debug, Serialize)]
pub struct ChoiceField {
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<&'static str>,
    pub default: &'static str,
}

/// Response for the form endpoint
#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub numeric: Vec<NumericField>,
    pub choices: Vec<ChoiceField>,
}

fn numeric_field(
    name: &'static str,
    label: &'static str,
    range: (f64, f64),
    default: f64,
    fractional: bool,
) -> NumericField {
    NumericField {
        name,
        label,
        min: range.0,
        max: range.1.is_finite().then_some(range.1),
        default,
        fractional,
    }
}

fn choice_field<T: OneHot>(label: &'static str, default: T) -> ChoiceField {
    ChoiceField {
        name: T::FIELD,
        label,
        options: T::labels(),
        default: default.label(),
    }
}

/// Get the form description
pub async fn get_form(State(state): State<Arc<AppState>>) -> Json<FormResponse> {
    let ranges = state.engine.validator().config();
    let d = VideoMetrics::default();

    let numeric = vec![
        numeric_field("views", "Views", ranges.count_range, d.views as f64, false),
        numeric_field("likes", "Likes", ranges.count_range, d.likes as f64, false),
        numeric_field("comments", "Comments", ranges.count_range, d.comments as f64, false),
        numeric_field(
            "watch_time_minutes",
            "Watch Time (minutes)",
            ranges.watch_time_range,
            d.watch_time_minutes,
            true,
        ),
        numeric_field(
            "video_length_minutes",
            "Video Length (minutes)",
            ranges.video_length_range,
            d.video_length_minutes,
            true,
        ),
        numeric_field("subscribers", "Channel Subscribers", ranges.count_range, d.subscribers as f64, false),
        numeric_field("upload_year", "Upload Year", ranges.year_range, f64::from(d.upload_year), false),
        numeric_field("upload_month", "Upload Month", ranges.month_range, f64::from(d.upload_month), false),
        numeric_field("upload_day", "Upload Day", ranges.day_range, f64::from(d.upload_day), false),
        numeric_field("upload_hour", "Upload Hour (0-23)", ranges.hour_range, f64::from(d.upload_hour), false),
        numeric_field(
            "upload_weekday",
            "Upload Weekday (0=Mon, 6=Sun)",
            ranges.weekday_range,
            f64::from(d.upload_weekday),
            false,
        ),
    ];

    let choices = vec![
        choice_field::<Category>("Category", d.category),
        choice_field::<Device>("Top Device", d.device),
        choice_field::<Country>("Top Country", d.country),
    ];

    Json(FormResponse { numeric, choices })
}
