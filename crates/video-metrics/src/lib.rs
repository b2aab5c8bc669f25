//! Video Metrics
//!
//! The record a creator submits to get an ad revenue estimate: engagement
//! counts, upload timestamp parts and three categorical selections.

mod categorical;

pub use categorical::{Category, Country, Device, OneHot, ParseCategoricalError};

use serde::{Deserialize, Serialize};

/// Raw video metadata as entered on the form.
///
/// Missing fields in a serialized record take the form defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoMetrics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub watch_time_minutes: f64,
    pub video_length_minutes: f64,
    pub subscribers: u64,
    pub upload_year: u16,
    pub upload_month: u8,
    pub upload_day: u8,
    /// Hour of day, 0-23
    pub upload_hour: u8,
    /// 0 = Monday, 6 = Sunday
    pub upload_weekday: u8,
    pub category: Category,
    pub device: Device,
    pub country: Country,
}

impl Default for VideoMetrics {
    fn default() -> Self {
        Self {
            views: 10_000,
            likes: 500,
            comments: 100,
            watch_time_minutes: 15_000.0,
            video_length_minutes: 10.0,
            subscribers: 50_000,
            upload_year: 2024,
            upload_month: 9,
            upload_day: 15,
            upload_hour: 10,
            upload_weekday: 2,
            category: Category::default(),
            device: Device::default(),
            country: Country::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_defaults() {
        let m = VideoMetrics::default();
        assert_eq!(m.views, 10_000);
        assert_eq!(m.upload_month, 9);
        assert_eq!(m.category, Category::Education);
        assert_eq!(m.device, Device::Mobile);
        assert_eq!(m.country, Country::In);
    }

    #[test]
    fn test_partial_record_takes_defaults() {
        let m: VideoMetrics =
            serde_json::from_str(r#"{"views": 42, "category": "Gaming", "device": "TV"}"#).unwrap();
        assert_eq!(m.views, 42);
        assert_eq!(m.likes, 500);
        assert_eq!(m.category, Category::Gaming);
        assert_eq!(m.device, Device::Tv);
        assert_eq!(m.country, Country::In);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let r: Result<VideoMetrics, _> = serde_json::from_str(r#"{"category": "Lifestyle"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_negative_count_rejected() {
        let r: Result<VideoMetrics, _> = serde_json::from_str(r#"{"views": -1}"#);
        assert!(r.is_err());
    }
}
