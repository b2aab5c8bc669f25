//! Feature Encoder
//!
//! Turns a submitted [`VideoMetrics`] record into the numeric row a trained
//! model expects: direct numeric fields, two derived engagement features and
//! one-hot indicators for the categorical selections, projected onto the
//! schema order.

use crate::derived;
use crate::features::{EncodingReport, FeatureMap, FeatureVector};
use crate::schema::FeatureSchema;
use serde::Serialize;
use tracing::{debug, warn};
use video_metrics::{Category, Country, Device, OneHot, VideoMetrics};

pub const VIEWS: &str = "views";
pub const LIKES: &str = "likes";
pub const COMMENTS: &str = "comments";
pub const ENGAGEMENT_RATE: &str = "engagement_rate";
pub const INTERACTION: &str = "interaction";

/// Direct numeric columns, including the `month`/`year` aliases older
/// artifacts were trained with
pub const DIRECT_COLUMNS: &[&str] = &[
    VIEWS,
    LIKES,
    COMMENTS,
    "watch_time_minutes",
    "video_length_minutes",
    "subscribers",
    "upload_year",
    "upload_month",
    "upload_day",
    "upload_hour",
    "upload_weekday",
    "month",
    "year",
];

/// Columns computed from the direct ones
pub const DERIVED_COLUMNS: &[&str] = &[ENGAGEMENT_RATE, INTERACTION];

const ONE_HOT_PREFIXES: &[&str] = &[Category::PREFIX, Device::PREFIX, Country::PREFIX];

/// Whether the column belongs to one of the one-hot groups
pub fn is_one_hot_column(column: &str) -> bool {
    ONE_HOT_PREFIXES.iter().any(|p| column.starts_with(p))
}

fn is_known_option<T: OneHot>(column: &str) -> bool {
    T::ALL.iter().any(|o| o.column() == column)
}

/// Schema columns the encoder can or cannot fill, computed once per schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coverage {
    /// Columns no submission can ever set (always 0)
    pub unproducible: Vec<String>,
    /// Form options that have no column in the schema
    pub unmatched_options: Vec<String>,
}

/// Encoder bound to one feature schema
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
}

impl FeatureEncoder {
    /// Create an encoder for a schema
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    /// Schema the encoder projects onto
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Encode one record into schema order.
    ///
    /// Never fails: unknown selections and columns the record cannot fill
    /// read as 0 and are listed in the returned report.
    pub fn encode(&self, metrics: &VideoMetrics) -> FeatureVector {
        let mut map = seed(metrics);

        // Derived from the seeded values, not the raw record
        let views = map.value_or_default(VIEWS);
        let likes = map.value_or_default(LIKES);
        let comments = map.value_or_default(COMMENTS);
        map.insert(ENGAGEMENT_RATE, derived::engagement_rate(likes, comments, views));
        map.insert(INTERACTION, derived::interaction(likes, comments));

        let mut unmatched = Vec::new();
        self.one_hot(&mut map, metrics.category, &mut unmatched);
        self.one_hot(&mut map, metrics.device, &mut unmatched);
        self.one_hot(&mut map, metrics.country, &mut unmatched);

        self.project(&map, unmatched)
    }

    fn one_hot<T: OneHot>(&self, map: &mut FeatureMap, value: T, unmatched: &mut Vec<String>) {
        let column = value.column();
        if self.schema.contains(&column) {
            map.insert(column, 1.0);
        } else {
            warn!("{} '{}' has no model column {}; encoding as all zeros", T::FIELD, value.label(), column);
            unmatched.push(column);
        }
    }

    fn project(&self, map: &FeatureMap, unmatched_categories: Vec<String>) -> FeatureVector {
        let values: Vec<f64> = self
            .schema
            .iter()
            .map(|column| map.value_or_default(column))
            .collect();

        let defaulted_columns: Vec<String> = self
            .schema
            .iter()
            .filter(|c| !map.contains(c) && !is_one_hot_column(c))
            .map(String::from)
            .collect();

        let dropped_features: Vec<String> = map
            .names()
            .into_iter()
            .filter(|n| !self.schema.contains(n))
            .map(String::from)
            .collect();

        if !defaulted_columns.is_empty() {
            debug!("Filled {} unproduced column(s) with 0: {:?}", defaulted_columns.len(), defaulted_columns);
        }
        if !dropped_features.is_empty() {
            debug!("Dropped {} feature(s) absent from schema", dropped_features.len());
        }

        FeatureVector {
            values,
            schema: self.schema.clone(),
            report: EncodingReport {
                unmatched_categories,
                defaulted_columns,
                dropped_features,
            },
        }
    }

    /// Compare the schema with everything the form can produce
    pub fn coverage(&self) -> Coverage {
        let unproducible = self
            .schema
            .iter()
            .filter(|c| {
                !DIRECT_COLUMNS.contains(c)
                    && !DERIVED_COLUMNS.contains(c)
                    && !is_known_option::<Category>(c)
                    && !is_known_option::<Device>(c)
                    && !is_known_option::<Country>(c)
            })
            .map(String::from)
            .collect();

        let mut unmatched_options = Vec::new();
        collect_unmatched::<Category>(&self.schema, &mut unmatched_options);
        collect_unmatched::<Device>(&self.schema, &mut unmatched_options);
        collect_unmatched::<Country>(&self.schema, &mut unmatched_options);

        Coverage {
            unproducible,
            unmatched_options,
        }
    }
}

fn collect_unmatched<T: OneHot>(schema: &FeatureSchema, out: &mut Vec<String>) {
    out.extend(T::ALL.iter().map(|o| o.column()).filter(|c| !schema.contains(c)));
}

fn seed(metrics: &VideoMetrics) -> FeatureMap {
    let mut map = FeatureMap::new();
    map.insert(VIEWS, metrics.views as f64);
    map.insert(LIKES, metrics.likes as f64);
    map.insert(COMMENTS, metrics.comments as f64);
    map.insert("watch_time_minutes", metrics.watch_time_minutes);
    map.insert("video_length_minutes", metrics.video_length_minutes);
    map.insert("subscribers", metrics.subscribers as f64);
    map.insert("upload_year", f64::from(metrics.upload_year));
    map.insert("upload_month", f64::from(metrics.upload_month));
    map.insert("upload_day", f64::from(metrics.upload_day));
    map.insert("upload_hour", f64::from(metrics.upload_hour));
    map.insert("upload_weekday", f64::from(metrics.upload_weekday));
    map.insert("month", f64::from(metrics.upload_month));
    map.insert("year", f64::from(metrics.upload_year));
    map
}

/// Encode a record against a schema
pub fn encode(metrics: &VideoMetrics, schema: &FeatureSchema) -> FeatureVector {
    FeatureEncoder::new(schema.clone()).encode(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn schema(columns: &[&str]) -> FeatureSchema {
        FeatureSchema::new(columns.iter().copied()).unwrap()
    }

    fn gaming() -> VideoMetrics {
        VideoMetrics {
            views: 10_000,
            likes: 500,
            comments: 100,
            category: Category::Gaming,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_row() {
        let schema = schema(&[
            "likes",
            "comments",
            "views",
            "engagement_rate",
            "interaction",
            "category_Gaming",
            "category_Tech",
        ]);
        let vector = encode(&gaming(), &schema);

        let expected = [500.0, 100.0, 10_000.0, 0.06, 600.0, 1.0, 0.0];
        assert_eq!(vector.len(), expected.len());
        for (got, want) in vector.values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_zero_views() {
        let metrics = VideoMetrics {
            views: 0,
            likes: 0,
            comments: 0,
            ..Default::default()
        };
        let vector = encode(&metrics, &schema(&["engagement_rate", "interaction"]));
        assert_eq!(vector.values, vec![0.0, 0.0]);
    }

    #[test]
    fn test_unmatched_category_is_all_zero() {
        let metrics = VideoMetrics {
            category: Category::Education,
            ..Default::default()
        };
        let vector = encode(&metrics, &schema(&["views", "category_Gaming", "category_Tech"]));
        assert_eq!(vector.get("category_Gaming"), Some(0.0));
        assert_eq!(vector.get("category_Tech"), Some(0.0));
        assert!(vector
            .report
            .unmatched_categories
            .contains(&"category_Education".to_string()));
    }

    #[test]
    fn test_missing_columns_default_to_zero() {
        let vector = encode(&gaming(), &schema(&["views", "avg_view_duration"]));
        assert_eq!(vector.values, vec![10_000.0, 0.0]);
        assert_eq!(vector.report.defaulted_columns, vec!["avg_view_duration".to_string()]);
    }

    #[test]
    fn test_extra_features_dropped() {
        let vector = encode(&gaming(), &schema(&["views"]));
        assert_eq!(vector.values, vec![10_000.0]);
        assert!(vector.report.dropped_features.contains(&"month".to_string()));
        assert!(vector.report.dropped_features.contains(&"interaction".to_string()));
    }

    #[test]
    fn test_month_year_aliases() {
        let vector = encode(&VideoMetrics::default(), &schema(&["month", "year", "upload_month"]));
        assert_eq!(vector.values, vec![9.0, 2024.0, 9.0]);
    }

    #[test]
    fn test_device_and_country_one_hot() {
        let metrics = VideoMetrics {
            device: Device::Tv,
            country: Country::Us,
            ..Default::default()
        };
        let vector = encode(
            &metrics,
            &schema(&["device_Mobile", "device_TV", "country_IN", "country_US"]),
        );
        assert_eq!(vector.values, vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_coverage() {
        let encoder = FeatureEncoder::new(schema(&[
            "views",
            "engagement_rate",
            "category_Gaming",
            "category_Lifestyle",
            "device_Mobile",
            "device_TV",
            "device_Tablet",
            "country_IN",
            "country_US",
            "country_UK",
            "country_CA",
            "country_DE",
            "avg_view_duration",
        ]));
        let coverage = encoder.coverage();
        assert_eq!(
            coverage.unproducible,
            vec!["category_Lifestyle".to_string(), "avg_view_duration".to_string()]
        );
        assert_eq!(
            coverage.unmatched_options,
            vec![
                "category_Education".to_string(),
                "category_Entertainment".to_string(),
                "category_Music".to_string(),
                "category_Tech".to_string(),
            ]
        );
    }

    fn arb_metrics() -> impl Strategy<Value = VideoMetrics> {
        (
            0u64..5_000_000,
            0u64..100_000,
            0u64..100_000,
            prop::sample::select(Category::ALL),
            prop::sample::select(Device::ALL),
            prop::sample::select(Country::ALL),
        )
            .prop_map(|(views, likes, comments, category, device, country)| VideoMetrics {
                views,
                likes,
                comments,
                category,
                device,
                country,
                ..Default::default()
            })
    }

    fn full_schema() -> FeatureSchema {
        let mut columns: Vec<String> = DIRECT_COLUMNS
            .iter()
            .chain(DERIVED_COLUMNS)
            .map(|c| c.to_string())
            .collect();
        // Partial category group so some selections miss
        columns.extend(["category_Gaming", "category_Music", "category_Lifestyle"].map(String::from));
        columns.extend(Device::ALL.iter().map(|d| d.column()));
        columns.extend(Country::ALL.iter().map(|c| c.column()));
        FeatureSchema::new(columns).unwrap()
    }

    proptest! {
        #[test]
        fn derived_features_hold(metrics in arb_metrics()) {
            let schema = full_schema();
            let vector = encode(&metrics, &schema);
            let likes = metrics.likes as f64;
            let comments = metrics.comments as f64;
            let rate = vector.get(ENGAGEMENT_RATE).unwrap();
            if metrics.views > 0 {
                prop_assert!((rate - (likes + comments) / metrics.views as f64).abs() < 1e-12);
            } else {
                prop_assert_eq!(rate, 0.0);
            }
            prop_assert_eq!(vector.get(INTERACTION).unwrap(), likes + comments);
        }

        #[test]
        fn output_follows_schema(metrics in arb_metrics()) {
            let schema = full_schema();
            let vector = encode(&metrics, &schema);
            prop_assert_eq!(vector.len(), schema.len());
            for (i, (column, value)) in vector.named().enumerate() {
                prop_assert_eq!(column, schema.columns()[i].as_str());
                prop_assert_eq!(value, vector.values[i]);
            }
        }

        #[test]
        fn at_most_one_hot_per_group(metrics in arb_metrics()) {
            let schema = full_schema();
            let vector = encode(&metrics, &schema);
            let selected = metrics.category.column();
            let hot: f64 = vector
                .named()
                .filter(|(c, _)| c.starts_with(Category::PREFIX))
                .map(|(_, v)| v)
                .sum();
            prop_assert!(hot <= 1.0);
            prop_assert_eq!(hot == 1.0, schema.contains(&selected));
            prop_assert_eq!(vector.get("category_Lifestyle"), Some(0.0));
        }

        #[test]
        fn encoding_is_idempotent(metrics in arb_metrics()) {
            let encoder = FeatureEncoder::new(full_schema());
            let first = encoder.encode(&metrics);
            let second = encoder.encode(&metrics);
            prop_assert_eq!(first.values, second.values);
            prop_assert_eq!(first.report, second.report);
        }
    }
}
