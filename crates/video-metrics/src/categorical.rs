//! Categorical Form Options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Label did not match any option of the field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} '{value}', expected one of: {expected}")]
pub struct ParseCategoricalError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// A categorical field that expands into one-hot indicator columns.
///
/// The candidate column for a selected value is `PREFIX` followed by the
/// option label, e.g. `category_Gaming`.
pub trait OneHot: Copy + Sized + 'static {
    /// Field name as shown on the form
    const FIELD: &'static str;
    /// Column prefix of the one-hot group
    const PREFIX: &'static str;
    /// Every option in dropdown order
    const ALL: &'static [Self];

    /// Display label of the option
    fn label(&self) -> &'static str;

    /// Column name this option maps to in a feature schema
    fn column(&self) -> String {
        format!("{}{}", Self::PREFIX, self.label())
    }

    /// Labels of every option in dropdown order
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|o| o.label()).collect()
    }

    /// Parse an exact label
    fn parse_label(value: &str) -> Result<Self, ParseCategoricalError> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.label() == value)
            .ok_or_else(|| ParseCategoricalError {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::labels().join(", "),
            })
    }
}

/// Video category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Education,
    Gaming,
    Entertainment,
    Music,
    Tech,
}

impl OneHot for Category {
    const FIELD: &'static str = "category";
    const PREFIX: &'static str = "category_";
    const ALL: &'static [Self] = &[
        Category::Education,
        Category::Gaming,
        Category::Entertainment,
        Category::Music,
        Category::Tech,
    ];

    fn label(&self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Gaming => "Gaming",
            Category::Entertainment => "Entertainment",
            Category::Music => "Music",
            Category::Tech => "Tech",
        }
    }
}

/// Device with the largest share of views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Mobile,
    #[serde(rename = "TV")]
    Tv,
    Tablet,
}

impl OneHot for Device {
    const FIELD: &'static str = "device";
    const PREFIX: &'static str = "device_";
    const ALL: &'static [Self] = &[Device::Mobile, Device::Tv, Device::Tablet];

    fn label(&self) -> &'static str {
        match self {
            Device::Mobile => "Mobile",
            Device::Tv => "TV",
            Device::Tablet => "Tablet",
        }
    }
}

/// Country with the largest share of views (ISO-style code)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "CA")]
    Ca,
    #[serde(rename = "DE")]
    De,
}

impl OneHot for Country {
    const FIELD: &'static str = "country";
    const PREFIX: &'static str = "country_";
    const ALL: &'static [Self] = &[Country::In, Country::Us, Country::Uk, Country::Ca, Country::De];

    fn label(&self) -> &'static str {
        match self {
            Country::In => "IN",
            Country::Us => "US",
            Country::Uk => "UK",
            Country::Ca => "CA",
            Country::De => "DE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

impl FromStr for Device {
    type Err = ParseCategoricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

impl FromStr for Country {
    type Err = ParseCategoricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}
