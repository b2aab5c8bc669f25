//! Feature Engineering Engine
//!
//! Maps submitted video metrics onto the ordered feature row of a trained
//! revenue model. The column list comes from the model artifact; nothing
//! about it is hard-coded here.

mod derived;
mod encoder;
mod features;
mod schema;

pub use derived::{engagement_rate, interaction};
pub use encoder::{
    encode, is_one_hot_column, Coverage, FeatureEncoder, DERIVED_COLUMNS, DIRECT_COLUMNS,
    ENGAGEMENT_RATE, INTERACTION,
};
pub use features::{EncodingReport, FeatureMap, FeatureVector};
pub use schema::{FeatureSchema, SchemaError};
