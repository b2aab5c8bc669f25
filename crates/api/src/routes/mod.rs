//! Route handlers

pub mod form;
pub mod predict;
pub mod schema;
