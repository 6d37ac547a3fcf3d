//! Core shared types and logic for the Food Nutrition Analyzer
//!
//! This crate contains:
//! - Nutrition models and the collaborator wire types
//! - Error types
//! - Photo to `data:` URL conversion and gram validation
//! - The `NutritionService` seam, the two flows, and the widget state

pub mod data_url;
pub mod error;
pub mod flows;
pub mod grams;
pub mod models;
pub mod service;
pub mod widget;

pub use data_url::*;
pub use error::*;
pub use flows::*;
pub use grams::*;
pub use models::*;
pub use service::*;
pub use widget::*;
