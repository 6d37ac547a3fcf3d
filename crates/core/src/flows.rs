//! The image-analyze and manual-search flows.
//!
//! Each flow runs to completion on whatever thread calls it and reports
//! back over a channel. Exactly one terminal event (`*Done` or `*Failed`)
//! is sent per run, even if the service panics.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;

use crate::error::{AnalyzerError, Result};
use crate::models::NutritionData;
use crate::service::NutritionService;

/// Shown when an image-analyze failure carries no message
pub const UNEXPECTED_ERROR: &str = "Unexpected error";
/// Shown when a manual-search failure carries no message
pub const FOOD_NOT_FOUND: &str = "Food not found";

#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// Classification succeeded; nutrition lookup is next
    AnalyzeClassified { label: String },
    AnalyzeDone { nutrition: NutritionData },
    AnalyzeFailed(String),
    SearchDone { nutrition: NutritionData },
    SearchFailed(String),
}

impl FlowEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlowEvent::AnalyzeClassified { .. })
    }
}

/// Inputs captured when the user starts an image analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeJob {
    pub image: String,
    pub grams: u32,
}

/// Inputs captured when the user starts a manual search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchJob {
    pub food_name: String,
    pub grams: u32,
}

/// Classify the image, then look up nutrition for the returned label
pub fn run_image_analyze(service: &dyn NutritionService, job: AnalyzeJob, tx: &Sender<FlowEvent>) {
    let outcome = guarded(|| {
        let label = service.classify_image(&job.image)?;
        tracing::info!("Image classified as {:?}", label);
        let _ = tx.send(FlowEvent::AnalyzeClassified { label: label.clone() });
        service.lookup_nutrition(&label, job.grams)
    });

    let event = match outcome {
        Ok(nutrition) => FlowEvent::AnalyzeDone { nutrition },
        Err(e) => {
            tracing::warn!("Image analysis failed: {:?}", e);
            FlowEvent::AnalyzeFailed(e.message().unwrap_or_else(|| UNEXPECTED_ERROR.to_string()))
        }
    };
    let _ = tx.send(event);
}

/// Look up nutrition for the typed food name
pub fn run_food_search(service: &dyn NutritionService, job: SearchJob, tx: &Sender<FlowEvent>) {
    let outcome = guarded(|| service.lookup_nutrition(&job.food_name, job.grams));

    let event = match outcome {
        Ok(nutrition) => FlowEvent::SearchDone { nutrition },
        Err(e) => {
            tracing::warn!("Food search for {:?} failed: {:?}", job.food_name, e);
            FlowEvent::SearchFailed(e.message().unwrap_or_else(|| FOOD_NOT_FOUND.to_string()))
        }
    };
    let _ = tx.send(event);
}

/// Run `work`, turning a panic into a message-less error
fn guarded<T>(work: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|_| Err(AnalyzerError::Unrecognized))
}
