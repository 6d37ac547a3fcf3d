//! The seam between the widget flows and the two backend collaborators

use crate::error::Result;
use crate::models::NutritionData;

/// Image classification and nutrition lookup, as seen by the flows.
///
/// Implementations block; flows run them off the UI thread.
pub trait NutritionService: Send + Sync {
    /// Map an encoded image (a `data:` URL) to a food label
    fn classify_image(&self, image_data_url: &str) -> Result<String>;

    /// Nutrition facts for `food_name` scaled to `grams`
    fn lookup_nutrition(&self, food_name: &str, grams: u32) -> Result<NutritionData>;
}
