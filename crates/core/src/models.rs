//! Shared data models and wire types for the two collaborator endpoints

use serde::{Deserialize, Deserializer, Serialize};

/// Default requested quantity in grams
pub const DEFAULT_GRAMS: u32 = 100;

/// Nutrition facts returned by the lookup service for one food at one quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NutritionData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub food_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nf_calories: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nf_protein: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nf_total_fat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nf_total_carbohydrate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serving_qty: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serving_unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub serving_weight_grams: f64,
}

impl NutritionData {
    pub fn calories_display(&self) -> String {
        format!("{} kcal", display_number(self.nf_calories))
    }

    pub fn protein_display(&self) -> String {
        format!("{} g", display_number(self.nf_protein))
    }

    pub fn fat_display(&self) -> String {
        format!("{} g", display_number(self.nf_total_fat))
    }

    pub fn carbohydrate_display(&self) -> String {
        format!("{} g", display_number(self.nf_total_carbohydrate))
    }

    /// e.g. "1 medium (182 g)", or "—" when the service sent no serving info
    pub fn serving_display(&self) -> String {
        if self.serving_unit.is_empty() && self.serving_qty == 0.0 {
            return "—".to_string();
        }
        let mut text = format!("{} {}", display_number(self.serving_qty), self.serving_unit);
        if self.serving_weight_grams > 0.0 {
            text.push_str(&format!(" ({} g)", display_number(self.serving_weight_grams)));
        }
        text.trim().to_string()
    }
}

/// Missing, null and non-finite values all show as 0
fn display_number(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        "0".to_string()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body sent to the classification service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest<'a> {
    pub image_base64: &'a str,
}

/// Body returned by the classification service
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyResponse {
    pub label: String,
}

/// Body sent to the nutrition lookup service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRequest<'a> {
    pub food_name: &'a str,
    pub grams: u32,
}

/// Body returned by the nutrition lookup service
#[derive(Debug, Clone, Deserialize)]
pub struct NutritionResponse {
    pub nutrition: NutritionData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_bodies_use_camel_case() {
        let classify = serde_json::to_value(ClassifyRequest { image_base64: "data:image/png;base64,AA==" }).unwrap();
        assert_eq!(classify, json!({ "imageBase64": "data:image/png;base64,AA==" }));

        let lookup = serde_json::to_value(NutritionRequest { food_name: "apple", grams: 150 }).unwrap();
        assert_eq!(lookup, json!({ "foodName": "apple", "grams": 150 }));
    }

    #[test]
    fn nutrition_with_nulls_and_gaps_reads_as_zero() {
        let data: NutritionData = serde_json::from_value(json!({
            "food_name": "mystery",
            "nf_calories": null,
            "nf_protein": 1.5,
            "serving_unit": null
        }))
        .unwrap();

        assert_eq!(data.food_name, "mystery");
        assert_eq!(data.nf_calories, 0.0);
        assert_eq!(data.nf_protein, 1.5);
        assert_eq!(data.nf_total_fat, 0.0);
        assert_eq!(data.serving_unit, "");
        assert_eq!(data.calories_display(), "0 kcal");
        assert_eq!(data.serving_display(), "—");
    }

    #[test]
    fn display_strings_drop_trailing_zero_fraction() {
        let data = NutritionData {
            food_name: "apple".to_string(),
            nf_calories: 52.0,
            nf_protein: 0.3,
            nf_total_fat: 0.2,
            nf_total_carbohydrate: 13.81,
            serving_qty: 1.0,
            serving_unit: "medium".to_string(),
            serving_weight_grams: 182.0,
        };

        assert_eq!(data.calories_display(), "52 kcal");
        assert_eq!(data.protein_display(), "0.3 g");
        assert_eq!(data.fat_display(), "0.2 g");
        assert_eq!(data.carbohydrate_display(), "13.81 g");
        assert_eq!(data.serving_display(), "1 medium (182 g)");
    }
}
