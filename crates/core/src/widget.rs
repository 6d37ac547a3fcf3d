//! Widget state: everything the analyzer shows, and how flow events change it

use crate::flows::{AnalyzeJob, FlowEvent, SearchJob};
use crate::grams::parse_grams_input;
use crate::models::{NutritionData, DEFAULT_GRAMS};

#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Selected photo as a `data:` URL
    pub image: Option<String>,
    /// Label returned by the last successful classification
    pub detected_food: String,
    /// Manual search text, bound directly to the search field
    pub food_search: String,
    /// Last successful lookup from either flow
    pub nutrition: Option<NutritionData>,
    grams: u32,
    grams_text: String,
    analyzing: bool,
    searching: bool,
    error: Option<String>,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            image: None,
            detected_food: String::new(),
            food_search: String::new(),
            nutrition: None,
            grams: DEFAULT_GRAMS,
            grams_text: DEFAULT_GRAMS.to_string(),
            analyzing: false,
            searching: false,
            error: None,
        }
    }
}

impl WidgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity sent with the next lookup
    pub fn grams(&self) -> u32 {
        self.grams
    }

    /// What the grams field shows
    pub fn grams_text(&self) -> &str {
        &self.grams_text
    }

    /// Apply an edit to the grams field. Invalid edits leave both the
    /// stored value and the field text untouched.
    pub fn edit_grams(&mut self, text: &str) -> bool {
        match parse_grams_input(text) {
            Some(value) => {
                self.grams = value;
                self.grams_text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn is_busy(&self) -> bool {
        self.analyzing || self.searching
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Surface an error that happened outside a flow (e.g. a file read)
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn select_image(&mut self, data_url: String) {
        self.image = Some(data_url);
    }

    /// Drops the photo only; a displayed result stays
    pub fn remove_image(&mut self) {
        self.image = None;
    }

    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.analyzing
    }

    /// Mark an image analysis as started and capture its inputs.
    /// Returns `None` if there is no image or one is already running.
    pub fn begin_analyze(&mut self) -> Option<AnalyzeJob> {
        if !self.can_analyze() {
            return None;
        }
        let image = self.image.clone()?;
        self.analyzing = true;
        self.error = None;
        Some(AnalyzeJob { image, grams: self.grams })
    }

    /// Mark a manual search as started and capture its inputs.
    /// Returns `None` while a search is already running.
    pub fn begin_search(&mut self) -> Option<SearchJob> {
        if self.searching {
            return None;
        }
        self.searching = true;
        self.error = None;
        Some(SearchJob {
            food_name: self.food_search.clone(),
            grams: self.grams,
        })
    }

    /// Fold one flow event into the state. Terminal events always clear
    /// their flow's busy flag; failures never touch `nutrition`.
    pub fn apply(&mut self, event: FlowEvent) {
        match event {
            FlowEvent::AnalyzeClassified { label } => {
                self.detected_food = label;
            }
            FlowEvent::AnalyzeDone { nutrition } => {
                self.nutrition = Some(nutrition);
                self.analyzing = false;
            }
            FlowEvent::AnalyzeFailed(message) => {
                self.error = Some(message);
                self.analyzing = false;
            }
            FlowEvent::SearchDone { nutrition } => {
                self.nutrition = Some(nutrition);
                self.searching = false;
            }
            FlowEvent::SearchFailed(message) => {
                self.error = Some(message);
                self.searching = false;
            }
        }
    }
}
