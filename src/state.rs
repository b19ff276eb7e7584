use std::collections::HashSet;

use log::debug;

use crate::data::{Dataset, Projection, DEFAULT_NUTRIENTS};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the web handlers read. Built once after the dataset loads and
/// never mutated, so it is shared behind an `Arc` without locking.
#[derive(Debug)]
pub struct AppState {
    /// The cleaned nutrient table.
    pub dataset: Dataset,

    /// Food names for the search list, in dataset order.
    pub food_names: Vec<String>,

    /// Columns offered in the nutrient picker.
    pub nutrient_columns: Vec<String>,

    known_foods: HashSet<String>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let food_names = dataset.food_names();
        let nutrient_columns = dataset.nutrient_columns();
        let known_foods = food_names.iter().cloned().collect();
        Self {
            dataset,
            food_names,
            nutrient_columns,
            known_foods,
        }
    }

    /// Exact, case-sensitive membership in the food list.
    pub fn is_known_food(&self, food: &str) -> bool {
        self.known_foods.contains(food)
    }

    /// Requested nutrients that are real nutrient columns, in request order.
    /// Falls back to the default nutrients when none survive.
    pub fn nutrient_projection<S: AsRef<str>>(&self, requested: &[S]) -> Projection {
        let valid: Vec<&str> = requested
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| self.nutrient_columns.iter().any(|c| c == n))
            .collect();
        if valid.is_empty() {
            debug!("no valid nutrients requested; using defaults");
            Projection::retain_known(&self.dataset, &DEFAULT_NUTRIENTS)
        } else {
            Projection::retain_known(&self.dataset, &valid)
        }
    }
}
