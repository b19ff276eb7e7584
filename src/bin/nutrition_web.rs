use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use nutrition_lookup::config::Config;
use nutrition_lookup::data::load_clean_from;
use nutrition_lookup::state::AppState;
use nutrition_lookup::web;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;

    // The blocking download must finish before the async runtime exists.
    let dataset = load_clean_from(&config.dataset_url).context("loading the food database")?;
    let state = Arc::new(AppState::new(dataset));
    info!(
        "{} foods, {} nutrient columns",
        state.food_names.len(),
        state.nutrient_columns.len()
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?
        .block_on(web::serve(state, config.bind_addr()))
}
