use std::io;

use anyhow::{Context, Result};
use nutrition_lookup::cli::Session;
use nutrition_lookup::config::Config;
use nutrition_lookup::data::load_clean_from;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;

    println!("\nWelcome to the Nutrition CLI!");
    println!("\nLoading food database, please wait...");
    let dataset = load_clean_from(&config.dataset_url).context("loading the food database")?;

    Session::new(&dataset, io::stdin().lock(), io::stdout().lock()).run()
}
