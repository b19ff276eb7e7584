//! Look up USDA FNDDS nutrient values for a food, from a terminal prompt or
//! a small web form.
//!
//! The dataset is downloaded and cleaned once with [`data::load_clean`], then
//! queried read-only with [`data::get_nutrients`] or [`data::Dataset::select`].

pub mod cli;
pub mod config;
pub mod data;
pub mod render;
pub mod state;
pub mod web;
