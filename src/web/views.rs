//! HTML pages, rendered from templates embedded at compile time.
//!
//! User text is always escaped. Each template is filled in a single pass, so
//! placeholder-like text inside a food name or table cell is never expanded.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::data::DEFAULT_NUTRIENTS;
use crate::state::AppState;

const LAYOUT: &str = include_str!("../../templates/layout.html");
const SEARCH_FORM: &str = include_str!("../../templates/search_form.html");
const INDEX: &str = include_str!("../../templates/index.html");
const FOOD_CONTENT: &str = include_str!("../../templates/food_content.html");
const FOOD_NOT_FOUND: &str = include_str!("../../templates/food_not_found.html");
const GOOD_BYE: &str = include_str!("../../templates/good_bye.html");
const INVALID_ANSWER: &str = include_str!("../../templates/invalid_answer.html");

/// Substitute `{{NAME}}` placeholders in one pass over `template`.
/// Inserted values are never rescanned; unknown placeholders stay as they are.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let found = tail.find("}}").and_then(|end| {
            let key = &tail[2..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (end, *value))
        });
        match found {
            Some((end, value)) => {
                out.push_str(value);
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn page(title: &str, body: &str) -> String {
    fill(LAYOUT, &[("TITLE", title), ("BODY", body)])
}

fn search_form(state: &AppState) -> String {
    let foods: String = state
        .food_names
        .iter()
        .map(|name| format!("      <option value=\"{}\">\n", encode_double_quoted_attribute(name)))
        .collect();
    let nutrients: String = state
        .nutrient_columns
        .iter()
        .map(|name| {
            let selected = if DEFAULT_NUTRIENTS.contains(&name.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                "      <option value=\"{}\"{selected}>{}</option>\n",
                encode_double_quoted_attribute(name),
                encode_text(name)
            )
        })
        .collect();
    fill(
        SEARCH_FORM,
        &[
            ("FOOD_OPTIONS", foods.trim_end()),
            ("NUTRIENT_OPTIONS", nutrients.trim_end()),
        ],
    )
}

/// Search form seeded with every food and nutrient.
pub fn index_page(state: &AppState) -> String {
    let form = search_form(state);
    page("Search", &fill(INDEX, &[("SEARCH_FORM", form.as_str())]))
}

/// Nutrient table for one food, followed by a fresh search form.
pub fn food_content_page(state: &AppState, food: &str, table_html: &str) -> String {
    let food = encode_text(food);
    let form = search_form(state);
    let body = fill(
        FOOD_CONTENT,
        &[
            ("FOOD", &*food),
            ("TABLE", table_html),
            ("SEARCH_FORM", form.as_str()),
        ],
    );
    page("Nutrients", &body)
}

/// Miss page asking whether to try again.
pub fn food_not_found_page(food: &str) -> String {
    let food = encode_text(food);
    page("Not found", &fill(FOOD_NOT_FOUND, &[("FOOD", &*food)]))
}

pub fn good_bye_page() -> String {
    page("Goodbye", GOOD_BYE)
}

pub fn invalid_answer_page() -> String {
    page("Invalid answer", INVALID_ANSWER)
}
