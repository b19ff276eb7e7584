use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::data::completion::suggest;
use crate::data::{Dataset, Projection, DEFAULT_NUTRIENTS};
use crate::render::to_text_table;

/// How many completions to show after a miss.
const MAX_SUGGESTIONS: usize = 10;

// ---------------------------------------------------------------------------
// Interactive lookup session
// ---------------------------------------------------------------------------

/// Prompt loop over any line source and sink, so tests can script it.
pub struct Session<'a, R, W> {
    dataset: &'a Dataset,
    food_names: Vec<String>,
    projection: Projection,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(dataset: &'a Dataset, input: R, output: W) -> Self {
        let projection = Projection::retain_known(dataset, &DEFAULT_NUTRIENTS);
        for name in DEFAULT_NUTRIENTS {
            if dataset.column_index(name).is_none() {
                warn!("default nutrient '{name}' not in dataset; it will not be shown");
            }
        }
        Self {
            dataset,
            food_names: dataset.food_names(),
            projection,
            input,
            output,
        }
    }

    /// Run until the user declines to continue or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(
                self.output,
                "\nTip: Start typing a food name and press ENTER. \
                 If the name is not found, close matches are listed."
            )?;
            let Some(line) = self.prompt("\nPlease enter a food name: ")? else {
                break;
            };
            let food = line.trim();
            debug!("lookup '{food}'");

            if self.food_names.iter().any(|name| name == food) {
                writeln!(self.output, "\nOk! Here are the nutrient details about {food} :\n")?;
                self.display_nutrients(food)?;
            } else {
                writeln!(self.output, "\nSorry, this food name is not in the database.")?;
                self.display_suggestions(food)?;
            }

            if !self.try_again()? {
                break;
            }
        }
        writeln!(self.output, "\nGoodbye!")?;
        Ok(())
    }

    fn display_nutrients(&mut self, food: &str) -> Result<()> {
        let result = self.dataset.select(food, &self.projection)?;
        let table = to_text_table(&result).context("rendering nutrient table")?;
        writeln!(self.output, "{table}")?;
        Ok(())
    }

    fn display_suggestions(&mut self, food: &str) -> Result<()> {
        let matches = suggest(&self.food_names, food, MAX_SUGGESTIONS);
        if matches.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "\nDid you mean:")?;
        for name in matches {
            writeln!(self.output, "  {name}")?;
        }
        Ok(())
    }

    /// Anything but "yes" or "no" counts as "no".
    fn try_again(&mut self) -> Result<bool> {
        let Some(answer) = self.prompt("\nDo you want to try again? (yes/no): ")? else {
            return Ok(false);
        };
        match answer.trim().to_lowercase().as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => {
                writeln!(self.output, "\nSorry, that was not the answer I expected.")?;
                Ok(false)
            }
        }
    }

    /// `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("reading input")?;
        Ok((read > 0).then_some(line))
    }
}
