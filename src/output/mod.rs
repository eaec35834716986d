//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json_list(self, false)?),
        }
    }
}

/// Rows of a listing that may have stopped at `--limit`
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub truncated: bool,
}

impl<T: Tabled + Serialize> Formattable for Listing<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => {
                let mut out = table::format_table(&self.items);
                if self.truncated {
                    out.push_str(&format!(
                        "\nShowing the first {} results. Use --limit or --all for more.",
                        self.items.len()
                    ));
                }
                Ok(out)
            }
            OutputFormat::Json => Ok(json::format_json_list(&self.items, self.truncated)?),
        }
    }
}

/// Print one API object: its detail rows as a table, or the full model as JSON.
pub fn print_item<M: Serialize>(
    model: &M,
    details: &[(&str, String)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table::format_details(details)),
        OutputFormat::Json => println!("{}", json::format_json(model)?),
    }
    Ok(())
}
