//! CLI command handlers.

pub mod config;
pub mod eval;
pub mod history;
pub mod request;
pub mod theme;
pub mod upload;

use anyhow::{Result, bail};
use evalbox_core::api::{Outcome, QueryParams, QueryValue};

/// Parses repeated `KEY=VALUE` arguments. Keys given more than once
/// collect their values into a list, in order.
pub fn parse_query(pairs: &[String]) -> Result<QueryParams> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("Invalid query parameter '{pair}': expected KEY=VALUE");
        };
        match grouped.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => grouped.push((key.to_string(), vec![value.to_string()])),
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                QueryValue::Scalar(values.remove(0))
            } else {
                QueryValue::List(values)
            };
            (key, value)
        })
        .collect())
}

/// Prints a successful body to stdout; turns an error into a failed exit.
pub fn print_outcome(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Success(body) => {
            if let Some(body) = body.filter(|b| !b.is_empty()) {
                println!("{body}");
            }
            Ok(())
        }
        Outcome::Error(message) => bail!("Request failed: {message}"),
    }
}
