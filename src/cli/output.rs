//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TagbayesArgs};
use crate::error::Result;

/// One tag and its score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagScore {
    pub tag: String,
    pub score: f64,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub combiner: String,
    pub tokens: usize,
    pub scores: Vec<TagScore>,
}

/// Result structure for commands that change the model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelUpdateResult {
    pub model: String,
    pub action: String,
    pub tags: usize,
}

/// Tag listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagList {
    pub tags: Vec<String>,
}

/// Statistics of a single tag.
#[derive(Debug, Serialize, Deserialize)]
pub struct TagInfo {
    pub tag: String,
    pub train_count: i64,
    pub token_count: i64,
    pub distinct_tokens: usize,
    pub top_tokens: Vec<TokenWeight>,
}

/// A token and its accumulated count within a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenWeight {
    pub token: String,
    pub count: f64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &TagbayesArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &TagbayesArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("ClassificationResult") => {
            output_classification_human(&value)
        }
        _ if std::any::type_name::<T>().contains("TagList") => output_tag_list_human(&value),
        _ if std::any::type_name::<T>().contains("TagInfo") => output_tag_info_human(&value),
        _ => output_generic_human(&value),
    }
}

/// Output classification scores in human format.
fn output_classification_human(value: &serde_json::Value) -> Result<()> {
    let Some(scores) = value.get("scores").and_then(|s| s.as_array()) else {
        return Ok(());
    };

    if scores.is_empty() {
        println!("No tags to score.");
        return Ok(());
    }

    let width = scores
        .iter()
        .filter_map(|s| s.get("tag").and_then(|t| t.as_str()))
        .map(|t| t.chars().count())
        .max()
        .unwrap_or(0);

    for score in scores {
        let tag = score.get("tag").and_then(|t| t.as_str()).unwrap_or("");
        // NaN serializes as null
        match score.get("score").and_then(|s| s.as_f64()) {
            Some(s) => println!("{tag:<width$}  {s:.6}"),
            None => println!("{tag:<width$}  NaN"),
        }
    }
    Ok(())
}

/// Output a tag listing in human format.
fn output_tag_list_human(value: &serde_json::Value) -> Result<()> {
    if let Some(tags) = value.get("tags").and_then(|t| t.as_array()) {
        for tag in tags {
            if let Some(tag) = tag.as_str() {
                println!("{tag}");
            }
        }
    }
    Ok(())
}

/// Output tag statistics in human format.
fn output_tag_info_human(value: &serde_json::Value) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return Ok(());
    };

    if let Some(tag) = obj.get("tag").and_then(|t| t.as_str()) {
        println!("Tag: {tag}");
        println!("────");
    }
    if let Some(n) = obj.get("train_count").and_then(|n| n.as_i64()) {
        println!("Trainings: {n}");
    }
    if let Some(n) = obj.get("token_count").and_then(|n| n.as_i64()) {
        println!("Tokens: {n}");
    }
    if let Some(n) = obj.get("distinct_tokens").and_then(|n| n.as_u64()) {
        println!("Distinct tokens: {n}");
    }

    if let Some(top) = obj.get("top_tokens").and_then(|t| t.as_array())
        && !top.is_empty()
    {
        println!();
        println!("Top tokens:");
        for entry in top {
            let token = entry.get("token").and_then(|t| t.as_str()).unwrap_or("");
            let count = entry.get("count").and_then(|c| c.as_f64()).unwrap_or(0.0);
            println!("  {token} ({})", format_count(count));
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TagbayesArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Array(arr) => format!("[{} items]", arr.len()),
        serde_json::Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

/// Counts are whole numbers unless merged or hand-edited.
fn format_count(count: f64) -> String {
    if count.fract() == 0.0 {
        format!("{count:.0}")
    } else {
        format!("{count:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&serde_json::json!("spam")), "spam");
        assert_eq!(format_value(&serde_json::json!(3)), "3");
        assert_eq!(format_value(&serde_json::json!([1, 2])), "[2 items]");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(4.0), "4");
        assert_eq!(format_count(0.5), "0.500");
    }

    #[test]
    fn test_classification_result_serializes_nan_as_null() {
        let result = ClassificationResult {
            combiner: "robinson".to_string(),
            tokens: 0,
            scores: vec![TagScore {
                tag: "spam".to_string(),
                score: f64::NAN,
            }],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["scores"][0]["score"].is_null());
    }
}
