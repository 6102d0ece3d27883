//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpellerArgs};
use crate::error::Result;
use crate::spelling::{SentenceProbability, Suggestion};

/// Correction of a single word.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordCorrection {
    pub word: String,
    pub correction: String,
    pub changed: bool,
}

/// Result structure for word corrections.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResults {
    pub corrections: Vec<WordCorrection>,
}

/// Result structure for suggestion listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateResults {
    pub word: String,
    pub max_distance: usize,
    pub suggestions: Vec<Suggestion>,
}

/// Ranked candidates for one input sentence.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceResults {
    pub input: String,
    pub candidates: Vec<SentenceProbability>,
}

/// Result structure for sentence processing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResults {
    pub sentences: Vec<SentenceResults>,
    pub duration_ms: u64,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SpellerArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SpellerArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("CorrectionResults") => {
            output_corrections_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("CandidateResults") => {
            output_candidates_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("ProcessResults") => {
            output_process_human(&value, args)
        }
        _ => output_generic_human(&value, args),
    }
}

/// Output word corrections in human format.
fn output_corrections_human(value: &serde_json::Value, _args: &SpellerArgs) -> Result<()> {
    if let Some(corrections) = value.get("corrections").and_then(|c| c.as_array()) {
        for correction in corrections {
            let word = correction.get("word").map(format_value).unwrap_or_default();
            let corrected = correction
                .get("correction")
                .map(format_value)
                .unwrap_or_default();
            if word == corrected {
                println!("{word}");
            } else {
                println!("{word} -> {corrected}");
            }
        }
    }
    Ok(())
}

/// Output a suggestion listing in human format.
fn output_candidates_human(value: &serde_json::Value, args: &SpellerArgs) -> Result<()> {
    if args.verbosity() > 0 {
        let word = value.get("word").map(format_value).unwrap_or_default();
        let max_distance = value.get("max_distance").map(format_value).unwrap_or_default();
        println!("Suggestions for '{word}' (max distance {max_distance}):");
    }

    if let Some(suggestions) = value.get("suggestions").and_then(|s| s.as_array()) {
        for (i, suggestion) in suggestions.iter().enumerate() {
            let word = suggestion.get("word").map(format_value).unwrap_or_default();
            let distance = suggestion.get("distance").map(format_value).unwrap_or_default();
            let frequency = suggestion
                .get("frequency")
                .map(format_value)
                .unwrap_or_default();
            println!(
                "{:>3}. {} (distance: {}, frequency: {})",
                i + 1,
                word,
                distance,
                frequency
            );
        }
    }
    Ok(())
}

/// Output ranked sentences in human format.
fn output_process_human(value: &serde_json::Value, args: &SpellerArgs) -> Result<()> {
    let Some(sentences) = value.get("sentences").and_then(|s| s.as_array()) else {
        return Ok(());
    };

    for (i, sentence) in sentences.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let input = sentence.get("input").map(format_value).unwrap_or_default();
        println!("{input}");

        if let Some(candidates) = sentence.get("candidates").and_then(|c| c.as_array()) {
            for candidate in candidates {
                let text = candidate.get("sentence").map(format_value).unwrap_or_default();
                let probability = candidate
                    .get("probability")
                    .and_then(|p| p.as_f64())
                    .unwrap_or(0.0);
                println!("  {}  {}", format_probability(probability), text);
            }
        }
    }

    if args.verbosity() > 1
        && let Some(duration) = value.get("duration_ms")
    {
        println!();
        println!("Processed in {} ms", format_value(duration));
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &SpellerArgs) -> Result<()> {
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
fn output_json<T: Serialize>(result: &T, args: &SpellerArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format a probability as a fixed-width percentage.
fn format_probability(probability: f64) -> String {
    format!("{:>6.2}%", probability * 100.0)
}
