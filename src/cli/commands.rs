//! Command implementations for the smart-speller CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SpellerError};
use crate::spelling::*;

/// Execute a CLI command.
pub fn execute_command(args: SpellerArgs) -> Result<()> {
    let speller = init_global(load_speller(&args)?)?;

    match &args.command {
        Command::Correct(correct_args) => correct_words(correct_args.clone(), speller, &args),
        Command::Candidates(candidates_args) => {
            list_candidates(candidates_args.clone(), speller, &args)
        }
        Command::Process(process_args) => process_sentences(process_args.clone(), speller, &args),
        Command::Stats => show_stats(speller, &args),
        Command::Interactive(interactive_args) => {
            run_interactive(interactive_args.clone(), speller, &args)
        }
    }
}

/// Build the speller from the configured corpus and configuration file.
fn load_speller(args: &SpellerArgs) -> Result<Speller> {
    let start_time = Instant::now();

    let config = match &args.config {
        Some(path) => CorrectorConfig::from_json_file(path)?,
        None => CorrectorConfig::default(),
    };

    let speller = match &args.dictionary {
        Some(path) => {
            info!("Loading dictionary from {}", path.display());
            Speller::from_file(path, config)?
        }
        None => Speller::builtin_with_config(config)?,
    };

    info!("Speller loaded in {:?}", start_time.elapsed());
    Ok(speller)
}

/// Correct individual words.
fn correct_words(args: CorrectArgs, speller: &Speller, cli_args: &SpellerArgs) -> Result<()> {
    let corrections = args
        .words
        .iter()
        .map(|word| {
            let correction = speller.correct(word);
            WordCorrection {
                changed: correction != word.to_lowercase(),
                word: word.clone(),
                correction,
            }
        })
        .collect();

    output_result(
        "Corrections",
        &CorrectionResults { corrections },
        cli_args,
    )
}

/// List ranked suggestions for a word.
fn list_candidates(args: CandidatesArgs, speller: &Speller, cli_args: &SpellerArgs) -> Result<()> {
    let max_distance = args.max_distance.unwrap_or(speller.config().max_distance);
    let mut suggestions = speller
        .lookup_within(&args.word, max_distance)
        .into_suggestions();
    if let Some(limit) = args.limit {
        suggestions.truncate(limit);
    }

    output_result(
        "Suggestions",
        &CandidateResults {
            word: args.word,
            max_distance,
            suggestions,
        },
        cli_args,
    )
}

/// Rank corrected versions of one sentence or of every line in a file.
fn process_sentences(args: ProcessArgs, speller: &Speller, cli_args: &SpellerArgs) -> Result<()> {
    let inputs = match (&args.sentence, &args.input) {
        (_, Some(path)) => read_sentences(path)?,
        (Some(sentence), None) => vec![sentence.clone()],
        (None, None) => {
            return Err(SpellerError::invalid_argument(
                "either a sentence or --input is required",
            ));
        }
    };

    let start_time = Instant::now();
    let sentences: Vec<SentenceResults> = inputs
        .into_par_iter()
        .map(|input| {
            let mut candidates = speller.process(&input);
            candidates.truncate(args.top);
            SentenceResults { input, candidates }
        })
        .collect();

    output_result(
        "Ranked sentences",
        &ProcessResults {
            sentences,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Read non-empty lines of a file as sentences.
fn read_sentences(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
    }
    Ok(sentences)
}

/// Show dictionary and index statistics.
fn show_stats(speller: &Speller, cli_args: &SpellerArgs) -> Result<()> {
    output_result("Speller statistics", &speller.stats(), cli_args)
}

/// Correct sentences read from stdin until EOF or the stop word.
fn run_interactive(args: InteractiveArgs, speller: &Speller, cli_args: &SpellerArgs) -> Result<()> {
    let prompt = matches!(cli_args.output_format, OutputFormat::Human) && cli_args.verbosity() > 0;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if prompt {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let sentence = line.trim();
        if is_stop_word(sentence, &args.stop_word) {
            break;
        }
        if sentence.is_empty() {
            continue;
        }

        let start_time = Instant::now();
        let mut candidates = speller.process(sentence);
        candidates.truncate(args.top);

        output_result(
            "Ranked sentences",
            &ProcessResults {
                sentences: vec![SentenceResults {
                    input: sentence.to_string(),
                    candidates,
                }],
                duration_ms: start_time.elapsed().as_millis() as u64,
            },
            cli_args,
        )?;
    }

    Ok(())
}

/// Check if an input line ends the interactive session. Case is ignored.
fn is_stop_word(line: &str, stop_word: &str) -> bool {
    line.trim().to_lowercase() == stop_word.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_sentences_skips_blank_lines() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "teh cat").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "  sat on teh mat  ").unwrap();
        temp_file.flush().unwrap();

        let sentences = read_sentences(temp_file.path()).unwrap();
        assert_eq!(sentences, vec!["teh cat", "sat on teh mat"]);
    }

    #[test]
    fn test_stop_word_ignores_case() {
        assert!(is_stop_word("xxx", "xxx"));
        assert!(is_stop_word("XXX", "xxx"));
        assert!(is_stop_word("  Xxx ", "xxx"));
        assert!(is_stop_word("quit", "QUIT"));
        assert!(!is_stop_word("xxxx", "xxx"));
        assert!(!is_stop_word("teh xxx", "xxx"));
    }

    #[test]
    fn test_load_speller_from_dictionary_and_config() {
        let mut corpus = NamedTempFile::new().unwrap();
        writeln!(corpus, "the 100").unwrap();
        writeln!(corpus, "cat 50").unwrap();
        corpus.flush().unwrap();

        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"max_distance": 1, "max_candidates": 4}}"#).unwrap();
        config.flush().unwrap();

        let args = SpellerArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Json,
            pretty: false,
            dictionary: Some(corpus.path().to_path_buf()),
            config: Some(config.path().to_path_buf()),
            command: Command::Stats,
        };

        let speller = load_speller(&args).unwrap();
        assert_eq!(speller.config().max_distance, 1);
        assert_eq!(speller.config().max_candidates, 4);
        assert_eq!(speller.stats().dictionary_words, 2);
        assert_eq!(speller.correct("teh"), "the");
    }

    #[test]
    fn test_load_speller_rejects_bad_config() {
        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"max_distance": 9}}"#).unwrap();
        config.flush().unwrap();

        let args = SpellerArgs {
            verbose: 0,
            quiet: true,
            output_format: OutputFormat::Human,
            pretty: false,
            dictionary: None,
            config: Some(config.path().to_path_buf()),
            command: Command::Stats,
        };

        assert!(matches!(load_speller(&args), Err(SpellerError::Config(_))));
    }
}
