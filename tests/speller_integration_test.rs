use std::io::Write;

use smart_speller::error::SpellerError;
use smart_speller::spelling::{
    CorrectorConfig, FrequencyTable, Speller, damerau_levenshtein_distance, is_pass_through,
};
use tempfile::NamedTempFile;

fn write_corpus(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

fn corpus_speller() -> Speller {
    let corpus = write_corpus(&[
        "the 5000",
        "quick 300",
        "brown 250",
        "fox 200",
        "jumps 150",
        "over 900",
        "lazy 120",
        "dog 400",
        "dogs 100",
        "a 4000",
        "i 3500",
        "j 800",
        "",
        "fix",
    ]);
    Speller::from_file(corpus.path(), CorrectorConfig::default()).unwrap()
}

#[test]
fn test_corpus_loading() {
    let speller = corpus_speller();
    let table = speller.table();

    // "j" is a stray initial; "fix" defaults to frequency 1.
    assert!(!table.contains("j"));
    assert!(table.contains("a"));
    assert!(table.contains("i"));
    assert_eq!(table.frequency("fix"), 1);
    assert_eq!(table.word_count(), 12);
}

#[test]
fn test_initials_kept_when_filter_disabled() {
    let corpus = write_corpus(&["the 10", "j 5"]);
    let config = CorrectorConfig {
        filter_initials: false,
        ..Default::default()
    };
    let speller = Speller::from_file(corpus.path(), config).unwrap();
    assert!(speller.is_correct("j"));
}

#[test]
fn test_missing_and_empty_corpus() {
    let result = Speller::from_file("/nonexistent/words.txt", CorrectorConfig::default());
    assert!(matches!(result, Err(SpellerError::Io(_))));

    let corpus = write_corpus(&["", "   "]);
    let result = Speller::from_file(corpus.path(), CorrectorConfig::default());
    assert!(matches!(result, Err(SpellerError::Corpus(_))));
}

#[test]
fn test_word_correction() {
    let speller = corpus_speller();

    assert_eq!(speller.correct("teh"), "the");
    assert_eq!(speller.correct("qiuck"), "quick");
    assert_eq!(speller.correct("borwn"), "brown");
    assert_eq!(speller.correct("jmups"), "jumps");
    assert_eq!(speller.correct("dog"), "dog");
    assert_eq!(speller.correct("xylophone"), "xylophone");
}

#[test]
fn test_candidates_are_bounded_and_ranked() {
    let speller = corpus_speller();

    for word in ["dgo", "doggs", "fxo", "ovr", "laz"] {
        let set = speller.lookup(word);
        for suggestion in set.iter() {
            assert!(suggestion.distance <= 2);
            assert_eq!(
                suggestion.distance,
                damerau_levenshtein_distance(word, &suggestion.word)
            );
        }
        for pair in set.suggestions().windows(2) {
            assert!(
                pair[0].distance < pair[1].distance
                    || (pair[0].distance == pair[1].distance
                        && pair[0].frequency >= pair[1].frequency)
            );
        }
    }

    let candidates = speller.candidates("doggs");
    assert_eq!(candidates[0], "dogs");
    assert!(candidates.contains(&"dog".to_string()));
}

#[test]
fn test_pass_through_tokens() {
    let speller = corpus_speller();

    for token in ["$5", "42", "£10"] {
        assert!(is_pass_through(token));
        assert_eq!(speller.candidates(token), vec![token.to_string()]);
    }

    let results = speller.process("teh $5 dog");
    assert!(results.iter().all(|r| r.sentence.contains("$5")));
}

#[test]
fn test_process_sentence() {
    let speller = corpus_speller();
    let results = speller.process("teh qiuck borwn fxo");

    assert_eq!(results[0].sentence, "the quick brown fox");

    let total: f64 = results.iter().map(|r| r.probability).sum();
    assert!((total - 1.0).abs() < 1e-9);

    for pair in results.windows(2) {
        assert!(pair[0].probability >= pair[1].probability);
    }

    let mut sentences: Vec<_> = results.iter().map(|r| r.sentence.clone()).collect();
    sentences.sort();
    sentences.dedup();
    assert_eq!(sentences.len(), results.len());
}

#[test]
fn test_expansion_reaches_candidate_count() {
    let table = FrequencyTable::from_entries([
        ("bad", 90),
        ("bed", 80),
        ("bid", 70),
        ("bud", 60),
        ("bod", 50),
        ("bade", 40),
        ("pin", 85),
        ("pan", 75),
        ("pen", 65),
        ("pun", 55),
        ("pon", 45),
        ("pine", 35),
    ]);
    let speller = Speller::new(table).unwrap();

    assert!(speller.lookup("bxd").len() >= 6);
    assert!(speller.lookup("pxn").len() >= 6);

    let candidates = speller.expand("bxd pxn");
    assert!(candidates.len() >= 12);
    assert_eq!(candidates[0], "bad pin");
}

#[test]
fn test_nearest_only_config() {
    let table = FrequencyTable::from_entries([("cat", 10), ("cats", 5), ("bat", 8)]);

    let speller = Speller::new(table.clone()).unwrap();
    assert_eq!(speller.expand("cat"), vec!["cat"]);

    let config = CorrectorConfig {
        nearest_only: false,
        ..Default::default()
    };
    let speller = Speller::with_config(table, config).unwrap();
    assert_eq!(speller.expand("cat"), vec!["cat", "bat", "cats"]);
}

#[test]
fn test_process_keeps_closest_correction_over_frequent_word() {
    let corpus = write_corpus(&[
        "above 50",
        "love 5000",
        "abroad 40",
        "road 3000",
        "absent 30",
        "sent 2000",
    ]);
    let speller = Speller::from_file(corpus.path(), CorrectorConfig::default()).unwrap();

    for (typo, fixed, frequent) in [
        ("aobve", "above", "love"),
        ("arboad", "abroad", "road"),
        ("asbent", "absent", "sent"),
    ] {
        let set = speller.lookup(typo);
        assert_eq!(set.distance_of(fixed), Some(1));
        assert_eq!(set.distance_of(frequent), Some(2));

        let results = speller.process(typo);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sentence, fixed);
    }

    let results = speller.process("aobve asbent");
    assert_eq!(results[0].sentence, "above absent");
}

#[test]
fn test_speller_shared_across_threads() {
    let speller = corpus_speller();

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["teh", "dgo", "fxo"]
            .into_iter()
            .map(|word| scope.spawn(|| speller.correct(word)))
            .collect();
        let corrected: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(corrected, vec!["the", "dog", "fox"]);
    });
}

#[test]
fn test_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"max_distance": 1, "nearest_only": false}}"#).unwrap();
    file.flush().unwrap();

    let config = CorrectorConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.max_distance, 1);
    assert!(!config.nearest_only);
    assert_eq!(config.max_candidates, 12);

    let mut bad = NamedTempFile::new().unwrap();
    write!(bad, "not json").unwrap();
    bad.flush().unwrap();
    assert!(matches!(
        CorrectorConfig::from_json_file(bad.path()),
        Err(SpellerError::Json(_))
    ));
}
