// tests/source_classifier.rs
use apec_signals::lexicon::Lexicon;
use apec_signals::source::{classify_source, classify_with, SourceType};

#[test]
fn known_feed_names() {
    assert_eq!(
        classify_source("U.S. Embassy – Tokyo Press Releases"),
        SourceType::Embassy
    );
    assert_eq!(classify_source("APEC Newsroom"), SourceType::Official);
    assert_eq!(
        classify_source("Google News – APEC Reforms"),
        SourceType::Aggregator
    );
    assert_eq!(classify_source("Nikkei Asia"), SourceType::Media);
}

#[test]
fn matching_is_case_insensitive() {
    assert_eq!(classify_source("us EMBASSY manila"), SourceType::Embassy);
    assert_eq!(classify_source("apec events calendar"), SourceType::Official);
    assert_eq!(classify_source("GOOGLE NEWS – trade"), SourceType::Aggregator);
}

#[test]
fn serializes_lowercase() {
    let s = serde_json::to_string(&SourceType::Aggregator).unwrap();
    assert_eq!(s, r#""aggregator""#);
    assert_eq!(SourceType::Embassy.to_string(), "embassy");
}

#[test]
fn configured_rules_are_honoured() {
    let mut lex = Lexicon::default();
    lex.source_rules[0].any_contains.push("High Commission".into());
    let lex = lex.normalized();
    assert_eq!(
        classify_with("Australian High Commission", &lex.source_rules),
        SourceType::Embassy
    );
}
