// tests/tag_extractor.rs
use anyhow::Result;
use apec_signals::lexicon::Lexicon;
use apec_signals::nlp::{Entity, EntityExtractor, EntityLabel, PolarityScorer};
use apec_signals::tags::{Alignment, Sentiment, TagExtractor, Workstreams, UNCATEGORIZED};
use std::sync::Mutex;

/// Records the text it was called with; returns one PERSON entity.
struct RecordingNer {
    seen: Mutex<Vec<String>>,
}

impl EntityExtractor for RecordingNer {
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(vec![Entity::new("Katherine Tai", EntityLabel::Person)])
    }
}

struct FixedPolarity(f32);

impl PolarityScorer for FixedPolarity {
    fn polarity(&self, _text: &str) -> Result<f32> {
        Ok(self.0)
    }
}

fn ner() -> RecordingNer {
    RecordingNer {
        seen: Mutex::new(Vec::new()),
    }
}

#[test]
fn multiple_workstreams_match() {
    let lex = Lexicon::default().normalized();
    let (n, p) = (ner(), FixedPolarity(0.0));
    let x = TagExtractor::new(&lex, &n, &p);
    let tags = x
        .extract(
            "Digital Trade rules on the table",
            "Economies also weigh Cybersecurity cooperation",
        )
        .unwrap();
    assert!(tags.workstreams.contains("Digital Trade"));
    assert!(tags.workstreams.contains("Cybersecurity"));
    assert!(!tags.workstreams.is_uncategorized());
}

#[test]
fn no_keyword_means_uncategorized() {
    let lex = Lexicon::default().normalized();
    let (n, p) = (ner(), FixedPolarity(0.0));
    let x = TagExtractor::new(&lex, &n, &p);
    let tags = x.extract("Leaders meet for annual summit", "").unwrap();
    assert_eq!(tags.workstreams, Workstreams::Uncategorized);
    assert_eq!(tags.workstreams.joined(), UNCATEGORIZED);
    assert!(tags.workstreams.names().is_empty());
}

#[test]
fn affirmative_alignment_wins_over_negative() {
    let lex = Lexicon::default().normalized();
    let (n, p) = (ner(), FixedPolarity(0.0));
    let x = TagExtractor::new(&lex, &n, &p);
    let tags = x
        .extract(
            "Bilateral cooperation deepens",
            "though one proposal was not supported",
        )
        .unwrap();
    assert_eq!(tags.aligned_with_us, Alignment::Yes);
    assert_eq!(
        tags.matched_alignment_phrase.as_deref(),
        Some("bilateral cooperation")
    );
}

#[test]
fn people_come_from_original_case_content() {
    let lex = Lexicon::default().normalized();
    let (n, p) = (ner(), FixedPolarity(0.0));
    let x = TagExtractor::new(&lex, &n, &p);
    let tags = x.extract("USTR Visit", "Ambassador Tai In Manila").unwrap();
    assert_eq!(tags.people, vec!["Katherine Tai"]);
    assert_eq!(
        n.seen.lock().unwrap().as_slice(),
        ["USTR Visit Ambassador Tai In Manila".to_string()]
    );
}

#[test]
fn sentiment_follows_polarity_thresholds() {
    let lex = Lexicon::default().normalized();
    let n = ner();
    for (pol, expected) in [
        (0.5, Sentiment::Positive),
        (0.1, Sentiment::Neutral),
        (-0.05, Sentiment::Neutral),
        (-0.4, Sentiment::Negative),
    ] {
        let p = FixedPolarity(pol);
        let x = TagExtractor::new(&lex, &n, &p);
        let tags = x.extract("Some title", "some summary").unwrap();
        assert_eq!(tags.sentiment, expected, "polarity {pol}");
    }
}

#[test]
fn us_objective_and_reform_themes_are_reported() {
    let lex = Lexicon::default().normalized();
    let (n, p) = (ner(), FixedPolarity(0.0));
    let x = TagExtractor::new(&lex, &n, &p);
    let tags = x
        .extract(
            "Trade facilitation push",
            "Customs and infrastructure investment reviewed",
        )
        .unwrap();
    assert_eq!(
        tags.matched_us_objective.as_deref(),
        Some("trade facilitation")
    );
    assert_eq!(
        tags.reform_themes,
        vec!["customs", "infrastructure", "investment"]
    );
    assert_eq!(tags.aligned_with_us, Alignment::Unclear);
    assert_eq!(tags.matched_alignment_phrase, None);
}
