// tests/economy_resolver.rs
use anyhow::Result;
use apec_signals::economy::{EconomyResolver, UNKNOWN_ECONOMY};
use apec_signals::lexicon::Lexicon;
use apec_signals::nlp::{Entity, EntityExtractor, EntityLabel, PatternEntityExtractor};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts calls and returns a fixed entity list.
struct CountingNer {
    calls: AtomicUsize,
    entities: Vec<Entity>,
}

impl CountingNer {
    fn new(entities: Vec<Entity>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            entities,
        }
    }
}

impl EntityExtractor for CountingNer {
    fn extract_entities(&self, _text: &str) -> Result<Vec<Entity>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entities.clone())
    }
}

#[test]
fn capital_match_needs_no_entity_call() {
    let lex = Lexicon::default().normalized();
    let ner = CountingNer::new(vec![Entity::new("Canada", EntityLabel::Gpe)]);
    let eco = EconomyResolver::new(&lex)
        .resolve("Officials met in Beijing today", &ner)
        .unwrap();
    assert_eq!(eco, "China");
    assert_eq!(ner.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn city_match_ignores_word_boundaries() {
    let lex = Lexicon::default().normalized();
    let ner = CountingNer::new(vec![]);
    // "tokyo" inside a longer token still counts.
    let eco = EconomyResolver::new(&lex)
        .resolve("The #TokyoRound talks resume", &ner)
        .unwrap();
    assert_eq!(eco, "Japan");
}

#[test]
fn falls_back_to_gpe_entities() {
    let lex = Lexicon::default().normalized();
    let ner = CountingNer::new(vec![
        Entity::new("Jane Doe", EntityLabel::Person),
        Entity::new("Chile", EntityLabel::Gpe),
        Entity::new("Mexico", EntityLabel::Gpe),
    ]);
    let eco = EconomyResolver::new(&lex)
        .resolve("Ministers discuss tariffs", &ner)
        .unwrap();
    assert_eq!(eco, "Chile");
    assert_eq!(ner.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn economy_list_order_decides_within_one_entity() {
    let lex = Lexicon::default().normalized();
    let resolve = |span: &str| {
        let ner = CountingNer::new(vec![Entity::new(span, EntityLabel::Gpe)]);
        EconomyResolver::new(&lex)
            .resolve("Trade talks continue", &ner)
            .unwrap()
    };
    // China is listed before Hong Kong, whatever the span order.
    assert_eq!(resolve("China and Hong Kong"), "China");
    assert_eq!(resolve("Hong Kong, China"), "China");
    // "chinese" does not contain "china".
    assert_eq!(resolve("Chinese Taipei"), "Chinese Taipei");
}

#[test]
fn unmatched_text_is_unknown() {
    let lex = Lexicon::default().normalized();
    let ner = CountingNer::new(vec![Entity::new("Atlantis", EntityLabel::Gpe)]);
    let eco = EconomyResolver::new(&lex)
        .resolve("A quiet week", &ner)
        .unwrap();
    assert_eq!(eco, UNKNOWN_ECONOMY);
    assert_eq!(
        EconomyResolver::new(&lex).resolve("", &ner).unwrap(),
        UNKNOWN_ECONOMY
    );
}

#[test]
fn result_is_always_a_listed_economy_or_unknown() {
    let lex = Lexicon::default().normalized();
    let ner = PatternEntityExtractor::default_seed();
    let r = EconomyResolver::new(&lex);
    for text in [
        "Seoul hosts ministers",
        "Taiwan and Korea delegations arrive",
        "Chinese Taipei joins the panel",
        "Talks in Paris",
        "Port Moresby summit",
    ] {
        let eco = r.resolve(text, &ner).unwrap();
        assert!(
            eco == UNKNOWN_ECONOMY || lex.is_known_economy(&eco),
            "unexpected economy {eco} for {text}"
        );
    }
}
