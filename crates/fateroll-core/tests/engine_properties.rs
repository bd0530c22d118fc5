//! End-to-end behaviour of the decision engine through its public API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fateroll_core::random::{RandomSource, seeded_source};
use fateroll_core::store::keys;
use fateroll_core::{
    AppConfig, DecisionEngine, DrawState, FaterollError, HistoryView, KeyValueStore, Mode,
    NoDelay, Result,
};

#[derive(Default)]
struct InMemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    fn with(pairs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in pairs {
            store.set(key, value).unwrap();
        }
        store
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        self.values.lock().unwrap().clear();
        Ok(())
    }
}

/// Cycles through fixed unit values.
struct Cycle {
    values: Vec<f64>,
    next: usize,
}

impl Cycle {
    fn new(values: &[f64]) -> Box<Self> {
        Box::new(Self {
            values: values.to_vec(),
            next: 0,
        })
    }
}

impl RandomSource for Cycle {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

fn engine(store: Arc<InMemoryStore>) -> DecisionEngine {
    DecisionEngine::load(store, &AppConfig::default())
}

fn add_lunch(engine: &mut DecisionEngine) -> (String, String) {
    let pizza = engine.add_option("Pizza", "🍕").unwrap().id;
    let salad = engine.add_option("Salad", "🥗").unwrap().id;
    engine.update_weight(&pizza, 70.0).unwrap();
    engine.update_weight(&salad, 30.0).unwrap();
    (pizza, salad)
}

#[tokio::test]
async fn weighted_draws_follow_the_cumulative_walk() {
    let mut engine =
        engine(Arc::new(InMemoryStore::default())).with_random(Cycle::new(&[0.5, 0.85]));
    add_lunch(&mut engine);

    assert_eq!(engine.roll(&NoDelay).await.unwrap().winner.name, "Pizza");
    assert_eq!(engine.roll(&NoDelay).await.unwrap().winner.name, "Salad");
}

#[tokio::test]
async fn history_keeps_the_fifty_newest_draws() {
    let mut engine = engine(Arc::new(InMemoryStore::default())).with_random(seeded_source(7));
    add_lunch(&mut engine);

    for _ in 0..51 {
        engine.roll(&NoDelay).await.unwrap();
    }

    let records = engine.history().records();
    assert_eq!(records.len(), 50);
    assert!(records.windows(2).all(|pair| pair[0].id > pair[1].id));
}

#[tokio::test]
async fn repeated_configuration_counts_uses() {
    let mut engine = engine(Arc::new(InMemoryStore::default())).with_random(seeded_source(1));
    add_lunch(&mut engine);

    for _ in 0..3 {
        engine.roll(&NoDelay).await.unwrap();
    }

    assert_eq!(engine.registry().len(), 1);
    assert_eq!(engine.registry().sets()[0].use_count, 3);
    assert_eq!(engine.listing(HistoryView::Frequent).len(), 1);
}

#[test]
fn preference_weights_survive_a_fate_round_trip() {
    let mut engine = engine(Arc::new(InMemoryStore::default())).with_random(seeded_source(3));
    let (pizza, salad) = add_lunch(&mut engine);

    engine.set_mode(Mode::Fate).unwrap();
    let fate: Vec<f64> = engine.options().iter().map(|o| o.weight).collect();
    engine.set_mode(Mode::Preference).unwrap();

    assert_eq!(engine.weights().option(&pizza).unwrap().weight, 70.0);
    assert_eq!(engine.weights().option(&salad).unwrap().weight, 30.0);

    engine.set_mode(Mode::Fate).unwrap();
    let again: Vec<f64> = engine.options().iter().map(|o| o.weight).collect();
    assert_eq!(again, fate);
}

#[test]
fn fair_mode_shows_equal_shares() {
    let mut engine = engine(Arc::new(InMemoryStore::default())).with_random(seeded_source(5));
    add_lunch(&mut engine);
    engine.add_option("Soup", "").unwrap();

    engine.set_mode(Mode::Fair).unwrap();
    assert_eq!(engine.display_weights(), vec![33.0, 33.0, 33.0]);
}

#[test]
fn a_second_draw_is_rejected_while_one_is_pending() {
    let mut engine = engine(Arc::new(InMemoryStore::default())).with_random(seeded_source(9));
    add_lunch(&mut engine);

    let pending = engine.begin_draw().unwrap();
    assert_eq!(engine.draw_state(), DrawState::Drawing);
    assert_eq!(engine.begin_draw().unwrap_err(), FaterollError::DrawInProgress);

    engine.complete_draw(pending).unwrap();
    assert_eq!(engine.draw_state(), DrawState::Idle);
    assert_eq!(engine.history().len(), 1);
}

#[test]
fn malformed_state_falls_back_to_empty() {
    let store = InMemoryStore::with(&[
        (keys::DECISION_HISTORY, "not json"),
        (keys::DECISION_SETS, "{\"sets\": true}"),
        (keys::FAVORITE_DECISIONS, "[\"x\"]"),
        (keys::WEIGHT_SNAPSHOTS, "[]"),
    ]);
    let engine = engine(Arc::new(store));

    assert!(engine.history().is_empty());
    assert!(engine.registry().is_empty());
    assert!(engine.history().favorites().is_empty());
    assert!(engine.options().is_empty());
}

#[tokio::test]
async fn state_is_restored_from_the_store() {
    let store = Arc::new(InMemoryStore::default());
    let mut first = engine(store.clone()).with_random(seeded_source(11));
    add_lunch(&mut first);
    first.roll(&NoDelay).await.unwrap();
    let id = first.history().records()[0].id;
    first.set_title(id, "Friday lunch").unwrap();
    first.toggle_favorite(id).unwrap();
    drop(first);

    let second = engine(store);
    assert_eq!(second.options().len(), 2);
    assert_eq!(second.history().records()[0].title(), "Friday lunch");
    assert_eq!(second.listing(HistoryView::Favorite).len(), 1);
    assert_eq!(second.registry().sets()[0].use_count, 1);
}
