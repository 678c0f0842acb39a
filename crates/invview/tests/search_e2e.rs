//! End-to-end search flows driven through the program simulator.

use std::sync::Arc;
use std::time::Duration;

use invview::catalog::mock_inventory;
use invview::input::MAX_GRAPHEMES;
use invview::item::Item;
use invview::notify::NoticeKind;
use invview::profile::Profile;
use invview::state::Phase;
use invview::view::{EMPTY_TITLE, NO_ITEMS};
use invview::{AppConfig, AppModel, FetchError, InventorySource, MockSource, Variant};
use invview_core::event::{Event, KeyCode, KeyEvent};
use invview_runtime::{CmdRecord, ProgramSimulator};

fn sim_with(variant: Variant, source: Arc<dyn InventorySource>) -> ProgramSimulator<AppModel> {
    let config = AppConfig {
        variant,
        ..AppConfig::default()
    };
    let mut sim = ProgramSimulator::new(AppModel::new(config, source));
    sim.init();
    sim
}

fn sim(variant: Variant) -> ProgramSimulator<AppModel> {
    sim_with(variant, Arc::new(MockSource::seeded(Duration::ZERO, 42)))
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

fn type_text(sim: &mut ProgramSimulator<AppModel>, text: &str) {
    for c in text.chars() {
        sim.inject_event(key(KeyCode::Char(c)));
    }
}

fn search(sim: &mut ProgramSimulator<AppModel>, text: &str) {
    type_text(sim, text);
    sim.inject_event(key(KeyCode::Enter));
}

fn frame_text(sim: &mut ProgramSimulator<AppModel>) -> String {
    sim.capture_frame(100, 40).to_text()
}

fn newest_toast(sim: &ProgramSimulator<AppModel>) -> Option<(String, NoticeKind)> {
    sim.model()
        .toasts()
        .iter()
        .next()
        .map(|n| (n.title.clone(), n.kind))
}

#[test]
fn init_schedules_ticks() {
    let sim = sim(Variant::Profile);
    assert_eq!(sim.tick_rate(), Some(Duration::from_millis(100)));
    assert_eq!(sim.model().state().phase(), Phase::Idle);
}

#[test]
fn roblox123_scenario() {
    let mut sim = sim(Variant::Profile);
    sim.defer_tasks(true);
    search(&mut sim, "Roblox123");

    assert!(sim.model().state().loading);
    assert_eq!(sim.pending_tasks(), 1);
    assert!(sim.command_log().contains(&CmdRecord::Task(Some("fetch".into()))));
    assert!(frame_text(&mut sim).contains("Searching"));

    assert!(sim.complete_task(0));
    let state = sim.model().state();
    assert!(!state.loading);
    let results = state.results.as_ref().unwrap();
    assert_eq!(results.items.len(), 8);
    assert_eq!(results.username, "Roblox123");
    assert_eq!(results.profile.as_ref().unwrap().username, "Roblox123");

    assert_eq!(
        newest_toast(&sim),
        Some(("Inventory loaded".into(), NoticeKind::Success))
    );
    let text = frame_text(&mut sim);
    assert!(text.contains("@Roblox123"));
    assert!(text.contains("Found 8 items for Roblox123"));
}

#[test]
fn blank_username_is_rejected_without_state_change() {
    let mut sim = sim(Variant::Inventory);
    sim.defer_tasks(true);
    search(&mut sim, "   ");

    let state = sim.model().state();
    assert!(!state.loading);
    assert!(state.results.is_none());
    assert_eq!(state.generation, 0);
    assert_eq!(sim.pending_tasks(), 0);
    assert_eq!(
        newest_toast(&sim),
        Some(("Enter a username".into(), NoticeKind::Failure))
    );
    let text = frame_text(&mut sim);
    assert!(text.contains(EMPTY_TITLE));
    assert!(text.contains("Please provide a player username"));
}

#[test]
fn username_is_trimmed() {
    let mut sim = sim(Variant::Inventory);
    search(&mut sim, "  Builder ");
    let results = sim.model().state().results.as_ref().unwrap();
    assert_eq!(results.username, "Builder");
    assert!(results.profile.is_none());
}

#[test]
fn newer_search_wins_when_it_finishes_first() {
    let mut sim = sim(Variant::Profile);
    sim.defer_tasks(true);
    search(&mut sim, "first");
    sim.inject_event(key(KeyCode::End));
    type_text(&mut sim, "2");
    sim.inject_event(key(KeyCode::Enter));
    assert_eq!(sim.pending_tasks(), 2);
    assert_eq!(sim.model().state().generation, 2);

    assert!(sim.complete_task(1));
    let applied = sim.model().state().clone();
    assert!(!applied.loading);
    assert_eq!(applied.results.as_ref().unwrap().username, "first2");

    assert!(sim.complete_task(0));
    assert_eq!(sim.model().state(), &applied);
}

#[test]
fn older_search_finishing_first_is_dropped() {
    let mut sim = sim(Variant::Inventory);
    sim.defer_tasks(true);
    search(&mut sim, "old");
    sim.inject_event(key(KeyCode::Enter));
    assert_eq!(sim.pending_tasks(), 2);

    assert!(sim.complete_task(0));
    assert!(sim.model().state().loading);
    assert!(sim.model().state().results.is_none());

    sim.run_pending_tasks();
    assert!(!sim.model().state().loading);
    assert_eq!(sim.model().state().results.as_ref().unwrap().username, "old");
}

#[test]
fn repeating_a_search_yields_the_same_items() {
    let mut sim = sim(Variant::Inventory);
    search(&mut sim, "Roblox123");
    let first = sim.model().state().results.clone().unwrap();
    sim.inject_event(key(KeyCode::Enter));
    let second = sim.model().state().results.clone().unwrap();
    assert_eq!(first.items, second.items);
    assert_eq!(first.items, mock_inventory());
    assert_eq!(sim.model().state().generation, 2);
}

#[test]
fn seeded_profiles_are_reproducible() {
    let run = || {
        let mut sim = sim(Variant::Profile);
        search(&mut sim, "Roblox123");
        let profile = sim.model().state().results.as_ref().unwrap().profile.clone();
        (profile, frame_text(&mut sim))
    };
    let (a, frame_a) = run();
    let (b, frame_b) = run();
    assert!(a.is_some());
    assert_eq!(a, b);
    assert_eq!(frame_a, frame_b);
}

struct Unreachable;

impl InventorySource for Unreachable {
    fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        Err(FetchError::NotFound(username.to_owned()))
    }

    fn fetch_inventory(&self, _username: &str) -> Result<Vec<Item>, FetchError> {
        Err(FetchError::Transient("service unavailable".into()))
    }
}

#[test]
fn failed_search_reports_and_clears_loading() {
    let mut sim = sim_with(Variant::Inventory, Arc::new(Unreachable));
    search(&mut sim, "ghost");
    let state = sim.model().state();
    assert!(!state.loading);
    assert!(state.results.is_none());
    assert_eq!(
        newest_toast(&sim),
        Some(("Search failed".into(), NoticeKind::Failure))
    );
    assert!(frame_text(&mut sim).contains("service unavailable"));
}

#[test]
fn notifications_expire_with_ticks() {
    let mut sim = sim(Variant::Inventory);
    search(&mut sim, "Roblox123");
    assert_eq!(sim.model().toasts().len(), 1);
    sim.tick(39);
    assert_eq!(sim.model().toasts().len(), 1);
    sim.tick(1);
    assert!(sim.model().toasts().is_empty());
}

#[test]
fn escape_quits() {
    let mut sim = sim(Variant::Inventory);
    sim.inject_event(key(KeyCode::Escape));
    assert!(!sim.is_running());
}

#[test]
fn long_username_stays_on_screen() {
    let mut sim = sim(Variant::Inventory);
    sim.inject_event(Event::Paste("a".repeat(65_534)));
    assert_eq!(sim.model().state().input.text().len(), MAX_GRAPHEMES);

    sim.inject_event(key(KeyCode::Backspace));
    sim.inject_event(key(KeyCode::Backspace));
    sim.inject_event(key(KeyCode::Backspace));
    type_text(&mut sim, "XYZ");
    let text = sim.capture_frame(50, 20).to_text();
    assert!(text.contains("aaaXYZ"));
    assert!(!text.contains(&"a".repeat(MAX_GRAPHEMES - 3)));
}

struct HatsOnly;

impl InventorySource for HatsOnly {
    fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        MockSource::seeded(Duration::ZERO, 0).fetch_profile(username)
    }

    fn fetch_inventory(&self, _username: &str) -> Result<Vec<Item>, FetchError> {
        Ok(mock_inventory()
            .into_iter()
            .filter(|i| i.category() == "Hat")
            .collect())
    }
}

#[test]
fn empty_category_shows_placeholder() {
    let mut sim = sim_with(Variant::Inventory, Arc::new(HatsOnly));
    search(&mut sim, "Roblox123");
    sim.inject_event(key(KeyCode::Tab));
    sim.inject_event(key(KeyCode::Char('4')));
    assert_eq!(sim.model().state().filter, "Gear");
    assert!(sim.model().state().visible_items().is_empty());
    assert!(frame_text(&mut sim).contains(NO_ITEMS));
}
