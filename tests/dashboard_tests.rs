use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use invisi::batch::{BatchCollection, Stage};
use invisi::cli::dashboard::{draw::draw, App, View};
use invisi::config::{parse_config, Config};
use ratatui::{backend::TestBackend, Terminal};
use std::time::Duration;

const WIDTH: u16 = 160;
const HEIGHT: u16 = 50;

fn app_with(config: &Config, hour: u32) -> App {
    App::new(
        BatchCollection::seeded(),
        config,
        NaiveDate::from_ymd_opt(2023, 10, 20).unwrap(),
        NaiveTime::from_hms_opt(hour, 15, 0).unwrap(),
    )
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

/// Renders one frame and returns the screen as lines of text.
fn render(app: &App) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(WIDTH as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn screen_contains(screen: &[String], needle: &str) -> bool {
    screen.iter().any(|line| line.contains(needle))
}

#[test]
fn test_home_screen_shows_greeting_stats_and_cards() {
    let app = app_with(&Config::default(), 9);
    let screen = render(&app);

    for needle in [
        "Invisi",
        "GOOD MORNING",
        "Hello, Kwame",
        "Total Batches",
        "Avg Quality",
        "↗ 2.4%",
        "₵15,400",
        "Batch Status",
        "Batch #204",
        "Batch #203",
        "Batch #202",
        "Batch #201",
        "Ready for Sale",
        "List on Market",
        "Start New Batch",
        "Home",
    ] {
        assert!(screen_contains(&screen, needle), "missing {:?}", needle);
    }
}

#[test]
fn test_greeting_follows_clock() {
    let screen = render(&app_with(&Config::default(), 19));
    assert!(screen_contains(&screen, "GOOD EVENING"));
    assert!(!screen_contains(&screen, "GOOD MORNING"));
}

#[test]
fn test_tab_hides_other_stages() {
    let mut app = app_with(&Config::default(), 9);
    press(&mut app, KeyCode::Char('3'));
    let screen = render(&app);

    assert!(screen_contains(&screen, "Batch #203"));
    assert!(!screen_contains(&screen, "Batch #204"));
    assert!(!screen_contains(&screen, "List on Market"));
}

#[test]
fn test_modal_renders_over_cards() {
    let mut app = app_with(&Config::default(), 9);
    press(&mut app, KeyCode::Char('n'));
    let screen = render(&app);

    assert!(screen_contains(&screen, "New Batch"));
    assert!(screen_contains(&screen, "Kickoff fermentation"));
    assert!(screen_contains(&screen, "Total Weight (kg)"));
    assert!(screen_contains(&screen, "Amelonado"));
    assert!(screen_contains(&screen, "2023-10-20"));
    assert!(screen_contains(&screen, "Enter: Start Fermentation"));
}

#[test]
fn test_rejected_submission_shows_errors() {
    let mut app = app_with(&Config::default(), 9);
    press(&mut app, KeyCode::Char('n'));
    press(&mut app, KeyCode::Enter);
    let screen = render(&app);

    assert!(app.modal().is_some());
    assert!(screen_contains(&screen, "weight is required"));
}

#[test]
fn test_created_batch_appears_first() {
    let mut app = app_with(&Config::default(), 9);
    press(&mut app, KeyCode::Char('n'));
    for c in "150".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    let screen = render(&app);

    assert!(app.modal().is_none());
    assert!(screen_contains(&screen, "Batch #205"));
    assert!(screen_contains(&screen, "Day 1 of 6"));
    assert!(screen_contains(&screen, "Amelonado · 150 kg"));
    assert!(screen_contains(&screen, "Batch #205 started fermenting"));
}

#[test]
fn test_pod_view_renders_live_metrics() {
    let mut app = app_with(&Config::default(), 9);
    press(&mut app, KeyCode::Char('p'));
    app.tick(Duration::from_millis(500));
    let screen = render(&app);

    assert_eq!(app.view(), View::Pod);
    assert!(screen_contains(&screen, "Fermentation Pod"));
    assert!(screen_contains(&screen, "LIVE METRICS"));
    assert!(screen_contains(&screen, "45.2°C"));
    assert!(screen_contains(&screen, "Batch #204"));
    assert!(screen_contains(&screen, "Fermenting"));
}

#[test]
fn test_config_drives_initial_state() {
    let config = parse_config(
        "farmer:\n  name: Abena\ndashboard:\n  default_tab: ready\n  start_in_pod_view: true\n",
    )
    .unwrap();
    let app = app_with(&config, 14);

    assert_eq!(app.view(), View::Pod);
    assert_eq!(app.visible().len(), 1);
    assert_eq!(app.pod().unwrap().snapshot().stage, Stage::Ready);

    let screen = render(&app);
    assert!(screen_contains(&screen, "Hello, Abena"));
    assert!(screen_contains(&screen, "GOOD AFTERNOON"));
    assert!(screen_contains(&screen, "Ready for Sale"));
}
