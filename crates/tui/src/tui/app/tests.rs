use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use tempfile::TempDir;

use super::{App, ConfirmChoice, InputMode, StatusKind};
use crate::capture::TaskInput;
use crate::config::AppConfig;
use crate::db::Database;
use crate::model::ListView;
use crate::tui::clock::FixedClock;
use crate::tui::constants::{STATUS_EMPTY_EDIT, STATUS_EMPTY_TASK};

struct Harness {
    app: App,
    clock: FixedClock,
    _dir: TempDir,
}

fn harness() -> Harness {
    let dir = TempDir::new().expect("temp dir");
    let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
    let database = Database::initialize(&config).expect("database");
    let clock = FixedClock::new(date(2026, 10, 19));
    let app = App::new(config, database, Box::new(clock.clone())).expect("app");
    Harness {
        app,
        clock,
        _dir: dir,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, code: KeyCode) {
    app.on_key(key(code));
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

fn seed(app: &mut App, titles: &[&str]) {
    for title in titles {
        app.database
            .handle_add(&TaskInput::from_text(title))
            .expect("seed task");
    }
    app.refresh().expect("refresh");
}

fn titles(app: &App) -> Vec<&str> {
    app.tasks.iter().map(|task| task.title.as_str()).collect()
}

fn status_text(app: &App) -> Option<&str> {
    app.status.as_ref().map(|status| status.text.as_str())
}

fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal.draw(|f| app.draw(f)).expect("draw");
    terminal.backend().buffer().clone()
}

fn rows(buf: &Buffer) -> Vec<String> {
    (0..buf.area.height)
        .map(|y| (0..buf.area.width).map(|x| buf.get(x, y).symbol()).collect())
        .collect()
}

fn row_of(rows: &[String], needle: &str) -> usize {
    rows.iter()
        .position(|row| row.contains(needle))
        .unwrap_or_else(|| panic!("'{needle}' not drawn:\n{}", rows.join("\n")))
}

#[test]
fn draws_heading_form_date_and_list_top_to_bottom() {
    let mut h = harness();
    seed(&mut h.app, &["Water the ferns"]);

    let rows = rows(&draw(&mut h.app, 80, 24));
    let heading = row_of(&rows, "Just do it !");
    let form = row_of(&rows, "New task");
    let today = row_of(&rows, "Monday 19 October 2026");
    let list = row_of(&rows, "Tasks · All (1 active / 1 total)");
    let task = row_of(&rows, "Water the ferns");

    assert!(heading < form, "{heading} < {form}");
    assert!(form < today, "{form} < {today}");
    assert!(today < list, "{today} < {list}");
    assert!(list < task, "{list} < {task}");
}

#[test]
fn empty_store_shows_hint_and_placeholder() {
    let mut h = harness();
    let rows = rows(&draw(&mut h.app, 80, 24));

    row_of(&rows, "What needs to be done?");
    row_of(&rows, "Nothing to do. Press 'a' to add a task.");
}

#[test]
fn compose_adds_task_and_keeps_form_open() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('a'));
    assert_eq!(h.app.input_mode, InputMode::Compose);

    type_text(&mut h.app, "  Buy   oat milk ");
    press(&mut h.app, KeyCode::Enter);

    assert_eq!(titles(&h.app), vec!["Buy oat milk"]);
    assert_eq!(h.app.input.as_str(), "");
    assert_eq!(h.app.input_mode, InputMode::Compose);
    assert_eq!(status_text(&h.app), Some("Added 'Buy oat milk'"));
}

#[test]
fn blank_submission_reports_error() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Tab);
    type_text(&mut h.app, "   ");
    press(&mut h.app, KeyCode::Enter);

    assert!(h.app.tasks.is_empty());
    let status = h.app.status.as_ref().expect("status");
    assert_eq!(status.text, STATUS_EMPTY_TASK);
    assert_eq!(status.kind, StatusKind::Error);
}

#[test]
fn escape_clears_form_and_returns_to_list() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('a'));
    type_text(&mut h.app, "half a thought");
    press(&mut h.app, KeyCode::Esc);

    assert_eq!(h.app.input_mode, InputMode::Browse);
    assert_eq!(h.app.input.as_str(), "");
    assert!(h.app.tasks.is_empty());
}

#[test]
fn form_keys_do_not_trigger_list_actions() {
    let mut h = harness();
    seed(&mut h.app, &["Keep me"]);
    press(&mut h.app, KeyCode::Char('a'));
    type_text(&mut h.app, "dq");

    assert!(!h.app.should_quit());
    assert_eq!(h.app.input_mode, InputMode::Compose);
    assert_eq!(h.app.input.as_str(), "dq");
}

#[test]
fn space_toggles_and_views_filter() {
    let mut h = harness();
    seed(&mut h.app, &["First", "Second"]);

    press(&mut h.app, KeyCode::Char(' '));
    assert_eq!(titles(&h.app), vec!["Second", "First"]);
    assert!(h.app.tasks[1].is_done());
    assert_eq!(h.app.selected, 1);

    press(&mut h.app, KeyCode::Right);
    assert_eq!(h.app.view, ListView::Active);
    assert_eq!(titles(&h.app), vec!["Second"]);

    press(&mut h.app, KeyCode::Right);
    assert_eq!(h.app.view, ListView::Done);
    assert_eq!(titles(&h.app), vec!["First"]);

    press(&mut h.app, KeyCode::Enter);
    assert!(h.app.tasks.is_empty());

    press(&mut h.app, KeyCode::Left);
    press(&mut h.app, KeyCode::Left);
    assert_eq!(h.app.view, ListView::All);
    assert!(h.app.tasks.iter().all(|task| !task.is_done()));
}

#[test]
fn selection_moves_and_clamps() {
    let mut h = harness();
    seed(&mut h.app, &["One", "Two", "Three"]);

    press(&mut h.app, KeyCode::Char('j'));
    press(&mut h.app, KeyCode::Down);
    press(&mut h.app, KeyCode::Down);
    assert_eq!(h.app.selected, 2);

    press(&mut h.app, KeyCode::Home);
    assert_eq!(h.app.selected, 0);
    press(&mut h.app, KeyCode::Char('k'));
    assert_eq!(h.app.selected, 0);

    press(&mut h.app, KeyCode::End);
    assert_eq!(h.app.list_state.selected(), Some(2));

    let last = h.app.tasks[2].id.clone();
    h.app.database.delete_tasks(&[last]).expect("delete");
    h.app.refresh().expect("refresh");
    assert_eq!(h.app.selected, 1);
}

#[test]
fn delete_requires_confirmation() {
    let mut h = harness();
    seed(&mut h.app, &["Doomed", "Survivor"]);

    press(&mut h.app, KeyCode::Char('d'));
    assert_eq!(h.app.input_mode, InputMode::ConfirmDelete);
    assert_eq!(h.app.confirm_choice, ConfirmChoice::No);
    let rows = rows(&draw(&mut h.app, 80, 24));
    row_of(&rows, "Delete 'Doomed'?");

    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.input_mode, InputMode::Browse);
    assert_eq!(h.app.tasks.len(), 2);

    press(&mut h.app, KeyCode::Delete);
    press(&mut h.app, KeyCode::Left);
    press(&mut h.app, KeyCode::Enter);
    assert_eq!(titles(&h.app), vec!["Survivor"]);

    press(&mut h.app, KeyCode::Char('x'));
    press(&mut h.app, KeyCode::Char('y'));
    assert!(h.app.tasks.is_empty());
}

#[test]
fn edit_renames_and_rejects_blank_titles() {
    let mut h = harness();
    seed(&mut h.app, &["Draft"]);

    press(&mut h.app, KeyCode::Char('e'));
    assert_eq!(h.app.input_mode, InputMode::Edit);
    assert_eq!(h.app.input.as_str(), "Draft");

    for _ in 0..5 {
        press(&mut h.app, KeyCode::Backspace);
    }
    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.input_mode, InputMode::Edit);
    assert_eq!(status_text(&h.app), Some(STATUS_EMPTY_EDIT));

    type_text(&mut h.app, "Final copy");
    press(&mut h.app, KeyCode::Enter);
    assert_eq!(h.app.input_mode, InputMode::Browse);
    assert_eq!(titles(&h.app), vec!["Final copy"]);

    press(&mut h.app, KeyCode::Char('e'));
    type_text(&mut h.app, " v2");
    press(&mut h.app, KeyCode::Esc);
    assert_eq!(titles(&h.app), vec!["Final copy"]);
    assert_eq!(h.app.input.as_str(), "");
}

#[test]
fn clear_done_removes_completed_tasks() {
    let mut h = harness();
    seed(&mut h.app, &["Finished", "Pending"]);
    press(&mut h.app, KeyCode::Char(' '));

    press(&mut h.app, KeyCode::Char('c'));
    assert_eq!(titles(&h.app), vec!["Pending"]);
    assert_eq!(status_text(&h.app), Some("Cleared 1 completed task"));
}

#[test]
fn tick_rolls_date_over() {
    let mut h = harness();
    h.clock.set(date(2026, 10, 20));
    h.app.on_tick();

    assert_eq!(h.app.today, date(2026, 10, 20));
    let rows = rows(&draw(&mut h.app, 80, 24));
    row_of(&rows, "Tuesday 20 October 2026");
}

#[test]
fn help_overlay_opens_and_closes() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('?'));
    assert_eq!(h.app.input_mode, InputMode::Help);
    let rows = rows(&draw(&mut h.app, 80, 24));
    row_of(&rows, "Keyboard reference");

    press(&mut h.app, KeyCode::Esc);
    assert_eq!(h.app.input_mode, InputMode::Browse);
    assert!(h.app.status.is_none());
}

#[test]
fn ctrl_c_quits_from_any_mode() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('a'));
    h.app
        .on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(h.app.should_quit());
}

#[test]
fn q_quits_from_the_list() {
    let mut h = harness();
    press(&mut h.app, KeyCode::Char('q'));
    assert!(h.app.should_quit());
}
