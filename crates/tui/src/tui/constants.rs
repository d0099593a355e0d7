use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const FORM_TITLE: &str = "New task";
pub(crate) const FORM_EDIT_TITLE: &str = "Edit task";
pub(crate) const FORM_PLACEHOLDER: &str = "What needs to be done?";
pub(crate) const DATE_FORMAT: &str = "%A %-d %B %Y";

pub(crate) const HINT_BROWSE: &str =
    "a: add • e: edit • Space: done • d: delete • c: clear done • ←/→: view • h: help • q: quit";
pub(crate) const HINT_COMPOSE: &str = "Enter: add • Tab: go to list • Esc: clear and leave";
pub(crate) const HINT_EDIT: &str = "Enter: save • Esc: cancel";

pub(crate) const STATUS_EMPTY_TASK: &str = "Enter a task before adding it";
pub(crate) const STATUS_EMPTY_EDIT: &str = "A task needs a title";
pub(crate) const STATUS_REFRESHED: &str = "Refreshed tasks";
pub(crate) const STATUS_HELP: &str = "Keyboard reference: Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion: arrows choose, Enter confirms, Esc cancels";
