use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::constants::STATUS_REFRESHED;

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BrowseAction {
    Quit,
    Compose,
    Edit,
    Toggle,
    Delete,
    ClearDone,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PrevView,
    NextView,
    Refresh,
    ShowHelp,
}

impl BrowseAction {
    fn from_event(key: &KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => Some(Self::Compose),
            KeyCode::Char('e') => Some(Self::Edit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Toggle),
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('c') => Some(Self::ClearDone),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home | KeyCode::Char('g') => Some(Self::SelectFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Self::SelectLast),
            KeyCode::Left => Some(Self::PrevView),
            KeyCode::Right => Some(Self::NextView),
            KeyCode::Char('r') => Some(Self::Refresh),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            _ => None,
        }
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

impl App {
    /// Failures never escape: they end up on the status line and in the log.
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        if is_ctrl_c(&key) {
            self.should_quit = true;
            return;
        }

        let result = match self.input_mode {
            InputMode::Browse => self.handle_browse_mode(key),
            InputMode::Compose => self.handle_compose_mode(key),
            InputMode::Edit => self.handle_edit_mode(key),
            InputMode::Help => {
                self.handle_help_mode(key);
                Ok(())
            }
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        };

        if let Err(err) = result {
            tracing::error!(error = %format!("{err:#}"), "action failed");
            self.set_status_error(format!("{err:#}"));
        }
    }

    fn handle_browse_mode(&mut self, key: KeyEvent) -> Result<()> {
        match BrowseAction::from_event(&key) {
            Some(action) => self.execute_browse_action(action),
            None => Ok(()),
        }
    }

    fn execute_browse_action(&mut self, action: BrowseAction) -> Result<()> {
        match action {
            BrowseAction::Quit => self.should_quit = true,
            BrowseAction::Compose => self.start_compose(),
            BrowseAction::Edit => self.start_edit(),
            BrowseAction::Toggle => self.toggle_selected()?,
            BrowseAction::Delete => self.prompt_delete(),
            BrowseAction::ClearDone => self.clear_done()?,
            BrowseAction::SelectNext => self.select_next(),
            BrowseAction::SelectPrev => self.select_prev(),
            BrowseAction::SelectFirst => self.select_first(),
            BrowseAction::SelectLast => self.select_last(),
            BrowseAction::PrevView => self.prev_view()?,
            BrowseAction::NextView => self.next_view()?,
            BrowseAction::Refresh => {
                self.refresh()?;
                self.set_status_info(STATUS_REFRESHED);
            }
            BrowseAction::ShowHelp => self.show_help_overlay(),
        }
        Ok(())
    }

    fn handle_compose_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.add_task()?,
            KeyCode::Esc => self.leave_form(),
            KeyCode::Tab | KeyCode::BackTab => self.input_mode = InputMode::Browse,
            _ => self.edit_buffer(key),
        }
        Ok(())
    }

    fn handle_edit_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.apply_edit()?,
            KeyCode::Esc => self.cancel_edit(),
            _ => self.edit_buffer(key),
        }
        Ok(())
    }

    fn edit_buffer(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.input.insert_char(ch)
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            self.input_mode = InputMode::Browse;
            self.status = None;
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.input_mode = InputMode::Browse;
                self.perform_delete()?;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.input_mode = InputMode::Browse;
                self.set_status_info("Deletion cancelled");
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Browse;
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete()?;
                } else {
                    self.set_status_info("Deletion cancelled");
                }
            }
            _ => {}
        }
        Ok(())
    }
}
