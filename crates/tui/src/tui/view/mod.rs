//! Widgets making up the main screen and the composition that arranges them.

use ratatui::layout::Constraint;

mod current_date;
mod task_form;
mod task_list;
mod title;

pub use current_date::CurrentDate;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use title::{HeadingLevel, Title};

pub const APP_TITLE: &str = "Just do it !";

/// One slot of the main screen. Only the heading carries configuration; the
/// other children are fed by the host application state when drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Title(Title),
    TaskForm,
    CurrentDate,
    TaskList,
}

impl Child {
    /// Vertical space the child asks for.
    pub fn constraint(&self) -> Constraint {
        match self {
            Child::Title(title) => Constraint::Length(title.height()),
            Child::TaskForm => Constraint::Length(TaskForm::HEIGHT),
            Child::CurrentDate => Constraint::Length(CurrentDate::HEIGHT),
            Child::TaskList => Constraint::Min(3),
        }
    }
}

/// Ordered children, drawn top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    children: Vec<Child>,
}

impl Fragment {
    pub fn new(children: Vec<Child>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Child> {
        self.children.iter()
    }

    pub fn constraints(&self) -> Vec<Constraint> {
        self.children.iter().map(Child::constraint).collect()
    }
}

impl<'a> IntoIterator for &'a Fragment {
    type Item = &'a Child;
    type IntoIter = std::slice::Iter<'a, Child>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// Top-level view: a heading, the task form, today's date and the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoApp;

impl TodoApp {
    pub fn new() -> Self {
        TodoApp
    }

    /// The view takes no props; whatever is passed is dropped.
    pub fn with_props<P>(_props: P) -> Self {
        TodoApp
    }

    pub fn render(&self) -> Fragment {
        Fragment::new(vec![
            Child::Title(Title::new(APP_TITLE, HeadingLevel::H1)),
            Child::TaskForm,
            Child::CurrentDate,
            Child::TaskList,
        ])
    }
}
