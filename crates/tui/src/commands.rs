use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{AddArgs, CliCommand, IdArgs, ListArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::core::TasksService;
use crate::model::{DeleteResult, StatusUpdate, Task};
use crate::tui::short_id;

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(config, args, &mut writer),
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Done(args) => handle_done(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::ClearDone => handle_clear_done(config, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_add<W: Write>(config: &AppConfig, args: AddArgs, mut writer: W) -> Result<()> {
    let service = TasksService::new(config.clone())?;
    let outcome = service.capture(args.into())?;
    writeln!(writer, "Added {} {}", short_id(&outcome.id), outcome.title)?;
    Ok(())
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let service = TasksService::new(config.clone())?;
    let snapshot = service.list(args.view)?;
    if args.json {
        serde_json::to_writer_pretty(&mut writer, &snapshot.tasks)?;
        writeln!(writer)?;
        return Ok(());
    }

    if snapshot.tasks.is_empty() {
        writeln!(writer, "No tasks in {}", args.view.label())?;
        return Ok(());
    }
    for task in &snapshot.tasks {
        writeln!(writer, "{}", TaskLine(task))?;
    }
    Ok(())
}

fn handle_done<W: Write>(config: &AppConfig, args: &IdArgs, mut writer: W) -> Result<()> {
    let results = core_commands::complete_tasks(config, &args.ids)?;
    let summary = Summary::from_updates(&results);
    summary.write_to(SummaryLine::completed(summary.affected), &mut writer)
}

fn handle_delete<W: Write>(config: &AppConfig, args: &IdArgs, mut writer: W) -> Result<()> {
    let results = core_commands::delete_tasks(config, &args.ids)?;
    let summary = Summary::from_deletes(&results);
    summary.write_to(SummaryLine::deleted(summary.affected), &mut writer)
}

fn handle_clear_done<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let service = TasksService::new(config.clone())?;
    let removed = service.clear_done()?;
    writeln!(
        writer,
        "Cleared {} completed task{}",
        removed,
        plural(removed)
    )?;
    Ok(())
}

struct TaskLine<'a>(&'a Task);

impl fmt::Display for TaskLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.0.is_done() { "x" } else { " " };
        write!(f, "[{}] {} {}", mark, short_id(&self.0.id), self.0.title)
    }
}

struct Summary {
    affected: usize,
    missing: Vec<String>,
}

impl Summary {
    fn from_updates(results: &[StatusUpdate]) -> Self {
        Self::collect(results.iter().map(|r| (r.id.as_str(), r.changed)))
    }

    fn from_deletes(results: &[DeleteResult]) -> Self {
        Self::collect(results.iter().map(|r| (r.id.as_str(), r.deleted)))
    }

    fn collect<'a>(results: impl Iterator<Item = (&'a str, bool)>) -> Self {
        let mut affected = 0usize;
        let mut missing = Vec::new();
        for (id, hit) in results {
            if hit {
                affected += 1;
            } else {
                missing.push(id.to_string());
            }
        }
        Self { affected, missing }
    }

    fn write_to<W: Write>(&self, headline: SummaryLine, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", headline)?;
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", self.missing.join(", "))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
    Completed(usize),
    NoneCompleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }

    fn completed(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Completed(count)
        } else {
            SummaryLine::NoneCompleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => write!(f, "Deleted {} task{}", count, plural(*count)),
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
            SummaryLine::Completed(count) => {
                write!(f, "Completed {} task{}", count, plural(*count))
            }
            SummaryLine::NoneCompleted => write!(f, "No tasks completed"),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
