//! Scripted sessions
//!
//! `todoq run` reads one command per line and applies it to a fresh,
//! in-memory queue. Example script:
//!
//! ```text
//! # weekend
//! enqueue --name "Write essay" --type Study --length 3
//! enqueue --name Groceries --type Shop --length 1
//! dequeue
//! list
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use super::output::Output;
use crate::config::Config;
use crate::domain::{Action, Outcome, Task, TaskDraft, TaskStore};

/// One parsed script line
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum SessionCommand {
    /// Add a task, or reschedule a pending one
    Enqueue {
        #[arg(long, allow_hyphen_values = true)]
        name: Option<String>,

        #[arg(long = "type", allow_hyphen_values = true)]
        task_type: Option<String>,

        #[arg(long)]
        length: Option<u32>,
    },

    /// Complete the task at the front of the queue
    Dequeue,

    /// Show both lists
    List,

    /// Show the counters
    Status,
}

/// Runs a script from `path`, or stdin when `path` is `None` or `-`
pub fn run(output: &Output, config: &Config, path: Option<&Path>) -> Result<()> {
    let reader: Box<dyn BufRead> = match path {
        Some(p) if p != Path::new("-") => {
            output.verbose_ctx("run", &format!("Reading script: {}", p.display()));
            let file = File::open(p)
                .with_context(|| format!("Failed to open script: {}", p.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => {
            output.verbose_ctx("run", "Reading script from stdin");
            Box::new(BufReader::new(io::stdin()))
        }
    };

    let store = execute(output, config, reader)?;
    output.verbose_ctx("run", &format!("{} changes applied", store.revision()));
    output.counts(store.counts());
    Ok(())
}

/// Executes every line against a new store and returns it
fn execute(output: &Output, config: &Config, reader: impl BufRead) -> Result<TaskStore> {
    let mut store = TaskStore::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let command = parse_line(trimmed).with_context(|| format!("line {}", line_no))?;
        output.verbose_ctx("run", &format!("line {}: {:?}", line_no, command));

        match command {
            SessionCommand::Enqueue {
                name,
                task_type,
                length,
            } => {
                let draft = TaskDraft {
                    name: name.unwrap_or_default(),
                    task_type,
                    length_hours: length,
                };
                apply(output, config, &mut store, &Action::Enqueue(draft), line_no);
            }
            SessionCommand::Dequeue => {
                apply(output, config, &mut store, &Action::Dequeue, line_no);
            }
            SessionCommand::List => list(output, config, &store),
            SessionCommand::Status => output.counts(store.counts()),
        }
    }

    Ok(store)
}

fn apply(output: &Output, config: &Config, store: &mut TaskStore, action: &Action, line_no: usize) {
    let outcome = match store.apply(action) {
        Ok(outcome) => outcome,
        Err(e) => {
            output.error(&format!("line {}: {}", line_no, e));
            return;
        }
    };

    if output.is_json() {
        output.data(&serde_json::json!({
            "line": line_no,
            "outcome": outcome.label(),
            "task": outcome.task(),
        }));
        return;
    }

    match &outcome {
        Outcome::Created(task) => println!(
            "Enqueued: {} ({}) due {}",
            task.name,
            task.task_type,
            config.format_time(task.due_at)
        ),
        Outcome::Merged(task) => println!(
            "Rescheduled: {} ({}) due {}",
            task.name,
            task.task_type,
            config.format_time(task.due_at)
        ),
        Outcome::Completed(task) => println!(
            "Completed: {} ({}) at {}",
            task.name,
            task.task_type,
            task.completed_at
                .map(|at| config.format_time(at))
                .unwrap_or_default()
        ),
        Outcome::NothingPending => println!("No pending tasks"),
    }
}

fn list(output: &Output, config: &Config, store: &TaskStore) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "pending": store.pending(),
            "completed": store.completed(),
        }));
        return;
    }

    println!("To Do ({}):", store.pending().len());
    println!("{:<24} {:<10} DUE", "TASK", "TYPE");
    println!("{}", "-".repeat(60));
    for task in store.pending() {
        print_row(config, task);
    }

    println!();
    println!("Done ({}):", store.completed().len());
    println!("{:<24} {:<10} {:<18} COMPLETED", "TASK", "TYPE", "DUE");
    println!("{}", "-".repeat(78));
    for task in store.completed() {
        print_row(config, task);
    }
}

fn print_row(config: &Config, task: &Task) {
    match task.completed_at {
        Some(at) => println!(
            "{:<24} {:<10} {:<18} {}",
            task.name,
            task.task_type,
            config.format_time(task.due_at),
            config.format_time(at)
        ),
        None => println!(
            "{:<24} {:<10} {}",
            task.name,
            task.task_type,
            config.format_time(task.due_at)
        ),
    }
}

fn parse_line(line: &str) -> Result<SessionCommand> {
    let words = split_words(line)?;
    let parsed = SessionLine::try_parse_from(words)
        .map_err(|e| anyhow!("{}", e.render().to_string().trim_end()))?;
    Ok(parsed.command)
}

/// Splits a line on whitespace; double quotes group words
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if in_quotes {
        bail!("unterminated quote");
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}
