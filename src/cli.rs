use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::{
    catalog::Subject,
    session::Session,
    store::{format_rating, DataFile, MAX_RATING, MIN_RATING},
    tui::theme::ThemeKind,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "sat-planner",
    about = "SAT study planner: rate topics and keep notes",
    version
)]
pub struct Cli {
    /// Data file; defaults to $SAT_PLANNER_DATA or ./sat_study_data.json
    #[arg(long, short = 'f', global = true)]
    pub file: Option<PathBuf>,

    /// Settings file; defaults to ./sat-planner.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Colour theme, overrides the settings file
    #[arg(long, value_enum)]
    pub theme: Option<ThemeKind>,

    /// Write logs here while the interactive UI is running
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print a subject tree with ratings
    Tree {
        #[arg(value_enum)]
        subject: Option<Subject>,
    },
    /// Print the rating and note stored for a topic path
    Show { path: String },
    /// Rate a topic path from 1 to 10
    Rate {
        path: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Save a note for a topic path
    Note { path: String, text: String },
    /// Append a topic to a subject
    AddTopic {
        #[arg(value_enum)]
        subject: Subject,
        name: String,
    },
    /// Append a subtopic to an existing topic
    AddSubtopic {
        #[arg(value_enum)]
        subject: Subject,
        topic: String,
        name: String,
    },
}

impl Command {
    fn mutates(&self) -> bool {
        !matches!(self, Command::Tree { .. } | Command::Show { .. })
    }
}

fn non_empty<'a>(name: &'a str, what: &str) -> Result<&'a str> {
    let name = name.trim();
    if name.is_empty() {
        bail!("please enter a {} name", what);
    }
    Ok(name)
}

/// Runs one subcommand against the data file, saving after any change.
pub fn run_command(file: DataFile, command: Command) -> Result<()> {
    let (mut session, load_err) = Session::open(file);
    if let Some(e) = load_err {
        if command.mutates() {
            bail!("{e}; refusing to overwrite it");
        }
        eprintln!("warning: {e}; showing empty study data");
    }

    match command {
        Command::Tree { subject } => {
            let subjects = match subject {
                Some(s) => vec![s],
                None => Subject::ALL.to_vec(),
            };
            for subject in subjects {
                println!("{}", subject.tab_title());
                for row in session.catalog().enumerate(subject) {
                    let rating = session.store().rating(&row.path(subject));
                    println!(
                        "{}{}  {}",
                        "  ".repeat(row.depth() + 1),
                        row.label(),
                        format_rating(rating)
                    );
                }
            }
            return Ok(());
        }
        Command::Show { path } => {
            let store = session.store();
            println!("Rating: {}", format_rating(store.rating(&path)));
            println!("Notes: {}", store.note(&path));
            return Ok(());
        }
        Command::Rate { path, value } => {
            if !session.catalog().contains_path(&path) {
                bail!("unknown topic path: {path}");
            }
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                bail!("rating must be between {MIN_RATING} and {MAX_RATING}, got {value}");
            }
            if let Some(stored) = session.store_mut().set_rating(&path, value) {
                println!("{path}: {stored:.1}");
            }
        }
        Command::Note { path, text } => {
            if !session.store_mut().set_note(&path, &text) {
                println!("Nothing saved: note is blank");
                return Ok(());
            }
            println!("Notes saved for {path}");
        }
        Command::AddTopic { subject, name } => {
            let name = non_empty(&name, "topic")?;
            let replaced = session.catalog_mut().add_topic(subject, name).is_some();
            if replaced {
                println!("Replaced topic \"{name}\" in {}", subject.label());
            } else {
                println!("Added topic \"{name}\" to {}", subject.label());
            }
        }
        Command::AddSubtopic {
            subject,
            topic,
            name,
        } => {
            let name = non_empty(&name, "subtopic")?;
            if !session.catalog_mut().add_subtopic(subject, &topic, name) {
                bail!("no topic \"{topic}\" in {}", subject.label());
            }
            println!("Added subtopic \"{name}\" to {} - {topic}", subject.label());
        }
    }
    session.save()?;
    Ok(())
}
