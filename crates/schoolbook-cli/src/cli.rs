//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::forms::{AbsenceFields, GradeFields, ScheduleFields};

#[derive(Parser, Debug)]
#[command(name = "schoolbook", version, about = "Class schedule, grades and absences")]
pub struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "schoolbook.toml")]
  pub config: PathBuf,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Sign in; the session is kept until `logout`.
  Login {
    username: String,
    /// Read from stdin when omitted.
    #[arg(long, env = "SCHOOLBOOK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
  },
  /// End the current session.
  Logout,
  /// Show who is signed in.
  Whoami,
  /// The weekly class schedule.
  #[command(subcommand)]
  Schedule(ScheduleCommand),
  /// Grades (students only see their own).
  #[command(subcommand)]
  Grades(GradeCommand),
  /// Absences (students only see their own).
  #[command(subcommand)]
  Absences(AbsenceCommand),
}

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
  /// List entries.
  List {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
  },
  /// Add an entry (teacher only).
  Add {
    #[command(flatten)]
    fields: ScheduleFields,
  },
  /// Change fields of an existing entry (teacher only).
  Edit {
    id: String,
    #[command(flatten)]
    fields: ScheduleFields,
  },
  /// Remove an entry (teacher only).
  Delete {
    id:  String,
    /// Do not ask for confirmation.
    #[arg(short, long)]
    yes: bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum GradeCommand {
  /// List grades visible to the signed-in identity.
  List {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
  },
  /// Give a student a grade (teacher only).
  Add {
    /// Student id; may be omitted when the directory has a single student.
    #[arg(long)]
    student: Option<String>,
    #[command(flatten)]
    fields:  GradeFields,
  },
  /// Change fields of an existing grade (teacher only).
  Edit {
    id: String,
    #[command(flatten)]
    fields: GradeFields,
  },
  /// Remove a grade (teacher only).
  Delete {
    id:  String,
    /// Do not ask for confirmation.
    #[arg(short, long)]
    yes: bool,
  },
}

#[derive(Subcommand, Debug)]
pub enum AbsenceCommand {
  /// List absences visible to the signed-in identity.
  List {
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
  },
  /// Record an absence for a student (teacher only).
  Add {
    /// Student id; may be omitted when the directory has a single student.
    #[arg(long)]
    student: Option<String>,
    #[command(flatten)]
    fields:  AbsenceFields,
  },
  /// Change fields of an existing absence (teacher only).
  Edit {
    id: String,
    #[command(flatten)]
    fields: AbsenceFields,
  },
  /// Remove an absence (teacher only).
  Delete {
    id:  String,
    /// Do not ask for confirmation.
    #[arg(short, long)]
    yes: bool,
  },
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn command_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn parses_grade_add() {
    let cli = Cli::try_parse_from([
      "schoolbook", "grades", "add", "--subject", "Kémia", "--value", "4",
      "--description", "Dolgozat", "--date", "2025-03-04",
    ])
    .unwrap();
    let Command::Grades(GradeCommand::Add { student, fields }) = cli.command else {
      panic!("wrong command");
    };
    assert!(student.is_none());
    assert_eq!(fields.value, Some(4));
    assert_eq!(fields.date.unwrap().to_string(), "2025-03-04");
  }

  #[test]
  fn grade_value_out_of_range_is_rejected() {
    let parsed = Cli::try_parse_from([
      "schoolbook", "grades", "add", "--subject", "Kémia", "--value", "6",
      "--description", "Dolgozat",
    ]);
    assert!(parsed.is_err());
  }

  #[test]
  fn parses_absence_justified_flag_value() {
    let cli = Cli::try_parse_from([
      "schoolbook", "absences", "edit", "1", "--justified", "false",
    ])
    .unwrap();
    let Command::Absences(AbsenceCommand::Edit { id, fields }) = cli.command else {
      panic!("wrong command");
    };
    assert_eq!(id, "1");
    assert_eq!(fields.justified, Some(false));
  }
}
