//! Form input: the fields a user can supply on the command line, presence
//! checks, and conversion into drafts or edited records.
//!
//! Records reaching the core are always complete; a missing or blank
//! required field stops here.

use chrono::NaiveDate;
use clap::Args;
use schoolbook_core::record::{
  Absence, Grade, NewAbsence, NewGrade, NewScheduleEntry, ScheduleEntry,
};
use thiserror::Error;

/// Grade given when none is specified.
const DEFAULT_GRADE: u8 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
  #[error("missing required field: {0}")]
  Missing(&'static str),
}

/// `Some(value)` with surrounding whitespace removed, if anything is left.
fn present(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn required(field: &'static str, value: Option<String>) -> Result<String, FormError> {
  present(value).ok_or(FormError::Missing(field))
}

/// Keep `current` unless a non-blank replacement was supplied. A supplied but
/// blank replacement clears a required field, which is an error.
fn overridden(
  field: &'static str,
  current: &str,
  value: Option<String>,
) -> Result<String, FormError> {
  match value {
    None => Ok(current.to_owned()),
    Some(v) => required(field, Some(v)),
  }
}

/// The supplied date in ISO form, or the stored text unchanged.
fn iso_or(date: Option<NaiveDate>, current: &str) -> String {
  date.map_or_else(|| current.to_owned(), |d| d.to_string())
}

// ─── Schedule ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct ScheduleFields {
  /// Subject taught in the slot.
  #[arg(long)]
  pub name: Option<String>,
  #[arg(long)]
  pub room: Option<String>,
  /// Time range, e.g. 08:00-08:45.
  #[arg(long)]
  pub time: Option<String>,
  /// Day of the week, e.g. Hétfő.
  #[arg(long)]
  pub day:  Option<String>,
}

impl ScheduleFields {
  pub fn into_draft(self) -> Result<NewScheduleEntry, FormError> {
    Ok(NewScheduleEntry {
      name: required("name", self.name)?,
      room: required("room", self.room)?,
      time: required("time", self.time)?,
      day:  required("day", self.day)?,
    })
  }

  pub fn apply(self, current: &ScheduleEntry) -> Result<ScheduleEntry, FormError> {
    Ok(ScheduleEntry {
      id:   current.id.clone(),
      name: overridden("name", &current.name, self.name)?,
      room: overridden("room", &current.room, self.room)?,
      time: overridden("time", &current.time, self.time)?,
      day:  overridden("day", &current.day, self.day)?,
    })
  }
}

// ─── Grades ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct GradeFields {
  #[arg(long)]
  pub subject:     Option<String>,
  /// The mark, 1 to 5 [default on add: 5].
  #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
  pub value:       Option<u8>,
  /// What was assessed, e.g. Dolgozat.
  #[arg(long)]
  pub description: Option<String>,
  /// YYYY-MM-DD [default on add: today].
  #[arg(long)]
  pub date:        Option<NaiveDate>,
}

impl GradeFields {
  pub fn into_draft(self, student_id: String, today: NaiveDate) -> Result<NewGrade, FormError> {
    Ok(NewGrade {
      student_id,
      subject: required("subject", self.subject)?,
      value: self.value.unwrap_or(DEFAULT_GRADE),
      date: self.date.unwrap_or(today).to_string(),
      description: required("description", self.description)?,
    })
  }

  pub fn apply(self, current: &Grade) -> Result<Grade, FormError> {
    Ok(Grade {
      id:          current.id.clone(),
      student_id:  current.student_id.clone(),
      subject:     overridden("subject", &current.subject, self.subject)?,
      value:       self.value.unwrap_or(current.value),
      date:        iso_or(self.date, &current.date),
      description: overridden("description", &current.description, self.description)?,
    })
  }
}

// ─── Absences ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Args)]
pub struct AbsenceFields {
  #[arg(long)]
  pub subject:   Option<String>,
  #[arg(long)]
  pub reason:    Option<String>,
  /// YYYY-MM-DD [default on add: today].
  #[arg(long)]
  pub date:      Option<NaiveDate>,
  /// Whether the absence is excused [default on add: true].
  #[arg(long)]
  pub justified: Option<bool>,
}

impl AbsenceFields {
  pub fn into_draft(self, student_id: String, today: NaiveDate) -> Result<NewAbsence, FormError> {
    Ok(NewAbsence {
      student_id,
      date: self.date.unwrap_or(today).to_string(),
      subject: required("subject", self.subject)?,
      reason: required("reason", self.reason)?,
      justified: self.justified.unwrap_or(true),
    })
  }

  pub fn apply(self, current: &Absence) -> Result<Absence, FormError> {
    Ok(Absence {
      id:         current.id.clone(),
      student_id: current.student_id.clone(),
      date:       iso_or(self.date, &current.date),
      subject:    overridden("subject", &current.subject, self.subject)?,
      reason:     overridden("reason", &current.reason, self.reason)?,
      justified:  self.justified.unwrap_or(current.justified),
    })
  }
}
