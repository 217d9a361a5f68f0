//! Plain-text rendering of records for the terminal.

use std::fmt::Write as _;

use schoolbook_core::{
  identity::{Identity, StaticDirectory},
  record::{Absence, Grade, ScheduleEntry},
};

pub fn schedule(entries: &[ScheduleEntry]) -> String {
  if entries.is_empty() {
    return "The schedule is empty.".to_owned();
  }
  let mut out = String::new();
  for e in entries {
    let _ = writeln!(out, "{:<14} {:<10} {:<12} {} ({})", e.id, e.day, e.time, e.name, e.room);
  }
  out
}

/// Grades as seen by `viewer`. Teachers also see whose grade it is.
pub fn grades(grades: &[&Grade], viewer: &Identity, directory: &StaticDirectory) -> String {
  if grades.is_empty() {
    return "No grades recorded yet.".to_owned();
  }
  let mut out = String::new();
  for g in grades {
    let _ = write!(out, "{:<14} {}  {}: {}  {}", g.id, g.date, g.subject, g.value, g.description);
    if viewer.is_teacher() {
      let _ = write!(out, "  • {}", student_name(directory, &g.student_id));
    }
    out.push('\n');
  }
  out
}

/// Absences as seen by `viewer`. Teachers also see whose absence it is.
pub fn absences(absences: &[&Absence], viewer: &Identity, directory: &StaticDirectory) -> String {
  if absences.is_empty() {
    return "No absences recorded.".to_owned();
  }
  let mut out = String::new();
  for a in absences {
    let status = if a.justified { "justified" } else { "unjustified" };
    let _ = write!(out, "{:<14} {}  {}: {}  [{status}]", a.id, a.date, a.subject, a.reason);
    if viewer.is_teacher() {
      let _ = write!(out, "  • {}", student_name(directory, &a.student_id));
    }
    out.push('\n');
  }
  out
}

/// Display name for `id`, or the raw id for students the directory doesn't
/// know.
fn student_name<'a>(directory: &'a StaticDirectory, id: &'a str) -> &'a str {
  directory.get(id).map_or(id, |i| i.display_name.as_str())
}
