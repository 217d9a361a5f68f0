//! Command dispatch: role checks, scoped views and the upsert policy on top
//! of the core managers.
//!
//! Every handler returns the text to print so the binary stays a thin shell
//! around stdin/stdout.

use std::io;

use anyhow::{Context as _, Result, bail, ensure};
use chrono::Local;
use schoolbook_core::{
  auth::AuthManager,
  collection::Collection,
  identity::{Identity, StaticDirectory},
  record::Record,
  records::RecordStore,
  storage::KeyValueStore,
  view::visible_to,
};
use serde::Serialize;
use tracing::warn;

use crate::{
  cli::{AbsenceCommand, GradeCommand, ScheduleCommand},
  forms::FormError,
  render,
};

// ─── App ──────────────────────────────────────────────────────────────────────

/// One invocation's worth of state: the directory, the session and a handle
/// on storage from which collections are loaded on demand.
pub struct App<S> {
  directory: StaticDirectory,
  storage:   S,
  auth:      AuthManager<StaticDirectory, S>,
}

impl<S: KeyValueStore + Clone> App<S> {
  /// Restore whatever session `storage` holds.
  pub fn new(directory: StaticDirectory, storage: S) -> Self {
    let auth = AuthManager::new(directory.clone(), storage.clone());
    Self { directory, storage, auth }
  }

  // ── Session ───────────────────────────────────────────────────────────────

  pub fn login(&mut self, username: &str, password: &str) -> Result<String> {
    let who = self.auth.sign_in(username, password)?;
    Ok(format!("Signed in as {} ({}).", who.display_name, who.role))
  }

  pub fn logout(&mut self) -> Result<String> {
    self.auth.sign_out()?;
    Ok("Signed out.".to_owned())
  }

  pub fn whoami(&self) -> String {
    match self.auth.current() {
      Some(who) => format!("{} ({}, id {})", who.display_name, who.role, who.id),
      None => "Not signed in.".to_owned(),
    }
  }

  fn viewer(&self) -> Result<&Identity> {
    self
      .auth
      .current()
      .context("not signed in; run `schoolbook login` first")
  }

  fn require_teacher(&self) -> Result<()> {
    ensure!(self.viewer()?.is_teacher(), "only a teacher can change records");
    Ok(())
  }

  fn records(&self) -> RecordStore<S> { RecordStore::load(self.storage.clone()) }

  /// The student a new grade or absence is recorded for.
  fn student_for(&self, requested: Option<String>) -> Result<String> {
    if let Some(id) = requested {
      if !self.directory.get(&id).is_some_and(Identity::is_student) {
        warn!(student = %id, "recording for an id that is not a known student");
      }
      return Ok(id);
    }

    let mut students = self.directory.students();
    match (students.next(), students.next()) {
      (Some(only), None) => Ok(only.id.clone()),
      (None, _) => bail!("the identity directory has no students"),
      _ => bail!("several students are known; pass --student <id>"),
    }
  }

  // ── Collections ───────────────────────────────────────────────────────────

  pub fn schedule(
    &self,
    cmd: ScheduleCommand,
    confirm: impl FnOnce(&str) -> io::Result<bool>,
  ) -> Result<String> {
    self.viewer()?;
    let mut records = self.records();

    match cmd {
      ScheduleCommand::List { json: true } => to_json(records.schedule()),
      ScheduleCommand::List { json: false } => Ok(render::schedule(records.schedule())),
      ScheduleCommand::Add { fields } => {
        self.require_teacher()?;
        let entry = records.schedule_mut().create(fields.into_draft()?)?;
        Ok(format!("Added schedule entry {}.", entry.id))
      }
      ScheduleCommand::Edit { id, fields } => {
        self.require_teacher()?;
        edit(records.schedule_mut(), "schedule entry", &id, |cur| fields.apply(cur))
      }
      ScheduleCommand::Delete { id, yes } => {
        self.require_teacher()?;
        delete(records.schedule_mut(), "schedule entry", &id, yes, confirm)
      }
    }
  }

  pub fn grades(
    &self,
    cmd: GradeCommand,
    confirm: impl FnOnce(&str) -> io::Result<bool>,
  ) -> Result<String> {
    let viewer = self.viewer()?;
    let mut records = self.records();

    match cmd {
      GradeCommand::List { json } => {
        let visible = visible_to(records.grades(), viewer);
        if json {
          to_json(&visible)
        } else {
          Ok(render::grades(&visible, viewer, &self.directory))
        }
      }
      GradeCommand::Add { student, fields } => {
        self.require_teacher()?;
        let student_id = self.student_for(student)?;
        let draft = fields.into_draft(student_id, today())?;
        let grade = records.grades_mut().create(draft)?;
        Ok(format!("Added grade {}.", grade.id))
      }
      GradeCommand::Edit { id, fields } => {
        self.require_teacher()?;
        edit(records.grades_mut(), "grade", &id, |cur| fields.apply(cur))
      }
      GradeCommand::Delete { id, yes } => {
        self.require_teacher()?;
        delete(records.grades_mut(), "grade", &id, yes, confirm)
      }
    }
  }

  pub fn absences(
    &self,
    cmd: AbsenceCommand,
    confirm: impl FnOnce(&str) -> io::Result<bool>,
  ) -> Result<String> {
    let viewer = self.viewer()?;
    let mut records = self.records();

    match cmd {
      AbsenceCommand::List { json } => {
        let visible = visible_to(records.absences(), viewer);
        if json {
          to_json(&visible)
        } else {
          Ok(render::absences(&visible, viewer, &self.directory))
        }
      }
      AbsenceCommand::Add { student, fields } => {
        self.require_teacher()?;
        let student_id = self.student_for(student)?;
        let draft = fields.into_draft(student_id, today())?;
        let absence = records.absences_mut().create(draft)?;
        Ok(format!("Added absence {}.", absence.id))
      }
      AbsenceCommand::Edit { id, fields } => {
        self.require_teacher()?;
        edit(records.absences_mut(), "absence", &id, |cur| fields.apply(cur))
      }
      AbsenceCommand::Delete { id, yes } => {
        self.require_teacher()?;
        delete(records.absences_mut(), "absence", &id, yes, confirm)
      }
    }
  }
}

// ─── Shared handlers ──────────────────────────────────────────────────────────

fn today() -> chrono::NaiveDate { Local::now().date_naive() }

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
  serde_json::to_string_pretty(value).context("serialising records")
}

/// Pre-fill from the stored record, apply the form, save.
fn edit<T: Record, S: KeyValueStore>(
  collection: &mut Collection<T, S>,
  label: &str,
  id: &str,
  apply: impl FnOnce(&T) -> Result<T, FormError>,
) -> Result<String> {
  let Some(current) = collection.get(id) else {
    return Ok(format!("No {label} with id {id}; nothing changed."));
  };
  let next = apply(current)?;
  collection.edit(next)?;
  Ok(format!("Updated {label} {id}."))
}

/// Ask first unless `yes`, then remove.
fn delete<T: Record, S: KeyValueStore>(
  collection: &mut Collection<T, S>,
  label: &str,
  id: &str,
  yes: bool,
  confirm: impl FnOnce(&str) -> io::Result<bool>,
) -> Result<String> {
  if collection.get(id).is_none() {
    return Ok(format!("No {label} with id {id}; nothing changed."));
  }
  if !yes && !confirm(&format!("Delete {label} {id}?")).context("reading confirmation")? {
    return Ok("Cancelled.".to_owned());
  }
  collection.delete(id)?;
  Ok(format!("Deleted {label} {id}."))
}
