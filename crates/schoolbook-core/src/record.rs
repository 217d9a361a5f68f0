//! Record types: the three collections a teacher maintains.
//!
//! Each collection is persisted and replaced as a whole; records themselves
//! carry no behaviour beyond exposing their id (and, for owned records, the
//! student they belong to).

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
  seed,
  storage::{ABSENCES_KEY, GRADES_KEY, SCHEDULE_KEY},
};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A member of a persisted collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
  /// Input to [`crate::collection::Collection::create`]; everything but the id.
  type Draft;

  /// Storage key the whole collection lives under.
  const STORAGE_KEY: &'static str;

  fn id(&self) -> &str;

  /// Build a record from a draft and a freshly generated id.
  fn from_draft(id: String, draft: Self::Draft) -> Self;

  /// Records installed the first time the collection is read from empty
  /// storage.
  fn seed() -> Vec<Self>;
}

/// A record that belongs to one student.
pub trait Owned: Record {
  fn student_id(&self) -> &str;
}

// ─── Schedule ────────────────────────────────────────────────────────────────

/// One slot of the weekly timetable. Shared by every viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
  pub id:   String,
  /// Subject taught in this slot.
  pub name: String,
  pub room: String,
  /// Free-form time range, e.g. `08:00-08:45`.
  pub time: String,
  pub day:  String,
}

/// Input to create a [`ScheduleEntry`].
#[derive(Debug, Clone)]
pub struct NewScheduleEntry {
  pub name: String,
  pub room: String,
  pub time: String,
  pub day:  String,
}

impl Record for ScheduleEntry {
  type Draft = NewScheduleEntry;

  const STORAGE_KEY: &'static str = SCHEDULE_KEY;

  fn id(&self) -> &str { &self.id }

  fn from_draft(id: String, draft: NewScheduleEntry) -> Self {
    Self {
      id,
      name: draft.name,
      room: draft.room,
      time: draft.time,
      day: draft.day,
    }
  }

  fn seed() -> Vec<Self> { seed::schedule() }
}

// ─── Grades ──────────────────────────────────────────────────────────────────

/// A mark awarded to a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
  pub id:          String,
  pub student_id:  String,
  pub subject:     String,
  /// Conventionally 1 (fail) to 5 (excellent); not range-checked here.
  #[serde(rename = "grade")]
  pub value:       u8,
  /// As entered; ISO `YYYY-MM-DD` when written by this crate.
  pub date:        String,
  pub description: String,
}

/// Input to create a [`Grade`].
#[derive(Debug, Clone)]
pub struct NewGrade {
  pub student_id:  String,
  pub subject:     String,
  pub value:       u8,
  pub date:        String,
  pub description: String,
}

impl Record for Grade {
  type Draft = NewGrade;

  const STORAGE_KEY: &'static str = GRADES_KEY;

  fn id(&self) -> &str { &self.id }

  fn from_draft(id: String, draft: NewGrade) -> Self {
    Self {
      id,
      student_id: draft.student_id,
      subject: draft.subject,
      value: draft.value,
      date: draft.date,
      description: draft.description,
    }
  }

  fn seed() -> Vec<Self> { seed::grades() }
}

impl Owned for Grade {
  fn student_id(&self) -> &str { &self.student_id }
}

// ─── Absences ────────────────────────────────────────────────────────────────

/// A missed lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
  pub id:         String,
  pub student_id: String,
  pub date:       String,
  pub subject:    String,
  pub reason:     String,
  pub justified:  bool,
}

/// Input to create an [`Absence`].
#[derive(Debug, Clone)]
pub struct NewAbsence {
  pub student_id: String,
  pub date:       String,
  pub subject:    String,
  pub reason:     String,
  pub justified:  bool,
}

impl Record for Absence {
  type Draft = NewAbsence;

  const STORAGE_KEY: &'static str = ABSENCES_KEY;

  fn id(&self) -> &str { &self.id }

  fn from_draft(id: String, draft: NewAbsence) -> Self {
    Self {
      id,
      student_id: draft.student_id,
      date: draft.date,
      subject: draft.subject,
      reason: draft.reason,
      justified: draft.justified,
    }
  }

  fn seed() -> Vec<Self> { seed::absences() }
}

impl Owned for Absence {
  fn student_id(&self) -> &str { &self.student_id }
}
