//! Default records installed into empty storage.

use crate::record::{Absence, Grade, ScheduleEntry};

const JAN_10: &str = "2025-01-10";
const JAN_12: &str = "2025-01-12";
const JAN_14: &str = "2025-01-14";
const JAN_15: &str = "2025-01-15";

/// Id of the student the seeded grades and absences belong to.
const SEED_STUDENT: &str = "2";

pub fn schedule() -> Vec<ScheduleEntry> {
  [
    ("1", "Matematika", "A-101", "08:00-08:45", "Hétfő"),
    ("2", "Magyar irodalom", "B-203", "08:55-09:40", "Hétfő"),
    ("3", "Történelem", "A-105", "10:00-10:45", "Kedd"),
    ("4", "Angol nyelv", "C-301", "08:00-08:45", "Szerda"),
    ("5", "Fizika", "D-102", "10:00-10:45", "Csütörtök"),
  ]
  .into_iter()
  .map(|(id, name, room, time, day)| ScheduleEntry {
    id:   id.into(),
    name: name.into(),
    room: room.into(),
    time: time.into(),
    day:  day.into(),
  })
  .collect()
}

pub fn grades() -> Vec<Grade> {
  [
    ("1", "Matematika", 4, JAN_10, "Dolgozat"),
    ("2", "Magyar irodalom", 5, JAN_12, "Szóbeli felelet"),
    ("3", "Történelem", 3, JAN_15, "Témazáró"),
  ]
  .into_iter()
  .map(|(id, subject, value, date, description)| Grade {
    id: id.into(),
    student_id: SEED_STUDENT.into(),
    subject: subject.into(),
    value,
    date: date.into(),
    description: description.into(),
  })
  .collect()
}

pub fn absences() -> Vec<Absence> {
  vec![Absence {
    id:         "1".into(),
    student_id: SEED_STUDENT.into(),
    date:       JAN_14.into(),
    subject:    "Angol nyelv".into(),
    reason:     "Betegség".into(),
    justified:  true,
  }]
}
