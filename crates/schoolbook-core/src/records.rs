//! [`RecordStore`]: the three collections behind one storage handle.

use crate::{
  collection::Collection,
  error::Result,
  record::{Absence, Grade, ScheduleEntry},
  storage::KeyValueStore,
};

/// Schedule, grades and absences, each loaded (or seeded) independently.
pub struct RecordStore<S> {
  schedule: Collection<ScheduleEntry, S>,
  grades:   Collection<Grade, S>,
  absences: Collection<Absence, S>,
}

impl<S: KeyValueStore + Clone> RecordStore<S> {
  /// Load all three collections, seeding whichever are absent.
  pub fn load(storage: S) -> Self {
    Self {
      schedule: Collection::load(storage.clone()),
      grades:   Collection::load(storage.clone()),
      absences: Collection::load(storage),
    }
  }
}

impl<S: KeyValueStore> RecordStore<S> {
  pub fn schedule(&self) -> &[ScheduleEntry] { self.schedule.records() }

  pub fn grades(&self) -> &[Grade] { self.grades.records() }

  pub fn absences(&self) -> &[Absence] { self.absences.records() }

  pub fn save_schedule(&mut self, next: Vec<ScheduleEntry>) -> Result<()> {
    self.schedule.save(next)
  }

  pub fn save_grades(&mut self, next: Vec<Grade>) -> Result<()> { self.grades.save(next) }

  pub fn save_absences(&mut self, next: Vec<Absence>) -> Result<()> {
    self.absences.save(next)
  }

  /// Direct access for create/edit/delete on the schedule.
  pub fn schedule_mut(&mut self) -> &mut Collection<ScheduleEntry, S> { &mut self.schedule }

  pub fn grades_mut(&mut self) -> &mut Collection<Grade, S> { &mut self.grades }

  pub fn absences_mut(&mut self) -> &mut Collection<Absence, S> { &mut self.absences }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    error::Error,
    record::{NewAbsence, Record},
    storage::{ABSENCES_KEY, GRADES_KEY, KeyValueStore, MemoryStore, SCHEDULE_KEY},
  };

  /// Shares a [`MemoryStore`] but refuses writes to one key.
  #[derive(Debug, Clone)]
  struct FailingKey {
    inner: MemoryStore,
    key:   &'static str,
  }

  #[derive(Debug, thiserror::Error)]
  #[error("write to {0} refused")]
  struct Refused(String);

  impl KeyValueStore for FailingKey {
    type Error = Refused;

    fn get(&self, key: &str) -> Result<Option<String>, Refused> {
      Ok(self.inner.get(key).unwrap_or_default())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Refused> {
      if key == self.key {
        return Err(Refused(key.to_owned()));
      }
      self.inner.set(key, value).map_err(|e| match e {})
    }

    fn remove(&self, key: &str) -> Result<(), Refused> {
      self.inner.remove(key).map_err(|e| match e {})
    }
  }

  #[test]
  fn first_load_seeds_all_three() {
    let storage = MemoryStore::new();
    let store = RecordStore::load(storage.clone());

    assert_eq!(store.schedule(), ScheduleEntry::seed().as_slice());
    assert_eq!(store.grades(), Grade::seed().as_slice());
    assert_eq!(store.absences(), Absence::seed().as_slice());
    for key in [SCHEDULE_KEY, GRADES_KEY, ABSENCES_KEY] {
      assert!(storage.get(key).unwrap().is_some(), "{key} not persisted");
    }
  }

  #[test]
  fn collections_are_independent() {
    let storage = MemoryStore::new();
    let mut store = RecordStore::load(storage.clone());
    let grades_before = storage.get(GRADES_KEY).unwrap();

    store.save_schedule(Vec::new()).unwrap();
    store
      .absences_mut()
      .create(NewAbsence {
        student_id: "2".into(),
        date:       "2025-04-02".into(),
        subject:    "Fizika".into(),
        reason:     "Orvosi vizsgálat".into(),
        justified:  false,
      })
      .unwrap();

    assert_eq!(storage.get(GRADES_KEY).unwrap(), grades_before);

    let reloaded = RecordStore::load(storage);
    assert!(reloaded.schedule().is_empty());
    assert_eq!(reloaded.grades(), Grade::seed().as_slice());
    assert_eq!(reloaded.absences().len(), 2);
  }

  #[test]
  fn failed_save_leaves_other_collections_alone() {
    let inner = MemoryStore::new();
    RecordStore::load(inner.clone());
    let snapshot = |key| inner.get(key).unwrap();
    let (schedule, grades, absences) =
      (snapshot(SCHEDULE_KEY), snapshot(GRADES_KEY), snapshot(ABSENCES_KEY));

    let mut store = RecordStore::load(FailingKey { inner: inner.clone(), key: GRADES_KEY });
    let err = store.save_grades(Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Storage(_)));

    assert_eq!(store.grades(), Grade::seed().as_slice());
    assert_eq!(snapshot(SCHEDULE_KEY), schedule);
    assert_eq!(snapshot(GRADES_KEY), grades);
    assert_eq!(snapshot(ABSENCES_KEY), absences);
  }

  #[test]
  fn save_then_load_round_trips() {
    let storage = MemoryStore::new();
    let mut store = RecordStore::load(storage.clone());

    let mut grades = store.grades().to_vec();
    grades.swap(0, 2);
    grades.truncate(2);
    store.save_grades(grades.clone()).unwrap();

    assert_eq!(store.grades(), grades.as_slice());
    assert_eq!(RecordStore::load(storage).grades(), grades.as_slice());
  }
}
