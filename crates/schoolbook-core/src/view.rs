//! Read-only views of a collection as seen by a particular identity.

use crate::{
  identity::{Identity, Role},
  record::Owned,
};

/// Records belonging to `student_id`, in stored order.
pub fn owned_by<'a, T: Owned>(
  records: &'a [T],
  student_id: &str,
) -> impl Iterator<Item = &'a T> {
  records.iter().filter(move |r| r.student_id() == student_id)
}

/// What `viewer` may see of an owned collection: everything for a teacher,
/// only their own records for a student.
pub fn visible_to<'a, T: Owned>(records: &'a [T], viewer: &Identity) -> Vec<&'a T> {
  match viewer.role {
    Role::Teacher => records.iter().collect(),
    Role::Student => owned_by(records, &viewer.id).collect(),
  }
}
