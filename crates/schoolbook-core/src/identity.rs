//! Identities and the directory that vouches for them.
//!
//! An identity is a signed-in principal. Its role decides which dashboard the
//! front end shows and whether records are scoped to the identity's own id.

use serde::{Deserialize, Serialize};

// ─── Role ────────────────────────────────────────────────────────────────────

/// What an identity is allowed to see and do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
  /// Maintains the schedule, grades and absences.
  #[serde(rename = "tanar")]
  Teacher,
  /// Reads the schedule and their own grades and absences.
  #[serde(rename = "diak")]
  Student,
}

impl std::fmt::Display for Role {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Role::Teacher => "teacher",
      Role::Student => "student",
    })
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// A known principal. Persisted verbatim as the session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub id:           String,
  pub username:     String,
  pub password:     String,
  pub role:         Role,
  #[serde(rename = "name")]
  pub display_name: String,
}

impl Identity {
  pub fn is_teacher(&self) -> bool { self.role == Role::Teacher }

  pub fn is_student(&self) -> bool { self.role == Role::Student }
}

// ─── Verifier ────────────────────────────────────────────────────────────────

/// Capability to turn a username/password pair into an [`Identity`].
///
/// Implementations must not reveal *why* verification failed; callers get
/// `None` for an unknown user and for a wrong password alike.
pub trait CredentialVerifier {
  fn verify(&self, username: &str, password: &str) -> Option<Identity>;
}

/// A fixed table of identities compared in plain text.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
  identities: Vec<Identity>,
}

impl StaticDirectory {
  pub fn new(identities: Vec<Identity>) -> Self { Self { identities } }

  /// The two-identity directory of the reference deployment.
  pub fn reference() -> Self {
    Self::new(vec![
      Identity {
        id:           "1".into(),
        username:     "TanárÚr".into(),
        password:     "090807".into(),
        role:         Role::Teacher,
        display_name: "TanárÚr".into(),
      },
      Identity {
        id:           "2".into(),
        username:     "B.F.Andi".into(),
        password:     "bazfuandi05".into(),
        role:         Role::Student,
        display_name: "B.F.Andi".into(),
      },
    ])
  }

  /// Look an identity up by id.
  pub fn get(&self, id: &str) -> Option<&Identity> {
    self.identities.iter().find(|i| i.id == id)
  }

  /// All identities with [`Role::Student`], in directory order.
  pub fn students(&self) -> impl Iterator<Item = &Identity> {
    self.identities.iter().filter(|i| i.is_student())
  }

  pub fn identities(&self) -> &[Identity] { &self.identities }
}

impl Default for StaticDirectory {
  fn default() -> Self { Self::reference() }
}

impl CredentialVerifier for StaticDirectory {
  fn verify(&self, username: &str, password: &str) -> Option<Identity> {
    self
      .identities
      .iter()
      .find(|i| i.username == username && i.password == password)
      .cloned()
  }
}
