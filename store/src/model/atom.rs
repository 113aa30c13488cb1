use rand::{distributions::Alphanumeric, Rng as _};
use serde::{Deserialize, Serialize};

pub use url::Url;

pub type LocalDateTime = chrono::DateTime<chrono::Local>;

/// Opaque identifier of a stored login.
/// (e.g.) "n4bQgYhMfWWa"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginId(pub(crate) String);

impl LoginId {
    pub const GENERATED_LEN: usize = 12;

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        let id = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::GENERATED_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }
}

impl std::fmt::Display for LoginId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LoginId {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl From<&str> for LoginId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
