pub mod atom;
pub mod login;

pub use atom::*;
pub use login::*;

use crate::error::*;
use async_trait::async_trait;

/// Storage service consumed by the detail presenter.
///
/// Every operation may fail; callers decide whether a failure is fatal.
#[async_trait]
pub trait LoginStore: Send + Sync {
    /// Whether any copy of this login has been synced to another device.
    async fn has_synced_logins(&self, id: &LoginId) -> Result<bool>;

    async fn get(&self, id: &LoginId) -> Result<Option<LoginRecord>>;

    /// Replaces the stored record having the same id.
    /// Fails with [`Error::NotFound`] if no such record exists.
    async fn update(&self, login: &LoginRecord) -> Result<()>;

    async fn delete(&self, id: &LoginId) -> Result<()>;

    async fn add(&self, login: LoginRecord) -> Result<LoginId>;
}
