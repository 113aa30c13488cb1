use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use logindetail_store::{Error, LoginId, LoginRecord, LoginStore, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::util::JsonFileDriver;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredLogin {
    #[serde(flatten)]
    login: LoginRecord,
    #[serde(default)]
    synced: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct LoginsFile {
    #[serde(default)]
    logins: Vec<StoredLogin>,
}

impl LoginsFile {
    fn find(&self, id: &LoginId) -> Option<&StoredLogin> {
        self.logins.iter().find(|s| &s.login.id == id)
    }

    fn find_mut(&mut self, id: &LoginId) -> Option<&mut StoredLogin> {
        self.logins.iter_mut().find(|s| &s.login.id == id)
    }
}

/// [`LoginStore`] persisted as one JSON file.
///
/// Every operation re-reads the file so edits made by other processes are seen.
/// Clones share a lock, serializing read-modify-write cycles within the process.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file: Arc<Mutex<JsonFileDriver>>,
}

impl JsonFileStore {
    pub fn new(filepath: impl AsRef<Path>) -> Self {
        Self {
            file: Arc::new(Mutex::new(JsonFileDriver::new(filepath))),
        }
    }

    /// Marks a login as having synced copies elsewhere.
    pub async fn set_synced(&self, id: &LoginId, synced: bool) -> Result<()> {
        let file = self.file.lock().await;
        let mut doc: LoginsFile = file.load_or_default().await?;
        let entry = doc
            .find_mut(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        entry.synced = synced;
        file.save(&doc).await?;
        Ok(())
    }
}

#[async_trait]
impl LoginStore for JsonFileStore {
    async fn has_synced_logins(&self, id: &LoginId) -> Result<bool> {
        let file = self.file.lock().await;
        let doc: LoginsFile = file.load_or_default().await?;
        doc.find(id)
            .map(|s| s.synced)
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    async fn get(&self, id: &LoginId) -> Result<Option<LoginRecord>> {
        let file = self.file.lock().await;
        let doc: LoginsFile = file.load_or_default().await?;
        Ok(doc.find(id).map(|s| s.login.clone()))
    }

    async fn update(&self, login: &LoginRecord) -> Result<()> {
        login.validate()?;
        let file = self.file.lock().await;
        let mut doc: LoginsFile = file.load_or_default().await?;
        let entry = doc
            .find_mut(&login.id)
            .ok_or_else(|| Error::NotFound(login.id.clone()))?;
        entry.login = login.clone();
        file.save(&doc).await?;
        log::debug!("Wrote login {} to {:?}", login.id, file.filepath);
        Ok(())
    }

    async fn delete(&self, id: &LoginId) -> Result<()> {
        let file = self.file.lock().await;
        let mut doc: LoginsFile = file.load_or_default().await?;
        let before = doc.logins.len();
        doc.logins.retain(|s| &s.login.id != id);
        if doc.logins.len() == before {
            return Err(Error::NotFound(id.clone()));
        }
        file.save(&doc).await?;
        log::debug!("Removed login {} from {:?}", id, file.filepath);
        Ok(())
    }

    async fn add(&self, login: LoginRecord) -> Result<LoginId> {
        login.validate()?;
        let file = self.file.lock().await;
        let mut doc: LoginsFile = file.load_or_default().await?;
        if doc.find(&login.id).is_some() {
            return Err(Error::AlreadyExists(login.id));
        }
        let id = login.id.clone();
        doc.logins.push(StoredLogin {
            login,
            synced: false,
        });
        file.save(&doc).await?;
        Ok(id)
    }
}
