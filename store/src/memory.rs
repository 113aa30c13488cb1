use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ::tokio::sync::Mutex;
use async_trait::async_trait;

use crate::{error::*, model::*};

/// Process-local [`LoginStore`].
///
/// Clones share the same underlying table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Table>>,
}

#[derive(Debug, Default)]
struct Table {
    logins: HashMap<LoginId, LoginRecord>,
    synced: HashSet<LoginId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logins(logins: impl IntoIterator<Item = LoginRecord>) -> Self {
        let logins = logins
            .into_iter()
            .map(|login| (login.id.clone(), login))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Table {
                logins,
                synced: HashSet::new(),
            })),
        }
    }

    /// Marks a login as having copies on other devices.
    pub async fn mark_synced(&self, id: &LoginId) {
        self.inner.lock().await.synced.insert(id.clone());
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.logins.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LoginStore for MemoryStore {
    async fn has_synced_logins(&self, id: &LoginId) -> Result<bool> {
        let table = self.inner.lock().await;
        if !table.logins.contains_key(id) {
            return Err(Error::NotFound(id.clone()));
        }
        Ok(table.synced.contains(id))
    }

    async fn get(&self, id: &LoginId) -> Result<Option<LoginRecord>> {
        Ok(self.inner.lock().await.logins.get(id).cloned())
    }

    async fn update(&self, login: &LoginRecord) -> Result<()> {
        login.validate()?;
        let mut table = self.inner.lock().await;
        let Some(slot) = table.logins.get_mut(&login.id) else {
            return Err(Error::NotFound(login.id.clone()));
        };
        *slot = login.clone();
        log::debug!("Updated login {}", login.id);
        Ok(())
    }

    async fn delete(&self, id: &LoginId) -> Result<()> {
        let mut table = self.inner.lock().await;
        if table.logins.remove(id).is_none() {
            return Err(Error::NotFound(id.clone()));
        }
        table.synced.remove(id);
        log::debug!("Deleted login {}", id);
        Ok(())
    }

    async fn add(&self, login: LoginRecord) -> Result<LoginId> {
        login.validate()?;
        let mut table = self.inner.lock().await;
        if table.logins.contains_key(&login.id) {
            return Err(Error::AlreadyExists(login.id));
        }
        let id = login.id.clone();
        table.logins.insert(id.clone(), login);
        Ok(id)
    }
}
