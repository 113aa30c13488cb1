use serde::{Deserialize, Serialize};

use super::atom::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidLogin {
    #[error("Can't add a login with an empty hostname")]
    EmptyHostname,

    #[error("Can't add a login with an empty password")]
    EmptyPassword,

    #[error("Can't add a login with both a httpRealm and formSubmitURL")]
    BothRealmAndFormUrl,
}

/// A stored credential as the storage service hands it out.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct LoginRecord {
    pub id: LoginId,
    /// e.g. "https://accounts.example.com"
    pub hostname: String,
    pub form_submit_url: Option<String>,
    pub http_realm: Option<String>,
    pub username: String,
    pub password: String,
    pub created_at: LocalDateTime,
    pub modified_at: LocalDateTime,
}

impl LoginRecord {
    pub fn new<S1, S2, S3>(hostname: S1, username: S2, password: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        let now = chrono::Local::now();
        Self {
            id: LoginId::generate(),
            hostname: hostname.into(),
            form_submit_url: None,
            http_realm: None,
            username: username.into(),
            password: password.into(),
            created_at: now,
            modified_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<LoginId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_form_submit_url(mut self, url: impl Into<String>) -> Self {
        self.form_submit_url = Some(url.into());
        self
    }

    pub fn with_http_realm(mut self, realm: impl Into<String>) -> Self {
        self.http_realm = Some(realm.into());
        self
    }

    pub fn validate(&self) -> Result<(), InvalidLogin> {
        use InvalidLogin::*;
        if self.hostname.is_empty() {
            return Err(EmptyHostname);
        }
        if self.password.is_empty() {
            return Err(EmptyPassword);
        }
        if self.form_submit_url.is_some() && self.http_realm.is_some() {
            return Err(BothRealmAndFormUrl);
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copy of `self` carrying new credentials and a refreshed modification time.
    pub fn with_credentials(&self, username: &str, password: &str) -> Self {
        Self {
            username: username.to_owned(),
            password: password.to_owned(),
            modified_at: chrono::Local::now(),
            ..self.clone()
        }
    }

    /// Whether `username` and `password` differ from the stored ones.
    pub fn credentials_differ(&self, username: &str, password: &str) -> bool {
        self.username != username || self.password != password
    }
}
