use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::model::Url;

/// Push backend deployment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Production,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub deployment: Deployment,
    pub url: Url,
}

pub const PRODUCTION_URL: &str = "https://updates.push.services.mozilla.com/v1/apns/xrv";

static PRODUCTION: Lazy<EndpointDescriptor> = Lazy::new(|| EndpointDescriptor {
    deployment: Deployment::Production,
    url: Url::parse(PRODUCTION_URL).unwrap(),
});

impl Deployment {
    pub fn endpoint(self) -> &'static EndpointDescriptor {
        use Deployment::*;
        match self {
            Production => &*PRODUCTION,
        }
    }
}
