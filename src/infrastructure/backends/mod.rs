mod completion;
pub mod proxy;
pub mod proxy_legacy;

use anyhow::Result;

use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;

pub struct BackendManager {}

impl BackendManager {
    pub fn get(name: BackendName) -> Result<BackendBox> {
        tracing::debug!(backend = name.to_string(), "Using backend");

        match name {
            BackendName::Proxy => return Ok(Box::<proxy::Proxy>::default()),
            BackendName::ProxyLegacy => return Ok(Box::<proxy_legacy::ProxyLegacy>::default()),
        }
    }
}
