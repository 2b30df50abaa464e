//! Store and platform selection shared by `installed` and `check`.

use std::path::Path;

use crate::error::Result;
use crate::store::{
    ApiStore, Backend, ConfigStore, FixtureStore, HostPlatform, PlatformCheck, RegQueryStore,
    RegView,
};

/// The registry capabilities a command runs against.
pub struct HostAccess {
    /// Registry reads.
    pub store: Box<dyn ConfigStore>,
    /// Whether the registry applies.
    pub platform: Box<dyn PlatformCheck>,
}

impl HostAccess {
    /// Use a fixture file when given, otherwise the host through `backend`.
    pub fn open(view: RegView, backend: Backend, fixture: Option<&Path>) -> Result<Self> {
        if let Some(path) = fixture {
            let store = FixtureStore::load(path)?;
            tracing::debug!("Replaying registry fixture {}", path.display());
            return Ok(Self {
                platform: Box::new(store.platform()),
                store: Box::new(store),
            });
        }

        let store: Box<dyn ConfigStore> = match backend {
            Backend::Api => Box::new(ApiStore::new(view)),
            Backend::RegExe => Box::new(RegQueryStore::new(view)),
        };
        Ok(Self {
            store,
            platform: Box::new(HostPlatform),
        })
    }
}
