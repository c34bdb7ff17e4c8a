//! Manifest migration hook
//!
//! Every fetched manifest is handed to a [`ManifestMigrations`] implementation
//! before it is returned. The client passes the result through unchanged.

use builder_domain::Manifest;

pub trait ManifestMigrations: Send + Sync {
    /// Manifest version this implementation migrates up to
    fn current_version(&self) -> u32;

    fn migrate(&self, manifest: Manifest) -> Manifest;
}

/// Identity migrations: returns every manifest as received
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMigrations {
    version: u32,
}

impl NoMigrations {
    pub fn new(version: u32) -> Self {
        Self { version }
    }
}

impl Default for NoMigrations {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ManifestMigrations for NoMigrations {
    fn current_version(&self) -> u32 {
        self.version
    }

    fn migrate(&self, manifest: Manifest) -> Manifest {
        manifest
    }
}
