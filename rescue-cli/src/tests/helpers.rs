//! Test helpers for writing facility registries and stub provider chains.

use super::*;
use crate::resolve::{ResolveChainBuilder, ResolveConfig};
use camino::{Utf8Path, Utf8PathBuf};
use rescue_core::test_support::StubRouteProvider;
use rescue_core::{ProviderChain, RouteProvider, RouteSource};
use tempfile::TempDir;

/// Two stations ten kilometres apart around (10, 10).
pub(super) const REGISTRY: &str = r#"[
    {"id": 1, "name": "Central Station", "latitude": 10.0, "longitude": 10.0, "capacity": 40},
    {"id": 2, "name": "East Station", "latitude": 10.0, "longitude": 10.1}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory holding a facility registry.
#[derive(Debug)]
pub(super) struct Registry {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl Registry {
    pub(super) fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("facilities.json");
        write_utf8(&path, contents.as_bytes());
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_contents(REGISTRY)
    }
}

/// Which stub providers the chain should hold.
#[derive(Debug, Clone, Copy)]
pub(super) enum StubChain {
    /// A single OSRM stub that returns a route.
    Healthy,
    /// Every provider is unconfigured.
    Unavailable,
}

impl ResolveChainBuilder for StubChain {
    fn build(&self, config: &ResolveConfig) -> Result<ProviderChain, CliError> {
        let providers: Vec<Box<dyn RouteProvider>> = match self {
            Self::Healthy => vec![Box::new(StubRouteProvider::succeeding(RouteSource::Osrm))],
            Self::Unavailable => vec![
                Box::new(StubRouteProvider::unconfigured(RouteSource::GoogleDirections)),
                Box::new(StubRouteProvider::unconfigured(RouteSource::OpenRouteService)),
            ],
        };
        Ok(ProviderChain::new(providers).with_attempt_timeout(config.routing.attempt_timeout))
    }
}
