mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    IEventExceptionRepo, IEventRepo, InMemoryEventExceptionRepo, InMemoryEventRepo, OverrideInput,
    Repos, Snapshot,
};
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};

#[derive(Clone)]
pub struct AllianceContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl AllianceContext {
    /// Empty in-memory context with default config and the real clock
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::default(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<AllianceContext> {
    let config = Config::new();
    let repos = Repos::create_inmemory();
    if let Some(path) = &config.snapshot_path {
        let snapshot = Snapshot::load(path).await?;
        repos.seed(&snapshot).await?;
    }

    Ok(AllianceContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
    })
}
