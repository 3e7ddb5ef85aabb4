// Application context built once at startup
//
// Holds the selected network profile behind an `Arc` so subsystems can keep
// a handle without touching the registry again.
use std::path::PathBuf;
use std::sync::Arc;

use crate::chainparams::{ChainParamsError, ChainRegistry, NetworkKind, NetworkProfile};
use crate::config::{ConfigError, NetworkConfig, StartupOptions};
use crate::net::seeds::{NetAddress, expand_seeds_now, load_seed_file};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("chain parameters: {0}")]
    ChainParams(#[from] ChainParamsError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone)]
pub struct AppContext {
    registry: ChainRegistry,
    profile: Arc<NetworkProfile>,
    pub options: StartupOptions,
    pub network: NetworkConfig,
    /// Peers from the operator's seed list, stamped like the fixed seeds.
    pub extra_seeds: Vec<NetAddress>,
}

impl AppContext {
    /// Builds every profile, selects one from `options` and resolves ports,
    /// data directory and seed list against it.
    pub fn bootstrap(options: StartupOptions, home: Option<PathBuf>) -> Result<Self, BootstrapError> {
        let mut registry = ChainRegistry::new()?;
        registry.select_network_from_startup_flag(options.testnet);
        let profile = registry.active_handle();

        let network = NetworkConfig::resolve(&options, &profile, home);

        let extra_seeds = match &options.seed_file {
            Some(path) => {
                let specs =
                    load_seed_file(path, profile.default_port()).map_err(ConfigError::from)?;
                expand_seeds_now(&specs)
            }
            None => Vec::new(),
        };

        Ok(AppContext {
            registry,
            profile,
            options,
            network,
            extra_seeds,
        })
    }

    pub fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    /// Shared handle to the selected profile for long-lived subsystems.
    pub fn profile_handle(&self) -> Arc<NetworkProfile> {
        Arc::clone(&self.profile)
    }

    pub fn network_id(&self) -> NetworkKind {
        self.profile.network_id()
    }

    /// Whether an incoming message start belongs to the selected network.
    pub fn accepts_magic(&self, magic: &[u8; 4]) -> bool {
        self.profile.accepts_magic(magic)
    }

    /// The network a foreign message start belongs to, if it is a known one.
    pub fn network_for_magic(&self, magic: &[u8; 4]) -> Option<NetworkKind> {
        self.registry.network_for_magic(magic)
    }

    /// Fixed seeds first, then the operator's list.
    pub fn bootstrap_peers(&self) -> Vec<NetAddress> {
        let mut peers = self.profile.fixed_seeds().to_vec();
        peers.extend_from_slice(&self.extra_seeds);
        peers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bootstrap_main_by_default() {
        let ctx = AppContext::bootstrap(StartupOptions::default(), Some(PathBuf::from("/h"))).unwrap();
        assert_eq!(ctx.network_id(), NetworkKind::Main);
        assert_eq!(ctx.network.p2p_port, 38008);
        assert!(ctx.extra_seeds.is_empty());
    }

    #[test]
    fn test_bootstrap_testnet() {
        let opts = StartupOptions {
            testnet: true,
            ..Default::default()
        };
        let ctx = AppContext::bootstrap(opts, Some(PathBuf::from("/h"))).unwrap();
        assert_eq!(ctx.network_id(), NetworkKind::Test);
        assert_eq!(ctx.profile_handle().last_pow_block(), i32::MAX);
        assert_eq!(ctx.network.data_dir, PathBuf::from("/h/.skullcash/testnet"));
        assert!(ctx.accepts_magic(&[0x79, 0x1a, 0x09, 0x3b]));
        assert!(!ctx.accepts_magic(&[0xc5, 0xcb, 0x1a, 0xae]));
        assert_eq!(
            ctx.network_for_magic(&[0xc5, 0xcb, 0x1a, 0xae]),
            Some(NetworkKind::Main)
        );
    }

    #[test]
    fn test_bootstrap_seed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "203.0.113.1\n203.0.113.2:9999").unwrap();
        let opts = StartupOptions {
            testnet: true,
            seed_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let ctx = AppContext::bootstrap(opts, None).unwrap();
        let peers = ctx.bootstrap_peers();
        assert_eq!(peers.len(), ctx.profile().fixed_seeds().len() + 2);
        assert_eq!(ctx.extra_seeds[0].addr.port(), 17799);
        assert_eq!(ctx.extra_seeds[1].addr.port(), 9999);
    }

    #[test]
    fn test_bootstrap_missing_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = StartupOptions {
            seed_file: Some(dir.path().join("nope.txt")),
            ..Default::default()
        };
        let err = AppContext::bootstrap(opts, None).unwrap_err();
        assert!(matches!(err, BootstrapError::Config(ConfigError::Seeds(_))));
    }
}
