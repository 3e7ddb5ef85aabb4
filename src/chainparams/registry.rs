// Registry of built network profiles and the active selection
use std::sync::Arc;

use super::networks::{main_profile, test_profile};
use super::profile::NetworkProfile;
use super::{ChainParamsError, NetworkKind};

/// Holds every known profile. Main is active until something else is
/// selected. Handles given out by `active_handle` stay valid after a later
/// switch; they keep pointing at the profile that was active at the time.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    profiles: Vec<Arc<NetworkProfile>>,
    active: usize,
}

impl ChainRegistry {
    /// Builds and validates main and test.
    pub fn new() -> Result<Self, ChainParamsError> {
        Self::from_profiles(vec![main_profile()?, test_profile()?])
    }

    pub fn from_profiles(profiles: Vec<NetworkProfile>) -> Result<Self, ChainParamsError> {
        for (i, a) in profiles.iter().enumerate() {
            for b in &profiles[i + 1..] {
                if a.network_id() == b.network_id() {
                    return Err(ChainParamsError::DuplicateNetwork(b.network_id()));
                }
                if a.magic_bytes() == b.magic_bytes() {
                    return Err(ChainParamsError::DuplicateMagic {
                        first: a.network_id(),
                        second: b.network_id(),
                        magic: hex::encode(a.magic_bytes()),
                    });
                }
            }
        }

        let active = profiles
            .iter()
            .position(|p| p.network_id() == NetworkKind::Main)
            .ok_or(ChainParamsError::UnknownNetwork(NetworkKind::Main))?;

        Ok(ChainRegistry {
            profiles: profiles.into_iter().map(Arc::new).collect(),
            active,
        })
    }

    pub fn select_network(&mut self, kind: NetworkKind) -> Result<(), ChainParamsError> {
        let idx = self
            .profiles
            .iter()
            .position(|p| p.network_id() == kind)
            .ok_or(ChainParamsError::UnknownNetwork(kind))?;
        self.active = idx;
        log::info!("selected {} network", kind);
        Ok(())
    }

    /// Selects test when `testnet` is set, main otherwise. Main is always
    /// registered, so an unregistered test network falls back to it and
    /// this never fails.
    pub fn select_network_from_startup_flag(&mut self, testnet: bool) -> bool {
        if testnet {
            match self.select_network(NetworkKind::Test) {
                Ok(()) => return true,
                Err(e) => log::warn!("{}, falling back to main", e),
            }
        }
        self.select_network(NetworkKind::Main).is_ok()
    }

    pub fn active_profile(&self) -> &NetworkProfile {
        &self.profiles[self.active]
    }

    pub fn active_handle(&self) -> Arc<NetworkProfile> {
        Arc::clone(&self.profiles[self.active])
    }

    pub fn profile(&self, kind: NetworkKind) -> Option<&NetworkProfile> {
        self.profiles
            .iter()
            .find(|p| p.network_id() == kind)
            .map(|p| p.as_ref())
    }

    /// Which network a message start belongs to, if any.
    pub fn network_for_magic(&self, magic: &[u8; 4]) -> Option<NetworkKind> {
        self.profiles
            .iter()
            .find(|p| p.accepts_magic(magic))
            .map(|p| p.network_id())
    }

    pub fn networks(&self) -> impl Iterator<Item = NetworkKind> + '_ {
        self.profiles.iter().map(|p| p.network_id())
    }
}
