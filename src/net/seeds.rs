// Bootstrap peers: DNS seeds, compiled-in seed tables and operator seed lists
//
// Compiled-in seeds get a random "last seen" time between one and two weeks
// ago. A node only dials one or two of them; once connected it learns a pile
// of fresher addresses that naturally outrank the seeds.

use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::Serialize;

pub const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Service bit advertised for full nodes.
pub const NODE_NETWORK: u64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot read seed list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

impl DnsSeed {
    pub fn new(name: &str, host: &str) -> Self {
        DnsSeed {
            name: name.to_string(),
            host: host.to_string(),
        }
    }
}

/// Compact seed table entry: IPv6 (or IPv4-mapped) address and port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedSpec6 {
    pub addr: [u8; 16],
    pub port: u16,
}

impl SeedSpec6 {
    pub fn from_socket_addr(sa: SocketAddr) -> Self {
        let v6 = match sa.ip() {
            IpAddr::V4(v4) => v4.to_ipv6_mapped(),
            IpAddr::V6(v6) => v6,
        };
        SeedSpec6 {
            addr: v6.octets(),
            port: sa.port(),
        }
    }

    /// IPv4-mapped entries come back as plain IPv4.
    pub fn socket_addr(&self) -> SocketAddr {
        let v6 = Ipv6Addr::from(self.addr);
        let ip = match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        };
        SocketAddr::new(ip, self.port)
    }
}

/// A peer address as handed to the address manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetAddress {
    pub addr: SocketAddr,
    pub services: u64,
    /// Unix seconds the peer was last seen.
    pub time: i64,
}

/// One record per table entry, each stamped strictly inside
/// `(now - 2 weeks, now - 1 week)`.
pub fn expand_seeds<R: Rng>(specs: &[SeedSpec6], now: i64, rng: &mut R) -> Vec<NetAddress> {
    specs
        .iter()
        .map(|spec| NetAddress {
            addr: spec.socket_addr(),
            services: NODE_NETWORK,
            time: now - ONE_WEEK_SECS - rng.gen_range(1..ONE_WEEK_SECS),
        })
        .collect()
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Expands against the wall clock and the thread RNG.
pub fn expand_seeds_now(specs: &[SeedSpec6]) -> Vec<NetAddress> {
    let seeds = expand_seeds(specs, unix_now(), &mut rand::thread_rng());
    log::debug!("expanded {} fixed seed(s)", seeds.len());
    seeds
}

/// Parses an operator seed list: one address per line, `#` starts a comment.
///
/// Accepts `1.2.3.4:port`, `[v6]:port`, or a bare IP (which gets
/// `default_port`). Hostnames cannot be embedded and are skipped.
pub fn parse_seed_list(text: &str, default_port: u16) -> Vec<SeedSpec6> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.split('#').next().unwrap_or("").trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Ok(sa) = trimmed.parse::<SocketAddr>() {
            out.push(SeedSpec6::from_socket_addr(sa));
        } else if let Ok(ip) = trimmed.parse::<IpAddr>() {
            out.push(SeedSpec6::from_socket_addr(SocketAddr::new(ip, default_port)));
        } else {
            log::warn!("seed list line {}: skipping {:?}", idx + 1, trimmed);
        }
    }
    out
}

pub fn load_seed_file(path: &Path, default_port: u16) -> Result<Vec<SeedSpec6>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let seeds = parse_seed_list(&raw, default_port);
    log::debug!("loaded {} seed(s) from {}", seeds.len(), path.display());
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn table() -> Vec<SeedSpec6> {
        vec![
            SeedSpec6::from_socket_addr("203.0.113.7:38008".parse().unwrap()),
            SeedSpec6::from_socket_addr("[2001:db8::1]:38008".parse().unwrap()),
            SeedSpec6::from_socket_addr("198.51.100.20:17799".parse().unwrap()),
        ]
    }

    #[test]
    fn test_expand_count_and_window() {
        let now = 1_700_000_000;
        let mut rng = StdRng::seed_from_u64(7);
        let out = expand_seeds(&table(), now, &mut rng);
        assert_eq!(out.len(), 3);
        for a in &out {
            assert!(a.time > now - 2 * ONE_WEEK_SECS);
            assert!(a.time < now - ONE_WEEK_SECS);
            assert_eq!(a.services, NODE_NETWORK);
        }
    }

    #[test]
    fn test_expand_preserves_order_and_family() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = expand_seeds(&table(), 0, &mut rng);
        assert_eq!(out[0].addr, "203.0.113.7:38008".parse::<SocketAddr>().unwrap());
        assert!(out[1].addr.is_ipv6());
        assert_eq!(out[2].addr.port(), 17799);
    }

    #[test]
    fn test_expand_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(expand_seeds(&[], 0, &mut rng).is_empty());
    }

    #[test]
    fn test_mapped_roundtrip() {
        let spec = SeedSpec6::from_socket_addr("10.1.2.3:1".parse().unwrap());
        assert_eq!(&spec.addr[..12], &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff]);
        assert_eq!(spec.socket_addr().to_string(), "10.1.2.3:1");
    }

    #[test]
    fn test_parse_seed_list() {
        let text = "\
# SkullCash seed list
203.0.113.10:38008
198.51.100.4   # trailing comment, default port
[2001:db8::2]:4000

seed.example.org:38008
";
        let seeds = parse_seed_list(text, 38008);
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[1].socket_addr().to_string(), "198.51.100.4:38008");
        assert_eq!(seeds[2].port, 4000);
    }
}
