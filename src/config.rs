// Startup configuration: command-line flags, environment overrides and the
// per-network values they resolve to.
use std::path::PathBuf;

use crate::chainparams::NetworkProfile;
use crate::net::seeds::SeedError;

/// Data directory name under `$HOME`. Test network data lives in a
/// subdirectory named by the profile.
pub const DATA_DIR: &str = ".skullcash";

/// Bind address for RPC, local-only.
pub const RPC_BIND_ADDRESS: &str = "127.0.0.1";

/// Bind address for P2P.
pub const P2P_BIND_ADDRESS: &str = "0.0.0.0";

pub const ENV_TESTNET: &str = "SKULLCASH_TESTNET";
pub const ENV_DATA_DIR: &str = "SKULLCASH_DATA_DIR";
pub const ENV_P2P_PORT: &str = "SKULLCASH_P2P_PORT";
pub const ENV_RPC_PORT: &str = "SKULLCASH_RPC_PORT";
pub const ENV_SEEDLIST: &str = "SKULLCASH_SEEDLIST";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid port for {option}: {value:?}")]
    InvalidPort { option: String, value: String },
    #[error("invalid boolean for {option}: {value:?}")]
    InvalidFlag { option: String, value: String },
    #[error("{0} needs a value")]
    MissingValue(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error(transparent)]
    Seeds(#[from] SeedError),
}

/// Raw startup options. Command-line flags win over environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupOptions {
    pub testnet: bool,
    pub data_dir: Option<PathBuf>,
    pub p2p_port: Option<u16>,
    pub rpc_port: Option<u16>,
    pub seed_file: Option<PathBuf>,
    pub dump_params: bool,
    /// Anything that is not an option, in order.
    pub args: Vec<String>,
}

fn parse_port(option: &str, value: &str) -> Result<u16, ConfigError> {
    match value.trim().parse::<u16>() {
        Ok(p) if p != 0 => Ok(p),
        _ => Err(ConfigError::InvalidPort {
            option: option.to_string(),
            value: value.to_string(),
        }),
    }
}

fn need_value<'a>(option: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingValue(option.to_string()))
}

fn parse_flag(option: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(true),
        Some(v) => match v.as_str() {
            "" | "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidFlag {
                option: option.to_string(),
                value: v,
            }),
        },
    }
}

impl StartupOptions {
    /// Parses `args` (without the program name) on top of the environment.
    ///
    /// Options take one or two leading dashes and an optional `=value`.
    /// Malformed command-line values are errors; malformed environment
    /// values are logged and ignored.
    pub fn parse<I, S, E>(args: I, env: E) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::from_env(env);

        for arg in args {
            let arg: String = arg.into();
            if !arg.starts_with('-') {
                opts.args.push(arg);
                continue;
            }
            let stripped = arg.trim_start_matches('-');
            let (name, value) = match stripped.split_once('=') {
                Some((n, v)) => (n, Some(v)),
                None => (stripped, None),
            };

            match name {
                "testnet" => opts.testnet = parse_flag(name, value)?,
                "dumpparams" => opts.dump_params = parse_flag(name, value)?,
                "datadir" => opts.data_dir = Some(PathBuf::from(need_value(name, value)?)),
                "port" => opts.p2p_port = Some(parse_port(name, need_value(name, value)?)?),
                "rpcport" => opts.rpc_port = Some(parse_port(name, need_value(name, value)?)?),
                "seedfile" => opts.seed_file = Some(PathBuf::from(need_value(name, value)?)),
                _ => return Err(ConfigError::UnknownOption(arg.clone())),
            }
        }
        Ok(opts)
    }

    /// Options from the process arguments and environment.
    pub fn from_process() -> Result<Self, ConfigError> {
        Self::parse(std::env::args().skip(1), |k| std::env::var(k).ok())
    }

    fn from_env<E: Fn(&str) -> Option<String>>(env: E) -> Self {
        let mut opts = StartupOptions::default();

        if let Some(v) = env(ENV_TESTNET) {
            match parse_flag(ENV_TESTNET, Some(&v)) {
                Ok(b) => opts.testnet = b,
                Err(e) => log::warn!("ignoring {}", e),
            }
        }
        if let Some(v) = env(ENV_P2P_PORT) {
            match parse_port(ENV_P2P_PORT, &v) {
                Ok(p) => opts.p2p_port = Some(p),
                Err(e) => log::warn!("ignoring {}", e),
            }
        }
        if let Some(v) = env(ENV_RPC_PORT) {
            match parse_port(ENV_RPC_PORT, &v) {
                Ok(p) => opts.rpc_port = Some(p),
                Err(e) => log::warn!("ignoring {}", e),
            }
        }
        if let Some(d) = env(ENV_DATA_DIR)
            && !d.is_empty()
        {
            opts.data_dir = Some(PathBuf::from(d));
        }
        if let Some(f) = env(ENV_SEEDLIST)
            && !f.is_empty()
        {
            opts.seed_file = Some(PathBuf::from(f));
        }
        opts
    }
}

/// Ports and paths for the selected network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub p2p_port: u16,
    pub rpc_port: u16,
    pub data_dir: PathBuf,
}

impl NetworkConfig {
    /// Fills whatever `opts` leaves open from `profile`. `home` is the base
    /// for the default data directory.
    pub fn resolve(opts: &StartupOptions, profile: &NetworkProfile, home: Option<PathBuf>) -> Self {
        let base = match &opts.data_dir {
            Some(d) => d.clone(),
            None => home.unwrap_or_else(|| PathBuf::from(".")).join(DATA_DIR),
        };
        let data_dir = match profile.data_dir_name() {
            "" => base,
            sub => base.join(sub),
        };
        NetworkConfig {
            p2p_port: opts.p2p_port.unwrap_or(profile.default_port()),
            rpc_port: opts.rpc_port.unwrap_or(profile.rpc_port()),
            data_dir,
        }
    }
}

/// `$HOME`, if set.
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chainparams::{main_profile, test_profile};
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let opts = StartupOptions::parse(Vec::<String>::new(), no_env).unwrap();
        assert_eq!(opts, StartupOptions::default());
        assert!(!opts.testnet);
    }

    #[test]
    fn test_testnet_flag_forms() {
        for a in ["-testnet", "--testnet", "-testnet=1", "--testnet=true"] {
            assert!(StartupOptions::parse([a], no_env).unwrap().testnet, "{a}");
        }
        assert!(!StartupOptions::parse(["-testnet=0"], no_env).unwrap().testnet);
        assert!(matches!(
            StartupOptions::parse(["-testnet=maybe"], no_env),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env = env_of(&[
            (ENV_TESTNET, "1"),
            (ENV_P2P_PORT, "4000"),
            (ENV_RPC_PORT, "not-a-port"),
            (ENV_DATA_DIR, "/srv/skull"),
        ]);
        let opts = StartupOptions::parse(Vec::<String>::new(), env).unwrap();
        assert!(opts.testnet);
        assert_eq!(opts.p2p_port, Some(4000));
        assert_eq!(opts.rpc_port, None);
        assert_eq!(opts.data_dir, Some(PathBuf::from("/srv/skull")));
    }

    #[test]
    fn test_args_win_over_env() {
        let env = env_of(&[(ENV_TESTNET, "1"), (ENV_P2P_PORT, "4000")]);
        let opts = StartupOptions::parse(["-testnet=0", "-port=5000"], env).unwrap();
        assert!(!opts.testnet);
        assert_eq!(opts.p2p_port, Some(5000));
    }

    #[test]
    fn test_bad_args() {
        assert!(matches!(
            StartupOptions::parse(["-port=0"], no_env),
            Err(ConfigError::InvalidPort { .. })
        ));
        assert!(matches!(
            StartupOptions::parse(["-rpcport=70000"], no_env),
            Err(ConfigError::InvalidPort { .. })
        ));
        assert!(matches!(
            StartupOptions::parse(["-datadir"], no_env),
            Err(ConfigError::MissingValue(_))
        ));
        assert!(matches!(
            StartupOptions::parse(["-regtest"], no_env),
            Err(ConfigError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_value_options() {
        let opts = StartupOptions::parse(
            ["--datadir=/srv/a", "-seedfile=/srv/seeds.txt", "-port=4100", "-rpcport=4101"],
            no_env,
        )
        .unwrap();
        assert_eq!(opts.data_dir, Some(PathBuf::from("/srv/a")));
        assert_eq!(opts.seed_file, Some(PathBuf::from("/srv/seeds.txt")));
        assert_eq!(opts.p2p_port, Some(4100));
        assert_eq!(opts.rpc_port, Some(4101));

        for a in ["-port", "-rpcport", "-seedfile"] {
            match StartupOptions::parse([a], no_env) {
                Err(ConfigError::MissingValue(name)) => assert_eq!(name, &a[1..]),
                other => panic!("unexpected for {a}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_positionals_kept() {
        let opts =
            StartupOptions::parse(["validateaddress", "-testnet", "SXYZ"], no_env).unwrap();
        assert!(opts.testnet);
        assert_eq!(opts.args, vec!["validateaddress", "SXYZ"]);
    }

    #[test]
    fn test_resolve_main() {
        let main = main_profile().unwrap();
        let cfg = NetworkConfig::resolve(
            &StartupOptions::default(),
            &main,
            Some(PathBuf::from("/home/u")),
        );
        assert_eq!(cfg.p2p_port, 38008);
        assert_eq!(cfg.rpc_port, 38009);
        assert_eq!(cfg.data_dir, PathBuf::from("/home/u/.skullcash"));
    }

    #[test]
    fn test_resolve_test_with_overrides() {
        let test = test_profile().unwrap();
        let opts = StartupOptions {
            rpc_port: Some(1234),
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        let cfg = NetworkConfig::resolve(&opts, &test, None);
        assert_eq!(cfg.p2p_port, 17799);
        assert_eq!(cfg.rpc_port, 1234);
        assert_eq!(cfg.data_dir, PathBuf::from("/data/testnet"));
    }
}
