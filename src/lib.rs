//! SkullCash chain parameters.
//!
//! Builds the main and test network profiles (with their genesis blocks
//! rebuilt and checked), selects the active one at startup and exposes the
//! constants outer layers need: message start bytes, ports, Base58 prefixes,
//! seeds and display units.

pub mod chainparams;
pub mod config;
pub mod consensus;
pub mod context;
pub mod crypto;
pub mod net;
pub mod primitives;
pub mod units;
