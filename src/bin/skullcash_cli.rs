// skullcash-cli: offline chain parameter tool
//
// Answers questions about the selected network without a running daemon.
// Usage: skullcash-cli [-testnet] <command> [args...]

use skullcash::chainparams::{Base58Type, ChainRegistry, NetworkProfile};
use skullcash::config::StartupOptions;
use skullcash::crypto::address::{decode_address, encode_address, validate_address};
use skullcash::units::Unit;

use colored::*;
use serde_json::json;

fn print_usage() {
    println!(
        "{}",
        "                - SkullCash CLI -                "
            .bright_yellow()
            .on_black()
            .bold()
    );
    println!();
    println!(
        "{}",
        "  Usage: skullcash-cli [-testnet] <command> [args...]"
            .bright_yellow()
            .bold()
    );
    println!();
    println!("{}", "  Commands:".bright_white().bold());
    let commands = [
        ("getnetworkinfo", "Show the selected network's parameters"),
        ("getgenesis", "Show the genesis block"),
        ("listseeds", "List DNS seeds and fixed seed peers"),
        ("validateaddress <address>", "Check an address against the network"),
        ("encodeaddress <kind> <hex>", "Base58Check-encode a payload"),
        ("formatamount <units> [unit]", "Format base units for display"),
        ("parseamount <text> [unit]", "Parse a display amount to base units"),
    ];
    for (cmd, help) in commands {
        println!(
            "  {} {:<38} {}",
            "❯".bright_black(),
            cmd.bright_green(),
            help.white()
        );
    }
    println!();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "error:".bright_red().bold(), msg);
    std::process::exit(1);
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> &'a str {
    match args.get(idx) {
        Some(a) => a.as_str(),
        None => fail(format!("missing argument <{}>", name)),
    }
}

fn unit_arg(args: &[String], idx: usize) -> Unit {
    match args.get(idx) {
        Some(u) => u.parse().unwrap_or_else(|e| fail(e)),
        None => Unit::Skull,
    }
}

fn kind_from_name(name: &str) -> Option<Base58Type> {
    match name {
        "pubkey" => Some(Base58Type::PubkeyAddress),
        "script" => Some(Base58Type::ScriptAddress),
        "secret" => Some(Base58Type::SecretKey),
        "extpub" => Some(Base58Type::ExtPublicKey),
        "extsecret" => Some(Base58Type::ExtSecretKey),
        _ => None,
    }
}

fn run(profile: &NetworkProfile, method: &str, args: &[String]) -> serde_json::Value {
    match method {
        "getnetworkinfo" => json!(profile.summary()),
        "getgenesis" => {
            let block = profile.genesis_block();
            let coinbase = &block.transactions[0];
            json!({
                "hash": block.hash(),
                "merkle_root": block.header.merkle_root,
                "version": block.header.version,
                "time": block.header.time,
                "bits": format!("{:08x}", block.header.bits),
                "nonce": block.header.nonce,
                "coinbase_txid": coinbase.txid(),
                "coinbase_script": hex::encode(coinbase.inputs[0].script_sig.as_bytes()),
            })
        }
        "listseeds" => json!({
            "dns_seeds": profile.dns_seeds(),
            "fixed_seeds": profile.fixed_seeds(),
        }),
        "validateaddress" => {
            let address = arg(args, 0, "address");
            match validate_address(profile, address) {
                Ok(kind) => {
                    let (_, payload) = decode_address(profile, address).unwrap_or_else(|e| fail(e));
                    json!({
                        "isvalid": true,
                        "address": address,
                        "kind": kind,
                        "payload": hex::encode(payload),
                    })
                }
                Err(e) => json!({ "isvalid": false, "error": e.to_string() }),
            }
        }
        "encodeaddress" => {
            let name = arg(args, 0, "kind");
            let kind = kind_from_name(name)
                .unwrap_or_else(|| fail(format!("unknown address kind: {}", name)));
            let payload = hex::decode(arg(args, 1, "hex")).unwrap_or_else(|e| fail(e));
            json!(encode_address(profile, kind, &payload))
        }
        "formatamount" => {
            let amount: i64 = arg(args, 0, "units").parse().unwrap_or_else(|e| fail(e));
            json!(unit_arg(args, 1).format_with_unit(amount, false))
        }
        "parseamount" => {
            let unit = unit_arg(args, 1);
            json!(unit.parse(arg(args, 0, "text")).unwrap_or_else(|e| fail(e)))
        }
        other => fail(format!("unknown command: {}", other)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = StartupOptions::from_process()?;
    let Some((method, rest)) = options.args.split_first() else {
        print_usage();
        return Ok(());
    };

    let mut registry = ChainRegistry::new()?;
    registry.select_network_from_startup_flag(options.testnet);

    let result = run(registry.active_profile(), method, rest);
    println!("{}", serde_json::to_string_pretty(&result)?.bright_white());
    Ok(())
}
