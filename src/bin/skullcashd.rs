use skullcash::chainparams::NetworkKind;
use skullcash::config::{P2P_BIND_ADDRESS, RPC_BIND_ADDRESS, StartupOptions, home_dir};
use skullcash::context::AppContext;

use colored::*;

fn banner(network: NetworkKind) {
    println!(
        "{}",
        " ███████╗██╗  ██╗██╗   ██╗██╗     ██╗     ".bright_white()
    );
    println!(
        "{}",
        " ██╔════╝██║ ██╔╝██║   ██║██║     ██║     ".bright_white()
    );
    println!(
        "{}",
        " ███████╗█████╔╝ ██║   ██║██║     ██║     "
            .bright_white()
            .bold()
    );
    println!(
        "{}",
        " ╚════██║██╔═██╗ ██║   ██║██║     ██║     "
            .bright_white()
            .bold()
    );
    println!(
        "{}",
        " ███████║██║  ██╗╚██████╔╝███████╗███████╗".white()
    );
    println!(
        "{}",
        " ╚══════╝╚═╝  ╚═╝ ╚═════╝ ╚══════╝╚══════╝".white()
    );
    println!();
    let tag = match network {
        NetworkKind::Main => "            v0.1.0 MAINNET            ",
        NetworkKind::Test => "            v0.1.0 TESTNET            ",
    };
    println!("{}", tag.bright_green().on_black().bold());
    println!();
}

fn fatal(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "[fatal]".bright_red().bold(), msg);
    std::process::exit(1);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = StartupOptions::from_process().unwrap_or_else(|e| fatal(e));
    let ctx = AppContext::bootstrap(options, home_dir()).unwrap_or_else(|e| fatal(e));
    let profile = ctx.profile();

    if ctx.options.dump_params {
        println!("{}", serde_json::to_string_pretty(&profile.summary())?);
        return Ok(());
    }

    banner(profile.network_id());

    println!(
        "{} network: {}",
        "[init]".bright_blue().bold(),
        profile.network_id()
    );
    println!(
        "{} genesis: {}",
        "[init]".bright_blue().bold(),
        profile.genesis_hash()
    );
    println!(
        "{} message start: {}",
        "[init]".bright_blue().bold(),
        hex::encode(profile.magic_bytes())
    );
    println!(
        "{} pow limit: {:08x}, last PoW block: {}",
        "[init]".bright_blue().bold(),
        profile.pow_limit().to_compact(),
        profile.last_pow_block()
    );
    println!(
        "{} data dir: {}",
        "[init]".bright_blue().bold(),
        ctx.network.data_dir.display()
    );

    for seed in profile.dns_seeds() {
        println!("{} dns seed: {}", "[net] ".bright_green().bold(), seed.host);
    }
    println!(
        "{} {} bootstrap peer(s) ({} fixed, {} from seed list)",
        "[net] ".bright_green().bold(),
        ctx.bootstrap_peers().len(),
        profile.fixed_seeds().len(),
        ctx.extra_seeds.len()
    );
    println!(
        "{} P2P port {}:{}",
        "[net] ".bright_green().bold(),
        P2P_BIND_ADDRESS,
        ctx.network.p2p_port
    );
    println!(
        "{} RPC port {}:{}",
        "[rpc] ".bright_magenta().bold(),
        RPC_BIND_ADDRESS,
        ctx.network.rpc_port
    );
    println!();
    println!(
        "{}",
        "  Usage: skullcash-cli [-testnet] <command> [args...]"
            .bright_yellow()
            .bold()
    );
    println!("  {} skullcash-cli getgenesis", "❯".bright_black());
    println!("  {} skullcash-cli validateaddress <address>", "❯".bright_black());
    println!();

    log::info!("chain parameters ready for {} network", profile.network_id());
    Ok(())
}
