//! Command line access to record program state.
//!
//! Configuration comes from `--config <file>` if given, otherwise from the environment.

use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use record_client::{
    config::parse_address,
    logs::{
        log_header,
        log_info,
        log_warning,
    },
    pda::{
        derive_key,
        find_linked_state_address,
        find_seeded_state_address,
        DerivedAddress,
    },
    print_kv,
    state::{
        check_account_exists,
        get_states_for_owner,
        retrieve,
    },
    BindingsConfig,
};
use record_interface::state::{
    StateRecord,
    StateVariant,
};
use solana_address::Address;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file. Falls back to environment variables when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides the configured RPC URL.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derives a state account address.
    DeriveKey {
        #[command(subcommand)]
        target: DeriveTarget,
    },
    /// Fetches and decodes a state account.
    FetchState {
        /// compact, linked or seeded.
        variant: StateVariant,
        #[arg(value_parser = parse_address)]
        address: Address,
    },
    /// Reports whether an account exists.
    Exists {
        #[arg(value_parser = parse_address)]
        address: Address,
    },
    /// Lists the initialized linked state accounts owned by an address.
    OwnedBy {
        #[arg(value_parser = parse_address)]
        owner: Address,
    },
}

#[derive(Subcommand)]
enum DeriveTarget {
    /// The linked state account of an address.
    Linked {
        #[arg(value_parser = parse_address)]
        linked: Address,
    },
    /// The program-wide seeded state account.
    Seeded,
    /// Arbitrary UTF-8 seeds, in order.
    Seeds { seeds: Vec<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => BindingsConfig::from_json_file(path)?,
        None => BindingsConfig::from_env()?,
    };
    if let Some(url) = cli.url {
        config.rpc_url = url;
    }
    let program_id = *config.active_program_id();

    match cli.command {
        Command::DeriveKey { target } => {
            let derived = match target {
                DeriveTarget::Linked { linked } => find_linked_state_address(&linked, &program_id),
                DeriveTarget::Seeded => find_seeded_state_address(&program_id),
                DeriveTarget::Seeds { seeds } => {
                    let seeds: Vec<&[u8]> = seeds.iter().map(|s| s.as_bytes()).collect();
                    derive_key(&seeds, &program_id)
                }
            };
            print_derived(&derived);
        }
        Command::FetchState { variant, address } => {
            let rpc = config.rpc_client();
            let record = retrieve(&rpc, variant, &address).await?;
            log_header(format!("{variant} state {address}"));
            print_record(&record);
        }
        Command::Exists { address } => {
            let rpc = config.rpc_client();
            if check_account_exists(&rpc, &address).await? {
                log_info("Exists", address);
            } else {
                log_warning("Missing", address);
            }
        }
        Command::OwnedBy { owner } => {
            let rpc = config.rpc_client();
            let states = get_states_for_owner(&rpc, &config, &owner).await?;
            log_header(format!("{} state account(s) owned by {owner}", states.len()));
            for (address, record) in states {
                println!();
                print_kv!("address" => address);
                print_record(&record);
            }
        }
    }

    Ok(())
}

fn print_derived(derived: &DerivedAddress) {
    print_kv!("address" => derived.address, "nonce" => derived.nonce);
}

fn print_record(record: &StateRecord) {
    print_kv!("tag" => format!("{:?}", record.tag), "nonce" => record.nonce);
    for (name, value) in [
        ("linked", record.linked),
        ("owner", record.owner),
        ("mint", record.mint),
    ] {
        if let Some(value) = value {
            print_kv!(name => value);
        }
    }
}
