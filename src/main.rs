mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use adapters::memory::mlock;
use adapters::vault::http_client::VaultHttpStore;
use cli::Cli;
use config::variables::VariablesFile;

use crate::core::errors::{BuildenvError, Result};
use crate::core::services::{export_emitter, layer_resolver};

fn main() {
    let args = Cli::parse();

    if let Err(e) = run(&args) {
        cli::output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}

fn run(args: &Cli) -> Result<()> {
    if args.mlock_enabled
        && let Err(e) = mlock::lock_process_memory()
    {
        cli::output::warning(&format!(
            "unable to mlock memory, secret material may reach swap: {e}"
        ));
    }

    let env = match args.environment.as_deref() {
        Some(env) if !env.is_empty() => env,
        _ => return Err(BuildenvError::EnvironmentMissing),
    };

    let (config, version) = VariablesFile::load(&args.variables_file)?;
    let sections = layer_resolver::resolve(&config, version, env, &args.datacenter);

    // Constructed lazily: a file with no secrets never talks to the store.
    let store = VaultHttpStore::from_env();

    let stdout = std::io::stdout();
    export_emitter::emit(
        &mut stdout.lock(),
        env,
        &args.datacenter,
        &sections,
        &store,
    )
}
