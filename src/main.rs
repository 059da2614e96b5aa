//! Crossroot - provisions cross-compilation sysroots.
//!
//! Launches a container per target triple, installs the runtime/dev packages
//! the sysroot needs, and copies /usr and /lib out to sysroots/<triple>/.

use anyhow::Result;
use clap::Parser;

use crossroot::commands;
use crossroot::config::Config;
use crossroot::registry;

#[derive(Parser)]
#[command(name = "crossroot")]
#[command(about = "Provision cross-compilation sysroots from platform containers")]
struct Cli {
    /// Triples to generate sysroots for (default: all registered)
    #[arg(long, num_args = 0..)]
    triples: Option<Vec<String>>,

    /// List available triples and exit
    #[arg(long)]
    list_triples: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env if present
    dotenvy::dotenv().ok();
    let base_dir = std::env::current_dir()?;
    let config = Config::load(&base_dir);

    let specs = registry::builtin(&config.sysroot_dir);

    if cli.list_triples {
        commands::cmd_list(&specs);
        return Ok(());
    }

    commands::cmd_sync(&specs, cli.triples.as_deref(), &config)
}
