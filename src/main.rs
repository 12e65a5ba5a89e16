use anyhow::Result;
use clap::Parser;
use std::io;

use wardrobe_catalog::{default_log_level, init_logging, Catalog, Session};

#[derive(Parser, Debug)]
#[command(name = "wardrobe", version)]
#[command(about = "Personal digital closet: track garments, wears and price per wear")]
struct Cli {
    /// Closet owner's name; prompted for when omitted.
    #[arg(long)]
    owner: Option<String>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for log files; logging stays off when omitted.
    #[arg(long, env = "WARDROBE_LOG_DIR")]
    log_dir: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("⚠️  Logging disabled: {:#}", err);
        }
    }

    let stdin = io::stdin();
    let mut session = Session::new(Catalog::new(), stdin.lock(), io::stdout());
    if let Some(owner) = cli.owner {
        session = session.with_owner(owner);
    }

    session.run()?;

    log::info!("event=app_exit module=main status=ok");
    Ok(())
}
