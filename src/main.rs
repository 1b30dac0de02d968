use anyhow::{Context, Result};
use std::{env, path::Path, process};
use tracing::info;

use access_guard::{AccessConfig, AccessGuard, load_config};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let peer = args
        .next()
        .context("Usage: access-guard <peer-addr> [forwarded-for]")?;
    let forwarded_for = args.next();

    // config.toml wins when present, otherwise the environment variables.
    let access = if Path::new("config.toml").exists() {
        load_config()?.access
    } else {
        AccessConfig::from_env()
    };
    let guard = AccessGuard::from_config(&access).context("Invalid range configuration")?;
    info!(
        trusted_proxies = %guard.trusted_proxies(),
        admin_ranges = %guard.admin_ranges(),
        "Range sets loaded"
    );

    let resolved = guard.resolve_client_addr(&peer, forwarded_for.as_deref());
    let authorized = guard.is_authorized(&resolved);
    info!(
        peer = %peer,
        resolved = %resolved,
        authorized,
        "Resolved client address"
    );

    println!("{resolved} {}", if authorized { "authorized" } else { "denied" });
    if !authorized {
        process::exit(1);
    }
    Ok(())
}
