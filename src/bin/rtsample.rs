use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, error};

use rutoken_samples::{api, SampleConfig, SampleError, SampleResult};

#[derive(Parser, Debug)]
#[command(name = "rtsample")]
#[command(about = "Rutoken PKCS#11 samples", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Path to the Rutoken PKCS#11 library. Uses the platform default if not provided
    #[arg(long, global = true, env = "RUTOKEN_PKCS11_LIBRARY")]
    pub library: Option<PathBuf>,

    /// User PIN. Uses the factory default if not provided
    #[arg(long, global = true, env = "RUTOKEN_USER_PIN", hide_env_values = true)]
    pub pin: Option<String>,

    /// Initialize the library without OS locking primitives
    #[arg(long, global = true)]
    pub no_os_locking: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a GOST R 34.10-2001 key pair on a Rutoken PINPad
    #[command(name = "create-gost2001")]
    CreateGost2001,

    /// Sign the sample message with GOST R 34.10-2012 (256 bits) and verify it
    #[command(name = "sign-gost2012-256")]
    SignGost2012_256,

    /// Encrypt and decrypt the sample buffer with an RSA key pair
    EncDecRsa,

    /// Delete the sample GOST 28147-89 secret keys
    #[command(name = "delete-gost28147")]
    DeleteGost28147,

    /// Read the operation journal of a Rutoken PINPad
    Journal,
}

fn run(cli: &Cli, out: &mut impl Write) -> SampleResult<()> {
    let config = SampleConfig::from_parts(
        cli.library.clone(),
        cli.pin.as_deref(),
        !cli.no_os_locking,
    )?;
    debug!("Using PKCS#11 library {}", config.library_path.display());

    match cli.command {
        Commands::CreateGost2001 => {
            api::create_gost2001_key_pair(&config, out)?;
        }
        Commands::SignGost2012_256 => {
            api::sign_gost2012_256(&config, out)?;
        }
        Commands::EncDecRsa => {
            api::encrypt_decrypt_rsa(&config, out)?;
        }
        Commands::DeleteGost28147 => {
            api::delete_gost28147_keys(&config, out)?;
        }
        Commands::Journal => {
            api::read_journal(&config, out)?;
        }
    }

    Ok(())
}

fn report(err: &SampleError, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", err.failure_message()).context("failed to write failure message")?;
    out.flush().context("failed to flush standard output")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = run(&cli, &mut out) {
        error!("Sample failed: {}", e);
        report(&e, &mut out)?;
        std::process::exit(1);
    }

    out.flush().context("failed to flush standard output")
}
