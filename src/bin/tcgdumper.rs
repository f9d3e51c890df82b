//! Dumps one TCGplayer category (details, groups, and every product) as indented JSON.
//!
//! Diagnostics go to stderr; the JSON snapshot goes to stdout. Exits with status 1 on any
//! configuration error or failed non-paginated call.

// std
use std::{
	error::Error as StdError,
	io::{self, Write},
	process::ExitCode,
};
// crates.io
use clap::Parser;
use tcgplayer::{
	api::Client,
	auth::Credential,
	cancel::CancelSignal,
	error::ConfigError,
	export::{self, ExportOptions},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tcgdumper", version, about = "Dump a TCGplayer category as JSON")]
struct Cli {
	/// Category id to dump.
	#[arg(long, default_value_t = 0)]
	category: u32,
	/// TCGplayer public key.
	#[arg(long = "pub", env = "TCGPLAYER_PUBLIC_KEY", hide_env_values = true)]
	public_key: Option<String>,
	/// TCGplayer private key.
	#[arg(long = "pri", env = "TCGPLAYER_PRIVATE_KEY", hide_env_values = true)]
	private_key: Option<String>,
	/// How many product pages to fetch concurrently.
	#[arg(long, default_value_t = 8)]
	thread: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_writer(io::stderr)
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	match run(Cli::parse()).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!(error = %e, "Export failed.");

			ExitCode::FAILURE
		},
	}
}

async fn run(cli: Cli) -> Result<(), Box<dyn StdError>> {
	let credential =
		Credential::new(cli.public_key.unwrap_or_default(), cli.private_key.unwrap_or_default());

	credential.validate()?;

	if cli.category == 0 {
		return Err(ConfigError::MissingCategory.into());
	}
	if cli.thread == 0 {
		return Err(ConfigError::InvalidWorkerCount.into());
	}

	let cancel = CancelSignal::new();
	let client = Client::builder(credential).cancel_signal(cancel.clone()).build()?;
	let interrupt = tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			tracing::warn!("Interrupt received; cancelling export.");
			cancel.cancel();
		}
	});
	let options = ExportOptions { workers: cli.thread, ..Default::default() };
	let result = export::dump_category(&client, cli.category, &options).await;

	interrupt.abort();

	let dump = result?;
	let mut stdout = io::stdout().lock();

	serde_json::to_writer_pretty(&mut stdout, &dump)?;
	writeln!(stdout)?;
	stdout.flush()?;

	tracing::info!(products = dump.products.len(), groups = dump.groups.len(), "Dumped category.");

	Ok(())
}
