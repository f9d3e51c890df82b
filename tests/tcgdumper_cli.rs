#![cfg(feature = "cli")]

// crates.io
use assert_cmd::Command;

fn tcgdumper() -> Command {
	let mut cmd = Command::cargo_bin("tcgdumper").expect("The tcgdumper binary should build.");

	cmd.env_remove("TCGPLAYER_PUBLIC_KEY")
		.env_remove("TCGPLAYER_PRIVATE_KEY")
		.env("NO_COLOR", "1")
		.env("RUST_LOG", "info");

	cmd
}

#[test]
fn missing_keys_exit_with_failure() {
	let output = tcgdumper().args(["--category", "1"]).output().expect("tcgdumper should run.");
	let stderr = String::from_utf8_lossy(&output.stderr);

	assert_eq!(output.status.code(), Some(1));
	assert!(stderr.contains("Missing TCGplayer public key"), "stderr: {stderr}");
	assert!(output.stdout.is_empty());
}

#[test]
fn missing_private_key_from_env_is_reported() {
	let output = tcgdumper()
		.env("TCGPLAYER_PUBLIC_KEY", "public")
		.args(["--category", "1"])
		.output()
		.expect("tcgdumper should run.");
	let stderr = String::from_utf8_lossy(&output.stderr);

	assert_eq!(output.status.code(), Some(1));
	assert!(stderr.contains("Missing TCGplayer private key"), "stderr: {stderr}");
}

#[test]
fn missing_category_exits_before_network() {
	let output = tcgdumper()
		.args(["--pub", "public", "--pri", "private"])
		.output()
		.expect("tcgdumper should run.");
	let stderr = String::from_utf8_lossy(&output.stderr);

	assert_eq!(output.status.code(), Some(1));
	assert!(stderr.contains("Missing category id"), "stderr: {stderr}");
}
