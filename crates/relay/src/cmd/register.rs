//! Register command - encode the application registration message
//!
//! The output is the exact byte sequence the agent sends to the daemon,
//! suitable for replaying against a daemon or feeding to `relay inspect`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use relay_config::Config;
use relay_protocol::encode::encode_app_query;
use tracing::info;

/// Register command arguments
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: PathBuf,

    /// Run id of an existing connection (omit for a first connect)
    #[arg(long)]
    run_id: Option<String>,

    /// System host name reported to the daemon
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,
}

/// Run the register command
pub fn run(args: RegisterArgs, config: &Config) -> Result<()> {
    let size = write_registration(config, args.run_id.as_deref(), &args.host, &args.out)?;

    info!(
        app = %config.app.name,
        path = %args.out.display(),
        size,
        "registration message written"
    );
    Ok(())
}

/// Encode the registration for `config` and write it to `out`
pub fn write_registration(config: &Config, run_id: Option<&str>, host: &str, out: &Path) -> Result<usize> {
    let info = config.app_info();
    let bytes = encode_app_query(run_id, host, &info);

    fs::write(out, &bytes).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_protocol::{Message, MessageBodyType};
    use std::str::FromStr;

    #[test]
    fn test_write_registration() {
        let config = Config::from_str(
            "[app]\nlicense = \"0123456789abcdef0123456789abcdef01234567\"\nname = \"My App\"\nlanguage = \"php\"",
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("app.bin");

        let size = write_registration(&config, Some("run-1234567890"), "web-01", &out).unwrap();

        let bytes = fs::read(&out).unwrap();
        assert_eq!(bytes.len(), size);

        let msg = Message::parse(&bytes).unwrap();
        assert_eq!(msg.body_type(), MessageBodyType::App);
        assert_eq!(msg.agent_run_id(), Some("run-1234567890"));

        let app = msg.app().unwrap();
        assert_eq!(app.appname().unwrap(), Some("My App"));
        assert_eq!(app.agent_language().unwrap(), Some("php"));
        assert_eq!(app.host().unwrap(), Some("web-01"));
    }

    #[test]
    fn test_write_registration_to_missing_dir_fails() {
        let config = Config::from_str(
            "[app]\nlicense = \"0123456789abcdef0123456789abcdef01234567\"\nname = \"My App\"",
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("app.bin");

        let err = write_registration(&config, None, "web-01", &out).unwrap_err();
        assert!(err.to_string().contains("failed to write"));
    }
}
