// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging initialization for the issuer
//!
//! The issuer is an operator-facing command, so progress goes to the console
//! by default, with optional file output.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Log level filter (default: `info`)
//!   - Can be set per module: `RUST_LOG=docflow_issuer=debug,reqwest=info`
//!
//! - `LOG_TO_CONSOLE`: Console output to stderr (default: `true`)
//!   - Set to `false`, `0`, or `no` to disable
//!
//! - `LOG_DIR`: Root directory for log files (default: unset, no file output)
//!   - Log files are created in `{LOG_DIR}/issuer/` directory
//!   - Example: `LOG_DIR=/var/log/docflow`
//!
//! # Log File Format
//!
//! - Rotation: one file per day (UTC) using `tracing_appender::rolling::RollingFileAppender`
//! - Filename: `{component}.{date}.log` format (e.g., `issuer.2026-01-03.log`)
//! - Format: UTC timestamp, log level, target, message
//! - ANSI colors: Disabled in file output

use std::{
	env,
	path::{Path, PathBuf},
	sync::OnceLock,
};

use anyhow::{Context, Result};
use tracing::debug;
use tracing_appender::{
	non_blocking,
	rolling::{self, Rotation},
};
use tracing_subscriber::{
	EnvFilter, fmt, layer::SubscriberExt, registry::Registry, util::SubscriberInitExt,
};

use crate::config::{DEFAULT_LOG_LEVEL, DEFAULT_LOG_TO_CONSOLE, LOG_COMPONENT_NAME};

// Store log guard to prevent log loss on program exit
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

/// Interpret a boolean switch such as `LOG_TO_CONSOLE`
///
/// Unrecognized values fall back to `default`.
pub fn parse_flag(value: &str, default: bool) -> bool {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => true,
		"false" | "0" | "no" | "off" => false,
		_ => default,
	}
}

/// Directory holding this component's log files under `log_root`
pub fn component_log_dir(log_root: &Path) -> PathBuf {
	log_root.join(LOG_COMPONENT_NAME)
}

/// Setup daily-rolling file logging.
///
/// Creates files like `issuer.2026-01-03.log` in `log_dir`.
fn setup_file_logging(log_dir: &Path) -> Result<non_blocking::NonBlocking> {
	std::fs::create_dir_all(log_dir)
		.with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

	let file_appender = rolling::RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(LOG_COMPONENT_NAME.to_string())
		.filename_suffix(".log")
		.build(log_dir)
		.with_context(|| {
			format!(
				"Failed to create rolling file appender in {}",
				log_dir.display()
			)
		})?;

	let (file_writer, guard) = non_blocking(file_appender);
	LOG_GUARD.set(guard).ok();

	Ok(file_writer)
}

/// Initialize logging with console output and optional file output
///
/// See module-level documentation for environment variable configuration.
pub fn init_logging() -> Result<()> {
	dotenv::dotenv().ok();

	let log_level = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

	let log_to_console = env::var("LOG_TO_CONSOLE")
		.map(|v| parse_flag(&v, DEFAULT_LOG_TO_CONSOLE))
		.unwrap_or(DEFAULT_LOG_TO_CONSOLE);

	let log_dir = env::var("LOG_DIR")
		.ok()
		.filter(|v| !v.trim().is_empty())
		.map(|root| component_log_dir(Path::new(&root)));

	let file_layer = match &log_dir {
		Some(dir) => Some(
			fmt::layer()
				.with_writer(setup_file_logging(dir)?)
				.with_timer(fmt::time::UtcTime::rfc_3339())
				.with_target(true)
				.with_ansi(false),
		),
		None => None,
	};

	let console_layer = log_to_console.then(|| {
		fmt::layer()
			.with_writer(std::io::stderr)
			.with_timer(fmt::time::UtcTime::rfc_3339())
			.with_target(true)
			.with_ansi(true)
	});

	Registry::default()
		.with(filter)
		.with(file_layer)
		.with(console_layer)
		.try_init()
		.context("Failed to install tracing subscriber")?;

	debug!(target: "server", "Log level: {}", log_level);
	if let Some(dir) = &log_dir {
		debug!(
			target: "server",
			"Log file base name: {}/{}.YYYY-MM-DD.log (daily rolling)",
			dir.display(),
			LOG_COMPONENT_NAME
		);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_flag() {
		assert!(parse_flag("true", false));
		assert!(parse_flag("YES", false));
		assert!(parse_flag("1", false));
		assert!(!parse_flag("false", true));
		assert!(!parse_flag("no", true));
		assert!(parse_flag("maybe", true));
		assert!(!parse_flag("maybe", false));
	}

	#[test]
	fn test_component_log_dir() {
		assert_eq!(
			component_log_dir(Path::new("/var/log/docflow")),
			PathBuf::from("/var/log/docflow/issuer")
		);
	}
}
