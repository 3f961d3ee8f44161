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

use std::{env, fmt, path::PathBuf};

use chrono::Local;
use docflow_sdk::{CreateDocumentRequest, DocumentMeta, NewRecipient};
use serde::Deserialize;
use thiserror::Error;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "issuer";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = true;

// Workflow configuration constants
/// Environment variable naming an optional configuration file
pub const CONFIG_FILE_ENV: &str = "DOCFLOW_CONFIG";

/// Default source document (can be overridden by DOCUMENT_PATH)
pub const DEFAULT_DOCUMENT_PATH: &str = "test.pdf";

/// Default signer email (can be overridden by SIGNER_EMAIL)
pub const DEFAULT_SIGNER_EMAIL: &str = "test@example.com";

/// Default signer display name (can be overridden by SIGNER_NAME)
pub const DEFAULT_SIGNER_NAME: &str = "Test Signer";

/// Default document timezone (can be overridden by DOCUMENT_TIMEZONE)
pub const DEFAULT_TIMEZONE: &str = "America/Vancouver";

/// Default date format (can be overridden by DOCUMENT_DATE_FORMAT)
pub const DEFAULT_DATE_FORMAT: &str = "MM/dd/yyyy hh:mm a";

/// Default document language (can be overridden by DOCUMENT_LANGUAGE)
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default signing email subject (can be overridden by EMAIL_SUBJECT)
pub const DEFAULT_SUBJECT: &str = "SDK Field Creation Test";

/// Default signing email message (can be overridden by EMAIL_MESSAGE)
pub const DEFAULT_MESSAGE: &str = "Testing the createMany field workaround.";

/// Error types for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Missing {}", .0.join(" or "))]
	Missing(Vec<&'static str>),
	#[error("Invalid value for {key}: {reason}")]
	Invalid { key: &'static str, reason: String },
	#[error("Failed to load configuration: {0}")]
	Source(#[from] config::ConfigError),
}

/// Which [`FieldCreator`](crate::fields::FieldCreator) implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldCreatorKind {
	/// Direct protocol call with manual status handling
	#[default]
	Raw,
	/// Typed SDK client call
	Sdk,
}

impl std::str::FromStr for FieldCreatorKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"raw" => Ok(FieldCreatorKind::Raw),
			"sdk" => Ok(FieldCreatorKind::Sdk),
			other => Err(ConfigError::Invalid {
				key: "FIELD_CREATOR",
				reason: format!("expected `raw` or `sdk`, got `{}`", other),
			}),
		}
	}
}

/// Settings as collected from the environment and optional config file
///
/// Keys are the lowercased environment variable names.
#[derive(Debug, Default, Deserialize)]
pub struct RawSettings {
	pub api_key: Option<String>,
	pub server_url: Option<String>,
	pub document_path: Option<String>,
	pub document_title: Option<String>,
	pub signer_email: Option<String>,
	pub signer_name: Option<String>,
	pub document_timezone: Option<String>,
	pub document_date_format: Option<String>,
	pub document_language: Option<String>,
	pub email_subject: Option<String>,
	pub email_message: Option<String>,
	pub field_creator: Option<String>,
}

/// Issuance workflow configuration
///
/// Built once at start-up and passed into the workflow; nothing downstream
/// reads process state.
#[derive(Clone)]
pub struct IssuerConfig {
	pub api_key: String,
	pub server_url: String,
	pub document_path: PathBuf,
	pub title: String,
	pub signer: NewRecipient,
	pub meta: DocumentMeta,
	pub field_creator: FieldCreatorKind,
}

impl fmt::Debug for IssuerConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IssuerConfig")
			.field("api_key", &"<redacted>")
			.field("server_url", &self.server_url)
			.field("document_path", &self.document_path)
			.field("title", &self.title)
			.field("signer", &self.signer)
			.field("meta", &self.meta)
			.field("field_creator", &self.field_creator)
			.finish()
	}
}

impl IssuerConfig {
	/// Load configuration from `.env`, the process environment and, when
	/// `DOCFLOW_CONFIG` is set, a configuration file.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenv::dotenv().ok();

		let mut builder = config::Config::builder();
		if let Ok(path) = env::var(CONFIG_FILE_ENV) {
			builder = builder.add_source(config::File::with_name(&path));
		}
		let cfg = builder
			.add_source(config::Environment::default())
			.build()?;

		Self::from_config(cfg)
	}

	pub fn from_config(cfg: config::Config) -> Result<Self, ConfigError> {
		let raw: RawSettings = cfg.try_deserialize()?;
		Self::from_settings(raw)
	}

	/// Validate raw settings and apply defaults
	///
	/// Blank values count as absent.
	pub fn from_settings(raw: RawSettings) -> Result<Self, ConfigError> {
		let api_key = non_blank(raw.api_key);
		let server_url = non_blank(raw.server_url);

		let (api_key, server_url) = match (api_key, server_url) {
			(Some(api_key), Some(server_url)) => (api_key, server_url),
			(api_key, server_url) => {
				let mut missing = Vec::new();
				if api_key.is_none() {
					missing.push("API_KEY");
				}
				if server_url.is_none() {
					missing.push("SERVER_URL");
				}
				return Err(ConfigError::Missing(missing));
			}
		};

		let field_creator = match non_blank(raw.field_creator) {
			Some(value) => value.parse()?,
			None => FieldCreatorKind::default(),
		};

		let title = non_blank(raw.document_title).unwrap_or_else(default_title);

		let signer = NewRecipient::signer(
			non_blank(raw.signer_email).unwrap_or_else(|| DEFAULT_SIGNER_EMAIL.to_string()),
			non_blank(raw.signer_name).unwrap_or_else(|| DEFAULT_SIGNER_NAME.to_string()),
		);

		let meta = DocumentMeta {
			timezone: Some(or_default(raw.document_timezone, DEFAULT_TIMEZONE)),
			date_format: Some(or_default(raw.document_date_format, DEFAULT_DATE_FORMAT)),
			language: Some(or_default(raw.document_language, DEFAULT_LANGUAGE)),
			subject: Some(or_default(raw.email_subject, DEFAULT_SUBJECT)),
			message: Some(or_default(raw.email_message, DEFAULT_MESSAGE)),
		};

		Ok(Self {
			api_key,
			server_url,
			document_path: PathBuf::from(or_default(raw.document_path, DEFAULT_DOCUMENT_PATH)),
			title,
			signer,
			meta,
			field_creator,
		})
	}

	/// Document creation payload for this run
	pub fn document_request(&self) -> CreateDocumentRequest {
		CreateDocumentRequest {
			title: self.title.clone(),
			recipients: vec![self.signer.clone()],
			meta: Some(self.meta.clone()),
		}
	}
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
	non_blank(value).unwrap_or_else(|| default.to_string())
}

fn default_title() -> String {
	format!("SDK Test - {}", Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p"))
}
