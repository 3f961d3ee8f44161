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

//! Issuer entry point
//!
//! Exits with status 0 once the document is distributed and 1 on missing
//! configuration or on the first failing step.

use std::{path::Path, process::ExitCode};

use anyhow::{Context, Result};
use docflow_issuer::{IssuanceWorkflow, IssuerConfig, logging::init_logging};
use docflow_sdk::SourceFile;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
	if let Err(e) = init_logging() {
		eprintln!("Failed to initialize logging: {:#}", e);
		return ExitCode::FAILURE;
	}

	// Configuration problems must surface before any file or network access
	let config = match IssuerConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			error!(target: "server", "Configuration error: {}", e);
			return ExitCode::FAILURE;
		}
	};
	info!(target: "server", server_url = %config.server_url, "Configuration loaded");

	match run(&config).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			error!(target: "server", "Fatal error: {:#}", e);
			ExitCode::FAILURE
		}
	}
}

async fn run(config: &IssuerConfig) -> Result<()> {
	let workflow =
		IssuanceWorkflow::from_config(config).context("Failed to create signing client")?;

	let file = load_source_file(&config.document_path)?;
	let request = config.document_request();

	let report = workflow.run(&request, file).await?;
	info!(
		target: "server",
		document_id = %report.document_id,
		envelope_id = %report.envelope_id,
		"Issuance complete"
	);

	Ok(())
}

fn load_source_file(path: &Path) -> Result<SourceFile> {
	let bytes = std::fs::read(path)
		.with_context(|| format!("Failed to read source document {}", path.display()))?;

	let file_name = path
		.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| "document.pdf".to_string());

	let file = SourceFile::pdf(file_name, bytes);
	if !file.has_pdf_header() {
		warn!(target: "server", path = %path.display(), "Source document does not start with a PDF header");
	}

	Ok(file)
}
