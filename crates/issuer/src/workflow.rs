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

//! Document issuance workflow
//!
//! Runs the fixed sequence against the signing service:
//!
//! 1. create document (upload + metadata) -> document id, envelope id
//! 2. fetch document -> server-assigned id of the first recipient
//! 3. create a signature field for that recipient on the envelope
//! 4. distribute the document for signing
//!
//! Each step waits for the previous one and consumes its identifiers.
//! The first failure ends the run; a document created before the failure
//! stays behind as a draft.

use std::sync::Arc;

use docflow_sdk::{
	Client, ClientError, CreateDocumentRequest, DistributionResult, FieldSpec, FieldType,
	ResourceId, SourceFile,
};
use serde_json::Value;
use tracing::{error, info};

use crate::{
	config::{FieldCreatorKind, IssuerConfig},
	error::{IssuanceError, Step},
	fields::{FieldCreationError, FieldCreator, RawFieldCreator, SdkFieldCreator, pretty_json},
	service::SigningService,
};

/// Position of the signer whose placeholder anchors the signature field
const SIGNER_POSITION: usize = 1;

/// Identifiers and payloads produced by a completed run
#[derive(Debug, Clone)]
pub struct IssuanceReport {
	pub document_id: ResourceId,
	pub envelope_id: ResourceId,
	pub recipient_id: ResourceId,
	pub fields: Value,
	pub distribution: DistributionResult,
}

/// Issuance workflow orchestrator
pub struct IssuanceWorkflow {
	service: Box<dyn SigningService>,
	fields: Box<dyn FieldCreator>,
}

impl IssuanceWorkflow {
	pub fn new(service: Box<dyn SigningService>, fields: Box<dyn FieldCreator>) -> Self {
		Self { service, fields }
	}

	/// Wire the workflow to the service described by `config`
	///
	/// No request is sent here.
	pub fn from_config(config: &IssuerConfig) -> Result<Self, ClientError> {
		let client = Arc::new(Client::new(&config.server_url, &config.api_key)?);

		let fields: Box<dyn FieldCreator> = match config.field_creator {
			FieldCreatorKind::Raw => Box::new(RawFieldCreator::new(
				config.server_url.clone(),
				config.api_key.clone(),
			)),
			FieldCreatorKind::Sdk => Box::new(SdkFieldCreator::new(client.clone())),
		};

		Ok(Self::new(Box::new(client), fields))
	}

	pub fn field_creator_name(&self) -> &'static str {
		self.fields.name()
	}

	/// Run all four steps in order
	pub async fn run(
		&self,
		request: &CreateDocumentRequest,
		file: SourceFile,
	) -> Result<IssuanceReport, IssuanceError> {
		info!(target: "workflow", "Creating document...");
		let created = self
			.service
			.create_document(request, file)
			.await
			.map_err(IssuanceError::remote(Step::CreateDocument))?;
		info!(
			target: "workflow",
			id = %created.id,
			envelope_id = %created.envelope_id,
			"Document created"
		);

		info!(target: "workflow", "Fetching document...");
		let document = self
			.service
			.get_document(&created.id)
			.await
			.map_err(IssuanceError::remote(Step::FetchDocument))?;

		// Creation does not echo recipient ids; only the fetched record has them.
		let recipient_id = document
			.recipients
			.first()
			.map(|recipient| recipient.id.clone())
			.ok_or_else(|| IssuanceError::MissingRecipient {
				document_id: created.id.clone(),
			})?;
		info!(target: "workflow", recipient_id = %recipient_id, "Recipient ID");

		let specs = [FieldSpec::anchored(
			recipient_id.clone(),
			FieldType::Signature,
			SIGNER_POSITION,
		)];

		info!(target: "workflow", creator = self.fields.name(), "Creating fields...");
		let fields = match self.fields.create_fields(&created.envelope_id, &specs).await {
			Ok(fields) => fields,
			Err(e) => {
				if let FieldCreationError::Rejected { status, .. } = &e {
					error!(target: "workflow", status = *status, "Field creation failed");
				}
				return Err(e.into());
			}
		};
		info!(target: "workflow", "Fields created: {}", pretty_json(&fields));

		info!(target: "workflow", "Distributing document...");
		let distribution = self
			.service
			.distribute_document(&created.id)
			.await
			.map_err(IssuanceError::remote(Step::DistributeDocument))?;
		info!(target: "workflow", "Document distributed: {}", pretty_json(&distribution.0));

		Ok(IssuanceReport {
			document_id: created.id,
			envelope_id: created.envelope_id,
			recipient_id,
			fields,
			distribution,
		})
	}
}
