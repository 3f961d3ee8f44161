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

use async_trait::async_trait;
use docflow_sdk::{
	CreateFieldsRequest, FieldSpec, ResourceId,
	client::{CREATE_FIELDS_PATH, endpoint_url},
};
use reqwest::{
	Request, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde_json::Value;
use tracing::debug;

use super::{FieldCreationError, FieldCreator};

/// Field creator that talks to the bulk endpoint directly
///
/// Builds the `{ envelopeId, data }` body itself and sets the
/// `Authorization` and `Content-Type` headers by hand. Non-2xx statuses are
/// not translated by any library, so the status is checked explicitly and
/// the parsed error body is surfaced.
pub struct RawFieldCreator {
	http: reqwest::Client,
	server_url: String,
	api_key: String,
}

impl RawFieldCreator {
	pub fn new(server_url: impl Into<String>, api_key: impl Into<String>) -> Self {
		Self::with_client(reqwest::Client::new(), server_url, api_key)
	}

	/// Reuse an existing [`reqwest::Client`]
	pub fn with_client(
		http: reqwest::Client,
		server_url: impl Into<String>,
		api_key: impl Into<String>,
	) -> Self {
		Self {
			http,
			server_url: server_url.into(),
			api_key: api_key.into(),
		}
	}

	/// Build the create-many request without sending it
	pub fn build_request(
		&self,
		envelope_id: &ResourceId,
		fields: &[FieldSpec],
	) -> Result<Request, FieldCreationError> {
		let body = CreateFieldsRequest {
			envelope_id: envelope_id.clone(),
			data: fields.to_vec(),
		};
		let bytes = serde_json::to_vec(&body)?;

		let request = self
			.http
			.post(endpoint_url(&self.server_url, CREATE_FIELDS_PATH))
			.header(AUTHORIZATION, self.api_key.as_str())
			.header(CONTENT_TYPE, "application/json")
			.body(bytes)
			.build()?;

		Ok(request)
	}
}

/// Turn a raw create-many response into the creation payload or an error
///
/// A success status must carry a JSON body. Error bodies are parsed as
/// JSON when possible; otherwise their text is kept.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value, FieldCreationError> {
	if !status.is_success() {
		let parsed = serde_json::from_slice(body)
			.unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()));
		return Err(FieldCreationError::Rejected {
			status: status.as_u16(),
			body: parsed,
		});
	}

	serde_json::from_slice(body).map_err(|e| FieldCreationError::InvalidBody {
		status: status.as_u16(),
		reason: e.to_string(),
	})
}

#[async_trait]
impl FieldCreator for RawFieldCreator {
	async fn create_fields(
		&self,
		envelope_id: &ResourceId,
		fields: &[FieldSpec],
	) -> Result<Value, FieldCreationError> {
		let request = self.build_request(envelope_id, fields)?;
		debug!(target: "workflow", url = %request.url(), count = fields.len(), "POST create-many");

		let response = self.http.execute(request).await?;
		let status = response.status();
		let body = response.bytes().await?;

		interpret_response(status, &body)
	}

	fn name(&self) -> &'static str {
		"raw"
	}
}
