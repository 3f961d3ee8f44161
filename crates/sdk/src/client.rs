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

use std::time::Duration;

use reqwest::{
	Client as ReqwestClient, ClientBuilder, Response,
	header::{AUTHORIZATION, HeaderMap, HeaderValue},
	multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{
	CreateDocumentRequest, CreateDocumentResponse, CreateFieldsRequest, DistributeDocumentRequest,
	DistributionResult, Document, ResourceId, SourceFile,
};

/// Document creation endpoint (multipart upload)
pub const CREATE_DOCUMENT_PATH: &str = "/document/create";

/// Document lookup endpoint, followed by `/{id}`
pub const DOCUMENT_PATH: &str = "/document";

/// Document distribution endpoint
pub const DISTRIBUTE_DOCUMENT_PATH: &str = "/document/distribute";

/// Bulk field creation endpoint
pub const CREATE_FIELDS_PATH: &str = "/envelope/field/create-many";

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Network error: {0}")]
	Network(String),
	#[error("Serialization error: {0}")]
	Serialization(String),
	#[error("Server error: {status}: {body}")]
	Server { status: u16, body: String },
	#[error("Authentication error: {0}")]
	Authentication(String),
	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

/// Join a base server URL and an endpoint path
pub fn endpoint_url(base_url: &str, path: &str) -> String {
	format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Client for the document-signing service
///
/// Every request carries the API key in the `Authorization` header.
/// Non-success responses are translated into [`ClientError::Server`].
pub struct Client {
	base_url: String,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client with the given base URL and API key
	pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self, ClientError> {
		Self::with_config(base_url, api_key, None)
	}

	/// Create a new client with an optional request timeout
	pub fn with_config(
		base_url: impl Into<String>,
		api_key: &str,
		timeout: Option<Duration>,
	) -> Result<Self, ClientError> {
		let mut builder = ReqwestClient::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		Self::with_builder(base_url, api_key, builder)
	}

	/// Create a new client from a preconfigured [`reqwest::ClientBuilder`]
	///
	/// The `Authorization` header is added to the builder's default headers.
	pub fn with_builder(
		base_url: impl Into<String>,
		api_key: &str,
		builder: ClientBuilder,
	) -> Result<Self, ClientError> {
		let mut auth = HeaderValue::from_str(api_key)
			.map_err(|e| ClientError::Authentication(format!("Invalid API key: {}", e)))?;
		auth.set_sensitive(true);

		let mut headers = HeaderMap::new();
		headers.insert(AUTHORIZATION, auth);

		let client = builder
			.default_headers(headers)
			.build()
			.map_err(|e| ClientError::Network(format!("Failed to create HTTP client: {}", e)))?;

		let base_url: String = base_url.into();
		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			client,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Create a document
	///
	/// Uploads the source file together with the JSON payload as a
	/// multipart form. Not idempotent: each call creates a new draft.
	pub async fn create_document(
		&self,
		request: &CreateDocumentRequest,
		file: SourceFile,
	) -> Result<CreateDocumentResponse, ClientError> {
		let payload = serde_json::to_string(request)
			.map_err(|e| ClientError::Serialization(format!("Failed to encode payload: {}", e)))?;

		let file_part = Part::bytes(file.bytes)
			.file_name(file.file_name)
			.mime_str(&file.media_type)
			.map_err(|e| ClientError::Serialization(format!("Invalid media type: {}", e)))?;

		let form = Form::new().text("payload", payload).part("file", file_part);

		let response = self
			.client
			.post(endpoint_url(&self.base_url, CREATE_DOCUMENT_PATH))
			.multipart(form)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::parse_response(response).await
	}

	/// Get a document by ID, including its recipients
	pub async fn get_document(&self, document_id: &ResourceId) -> Result<Document, ClientError> {
		let url = format!(
			"{}/{}",
			endpoint_url(&self.base_url, DOCUMENT_PATH),
			document_id
		);

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::parse_response(response).await
	}

	/// Create several fields on an envelope in one call
	pub async fn create_fields(
		&self,
		request: &CreateFieldsRequest,
	) -> Result<serde_json::Value, ClientError> {
		let response = self
			.client
			.post(endpoint_url(&self.base_url, CREATE_FIELDS_PATH))
			.json(request)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::parse_response(response).await
	}

	/// Send a document to its recipients for signing
	pub async fn distribute_document(
		&self,
		document_id: &ResourceId,
	) -> Result<DistributionResult, ClientError> {
		let request = DistributeDocumentRequest {
			document_id: document_id.clone(),
		};

		let response = self
			.client
			.post(endpoint_url(&self.base_url, DISTRIBUTE_DOCUMENT_PATH))
			.json(&request)
			.send()
			.await
			.map_err(|e| ClientError::Network(format!("Request failed: {}", e)))?;

		Self::parse_response(response).await
	}

	async fn ensure_success(response: Response) -> Result<Response, ClientError> {
		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| format!("HTTP {}", status));
			return Err(ClientError::Server {
				status: status.as_u16(),
				body,
			});
		}
		Ok(response)
	}

	async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
		let response = Self::ensure_success(response).await?;
		let bytes = response
			.bytes()
			.await
			.map_err(|e| ClientError::InvalidResponse(format!("Failed to read body: {}", e)))?;

		serde_json::from_slice(&bytes)
			.map_err(|e| ClientError::Serialization(format!("Failed to parse response: {}", e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_client_creation() {
		let client = Client::new("https://sign.example.com/api/v2/", "api_key").unwrap();
		assert_eq!(client.base_url(), "https://sign.example.com/api/v2");
	}

	#[test]
	fn test_invalid_api_key_rejected() {
		let result = Client::new("https://sign.example.com", "bad\nkey");
		assert!(matches!(result, Err(ClientError::Authentication(_))));
	}

	#[test]
	fn test_endpoint_url() {
		assert_eq!(
			endpoint_url("https://sign.example.com/api/v2/", CREATE_FIELDS_PATH),
			"https://sign.example.com/api/v2/envelope/field/create-many"
		);
		assert_eq!(
			endpoint_url("http://localhost:3000", CREATE_DOCUMENT_PATH),
			"http://localhost:3000/document/create"
		);
	}

	#[test]
	fn test_server_error_display() {
		let err = ClientError::Server {
			status: 404,
			body: "{\"message\":\"Document not found\"}".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"Server error: 404: {\"message\":\"Document not found\"}"
		);
	}

	#[tokio::test]
	async fn test_unreachable_server_fails() {
		let client = Client::new("http://127.0.0.1:1", "api_key").unwrap();
		let result = client.get_document(&ResourceId::Number(1)).await;
		assert!(result.is_err());
	}
}
