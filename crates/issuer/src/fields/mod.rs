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

//! Field creation on an envelope

mod raw;
mod sdk;

use async_trait::async_trait;
use docflow_sdk::{ClientError, FieldSpec, ResourceId};
use thiserror::Error;

pub use raw::{RawFieldCreator, interpret_response};
pub use sdk::SdkFieldCreator;

/// Error types for field creation
#[derive(Debug, Error)]
pub enum FieldCreationError {
	#[error("Request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("Failed to encode request: {0}")]
	Encode(#[from] serde_json::Error),
	#[error("Field creation rejected ({status}): {}", pretty_json(.body))]
	Rejected {
		status: u16,
		body: serde_json::Value,
	},
	#[error("Field creation returned an unreadable body ({status}): {reason}")]
	InvalidBody { status: u16, reason: String },
	#[error(transparent)]
	Client(#[from] ClientError),
}

/// Field creator trait - places fields on an existing envelope
///
/// Each field's recipient must belong to the envelope's document; the
/// service enforces this, not the creator.
///
/// Implementations are interchangeable: the workflow never knows whether
/// fields go through the typed SDK client or a hand-built request.
#[async_trait]
pub trait FieldCreator: Send + Sync {
	/// Create all `fields` on `envelope_id` in one call
	///
	/// Returns the service's creation payload as-is.
	async fn create_fields(
		&self,
		envelope_id: &ResourceId,
		fields: &[FieldSpec],
	) -> Result<serde_json::Value, FieldCreationError>;

	/// Short name used in logs
	fn name(&self) -> &'static str;
}

/// Render JSON the way it is shown to the operator
pub fn pretty_json(value: &serde_json::Value) -> String {
	serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
