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

use std::sync::Arc;

use async_trait::async_trait;
use docflow_sdk::{Client, ClientError, CreateFieldsRequest, FieldSpec, ResourceId};
use serde_json::Value;

use super::{FieldCreationError, FieldCreator};

/// Field creator backed by the SDK client's typed bulk call
///
/// Error statuses arrive already translated by the client. A rejection is
/// re-shaped into [`FieldCreationError::Rejected`] so callers see the same
/// error whichever creator is configured.
pub struct SdkFieldCreator {
	client: Arc<Client>,
}

impl SdkFieldCreator {
	pub fn new(client: Arc<Client>) -> Self {
		Self { client }
	}
}

#[async_trait]
impl FieldCreator for SdkFieldCreator {
	async fn create_fields(
		&self,
		envelope_id: &ResourceId,
		fields: &[FieldSpec],
	) -> Result<Value, FieldCreationError> {
		let request = CreateFieldsRequest {
			envelope_id: envelope_id.clone(),
			data: fields.to_vec(),
		};

		match self.client.create_fields(&request).await {
			Ok(value) => Ok(value),
			Err(ClientError::Server { status, body }) => Err(FieldCreationError::Rejected {
				status,
				body: serde_json::from_str(&body).unwrap_or(Value::String(body)),
			}),
			Err(e) => Err(e.into()),
		}
	}

	fn name(&self) -> &'static str {
		"sdk"
	}
}
