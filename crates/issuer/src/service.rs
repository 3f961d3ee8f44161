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
use docflow_sdk::{
	Client, ClientError, CreateDocumentRequest, CreateDocumentResponse, DistributionResult,
	Document, ResourceId, SourceFile,
};

/// Signing service trait - the document operations the workflow drives
///
/// Implemented by the SDK [`Client`]; tests substitute in-memory fakes.
#[async_trait]
pub trait SigningService: Send + Sync {
	/// Create a draft document from `file`. Not idempotent.
	async fn create_document(
		&self,
		request: &CreateDocumentRequest,
		file: SourceFile,
	) -> Result<CreateDocumentResponse, ClientError>;

	/// Fetch a document with its recipients in submission order
	async fn get_document(&self, document_id: &ResourceId) -> Result<Document, ClientError>;

	/// Send a document to its recipients for signing
	async fn distribute_document(
		&self,
		document_id: &ResourceId,
	) -> Result<DistributionResult, ClientError>;
}

#[async_trait]
impl SigningService for Client {
	async fn create_document(
		&self,
		request: &CreateDocumentRequest,
		file: SourceFile,
	) -> Result<CreateDocumentResponse, ClientError> {
		Client::create_document(self, request, file).await
	}

	async fn get_document(&self, document_id: &ResourceId) -> Result<Document, ClientError> {
		Client::get_document(self, document_id).await
	}

	async fn distribute_document(
		&self,
		document_id: &ResourceId,
	) -> Result<DistributionResult, ClientError> {
		Client::distribute_document(self, document_id).await
	}
}

#[async_trait]
impl<T: SigningService + ?Sized> SigningService for Arc<T> {
	async fn create_document(
		&self,
		request: &CreateDocumentRequest,
		file: SourceFile,
	) -> Result<CreateDocumentResponse, ClientError> {
		(**self).create_document(request, file).await
	}

	async fn get_document(&self, document_id: &ResourceId) -> Result<Document, ClientError> {
		(**self).get_document(document_id).await
	}

	async fn distribute_document(
		&self,
		document_id: &ResourceId,
	) -> Result<DistributionResult, ClientError> {
		(**self).distribute_document(document_id).await
	}
}
