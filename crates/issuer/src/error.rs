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

use std::fmt;

use docflow_sdk::{ClientError, ResourceId};
use thiserror::Error;

use crate::fields::FieldCreationError;

/// Workflow step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
	CreateDocument,
	FetchDocument,
	CreateFields,
	DistributeDocument,
}

impl fmt::Display for Step {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Step::CreateDocument => "create-document",
			Step::FetchDocument => "fetch-document",
			Step::CreateFields => "create-fields",
			Step::DistributeDocument => "distribute-document",
		};
		f.write_str(name)
	}
}

/// Error types for the issuance workflow
///
/// Every variant is fatal: the workflow stops at the failing step and
/// nothing already created on the service is rolled back.
#[derive(Debug, Error)]
pub enum IssuanceError {
	#[error("{step} failed")]
	Remote {
		step: Step,
		#[source]
		source: ClientError,
	},
	#[error("create-fields failed")]
	FieldCreation(#[from] FieldCreationError),
	#[error("document {document_id} has no recipients")]
	MissingRecipient { document_id: ResourceId },
}

impl IssuanceError {
	pub fn remote(step: Step) -> impl FnOnce(ClientError) -> Self {
		move |source| IssuanceError::Remote { step, source }
	}

	/// Step at which the workflow stopped
	pub fn step(&self) -> Step {
		match self {
			IssuanceError::Remote { step, .. } => *step,
			IssuanceError::FieldCreation(_) => Step::CreateFields,
			IssuanceError::MissingRecipient { .. } => Step::FetchDocument,
		}
	}
}
