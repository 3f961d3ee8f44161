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

//! Docflow Issuer
//!
//! Issues a document for signature through the signing service: uploads the
//! source PDF, creates the document with one signer, anchors a signature
//! field to the signer's placeholder and sends the document out.
//!
//! The orchestrator depends on two capabilities:
//! - [`SigningService`] for document create / fetch / distribute
//! - [`FieldCreator`] for bulk field creation, with a raw-protocol and an
//!   SDK-backed implementation

pub mod config;
pub mod error;
pub mod fields;
pub mod logging;
pub mod service;
pub mod workflow;

pub use config::{ConfigError, FieldCreatorKind, IssuerConfig};
pub use error::{IssuanceError, Step};
pub use fields::{FieldCreationError, FieldCreator, RawFieldCreator, SdkFieldCreator};
pub use service::SigningService;
pub use workflow::{IssuanceReport, IssuanceWorkflow};
