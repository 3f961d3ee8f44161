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

use serde::{Deserialize, Serialize};

/// Media type of uploaded source documents
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Server-assigned identifier
///
/// The service hands out numeric ids for documents and recipients and
/// string ids for envelopes. Values are kept exactly as received so they
/// serialize back unchanged when threaded into later calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
	Number(i64),
	Text(String),
}

impl fmt::Display for ResourceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceId::Number(n) => write!(f, "{}", n),
			ResourceId::Text(s) => f.write_str(s),
		}
	}
}

impl From<i64> for ResourceId {
	fn from(value: i64) -> Self {
		ResourceId::Number(value)
	}
}

impl From<&str> for ResourceId {
	fn from(value: &str) -> Self {
		ResourceId::Text(value.to_string())
	}
}

impl From<String> for ResourceId {
	fn from(value: String) -> Self {
		ResourceId::Text(value)
	}
}

/// Recipient role
///
/// Roles added by the service later deserialize as [`RecipientRole::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipientRole {
	Signer,
	Approver,
	Cc,
	Viewer,
	Assistant,
	#[serde(other)]
	Unknown,
}

/// Field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
	Signature,
	FreeSignature,
	Initials,
	Name,
	Email,
	Date,
	Text,
}

impl FieldType {
	/// Key used for this field type inside placeholder tokens
	pub fn placeholder_key(&self) -> &'static str {
		match self {
			FieldType::Signature => "signature",
			FieldType::FreeSignature => "free_signature",
			FieldType::Initials => "initials",
			FieldType::Name => "name",
			FieldType::Email => "email",
			FieldType::Date => "date",
			FieldType::Text => "text",
		}
	}

	/// Placeholder token anchoring this field for the recipient at
	/// `position` (1-based), e.g. `{{signature,r1}}`.
	pub fn placeholder(&self, position: usize) -> String {
		format!("{{{{{},r{}}}}}", self.placeholder_key(), position)
	}
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
	Draft,
	Pending,
	Completed,
	Rejected,
	#[serde(other)]
	Unknown,
}

/// Source document uploaded on creation
#[derive(Debug, Clone)]
pub struct SourceFile {
	/// File name sent with the multipart part
	pub file_name: String,
	/// Declared media type
	pub media_type: String,
	/// Raw file content
	pub bytes: Vec<u8>,
}

impl SourceFile {
	pub fn pdf(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
		Self {
			file_name: file_name.into(),
			media_type: PDF_MEDIA_TYPE.to_string(),
			bytes,
		}
	}

	/// Whether the content starts with the `%PDF-` header
	pub fn has_pdf_header(&self) -> bool {
		self.bytes.starts_with(b"%PDF-")
	}
}

/// Recipient submitted with a new document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipient {
	pub email: String,
	pub name: String,
	pub role: RecipientRole,
}

impl NewRecipient {
	pub fn signer(email: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			name: name.into(),
			role: RecipientRole::Signer,
		}
	}
}

/// Document meta applied to the signing emails and date fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
	/// IANA timezone identifier (e.g., "America/Vancouver")
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timezone: Option<String>,
	/// Date format pattern (e.g., "MM/dd/yyyy hh:mm a")
	#[serde(skip_serializing_if = "Option::is_none")]
	pub date_format: Option<String>,
	/// Language code (e.g., "en")
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language: Option<String>,
	/// Email subject line
	#[serde(skip_serializing_if = "Option::is_none")]
	pub subject: Option<String>,
	/// Email message body
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

/// Request to create a document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
	pub title: String,
	pub recipients: Vec<NewRecipient>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub meta: Option<DocumentMeta>,
}

/// Response from creating a document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentResponse {
	/// Document identity
	pub id: ResourceId,
	/// Envelope identity, a separate namespace from `id`
	pub envelope_id: ResourceId,
}

/// Recipient as stored by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
	pub id: ResourceId,
	pub email: String,
	#[serde(default)]
	pub name: String,
	pub role: RecipientRole,
	#[serde(default)]
	pub signing_order: Option<u32>,
}

/// Document record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	pub id: ResourceId,
	pub envelope_id: ResourceId,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub status: Option<DocumentStatus>,
	/// Recipients in submission order
	#[serde(default)]
	pub recipients: Vec<Recipient>,
}

/// A field to place on an envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
	pub recipient_id: ResourceId,
	#[serde(rename = "type")]
	pub field_type: FieldType,
	/// Token inside the PDF content the field is anchored to
	pub placeholder: String,
}

impl FieldSpec {
	/// Field anchored to the placeholder of the recipient at `position` (1-based)
	pub fn anchored(recipient_id: ResourceId, field_type: FieldType, position: usize) -> Self {
		Self {
			recipient_id,
			field_type,
			placeholder: field_type.placeholder(position),
		}
	}
}

/// Request body of the bulk field-creation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldsRequest {
	pub envelope_id: ResourceId,
	pub data: Vec<FieldSpec>,
}

/// Request body of the distribute endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeDocumentRequest {
	pub document_id: ResourceId,
}

/// Confirmation returned when a document is sent for signing
///
/// The payload shape is service-defined and is only logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistributionResult(pub serde_json::Value);

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_signature_placeholder() {
		assert_eq!(FieldType::Signature.placeholder(1), "{{signature,r1}}");
		assert_eq!(FieldType::Initials.placeholder(3), "{{initials,r3}}");
	}

	#[test]
	fn test_resource_id_keeps_wire_form() {
		let numeric: ResourceId = serde_json::from_value(json!(42)).unwrap();
		let text: ResourceId = serde_json::from_value(json!("envelope_abc")).unwrap();

		assert_eq!(numeric, ResourceId::Number(42));
		assert_eq!(text, ResourceId::Text("envelope_abc".to_string()));
		assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(42));
		assert_eq!(serde_json::to_value(&text).unwrap(), json!("envelope_abc"));
		assert_eq!(numeric.to_string(), "42");
	}

	#[test]
	fn test_field_spec_wire_shape() {
		let spec = FieldSpec::anchored(ResourceId::Number(7), FieldType::Signature, 1);
		assert_eq!(
			serde_json::to_value(&spec).unwrap(),
			json!({
				"recipientId": 7,
				"type": "SIGNATURE",
				"placeholder": "{{signature,r1}}"
			})
		);
	}

	#[test]
	fn test_create_request_wire_shape() {
		let request = CreateDocumentRequest {
			title: "Lease".to_string(),
			recipients: vec![NewRecipient::signer("test@example.com", "Test Signer")],
			meta: Some(DocumentMeta {
				timezone: Some("America/Vancouver".to_string()),
				date_format: Some("MM/dd/yyyy hh:mm a".to_string()),
				language: Some("en".to_string()),
				subject: None,
				message: None,
			}),
		};

		assert_eq!(
			serde_json::to_value(&request).unwrap(),
			json!({
				"title": "Lease",
				"recipients": [
					{ "email": "test@example.com", "name": "Test Signer", "role": "SIGNER" }
				],
				"meta": {
					"timezone": "America/Vancouver",
					"dateFormat": "MM/dd/yyyy hh:mm a",
					"language": "en"
				}
			})
		);
	}

	#[test]
	fn test_document_ignores_unknown_fields() {
		let document: Document = serde_json::from_value(json!({
			"id": 12,
			"envelopeId": "envelope_xyz",
			"title": "Lease",
			"status": "SEALED_SOMEHOW",
			"userId": 3,
			"recipients": [
				{
					"id": 99,
					"email": "test@example.com",
					"name": "Test Signer",
					"role": "SIGNER",
					"signingStatus": "NOT_SIGNED"
				}
			]
		}))
		.unwrap();

		assert_eq!(document.id, ResourceId::Number(12));
		assert_eq!(document.status, Some(DocumentStatus::Unknown));
		assert_eq!(document.recipients.len(), 1);
		assert_eq!(document.recipients[0].id, ResourceId::Number(99));
		assert_eq!(document.recipients[0].role, RecipientRole::Signer);
	}

	#[test]
	fn test_unknown_recipient_role() {
		let recipient: Recipient = serde_json::from_value(json!({
			"id": "rcp_1",
			"email": "witness@example.com",
			"name": "Witness",
			"role": "WITNESS"
		}))
		.unwrap();

		assert_eq!(recipient.id, ResourceId::from("rcp_1"));
		assert_eq!(recipient.role, RecipientRole::Unknown);
	}

	#[test]
	fn test_pdf_header_detection() {
		assert!(SourceFile::pdf("a.pdf", b"%PDF-1.7\n".to_vec()).has_pdf_header());
		assert!(!SourceFile::pdf("a.pdf", b"hello".to_vec()).has_pdf_header());
	}
}
