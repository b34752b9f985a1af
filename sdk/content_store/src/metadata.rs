//! Typed profile metadata documents.
//!
//! The ledger stores only a content address per profile; the document behind
//! it is one of the structs below, serialized as camelCase JSON. Documents
//! carry an explicit `version` and reject unknown fields so a malformed
//! upload is caught when it is published or fetched, not when it is rendered.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::address::ContentAddress;
use crate::collab::{MetadataPinner, UploadedFile};
use crate::error::MetadataError;

pub const METADATA_VERSION: u32 = 1;

/// A named attachment stored in the content store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocumentRef {
    pub name: String,
    pub hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientMetadata {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub id_type: String,
    pub id_number: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub current_treatment: Vec<String>,
    #[serde(default)]
    pub condition: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub prescriptions: Vec<DocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Display URL; descriptive only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo_hash: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Certification {
    pub name: String,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DoctorMetadata {
    pub version: u32,
    pub name: String,
    pub specialization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    pub license_number: String,
    /// Content address of the profile photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_proof: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_document: Option<String>,
}

pub trait ProfileMetadata: Serialize + DeserializeOwned + Send + Sync {
    fn validate(&self) -> Result<(), MetadataError>;

    /// Parses and validates a fetched document.
    fn from_json(bytes: &[u8]) -> Result<Self, MetadataError> {
        let metadata: Self = serde_json::from_slice(bytes)?;
        metadata.validate()?;
        Ok(metadata)
    }
}

fn check_version(version: u32) -> Result<(), MetadataError> {
    if version != METADATA_VERSION {
        return Err(MetadataError::UnsupportedVersion(version));
    }
    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), MetadataError> {
    if value.trim().is_empty() {
        return Err(MetadataError::MissingField(field));
    }
    Ok(())
}

fn check_address(field: &'static str, value: &str) -> Result<(), MetadataError> {
    ContentAddress::parse(value)
        .map(|_| ())
        .map_err(|source| MetadataError::BadDocument { field, source })
}

impl PatientMetadata {
    pub fn new(
        name: impl Into<String>,
        id_type: impl Into<String>,
        id_number: impl Into<String>,
    ) -> Self {
        Self {
            version: METADATA_VERSION,
            name: name.into(),
            age: None,
            gender: None,
            id_type: id_type.into(),
            id_number: id_number.into(),
            medical_history: Vec::new(),
            current_treatment: Vec::new(),
            condition: Vec::new(),
            allergies: Vec::new(),
            documents: Vec::new(),
            prescriptions: Vec::new(),
            dob: None,
            contact: None,
            photo: None,
            profile_photo_hash: None,
        }
    }

    /// Files the relay stored under a known form field; returns `false` for
    /// fields this document has no slot for.
    pub fn attach(&mut self, file: &UploadedFile) -> bool {
        let doc = DocumentRef {
            name: file.original_name.clone(),
            hash: file.content_address.to_string(),
        };
        match file.field_name.as_str() {
            "profilePhoto" => self.profile_photo_hash = Some(doc.hash),
            "medicalFiles" => self.documents.push(doc),
            "prescriptions" => self.prescriptions.push(doc),
            _ => return false,
        }
        true
    }
}

impl ProfileMetadata for PatientMetadata {
    fn validate(&self) -> Result<(), MetadataError> {
        check_version(self.version)?;
        require("name", &self.name)?;
        require("idType", &self.id_type)?;
        require("idNumber", &self.id_number)?;
        for doc in &self.documents {
            check_address("documents", &doc.hash)?;
        }
        for doc in &self.prescriptions {
            check_address("prescriptions", &doc.hash)?;
        }
        if let Some(hash) = &self.profile_photo_hash {
            check_address("profilePhotoHash", hash)?;
        }
        Ok(())
    }
}

impl DoctorMetadata {
    pub fn new(
        name: impl Into<String>,
        specialization: impl Into<String>,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            version: METADATA_VERSION,
            name: name.into(),
            specialization: specialization.into(),
            experience: None,
            license_number: license_number.into(),
            photo: None,
            certifications: Vec::new(),
            id_proof: None,
            license_document: None,
        }
    }

    pub fn attach(&mut self, file: &UploadedFile) -> bool {
        let hash = file.content_address.to_string();
        match file.field_name.as_str() {
            "photo" => self.photo = Some(hash),
            "idProof" => self.id_proof = Some(hash),
            "licenseDocument" => self.license_document = Some(hash),
            "certifications" => self.certifications.push(Certification {
                name: file.original_name.clone(),
                hash,
                url: None,
            }),
            _ => return false,
        }
        true
    }
}

impl ProfileMetadata for DoctorMetadata {
    fn validate(&self) -> Result<(), MetadataError> {
        check_version(self.version)?;
        require("name", &self.name)?;
        require("specialization", &self.specialization)?;
        require("licenseNumber", &self.license_number)?;
        for cert in &self.certifications {
            check_address("certifications", &cert.hash)?;
        }
        if let Some(hash) = &self.photo {
            check_address("photo", hash)?;
        }
        if let Some(hash) = &self.id_proof {
            check_address("idProof", hash)?;
        }
        if let Some(hash) = &self.license_document {
            check_address("licenseDocument", hash)?;
        }
        Ok(())
    }
}

/// Validates `metadata` and pins it, returning the address to record with
/// `update_metadata_ref` or at registration.
pub async fn publish_metadata<M: ProfileMetadata>(
    metadata: &M,
    pinner: &dyn MetadataPinner,
) -> Result<ContentAddress, MetadataError> {
    metadata.validate()?;
    let document = serde_json::to_value(metadata)?;
    let address = pinner.pin_json(document).await?;
    info!(address = %address, "metadata pinned");
    Ok(address)
}
