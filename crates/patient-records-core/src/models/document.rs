//! Patient document models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FileType {
    Image,
    Pdf,
    Document,
    LabResult,
    Prescription,
    Letter,
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Pdf => "pdf",
            FileType::Document => "document",
            FileType::LabResult => "lab-result",
            FileType::Prescription => "prescription",
            FileType::Letter => "letter",
            FileType::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(FileType::Image),
            "pdf" => Ok(FileType::Pdf),
            "document" => Ok(FileType::Document),
            "lab-result" => Ok(FileType::LabResult),
            "prescription" => Ok(FileType::Prescription),
            "letter" => Ok(FileType::Letter),
            "other" => Ok(FileType::Other),
            other => Err(format!("Unknown file type: {}", other)),
        }
    }
}

/// Metadata for a file attached to a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientDocument {
    pub id: String,
    pub patient_id: String,
    pub file_name: String,
    pub file_type: FileType,
    /// Placeholder location, no bytes are stored
    pub file_url: String,
    /// Size in bytes
    pub file_size: u64,
    /// Full name of the uploader
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Fields supplied when attaching a document.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub patient_id: String,
    pub file_name: String,
    pub file_type: FileType,
    pub file_size: u64,
    pub uploaded_by: String,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewDocument {
    pub(crate) fn into_document(self, id: String) -> PatientDocument {
        PatientDocument {
            id,
            file_url: placeholder_url(&self.file_name),
            patient_id: self.patient_id,
            file_name: self.file_name,
            file_type: self.file_type,
            file_size: self.file_size,
            uploaded_by: self.uploaded_by,
            uploaded_at: Utc::now(),
            description: self.description,
            tags: self.tags,
        }
    }
}

fn placeholder_url(file_name: &str) -> String {
    format!("/documents/{}", file_name)
}
