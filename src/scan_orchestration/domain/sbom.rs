use serde::{Deserialize, Serialize};

/// Software bill of materials for an image.
///
/// `content == None` means the SBOM has not been computed yet, which is
/// different from a computed document that lists no packages. For a
/// workload-specific ("relevant") SBOM, `image_id` carries the instance id
/// it is keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sbom {
    pub image_id: String,
    pub creator_version: String,
    #[serde(default)]
    pub content: Option<serde_json::Value>,
}

impl Sbom {
    pub fn new(
        image_id: impl Into<String>,
        creator_version: impl Into<String>,
        content: serde_json::Value,
    ) -> Self {
        Self {
            image_id: image_id.into(),
            creator_version: creator_version.into(),
            content: Some(content),
        }
    }

    /// An SBOM placeholder with no content
    pub fn absent(image_id: impl Into<String>, creator_version: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            creator_version: creator_version.into(),
            content: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.content.is_some()
    }
}
