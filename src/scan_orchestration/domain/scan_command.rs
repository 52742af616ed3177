use serde::{Deserialize, Serialize};

/// Session metadata attached to a scan command by the issuer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "jobIDs", default)]
    pub job_ids: Vec<String>,
}

/// ScanCommand identifies the workload to scan.
///
/// Issued by the inbound transport and consumed read-only by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanCommand {
    /// Content-addressed image identifier (the cache key for base artifacts)
    #[serde(default)]
    pub image_hash: String,
    /// Human-readable image reference, e.g. `quay.io/org/app:1.2.3`
    #[serde(default)]
    pub image_tag: String,
    /// Workload instance identifier (the cache key for relevant SBOMs)
    #[serde(rename = "wlid", default)]
    pub instance_id: String,
    #[serde(default)]
    pub container_name: String,
    #[serde(default)]
    pub session: Session,
}

impl ScanCommand {
    pub fn new(image_hash: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            image_hash: image_hash.into(),
            instance_id: instance_id.into(),
            ..Self::default()
        }
    }

    pub fn with_image_tag(mut self, image_tag: impl Into<String>) -> Self {
        self.image_tag = image_tag.into();
        self
    }

    pub fn with_container_name(mut self, container_name: impl Into<String>) -> Self {
        self.container_name = container_name.into();
        self
    }

    pub fn with_job_ids(mut self, job_ids: Vec<String>) -> Self {
        self.session.job_ids = job_ids;
        self
    }
}
