const DEFAULT_REGISTRY: &str = "docker.io";
const DEFAULT_TAG: &str = "latest";

/// Registry and version extracted from an image tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub registry: String,
    pub version: String,
}

impl ImageInfo {
    /// Parses a docker-style image reference such as `quay.io/org/app:1.2`.
    ///
    /// Returns `None` for an empty reference.
    pub fn from_tag(image_tag: &str) -> Option<Self> {
        let reference = image_tag.trim();
        if reference.is_empty() {
            return None;
        }
        // digests carry no version information
        let reference = reference.split('@').next().unwrap_or(reference);

        let (registry, remainder) = match reference.split_once('/') {
            Some((first, rest)) if is_registry_host(first) => (first.to_string(), rest),
            _ => (DEFAULT_REGISTRY.to_string(), reference),
        };

        let last_segment = remainder.rsplit('/').next().unwrap_or(remainder);
        let version = match last_segment.rsplit_once(':') {
            Some((_, tag)) if !tag.is_empty() => tag.to_string(),
            _ => DEFAULT_TAG.to_string(),
        };

        Some(Self { registry, version })
    }
}

fn is_registry_host(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}
