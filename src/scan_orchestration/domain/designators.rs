use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ATTRIBUTE_CUSTOMER_GUID: &str = "customerGUID";
pub const ATTRIBUTE_CLUSTER: &str = "cluster";
pub const ATTRIBUTE_NAMESPACE: &str = "namespace";
pub const ATTRIBUTE_KIND: &str = "kind";
pub const ATTRIBUTE_NAME: &str = "name";
pub const ATTRIBUTE_CONTAINER_NAME: &str = "containerName";

const WLID_PREFIX: &str = "wlid://";

/// Key/value metadata identifying the tenant and workload a report belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designators {
    #[serde(default)]
    pub wlid: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Designators {
    /// Builds designators for a workload.
    ///
    /// The instance id is expected in the form
    /// `wlid://cluster-<cluster>/namespace-<namespace>/<kind>-<name>`. Segments
    /// that don't follow that shape are skipped rather than rejected.
    pub fn for_workload(instance_id: &str, tenant_id: &str, container_name: &str) -> Self {
        let mut attributes = BTreeMap::new();
        if !tenant_id.is_empty() {
            attributes.insert(ATTRIBUTE_CUSTOMER_GUID.to_string(), tenant_id.to_string());
        }
        if !container_name.is_empty() {
            attributes.insert(
                ATTRIBUTE_CONTAINER_NAME.to_string(),
                container_name.to_string(),
            );
        }

        let path = instance_id.strip_prefix(WLID_PREFIX).unwrap_or(instance_id);
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        if let Some(cluster) = segments.next().and_then(|s| s.strip_prefix("cluster-")) {
            attributes.insert(ATTRIBUTE_CLUSTER.to_string(), cluster.to_string());
        }
        if let Some(namespace) = segments.next().and_then(|s| s.strip_prefix("namespace-")) {
            attributes.insert(ATTRIBUTE_NAMESPACE.to_string(), namespace.to_string());
        }
        if let Some((kind, name)) = segments.next().and_then(|s| s.split_once('-')) {
            attributes.insert(ATTRIBUTE_KIND.to_string(), kind.to_string());
            attributes.insert(ATTRIBUTE_NAME.to_string(), name.to_string());
        }

        Self {
            wlid: instance_id.to_string(),
            attributes,
        }
    }

    pub fn attribute(&self, key: &str) -> &str {
        self.attributes.get(key).map(String::as_str).unwrap_or("")
    }

    /// Tenant identifier, empty when unknown
    pub fn tenant_id(&self) -> &str {
        self.attribute(ATTRIBUTE_CUSTOMER_GUID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_workload_parses_wlid() {
        let designators = Designators::for_workload(
            "wlid://cluster-prod/namespace-shop/deployment-checkout-api",
            "tenant-1",
            "api",
        );
        assert_eq!(designators.tenant_id(), "tenant-1");
        assert_eq!(designators.attribute(ATTRIBUTE_CLUSTER), "prod");
        assert_eq!(designators.attribute(ATTRIBUTE_NAMESPACE), "shop");
        assert_eq!(designators.attribute(ATTRIBUTE_KIND), "deployment");
        // only the first '-' separates kind from name
        assert_eq!(designators.attribute(ATTRIBUTE_NAME), "checkout-api");
        assert_eq!(designators.attribute(ATTRIBUTE_CONTAINER_NAME), "api");
    }

    #[test]
    fn test_for_workload_tolerates_malformed_wlid() {
        let designators = Designators::for_workload("not-a-wlid", "", "");
        assert_eq!(designators.wlid, "not-a-wlid");
        assert!(designators.attributes.is_empty());
        assert_eq!(designators.tenant_id(), "");
    }
}
