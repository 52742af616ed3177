use crate::scan_orchestration::domain::designators::{
    ATTRIBUTE_CLUSTER, ATTRIBUTE_CONTAINER_NAME, ATTRIBUTE_NAMESPACE,
};
use crate::scan_orchestration::domain::{
    Designators, ImageInfo, ScanContext, ScanSummary, Severity, SeverityStats,
    VulnerabilityRecord,
};
use std::collections::{BTreeMap, BTreeSet};

const STATUS_SUCCESS: &str = "Success";

/// Summarizer reduces a vulnerability list to severity statistics.
///
/// Findings whose first applied exception starts with `ignore` are left out
/// of the totals and the short list but still counted per severity in the
/// excluded statistics, so actual and excluded together cover every input
/// record exactly once.
pub struct Summarizer;

impl Summarizer {
    pub fn summarize(
        context: &ScanContext,
        designators: &Designators,
        vulnerabilities: &[VulnerabilityRecord],
        has_relevancy: bool,
    ) -> ScanSummary {
        let command = context.command();
        let mut actual: BTreeMap<Severity, SeverityStats> = BTreeMap::new();
        let mut excluded: BTreeMap<Severity, SeverityStats> = BTreeMap::new();
        let mut short_list = Vec::new();
        let mut package_names = BTreeSet::new();

        for vulnerability in vulnerabilities {
            let buckets = if vulnerability.is_ignored() {
                &mut excluded
            } else {
                short_list.push(vulnerability.to_short());
                if !vulnerability.package_name.is_empty() {
                    package_names.insert(vulnerability.package_name.clone());
                }
                &mut actual
            };
            let severity = vulnerability.severity();
            buckets
                .entry(severity)
                .or_insert_with(|| SeverityStats::new(severity))
                .add(vulnerability);
        }

        let image_info = ImageInfo::from_tag(&command.image_tag);
        let mut summary = ScanSummary {
            designators: designators.clone(),
            tenant_id: designators.tenant_id().to_string(),
            scan_id: context.scan_id().to_string(),
            instance_id: command.instance_id.clone(),
            image_id: command.image_hash.clone(),
            image_tag: command.image_tag.clone(),
            registry: image_info
                .as_ref()
                .map(|info| info.registry.clone())
                .unwrap_or_default(),
            version: image_info.map(|info| info.version).unwrap_or_default(),
            cluster_name: designators.attribute(ATTRIBUTE_CLUSTER).to_string(),
            namespace: designators.attribute(ATTRIBUTE_NAMESPACE).to_string(),
            container_name: designators.attribute(ATTRIBUTE_CONTAINER_NAME).to_string(),
            job_ids: command.session.job_ids.clone(),
            timestamp: context.timestamp(),
            has_relevancy_data: has_relevancy,
            status: STATUS_SUCCESS.to_string(),
            vulnerabilities: short_list,
            packages_name: package_names.into_iter().collect(),
            ..ScanSummary::default()
        };

        // aggregate counters only ever see non-ignored findings
        for stats in actual.values() {
            summary.total_count += stats.total_count;
            summary.fix_available_of_total_count += stats.fix_available_of_total_count;
            summary.rce_count += stats.rce_count;
            summary.rce_fix_count += stats.rce_fix_count;
            summary.relevant_count += stats.relevant_count;
            summary.fix_available_for_relevant_count += stats.fix_available_for_relevant_count;
        }
        summary.severities_stats = actual.into_values().collect();
        summary.excluded_severities_stats = excluded.into_values().collect();

        summary
    }
}

impl SeverityStats {
    fn add(&mut self, vulnerability: &VulnerabilityRecord) {
        let has_fix = vulnerability.has_fix();
        self.total_count += 1;
        if has_fix {
            self.fix_available_of_total_count += 1;
        }
        if vulnerability.is_rce {
            self.rce_count += 1;
            if has_fix {
                self.rce_fix_count += 1;
            }
        }
        if vulnerability.is_relevant() {
            self.relevant_count += 1;
            if has_fix {
                self.fix_available_for_relevant_count += 1;
            }
        }
    }
}
