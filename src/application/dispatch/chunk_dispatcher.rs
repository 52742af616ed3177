use super::DeliveryHandle;
use crate::ports::outbound::ReportSender;
use crate::scan_orchestration::domain::{ScanResultReport, VulnerabilityRecord};
use crate::scan_orchestration::services::{json_size, DeliveryLimits};
use crate::shared::DispatchError;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Concurrent, size-bounded delivery of a scan result.
///
/// The summary report always goes out as report 0. The first chunk rides
/// along with it when both fit in one body; every other non-empty chunk
/// becomes its own report, numbered in stream order. Each report is sent by
/// its own task, at most `max_in_flight` at a time. Failures never stop the
/// remaining deliveries and are surfaced through the returned
/// [`DeliveryHandle`].
pub struct ChunkDispatcher<S: ReportSender> {
    sender: Arc<S>,
    limits: DeliveryLimits,
}

impl<S: ReportSender> Clone for ChunkDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
            limits: self.limits,
        }
    }
}

impl<S: ReportSender> ChunkDispatcher<S> {
    pub fn new(sender: Arc<S>, limits: DeliveryLimits) -> Self {
        Self { sender, limits }
    }

    /// Starts delivering `summary_report` followed by `chunks`.
    ///
    /// `total` is the number of vulnerabilities the chunks are expected to
    /// carry. A report is flagged last only when the stream has ended and the
    /// delivered count matches `total`; on a mismatch one
    /// [`DispatchError::Accounting`] is queued and no report is flagged last.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch<St>(
        &self,
        summary_report: ScanResultReport,
        total: usize,
        chunks: St,
    ) -> DeliveryHandle
    where
        St: Stream<Item = Vec<VulnerabilityRecord>> + Send + 'static,
    {
        let (errors_tx, errors_rx) = mpsc::channel(self.limits.error_queue_capacity.max(1));
        let delivery = Delivery {
            sender: Arc::clone(&self.sender),
            semaphore: Arc::new(Semaphore::new(self.limits.max_in_flight.max(1))),
            errors: errors_tx,
            tasks: JoinSet::new(),
        };
        tokio::spawn(delivery.run(summary_report, total, chunks, self.limits.max_body_size));
        DeliveryHandle::new(errors_rx)
    }
}

struct Delivery<S: ReportSender> {
    sender: Arc<S>,
    semaphore: Arc<Semaphore>,
    errors: mpsc::Sender<DispatchError>,
    tasks: JoinSet<()>,
}

impl<S: ReportSender> Delivery<S> {
    async fn run<St>(
        mut self,
        mut report: ScanResultReport,
        total: usize,
        chunks: St,
        max_body_size: usize,
    ) where
        St: Stream<Item = Vec<VulnerabilityRecord>> + Send + 'static,
    {
        let scan_id = report.scan_id.clone();
        let shell = ScanResultReport::chunk_of(&report, 0, false, Vec::new());
        let mut chunks = Box::pin(chunks.filter(|chunk| futures::future::ready(!chunk.is_empty())));

        let mut carried = None;
        let mut delivered = 0usize;
        if let Some(first) = chunks.next().await {
            match fits(&report, &first, max_body_size) {
                Ok(true) => {
                    delivered = first.len();
                    report.vulnerabilities = first;
                }
                outcome => {
                    if let Err(error) = outcome {
                        let _ = self.errors.send(error).await;
                    }
                    carried = Some(first);
                }
            }
        }
        report.pagination.report_number = 0;

        // a report is flagged only once the chunk after it has been pulled
        let mut pending = Some(report);
        let mut report_number = 1;
        loop {
            let next = match carried.take() {
                Some(chunk) => Some(chunk),
                None => chunks.next().await,
            };
            if let Some(mut report) = pending.take() {
                report.pagination.is_last_report = next.is_none() && delivered == total;
                self.spawn(report).await;
            }
            let Some(chunk) = next else {
                break;
            };
            delivered += chunk.len();
            pending = Some(ScanResultReport::chunk_of(&shell, report_number, false, chunk));
            report_number += 1;
        }

        if delivered != total {
            let error = DispatchError::Accounting {
                scan_id: scan_id.clone(),
                expected: total,
                actual: delivered,
            };
            tracing::error!(scan_id = %scan_id, error = %error, "vulnerability accounting mismatch");
            let _ = self.errors.send(error).await;
        }

        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(scan_id = %scan_id, error = %e, "report delivery task failed");
            }
        }
        tracing::debug!(scan_id = %scan_id, reports = report_number, "delivery finished");
    }

    async fn spawn(&mut self, report: ScanResultReport) {
        // the semaphore is never closed
        let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await else {
            return;
        };
        let sender = Arc::clone(&self.sender);
        let errors = self.errors.clone();
        self.tasks.spawn(async move {
            let _permit = permit;
            deliver(sender.as_ref(), &errors, report).await;
        });
        while self.tasks.try_join_next().is_some() {}
    }
}

/// Whether `chunk` can be attached to `report` without exceeding the limit
fn fits(
    report: &ScanResultReport,
    chunk: &[VulnerabilityRecord],
    max_body_size: usize,
) -> Result<bool, DispatchError> {
    let measure = |e: serde_json::Error| DispatchError::Serialization {
        reason: e.to_string(),
    };
    let report_size = json_size(report).map_err(measure)?;
    let chunk_size = json_size(chunk).map_err(measure)?;
    Ok(report_size.saturating_add(chunk_size) <= max_body_size)
}

async fn deliver<S: ReportSender>(
    sender: &S,
    errors: &mpsc::Sender<DispatchError>,
    report: ScanResultReport,
) {
    let report_number = report.pagination.report_number;
    match sender.send_report(&report).await {
        Ok(()) => tracing::debug!(
            scan_id = %report.scan_id,
            report_number,
            is_last = report.pagination.is_last_report,
            vulnerabilities = report.vulnerabilities.len(),
            "report delivered"
        ),
        Err(e) => {
            tracing::error!(
                scan_id = %report.scan_id,
                report_number,
                error = %e,
                "failed to deliver report"
            );
            let _ = errors
                .send(DispatchError::Delivery {
                    scan_id: report.scan_id.clone(),
                    report_number,
                    reason: e.to_string(),
                })
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_orchestration::domain::{Designators, ScanSummary};
    use crate::shared::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSender {
        reports: Mutex<Vec<ScanResultReport>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl ReportSender for RecordingSender {
        async fn send_report(&self, report: &ScanResultReport) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.reports.lock().unwrap().push(report.clone());
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn summary_report() -> ScanResultReport {
        ScanResultReport::with_summary(ScanSummary {
            scan_id: "scan-1".to_string(),
            designators: Designators::for_workload("wlid://cluster-a/namespace-b/pod-c", "t", ""),
            ..ScanSummary::default()
        })
    }

    fn records(prefix: &str, n: usize) -> Vec<VulnerabilityRecord> {
        (0..n)
            .map(|i| VulnerabilityRecord::new(format!("{}-{}", prefix, i), "High"))
            .collect()
    }

    fn limits(max_body_size: usize, max_in_flight: usize) -> DeliveryLimits {
        DeliveryLimits {
            max_body_size,
            max_in_flight,
            error_queue_capacity: 8,
        }
    }

    #[tokio::test]
    async fn test_in_flight_deliveries_are_capped() {
        let sender = Arc::new(RecordingSender::default());
        let dispatcher = ChunkDispatcher::new(Arc::clone(&sender), limits(1, 2));
        let chunks: Vec<_> = (0..10).map(|i| records(&format!("c{}", i), 1)).collect();

        let handle = dispatcher.dispatch(summary_report(), 10, futures::stream::iter(chunks));
        assert!(handle.collect().await.is_empty());

        assert_eq!(sender.reports.lock().unwrap().len(), 11);
        assert!(sender.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_empty_chunks_are_skipped() {
        let sender = Arc::new(RecordingSender::default());
        let dispatcher = ChunkDispatcher::new(Arc::clone(&sender), limits(1, 4));
        let chunks = vec![Vec::new(), records("a", 2), Vec::new(), records("b", 1)];

        let handle = dispatcher.dispatch(summary_report(), 3, futures::stream::iter(chunks));
        assert!(handle.collect().await.is_empty());

        let mut reports = sender.reports.lock().unwrap().clone();
        reports.sort_by_key(|r| r.pagination.report_number);
        let numbers: Vec<_> = reports.iter().map(|r| r.pagination.report_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert!(reports[2].pagination.is_last_report);
        assert!(reports.iter().skip(1).all(|r| !r.vulnerabilities.is_empty()));
    }

    #[tokio::test]
    async fn test_no_vulnerabilities_sends_single_last_summary() {
        let sender = Arc::new(RecordingSender::default());
        let dispatcher = ChunkDispatcher::new(Arc::clone(&sender), limits(30_000, 4));

        let handle = dispatcher.dispatch(summary_report(), 0, futures::stream::empty());
        assert!(handle.collect().await.is_empty());

        let reports = sender.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].summary.is_some());
        assert!(reports[0].pagination.is_last_report);
    }
}
