use crate::scan_orchestration::domain::{ScanResultReport, VulnerabilityRecord};
use serde::Serialize;
use std::io;

pub const DEFAULT_MAX_BODY_SIZE: usize = 30_000;
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;
pub const DEFAULT_ERROR_QUEUE_CAPACITY: usize = 32;

/// Delivery bounds shared by the chunker and the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryLimits {
    /// Upper bound on the serialized size of one report body, in bytes
    pub max_body_size: usize,
    /// Maximum number of report deliveries outstanding at once
    pub max_in_flight: usize,
    /// Capacity of the delivery error queue
    pub error_queue_capacity: usize,
}

impl Default for DeliveryLimits {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            error_queue_capacity: DEFAULT_ERROR_QUEUE_CAPACITY,
        }
    }
}

struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Size in bytes of the compact JSON encoding of `value`
pub fn json_size<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<usize> {
    let mut counter = ByteCounter(0);
    serde_json::to_writer(&mut counter, value)?;
    Ok(counter.0)
}

/// Splits vulnerability lists into JSON arrays no larger than a byte budget.
#[derive(Debug, Clone, Copy)]
pub struct VulnerabilityChunker {
    max_body_size: usize,
}

impl VulnerabilityChunker {
    pub fn new(limits: &DeliveryLimits) -> Self {
        Self {
            max_body_size: limits.max_body_size,
        }
    }

    /// Chunker whose arrays fit chunk reports of `shell` within `max_body_size`.
    ///
    /// The envelope is measured with the widest pagination a report can
    /// carry, so the budget holds for every report number.
    pub fn for_reports(limits: &DeliveryLimits, shell: &ScanResultReport) -> Self {
        let envelope = ScanResultReport::chunk_of(shell, usize::MAX, false, Vec::new());
        // the envelope's own "[]" is counted again per chunk
        let overhead = json_size(&envelope)
            .map(|size| size.saturating_sub(2))
            .unwrap_or(0);
        Self {
            max_body_size: limits.max_body_size.saturating_sub(overhead),
        }
    }

    pub fn chunks(&self, vulnerabilities: Vec<VulnerabilityRecord>) -> VulnerabilityChunks {
        VulnerabilityChunks {
            remaining: vulnerabilities.into_iter(),
            carry: None,
            max_body_size: self.max_body_size,
        }
    }
}

/// Lazy chunk sequence produced by [`VulnerabilityChunker::chunks`].
///
/// A record too large to fit any chunk is yielded on its own.
pub struct VulnerabilityChunks {
    remaining: std::vec::IntoIter<VulnerabilityRecord>,
    carry: Option<(VulnerabilityRecord, usize)>,
    max_body_size: usize,
}

impl VulnerabilityChunks {
    fn next_sized(&mut self) -> Option<(VulnerabilityRecord, usize)> {
        self.carry.take().or_else(|| {
            self.remaining.next().map(|record| {
                // an unmeasurable record is shipped alone
                let size = json_size(&record).unwrap_or(usize::MAX);
                (record, size)
            })
        })
    }
}

impl Iterator for VulnerabilityChunks {
    type Item = Vec<VulnerabilityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chunk = Vec::new();
        // "[" + "]"
        let mut size: usize = 2;

        while let Some((record, record_size)) = self.next_sized() {
            let separator = usize::from(!chunk.is_empty());
            let grown = size
                .saturating_add(separator)
                .saturating_add(record_size);
            if !chunk.is_empty() && grown > self.max_body_size {
                self.carry = Some((record, record_size));
                break;
            }
            size = grown;
            chunk.push(record);
        }

        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }
}
