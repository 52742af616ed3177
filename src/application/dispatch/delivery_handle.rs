use crate::shared::DispatchError;
use tokio::sync::mpsc;

/// Receiving end of a dispatch's error queue.
///
/// The queue closes once every report task of the dispatch has finished, so
/// draining it to the end doubles as a completion barrier. The queue is
/// bounded: a holder that stops draining eventually stalls the failing
/// deliveries.
#[derive(Debug)]
pub struct DeliveryHandle {
    errors: mpsc::Receiver<DispatchError>,
}

impl DeliveryHandle {
    pub(crate) fn new(errors: mpsc::Receiver<DispatchError>) -> Self {
        Self { errors }
    }

    /// Next queued error, or `None` once delivery has completed
    pub async fn next_error(&mut self) -> Option<DispatchError> {
        self.errors.recv().await
    }

    /// Waits for delivery to complete and returns every error it produced
    pub async fn collect(mut self) -> Vec<DispatchError> {
        let mut collected = Vec::new();
        while let Some(error) = self.errors.recv().await {
            collected.push(error);
        }
        collected
    }
}
