use crate::ports::outbound::Platform;
use crate::scan_orchestration::domain::{ScanContext, ScanStatus};

/// Fire-and-forget lifecycle reporting.
///
/// Status delivery never influences a flow's outcome: failures are logged at
/// error level and dropped. There is no retry.
pub struct StatusReporter<'a, P: Platform> {
    platform: &'a P,
}

impl<'a, P: Platform> StatusReporter<'a, P> {
    pub fn new(platform: &'a P) -> Self {
        Self { platform }
    }

    pub async fn report(&self, context: &ScanContext, status: ScanStatus) {
        if let Err(e) = self.platform.send_status(context, status).await {
            tracing::error!(
                scan_id = context.scan_id(),
                wlid = context.instance_id(),
                %status,
                error = %e,
                "failed to report scan status"
            );
        }
    }
}
