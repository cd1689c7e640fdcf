use std::path::PathBuf;

use crate::{EligibilityCriteria, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Post the selected spreadsheet to the ingestion endpoint.
    UploadStudents { request_id: RequestId, path: PathBuf },
    /// Post eligibility criteria to the notification endpoint.
    NotifyStudents {
        request_id: RequestId,
        criteria: EligibilityCriteria,
    },
    /// Abandon an in-flight request; its result must not reach the view.
    CancelRequest { request_id: RequestId },
}
