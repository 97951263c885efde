//! Row schemas for the five agent tables.
//!
//! Every schema carries a `narrative` that is non-empty exactly when the row's
//! status indicates an exception. Constructors derive the narrative from the
//! status, so the two can never disagree.

use serde::{Deserialize, Serialize};
use super::model::{AgentId, Priority};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "transferred to desk")]
    TransferredToDesk,
    #[serde(rename = "awaiting SMS confirmation")]
    AwaitingSms,
}

impl CallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::TransferredToDesk => "transferred to desk",
            Self::AwaitingSms => "awaiting SMS confirmation",
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            Self::Confirmed => "",
            Self::TransferredToDesk => {
                "The call was transferred to the front desk. Check whether the issue was resolved \
                 and whether the patient received the information they needed."
            }
            Self::AwaitingSms => {
                "The SMS confirmation has not been delivered yet. Check the delivery status and \
                 resend the confirmation message if necessary."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    #[serde(rename = "uploaded")]
    Uploaded,
    #[serde(rename = "missing attachment")]
    MissingAttachment,
    #[serde(rename = "queued")]
    Queued,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::MissingAttachment => "missing attachment",
            Self::Queued => "queued",
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            Self::Uploaded => "",
            Self::MissingAttachment => {
                "The patient card is missing a mandatory attachment. Review the documentation and \
                 add the missing attachment before archiving."
            }
            Self::Queued => {
                "The patient card has been waiting in the processing queue for a long time. Check \
                 whether the import failed."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailComment {
    #[serde(rename = "requires response")]
    RequiresResponse,
    #[serde(rename = "processed automatically")]
    ProcessedAutomatically,
}

impl EmailComment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiresResponse => "requires response",
            Self::ProcessedAutomatically => "processed automatically",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Finding {
    #[serde(rename = "no caries")]
    NoCaries,
    #[serde(rename = "hygiene recommended")]
    HygieneRecommended,
    #[serde(rename = "minor inflammation")]
    MinorInflammation,
    #[serde(rename = "checkup required")]
    CheckupRequired,
}

impl Finding {
    pub const BENIGN: [Finding; 2] = [Finding::NoCaries, Finding::HygieneRecommended];
    pub const NEEDS_ATTENTION: [Finding; 2] = [Finding::MinorInflammation, Finding::CheckupRequired];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCaries => "no caries",
            Self::HygieneRecommended => "hygiene recommended",
            Self::MinorInflammation => "minor inflammation",
            Self::CheckupRequired => "checkup required",
        }
    }

    pub fn needs_attention(&self) -> bool {
        Self::NEEDS_ATTENTION.contains(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogRow {
    pub patient: String,
    pub call_reason: String,
    pub request: String,
    /// `H:MM`
    pub time: String,
    pub outcome: CallOutcome,
    pub narrative: String,
}

impl CallLogRow {
    pub fn new(patient: &str, call_reason: &str, request: &str, time: &str, outcome: CallOutcome) -> Self {
        Self {
            patient: patient.to_string(),
            call_reason: call_reason.to_string(),
            request: request.to_string(),
            time: time.to_string(),
            outcome,
            narrative: outcome.narrative().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    pub file: String,
    pub status: UploadStatus,
    /// `<int> kB`
    pub size: String,
    pub archive: String,
    pub narrative: String,
}

impl DocumentRow {
    pub fn new(file: &str, status: UploadStatus, size: &str, archive: &str) -> Self {
        Self {
            file: file.to_string(),
            status,
            size: size.to_string(),
            archive: archive.to_string(),
            narrative: status.narrative().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRow {
    pub sender: String,
    pub topic: String,
    pub flagged: bool,
    pub comment: EmailComment,
    pub narrative: String,
}

impl EmailRow {
    pub fn new(sender: &str, topic: &str, flagged: bool, comment: EmailComment) -> Self {
        let narrative = if flagged || comment == EmailComment::RequiresResponse {
            email_narrative(topic)
        } else {
            ""
        };
        Self {
            sender: sender.to_string(),
            topic: topic.to_string(),
            flagged,
            comment,
            narrative: narrative.to_string(),
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.flagged || self.comment == EmailComment::RequiresResponse
    }
}

/// Narrative for an e-mail that needs attention, chosen by the row's own topic.
fn email_narrative(topic: &str) -> &'static str {
    let topic = topic.to_lowercase();
    if topic.contains("insurance") {
        "The patient is asking about insurance coverage. Check their policy and reply with \
         accurate information about what the treatment costs them."
    } else if topic.contains("unanswered") {
        "The patient's e-mail has been unanswered for more than 48 hours. Reply immediately and \
         apologise for the delay."
    } else if topic.contains("cancel") {
        "The patient asked to cancel an appointment but no confirmation was sent. Confirm the \
         cancellation and offer a replacement slot."
    } else {
        "The e-mail needs immediate attention. Review its content and reply to the patient as \
         soon as possible."
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummaryRow {
    pub patient: String,
    pub insurer: String,
    pub finding: Finding,
    /// `<int> min`
    pub prep_time: String,
    pub narrative: String,
}

impl PatientSummaryRow {
    pub fn new(patient: &str, insurer: &str, finding: Finding, prep_time: &str) -> Self {
        let narrative = if finding.needs_attention() {
            format!(
                "The patient was found to have {}. Review the full medical history and recommend \
                 suitable treatment or preventive care.",
                finding.as_str()
            )
        } else {
            String::new()
        };
        Self {
            patient: patient.to_string(),
            insurer: insurer.to_string(),
            finding,
            prep_time: prep_time.to_string(),
            narrative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRow {
    pub patient: String,
    pub issue: String,
    pub priority: Priority,
    pub link: String,
    pub narrative: String,
}

impl AuditRow {
    pub fn new(patient: &str, issue: &str, priority: Priority, link: &str) -> Self {
        Self {
            patient: patient.to_string(),
            issue: issue.to_string(),
            priority,
            link: link.to_string(),
            narrative: audit_narrative(issue).to_string(),
        }
    }
}

const AUDIT_NARRATIVES: [(&str, &str); 5] = [
    (
        "signature",
        "The patient record is missing the attending doctor's mandatory signature. Review the \
         documentation and make sure it gets signed.",
    ),
    (
        "billing",
        "Performed procedures and billed items do not match. Review the invoice and correct the \
         errors.",
    ),
    (
        "history",
        "The patient's medical history is incomplete; some mandatory details are missing. Fill in \
         the missing information.",
    ),
    (
        "x-ray",
        "The record references an X-ray image that is not attached. Check whether the image was \
         uploaded.",
    ),
    (
        "duplicate",
        "A duplicate record was found for the same patient. Review both records and remove or \
         merge the duplicate.",
    ),
];

/// Narrative for an audit issue, selected by the first keyword the issue text
/// contains. Issues that match no keyword get an empty narrative.
pub fn audit_narrative(issue: &str) -> &'static str {
    let issue = issue.to_lowercase();
    AUDIT_NARRATIVES
        .iter()
        .find(|(keyword, _)| issue.contains(keyword))
        .map(|(_, text)| *text)
        .unwrap_or("")
}

/// A row in one agent's table. The variant is fixed by the owning agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowRecord {
    CallLog(CallLogRow),
    Document(DocumentRow),
    Email(EmailRow),
    PatientSummary(PatientSummaryRow),
    Audit(AuditRow),
}

impl RowRecord {
    pub fn agent(&self) -> AgentId {
        match self {
            Self::CallLog(_) => AgentId::Isabella,
            Self::Document(_) => AgentId::Leo,
            Self::Email(_) => AgentId::Gabriel,
            Self::PatientSummary(_) => AgentId::Nora,
            Self::Audit(_) => AgentId::Auditor,
        }
    }

    pub fn narrative(&self) -> &str {
        match self {
            Self::CallLog(r) => &r.narrative,
            Self::Document(r) => &r.narrative,
            Self::Email(r) => &r.narrative,
            Self::PatientSummary(r) => &r.narrative,
            Self::Audit(r) => &r.narrative,
        }
    }

    /// Whether the row's status or finding marks an exception.
    pub fn is_exception(&self) -> bool {
        match self {
            Self::CallLog(r) => r.outcome != CallOutcome::Confirmed,
            Self::Document(r) => r.status != UploadStatus::Uploaded,
            Self::Email(r) => r.needs_attention(),
            Self::PatientSummary(r) => r.finding.needs_attention(),
            Self::Audit(r) => !audit_narrative(&r.issue).is_empty(),
        }
    }

    /// Display-ordered `(key, value)` pairs, using the serialized field names.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::CallLog(r) => vec![
                ("patient", r.patient.clone()),
                ("callReason", r.call_reason.clone()),
                ("request", r.request.clone()),
                ("time", r.time.clone()),
                ("outcome", r.outcome.as_str().to_string()),
                ("narrative", r.narrative.clone()),
            ],
            Self::Document(r) => vec![
                ("file", r.file.clone()),
                ("status", r.status.as_str().to_string()),
                ("size", r.size.clone()),
                ("archive", r.archive.clone()),
                ("narrative", r.narrative.clone()),
            ],
            Self::Email(r) => vec![
                ("sender", r.sender.clone()),
                ("topic", r.topic.clone()),
                ("flagged", if r.flagged { "yes" } else { "no" }.to_string()),
                ("comment", r.comment.as_str().to_string()),
                ("narrative", r.narrative.clone()),
            ],
            Self::PatientSummary(r) => vec![
                ("patient", r.patient.clone()),
                ("insurer", r.insurer.clone()),
                ("finding", r.finding.as_str().to_string()),
                ("prepTime", r.prep_time.clone()),
                ("narrative", r.narrative.clone()),
            ],
            Self::Audit(r) => vec![
                ("patient", r.patient.clone()),
                ("issue", r.issue.clone()),
                ("priority", r.priority.as_str().to_string()),
                ("link", r.link.clone()),
                ("narrative", r.narrative.clone()),
            ],
        }
    }
}
