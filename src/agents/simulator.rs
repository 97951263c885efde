//! Mock data generation for the agent tables.
//!
//! Every routine draws from a caller-supplied random source so that callers
//! (and tests) control reproducibility. A request for zero rows returns before
//! touching the random source. Batches are capped at [`MAX_ROWS_PER_BATCH`].

use rand::Rng;
use tracing::debug;
use crate::errors::DentalError;
use super::model::{AgentId, Priority};
use super::rows::{
    AuditRow, CallLogRow, CallOutcome, DocumentRow, EmailComment, EmailRow, Finding,
    PatientSummaryRow, RowRecord, UploadStatus,
};

/// Probability of drawing the non-exception outcome.
pub const HAPPY_PATH_PROBABILITY: f64 = 0.75;

/// Largest batch a single call may generate.
pub const MAX_ROWS_PER_BATCH: i64 = 1000;

pub const PATIENT_NAMES: [&str; 18] = [
    "Jan Novák", "Petra Dvořáková", "Lukáš Beneš",
    "Eva Kovářová", "Martin Svoboda", "Tereza Kučerová",
    "Pavel Černý", "Jana Malá", "Tomáš Dvořák",
    "Eva Malá", "Lukáš Černý", "Markéta Svobodová",
    "Tomáš Veselý", "Petr Novák", "Tereza Jelínková",
    "Milan Novotný", "Lucie Malá", "Jan Šimek",
];

pub const CALL_REASONS: [&str; 6] = [
    "Hygiene", "Checkup", "Pain", "X-ray", "New patient", "Appointment cancellation",
];

pub const REQUESTS: [&str; 4] = ["Book", "Cancel", "Reschedule", "Information"];

pub const EMAIL_TOPICS: [&str; 5] = [
    "Appointment cancellation",
    "Unanswered e-mail",
    "Insurance question",
    "Late confirmation",
    "Forwarded mail",
];

pub const INSURERS: [&str; 4] = ["VZP", "OZP", "ZPMV", "ČPZP"];

pub const AUDIT_ISSUES: [&str; 5] = [
    "Missing doctor signature",
    "Billing mismatch",
    "Incomplete medical history",
    "Missing X-ray",
    "Duplicate record",
];

const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
const MINUTES: [&str; 4] = ["00", "15", "30", "45"];

/// Check a requested batch size. Negative and oversized counts are
/// `InvalidArgument`.
pub fn validate_row_count(row_count: i64) -> Result<usize, DentalError> {
    if row_count < 0 {
        return Err(DentalError::InvalidArgument(format!(
            "row count must be non-negative, got {}",
            row_count
        )));
    }
    if row_count > MAX_ROWS_PER_BATCH {
        return Err(DentalError::InvalidArgument(format!(
            "row count {} exceeds the maximum of {} per batch",
            row_count, MAX_ROWS_PER_BATCH
        )));
    }
    usize::try_from(row_count)
        .map_err(|_| DentalError::InvalidArgument(format!("row count {} is too large", row_count)))
}

/// Generate `row_count` synthetic rows shaped for `agent`.
///
/// Counts outside `0..=MAX_ROWS_PER_BATCH` are rejected with `InvalidArgument`
/// before any allocation. Zero yields an empty batch without any random draws.
pub fn generate<R: Rng + ?Sized>(
    agent: AgentId,
    row_count: i64,
    rng: &mut R,
) -> Result<Vec<RowRecord>, DentalError> {
    let n = validate_row_count(row_count)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    debug!(agent = %agent, rows = n, "Generating mock rows");

    let rows = match agent {
        AgentId::Isabella => simulate_calls(n, rng).into_iter().map(RowRecord::CallLog).collect(),
        AgentId::Leo => simulate_documents(n, rng).into_iter().map(RowRecord::Document).collect(),
        AgentId::Gabriel => simulate_emails(n, rng).into_iter().map(RowRecord::Email).collect(),
        AgentId::Nora => simulate_summaries(n, rng).into_iter().map(RowRecord::PatientSummary).collect(),
        AgentId::Auditor => simulate_audits(n, rng).into_iter().map(RowRecord::Audit).collect(),
    };
    Ok(rows)
}

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn happy_path<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f64>() < HAPPY_PATH_PROBABILITY
}

pub fn simulate_calls<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<CallLogRow> {
    (0..n)
        .map(|_| {
            let outcome = if happy_path(rng) {
                CallOutcome::Confirmed
            } else {
                *pick(rng, &[CallOutcome::TransferredToDesk, CallOutcome::AwaitingSms])
            };
            let patient = pick(rng, &PATIENT_NAMES);
            let reason = pick(rng, &CALL_REASONS);
            let request = pick(rng, &REQUESTS);
            let time = format!("{}:{}", rng.gen_range(8..=17), pick(rng, &MINUTES));
            CallLogRow::new(patient, reason, request, &time, outcome)
        })
        .collect()
}

pub fn simulate_documents<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<DocumentRow> {
    (0..n)
        .map(|i| {
            let status = if happy_path(rng) {
                UploadStatus::Uploaded
            } else {
                *pick(rng, &[UploadStatus::MissingAttachment, UploadStatus::Queued])
            };
            let file = format!("patient_card_{}.pdf", i + 1);
            let size = format!("{} kB", rng.gen_range(120..=1200));
            let archive = format!("archive_{}", rng.gen_range(1..=4));
            DocumentRow::new(&file, status, &size, &archive)
        })
        .collect()
}

pub fn simulate_emails<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<EmailRow> {
    (0..n)
        .map(|_| {
            let flagged = !happy_path(rng);
            let comment = *pick(rng, &[EmailComment::RequiresResponse, EmailComment::ProcessedAutomatically]);
            let sender = format!("patient{}@mail.cz", rng.gen_range(1..=50));
            let topic = pick(rng, &EMAIL_TOPICS);
            EmailRow::new(&sender, topic, flagged, comment)
        })
        .collect()
}

pub fn simulate_summaries<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<PatientSummaryRow> {
    (0..n)
        .map(|_| {
            let pool = if happy_path(rng) { &Finding::BENIGN } else { &Finding::NEEDS_ATTENTION };
            let finding = *pick(rng, pool);
            let patient = pick(rng, &PATIENT_NAMES);
            let insurer = pick(rng, &INSURERS);
            let prep_time = format!("{} min", rng.gen_range(1..=6));
            PatientSummaryRow::new(patient, insurer, finding, &prep_time)
        })
        .collect()
}

pub fn simulate_audits<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<AuditRow> {
    (0..n)
        .map(|i| {
            let issue = pick(rng, &AUDIT_ISSUES);
            let patient = pick(rng, &PATIENT_NAMES);
            let priority = *pick(rng, &PRIORITIES);
            let link = format!("https://dentalsystem.cz/record/{}", i + 1);
            AuditRow::new(patient, issue, priority, &link)
        })
        .collect()
}
