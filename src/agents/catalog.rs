use std::sync::LazyLock;
use crate::errors::DentalError;
use super::model::{AgentId, AgentRecord, Priority, TaskRecord};
use super::rows::{
    AuditRow, CallLogRow, CallOutcome, DocumentRow, EmailComment, EmailRow, Finding,
    PatientSummaryRow, RowRecord, UploadStatus,
};

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
}

fn isabella() -> AgentRecord {
    use CallOutcome::*;
    let rows = [
        ("Jan Novák", "Hygiene", "Book", "14:30", Confirmed),
        ("Petra Dvořáková", "Checkup", "Reschedule", "10:15", Confirmed),
        ("Lukáš Beneš", "Pain", "Book", "9:00", TransferredToDesk),
        ("Eva Kovářová", "X-ray", "Information", "16:00", Confirmed),
        ("Martin Svoboda", "New patient", "Book", "11:45", Confirmed),
        ("Tereza Kučerová", "Appointment cancellation", "Cancel", "13:30", AwaitingSms),
        ("Pavel Černý", "Checkup", "Book", "15:15", Confirmed),
        ("Jana Malá", "Hygiene", "Reschedule", "12:00", Confirmed),
    ];
    AgentRecord {
        id: AgentId::Isabella,
        name: "Isabella".into(),
        role: "Phone receptionist".into(),
        notification_text: "3 new calls are waiting to be processed".into(),
        kpis: pairs(&[("📞 Calls handled", "128"), ("🌑 After hours", "14")]),
        mini_kpis: pairs(&[("📞", "128"), ("🌑", "14"), ("✅", "94%"), ("⏱️", "2.3m")]),
        rows: rows
            .into_iter()
            .map(|(p, reason, req, time, outcome)| RowRecord::CallLog(CallLogRow::new(p, reason, req, time, outcome)))
            .collect(),
        tasks: vec![
            TaskRecord::pending("Call Mrs. Dvořáková back about the cancelled appointment", Priority::High),
            TaskRecord::pending("Confirm the SMS for Mr. Novák's checkup tomorrow", Priority::High),
            TaskRecord::pending("Move Eva Kovářová's appointment from 15:00 to 16:30", Priority::Medium),
        ],
    }
}

fn leo() -> AgentRecord {
    use UploadStatus::*;
    let rows = [
        ("patient_card_1.pdf", Uploaded, "856 kB", "archive_2"),
        ("patient_card_2.pdf", Uploaded, "423 kB", "archive_1"),
        ("patient_card_3.pdf", MissingAttachment, "234 kB", "archive_3"),
        ("patient_card_4.pdf", Uploaded, "1087 kB", "archive_2"),
        ("patient_card_5.pdf", Uploaded, "645 kB", "archive_4"),
        ("patient_card_6.pdf", Queued, "512 kB", "archive_1"),
        ("patient_card_7.pdf", Uploaded, "789 kB", "archive_3"),
        ("patient_card_8.pdf", Uploaded, "956 kB", "archive_2"),
    ];
    AgentRecord {
        id: AgentId::Leo,
        name: "Leo".into(),
        role: "Patient card preparation".into(),
        notification_text: "5 patient cards are waiting for import".into(),
        kpis: pairs(&[("📘 Cards created", "8"), ("📕 Archives processed", "52")]),
        mini_kpis: pairs(&[("📘", "8"), ("📕", "52"), ("✅", "98%"), ("⏱️", "1.5m")]),
        rows: rows
            .into_iter()
            .map(|(file, status, size, archive)| RowRecord::Document(DocumentRow::new(file, status, size, archive)))
            .collect(),
        tasks: vec![
            TaskRecord::pending("Add the missing attachments to patient_card_3.pdf", Priority::High),
            TaskRecord::pending("Verify the import into archive_2", Priority::Medium),
            TaskRecord::pending("Archive last week's finished cards", Priority::Low),
        ],
    }
}

fn gabriel() -> AgentRecord {
    use EmailComment::*;
    let rows = [
        ("patient15@mail.cz", "Insurance question", true, RequiresResponse),
        ("patient23@mail.cz", "Appointment cancellation", false, ProcessedAutomatically),
        ("patient8@mail.cz", "Unanswered e-mail", true, RequiresResponse),
        ("patient42@mail.cz", "Late confirmation", false, ProcessedAutomatically),
        ("patient31@mail.cz", "Forwarded mail", false, ProcessedAutomatically),
        ("patient19@mail.cz", "Insurance question", false, ProcessedAutomatically),
        ("patient5@mail.cz", "Appointment cancellation", true, RequiresResponse),
        ("patient37@mail.cz", "Unanswered e-mail", false, ProcessedAutomatically),
    ];
    AgentRecord {
        id: AgentId::Gabriel,
        name: "Gabriel".into(),
        role: "E-mail triage".into(),
        notification_text: "7 e-mails need immediate attention".into(),
        kpis: pairs(&[("📪 E-mails processed", "121"), ("⚠️ Issues found", "7")]),
        mini_kpis: pairs(&[("📪", "121"), ("⚠️", "7"), ("✅", "91%"), ("⏱️", "3.1m")]),
        rows: rows
            .into_iter()
            .map(|(sender, topic, flagged, comment)| RowRecord::Email(EmailRow::new(sender, topic, flagged, comment)))
            .collect(),
        tasks: vec![
            TaskRecord::pending("Answer the insurance question from patient15@mail.cz", Priority::High),
            TaskRecord::pending("Handle the unanswered e-mail about a rescheduled appointment", Priority::High),
            TaskRecord::pending("Forward the urgent message to the doctor", Priority::Medium),
        ],
    }
}

fn nora() -> AgentRecord {
    use Finding::*;
    let rows = [
        ("Eva Dvořáková", "VZP", NoCaries, "3 min"),
        ("Jan Šimek", "OZP", HygieneRecommended, "2 min"),
        ("Lucie Malá", "ZPMV", MinorInflammation, "5 min"),
        ("Milan Novotný", "ČPZP", NoCaries, "4 min"),
        ("Tereza Jelínková", "VZP", HygieneRecommended, "3 min"),
        ("Petr Novák", "OZP", CheckupRequired, "6 min"),
        ("Markéta Svobodová", "VZP", NoCaries, "2 min"),
        ("Tomáš Veselý", "ZPMV", HygieneRecommended, "4 min"),
    ];
    AgentRecord {
        id: AgentId::Nora,
        name: "Nora".into(),
        role: "Patient summaries".into(),
        notification_text: "2 patient summaries are ready for review".into(),
        kpis: pairs(&[("🕐 Time saved", "86 min"), ("🧾 Patients summarised", "12")]),
        mini_kpis: pairs(&[("🕐", "86m"), ("🧾", "12"), ("✅", "100%"), ("⏱️", "4.2m")]),
        rows: rows
            .into_iter()
            .map(|(patient, insurer, finding, prep)| {
                RowRecord::PatientSummary(PatientSummaryRow::new(patient, insurer, finding, prep))
            })
            .collect(),
        tasks: vec![
            TaskRecord::pending("Review and approve the summary for Jan Šimek", Priority::High),
            TaskRecord::pending("Add notes to Lucie Malá's finding", Priority::Medium),
            TaskRecord::pending("Verify insurer details for 3 patients", Priority::Low),
        ],
    }
}

fn auditor() -> AgentRecord {
    let rows = [
        ("Jan Novák", "Missing doctor signature", Priority::High),
        ("Petra Svobodová", "Billing mismatch", Priority::High),
        ("Tomáš Dvořák", "Incomplete medical history", Priority::Medium),
        ("Eva Malá", "Missing X-ray", Priority::Low),
        ("Lukáš Černý", "Duplicate record", Priority::Medium),
    ];
    AgentRecord {
        id: AgentId::Auditor,
        name: "Auditor".into(),
        role: "Record auditing".into(),
        notification_text: "3 discrepancies found during the audit".into(),
        kpis: pairs(&[("📋 Records checked", "245"), ("⚠️ Issues found", "3")]),
        mini_kpis: pairs(&[("📋", "245"), ("⚠️", "3"), ("✅", "99%"), ("⏱️", "0.8m")]),
        rows: rows
            .into_iter()
            .enumerate()
            .map(|(i, (patient, issue, priority))| {
                let link = format!("https://dentalsystem.cz/record/{}", i + 1);
                RowRecord::Audit(AuditRow::new(patient, issue, priority, &link))
            })
            .collect(),
        tasks: vec![
            TaskRecord::pending("Add the missing doctor signature to Mr. Novák's record", Priority::High),
            TaskRecord::pending("Fix the billing mismatch in record #1247", Priority::High),
            TaskRecord::pending("Review duplicate records in the system", Priority::Medium),
        ],
    }
}

/// Baseline agent definitions, built once per process.
pub static AGENT_CATALOG: LazyLock<Vec<AgentRecord>> =
    LazyLock::new(|| vec![isabella(), leo(), gabriel(), nora(), auditor()]);

/// A fresh copy of the five baseline agents, in display order.
pub fn baseline() -> Vec<AgentRecord> {
    AGENT_CATALOG.clone()
}

pub fn get(id: AgentId) -> &'static AgentRecord {
    // Catalog order follows AgentId declaration order.
    &AGENT_CATALOG[id as usize]
}

/// Look up a baseline agent by its string id.
pub fn lookup(id: &str) -> Result<&'static AgentRecord, DentalError> {
    let id: AgentId = id.parse()?;
    Ok(get(id))
}
