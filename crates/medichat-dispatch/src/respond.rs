//! Response formatting: one canned answer per topic, derived from the record.
//!
//! `respond` is the whole dispatcher: pure, total, and idempotent for a
//! fixed record. Every branch, including empty collections, yields a valid
//! string — there is no error path. The response texts below are the
//! testable contract of this crate; change them and the tests change.

use tracing::debug;

use medichat_record::PatientSummary;

use crate::topic::Topic;

/// Produce the response for `utterance` against `record`.
///
/// Classifies the utterance (see [`Topic::classify`]) and formats the
/// matching slice of the record. An unclassified utterance falls through to
/// the fixed capability menu.
pub fn respond(utterance: &str, record: &PatientSummary) -> String {
    let topic = Topic::classify(utterance);

    debug!(
        topic = topic.map(Topic::name).unwrap_or("menu"),
        "utterance classified"
    );

    match topic {
        Some(Topic::Medications) => medications(record),
        Some(Topic::Allergies) => allergies(record),
        Some(Topic::Vitals) => vitals(record),
        Some(Topic::Labs) => labs(record),
        Some(Topic::History) => history(record),
        Some(Topic::Visits) => visits(record),
        None => capability_menu(record),
    }
}

/// The assistant's opening message for a fresh session.
pub fn greeting(record: &PatientSummary) -> String {
    format!(
        "Hello! I'm your medical AI assistant. I have access to {}'s medical records \
         and I'm here to help answer questions about their medical history, current \
         medications, recent visits, and lab results. How can I assist you today?",
        record.patient.name
    )
}

// ── Per-topic formatters ──────────────────────────────────────────────────────

fn medications(record: &PatientSummary) -> String {
    let meds = &record.current_medications;
    let bullets = meds
        .iter()
        .map(|med| {
            format!(
                "• {} {} - {}\n  Prescribed by: {}",
                med.name, med.dosage, med.frequency, med.prescribed_by
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{} is currently taking {} medications:\n\n{}\n\nIs there a specific medication \
         you'd like to know more about?",
        record.patient.name,
        meds.len(),
        bullets
    )
}

fn allergies(record: &PatientSummary) -> String {
    let allergies = &record.medical_history.allergies;
    let lines = allergies
        .iter()
        .map(|a| format!("• {} - {} ({} severity)", a.allergen, a.reaction, a.severity))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{} has {} documented allergies:\n\n{}\n\nPlease ensure any prescribed \
         medications or treatments avoid these allergens.",
        record.patient.name,
        allergies.len(),
        lines
    )
}

fn vitals(record: &PatientSummary) -> String {
    let v = &record.vital_signs;
    format!(
        "Latest vital signs for {} (recorded {}):\n\n\
         • Blood Pressure: {}\n\
         • Heart Rate: {}\n\
         • Temperature: {}\n\
         • Weight: {}\n\
         • Height: {}\n\
         • BMI: {}\n\n\
         The patient's BMI indicates they are {}.",
        record.patient.name,
        v.last_recorded,
        v.blood_pressure,
        v.heart_rate,
        v.temperature,
        v.weight,
        v.height,
        v.bmi,
        bmi_classification(v.bmi)
    )
}

/// Derived weight classification from a numeric BMI.
///
/// Exactly 25.0 and exactly 18.5 fall into "within normal range" — the
/// boundaries are strict comparisons, and that is a contract, not an
/// oversight.
fn bmi_classification(bmi: f64) -> &'static str {
    if bmi > 25.0 {
        "overweight"
    } else if bmi < 18.5 {
        "underweight"
    } else {
        "within normal range"
    }
}

fn labs(record: &PatientSummary) -> String {
    let blocks = record
        .lab_results
        .iter()
        .map(|lab| {
            format!(
                "• {}: {} ({})\n  Reference range: {}\n  Date: {}",
                lab.test, lab.result, lab.status, lab.reference, lab.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Recent lab results for {}:\n\n{}\n\nWould you like me to explain any of these \
         results in more detail?",
        record.patient.name, blocks
    )
}

fn history(record: &PatientSummary) -> String {
    let blocks = record
        .medical_history
        .chronic_conditions
        .iter()
        .map(|c| {
            format!(
                "• {} ({})\n  Diagnosed: {}\n  Current medications: {}",
                c.condition,
                c.status,
                c.diagnosed_date,
                c.medications.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}'s chronic conditions:\n\n{}\n\nThese conditions require ongoing monitoring \
         and management.",
        record.patient.name, blocks
    )
}

fn visits(record: &PatientSummary) -> String {
    let blocks = record
        .recent_visits
        .iter()
        .map(|visit| {
            format!(
                "• {} - {}\n  Provider: {}\n  Chief Complaint: {}\n  Assessment: {}\n  Plan: {}",
                visit.date,
                visit.visit_type,
                visit.provider,
                visit.chief_complaint,
                visit.assessment,
                visit.plan
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Recent visits for {}:\n\n{}", record.patient.name, blocks)
}

fn capability_menu(record: &PatientSummary) -> String {
    format!(
        "I can help you with information about {}'s:\n\n\
         • Current medications and prescriptions\n\
         • Medical allergies and reactions\n\
         • Chronic conditions and medical history\n\
         • Recent vital signs and measurements\n\
         • Laboratory test results\n\
         • Recent visits and appointments\n\n\
         What specific information would you like to know about?",
        record.patient.name
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
