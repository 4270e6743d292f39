//! medichat — headless demo CLI
//!
//! Drives the dispatcher and the conversation session without a terminal
//! UI. Useful for scripting and for eyeballing the canned responses.
//!
//! Usage:
//!   cargo run -p demo -- ask "What are my allergies?"
//!   cargo run -p demo -- transcript
//!   cargo run -p demo -- show-record
//!   cargo run -p demo -- --record ./patient.json ask "lab results"

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medichat_dispatch::respond;
use medichat_record::PatientSummary;
use medichat_session::{ConversationSession, DelayPolicy, Role, SessionConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// medichat — single-patient record viewer with a simulated assistant.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "medichat headless demo",
    long_about = "Runs the medichat response dispatcher and conversation session\n\
                  against a patient record, without the terminal UI."
)]
struct Cli {
    /// Patient record JSON file. Defaults to the embedded demo record.
    #[arg(long, global = true)]
    record: Option<PathBuf>,

    /// Session settings TOML file (reply delay). Defaults apply if omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch a single question and print the response.
    Ask {
        /// The question to classify and answer.
        question: String,
    },
    /// Run a scripted conversation through a real session.
    Transcript,
    /// Print the loaded patient record.
    ShowRecord,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let record = match &cli.record {
        Some(path) => PatientSummary::from_file(path)?,
        None => PatientSummary::demo(),
    };

    let delay = match &cli.config {
        Some(path) => SessionConfig::from_file(path)?.delay_policy(),
        // Keep the scripted demo snappy when no config is given.
        None => DelayPolicy::fixed(Duration::from_millis(200)),
    };

    match cli.command {
        Command::Ask { question } => run_ask(&question, &record),
        Command::Transcript => run_transcript(record, delay),
        Command::ShowRecord => run_show_record(&record),
    }

    Ok(())
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// One-shot dispatch: no session, no delay.
fn run_ask(question: &str, record: &PatientSummary) {
    println!("[user] {}", question);
    println!();
    println!("[assistant] {}", respond(question, record));
}

/// The questions the scripted conversation walks through — one per topic,
/// plus one that falls through to the capability menu.
const SCRIPT: [&str; 7] = [
    "What medications am I currently taking?",
    "Do I have any allergies?",
    "How are my vital signs?",
    "Show me my recent lab results.",
    "What chronic conditions do I have?",
    "When was my last visit?",
    "Can you sing?",
];

fn run_transcript(record: PatientSummary, delay: DelayPolicy) {
    println!("=== Scripted conversation: {} ===", record.patient.name);
    println!();

    let mut session = ConversationSession::new(Arc::new(record), delay);
    print_last(&session);

    for question in SCRIPT {
        if !session.submit(question, Instant::now()) {
            // Cannot happen in this script; submissions are spaced out.
            continue;
        }
        print_last(&session);

        // Spin the event loop until the scheduled reply comes due.
        while !session.poll_reply(Instant::now()) {
            thread::sleep(Duration::from_millis(25));
        }
        print_last(&session);
    }

    println!("=== {} messages exchanged ===", session.messages().len());
}

/// Print the most recently appended message.
fn print_last(session: &ConversationSession) {
    if let Some(message) = session.messages().last() {
        let speaker = match message.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        println!("[{}] {}", speaker, message.content);
        println!();
    }
}

fn run_show_record(record: &PatientSummary) {
    let patient = &record.patient;
    println!("=== Patient record: {} ===", patient.name);
    println!();
    println!("  Name:    {}", patient.name);
    println!("  MRN:     {}", patient.mrn);
    println!("  Age:     {} years", patient.age);
    println!("  Gender:  {}", patient.gender);
    println!("  DOB:     {}", patient.date_of_birth);
    println!();

    let vitals = &record.vital_signs;
    println!("  Vital signs (recorded {}):", vitals.last_recorded);
    println!("    Blood pressure: {}", vitals.blood_pressure);
    println!("    Heart rate:     {}", vitals.heart_rate);
    println!("    Temperature:    {}", vitals.temperature);
    println!("    Weight:         {}", vitals.weight);
    println!("    Height:         {}", vitals.height);
    println!("    BMI:            {}", vitals.bmi);
    println!();

    println!("  Allergies:");
    for allergy in &record.medical_history.allergies {
        println!(
            "    {} - {} ({} severity)",
            allergy.allergen, allergy.reaction, allergy.severity
        );
    }
    println!();

    println!("  Current medications:");
    for med in &record.current_medications {
        println!(
            "    {} {} - {} (prescribed by {})",
            med.name, med.dosage, med.frequency, med.prescribed_by
        );
    }
    println!();

    println!("  Chronic conditions:");
    for condition in &record.medical_history.chronic_conditions {
        println!(
            "    {} ({}) - diagnosed {}",
            condition.condition, condition.status, condition.diagnosed_date
        );
    }
    println!();

    println!("  Surgical history:");
    for procedure in &record.medical_history.surgical_history {
        println!(
            "    {} ({}) - complications: {}",
            procedure.procedure, procedure.date, procedure.complications
        );
    }
    println!();

    println!("  Lab results:");
    for lab in &record.lab_results {
        println!(
            "    {} [{}]: {} = {} (reference {})",
            lab.date, lab.status, lab.test, lab.result, lab.reference
        );
    }
    println!();

    println!("  Recent visits:");
    for visit in &record.recent_visits {
        println!(
            "    {} - {} with {}",
            visit.date, visit.visit_type, visit.provider
        );
        println!("      Complaint:  {}", visit.chief_complaint);
        println!("      Assessment: {}", visit.assessment);
        println!("      Plan:       {}", visit.plan);
    }
}
