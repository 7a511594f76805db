//! PACT CLI
//!
//! Command-line interface for the evidence core's external collaborators:
//! - transcript-verify: check a transcript's cryptographic integrity
//! - gc-view: emit a judged executive summary for a transcript
//! - evidence-bundle: package a transcript, judgment, and manifest

use clap::{Parser, Subcommand};
use pact_types::Transcript;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pact")]
#[command(about = "PACT evidence core verification and bundling tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify a transcript's cryptographic integrity
    TranscriptVerify {
        /// Path to the transcript JSON file
        file: PathBuf,
    },
    /// Emit a judged executive summary for a transcript
    GcView {
        /// Path to the transcript JSON file
        file: PathBuf,
    },
    /// Package a transcript and its judgment into an evidence bundle
    EvidenceBundle {
        /// Path to the transcript JSON file
        file: PathBuf,
        /// Output directory for the bundle
        out_dir: PathBuf,
    },
}

fn load_transcript(path: &PathBuf) -> Result<Transcript, String> {
    let content = std::fs::read_to_string(path).map_err(|e| format!("file error: {e}"))?;
    serde_json::from_str(&content).map_err(|e| format!("malformed transcript: {e}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::info!("pact-cli invoked");

    match cli.command {
        Commands::TranscriptVerify { file } => run_transcript_verify(&file),
        Commands::GcView { file } => run_gc_view(&file),
        Commands::EvidenceBundle { file, out_dir } => run_evidence_bundle(&file, &out_dir),
    }
}

fn run_transcript_verify(file: &PathBuf) -> ExitCode {
    let transcript = match load_transcript(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let verdict = pact_transcript::verify_transcript(&transcript);

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              Transcript Verification Result               ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "{}",
        if verdict.ok {
            "✓ Transcript is VALID"
        } else {
            "✗ Transcript is INVALID"
        }
    );
    println!();
    println!("Transcript ID: {}", transcript.transcript_id.0);
    println!("Integrity:     {:?}", verdict.integrity_status);

    if !verdict.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in &verdict.errors {
            println!("  - [{:?}] {}", error.error_type, error.message);
        }
    }

    if verdict.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_gc_view(file: &PathBuf) -> ExitCode {
    let transcript = match load_transcript(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let integrity = pact_transcript::verify_transcript(&transcript);
    let judgment = pact_blame::resolve(&transcript);
    let summary = pact_evidence::executive_summary(&transcript.transcript_id.0, &integrity, &judgment);

    match serde_json::to_string_pretty(&serde_json::json!({
        "executive_summary": summary,
        "judgment": judgment,
    })) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_evidence_bundle(file: &PathBuf, out_dir: &PathBuf) -> ExitCode {
    let transcript = match load_transcript(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let judgment = pact_blame::resolve(&transcript);
    let bundle = match pact_evidence::build_bundle(transcript, judgment, None) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error building bundle: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = pact_evidence::write_bundle(&bundle, out_dir) {
        eprintln!("Error writing bundle: {e}");
        return ExitCode::FAILURE;
    }

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                  Evidence Bundle Written                  ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    println!("Directory:       {}", out_dir.display());
    println!("Transcript hash: {}", bundle.manifest.transcript_hash);
    println!("Judgment hash:   {}", bundle.manifest.judgment_hash);

    ExitCode::SUCCESS
}
