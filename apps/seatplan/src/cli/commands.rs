//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::client::SeatplanClient;
use crate::snapshot;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use seatplan_core::{
    Seating, SeatplanError, find,
    export::{export_filename, from_text, to_text},
    roster::{SkippedRow, parse_examinees, parse_rooms},
};
use std::path::PathBuf;

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for roster files (10 MB).
///
/// Rosters are a few thousand rows at most; anything larger is a mistake.
const MAX_ROSTER_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum file size for CSV plan import (50 MB).
const MAX_IMPORT_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &PathBuf, max_size: u64) -> Result<(), SeatplanError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SeatplanError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(SeatplanError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate an input file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// names an existing regular file.
fn validate_file_path(path: &std::path::Path) -> Result<PathBuf, SeatplanError> {
    let canonical = path.canonicalize().map_err(|e| {
        SeatplanError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SeatplanError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output file path.
///
/// The parent directory must already exist; the file itself need not.
fn validate_output_path(path: &std::path::Path) -> Result<PathBuf, SeatplanError> {
    let parent = path.parent().unwrap_or(std::path::Path::new("."));

    let canonical_parent = parent.canonicalize().map_err(|e| {
        SeatplanError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(SeatplanError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| SeatplanError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server, seeding state from the snapshot if present.
pub async fn cmd_serve(data_path: &PathBuf, host: &str, port: u16) -> Result<(), SeatplanError> {
    let initial = snapshot::load(data_path)?;

    println!("Seatplan Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Snapshot: {:?}", data_path);
    match initial.as_ref() {
        Some(seating) => println!("  Plan:     {} assignments loaded", seating.total()),
        None => println!("  Plan:     none loaded"),
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /api/health        - Health check");
    println!("  POST /api/save-seating  - Store a seating arrangement");
    println!("  GET  /api/seating       - Fetch the stored arrangement");
    println!("  GET  /api/student/{{id}}  - Look up one examinee");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, initial).await
}

// =============================================================================
// GENERATE COMMAND
// =============================================================================

/// Generate a seating plan from roster files.
pub async fn cmd_generate(
    data_path: &PathBuf,
    json_mode: bool,
    verbose: bool,
    examinees_path: &PathBuf,
    rooms_path: &PathBuf,
    seed: Option<u64>,
    output: Option<&PathBuf>,
    push: Option<String>,
) -> Result<(), SeatplanError> {
    let examinee_text = read_roster_file(examinees_path)?;
    let room_text = read_roster_file(rooms_path)?;

    let examinee_roster = parse_examinees(&examinee_text)?;
    let room_roster = parse_rooms(&room_text)?;

    let mut rng = make_rng(seed);
    let seating = seatplan_core::generate(examinee_roster.records, &room_roster.records, &mut rng)?;

    snapshot::save(data_path, &seating)?;

    let csv = to_text(&seating.assignments);
    let output_path = resolve_export_path(output);
    let validated_output = validate_output_path(&output_path)?;
    std::fs::write(&validated_output, csv.as_bytes())
        .map_err(|e| SeatplanError::IoError(format!("Write file: {}", e)))?;

    // Push after the plan is safely on disk; a failed push is reported but
    // does not fail the run.
    let mut push_error = None;
    if let Some(url) = push.as_deref() {
        let client = SeatplanClient::new(url);
        match client.save_seating(&seating).await {
            Ok(total) => tracing::info!("Pushed {} assignments to {}", total, url),
            Err(e) => push_error = Some(e.to_string()),
        }
    }

    if json_mode {
        let output = serde_json::json!({
            "totalStudents": seating.total(),
            "unplacedCount": seating.unplaced,
            "generatedAt": seating.generated_at,
            "skippedExaminees": examinee_roster.skipped.len(),
            "skippedRooms": room_roster.skipped.len(),
            "rooms": seating.room_counts(),
            "snapshot": data_path.to_string_lossy(),
            "csv": validated_output.to_string_lossy(),
            "pushed": push.is_some() && push_error.is_none(),
            "pushError": push_error,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Generated Seating Plan");
    println!("======================");
    println!("Placed:   {}", seating.total());
    if seating.unplaced > 0 {
        println!(
            "Unplaced: {} (not enough seats for everyone)",
            seating.unplaced
        );
    }
    report_skipped("examinee", &examinee_roster.skipped, verbose);
    report_skipped("room", &room_roster.skipped, verbose);
    println!();
    println!("Room fill:");
    let counts = seating.room_counts();
    for room in &room_roster.records {
        let count = counts.get(&room.id).copied().unwrap_or(0);
        println!("  {:<16} {}/{}", room.id.as_str(), count, room.capacity);
    }
    println!();
    println!("Snapshot: {:?}", data_path);
    println!("CSV:      {:?}", validated_output);
    if let Some(url) = push.as_deref() {
        match push_error {
            None => println!("Pushed:   {}", url),
            Some(e) => println!("Push to {} failed: {}", url, e),
        }
    }

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Re-export the snapshot plan as CSV.
pub fn cmd_export(data_path: &PathBuf, output: Option<&PathBuf>) -> Result<(), SeatplanError> {
    let seating = require_snapshot(data_path)?;

    let csv = to_text(&seating.assignments);
    let output_path = resolve_export_path(output);
    let validated_output = validate_output_path(&output_path)?;
    std::fs::write(&validated_output, csv.as_bytes())
        .map_err(|e| SeatplanError::IoError(format!("Write file: {}", e)))?;

    println!(
        "Exported {} assignments to {:?}",
        seating.total(),
        validated_output
    );

    Ok(())
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Import a CSV plan into the snapshot.
pub fn cmd_import(data_path: &PathBuf, file: &PathBuf) -> Result<(), SeatplanError> {
    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_IMPORT_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated_path)
        .map_err(|e| SeatplanError::IoError(format!("Read file: {}", e)))?;

    let assignments = from_text(&text);
    if assignments.is_empty() {
        return Err(SeatplanError::IoError(format!(
            "No assignments found in {:?}",
            validated_path
        )));
    }

    let seating = Seating::new(assignments, 0);
    snapshot::save(data_path, &seating)?;

    println!(
        "Imported {} assignments into {:?}",
        seating.total(),
        data_path
    );

    Ok(())
}

// =============================================================================
// FIND COMMAND
// =============================================================================

/// Look up one examinee's seat, locally or on a remote server.
pub async fn cmd_find(
    data_path: &PathBuf,
    json_mode: bool,
    identifier: &str,
    remote: Option<String>,
) -> Result<(), SeatplanError> {
    let found = match remote {
        Some(url) => SeatplanClient::new(&url)
            .fetch_student(identifier)
            .await
            .map_err(|e| SeatplanError::IoError(format!("Remote lookup: {}", e)))?,
        None => {
            let seating = require_snapshot(data_path)?;
            find(identifier, &seating.assignments).cloned()
        }
    };

    if json_mode {
        let output = match found.as_ref() {
            Some(assignment) => serde_json::json!({ "found": true, "student": assignment }),
            None => serde_json::json!({ "found": false }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    match found {
        Some(assignment) => {
            println!("Examinee Seat");
            println!("=============");
            println!("Identifier: {}", assignment.examinee_id);
            println!("Name:       {}", assignment.examinee_name);
            println!("Subject:    {}", assignment.subject);
            println!("Date:       {}", assignment.date);
            println!(
                "Room:       {} ({})",
                assignment.room_name, assignment.room_id
            );
            println!(
                "Seat:       {} (row {}, column {})",
                assignment.seat_number, assignment.row, assignment.column
            );
        }
        None => println!("No seat found for '{}'", identifier),
    }

    Ok(())
}

// =============================================================================
// PULL COMMAND
// =============================================================================

/// Fetch the remote plan into the snapshot.
pub async fn cmd_pull(data_path: &PathBuf, remote: Option<String>) -> Result<(), SeatplanError> {
    let Some(url) = remote else {
        return Err(SeatplanError::IoError(
            "No remote server given - pass --remote or set `remote` in seatplan.toml".to_string(),
        ));
    };

    println!("Pulling plan from {}...", url);

    let client = SeatplanClient::new(&url);
    match client.fetch_seating().await {
        Some(seating) => {
            snapshot::save(data_path, &seating)?;
            println!(
                "Pulled {} assignments into {:?}",
                seating.total(),
                data_path
            );
            if seating.unplaced > 0 {
                println!("Warning: pulled plan has {} unplaced", seating.unplaced);
            }
        }
        None => println!("No data available from {}", url),
    }

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show snapshot summary.
pub fn cmd_status(data_path: &PathBuf, json_mode: bool) -> Result<(), SeatplanError> {
    let stored = snapshot::load(data_path)?;

    if json_mode {
        let output = match stored.as_ref() {
            Some(seating) => serde_json::json!({
                "snapshot": data_path.to_string_lossy(),
                "totalStudents": seating.total(),
                "unplacedCount": seating.unplaced,
                "generatedAt": seating.generated_at,
                "rooms": seating.room_counts(),
            }),
            None => serde_json::json!({
                "snapshot": data_path.to_string_lossy(),
                "totalStudents": 0,
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Seatplan Status");
    println!("===============");
    println!("Snapshot: {:?}", data_path);
    println!();

    match stored {
        Some(seating) => {
            println!("Placed:       {}", seating.total());
            println!("Unplaced:     {}", seating.unplaced);
            println!("Generated at: {}", seating.generated_at.to_rfc3339());
            println!();
            println!("Room fill:");
            for (room_id, count) in seating.room_counts() {
                let capacity = seating
                    .assignments
                    .iter()
                    .find(|a| a.room_id == room_id)
                    .map_or(0, |a| a.room_capacity);
                println!("  {:<16} {}/{}", room_id.as_str(), count, capacity);
            }
        }
        None => println!("No plan generated yet"),
    }

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Build the RNG for a generation run: seeded for replay, thread RNG otherwise.
fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    }
}

/// Validate and read a roster file.
fn read_roster_file(path: &PathBuf) -> Result<String, SeatplanError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_ROSTER_FILE_SIZE)?;
    std::fs::read_to_string(&validated_path)
        .map_err(|e| SeatplanError::IoError(format!("Read file: {}", e)))
}

/// Print the quarantine report for one roster.
fn report_skipped(kind: &str, skipped: &[SkippedRow], verbose: bool) {
    if skipped.is_empty() {
        return;
    }
    println!("Skipped:  {} {} row(s)", skipped.len(), kind);
    if verbose {
        for row in skipped {
            println!("  line {}: {}", row.line, row.reason);
        }
    }
}

/// Load the snapshot or explain that no plan exists yet.
fn require_snapshot(data_path: &PathBuf) -> Result<Seating, SeatplanError> {
    snapshot::load(data_path)?.ok_or_else(|| {
        SeatplanError::IoError(format!(
            "No plan in snapshot {:?} - run `seatplan generate` first",
            data_path
        ))
    })
}

/// Explicit output path, or the generated `exam-seating-<date>.csv` name.
fn resolve_export_path(output: Option<&PathBuf>) -> PathBuf {
    output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(export_filename(Utc::now().date_naive())))
}
