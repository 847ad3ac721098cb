use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::SecondsFormat;
use clap::{Args, Parser, Subcommand};
use diag_core::config::{busy_timeout_from_env_value, database_path_from_env_value};
use diag_core::{CoreConfig, DiagnosticTest, RecordService, SqliteStore};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "diag")]
#[command(about = "Diagnostic test records CLI")]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "DIAG_DATABASE_PATH")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List records one page at a time
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        /// Records per page
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,
    },
    /// Show one record
    Get {
        /// Record ID
        id: String,
    },
    /// Create a record
    Create(RecordArgs),
    /// Replace every field of a record
    Update {
        /// Record ID
        id: String,
        #[command(flatten)]
        fields: RecordArgs,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: String,
    },
}

#[derive(Args, Debug, Clone)]
struct RecordArgs {
    /// Patient name
    #[arg(long)]
    patient_name: String,
    /// Test type (e.g. "Blood Panel")
    #[arg(long)]
    test_type: String,
    /// Test result
    #[arg(long)]
    result: String,
    /// Test date and time (RFC 3339, e.g. 2024-01-15T10:00:00Z)
    #[arg(long)]
    test_date: String,
    /// Free-text notes (optional)
    #[arg(long)]
    notes: Option<String>,
}

impl RecordArgs {
    /// Untyped candidate, validated by the service exactly like an HTTP body.
    fn candidate(&self) -> Value {
        let mut candidate = json!({
            "patientName": self.patient_name,
            "testType": self.test_type,
            "result": self.result,
            "testDate": self.test_date,
        });
        if let Some(notes) = &self.notes {
            candidate["notes"] = json!(notes);
        }
        candidate
    }
}

/// One page of a list, as index bounds into the full record list.
#[derive(Debug, PartialEq, Eq)]
struct Page {
    start: usize,
    end: usize,
    number: usize,
    total_pages: usize,
}

fn paginate(total: usize, page: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = total.div_ceil(page_size).max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    Page {
        start,
        end,
        number: page,
        total_pages,
    }
}

fn format_record(record: &DiagnosticTest) -> String {
    format!(
        "ID: {}, Patient: {}, Test: {}, Result: {}, Date: {}, Notes: {}",
        record.id,
        record.patient_name,
        record.test_type,
        record.result,
        record.test_date.to_rfc3339_opts(SecondsFormat::Secs, true),
        record.notes.as_deref().unwrap_or("-"),
    )
}

fn open_service(database: Option<PathBuf>) -> Result<RecordService, Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(
        database.unwrap_or_else(|| database_path_from_env_value(None)),
        busy_timeout_from_env_value(std::env::var("DIAG_BUSY_TIMEOUT_MS").ok())?,
    )?;
    let store = SqliteStore::open(&cfg)?;
    Ok(RecordService::new(Arc::new(store)))
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        println!("Use 'diag --help' for commands");
        return Ok(());
    };

    let service = open_service(cli.database)?;

    match command {
        Commands::List { page, page_size } => {
            let records = service.list()?;
            if records.is_empty() {
                println!("No diagnostic tests found.");
                return Ok(());
            }
            let page = paginate(records.len(), page as usize, page_size as usize);
            for record in &records[page.start..page.end] {
                println!("{}", format_record(record));
            }
            println!("Page {} of {}", page.number, page.total_pages);
        }
        Commands::Get { id } => {
            let record = service.get(&id)?;
            println!("{}", format_record(&record));
        }
        Commands::Create(fields) => {
            let record = service.create(&fields.candidate())?;
            println!("Created diagnostic test with ID: {}", record.id);
        }
        Commands::Update { id, fields } => {
            let record = service.update(&id, &fields.candidate())?;
            println!("Updated diagnostic test with ID: {}", record.id);
        }
        Commands::Delete { id } => {
            let record = service.delete(&id)?;
            println!("Deleted: {}", format_record(&record));
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn args(notes: Option<&str>) -> RecordArgs {
        RecordArgs {
            patient_name: "Jane Doe".into(),
            test_type: "Blood Panel".into(),
            result: "Normal".into(),
            test_date: "2024-01-15T10:00:00Z".into(),
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pagination_splits_into_pages_of_ten() {
        assert_eq!(
            paginate(25, 1, 10),
            Page { start: 0, end: 10, number: 1, total_pages: 3 }
        );
        assert_eq!(
            paginate(25, 3, 10),
            Page { start: 20, end: 25, number: 3, total_pages: 3 }
        );
    }

    #[test]
    fn pagination_past_the_end_is_empty() {
        let page = paginate(5, 4, 10);
        assert_eq!(page.start, page.end);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn candidate_omits_absent_notes() {
        let candidate = args(None).candidate();
        assert!(candidate.get("notes").is_none());
        assert_eq!(candidate["patientName"], "Jane Doe");

        let candidate = args(Some("")).candidate();
        assert_eq!(candidate["notes"], "");
    }

    #[test]
    fn candidate_passes_validation() {
        let service = RecordService::new(Arc::new(diag_core::InMemoryStore::new()));
        let record = service.create(&args(Some("fasting")).candidate()).unwrap();
        assert_eq!(
            format_record(&record),
            "ID: 1, Patient: Jane Doe, Test: Blood Panel, Result: Normal, \
             Date: 2024-01-15T10:00:00Z, Notes: fasting"
        );
    }

    #[test]
    fn list_arguments_parse() {
        let cli = Cli::try_parse_from(["diag", "list", "--page", "2", "--page-size", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List { page: 2, page_size: 5 })
        ));
        assert!(Cli::try_parse_from(["diag", "list", "--page", "0"]).is_err());
    }
}
