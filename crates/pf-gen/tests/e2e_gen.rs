//! End-to-end tests: configuration resolution, generation, summary and every
//! written artifact, through the library API and the `pfgen` binary.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use pf_config::{GeneratorConfig, OutputFormat};
use pf_gen::args::ConfigArgs;
use pf_gen::run::execute;
use pf_gen::tracing_init::{DomainFormat, FileFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

fn init_test_tracing(log_dir: &Path) -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, "e2e_gen.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(DomainFormat::new())
                .with_test_writer()
                .with_filter(EnvFilter::try_new("info").unwrap()),
        )
        .with(
            fmt::layer()
                .event_format(DomainFormat::new())
                .fmt_fields(FileFields::default())
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(EnvFilter::try_new("debug").unwrap()),
        )
        .try_init();
    guard
}

fn stamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn data_lines(path: &Path) -> Vec<String> {
    BufReader::new(File::open(path).unwrap())
        .lines()
        .map(|l| l.unwrap())
        .collect()
}

fn pfgen() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pfgen"))
}

#[test]
fn e2e_scenario_to_files() {
    let dir = tempfile::tempdir().unwrap();
    let _guard = init_test_tracing(dir.path());

    let args = ConfigArgs {
        scenario: Some("status".into()),
        records: Some(1000),
        out: Some(dir.path().join("out")),
        formats: vec![OutputFormat::Csv, OutputFormat::Jsonl, OutputFormat::Arrow],
        seed: Some(42),
        ..Default::default()
    };
    let config = args.resolve().unwrap();
    assert!(config.status_progression.enabled);

    let report = execute(&config, stamp()).unwrap();
    assert_eq!(report.seed, 42);
    assert_eq!(report.summary.total_records, 1000);
    assert!(report.summary.fy_spanning >= 1);

    let out = dir.path().join("out");
    assert_eq!(report.files.datasets.len(), 3);
    let csv = out.join("potential_failures_test_data_20261019_120000.csv");
    let jsonl = out.join("potential_failures_test_data_20261019_120000.jsonl");
    assert!(report.files.datasets.contains(&csv));
    assert!(report.files.datasets.contains(&jsonl));

    let csv_lines = data_lines(&csv);
    assert_eq!(csv_lines.len(), 1001);
    assert!(csv_lines[0].starts_with("TaskId,RecordID,Instruction_Code"));

    let jsonl_lines = data_lines(&jsonl);
    assert_eq!(jsonl_lines.len(), 1000);
    let task_ids: HashSet<String> = jsonl_lines
        .iter()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["TaskId"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(task_ids.len(), 1000);

    // three steps x three formats
    assert_eq!(report.files.snapshots.len(), 9);
    let first: PathBuf = out.join("snapshot_1_WAPPR_20261019_120000.jsonl");
    assert!(report.files.snapshots.contains(&first));
    for line in data_lines(&first) {
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["Status"], "WAPPR");
        assert!(v["Finished"].is_null());
    }

    let meta: serde_json::Value =
        serde_json::from_reader(File::open(&report.files.metadata).unwrap()).unwrap();
    assert_eq!(meta["seed"], 42);
    assert_eq!(meta["record_count"], 1000);
    assert_eq!(meta["files"].as_array().unwrap().len(), 12);
    assert_eq!(meta["summary"]["duplicate_probes"], report.summary.duplicate_probes);
}

#[test]
fn e2e_same_seed_same_files() {
    let dir = tempfile::tempdir().unwrap();
    let run_into = |sub: &str| {
        let mut config = GeneratorConfig::default();
        config.seed = Some(7);
        config.dataset.total_records = 300;
        config.output.directory = dir.path().join(sub);
        config.output.formats = vec![OutputFormat::Jsonl];
        let report = execute(&config, stamp()).unwrap();
        std::fs::read_to_string(&report.files.datasets[0]).unwrap()
    };
    assert_eq!(run_into("a"), run_into("b"));
}

#[test]
fn e2e_binary_gen_writes_log_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bin-out");
    let status = pfgen()
        .args(["gen", "-s", "dev", "-r", "120", "--seed", "3", "-f", "csv", "-o"])
        .arg(&out)
        .env_remove("RUST_LOG")
        .status()
        .unwrap();
    assert!(status.success());

    let names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n.starts_with("potential_failures_test_data_") && n.ends_with(".csv")));
    assert!(names.iter().any(|n| n.ends_with("_metadata.json")));
    assert!(names.iter().any(|n| n == "data_generation.log"));

    let csv = names.iter().find(|n| n.ends_with(".csv")).unwrap();
    assert_eq!(data_lines(&out.join(csv)).len(), 121);
}

#[test]
fn e2e_binary_config_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let saved = dir.path().join("resolved.toml");
    let status = pfgen()
        .args(["config", "-s", "graffiti", "--seed", "11", "--save"])
        .arg(&saved)
        .status()
        .unwrap();
    assert!(status.success());

    let reloaded = GeneratorConfig::load(&saved).unwrap();
    let expected = ConfigArgs {
        scenario: Some("graffiti".into()),
        seed: Some(11),
        ..Default::default()
    }
    .resolve()
    .unwrap();
    assert_eq!(reloaded.to_toml().unwrap(), expected.to_toml().unwrap());
}

#[test]
fn e2e_binary_lists_scenarios() {
    let output = pfgen().arg("scenarios").output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    for name in ["default", "graffiti", "fy", "edge"] {
        assert!(
            text.lines().any(|l| l.starts_with(&format!("{name} [built-in]"))),
            "{name} missing from:\n{text}"
        );
    }
}

#[test]
fn e2e_binary_rejects_bad_override() {
    let output = pfgen()
        .args(["gen", "--duplicate-pct", "2.0", "-o"])
        .arg(std::env::temp_dir().join("pfgen-never-written"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicates.fraction"), "{stderr}");
}
