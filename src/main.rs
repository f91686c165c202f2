use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};

use bus_seat_map::{
    emit_files, enumerate_rosters, load_config, render_markdown, report_json, slugify, unique_slug, with_fingerprint,
    Config, EnumerateError, PlanError, Report, SeatBoard,
};

const DEFAULT_CONFIG: &str = "busseat.yaml";

fn flag_value(args: &[String], name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    args.get(pos + 1).filter(|v| !v.starts_with("--")).cloned()
}

fn exit_code_for(err: &PlanError) -> i32 {
    match err {
        PlanError::EmptyInput | PlanError::NoPassengers { .. } => 4,
        PlanError::SeatOutOfRange { .. } | PlanError::DuplicateSeats { .. } => 5,
    }
}

fn error_label(err: &PlanError) -> &'static str {
    match err {
        PlanError::EmptyInput => "EmptyInput",
        PlanError::NoPassengers { .. } => "NoPassengers",
        PlanError::SeatOutOfRange { .. } => "SeatOutOfRange",
        PlanError::DuplicateSeats { .. } => "DuplicateSeats",
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let strict = args.iter().any(|a| a == "--strict");
    let emit = args.iter().any(|a| a == "--emit");
    let as_json = flag_value(&args, "--format").map(|f| f == "json").unwrap_or(false);
    let input_arg = flag_value(&args, "--input").or_else(|| args.iter().any(|a| a == "--input").then(|| "-".to_string()));

    // 1) Config: explicit path, else ./busseat.yaml when present, else built-in tables
    let explicit_config = flag_value(&args, "--config");
    let config_path = explicit_config.clone().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let use_file = explicit_config.is_some() || Path::new(&config_path).exists();
    let cfg = if use_file {
        match load_config(Path::new(&config_path)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool": "load_config",
                        "file": config_path,
                        "error": e.to_string(),
                        "error_code": 3
                    })
                );
                std::process::exit(3);
            }
        }
    } else {
        Config::default()
    };
    eprintln!(
        "{}",
        serde_json::json!({
            "tool": "load_config",
            "file": use_file.then(|| config_path.clone()),
            "status": "ok",
            "id": cfg.id,
            "seat_count": cfg.seat_count,
            "known_locations": cfg.locations.known.len()
        })
    );

    // 2) Rosters: stdin, a single file, or a glob
    let from_config = input_arg.is_none() && cfg.datasources.is_some();
    let rosters: Vec<(String, String)> = match input_arg.as_deref() {
        None if !from_config => vec![("stdin".to_string(), read_stdin())],
        Some("-") => vec![("stdin".to_string(), read_stdin())],
        Some(p) if Path::new(p).is_file() => {
            let path = PathBuf::from(p);
            vec![(roster_name(&path), read_roster(&path))]
        }
        other => {
            let pattern = other.map(|s| s.to_string()).unwrap_or_else(|| cfg.input_glob());
            match enumerate_rosters(&pattern) {
                Ok(files) => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "tool": "enumerate_rosters",
                            "pattern": pattern,
                            "count": files.len()
                        })
                    );
                    files.iter().map(|f| (roster_name(f), read_roster(f))).collect()
                }
                Err(err) => {
                    let EnumerateError::NoFilesFound { guidance } = err;
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "tool": "enumerate_rosters",
                            "pattern": pattern,
                            "error": "NoFilesFound",
                            "error_code": 1
                        })
                    );
                    eprintln!("{}", guidance);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut used_slugs: HashSet<String> = HashSet::new();
    for (name, text) in rosters {
        let mut board = SeatBoard::from_config(&cfg);

        // 3) Parse + validate
        let outcome = match board.load(&text) {
            Ok(outcome) => outcome,
            Err(rejected) => {
                let report = Report {
                    title: &name,
                    seat_count: cfg.seat_count,
                    records: &rejected.outcome.records,
                    diagnostics: &rejected.outcome.diagnostics,
                    warnings: &rejected.outcome.warnings,
                };
                let code = exit_code_for(&rejected.error);
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "tool": "validate_seats",
                        "roster": name,
                        "error": error_label(&rejected.error),
                        "message": rejected.error.to_string(),
                        "error_code": code
                    })
                );
                if as_json {
                    println!("{}", report_json(&report));
                } else {
                    println!("{}", bus_seat_map::report::render_feedback(report.diagnostics, report.warnings));
                }
                std::process::exit(code);
            }
        };

        let mut by_strategy: BTreeMap<&str, usize> = BTreeMap::new();
        for s in &outcome.strategies {
            *by_strategy.entry(s.as_str()).or_insert(0) += 1;
        }
        eprintln!(
            "{}",
            serde_json::json!({
                "tool": "parse_batch",
                "roster": name,
                "lines": outcome.line_count,
                "records": outcome.records.len(),
                "diagnostics": outcome.diagnostics.len(),
                "warnings": outcome.warnings.len(),
                "strategies": by_strategy
            })
        );
        eprintln!(
            "{}",
            serde_json::json!({
                "tool": "validate_seats",
                "roster": name,
                "status": "ok",
                "statistics": board.statistics()
            })
        );

        let report = Report {
            title: &name,
            seat_count: board.seat_count(),
            records: board.records(),
            diagnostics: &outcome.diagnostics,
            warnings: &outcome.warnings,
        };
        let markdown = render_markdown(&report);
        if as_json {
            println!("{}", report_json(&report));
        } else {
            println!("{}", markdown);
        }

        if strict && (!outcome.diagnostics.is_empty() || !outcome.warnings.is_empty()) {
            eprintln!(
                "{}",
                serde_json::json!({
                    "tool": "parse_batch",
                    "roster": name,
                    "error": "StrictFeedback",
                    "diagnostics": outcome.diagnostics.len(),
                    "warnings": outcome.warnings.len(),
                    "error_code": 7
                })
            );
            std::process::exit(7);
        }

        // 4) Emit files
        if emit {
            let stem = unique_slug(slugify(&name), &mut used_slugs);
            let meta = with_fingerprint(serde_json::json!({
                "roster": name,
                "config_id": cfg.id,
                "report": report_json(&report),
                "timestamps": { "emitted_ms": now_ms() },
            }));
            match emit_files(&markdown, &meta, &cfg.output_dir(), &stem) {
                Ok(paths) => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "tool": "emit_files",
                            "roster": name,
                            "md_path": paths.md_path,
                            "meta_path": paths.meta_path
                        })
                    );
                }
                Err(e) => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "tool": "emit_files",
                            "roster": name,
                            "error": e.to_string(),
                            "error_code": 6
                        })
                    );
                    std::process::exit(6);
                }
            }
        }
    }
}

fn roster_name(path: &Path) -> String {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("roster").to_string()
}

fn read_stdin() -> String {
    let mut buf = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
        eprintln!("{}", serde_json::json!({ "tool": "read_input", "file": "stdin", "error": e.to_string(), "error_code": 1 }));
        std::process::exit(1);
    }
    buf
}

fn read_roster(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", serde_json::json!({ "tool": "read_input", "file": path, "error": e.to_string(), "error_code": 1 }));
            std::process::exit(1);
        }
    }
}

fn now_ms() -> i128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i128)
        .unwrap_or(0)
}
