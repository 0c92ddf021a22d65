use serde::Serialize;
use std::env;
use std::path::Path;
use torus_locator::config::{self, RuntimeConfig};
use torus_locator::io::{read_text_file, write_json_file};
use torus_locator::service::{process_payload, PayloadReport};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let csv_path = args.next().ok_or_else(usage)?;

    let config = config::load_config(Path::new(&config_path))?;
    let locator = config
        .build_locator()
        .map_err(|e| format!("Invalid geometry in {config_path}: {e}"))?;

    let text = read_text_file(Path::new(&csv_path))?;
    let report = process_payload(&locator, &text)
        .map_err(|e| format!("Failed to parse {csv_path}: {e}"))?;

    print_text_summary(&report);

    let output = LocateCsvOutput {
        config: &config,
        located: report.located().count(),
        failed: report.failure_count(),
        rejected_rows: report.rejected_rows.len(),
        report: &report,
    };
    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &output)?;
            println!("JSON report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}

fn usage() -> String {
    "Usage: locate_csv <config.json> <detections.csv>".to_string()
}

fn print_text_summary(report: &PayloadReport) {
    println!("Localization summary");
    println!("  detections: {}", report.reports.len());
    println!("  located: {}", report.located().count());
    println!("  failed: {}", report.failure_count());
    println!("  rejected rows: {}", report.rejected_rows.len());
    for loc in report.located() {
        println!(
            "  center=({:.1}, {:.1}) range={:.3} orientation_deg={:.2} confidence={:.3} position=({:.3}, {:.3}, {:.3})",
            loc.center_px[0],
            loc.center_px[1],
            loc.estimate.distance,
            loc.estimate.orientation.to_degrees(),
            loc.estimate.confidence,
            loc.position.x,
            loc.position.y,
            loc.position.z
        );
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocateCsvOutput<'a> {
    config: &'a RuntimeConfig,
    located: usize,
    failed: usize,
    rejected_rows: usize,
    report: &'a PayloadReport,
}
