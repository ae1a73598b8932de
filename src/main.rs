//! eegdiff: Label Group Comparison CLI
//!
//! Loads a labelled dataset, reports missing values and class balance,
//! summarises each feature per group and ranks features by mean difference.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use eegdiff::cli::Cli;
use eegdiff::pipeline::{analyze_dataset, load_dataset};
use eegdiff::report::{display_report, export_report, DisplayOptions, ExportParams};
use eegdiff::utils::{
    abandon_spinner, create_spinner, finish_with_success, print_banner, print_completion,
    print_config, print_info, print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.analysis_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&config.input, &config.label_column, &config.baseline, &config.positive);

    // Step 1: Load and validate
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner(&format!("Reading {}...", config.input.display()));
    let dataset = match load_dataset(&config.input, &config.label_column, &config.load) {
        Ok(ds) => ds,
        Err(e) => {
            abandon_spinner(&spinner);
            return Err(e.into());
        }
    };
    let (rows, cols) = dataset.shape();
    finish_with_success(&spinner, &format!("Data loaded. Shape: ({}, {})", rows, cols));

    if !dataset.excluded_columns().is_empty() {
        print_warning(&format!(
            "Excluding {} non-numeric column(s) from aggregation: {}",
            dataset.excluded_columns().len(),
            dataset.excluded_columns().join(", ")
        ));
    }
    print_step_time(step_start.elapsed());

    // Step 2: Audit, aggregate and rank
    print_step_header(2, "Group Comparison");
    let step_start = Instant::now();
    let spinner = create_spinner("Computing group statistics...");
    let report = match analyze_dataset(&dataset, &config.baseline, &config.positive) {
        Ok(r) => r,
        Err(e) => {
            abandon_spinner(&spinner);
            return Err(e.into());
        }
    };
    finish_with_success(
        &spinner,
        &format!(
            "Compared {} feature(s) across {} group(s)",
            report.group_stats.feature_order.len(),
            report.group_stats.group_count()
        ),
    );
    print_step_time(step_start.elapsed());

    // Step 3: Report
    print_step_header(3, "Report");
    let options = DisplayOptions {
        top: cli.top,
        show_hints: !cli.no_hints,
    };
    display_report(&report, &options);

    if let Some(export_path) = &cli.export {
        println!();
        let input_file = config.input.display().to_string();
        export_report(&report, export_path, &ExportParams { input_file: &input_file })?;
        print_success(&format!("Report exported to {}", export_path.display()));
    } else {
        println!();
        print_info(&format!(
            "Use {} to save the full report as JSON",
            style("--export <PATH>").cyan()
        ));
    }

    print_completion();

    Ok(())
}
