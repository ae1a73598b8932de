//! Terminal rendering of an analysis report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    AnalysisReport, ClassDistribution, DifferenceRanking, GroupStats, Measure, MissingValueReport,
};

/// Hints printed after the ranking
pub const INTERPRETATION_HINTS: [&str; 3] = [
    "Look for channels with large differences in mean amplitude.",
    "Higher standard deviation might indicate more erratic brain activity.",
    "If the positive class represents dementia, check whether temporal (T3/T4) or parietal (P3/P4) channels show the largest deviations.",
];

/// Features listed in the largest-absolute view when no `top` is given
pub const DEFAULT_LARGEST_ABSOLUTE: usize = 5;

/// What to include when printing a report
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Limit the ranking table to the first N features
    pub top: Option<usize>,
    pub show_hints: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            top: None,
            show_hints: true,
        }
    }
}

/// Print the whole report in order: shape, missing values, class
/// distribution, group statistics, ranking, largest absolute differences,
/// hints.
pub fn display_report(report: &AnalysisReport, options: &DisplayOptions) {
    print_section("DATASET");
    println!("      Rows: {}", report.rows);
    println!("      Columns: {}", report.columns);
    println!("      Label column: {}", style(&report.label_column).cyan());
    if !report.excluded_columns.is_empty() {
        println!(
            "      Excluded (non-numeric): {}",
            style(report.excluded_columns.join(", ")).yellow()
        );
    }

    print_section("MISSING VALUES");
    if report.missing.has_missing() {
        println!(
            "      {} {}",
            style("Warning:").yellow().bold(),
            format_args!("{} missing value(s) detected", report.missing.total())
        );
        print_table(&build_missing_table(&report.missing));
    } else {
        println!("      {}", style("No missing values found.").green());
    }

    print_section("CLASS DISTRIBUTION");
    print_table(&build_class_table(&report.class_distribution));
    if report.class_distribution.unlabeled > 0 {
        println!(
            "      {} row(s) with an empty label were left out of all groups",
            style(report.class_distribution.unlabeled).yellow()
        );
    }

    print_section("GROUP STATISTICS (mean ± std)");
    print_table(&build_group_stats_table(&report.group_stats));

    print_section(&format!(
        "DIFFERENCE IN MEANS ({} - {})",
        report.ranking.positive, report.ranking.baseline
    ));
    print_table(&build_ranking_table(&report.ranking, options.top));

    let largest = options.top.unwrap_or(DEFAULT_LARGEST_ABSOLUTE);
    if !report.ranking.largest_absolute(largest).is_empty() {
        print_section("LARGEST ABSOLUTE DIFFERENCES");
        print_table(&build_largest_absolute_table(&report.ranking, largest));
    }

    if options.show_hints {
        print_section("INTERPRETATION HINTS");
        for (i, hint) in INTERPRETATION_HINTS.iter().enumerate() {
            println!("      {}. {}", i + 1, hint);
        }
    }
}

/// Columns with missing values, most missing first
pub fn build_missing_table(missing: &MissingValueReport) -> Table {
    let mut table = new_table(vec!["Column", "Missing", "Ratio"]);
    for entry in missing.columns_with_missing() {
        let ratio = missing.ratio(&entry.column).unwrap_or(0.0);
        table.add_row(vec![
            Cell::new(&entry.column),
            Cell::new(entry.nulls).fg(Color::Red),
            Cell::new(format!("{:.1}%", ratio * 100.0)),
        ]);
    }
    table
}

/// Count and normalised frequency per label value
pub fn build_class_table(distribution: &ClassDistribution) -> Table {
    let mut table = new_table(vec!["Label", "Count", "Frequency"]);
    for class in &distribution.classes {
        table.add_row(vec![
            Cell::new(class.label.as_str()),
            Cell::new(class.count),
            Cell::new(format!("{:.4}", class.frequency)),
        ]);
    }
    table
}

/// One row per feature, one `mean ± std` column per group
pub fn build_group_stats_table(stats: &GroupStats) -> Table {
    let mut header = vec!["Feature".to_string()];
    header.extend(
        stats
            .groups
            .iter()
            .map(|(label, summary)| format!("{} (n={})", label, summary.size)),
    );
    let mut table = new_table(header);

    for feature in &stats.feature_order {
        let mut row = vec![Cell::new(feature)];
        for summary in stats.groups.values() {
            let text = match summary.feature(feature) {
                Some(s) => format_mean_std(s.mean, s.std_dev),
                None => Measure::InsufficientData.to_string(),
            };
            row.push(Cell::new(text).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }
    table
}

/// Ranked differences, optionally limited to the first `top` entries
pub fn build_ranking_table(ranking: &DifferenceRanking, top: Option<usize>) -> Table {
    let mut table = new_table(vec![
        "#".to_string(),
        "Feature".to_string(),
        format!("Mean ({})", ranking.baseline),
        format!("Mean ({})", ranking.positive),
        "Difference".to_string(),
    ]);

    let entries = match top {
        Some(n) => ranking.top(n),
        None => &ranking.entries[..],
    };

    for (i, entry) in entries.iter().enumerate() {
        let color = match entry.difference {
            Measure::Value(d) if d > 0.0 => Color::Green,
            Measure::Value(d) if d < 0.0 => Color::Red,
            _ => Color::White,
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.feature),
            Cell::new(format!("{:.4}", entry.baseline_mean)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", entry.positive_mean)).set_alignment(CellAlignment::Right),
            Cell::new(format_signed(entry.difference))
                .fg(color)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Features with the largest difference regardless of direction
pub fn build_largest_absolute_table(ranking: &DifferenceRanking, n: usize) -> Table {
    let mut table = new_table(vec!["#", "Feature", "|Difference|", "Direction"]);
    for (i, entry) in ranking.largest_absolute(n).into_iter().enumerate() {
        let diff = entry.difference.value().unwrap_or(0.0);
        let direction = if diff > 0.0 {
            Cell::new(format!("higher in {}", ranking.positive)).fg(Color::Green)
        } else if diff < 0.0 {
            Cell::new(format!("lower in {}", ranking.positive)).fg(Color::Red)
        } else {
            Cell::new("none")
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&entry.feature),
            Cell::new(format!("{:.4}", diff.abs())).set_alignment(CellAlignment::Right),
            direction,
        ]);
    }
    table
}

fn format_mean_std(mean: Measure, std_dev: Measure) -> String {
    format!("{:.4} ± {:.4}", mean, std_dev)
}

fn format_signed(value: Measure) -> String {
    match value {
        Measure::Value(v) => format!("{:+.4}", v),
        Measure::InsufficientData => value.to_string(),
    }
}

fn new_table<T: ToString>(header: Vec<T>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .into_iter()
            .map(|h| Cell::new(h.to_string()).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn print_section(title: &str) {
    println!();
    println!("    {} {}", style("◆").cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
}

fn print_table(table: &Table) {
    // Indent the table
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}
