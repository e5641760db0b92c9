//! Terminal views of a scan report

pub mod error;
pub mod output;

use self::error::HelpfulError;
use self::output::{or_dash, print_table, ColoredCell};
use clap::ValueEnum;
use comfy_table::Color;
use docscout::config::config_base_dir;
use docscout::{DocscoutConfig, ScanReport, Scanner, ScoutError};
use std::path::PathBuf;

/// Which part of the report to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// One line per document with its file count
    Overview,
    /// Every document with each attached file
    Details,
    /// Project files that matched no document
    Orphans,
}

#[derive(Debug)]
pub struct RunArgs {
    pub config: PathBuf,
    pub view: View,
    pub json: bool,
    pub show_warnings: bool,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    if !args.config.is_file() {
        return Err(HelpfulError::config_not_found(&args.config).into());
    }

    let helpful = |e: ScoutError| HelpfulError::from_scan_error(&e);
    let config = DocscoutConfig::load(&args.config).map_err(helpful)?;
    let base_dir = config_base_dir(&args.config).map_err(helpful)?;
    let scanner = Scanner::new(config.scan_options(&base_dir)).map_err(helpful)?;
    let report = scanner.scan().map_err(helpful)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_header(&report);
    match args.view {
        View::Overview => print_table(&["Nr", "Rev", "Title", "Files"], overview_rows(&report)),
        View::Details => {
            print_table(&["Nr", "Title", "File", "Rev", "Comment"], detail_rows(&report))
        }
        View::Orphans => print_table(&["File"], orphan_rows(&report)),
    }

    if !report.warnings.is_empty() {
        println!();
        if args.show_warnings {
            for warning in &report.warnings {
                println!("WARNING: {}", warning);
            }
        } else {
            println!("{} warnings (use --warnings to list them)", report.warnings.len());
        }
    }

    Ok(())
}

fn print_header(report: &ScanReport) {
    let project = report.catalog.project();
    println!("{} {}", or_dash(&project.number), project.title);
    println!(
        "{} documents, {} files attached, {} orphans in {}",
        report.catalog.len(),
        report.catalog.attached_file_count(),
        report.catalog.orphan_files().len(),
        report.root_dir.display()
    );
    println!();
}

fn overview_rows(report: &ScanReport) -> Vec<Vec<ColoredCell>> {
    report
        .catalog
        .docs()
        .map(|doc| {
            let count_color = if doc.files.is_empty() { Color::Red } else { Color::Green };
            vec![
                (doc.nr.clone(), None),
                (or_dash(&doc.rev), None),
                (doc.title.clone(), None),
                (doc.files.len().to_string(), Some(count_color)),
            ]
        })
        .collect()
}

fn detail_rows(report: &ScanReport) -> Vec<Vec<ColoredCell>> {
    let mut rows = Vec::new();
    for doc in report.catalog.docs() {
        if doc.files.is_empty() {
            rows.push(vec![
                (doc.nr.clone(), None),
                (doc.title.clone(), None),
                ("(no files)".to_string(), Some(Color::Red)),
                ("-".to_string(), None),
                ("-".to_string(), None),
            ]);
            continue;
        }
        for file in &doc.files {
            let comment_color = (!file.comment.is_empty()).then_some(Color::Yellow);
            rows.push(vec![
                (doc.nr.clone(), None),
                (doc.title.clone(), None),
                (file.rel_path.display().to_string(), Some(Color::Grey)),
                (or_dash(&file.rev), None),
                (or_dash(&file.comment), comment_color),
            ]);
        }
    }
    rows
}

fn orphan_rows(report: &ScanReport) -> Vec<Vec<ColoredCell>> {
    report
        .catalog
        .orphan_files()
        .iter()
        .map(|file| vec![(file.rel_path.display().to_string(), Some(Color::Yellow))])
        .collect()
}
