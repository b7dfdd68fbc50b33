//! CLI command for exporting upcoming bills

use clap::Args;
use std::path::PathBuf;

use crate::clock::Clock;
use crate::config::settings::Settings;
use crate::error::PlannerResult;
use crate::export::{
    write_bill_export_json, write_bill_export_yaml, write_bill_instances_csv, BillExport, ExportFormat,
};
use crate::storage::{write_atomic, Storage};

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format: csv, json or yaml
    #[arg(short, long, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file; defaults to the planner's export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Days ahead to include
    #[arg(short, long)]
    pub days: Option<u32>,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    clock: &dyn Clock,
    args: ExportArgs,
) -> PlannerResult<()> {
    let today = clock.today();
    let state = storage.load(today)?;
    let days = args.days.unwrap_or(settings.export_horizon_days);
    let export = BillExport::from_state(&state, today, days);

    let output = args.output.unwrap_or_else(|| {
        storage
            .paths()
            .export_dir()
            .join(format!("bills-{}.{}", today.format("%Y-%m-%d"), args.format.extension()))
    });

    write_atomic(&output, |writer| match args.format {
        ExportFormat::Csv => write_bill_instances_csv(&export.bills, writer),
        ExportFormat::Json => write_bill_export_json(&export, writer),
        ExportFormat::Yaml => write_bill_export_yaml(&export, writer),
    })?;

    println!(
        "Exported {} bill(s) from {} to {} as {} to: {}",
        export.bills.len(),
        export.window_start,
        export.window_end,
        args.format,
        output.display()
    );
    Ok(())
}
