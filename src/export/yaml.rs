//! YAML export
//!
//! Same document as the JSON export, with a comment header for people
//! reading it.

use std::io::Write;

use super::json::BillExport;
use crate::error::{PlannerError, PlannerResult};

pub fn write_bill_export_yaml<W: Write>(export: &BillExport, mut writer: W) -> PlannerResult<()> {
    let export_err = |e: std::io::Error| PlannerError::Export(e.to_string());

    writeln!(writer, "# Bill planner export").map_err(export_err)?;
    writeln!(
        writer,
        "# Window: {} to {}",
        export.window_start, export.window_end
    )
    .map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, export).map_err(|e| PlannerError::Export(e.to_string()))
}
