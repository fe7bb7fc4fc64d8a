//! Month image export.
//!
//! Rasterising is done by an [`ImageRenderer`] supplied by the host. The
//! planner's part is freezing the grid into an owned [`ExportSnapshot`],
//! naming the file, and reporting a failure once.

use std::time::Duration;

use chrono::NaiveDate;

use crate::constants::EXPORT_FAILURE_NOTICE;
use crate::dates::CalendarMonth;
use crate::entry::ClassEntry;
use crate::error::{PlannerError, PlannerResult};
use crate::grid::{MonthGrid, SpanPosition};
use crate::student::Student;

/// How the renderer should rasterise the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: u32,
    pub background: String,
    pub settle_delay: Duration,
}

impl Default for ExportOptions {
    fn default() -> Self {
        crate::config::PlannerConfig::default().export_options()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub entry: ClassEntry,
    pub span: Option<SpanPosition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDay {
    pub date: NaiveDate,
    pub entries: Vec<SnapshotEntry>,
    pub highlighted: bool,
}

/// Owned copy of everything a renderer needs to draw one month.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSnapshot {
    pub planner_name: String,
    pub planner_icon: String,
    /// "Master" or the selected student's name.
    pub view_label: String,
    pub month: CalendarMonth,
    pub leading_blanks: u32,
    pub rows: u32,
    pub days: Vec<SnapshotDay>,
    /// Roster at capture time, for resolving session colours and names.
    pub students: Vec<Student>,
}

impl ExportSnapshot {
    pub fn capture(
        grid: &MonthGrid<'_>,
        planner_name: &str,
        planner_icon: &str,
        students: &[Student],
    ) -> Self {
        let days = grid
            .cells
            .iter()
            .map(|cell| SnapshotDay {
                date: cell.date,
                entries: cell
                    .entries
                    .iter()
                    .map(|placed| SnapshotEntry {
                        entry: placed.entry.clone(),
                        span: placed.span,
                    })
                    .collect(),
                highlighted: cell.highlighted,
            })
            .collect();

        ExportSnapshot {
            planner_name: planner_name.to_string(),
            planner_icon: planner_icon.to_string(),
            view_label: grid.view.label(students).to_string(),
            month: grid.month,
            leading_blanks: grid.leading_blanks,
            rows: grid.rows(),
            days,
            students: students.to_vec(),
        }
    }

    /// `{planner}_{Master|student}_{Month}_{Year}.png`
    pub fn file_name(&self) -> String {
        export_file_name(&self.planner_name, &self.view_label, self.month)
    }
}

pub fn export_file_name(planner_name: &str, view_label: &str, month: CalendarMonth) -> String {
    format!(
        "{}_{}_{}_{}.png",
        planner_name,
        view_label,
        month.name(),
        month.year()
    )
}

pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Turns a snapshot into PNG bytes.
#[allow(async_fn_in_trait)]
pub trait ImageRenderer {
    async fn render_png(
        &self,
        snapshot: &ExportSnapshot,
        options: &ExportOptions,
    ) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// Render `snapshot` after the settle delay. Failures are logged once and
/// returned as [`PlannerError::Export`]; there is no retry.
pub async fn export_month<R: ImageRenderer>(
    renderer: &R,
    snapshot: &ExportSnapshot,
    options: &ExportOptions,
) -> PlannerResult<ExportedImage> {
    if !options.settle_delay.is_zero() {
        tokio::time::sleep(options.settle_delay).await;
    }

    let file_name = snapshot.file_name();
    match renderer.render_png(snapshot, options).await {
        Ok(png) => {
            log::info!("Exported {} ({} bytes)", file_name, png.len());
            Ok(ExportedImage { file_name, png })
        }
        Err(e) => {
            log::error!("Error exporting image {}: {}", file_name, e);
            Err(PlannerError::Export(EXPORT_FAILURE_NOTICE.to_string()))
        }
    }
}
