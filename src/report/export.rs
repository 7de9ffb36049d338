use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::report::trend::TrendPoint;

/// Write a calorie series to a CSV file, one row per date.
pub fn write_trend_csv(points: &[TrendPoint], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["date", "total_calories"])?;
    for point in points {
        wtr.write_record([
            point.date.format("%Y-%m-%d").to_string(),
            format!("{:.1}", point.total_calories),
        ])?;
    }

    wtr.flush()?;
    info!(path = %path.display(), rows = points.len(), "trend exported");
    Ok(())
}
