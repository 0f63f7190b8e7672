// src/io/reporting.rs

use crate::analysis::anomaly::AnomalyVerdict;
use crate::analysis::restock::RestockRecommendation;
use crate::error::EoqResult;
use crate::model::cost::{CostCurve, EoqSummary};
use crate::simulation::engine::HistoryRecord;
use crate::strategy::traits::ForecastPoint;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Serializes rows to a CSV file with a header line.
fn write_rows<T: Serialize>(file_path: &Path, rows: &[T]) -> EoqResult<()> {
    let mut wtr = csv::Writer::from_path(file_path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    // Flush so every row is on disk before we report success
    wtr.flush()?;

    info!(rows = rows.len(), path = %file_path.display(), "exported CSV");
    Ok(())
}

pub fn write_cost_curve(file_path: &Path, curve: &CostCurve) -> EoqResult<()> {
    write_rows(file_path, &curve.points)
}

pub fn write_forecast(file_path: &Path, points: &[ForecastPoint]) -> EoqResult<()> {
    write_rows(file_path, points)
}

pub fn write_simulation_log(file_path: &Path, data: &[HistoryRecord]) -> EoqResult<()> {
    write_rows(file_path, data)
}

pub fn write_anomalies(file_path: &Path, verdicts: &[AnomalyVerdict]) -> EoqResult<()> {
    write_rows(file_path, verdicts)
}

pub fn write_restock_plan(file_path: &Path, plan: &[RestockRecommendation]) -> EoqResult<()> {
    write_rows(file_path, plan)
}

/// Console table of the curve with the optimum marked.
pub fn print_cost_curve_summary(curve: &CostCurve, closed_form: Option<&EoqSummary>) {
    println!("{:>10} {:>12} {:>12} {:>12}", "Qty", "Holding", "Ordering", "Total");
    for point in &curve.points {
        let marker = if point == &curve.optimal { " <- optimal" } else { "" };
        println!(
            "{:>10.1} {:>12.2} {:>12.2} {:>12.2}{}",
            point.order_quantity, point.holding_cost, point.ordering_cost, point.total_cost, marker
        );
    }

    println!(
        "\nSampled optimum: {:.1} units at ${:.2}/year",
        curve.optimal.order_quantity, curve.optimal.total_cost
    );
    if let Some(eoq) = closed_form {
        println!(
            "Closed-form EOQ: {:.2} units at ${:.2}/year ({:.2} orders/year, every {:.1} days)",
            eoq.quantity, eoq.total_cost, eoq.orders_per_year, eoq.cycle_days
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::curve::generate_cost_curve;
    use crate::model::cost::{EoqParameters, SweepRange};

    #[test]
    fn test_write_cost_curve_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        let curve = generate_cost_curve(&EoqParameters::default(), &SweepRange::default()).unwrap();

        write_cost_curve(&path, &curve).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("order_quantity,holding_cost,ordering_cost,total_cost")
        );
        assert_eq!(lines.next(), Some("50.0,30.0,4500.0,4530.0"));
        assert_eq!(content.lines().count(), 32);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("log.csv");
        assert!(write_simulation_log(&path, &[]).is_err());
    }
}
