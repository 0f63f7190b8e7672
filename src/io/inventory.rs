// src/io/inventory.rs

use crate::analysis::anomaly::StockMovement;
use crate::analysis::restock::SkuStatus;
use crate::error::EoqResult;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads every row of a headed CSV file.
fn read_rows<T: DeserializeOwned>(file_path: &Path) -> EoqResult<Vec<T>> {
    let mut rdr = csv::Reader::from_path(file_path)?;
    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// Columns: `label,stock_change`.
pub fn read_stock_movements(file_path: &Path) -> EoqResult<Vec<StockMovement>> {
    read_rows(file_path)
}

/// Columns: `sku,on_hand,reorder_point,eoq`.
pub fn read_sku_status(file_path: &Path) -> EoqResult<Vec<SkuStatus>> {
    read_rows(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::anomaly::detect_anomalies;
    use crate::analysis::restock::recommend_restock;
    use crate::error::EoqError;

    #[test]
    fn test_read_stock_movements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moves.csv");
        std::fs::write(&path, "label,stock_change\n2025-08-01,-40\n2025-08-06,200\n").unwrap();

        let moves = read_stock_movements(&path).unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(moves[1].label, "2025-08-06");
        assert_eq!(moves[1].stock_change, 200.0);
    }

    #[test]
    fn test_read_sku_status_rejects_bad_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skus.csv");
        std::fs::write(&path, "sku,on_hand,reorder_point,eoq\nSKU-1,ten,5,20\n").unwrap();
        assert!(read_sku_status(&path).is_err());
    }

    #[test]
    fn test_non_finite_csv_values_are_rejected_downstream() {
        let dir = tempfile::tempdir().unwrap();

        let moves_path = dir.path().join("moves.csv");
        std::fs::write(&moves_path, "label,stock_change\nd1,-40\nd2,-400\nd3,NaN\n").unwrap();
        let moves = read_stock_movements(&moves_path).unwrap();
        assert!(moves[2].stock_change.is_nan());
        assert!(matches!(
            detect_anomalies(&moves, 1.0),
            Err(EoqError::InvalidParameter { name: "stock_change", .. })
        ));

        let skus_path = dir.path().join("skus.csv");
        std::fs::write(&skus_path, "sku,on_hand,reorder_point,eoq\nSKU-1,inf,100,20\n").unwrap();
        let skus = read_sku_status(&skus_path).unwrap();
        assert!(matches!(
            recommend_restock(&skus),
            Err(EoqError::InvalidParameter { name: "on_hand", .. })
        ));
    }
}
