//! JSON snapshot store adapter.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::analysis::AnalysisSeries;
use crate::domain::error::PairswitchError;
use crate::ports::store_port::StorePort;

/// Persists the analysis series as a single JSON document.
pub struct JsonStoreAdapter;

impl StorePort for JsonStoreAdapter {
    fn load(&self, path: &str) -> Result<Option<AnalysisSeries>, PairswitchError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PairswitchError::Store {
                    reason: format!("failed to read {path}: {e}"),
                });
            }
        };
        let series = serde_json::from_str(&content).map_err(|e| PairswitchError::Store {
            reason: format!("failed to decode {path}: {e}"),
        })?;
        Ok(Some(series))
    }

    fn save(&self, path: &str, series: &AnalysisSeries) -> Result<(), PairswitchError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PairswitchError::Store {
                    reason: format!("failed to create {}: {e}", parent.display()),
                })?;
            }
        }
        let content = serde_json::to_string(series).map_err(|e| PairswitchError::Store {
            reason: format!("failed to encode snapshot: {e}"),
        })?;
        fs::write(path, content).map_err(|e| PairswitchError::Store {
            reason: format!("failed to write {path}: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::analyze;
    use crate::domain::record::DailyRecord;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_series() -> AnalysisSeries {
        let records = (1..=5)
            .map(|day| DailyRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                primary_open: 100.0,
                primary_close: 100.0 + day as f64,
                secondary_open: 90.0,
                secondary_close: 92.0,
                raw_dividend: if day == 3 { 3.61 } else { 0.0 },
            })
            .collect();
        analyze(records, &[3]).unwrap()
    }

    #[test]
    fn round_trip_preserves_the_series() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("analysis.json");
        let path = path.to_str().unwrap();

        let series = sample_series();
        let store = JsonStoreAdapter;
        store.save(path, &series).unwrap();

        let loaded = store.load(path).unwrap().unwrap();
        assert_eq!(loaded, series);
    }

    #[test]
    fn missing_snapshot_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let loaded = JsonStoreAdapter.load(path.to_str().unwrap()).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn corrupt_snapshot_is_a_store_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonStoreAdapter.load(path.to_str().unwrap()),
            Err(PairswitchError::Store { .. })
        ));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/analysis.json");
        let path = path.to_str().unwrap();
        JsonStoreAdapter.save(path, &sample_series()).unwrap();
        assert!(JsonStoreAdapter.load(path).unwrap().is_some());
    }
}
