/*
 * HASHEQ BENCH - RUN REPORT
 * =================================================================
 * Component Name: src/report/mod.rs
 * Core Responsibility: تجميع نتائج التشغيل مع بصمة الجهاز والإعدادات (Integration Pillar).
 * Design Pattern: DTO / Plain Table Rendering
 * =================================================================
 */

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::HarnessResult;
use crate::hardware::HostInfo;
use crate::harness::{BenchmarkResult, ProtocolConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub host: HostInfo,
    pub protocol: ProtocolConfig,
    pub results: Vec<BenchmarkResult>,
}

impl RunReport {
    pub fn new(
        started_at: DateTime<Utc>,
        host: HostInfo,
        protocol: ProtocolConfig,
        results: Vec<BenchmarkResult>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            finished_at: Utc::now(),
            host,
            protocol,
            results,
        }
    }

    /// جدول نصي: Benchmark | (size) | Cnt | Score | Error | Units
    pub fn render_table(&self) -> String {
        let name_width = self
            .results
            .iter()
            .map(|r| r.benchmark.to_string().len())
            .max()
            .unwrap_or(0)
            .max("Benchmark".len());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>6}  {:>4}  {:>12}    {:>10}  {}",
            "Benchmark", "(size)", "Cnt", "Score", "Error", "Units"
        );
        for r in &self.results {
            let size = r.size.map_or("N/A".to_string(), |s| s.to_string());
            let error = r
                .statistics
                .error
                .map_or("N/A".to_string(), |e| format!("{:.3}", e));
            let _ = writeln!(
                out,
                "{:<name_width$}  {:>6}  {:>4}  {:>12.3} ± {:>10}  {}",
                r.benchmark.to_string(),
                size,
                r.statistics.samples,
                r.statistics.mean,
                error,
                r.unit
            );
        }
        out
    }

    pub fn write_json(&self, path: &Path) -> HarnessResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("REPORT: Written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{BenchmarkId, Operation};
    use crate::harness::{Statistics, TimeUnit};
    use crate::models::Variant;

    fn sample_report() -> RunReport {
        let result = BenchmarkResult {
            benchmark: BenchmarkId::new(Variant::Plain, Operation::SetContainsHit),
            size: Some(100),
            unit: TimeUnit::Nanoseconds,
            statistics: Statistics::from_samples(&[10.0, 12.0]).unwrap(),
            forks: Vec::new(),
        };
        RunReport::new(Utc::now(), HostInfo::capture(), ProtocolConfig::default(), vec![result])
    }

    #[test]
    fn test_table_has_one_row_per_result() {
        let table = sample_report().render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("plain.setContainsHit"));
        assert!(lines[1].contains("100"));
        assert!(lines[1].ends_with("ns/op"));
    }

    #[test]
    fn test_json_written_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");
        let report = sample_report();
        report.write_json(&path).unwrap();

        let back: RunReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.run_id, report.run_id);
        assert_eq!(back.results, report.results);
    }
}
