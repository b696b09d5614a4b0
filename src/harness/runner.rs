/*
 * HASHEQ BENCH - SWEEP RUNNER
 * =================================================================
 * Component Name: src/harness/runner.rs
 * Core Responsibility: المسح على قيم الحجم المعلنة وتجميع النسخ في نتيجة لكل (حجم، عملية، متغير).
 * Design Pattern: Explicit Outer Loop / Per-Configuration Aggregation
 * Forensic Impact: نتائج الأحجام المختلفة لا تُدمج أبداً. كل حجم له fixture وإحصائيات مستقلة.
 * =================================================================
 */

use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::fork::{execute_fork_task, ForkLauncher, ForkOutcome, ForkTask};
use super::stats::Statistics;
use super::{ForkMode, ProtocolConfig, TimeUnit};
use crate::catalogue::{catalogue, BenchmarkId};
use crate::error::{HarnessError, HarnessResult};
use crate::fixture::validate_size;

// =================================================================
// خطة المسح (Sweep Plan)
// =================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SweepPlan {
    pub benchmarks: Vec<BenchmarkId>,
    pub sizes: Vec<usize>,
}

impl SweepPlan {
    /// `include` فارغ = كل الكتالوج. نمط لا يطابق شيئاً = خطأ.
    pub fn new(include: &[String], sizes: &[usize]) -> HarnessResult<Self> {
        let mut benchmarks = catalogue();
        if !include.is_empty() {
            for pattern in include {
                if !benchmarks.iter().any(|id| id.matches(pattern)) {
                    return Err(HarnessError::UnknownBenchmark(pattern.clone()));
                }
            }
            benchmarks.retain(|id| include.iter().any(|p| id.matches(p)));
        }

        let mut declared = Vec::with_capacity(sizes.len());
        for &size in sizes {
            validate_size(size)?;
            if !declared.contains(&size) {
                declared.push(size);
            }
        }

        let needs_sizes = benchmarks.iter().any(|id| id.operation.is_parameterized());
        if needs_sizes && declared.is_empty() {
            return Err(HarnessError::ConfigInvalid(
                "collection benchmarks selected but no sizes declared".into(),
            ));
        }

        Ok(Self {
            benchmarks,
            sizes: declared,
        })
    }

    /// تسلسل التشغيل: العمليات غير المرتبطة بالحجم مرة واحدة، ثم كل حجم على حدة.
    pub fn configurations(&self) -> Vec<(BenchmarkId, Option<usize>)> {
        let mut runs: Vec<(BenchmarkId, Option<usize>)> = self
            .benchmarks
            .iter()
            .filter(|id| !id.operation.is_parameterized())
            .map(|id| (*id, None))
            .collect();

        for &size in &self.sizes {
            runs.extend(
                self.benchmarks
                    .iter()
                    .filter(|id| id.operation.is_parameterized())
                    .map(|id| (*id, Some(size))),
            );
        }
        runs
    }
}

// =================================================================
// النتيجة (Result Row)
// =================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub benchmark: BenchmarkId,
    pub size: Option<usize>,
    pub unit: TimeUnit,
    /// بالوحدة `unit`
    pub statistics: Statistics,
    pub forks: Vec<ForkOutcome>,
}

impl BenchmarkResult {
    pub fn aggregate(
        benchmark: BenchmarkId,
        size: Option<usize>,
        unit: TimeUnit,
        forks: Vec<ForkOutcome>,
    ) -> HarnessResult<Self> {
        let mut samples = Vec::new();
        for fork in &forks {
            samples.extend(fork.measurement_ns_per_op()?);
        }
        let statistics = Statistics::from_samples(&samples).ok_or_else(|| {
            HarnessError::ForkFailed(format!("{} produced no measurement samples", benchmark))
        })?;

        Ok(Self {
            benchmark,
            size,
            unit,
            statistics: statistics.in_unit(unit),
            forks,
        })
    }
}

// =================================================================
// المشغل (Harness)
// =================================================================

pub struct Harness {
    protocol: ProtocolConfig,
    launcher: Option<ForkLauncher>,
}

impl Harness {
    /// في وضع `process` يعاد تشغيل الملف التنفيذي الحالي لكل نسخة.
    pub fn new(protocol: ProtocolConfig) -> HarnessResult<Self> {
        protocol.validate()?;
        let launcher = match protocol.fork_mode {
            ForkMode::Process => Some(ForkLauncher::current_exe()?),
            ForkMode::InProcess => None,
        };
        Ok(Self { protocol, launcher })
    }

    pub fn with_launcher(protocol: ProtocolConfig, launcher: ForkLauncher) -> HarnessResult<Self> {
        protocol.validate()?;
        Ok(Self {
            protocol,
            launcher: Some(launcher),
        })
    }

    pub fn protocol(&self) -> &ProtocolConfig {
        &self.protocol
    }

    /// دورة كاملة × عدد النسخ لتكوين واحد
    pub fn run_benchmark(
        &self,
        benchmark: BenchmarkId,
        size: Option<usize>,
    ) -> HarnessResult<BenchmarkResult> {
        let mut forks = Vec::with_capacity(self.protocol.forks as usize);

        for fork_index in 0..self.protocol.forks {
            let task = ForkTask {
                benchmark,
                size,
                fork_index,
                protocol: self.protocol.clone(),
            };

            let outcome = match (self.protocol.fork_mode, &self.launcher) {
                (ForkMode::Process, Some(launcher)) => {
                    launcher.launch(&task, self.protocol.fork_timeout())?
                }
                (ForkMode::Process, None) => {
                    return Err(HarnessError::ForkFailed("no fork launcher configured".into()))
                }
                (ForkMode::InProcess, _) => {
                    if fork_index > 0 && self.protocol.cooldown_ms > 0 {
                        thread::sleep(self.protocol.cooldown());
                    }
                    execute_fork_task(&task)?
                }
            };
            forks.push(outcome);
        }

        let result = BenchmarkResult::aggregate(benchmark, size, self.protocol.time_unit, forks)?;
        info!(
            "RESULT: {} size={:?} -> {:.3} ± {:.3} {}",
            benchmark,
            size,
            result.statistics.mean,
            result.statistics.error.unwrap_or(f64::NAN),
            result.unit
        );
        Ok(result)
    }

    /// المسح الكامل. أول خطأ قاتل يوقف المسح (لا إعادة محاولة).
    pub fn sweep(&self, plan: &SweepPlan) -> HarnessResult<Vec<BenchmarkResult>> {
        let runs = plan.configurations();
        info!(
            "SWEEP: {} configurations ({} benchmarks, sizes {:?}, {} forks each)",
            runs.len(),
            plan.benchmarks.len(),
            plan.sizes,
            self.protocol.forks
        );
        if self.protocol.fork_mode == ForkMode::InProcess {
            warn!("SWEEP: In-process replicates share allocator and cache state.");
        }

        runs.into_iter()
            .map(|(benchmark, size)| self.run_benchmark(benchmark, size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::Operation;
    use crate::harness::{CycleSamples, IterationSample};
    use crate::models::Variant;

    fn outcome(fork_index: u32, ns: &[u64]) -> ForkOutcome {
        ForkOutcome {
            fork_index,
            pid: 1,
            samples: CycleSamples {
                warmup: vec![IterationSample { invocations: 1, elapsed_ns: 1_000_000 }],
                measurement: ns
                    .iter()
                    .map(|&elapsed_ns| IterationSample { invocations: 1, elapsed_ns })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_aggregate_pools_forks_and_drops_warmup() {
        let id = BenchmarkId::new(Variant::Plain, Operation::HashCode);
        let result = BenchmarkResult::aggregate(
            id,
            None,
            TimeUnit::Nanoseconds,
            vec![outcome(0, &[10, 20]), outcome(1, &[30, 40])],
        )
        .unwrap();
        assert_eq!(result.statistics.samples, 4);
        assert!((result.statistics.mean - 25.0).abs() < 1e-9);
        assert_eq!(result.statistics.max, 40.0);
    }

    #[test]
    fn test_aggregate_rejects_empty_iteration() {
        let id = BenchmarkId::new(Variant::Derived, Operation::EqualsTrue);
        let mut starved = outcome(0, &[10, 20]);
        starved.samples.measurement[1].invocations = 0;
        let result = BenchmarkResult::aggregate(id, None, TimeUnit::Nanoseconds, vec![starved]);
        assert!(matches!(result, Err(HarnessError::ForkFailed(_))));
    }

    #[test]
    fn test_plan_filters_and_dedups() {
        let plan = SweepPlan::new(&["plain.set".to_string()], &[100, 100, 1_000]).unwrap();
        assert_eq!(plan.benchmarks.len(), 2);
        assert_eq!(plan.sizes, vec![100, 1_000]);
        assert_eq!(plan.configurations().len(), 4);
    }

    #[test]
    fn test_plan_rejects_unknown_pattern_and_zero_size() {
        assert!(SweepPlan::new(&["lombok".to_string()], &[100]).is_err());
        assert!(SweepPlan::new(&[], &[0]).is_err());
        assert!(SweepPlan::new(&[], &[]).is_err());
        // مقاييس المساواة فقط لا تحتاج أحجاماً
        assert!(SweepPlan::new(&["equals".to_string()], &[]).is_ok());
    }
}
