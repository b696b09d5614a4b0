/*
 * HASHEQ BENCH - PROCESS FORK REPLICATION
 * =================================================================
 * Component Name: src/harness/fork.rs
 * Core Responsibility: تشغيل كل نسخة قياس داخل عملية نظام مستقلة (Isolation Pillar).
 * Design Pattern: Self Re-exec / Line-Delimited JSON Wire
 * Forensic Impact: لا تسرب لحالة الذاكرة المخبأة أو المخصص (Allocator) بين النسخ. كل عملية تبني الـ fixture الخاص بها.
 * =================================================================
 */

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::iteration::CycleSamples;
use super::ProtocolConfig;
use crate::catalogue::{measure_benchmark, BenchmarkId};
use crate::error::{HarnessError, HarnessResult};
use crate::hardware;

/// الوسيط الذي يحول الملف التنفيذي إلى عملية فرعية
pub const FORK_TASK_FLAG: &str = "--fork-task";

/// بادئة سطر النتيجة على stdout (السجلات تذهب إلى stderr)
pub const RESULT_MARKER: &str = "HASHEQ_FORK_RESULT ";

const POLL_INTERVAL: Duration = Duration::from_millis(20);

// =================================================================
// الرسائل (Wire Messages)
// =================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForkTask {
    pub benchmark: BenchmarkId,
    pub size: Option<usize>,
    pub fork_index: u32,
    pub protocol: ProtocolConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForkOutcome {
    pub fork_index: u32,
    pub pid: u32,
    pub samples: CycleSamples,
}

impl ForkOutcome {
    /// عينة قياس بلا استدعاءات = نتيجة فاسدة، لا صفر.
    pub fn measurement_ns_per_op(&self) -> HarnessResult<Vec<f64>> {
        self.samples
            .measurement
            .iter()
            .enumerate()
            .map(|(i, s)| {
                s.ns_per_op().ok_or_else(|| {
                    HarnessError::ForkFailed(format!(
                        "fork #{} measurement iteration {} ran 0 invocations",
                        self.fork_index + 1,
                        i + 1
                    ))
                })
            })
            .collect()
    }

    /// السطر الذي تكتبه العملية الفرعية على stdout
    pub fn to_wire_line(&self) -> HarnessResult<String> {
        Ok(format!("{}{}", RESULT_MARKER, serde_json::to_string(self)?))
    }

    pub fn from_wire_output(stdout: &str) -> HarnessResult<Self> {
        let payload = stdout
            .lines()
            .find_map(|line| line.strip_prefix(RESULT_MARKER))
            .ok_or_else(|| HarnessError::ForkFailed("child produced no result line".into()))?;
        Ok(serde_json::from_str(payload)?)
    }
}

// =================================================================
// جانب العملية الفرعية (Child Side)
// =================================================================

/// تنفيذ مهمة النسخة داخل العملية الحالية: تثبيت النواة (اختياري)، إعداد، إحماء، قياس.
pub fn execute_fork_task(task: &ForkTask) -> HarnessResult<ForkOutcome> {
    task.protocol.validate()?;

    if let Some(core) = task.protocol.pin_core {
        match hardware::apply_affinity(core) {
            Ok(()) => debug!("FORK: Measuring thread pinned to core {}", core),
            Err(e) => warn!("FORK: Failed to apply CPU affinity: {}. Running unpinned.", e),
        }
    }

    let samples = measure_benchmark(task.benchmark, task.size, &task.protocol)?;

    Ok(ForkOutcome {
        fork_index: task.fork_index,
        pid: std::process::id(),
        samples,
    })
}

// =================================================================
// جانب العملية الأم (Parent Side)
// =================================================================

#[derive(Debug, Clone)]
pub struct ForkLauncher {
    program: PathBuf,
}

impl ForkLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// إعادة تشغيل الملف التنفيذي الحالي
    pub fn current_exe() -> HarnessResult<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// تشغيل عملية فرعية وانتظارها حتى `timeout`. تجاوز الحد = قتل العملية.
    pub fn launch(&self, task: &ForkTask, timeout: Duration) -> HarnessResult<ForkOutcome> {
        let payload = serde_json::to_string(task)?;

        let mut child = Command::new(&self.program)
            .arg(FORK_TASK_FLAG)
            .arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                HarnessError::ForkFailed(format!("spawn {:?}: {}", self.program, e))
            })?;

        info!(
            "FORK: #{} of {} started (pid={})",
            task.fork_index + 1,
            task.benchmark,
            child.id()
        );

        // قراءة stdout في خيط منفصل حتى لا يمتلئ الأنبوب أثناء الانتظار
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| HarnessError::ForkFailed("child stdout not captured".into()))?;
        let reader = thread::spawn(move || {
            let mut buf = String::new();
            stdout.read_to_string(&mut buf).map(|_| buf)
        });

        let started = Instant::now();
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= timeout {
                error!(
                    "FORK: {} exceeded {:?}, killing pid={}",
                    task.benchmark,
                    timeout,
                    child.id()
                );
                let _ = child.kill();
                let _ = child.wait();
                return Err(HarnessError::ForkFailed(format!(
                    "{} timed out after {:?}",
                    task.benchmark, timeout
                )));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let output = reader
            .join()
            .map_err(|_| HarnessError::ForkFailed("stdout reader panicked".into()))??;

        if !status.success() {
            return Err(HarnessError::ForkFailed(format!(
                "{} exited with {}",
                task.benchmark, status
            )));
        }

        ForkOutcome::from_wire_output(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::IterationSample;

    #[test]
    fn test_wire_line_round_trip_ignores_noise() {
        let outcome = ForkOutcome {
            fork_index: 1,
            pid: 42,
            samples: CycleSamples {
                warmup: vec![IterationSample { invocations: 10, elapsed_ns: 100 }],
                measurement: vec![IterationSample { invocations: 20, elapsed_ns: 100 }],
            },
        };
        let stdout = format!("some banner\n{}\n", outcome.to_wire_line().unwrap());
        assert_eq!(ForkOutcome::from_wire_output(&stdout).unwrap(), outcome);
    }

    #[test]
    fn test_zero_invocation_sample_is_an_error() {
        let outcome = ForkOutcome {
            fork_index: 0,
            pid: 42,
            samples: CycleSamples {
                warmup: Vec::new(),
                measurement: vec![
                    IterationSample { invocations: 8, elapsed_ns: 80 },
                    IterationSample { invocations: 0, elapsed_ns: 1_000_021 },
                ],
            },
        };
        assert!(matches!(outcome.measurement_ns_per_op(), Err(HarnessError::ForkFailed(_))));
    }

    #[test]
    fn test_fork_task_rejects_degenerate_protocol() {
        let task = ForkTask {
            benchmark: "plain.hashCode".parse().unwrap(),
            size: None,
            fork_index: 0,
            protocol: ProtocolConfig {
                batch_size: 0,
                measurement_iterations: 2,
                measurement_time_ms: 1,
                ..ProtocolConfig::default()
            },
        };
        assert!(matches!(execute_fork_task(&task), Err(HarnessError::ConfigInvalid(_))));
    }

    #[test]
    fn test_missing_result_line() {
        let result = ForkOutcome::from_wire_output("nothing here\n");
        assert!(matches!(result, Err(HarnessError::ForkFailed(_))));
    }

    #[test]
    fn test_launch_reports_spawn_failure() {
        let launcher = ForkLauncher::new("/nonexistent/hasheq_core");
        let task = ForkTask {
            benchmark: "plain.hashCode".parse().unwrap(),
            size: None,
            fork_index: 0,
            protocol: ProtocolConfig::default(),
        };
        let result = launcher.launch(&task, Duration::from_secs(1));
        assert!(matches!(result, Err(HarnessError::ForkFailed(_))));
    }
}
