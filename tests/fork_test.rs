/*
 * HASHEQ BENCH - PROCESS FORK ROUND-TRIP
 * =================================================================
 * Component Name: tests/fork_test.rs
 * Core Responsibility: تشغيل النسخ عبر الملف التنفيذي الحقيقي والتحقق من بروتوكول السطر الواحد.
 * Design Pattern: Black Box Testing (Real Child Processes)
 * Forensic Impact: يثبت أن كل نسخة تعمل في عملية مستقلة فعلاً (PID مختلف) وأن العينات تعبر الحدود سليمة.
 * =================================================================
 */

use std::process::Command;
use std::time::{Duration, Instant};

use hasheq_bench::harness::fork::{FORK_TASK_FLAG, RESULT_MARKER};
use hasheq_bench::harness::{ForkLauncher, ForkMode, ForkOutcome, ForkTask};
use hasheq_bench::{BenchmarkId, Harness, HarnessError, Operation, ProtocolConfig, Variant};

const BIN: &str = env!("CARGO_BIN_EXE_hasheq_core");

fn tiny_process_protocol() -> ProtocolConfig {
    ProtocolConfig {
        warmup_iterations: 1,
        warmup_time_ms: 1,
        measurement_iterations: 2,
        measurement_time_ms: 2,
        forks: 2,
        fork_mode: ForkMode::Process,
        batch_size: 8,
        fork_timeout_secs: Some(60),
        ..ProtocolConfig::default()
    }
}

#[test]
fn test_each_fork_runs_in_its_own_process() {
    let harness = Harness::with_launcher(tiny_process_protocol(), ForkLauncher::new(BIN)).unwrap();
    let id = BenchmarkId::new(Variant::Record, Operation::SetContainsHit);

    let result = harness.run_benchmark(id, Some(100)).unwrap();

    assert_eq!(result.forks.len(), 2);
    assert_eq!(result.statistics.samples, 2 * 2);
    let parent_pid = std::process::id();
    assert!(result.forks.iter().all(|f| f.pid != parent_pid));
    assert_ne!(result.forks[0].pid, result.forks[1].pid);
    assert_eq!(result.forks[0].fork_index, 0);
    assert_eq!(result.forks[1].fork_index, 1);
}

#[test]
fn test_child_writes_single_result_line() {
    let task = ForkTask {
        benchmark: BenchmarkId::new(Variant::Plain, Operation::EqualsTrue),
        size: None,
        fork_index: 0,
        protocol: tiny_process_protocol(),
    };
    let output = Command::new(BIN)
        .arg(FORK_TASK_FLAG)
        .arg(serde_json::to_string(&task).unwrap())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with(RESULT_MARKER));

    let outcome = ForkOutcome::from_wire_output(&stdout).unwrap();
    assert_eq!(outcome.samples.warmup.len(), 1);
    assert_eq!(outcome.samples.measurement.len(), 2);
}

#[test]
fn test_child_failure_is_reported_as_fork_failure() {
    let launcher = ForkLauncher::new(BIN);
    let task = ForkTask {
        benchmark: BenchmarkId::new(Variant::Builder, Operation::MapGetMiss),
        size: Some(0),
        fork_index: 0,
        protocol: tiny_process_protocol(),
    };

    let result = launcher.launch(&task, Duration::from_secs(60));
    assert!(matches!(result, Err(HarnessError::ForkFailed(_))));
}

#[test]
fn test_overrunning_fork_is_killed() {
    let launcher = ForkLauncher::new(BIN);
    let task = ForkTask {
        benchmark: BenchmarkId::new(Variant::Plain, Operation::HashCode),
        size: None,
        fork_index: 0,
        protocol: ProtocolConfig {
            warmup_iterations: 1,
            warmup_time_ms: 60_000,
            ..tiny_process_protocol()
        },
    };

    let started = Instant::now();
    let result = launcher.launch(&task, Duration::from_millis(200));

    match result {
        Err(HarnessError::ForkFailed(reason)) => assert!(reason.contains("timed out"), "{}", reason),
        other => panic!("expected a timeout failure, got {:?}", other),
    }
    // لم ننتظر دقيقة الإحماء كاملة
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[test]
fn test_malformed_task_exits_non_zero() {
    let output = Command::new(BIN)
        .arg(FORK_TASK_FLAG)
        .arg("{not json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains(RESULT_MARKER));
}
