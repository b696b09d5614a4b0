/*
 * HASHEQ BENCH - MEASUREMENT PROTOCOL
 * =================================================================
 * Component Name: src/harness/mod.rs
 * Core Responsibility: عقد القياس: الإحماء، التكرارات، التكرار عبر العمليات المعزولة، وتوحيد وحدة الزمن (Measurement Pillar).
 * Design Pattern: Protocol Object / Process Isolation
 * Forensic Impact: كل رقم في التقرير يمكن إعادة إنتاجه من هذه الإعدادات وحدها.
 * =================================================================
 */

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, HarnessResult};

pub mod fork;
pub mod iteration;
pub mod runner;
pub mod stats;

pub use fork::{execute_fork_task, ForkLauncher, ForkOutcome, ForkTask};
pub use iteration::{run_cycle, run_iteration, CycleSamples, IterationSample};
pub use runner::{BenchmarkResult, Harness, SweepPlan};
pub use stats::Statistics;

// =================================================================
// وحدة الزمن (Time Unit Normalization)
// =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
}

impl TimeUnit {
    /// تحويل قيمة بالنانوثانية إلى هذه الوحدة
    pub fn from_nanos(&self, nanos: f64) -> f64 {
        match self {
            TimeUnit::Nanoseconds => nanos,
            TimeUnit::Microseconds => nanos / 1_000.0,
            TimeUnit::Milliseconds => nanos / 1_000_000.0,
            TimeUnit::Seconds => nanos / 1_000_000_000.0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "ns/op",
            TimeUnit::Microseconds => "us/op",
            TimeUnit::Milliseconds => "ms/op",
            TimeUnit::Seconds => "s/op",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// طريقة عزل النسخ المكررة (Replicates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForkMode {
    /// كل نسخة في عملية مستقلة من نفس الملف التنفيذي
    #[default]
    Process,
    /// نفس العملية، fixture جديد وفترة تبريد بين النسخ
    InProcess,
}

// =================================================================
// إعدادات البروتوكول (Protocol Settings)
// =================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub warmup_iterations: u32,
    pub warmup_time_ms: u64,
    pub measurement_iterations: u32,
    pub measurement_time_ms: u64,
    pub forks: u32,
    pub fork_mode: ForkMode,
    /// عدد الاستدعاءات بين قراءتين للساعة
    pub batch_size: u64,
    pub time_unit: TimeUnit,
    /// تبريد بين النسخ في وضع `in_process`
    pub cooldown_ms: u64,
    /// حد الزمن لكل عملية فرعية. الافتراضي مشتق من ميزانية القياس.
    pub fork_timeout_secs: Option<u64>,
    /// تثبيت خيط القياس على نواة محددة
    pub pin_core: Option<usize>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 5,
            warmup_time_ms: 1_000,
            measurement_iterations: 5,
            measurement_time_ms: 1_000,
            forks: 2,
            fork_mode: ForkMode::Process,
            batch_size: 1_024,
            time_unit: TimeUnit::Nanoseconds,
            cooldown_ms: 0,
            fork_timeout_secs: None,
            pin_core: None,
        }
    }
}

impl ProtocolConfig {
    pub fn validate(&self) -> HarnessResult<()> {
        if self.measurement_iterations == 0 {
            return Err(HarnessError::ConfigInvalid(
                "measurement_iterations must be > 0".into(),
            ));
        }
        if self.measurement_time_ms == 0 {
            return Err(HarnessError::ConfigInvalid(
                "measurement_time_ms must be > 0".into(),
            ));
        }
        if self.forks == 0 {
            return Err(HarnessError::ConfigInvalid("forks must be > 0".into()));
        }
        if self.batch_size == 0 {
            return Err(HarnessError::ConfigInvalid("batch_size must be > 0".into()));
        }
        Ok(())
    }

    pub fn warmup_time(&self) -> Duration {
        Duration::from_millis(self.warmup_time_ms)
    }

    pub fn measurement_time(&self) -> Duration {
        Duration::from_millis(self.measurement_time_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// الميزانية الاسمية لدورة واحدة (إحماء + قياس)
    pub fn cycle_budget(&self) -> Duration {
        self.warmup_time() * self.warmup_iterations
            + self.measurement_time() * self.measurement_iterations
    }

    /// ضعف الميزانية + 30 ثانية لبناء الـ Fixture وبدء العملية
    pub fn fork_timeout(&self) -> Duration {
        match self.fork_timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => self.cycle_budget() * 2 + Duration::from_secs(30),
        }
    }
}
