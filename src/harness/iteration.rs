// Nanosecond iteration timer

/*
 * HASHEQ BENCH - ITERATION TIMER
 * =================================================================
 * Component Name: src/harness/iteration.rs
 * Core Responsibility: قياس متوسط زمن الاستدعاء الواحد بدقة النانوثانية (Performance Pillar).
 * Design Pattern: Time-Boxed Batching / Black Box Sink
 * Forensic Impact: كل نتيجة تمر عبر `black_box`، فلا يستطيع المترجم حذف الاستدعاء ولا رفعه خارج الحلقة.
 * =================================================================
 */

use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ProtocolConfig;

/// نتيجة تكرار واحد (Iteration)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationSample {
    pub invocations: u64,
    pub elapsed_ns: u64,
}

impl IterationSample {
    /// متوسط الزمن لكل استدعاء (نانوثانية). عينة بلا استدعاءات ليس لها متوسط.
    pub fn ns_per_op(&self) -> Option<f64> {
        if self.invocations == 0 {
            return None;
        }
        Some(self.elapsed_ns as f64 / self.invocations as f64)
    }
}

/// عينات دورة كاملة: الإحماء (مهمل) ثم القياس
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleSamples {
    pub warmup: Vec<IterationSample>,
    pub measurement: Vec<IterationSample>,
}

/// تشغيل العملية على دفعات حتى تنفد ميزانية الزمن.
/// الساعة تُقرأ مرة واحدة لكل دفعة، ودفعة واحدة على الأقل تُنفذ دائماً.
pub fn run_iteration<R, F>(budget: Duration, batch_size: u64, op: &mut F) -> IterationSample
where
    F: FnMut() -> R,
{
    let start = Instant::now();
    let mut invocations = 0u64;

    loop {
        for _ in 0..batch_size {
            black_box(op());
        }
        invocations += batch_size;

        let elapsed = start.elapsed();
        if elapsed >= budget {
            return IterationSample {
                invocations,
                elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
            };
        }
    }
}

/// دورة القياس الكاملة لنسخة واحدة (Fork)
pub fn run_cycle<R, F>(protocol: &ProtocolConfig, mut op: F) -> CycleSamples
where
    F: FnMut() -> R,
{
    let mut samples = CycleSamples {
        warmup: Vec::with_capacity(protocol.warmup_iterations as usize),
        measurement: Vec::with_capacity(protocol.measurement_iterations as usize),
    };

    for i in 0..protocol.warmup_iterations {
        let sample = run_iteration(protocol.warmup_time(), protocol.batch_size, &mut op);
        debug!(
            "WARMUP: Iteration {}/{}: {:.3} ns/op",
            i + 1,
            protocol.warmup_iterations,
            sample.ns_per_op().unwrap_or(f64::NAN)
        );
        samples.warmup.push(sample);
    }

    for i in 0..protocol.measurement_iterations {
        let sample = run_iteration(protocol.measurement_time(), protocol.batch_size, &mut op);
        debug!(
            "MEASURE: Iteration {}/{}: {:.3} ns/op",
            i + 1,
            protocol.measurement_iterations,
            sample.ns_per_op().unwrap_or(f64::NAN)
        );
        samples.measurement.push(sample);
    }

    samples
}
