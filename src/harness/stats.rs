/*
 * HASHEQ BENCH - SCORE AGGREGATION
 * =================================================================
 * Component Name: src/harness/stats.rs
 * Core Responsibility: تجميع عينات القياس من كل النسخ في نتيجة واحدة مع هامش خطأ (Statistics Pillar).
 * Design Pattern: Student's t Confidence Interval (99.9%)
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use super::TimeUnit;

/// مستوى الثقة لهامش الخطأ
pub const CONFIDENCE_LEVEL: f64 = 0.999;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub samples: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// الانحراف المعياري للعينة (n - 1)
    pub std_dev: f64,
    /// نصف عرض فترة الثقة. غير متاح لعينة واحدة.
    pub error: Option<f64>,
}

impl Statistics {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let n = samples.len();
        let n_f = n as f64;
        let mean = samples.iter().sum::<f64>() / n_f;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std_dev = if n > 1 {
            let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n_f - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Some(Self {
            samples: n,
            mean,
            min,
            max,
            std_dev,
            error: Self::confidence_half_width(n, std_dev),
        })
    }

    fn confidence_half_width(n: usize, std_dev: f64) -> Option<f64> {
        if n < 2 {
            return None;
        }
        let dist = StudentsT::new(0.0, 1.0, (n - 1) as f64).ok()?;
        let t = dist.inverse_cdf(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
        let half_width = t * std_dev / (n as f64).sqrt();
        half_width.is_finite().then_some(half_width)
    }

    pub fn confidence_interval(&self) -> Option<(f64, f64)> {
        self.error.map(|e| (self.mean - e, self.mean + e))
    }

    /// نفس الإحصائيات بوحدة زمن أخرى (المدخلات دائماً بالنانوثانية)
    pub fn in_unit(&self, unit: TimeUnit) -> Self {
        Self {
            samples: self.samples,
            mean: unit.from_nanos(self.mean),
            min: unit.from_nanos(self.min),
            max: unit.from_nanos(self.max),
            std_dev: unit.from_nanos(self.std_dev),
            error: self.error.map(|e| unit.from_nanos(e)),
        }
    }
}
