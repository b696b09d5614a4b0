/*
 * HASHEQ BENCH - BENCHMARK CATALOGUE
 * =================================================================
 * Component Name: src/catalogue/mod.rs
 * Core Responsibility: القائمة الثابتة للعمليات المقاسة × المتغيرات (Comparability Pillar).
 * Design Pattern: Static Registry / Cross Product
 * Forensic Impact: كل عملية معرفة مرة واحدة وتطبق بالتساوي على كل المتغيرات، فالنتائج قابلة للمقارنة مباشرة.
 * =================================================================
 */

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::models::Variant;

pub mod suite;

pub use suite::{measure_benchmark, VariantSuite};

// =================================================================
// العمليات (Operations)
// =================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    EqualsTrue,
    EqualsFalse,
    HashCode,
    SetContainsHit,
    SetContainsMiss,
    MapGetHit,
    MapGetMiss,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::EqualsTrue,
        Operation::EqualsFalse,
        Operation::HashCode,
        Operation::SetContainsHit,
        Operation::SetContainsMiss,
        Operation::MapGetHit,
        Operation::MapGetMiss,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::EqualsTrue => "equalsTrue",
            Operation::EqualsFalse => "equalsFalse",
            Operation::HashCode => "hashCode",
            Operation::SetContainsHit => "setContainsHit",
            Operation::SetContainsMiss => "setContainsMiss",
            Operation::MapGetHit => "mapGetHit",
            Operation::MapGetMiss => "mapGetMiss",
        }
    }

    /// هل تعتمد العملية على الحجم؟ عمليات المساواة/التجزئة تستخدم الزوج الثابت.
    pub fn is_parameterized(&self) -> bool {
        !matches!(
            self,
            Operation::EqualsTrue | Operation::EqualsFalse | Operation::HashCode
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| HarnessError::UnknownBenchmark(s.to_string()))
    }
}

// =================================================================
// معرف المقياس (Benchmark Id)
// =================================================================

/// `"{variant}.{operation}"`, مثال: `plain.setContainsHit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BenchmarkId {
    pub variant: Variant,
    pub operation: Operation,
}

impl BenchmarkId {
    pub fn new(variant: Variant, operation: Operation) -> Self {
        Self { variant, operation }
    }

    /// مطابقة جزئية للنص (مثل `include` في مشغلات القياس المعتادة)
    pub fn matches(&self, pattern: &str) -> bool {
        self.to_string().contains(pattern)
    }
}

impl fmt::Display for BenchmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.variant, self.operation)
    }
}

impl FromStr for BenchmarkId {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (variant, operation) = s
            .split_once('.')
            .ok_or_else(|| HarnessError::UnknownBenchmark(s.to_string()))?;
        let variant = variant
            .parse::<Variant>()
            .map_err(|_| HarnessError::UnknownBenchmark(s.to_string()))?;
        Ok(Self::new(variant, operation.parse()?))
    }
}

impl From<BenchmarkId> for String {
    fn from(id: BenchmarkId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for BenchmarkId {
    type Error = HarnessError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// الجداء الكامل: 4 متغيرات × 7 عمليات
pub fn catalogue() -> Vec<BenchmarkId> {
    Operation::ALL
        .into_iter()
        .flat_map(|op| Variant::ALL.into_iter().map(move |v| BenchmarkId::new(v, op)))
        .collect()
}
