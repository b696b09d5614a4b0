/*
 * HASHEQ BENCH - VARIANT SUITE
 * =================================================================
 * Component Name: src/catalogue/suite.rs
 * Core Responsibility: ربط خطافات الإعداد والقياس لمتغير واحد ببروتوكول القياس.
 * Design Pattern: Setup Hook (Idempotent) / Monomorphized Dispatch
 * Forensic Impact: كل عملية تُترجم لحلقة قياس مستقلة بدون أي توجيه ديناميكي داخل المسار المقاس.
 * =================================================================
 */

use std::hint::black_box;

use tracing::{debug, info};

use super::{BenchmarkId, Operation};
use crate::error::{HarnessError, HarnessResult};
use crate::fixture::{CollectionFixture, EqualityFixture};
use crate::harness::{run_cycle, CycleSamples, ProtocolConfig};
use crate::models::{BuilderPerson, DerivedPerson, Entity, PlainPerson, RecordPerson, Variant};

/// حالة القياس لمتغير واحد داخل نسخة واحدة (Thread Scope)
pub struct VariantSuite<E: Entity> {
    equality: EqualityFixture<E>,
    collections: Option<CollectionFixture<E>>,
}

impl<E: Entity> Default for VariantSuite<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> VariantSuite<E> {
    pub fn new() -> Self {
        Self {
            equality: EqualityFixture::build(),
            collections: None,
        }
    }

    /// خطاف الإعداد: نفس الحجم مرتين = لا شيء، حجم جديد = إعادة بناء كاملة.
    pub fn setup(&mut self, size: usize) -> HarnessResult<&CollectionFixture<E>> {
        let fixture = match self.collections.take() {
            Some(existing) if existing.size() == size => {
                debug!("SETUP: {} fixture already built for size={}", E::VARIANT, size);
                existing
            }
            stale => {
                // الـ fixture القديم يُحرر قبل بناء الجديد
                drop(stale);
                CollectionFixture::build(size)?
            }
        };
        Ok(&*self.collections.insert(fixture))
    }

    pub fn equality(&self) -> &EqualityFixture<E> {
        &self.equality
    }

    pub fn collections(&self) -> Option<&CollectionFixture<E>> {
        self.collections.as_ref()
    }

    /// تشغيل دورة كاملة (إحماء + قياس) لعملية واحدة.
    /// الـ fixture نفسه يمر عبر `black_box` داخل الحلقة لمنع رفع الحساب كثابت.
    pub fn measure(
        &mut self,
        operation: Operation,
        size: Option<usize>,
        protocol: &ProtocolConfig,
    ) -> HarnessResult<CycleSamples> {
        protocol.validate()?;

        Ok(match operation {
            Operation::EqualsTrue => {
                let eq = &self.equality;
                run_cycle(protocol, || black_box(eq).equals_true())
            }
            Operation::EqualsFalse => {
                let eq = &self.equality;
                run_cycle(protocol, || black_box(eq).equals_false())
            }
            Operation::HashCode => {
                let eq = &self.equality;
                run_cycle(protocol, || black_box(eq).hash_code())
            }
            Operation::SetContainsHit => {
                let fx = self.setup_for(operation, size)?;
                run_cycle(protocol, || black_box(fx).set_contains_hit())
            }
            Operation::SetContainsMiss => {
                let fx = self.setup_for(operation, size)?;
                run_cycle(protocol, || black_box(fx).set_contains_miss())
            }
            Operation::MapGetHit => {
                let fx = self.setup_for(operation, size)?;
                run_cycle(protocol, || black_box(fx).map_get_hit())
            }
            Operation::MapGetMiss => {
                let fx = self.setup_for(operation, size)?;
                run_cycle(protocol, || black_box(fx).map_get_miss())
            }
        })
    }

    fn setup_for(
        &mut self,
        operation: Operation,
        size: Option<usize>,
    ) -> HarnessResult<&CollectionFixture<E>> {
        let size = size.ok_or_else(|| {
            HarnessError::invalid_parameter("size", format!("missing for {}", operation))
        })?;
        self.setup(size)
    }
}

fn measure_variant<E: Entity>(
    operation: Operation,
    size: Option<usize>,
    protocol: &ProtocolConfig,
) -> HarnessResult<CycleSamples> {
    VariantSuite::<E>::new().measure(operation, size, protocol)
}

/// نقطة الدخول الموحدة: fixture جديد في كل استدعاء.
pub fn measure_benchmark(
    id: BenchmarkId,
    size: Option<usize>,
    protocol: &ProtocolConfig,
) -> HarnessResult<CycleSamples> {
    info!("SUITE: Running {} (size={:?})", id, size);
    match id.variant {
        Variant::Plain => measure_variant::<PlainPerson>(id.operation, size, protocol),
        Variant::Derived => measure_variant::<DerivedPerson>(id.operation, size, protocol),
        Variant::Record => measure_variant::<RecordPerson>(id.operation, size, protocol),
        Variant::Builder => measure_variant::<BuilderPerson>(id.operation, size, protocol),
    }
}
