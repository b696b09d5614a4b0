// Micro-benchmarks

/*
 * HASHEQ BENCH - CRITERION CROSS-CHECK SUITE
 * =================================================================
 * Component Name: benches/contract_bench.rs
 * Core Responsibility: نفس الكتالوج (7 عمليات × 4 متغيرات) عبر Criterion كمرجع مستقل عن الـ Harness الداخلي.
 * Design Pattern: Statistical Micro-benchmarking
 * Forensic Impact: إذا اختلف ترتيب المتغيرات بين التقريرين، فالخلل في أداة القياس وليس في الكود المقاس.
 * =================================================================
 */

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hasheq_bench::fixture::{CollectionFixture, EqualityFixture, DECLARED_SIZES};
use hasheq_bench::{BuilderPerson, DerivedPerson, Entity, PlainPerson, RecordPerson};

/// عمليات المساواة والتجزئة لمتغير واحد (غير مرتبطة بالحجم)
fn bench_equality_variant<E: Entity>(c: &mut Criterion) {
    let mut group = c.benchmark_group("HashCodeEquals");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(5));

    let fx = EqualityFixture::<E>::build();

    group.bench_function(format!("{}.equalsTrue", E::VARIANT), |b| {
        b.iter(|| black_box(&fx).equals_true())
    });
    group.bench_function(format!("{}.equalsFalse", E::VARIANT), |b| {
        b.iter(|| black_box(&fx).equals_false())
    });
    group.bench_function(format!("{}.hashCode", E::VARIANT), |b| {
        b.iter(|| black_box(&fx).hash_code())
    });

    group.finish();
}

/// عمليات البحث في المجموعات لكل حجم معلن. الـ Fixture يُبنى خارج الحلقة المقاسة.
fn bench_collection_variant<E: Entity>(c: &mut Criterion) {
    let mut group = c.benchmark_group("Collection");
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(5));

    for size in DECLARED_SIZES {
        let fx = match CollectionFixture::<E>::build(size) {
            Ok(fx) => fx,
            Err(e) => panic!("fixture for {} size={} failed: {}", E::VARIANT, size, e),
        };

        group.bench_with_input(
            BenchmarkId::new(format!("{}.setContainsHit", E::VARIANT), size),
            &fx,
            |b, fx| b.iter(|| black_box(fx).set_contains_hit()),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("{}.setContainsMiss", E::VARIANT), size),
            &fx,
            |b, fx| b.iter(|| black_box(fx).set_contains_miss()),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("{}.mapGetHit", E::VARIANT), size),
            &fx,
            |b, fx| b.iter(|| black_box(fx).map_get_hit()),
        );
        group.bench_with_input(
            BenchmarkId::new(format!("{}.mapGetMiss", E::VARIANT), size),
            &fx,
            |b, fx| b.iter(|| black_box(fx).map_get_miss()),
        );
    }

    group.finish();
}

fn bench_equality(c: &mut Criterion) {
    bench_equality_variant::<PlainPerson>(c);
    bench_equality_variant::<DerivedPerson>(c);
    bench_equality_variant::<RecordPerson>(c);
    bench_equality_variant::<BuilderPerson>(c);
}

fn bench_collections(c: &mut Criterion) {
    bench_collection_variant::<PlainPerson>(c);
    bench_collection_variant::<DerivedPerson>(c);
    bench_collection_variant::<RecordPerson>(c);
    bench_collection_variant::<BuilderPerson>(c);
}

criterion_group!(benches, bench_equality, bench_collections);
criterion_main!(benches);
