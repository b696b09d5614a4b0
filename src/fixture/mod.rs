/*
 * HASHEQ BENCH - FIXTURE GENERATION SCHEME
 * =================================================================
 * Component Name: src/fixture/mod.rs
 * Core Responsibility: توليد حتمي للسجلات ومجسات الإصابة/الإخفاق (Determinism Pillar).
 * Design Pattern: Deterministic Seed / Sentinel Values
 * Forensic Impact: نفس الحجم ينتج نفس البيانات دائماً. أي فرق بين تشغيلين يعود للقياس لا للبيانات.
 * =================================================================
 */

use crate::error::{HarnessError, HarnessResult};
use crate::models::Entity;

pub mod collection;
pub mod equality;

pub use collection::CollectionFixture;
pub use equality::EqualityFixture;

/// قيم الحجم المعلنة مسبقاً (Parameter Sweep). لا اكتشاف ديناميكي.
pub const DECLARED_SIZES: [usize; 3] = [100, 1_000, 10_000];

/// عدد دلاء المدينة (حقل متكتل عمداً مقابل حقول فريدة تماماً)
pub const CITY_BUCKETS: i32 = 50;

// =================================================================
// حقول البذرة (Seed Fields)
// =================================================================

/// قيم الحقول الخمسة قبل تحويلها لأي متغير
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFields {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub email: String,
    pub city: String,
}

impl SeedFields {
    /// السجل رقم `i` في مخطط التوليد
    pub fn at(i: i32) -> Self {
        Self {
            first_name: format!("First{}", i),
            last_name: format!("Last{}", i),
            age: i,
            email: format!("email{}@test.com", i),
            city: format!("City{}", i % CITY_BUCKETS),
        }
    }

    /// مجس الإخفاق: العمر -1 لا يولده المخطط أبداً، لذا التنافر مضمون بالبناء.
    pub fn miss() -> Self {
        Self::from_strs("Missing", "Person", -1, "nope@test.com", "Nowhere")
    }

    /// السجل المرجعي لمقارنات المساواة
    pub fn canonical() -> Self {
        Self::from_strs("John", "Doe", 30, "john@example.com", "Paris")
    }

    /// سجل يختلف عن المرجعي في كل الحقول
    pub fn different() -> Self {
        Self::from_strs("Jane", "Smith", 25, "jane@example.com", "Lyon")
    }

    pub fn from_strs(first_name: &str, last_name: &str, age: i32, email: &str, city: &str) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            age,
            email: email.to_owned(),
            city: city.to_owned(),
        }
    }

    /// كل استدعاء ينشئ كائناً جديداً بهوية مستقلة
    pub fn build<E: Entity>(&self) -> E {
        E::from_fields(&self.first_name, &self.last_name, self.age, &self.email, &self.city)
    }
}

/// التحقق من الحجم: يجب أن يوجد سجل عند `size / 2` وأن يتسع الفهرس في `i32`.
pub fn validate_size(size: usize) -> HarnessResult<i32> {
    if size == 0 {
        return Err(HarnessError::invalid_parameter("size", size));
    }
    i32::try_from(size).map_err(|_| HarnessError::invalid_parameter("size", size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_scheme() {
        let seed = SeedFields::at(50);
        assert_eq!(seed.first_name, "First50");
        assert_eq!(seed.last_name, "Last50");
        assert_eq!(seed.age, 50);
        assert_eq!(seed.email, "email50@test.com");
        assert_eq!(seed.city, "City0");
        assert_eq!(SeedFields::at(99).city, "City49");
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(0).is_err());
        assert_eq!(validate_size(1).unwrap(), 1);
        assert!(validate_size(i32::MAX as usize + 1).is_err());
    }
}
