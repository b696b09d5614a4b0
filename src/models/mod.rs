/*
 * HASHEQ BENCH - ENTITY CONTRACT MODEL
 * =================================================================
 * Component Name: src/models/mod.rs
 * Core Responsibility: تعريف السجل الموحد (Person) وعقد المساواة/التجزئة المشترك بين المتغيرات الأربعة.
 * Design Pattern: Trait Facade / Static Dispatch
 * Forensic Impact: كل متغير يحمل نفس الحقول الخمسة بالضبط. أي فرق في الأداء يعود لطريقة كتابة العقد فقط، لا للبيانات.
 * =================================================================
 */

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

pub mod builder_person;
pub mod derived_person;
pub mod field_fold;
pub mod plain_person;
pub mod record_person;

pub use builder_person::BuilderPerson;
pub use derived_person::DerivedPerson;
pub use plain_person::PlainPerson;
pub use record_person::RecordPerson;

// =================================================================
// المتغيرات (Entity Variants)
// =================================================================

/// طريقة كتابة عقد المساواة/التجزئة (Authoring Style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Plain,   // مكتوب يدوياً
    Derived, // مولد من المترجم (#[derive])
    Record,  // نوع قيمة غير قابل للتغيير (value_record!)
    Builder, // طي مرتب عبر الحقول (Field Fold)
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Plain,
        Variant::Derived,
        Variant::Record,
        Variant::Builder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::Derived => "derived",
            Variant::Record => "record",
            Variant::Builder => "builder",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| HarnessError::invalid_parameter("variant", s))
    }
}

// =================================================================
// العقد المشترك (The Entity Contract)
// =================================================================

/// السجل الموحد: خمسة حقول، غير قابل للتغيير بعد الإنشاء.
///
/// لا توجد دوال تعديل (Setters) في أي متغير، لأن السجلات تستخدم كمفاتيح
/// داخل `HashSet`/`HashMap` وأي تعديل بعد الإدخال يفسد موقع الدلو (Bucket).
pub trait Entity: Eq + Hash + Clone + fmt::Debug + Send + 'static {
    const VARIANT: Variant;

    fn from_fields(first_name: &str, last_name: &str, age: i32, email: &str, city: &str) -> Self;

    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn age(&self) -> i32;
    fn email(&self) -> &str;
    fn city(&self) -> &str;

    /// قيمة التجزئة بمفتاح ثابت (Fixed-Key SipHash).
    /// حتمية عبر الاستدعاءات والعمليات، بعكس `RandomState` داخل المجموعات.
    /// لا معنى لمقارنتها بين متغيرين مختلفين.
    #[inline]
    fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
