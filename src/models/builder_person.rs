/*
 * HASHEQ BENCH - FOLD-ASSISTED CONTRACT
 * =================================================================
 * Component Name: src/models/builder_person.rs
 * Core Responsibility: عقد مبني من مساهمات الحقول عبر طي مرتب (Utility-Assisted).
 * Design Pattern: Ordered Fold (بديل الـ Builder)
 * =================================================================
 */

use std::hash::{Hash, Hasher};

use super::field_fold::{fold_equals, fold_hash, FieldRef};
use super::{Entity, Variant};

#[derive(Debug, Clone)]
pub struct BuilderPerson {
    first_name: String,
    last_name: String,
    age: i32,
    email: String,
    city: String,
}

impl BuilderPerson {
    pub fn new(first_name: String, last_name: String, age: i32, email: String, city: String) -> Self {
        Self {
            first_name,
            last_name,
            age,
            email,
            city,
        }
    }

    /// ترتيب المقارنة: age أولاً ثم النصوص
    #[inline]
    fn equality_fields(&self) -> [FieldRef<'_>; 5] {
        [
            FieldRef::Int(self.age),
            FieldRef::Text(&self.first_name),
            FieldRef::Text(&self.last_name),
            FieldRef::Text(&self.email),
            FieldRef::Text(&self.city),
        ]
    }

    /// ترتيب التجزئة: ترتيب الإعلان
    #[inline]
    fn hash_fields(&self) -> [FieldRef<'_>; 5] {
        [
            FieldRef::Text(&self.first_name),
            FieldRef::Text(&self.last_name),
            FieldRef::Int(self.age),
            FieldRef::Text(&self.email),
            FieldRef::Text(&self.city),
        ]
    }

    /// القيمة المطوية قبل تمريرها للـ Hasher
    pub fn folded_hash(&self) -> u32 {
        fold_hash(&self.hash_fields())
    }
}

impl PartialEq for BuilderPerson {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        fold_equals(&self.equality_fields(), &other.equality_fields())
    }
}

impl Eq for BuilderPerson {}

impl Hash for BuilderPerson {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.folded_hash());
    }
}

impl Entity for BuilderPerson {
    const VARIANT: Variant = Variant::Builder;

    fn from_fields(first_name: &str, last_name: &str, age: i32, email: &str, city: &str) -> Self {
        Self::new(
            first_name.to_owned(),
            last_name.to_owned(),
            age,
            email.to_owned(),
            city.to_owned(),
        )
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
    fn age(&self) -> i32 {
        self.age
    }
    fn email(&self) -> &str {
        &self.email
    }
    fn city(&self) -> &str {
        &self.city
    }
}
