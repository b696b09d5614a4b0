/*
 * HASHEQ BENCH - HAND-WRITTEN CONTRACT
 * =================================================================
 * Component Name: src/models/plain_person.rs
 * Core Responsibility: عقد مساواة وتجزئة مكتوب يدوياً حقلاً بحقل (Baseline).
 * Design Pattern: Manual PartialEq / Manual Hash
 * =================================================================
 */

use std::hash::{Hash, Hasher};

use super::{Entity, Variant};

#[derive(Debug, Clone)]
pub struct PlainPerson {
    first_name: String,
    last_name: String,
    age: i32,
    email: String,
    city: String,
}

impl PlainPerson {
    pub fn new(first_name: String, last_name: String, age: i32, email: String, city: String) -> Self {
        Self {
            first_name,
            last_name,
            age,
            email,
            city,
        }
    }
}

impl PartialEq for PlainPerson {
    fn eq(&self, other: &Self) -> bool {
        // اختصار الهوية (Identity Shortcut)
        if std::ptr::eq(self, other) {
            return true;
        }
        // العدد أولاً (أرخص مقارنة)، ثم النصوص بالمحتوى
        self.age == other.age
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.email == other.email
            && self.city == other.city
    }
}

impl Eq for PlainPerson {}

impl Hash for PlainPerson {
    /// الترتيب ثابت وموثق: first_name, last_name, age, email, city
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first_name.hash(state);
        self.last_name.hash(state);
        self.age.hash(state);
        self.email.hash(state);
        self.city.hash(state);
    }
}

impl Entity for PlainPerson {
    const VARIANT: Variant = Variant::Plain;

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
