// Compiler-synthesized contract

use super::{Entity, Variant};

/// العقد يولده المترجم من تعريف الحقول (Code Generation via `#[derive]`).
/// ترتيب المقارنة والتجزئة = ترتيب تعريف الحقول.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedPerson {
    first_name: String,
    last_name: String,
    age: i32,
    email: String,
    city: String,
}

impl Entity for DerivedPerson {
    const VARIANT: Variant = Variant::Derived;

    fn from_fields(first_name: &str, last_name: &str, age: i32, email: &str, city: &str) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            age,
            email: email.to_owned(),
            city: city.to_owned(),
        }
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
