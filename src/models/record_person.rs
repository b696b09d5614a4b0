/*
 * HASHEQ BENCH - IMMUTABLE VALUE RECORD
 * =================================================================
 * Component Name: src/models/record_person.rs
 * Core Responsibility: نوع قيمة غير قابل للتغيير يُشتق عقده من قائمة المكونات المعلنة مرة واحدة.
 * Design Pattern: Declarative Macro / Structural Equality
 * Forensic Impact: المقارنة والتجزئة تتبعان ترتيب إعلان المكونات حرفياً، فلا مجال لنسيان حقل.
 * =================================================================
 */

use super::{Entity, Variant};

/// يولد الهيكل، المُنشئ، و `PartialEq`/`Eq`/`Hash` من قائمة المكونات.
/// المقارنة بالمكونات (Component-wise) بترتيب الإعلان، بدون اختصار الهوية.
macro_rules! value_record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident : $ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            $($field: $ty),+
        }

        impl $name {
            pub fn new($($field: $ty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }

        impl Eq for $name {}

        impl ::std::hash::Hash for $name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $(::std::hash::Hash::hash(&self.$field, state);)+
            }
        }
    };
}

value_record! {
    /// المكونات نصوص ثابتة (`Box<str>`): لا سعة إضافية ولا إمكانية نمو.
    pub struct RecordPerson {
        first_name: Box<str>,
        last_name: Box<str>,
        age: i32,
        email: Box<str>,
        city: Box<str>,
    }
}

impl Entity for RecordPerson {
    const VARIANT: Variant = Variant::Record;

    fn from_fields(first_name: &str, last_name: &str, age: i32, email: &str, city: &str) -> Self {
        Self::new(first_name.into(), last_name.into(), age, email.into(), city.into())
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
