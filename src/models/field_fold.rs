// Ordered field fold

//! طي مرتب عبر قائمة الحقول (Ordered Fold).
//!
//! المساواة: مقارنات الحقول تُجمع بـ AND بالترتيب، وتتوقف المقارنات الفعلية
//! عند أول اختلاف. التجزئة: `acc * 37 + contribution` بدءاً من `17`.

/// مرجع خفيف لحقل واحد (بدون نسخ)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef<'a> {
    Text(&'a str),
    Int(i32),
}

pub const HASH_SEED: u32 = 17;
pub const HASH_MULTIPLIER: u32 = 37;

impl FieldRef<'_> {
    /// مساهمة الحقل في التجزئة
    #[inline]
    pub fn contribution(&self) -> u32 {
        match *self {
            FieldRef::Text(text) => text_hash(text),
            FieldRef::Int(value) => value as u32,
        }
    }
}

/// تجزئة نصية متعددة الحدود بأساس 31 على وحدات UTF-16.
#[inline]
pub fn text_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

#[inline]
pub fn fold_equals(lhs: &[FieldRef<'_>], rhs: &[FieldRef<'_>]) -> bool {
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(rhs)
            .fold(true, |equal, (a, b)| equal && a == b)
}

#[inline]
pub fn fold_hash(fields: &[FieldRef<'_>]) -> u32 {
    fields.iter().fold(HASH_SEED, |acc, field| {
        acc.wrapping_mul(HASH_MULTIPLIER).wrapping_add(field.contribution())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_hash_known_values() {
        assert_eq!(text_hash(""), 0);
        assert_eq!(text_hash("a"), 97);
        assert_eq!(text_hash("ab"), 97 * 31 + 98);
    }

    #[test]
    fn test_fold_hash_is_order_sensitive() {
        assert_eq!(fold_hash(&[FieldRef::Int(1)]), 17 * 37 + 1);
        assert_eq!(fold_hash(&[]), HASH_SEED);

        let forward = fold_hash(&[FieldRef::Int(1), FieldRef::Int(2)]);
        let reverse = fold_hash(&[FieldRef::Int(2), FieldRef::Int(1)]);
        assert_ne!(forward, reverse);
    }

    #[test]
    fn test_fold_equals() {
        let a = [FieldRef::Int(1), FieldRef::Text("x")];
        let b = [FieldRef::Int(1), FieldRef::Text("x")];
        let c = [FieldRef::Int(1), FieldRef::Text("y")];
        assert!(fold_equals(&a, &b));
        assert!(!fold_equals(&a, &c));
        assert!(!fold_equals(&a, &a[..1]));
    }
}
