use super::SeedFields;
use crate::models::Entity;

/// زوج المقارنة الثابت: غير مرتبط بالحجم.
#[derive(Debug, Clone)]
pub struct EqualityFixture<E: Entity> {
    canonical: E,
    twin: E,
    different: E,
}

impl<E: Entity> EqualityFixture<E> {
    pub fn build() -> Self {
        let canonical = SeedFields::canonical();
        Self {
            canonical: canonical.build(),
            twin: canonical.build(),
            different: SeedFields::different().build(),
        }
    }

    pub fn canonical(&self) -> &E {
        &self.canonical
    }

    /// نسخة مطابقة الحقول، مبنية بشكل منفصل
    pub fn twin(&self) -> &E {
        &self.twin
    }

    pub fn different(&self) -> &E {
        &self.different
    }

    // -----------------------------------------------------------------
    // خطافات القياس (Benchmark Hooks)
    // -----------------------------------------------------------------

    #[inline]
    pub fn equals_true(&self) -> bool {
        self.canonical == self.twin
    }

    #[inline]
    pub fn equals_false(&self) -> bool {
        self.canonical == self.different
    }

    #[inline]
    pub fn hash_code(&self) -> u64 {
        self.canonical.hash_code()
    }
}
