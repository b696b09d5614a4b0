// Collection fixture

use std::collections::{HashMap, HashSet, TryReserveError};

use tracing::debug;

use super::{validate_size, SeedFields};
use crate::error::{HarnessError, HarnessResult};
use crate::models::Entity;

/// المجموعات المعبأة ومجسا الإصابة/الإخفاق لحجم واحد ومتغير واحد.
/// للقراءة فقط أثناء القياس (لا توجد دالة تعديل بعد البناء).
#[derive(Debug)]
pub struct CollectionFixture<E: Entity> {
    size: usize,
    set: HashSet<E>,
    map: HashMap<E, i32>,
    hit: E,
    miss: E,
}

impl<E: Entity> CollectionFixture<E> {
    /// بناء المجموعة والخريطة بـ `size` سجلاً متمايزاً.
    /// فشل حجز الذاكرة يعاد كخطأ قاتل (لا إعادة محاولة).
    pub fn build(size: usize) -> HarnessResult<Self> {
        let count = validate_size(size)?;

        let mut set = HashSet::new();
        set.try_reserve(size)
            .map_err(|e| Self::allocation_failure(size, e))?;
        let mut map = HashMap::new();
        map.try_reserve(size)
            .map_err(|e| Self::allocation_failure(size, e))?;

        for i in 0..count {
            let seed = SeedFields::at(i);
            // كائنان منفصلان: واحد للمجموعة وواحد للخريطة
            set.insert(seed.build::<E>());
            map.insert(seed.build::<E>(), i);
        }

        let hit = SeedFields::at(count / 2).build::<E>();
        let miss = SeedFields::miss().build::<E>();

        debug!(
            "FIXTURE: Built {} collections (size={}, set={}, map={})",
            E::VARIANT,
            size,
            set.len(),
            map.len()
        );

        Ok(Self {
            size,
            set,
            map,
            hit,
            miss,
        })
    }

    fn allocation_failure(size: usize, err: TryReserveError) -> HarnessError {
        HarnessError::FixtureBuild {
            variant: E::VARIANT.to_string(),
            size,
            reason: err.to_string(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn set(&self) -> &HashSet<E> {
        &self.set
    }

    pub fn map(&self) -> &HashMap<E, i32> {
        &self.map
    }

    pub fn hit(&self) -> &E {
        &self.hit
    }

    pub fn miss(&self) -> &E {
        &self.miss
    }

    // -----------------------------------------------------------------
    // خطافات القياس (Benchmark Hooks) - قراءة فقط
    // -----------------------------------------------------------------

    #[inline]
    pub fn set_contains_hit(&self) -> bool {
        self.set.contains(&self.hit)
    }

    #[inline]
    pub fn set_contains_miss(&self) -> bool {
        self.set.contains(&self.miss)
    }

    #[inline]
    pub fn map_get_hit(&self) -> Option<i32> {
        self.map.get(&self.hit).copied()
    }

    #[inline]
    pub fn map_get_miss(&self) -> Option<i32> {
        self.map.get(&self.miss).copied()
    }
}
