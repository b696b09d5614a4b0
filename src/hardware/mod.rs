// HASHEQ BENCH - HARDWARE ISOLATION
// Status: FINAL PRODUCTION

use crate::error::{HarnessError, HarnessResult};

pub mod host_info;

pub use host_info::HostInfo;

/// تثبيت الخيط الحالي على نواة معينة لتقليل الـ Context Switching أثناء القياس
pub fn apply_affinity(core_id: usize) -> HarnessResult<()> {
    // 1. الحصول على الأنوية المتاحة
    let core_ids = core_affinity::get_core_ids()
        .ok_or_else(|| HarnessError::invalid_parameter("pin_core", "core topology unavailable"))?;

    // 2. التحقق من وجود النواة المطلوبة
    let core = core_ids.get(core_id).copied().ok_or_else(|| {
        HarnessError::invalid_parameter(
            "pin_core",
            format!("{} (system has {} cores)", core_id, core_ids.len()),
        )
    })?;

    // 3. تثبيت الخيط
    if core_affinity::set_for_current(core) {
        Ok(())
    } else {
        Err(HarnessError::invalid_parameter(
            "pin_core",
            format!("OS refused to pin thread to core {}", core_id),
        ))
    }
}
