/*
 * HASHEQ BENCH - HOST FINGERPRINT
 * =================================================================
 * Component Name: src/hardware/host_info.rs
 * Core Responsibility: تسجيل بيئة التشغيل مع كل تقرير (Explainability Pillar).
 * Design Pattern: Snapshot DTO
 * Forensic Impact: رقمان من جهازين مختلفين لا يقارنان. هذه البصمة تكشف ذلك فوراً.
 * =================================================================
 */

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostInfo {
    pub arch: String,
    pub os_type: Option<String>,
    pub os_release: Option<String>,
    pub cpu_count: Option<u32>,
    pub cpu_speed_mhz: Option<u64>,
    pub mem_total_kb: Option<u64>,
}

impl HostInfo {
    /// كل حقل اختياري: فشل قراءة أحدها لا يوقف القياس
    pub fn capture() -> Self {
        Self {
            arch: std::env::consts::ARCH.to_string(),
            os_type: probe("os_type", sys_info::os_type()),
            os_release: probe("os_release", sys_info::os_release()),
            cpu_count: probe("cpu_num", sys_info::cpu_num()),
            cpu_speed_mhz: probe("cpu_speed", sys_info::cpu_speed()),
            mem_total_kb: probe("mem_info", sys_info::mem_info()).map(|m| m.total),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} {} | {} cores @ {} MHz | {} MB RAM",
            self.arch,
            self.os_type.as_deref().unwrap_or("?"),
            self.os_release.as_deref().unwrap_or("?"),
            self.cpu_count.map_or("?".to_string(), |c| c.to_string()),
            self.cpu_speed_mhz.map_or("?".to_string(), |s| s.to_string()),
            self.mem_total_kb.map_or("?".to_string(), |kb| (kb / 1024).to_string()),
        )
    }
}

fn probe<T>(what: &str, result: Result<T, sys_info::Error>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("HOST_INFO: Failed to read {}: {}", what, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_always_has_arch() {
        let host = HostInfo::capture();
        assert_eq!(host.arch, std::env::consts::ARCH);
        assert!(host.summary().starts_with(std::env::consts::ARCH));
    }
}
