//! Host metadata recorded with each report.

use serde::{Deserialize, Serialize};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

const UNKNOWN: &str = "unknown";

/// Hardware and model information for reproducibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareInfo {
    pub platform: String,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub cpu_threads: usize,
    pub memory_gb: f64,
    pub model_name: String,
}

impl HardwareInfo {
    /// Probe the host. Values the platform does not expose degrade to
    /// `"unknown"` or zero.
    pub fn collect(model_name: impl Into<String>) -> Self {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::everything())
                .with_memory(MemoryRefreshKind::everything()),
        );
        system.refresh_cpu_all();

        let cpu_model = system
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let memory_gb = system.total_memory() as f64 / (1024.0 * 1024.0 * 1024.0);

        Self {
            platform: platform(),
            cpu_model,
            cpu_cores: System::physical_core_count().unwrap_or(0),
            cpu_threads: system.cpus().len(),
            memory_gb: rataitosk_axes::round2(memory_gb),
            model_name: model_name.into(),
        }
    }

    /// Placeholder values, for runs that must not probe the host.
    pub fn unknown(model_name: impl Into<String>) -> Self {
        Self {
            platform: UNKNOWN.to_string(),
            cpu_model: UNKNOWN.to_string(),
            cpu_cores: 0,
            cpu_threads: 0,
            memory_gb: 0.0,
            model_name: model_name.into(),
        }
    }
}

fn platform() -> String {
    match System::long_os_version() {
        Some(os) => format!("{os} ({})", std::env::consts::ARCH),
        None => format!("{} ({})", std::env::consts::OS, std::env::consts::ARCH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_never_fails() {
        let info = HardwareInfo::collect("hash-384");
        assert_eq!(info.model_name, "hash-384");
        assert!(!info.platform.is_empty());
        assert!(!info.cpu_model.is_empty());
        assert!(info.memory_gb >= 0.0);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(HardwareInfo::unknown("m")).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["cpu_cores", "cpu_model", "cpu_threads", "memory_gb", "model_name", "platform"]
        );
    }
}
