//! Host description printed before benchmark results

use std::fmt;
use sysinfo::System;

/// Snapshot of the machine the benchmarks run on
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// UTC date, `YYYY-MM-DD`
    pub date: String,
    pub rustc: String,
    pub arch: &'static str,
    pub os: String,
    pub cpu_brand: String,
    pub physical_cores: Option<usize>,
    pub logical_cores: usize,
    /// Detected CPU features relevant to the primitives under test
    pub cpu_features: Vec<&'static str>,
}

impl SystemInfo {
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();

        let cpu_brand = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "unknown".into());

        let os = System::long_os_version()
            .or_else(System::name)
            .unwrap_or_else(|| std::env::consts::OS.to_string());

        Self {
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            rustc: env!("PRIMBENCH_RUSTC_VERSION").to_string(),
            arch: std::env::consts::ARCH,
            os,
            cpu_brand,
            physical_cores: sys.physical_core_count(),
            logical_cores: num_cpus::get(),
            cpu_features: cpu_features(),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "date:     {}", self.date)?;
        writeln!(f, "rustc:    {}", self.rustc)?;
        writeln!(f, "arch:     {}", self.arch)?;
        writeln!(f, "os:       {}", self.os)?;
        writeln!(f, "cpu:      {}", self.cpu_brand)?;
        match self.physical_cores {
            Some(physical) => writeln!(f, "cores:    {physical} physical, {} logical", self.logical_cores)?,
            None => writeln!(f, "cores:    {} logical", self.logical_cores)?,
        }
        write!(f, "features: {}", self.cpu_features.join(" "))
    }
}

#[cfg(target_arch = "x86_64")]
fn cpu_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    macro_rules! detect {
        ($($feature:tt => $label:expr),* $(,)?) => {
            $(if std::arch::is_x86_feature_detected!($feature) {
                features.push($label);
            })*
        };
    }
    detect! {
        "sse" => "SSE",
        "sse2" => "SSE2",
        "sse4.2" => "SSE4.2/CRC32",
        "avx" => "AVX",
        "avx2" => "AVX2",
        "avx512f" => "AVX512F",
        "aes" => "AES",
        "pclmulqdq" => "PCLMULQDQ",
        "sha" => "SHA",
    }
    features
}

#[cfg(target_arch = "aarch64")]
fn cpu_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    macro_rules! detect {
        ($($feature:tt => $label:expr),* $(,)?) => {
            $(if std::arch::is_aarch64_feature_detected!($feature) {
                features.push($label);
            })*
        };
    }
    detect! {
        "neon" => "NEON",
        "aes" => "AES",
        "sha2" => "SHA2",
        "sha3" => "SHA3",
        "crc" => "CRC",
        "lse" => "LSE",
        "sve" => "SVE",
    }
    features
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn cpu_features() -> Vec<&'static str> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_fills_basic_fields() {
        let info = SystemInfo::collect();
        assert_eq!(info.date.len(), 10);
        assert!(info.logical_cores >= 1);
        assert!(!info.rustc.is_empty());
        assert_eq!(info.arch, std::env::consts::ARCH);
    }

    #[test]
    fn display_lists_every_line() {
        let text = SystemInfo::collect().to_string();
        for label in ["date:", "rustc:", "arch:", "os:", "cpu:", "cores:", "features:"] {
            assert!(text.contains(label), "missing {label} in:\n{text}");
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_always_has_sse2() {
        assert!(cpu_features().contains(&"SSE2"));
    }
}
