// src/benchmark/system_info.rs

use std::fmt;
use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Where a set of kernel timings came from: the machine, the build that ran
/// the kernels and the checkout it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub cpu_model: String,
    pub cpu_threads: usize,
    pub total_memory_mb: u64,
    pub build: BuildInfo,
    /// None when the working directory is not inside a git repository.
    pub checkout: Option<Checkout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// "debug" or "release". Debug timings of the wrapping-arithmetic
    /// kernels are not comparable with release ones.
    pub profile: String,
    pub target_arch: String,
    pub crate_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub commit: String,
    pub branch: String,
    pub dirty: bool,
}

impl BuildInfo {
    pub fn current() -> Self {
        BuildInfo {
            profile: if cfg!(debug_assertions) { "debug" } else { "release" }.to_string(),
            target_arch: std::env::consts::ARCH.to_string(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn is_release(&self) -> bool {
        self.profile == "release"
    }
}

impl SystemInfo {
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu_model = sys.cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{} {}", name, version),
            (Some(name), None) => name,
            _ => "Unknown".to_string(),
        };

        SystemInfo {
            os,
            cpu_model,
            cpu_threads: sys.cpus().len(),
            total_memory_mb: sys.total_memory() / 1024 / 1024,
            build: BuildInfo::current(),
            checkout: Checkout::discover(),
        }
    }

    pub fn short_commit(&self) -> String {
        match &self.checkout {
            Some(checkout) => checkout.commit.chars().take(8).collect(),
            None => "unknown".to_string(),
        }
    }

    /// Reasons why timings recorded on `self` and on `other` should not be
    /// compared directly. Empty when they ran on the same CPU with the same
    /// build profile.
    pub fn timing_mismatches(&self, other: &SystemInfo) -> Vec<String> {
        let mut mismatches = Vec::new();
        if self.cpu_model != other.cpu_model {
            mismatches.push(format!("CPU differs: {} vs {}", self.cpu_model, other.cpu_model));
        }
        if self.build.profile != other.build.profile {
            mismatches.push(format!("build profile differs: {} vs {}", self.build.profile, other.build.profile));
        }
        if self.build.target_arch != other.build.target_arch {
            mismatches.push(format!("architecture differs: {} vs {}", self.build.target_arch, other.build.target_arch));
        }
        mismatches
    }
}

impl Checkout {
    /// Commit, branch and dirty flag of the repository containing the
    /// working directory.
    fn discover() -> Option<Self> {
        let repo = git2::Repository::discover(".").ok()?;
        let head = repo.head().ok()?;

        let commit = head.peel_to_commit().ok()?.id().to_string();
        let branch = head.shorthand().unwrap_or("HEAD").to_string();

        let mut options = git2::StatusOptions::new();
        options.include_untracked(false);
        let dirty = repo.statuses(Some(&mut options))
            .map(|statuses| !statuses.is_empty())
            .unwrap_or(false);

        Some(Checkout { commit, branch, dirty })
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System Information:")?;
        writeln!(f, "  OS:           {}", self.os)?;
        writeln!(f, "  CPU:          {} ({} threads)", self.cpu_model, self.cpu_threads)?;
        writeln!(f, "  Memory:       {} MB", self.total_memory_mb)?;
        writeln!(f, "  Build:        {} {} (v{})",
            self.build.profile, self.build.target_arch, self.build.crate_version)?;
        match &self.checkout {
            Some(checkout) => writeln!(f, "  Git:          {} ({}){}",
                self.short_commit(), checkout.branch, if checkout.dirty { " [dirty]" } else { "" }),
            None => writeln!(f, "  Git:          not a repository"),
        }
    }
}
