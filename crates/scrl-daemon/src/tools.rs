//! External tool resolution
//!
//! Locates the bridge (`adb`) and mirroring (`scrcpy`) executables. Search
//! order: an explicit tools directory, then `PATH`, then the Android SDK
//! (adb only), then the bare command name so the OS gets the final say.

use std::path::{Path, PathBuf};

use scrl_core::prelude::*;

use crate::bridge::ADB_PROGRAM;

/// Default mirroring executable name
pub const SCRCPY_PROGRAM: &str = "scrcpy";

/// Resolved executable locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub adb: PathBuf,
    pub scrcpy: PathBuf,
    /// Directory with the mirroring tool's runtime files (server jar etc.)
    pub working_dir: Option<PathBuf>,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            adb: PathBuf::from(ADB_PROGRAM),
            scrcpy: PathBuf::from(SCRCPY_PROGRAM),
            working_dir: None,
        }
    }
}

impl ToolPaths {
    /// Resolve both tools, preferring `tools_dir` when given
    pub fn resolve(tools_dir: Option<&Path>) -> Self {
        let adb = tools_dir
            .and_then(|dir| in_tools_dir(dir, ADB_PROGRAM))
            .or_else(|| on_path(ADB_PROGRAM))
            .or_else(android_sdk_adb)
            .unwrap_or_else(|| PathBuf::from(ADB_PROGRAM));

        let scrcpy = tools_dir
            .and_then(|dir| in_tools_dir(dir, SCRCPY_PROGRAM))
            .or_else(|| on_path(SCRCPY_PROGRAM))
            .unwrap_or_else(|| PathBuf::from(SCRCPY_PROGRAM));

        let working_dir = scrcpy
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);

        let paths = Self {
            adb,
            scrcpy,
            working_dir,
        };
        info!(
            "Tools: adb={}, scrcpy={}",
            paths.adb.display(),
            paths.scrcpy.display()
        );
        paths
    }

    /// Which tools were located on disk
    pub fn availability(&self) -> ToolAvailability {
        ToolAvailability {
            adb: is_located(&self.adb),
            scrcpy: is_located(&self.scrcpy),
        }
    }
}

/// Whether each tool was found at startup. A tool that was not found may
/// still be launchable by bare name; this only drives the startup notice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolAvailability {
    pub adb: bool,
    pub scrcpy: bool,
}

impl ToolAvailability {
    /// Names of tools that were not located
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.adb {
            missing.push(ADB_PROGRAM);
        }
        if !self.scrcpy {
            missing.push(SCRCPY_PROGRAM);
        }
        missing
    }
}

/// Platform file name (`adb.exe` on Windows)
pub fn executable_name(tool: &str) -> String {
    format!("{}{}", tool, std::env::consts::EXE_SUFFIX)
}

fn in_tools_dir(dir: &Path, tool: &str) -> Option<PathBuf> {
    let candidate = dir.join(executable_name(tool));
    if !candidate.is_file() {
        debug!("{} not in tools dir {}", tool, dir.display());
        return None;
    }
    // dunce keeps Windows paths free of the \\?\ prefix
    Some(dunce::canonicalize(&candidate).unwrap_or(candidate))
}

fn on_path(tool: &str) -> Option<PathBuf> {
    which::which(tool)
        .inspect_err(|e| debug!("{} not on PATH: {}", tool, e))
        .ok()
}

/// Candidate adb locations inside an Android SDK
fn android_sdk_candidates() -> Vec<PathBuf> {
    ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
        .iter()
        .filter_map(|var| std::env::var_os(var))
        .map(|root| {
            PathBuf::from(root)
                .join("platform-tools")
                .join(executable_name(ADB_PROGRAM))
        })
        .collect()
}

fn android_sdk_adb() -> Option<PathBuf> {
    android_sdk_candidates().into_iter().find(|p| p.is_file())
}

fn is_located(path: &Path) -> bool {
    path.is_absolute() && path.is_file()
}
