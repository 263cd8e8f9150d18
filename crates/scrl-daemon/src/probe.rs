//! Hardware probes feeding the parameter recommendation
//!
//! Every probe degrades to a default instead of failing: an unreadable
//! screen size becomes `None`, an unknown model becomes
//! [`UNKNOWN_MODEL`], and unreadable host memory becomes
//! [`DEFAULT_HOST_RAM_GB`].

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use sysinfo::System;

use scrl_core::prelude::*;
use scrl_core::recommend::{
    recommend, Recommendation, ScreenSize, DEFAULT_HOST_RAM_GB, UNKNOWN_MODEL,
};

use crate::bridge::Bridge;

/// Timeout for each device probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

static PHYSICAL_SIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Physical size:\s*(\d+)x(\d+)").expect("Invalid physical size regex")
});

static ANY_SIZE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").expect("Invalid size regex"));

/// Parse `wm size` output.
///
/// The physical size wins over an override size; otherwise the first
/// `WxH` pair anywhere in the text is used.
pub fn parse_screen_size(output: &str) -> Option<ScreenSize> {
    let caps = PHYSICAL_SIZE_REGEX
        .captures(output)
        .or_else(|| ANY_SIZE_REGEX.captures(output))?;

    let width = caps.get(1)?.as_str().parse().ok()?;
    let height = caps.get(2)?.as_str().parse().ok()?;
    Some(ScreenSize::new(width, height))
}

/// Query the device's physical screen size
pub async fn screen_size<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> Option<ScreenSize> {
    match bridge
        .run(&["-s", serial, "shell", "wm", "size"], PROBE_TIMEOUT)
        .await
    {
        Ok(output) => {
            let size = parse_screen_size(&output.stdout);
            if size.is_none() {
                debug!("No screen size in wm output for {}", serial);
            }
            size
        }
        Err(e) => {
            debug!("Screen size probe failed for {}: {}", serial, e);
            None
        }
    }
}

/// Query the device model, or [`UNKNOWN_MODEL`]
pub async fn device_model<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> String {
    match bridge
        .run(
            &["-s", serial, "shell", "getprop", "ro.product.model"],
            PROBE_TIMEOUT,
        )
        .await
    {
        Ok(output) if !output.stdout.trim().is_empty() => output.stdout.trim().to_string(),
        Ok(_) => UNKNOWN_MODEL.to_string(),
        Err(e) => {
            debug!("Model probe failed for {}: {}", serial, e);
            UNKNOWN_MODEL.to_string()
        }
    }
}

/// Total host memory in whole GiB (truncated)
pub fn host_ram_gb() -> u64 {
    let mut system = System::new();
    system.refresh_memory();
    ram_bytes_to_gb(system.total_memory())
}

fn ram_bytes_to_gb(bytes: u64) -> u64 {
    match bytes / BYTES_PER_GIB {
        0 => DEFAULT_HOST_RAM_GB,
        gb => gb,
    }
}

/// Collect all inputs and compute the recommendation for one device
pub async fn gather_recommendation<B: Bridge + ?Sized>(bridge: &B, serial: &str) -> Recommendation {
    let (size, model) = tokio::join!(screen_size(bridge, serial), device_model(bridge, serial));
    let ram = host_ram_gb();

    let rec = recommend(ram, size, model);
    debug!(
        "Recommendation for {}: {:?} @ {} ({} GB host RAM)",
        serial, rec.max_dimension, rec.bitrate, rec.host_ram_gb
    );
    rec
}
