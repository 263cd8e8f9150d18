//! Hardware-based parameter recommendation
//!
//! A pure rule over host memory and the device's physical screen size. The
//! probes that collect those inputs live in the daemon crate and fall back to
//! the defaults below on any failure.

use std::fmt;

use crate::params::{Bitrate, MaxDimension, MaxFps, StreamParameters, VideoCodec};

/// Used when host memory cannot be read
pub const DEFAULT_HOST_RAM_GB: u64 = 8;

/// Used when the device model query fails
pub const UNKNOWN_MODEL: &str = "Unknown";

/// Longest screen edge (px) above which the high tier is considered
pub const HIGH_TIER_MIN_EDGE: u32 = 2500;

/// Host memory (GiB) required for the high tier
pub const HIGH_TIER_MIN_RAM_GB: u64 = 16;

const HIGH_TIER_BITRATE: u8 = 20;
const STANDARD_TIER_BITRATE: u8 = 10;

/// Physical display size reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn longest_edge(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Suggested parameters plus the inputs they were derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub max_dimension: MaxDimension,
    pub bitrate: Bitrate,
    pub max_fps: MaxFps,
    pub codec: VideoCodec,
    pub device_model: String,
    pub host_ram_gb: u64,
    pub screen_size: Option<ScreenSize>,
}

impl Recommendation {
    /// Overwrite the recommended fields; flags and window position are untouched.
    pub fn apply_to(&self, params: &mut StreamParameters) {
        params.max_dimension = self.max_dimension;
        params.bitrate = self.bitrate;
        params.max_fps = self.max_fps;
        params.codec = self.codec;
    }
}

/// Pick parameters for a device.
///
/// An unknown screen counts as edge 0 and therefore lands in the standard tier.
pub fn recommend(
    host_ram_gb: u64,
    screen_size: Option<ScreenSize>,
    device_model: impl Into<String>,
) -> Recommendation {
    let edge = screen_size.map(|s| s.longest_edge()).unwrap_or(0);
    let high_tier = edge > HIGH_TIER_MIN_EDGE && host_ram_gb >= HIGH_TIER_MIN_RAM_GB;

    let (max_dimension, mbps) = if high_tier {
        (MaxDimension::W2560, HIGH_TIER_BITRATE)
    } else {
        (MaxDimension::W1920, STANDARD_TIER_BITRATE)
    };

    Recommendation {
        max_dimension,
        bitrate: Bitrate::saturating(mbps as i32),
        max_fps: MaxFps::F60,
        codec: VideoCodec::H264,
        device_model: device_model.into(),
        host_ram_gb,
        screen_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_tier_for_large_screen_and_ram() {
        let rec = recommend(16, Some(ScreenSize::new(1440, 3008)), "Tab S9");
        assert_eq!(rec.max_dimension, MaxDimension::W2560);
        assert_eq!(rec.bitrate.mbps(), 20);
        assert_eq!(rec.max_fps, MaxFps::F60);
        assert_eq!(rec.codec, VideoCodec::H264);
    }

    #[test]
    fn test_standard_tier_for_1080p_on_small_host() {
        let rec = recommend(8, Some(ScreenSize::new(1080, 1920)), "Pixel");
        assert_eq!(rec.max_dimension, MaxDimension::W1920);
        assert_eq!(rec.bitrate.mbps(), 10);
    }

    #[test]
    fn test_large_screen_needs_enough_ram() {
        let rec = recommend(15, Some(ScreenSize::new(1600, 2560)), "Tablet");
        assert_eq!(rec.max_dimension, MaxDimension::W1920);
    }

    #[test]
    fn test_edge_exactly_at_threshold_is_standard() {
        let rec = recommend(32, Some(ScreenSize::new(2500, 1200)), "Edge");
        assert_eq!(rec.max_dimension, MaxDimension::W1920);
    }

    #[test]
    fn test_unknown_screen_is_standard_tier() {
        let rec = recommend(64, None, UNKNOWN_MODEL);
        assert_eq!(rec.max_dimension, MaxDimension::W1920);
        assert_eq!(rec.bitrate.mbps(), 10);
        assert_eq!(rec.device_model, "Unknown");
        assert_eq!(rec.screen_size, None);
    }

    #[test]
    fn test_apply_to_keeps_window_flags() {
        let mut params = StreamParameters {
            borderless: true,
            screen_off: true,
            codec: VideoCodec::H265,
            ..Default::default()
        };
        recommend(16, Some(ScreenSize::new(1440, 3200)), "X").apply_to(&mut params);
        assert_eq!(params.max_dimension, MaxDimension::W2560);
        assert_eq!(params.codec, VideoCodec::H264);
        assert!(params.borderless);
        assert!(params.screen_off);
    }
}
