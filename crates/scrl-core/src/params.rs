//! Mirroring stream parameters
//!
//! Every option the launcher can pass to the mirroring tool is a typed value
//! here. Argument lists are built from these types only, never from free text.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Closed set of values that the UI cycles through with left/right.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    const ALL: &'static [Self];

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Longest edge of the mirrored video (`-m`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum MaxDimension {
    #[serde(rename = "native")]
    Native,
    #[serde(rename = "2560")]
    W2560,
    #[default]
    #[serde(rename = "1920")]
    W1920,
    #[serde(rename = "1280")]
    W1280,
}

impl Choice for MaxDimension {
    const ALL: &'static [Self] = &[
        MaxDimension::Native,
        MaxDimension::W2560,
        MaxDimension::W1920,
        MaxDimension::W1280,
    ];
}

impl MaxDimension {
    /// Pixel cap, or `None` to keep the device resolution
    pub fn pixels(&self) -> Option<u32> {
        match self {
            MaxDimension::Native => None,
            MaxDimension::W2560 => Some(2560),
            MaxDimension::W1920 => Some(1920),
            MaxDimension::W1280 => Some(1280),
        }
    }

    /// Short tier name shown next to the pixel count
    pub fn tier(&self) -> &'static str {
        match self {
            MaxDimension::Native => "",
            MaxDimension::W2560 => "2K",
            MaxDimension::W1920 => "1080P",
            MaxDimension::W1280 => "720P",
        }
    }
}

/// Frame rate cap (`--max-fps`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum MaxFps {
    F120,
    F90,
    #[default]
    F60,
    F30,
}

impl Choice for MaxFps {
    const ALL: &'static [Self] = &[MaxFps::F120, MaxFps::F90, MaxFps::F60, MaxFps::F30];
}

impl MaxFps {
    pub fn value(&self) -> u32 {
        match self {
            MaxFps::F120 => 120,
            MaxFps::F90 => 90,
            MaxFps::F60 => 60,
            MaxFps::F30 => 30,
        }
    }
}

impl TryFrom<u32> for MaxFps {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        MaxFps::ALL
            .iter()
            .copied()
            .find(|f| f.value() == value)
            .ok_or_else(|| Error::config_invalid(format!("unsupported max fps: {}", value)))
    }
}

impl From<MaxFps> for u32 {
    fn from(fps: MaxFps) -> Self {
        fps.value()
    }
}

/// Video bitrate in Mbps, always within `Bitrate::MIN..=Bitrate::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Bitrate(u8);

impl Bitrate {
    pub const MIN: u8 = 4;
    pub const MAX: u8 = 40;

    pub fn new(mbps: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&mbps) {
            Ok(Self(mbps))
        } else {
            Err(Error::config_invalid(format!(
                "bitrate {} Mbps outside {}..={}",
                mbps,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// Clamp any value into range
    pub fn saturating(mbps: i32) -> Self {
        Self(mbps.clamp(Self::MIN as i32, Self::MAX as i32) as u8)
    }

    /// Move by `delta` Mbps, stopping at the bounds
    pub fn step(self, delta: i32) -> Self {
        Self::saturating(self.0 as i32 + delta)
    }

    pub fn mbps(&self) -> u8 {
        self.0
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self(16)
    }
}

impl TryFrom<u8> for Bitrate {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Bitrate::new(value)
    }
}

impl From<Bitrate> for u8 {
    fn from(bitrate: Bitrate) -> Self {
        bitrate.0
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Mbps", self.0)
    }
}

/// Video codec (`--video-codec`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    #[default]
    H264,
    H265,
}

impl Choice for VideoCodec {
    const ALL: &'static [Self] = &[VideoCodec::H264, VideoCodec::H265];
}

impl VideoCodec {
    /// Value passed on the command line
    pub fn as_arg(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "h264",
            VideoCodec::H265 => "h265",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VideoCodec::H264 => "H.264",
            VideoCodec::H265 => "H.265",
        }
    }
}

/// Initial position of the mirror window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPosition {
    #[default]
    Center,
    TopLeft,
    TopRight,
}

impl Choice for WindowPosition {
    const ALL: &'static [Self] = &[
        WindowPosition::Center,
        WindowPosition::TopLeft,
        WindowPosition::TopRight,
    ];
}

/// Full set of options for one mirroring launch
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StreamParameters {
    pub max_dimension: MaxDimension,
    pub max_fps: MaxFps,
    #[serde(rename = "bitrate_mbps")]
    pub bitrate: Bitrate,
    pub codec: VideoCodec,
    pub screen_off: bool,
    pub borderless: bool,
    pub window_position: WindowPosition,
    pub print_fps: bool,
}

impl StreamParameters {
    /// One-line summary for the launch log
    pub fn summary(&self) -> String {
        let size = match self.max_dimension.pixels() {
            Some(px) => px.to_string(),
            None => "native".to_string(),
        };
        format!(
            "{} | {}fps | {} | {}",
            size,
            self.max_fps.value(),
            self.codec.display_name(),
            self.bitrate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_launcher_defaults() {
        let params = StreamParameters::default();
        assert_eq!(params.max_dimension, MaxDimension::W1920);
        assert_eq!(params.max_fps, MaxFps::F60);
        assert_eq!(params.bitrate.mbps(), 16);
        assert_eq!(params.codec, VideoCodec::H264);
        assert_eq!(params.window_position, WindowPosition::Center);
        assert!(!params.screen_off && !params.borderless && !params.print_fps);
    }

    #[test]
    fn test_bitrate_bounds() {
        assert!(Bitrate::new(4).is_ok());
        assert!(Bitrate::new(40).is_ok());
        assert!(Bitrate::new(3).is_err());
        assert!(Bitrate::new(41).is_err());
        assert_eq!(Bitrate::saturating(-5).mbps(), Bitrate::MIN);
        assert_eq!(Bitrate::saturating(500).mbps(), Bitrate::MAX);
    }

    #[test]
    fn test_bitrate_step_stops_at_bounds() {
        let b = Bitrate::new(39).unwrap();
        assert_eq!(b.step(1).mbps(), 40);
        assert_eq!(b.step(5).mbps(), 40);
        assert_eq!(Bitrate::new(5).unwrap().step(-4).mbps(), 4);
    }

    #[test]
    fn test_choice_cycles_wrap() {
        assert_eq!(MaxDimension::W1280.next(), MaxDimension::Native);
        assert_eq!(MaxDimension::Native.prev(), MaxDimension::W1280);
        assert_eq!(MaxFps::F120.prev(), MaxFps::F30);
        assert_eq!(VideoCodec::H264.next(), VideoCodec::H265);
        assert_eq!(WindowPosition::TopRight.next(), WindowPosition::Center);
    }

    #[test]
    fn test_max_fps_try_from() {
        assert_eq!(MaxFps::try_from(90).unwrap(), MaxFps::F90);
        assert!(MaxFps::try_from(45).is_err());
    }

    #[test]
    fn test_out_of_range_bitrate_rejected_on_load() {
        let toml_src = "bitrate_mbps = 64\n";
        let parsed: std::result::Result<StreamParameters, _> = toml::from_str(toml_src);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_summary() {
        let params = StreamParameters {
            max_dimension: MaxDimension::Native,
            codec: VideoCodec::H265,
            ..Default::default()
        };
        assert_eq!(params.summary(), "native | 60fps | H.265 | 16 Mbps");
    }
}
