//! Settings loading and saving

use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use scrl_core::logging::APP_DIR_NAME;
use scrl_core::prelude::*;

use super::types::Settings;

pub const CONFIG_FILENAME: &str = "config.toml";

/// `<config dir>/scrcpy-launcher/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILENAME)
}

/// Load settings from `path`.
///
/// Never fails: a missing file gives defaults, an unreadable or invalid
/// file gives defaults plus a warning.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Write settings to `path` under an exclusive file lock
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
        }
    }

    let body = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    let content = format!("{}{}", config_header(), body);

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::config(format!("Failed to open {}: {}", CONFIG_FILENAME, e)))?;

    // Released when the file is dropped
    file.lock_exclusive()
        .map_err(|e| Error::config(format!("Failed to lock {}: {}", CONFIG_FILENAME, e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write {}: {}", CONFIG_FILENAME, e)))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush {}: {}", CONFIG_FILENAME, e)))?;

    info!("Saved settings to {:?}", path);
    Ok(())
}

fn config_header() -> &'static str {
    "# scrcpy launcher configuration\n# Written by the launcher on exit; manual edits are kept until then.\n\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrl_core::{
        Bitrate, Choice, Language, MaxDimension, MaxFps, StreamParameters, VideoCodec,
        WindowPosition,
    };
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn round_trip(settings: &Settings) -> Settings {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        save_settings(&path, settings).unwrap();
        load_settings(&path)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[stream\nmax_fps = ").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_out_of_range_values_give_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[stream]\nbitrate_mbps = 80\n").unwrap();
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join(CONFIG_FILENAME);
        save_settings(&path, &Settings::default()).unwrap();
        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# scrcpy launcher configuration"));
    }

    #[test]
    fn test_stream_parameters_round_trip_every_value() {
        for &max_dimension in MaxDimension::ALL {
            for &max_fps in MaxFps::ALL {
                for &codec in VideoCodec::ALL {
                    for &window_position in WindowPosition::ALL {
                        for mbps in [Bitrate::MIN, Bitrate::MAX] {
                            let mut settings = Settings::default();
                            settings.stream = StreamParameters {
                                max_dimension,
                                max_fps,
                                bitrate: Bitrate::new(mbps).unwrap(),
                                codec,
                                screen_off: mbps == Bitrate::MIN,
                                borderless: mbps == Bitrate::MAX,
                                window_position,
                                print_fps: true,
                            };
                            assert_eq!(round_trip(&settings), settings);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_other_sections_round_trip() {
        let mut settings = Settings::default();
        settings.session.show_log = true;
        settings.wireless.last_ip = Some("192.168.1.5".to_string());
        settings.ui.language = Language::Chinese;
        settings.ui.show_onboarding = false;
        settings.tools.dir = Some(PathBuf::from("/opt/scrcpy"));
        settings.tools.host_screen_width = 2560;

        assert_eq!(round_trip(&settings), settings);
    }
}
