//! Runtime configuration for `cloth_demo`.
//!
//! A [`DemoConfig`] is resolved from, in increasing precedence: built-in
//! defaults, an optional TOML file, then CLI flags.
//!
//! ```toml
//! [cloth]
//! points_x = 20
//! points_y = 20
//! brush_size = 45.0
//!
//! [cloth.tuning]
//! jitter = 20.0
//!
//! [mesh]
//! width = 400.0
//! height = 300.0
//!
//! [run]
//! frames = 600
//! strokes = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use cloth::{ClothConfig, MeshLayout};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Errors loading a config file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`DemoConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Mesh and viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Mesh width in pixels.
    pub width: f32,
    /// Mesh height in pixels.
    pub height: f32,
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            width: 490.0,
            height: 490.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl MeshSettings {
    /// The mesh centred in the viewport.
    pub fn layout(&self) -> MeshLayout {
        MeshLayout::centered(
            self.width,
            self.height,
            self.viewport_width,
            self.viewport_height,
        )
    }
}

/// Frame loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Frames to simulate.
    pub frames: u32,
    /// Frames per second of the simulated clock.
    pub fps: u32,
    /// Pointer strokes played after the reveal.
    pub strokes: u32,
    /// Frames per stroke.
    pub stroke_frames: u32,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            frames: 480,
            fps: 60,
            strokes: 3,
            stroke_frames: 30,
        }
    }
}

impl RunSettings {
    /// Seconds per frame.
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

/// Everything the demo needs to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Cloth settings.
    pub cloth: ClothConfig,
    /// Mesh placement.
    pub mesh: MeshSettings,
    /// Frame loop.
    pub run: RunSettings,
}

impl DemoConfig {
    /// Loads a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the config from CLI arguments, loading `--config` if given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file fails to load.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Applies CLI overrides on top of the current values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.cloth.seed = Some(seed);
        }
        if let Some(points_x) = cli.points_x {
            self.cloth.points_x = points_x;
        }
        if let Some(points_y) = cli.points_y {
            self.cloth.points_y = points_y;
        }
        if let Some(brush_size) = cli.brush_size {
            self.cloth.brush_size = brush_size;
        }
        if cli.pin_corners {
            self.cloth.pin_corners = true;
        }
        if let Some(width) = cli.width {
            self.mesh.width = width;
        }
        if let Some(height) = cli.height {
            self.mesh.height = height;
        }
        if let Some(frames) = cli.frames {
            self.run.frames = frames;
        }
        if let Some(fps) = cli.fps {
            self.run.fps = fps;
        }
        if let Some(strokes) = cli.strokes {
            self.run.strokes = strokes;
        }
    }

    /// Seed for strokes and animation.
    ///
    /// If None was configured, one is derived from the current time.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Seed truncation is acceptable"
    )]
    pub fn effective_seed(&self) -> u64 {
        self.cloth.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(42, |d| d.as_nanos() as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_layout_centered() {
        let layout = MeshSettings::default().layout();
        assert_eq!(layout.origin(), (395.0, 115.0));
    }

    #[test]
    fn test_frame_delta() {
        let run = RunSettings {
            fps: 50,
            ..RunSettings::default()
        };
        assert!((run.frame_delta() - 0.02).abs() < 1e-6);
        let run = RunSettings {
            fps: 0,
            ..RunSettings::default()
        };
        assert_eq!(run.frame_delta(), 1.0);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cloth]\npoints_x = 8\n\n[cloth.tuning]\njitter = 12.0\n\n[run]\nframes = 90\n"
        )
        .unwrap();

        let config = DemoConfig::load(file.path()).unwrap();
        assert_eq!(config.cloth.points_x, 8);
        assert_eq!(config.cloth.points_y, 50);
        assert_eq!(config.cloth.tuning.jitter, 12.0);
        assert_eq!(config.run.frames, 90);
        assert_eq!(config.run.fps, 60);
        assert_eq!(config.mesh, MeshSettings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DemoConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_load_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cloth\npoints_x = ").unwrap();
        let err = DemoConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cloth]\npoints_x = 8\nseed = 1\n").unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            seed: Some(5),
            points_x: Some(20),
            pin_corners: true,
            ..Cli::default()
        };
        let config = DemoConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cloth.points_x, 20);
        assert_eq!(config.cloth.seed, Some(5));
        assert!(config.cloth.pin_corners);
        assert_eq!(config.effective_seed(), 5);
    }
}
