//! Skybox presets and where their cube faces come from.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SkypickError;

/// The selectable skyboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkyboxPreset {
    /// Evening sky, six face images.
    #[default]
    Daylight,
    /// Sunset sky, six face images.
    Sunset,
    /// Desert, one horizontal strip.
    Desert,
}

impl SkyboxPreset {
    /// All presets in combo-box order.
    pub const ALL: [SkyboxPreset; 3] = [
        SkyboxPreset::Daylight,
        SkyboxPreset::Sunset,
        SkyboxPreset::Desert,
    ];

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SkyboxPreset::Daylight => "Daylight",
            SkyboxPreset::Sunset => "Sunset",
            SkyboxPreset::Desert => "Desert",
        }
    }

    /// Position in [`SkyboxPreset::ALL`].
    #[must_use]
    pub fn to_index(self) -> usize {
        match self {
            SkyboxPreset::Daylight => 0,
            SkyboxPreset::Sunset => 1,
            SkyboxPreset::Desert => 2,
        }
    }

    /// Preset at `index` in [`SkyboxPreset::ALL`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Where the faces of this preset come from by default.
    #[must_use]
    pub fn default_source(self) -> CubeSource {
        match self {
            SkyboxPreset::Daylight => CubeSource::Faces {
                stem: "evening_".to_string(),
                extension: "png".to_string(),
            },
            SkyboxPreset::Sunset => CubeSource::Faces {
                stem: "sunset".to_string(),
                extension: "bmp".to_string(),
            },
            SkyboxPreset::Desert => CubeSource::Strip {
                file: "desertcube1024.png".to_string(),
            },
        }
    }
}

impl fmt::Display for SkyboxPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SkyboxPreset {
    type Err = SkypickError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SkypickError::UnknownSkybox(s.to_string()))
    }
}

/// Faces of a cube map, in array-layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    /// All faces in layer order (+X, -X, +Y, -Y, +Z, -Z).
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Array layer of this face.
    #[must_use]
    pub fn layer(self) -> u32 {
        match self {
            CubeFace::PositiveX => 0,
            CubeFace::NegativeX => 1,
            CubeFace::PositiveY => 2,
            CubeFace::NegativeY => 3,
            CubeFace::PositiveZ => 4,
            CubeFace::NegativeZ => 5,
        }
    }
}

/// Image files a cube map is assembled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CubeSource {
    /// Six files named `{stem}{layer}.{extension}`.
    Faces { stem: String, extension: String },
    /// One image holding the six faces side by side, in layer order.
    Strip { file: String },
}

impl CubeSource {
    /// Resolves the file paths under `root`, in layer order for `Faces`.
    #[must_use]
    pub fn paths(&self, root: &Path) -> Vec<PathBuf> {
        match self {
            CubeSource::Faces { stem, extension } => CubeFace::ALL
                .iter()
                .map(|face| root.join(format!("{stem}{}.{extension}", face.layer())))
                .collect(),
            CubeSource::Strip { file } => vec![root.join(file)],
        }
    }
}

/// A preset together with the files it is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyboxConfig {
    /// Which preset this entry configures.
    pub preset: SkyboxPreset,
    /// Source images, relative to the asset root.
    pub source: CubeSource,
}

impl SkyboxConfig {
    /// The built-in configuration for `preset`.
    #[must_use]
    pub fn for_preset(preset: SkyboxPreset) -> Self {
        Self {
            preset,
            source: preset.default_source(),
        }
    }

    /// Built-in configurations for every preset.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        SkyboxPreset::ALL.into_iter().map(Self::for_preset).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_index_roundtrip() {
        for (i, preset) in SkyboxPreset::ALL.iter().enumerate() {
            assert_eq!(preset.to_index(), i);
            assert_eq!(SkyboxPreset::from_index(i), Some(*preset));
        }
        assert_eq!(SkyboxPreset::from_index(3), None);
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("sunset".parse::<SkyboxPreset>().unwrap(), SkyboxPreset::Sunset);
        assert_eq!("Desert".parse::<SkyboxPreset>().unwrap(), SkyboxPreset::Desert);
        let err = "Night".parse::<SkyboxPreset>().unwrap_err();
        assert!(matches!(err, SkypickError::UnknownSkybox(ref name) if name == "Night"));
    }

    #[test]
    fn test_face_paths_follow_layer_order() {
        let source = SkyboxPreset::Daylight.default_source();
        let paths = source.paths(Path::new("assets"));
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], Path::new("assets").join("evening_0.png"));
        assert_eq!(paths[5], Path::new("assets").join("evening_5.png"));

        let sunset = SkyboxPreset::Sunset.default_source().paths(Path::new("t"));
        assert_eq!(sunset[3], Path::new("t").join("sunset3.bmp"));
    }

    #[test]
    fn test_strip_is_single_file() {
        let paths = SkyboxPreset::Desert.default_source().paths(Path::new("t"));
        assert_eq!(paths, vec![Path::new("t").join("desertcube1024.png")]);
    }

    #[test]
    fn test_source_json_is_tagged() {
        let json = serde_json::to_string(&SkyboxPreset::Desert.default_source()).unwrap();
        assert!(json.contains(r#""kind":"strip""#));
        let config: SkyboxConfig = serde_json::from_str(
            r#"{"preset": "Sunset", "source": {"kind": "faces", "stem": "dusk_", "extension": "jpg"}}"#,
        )
        .unwrap();
        assert_eq!(config.source.paths(Path::new(""))[1], PathBuf::from("dusk_1.jpg"));
    }

    #[test]
    fn test_defaults_cover_all_presets() {
        let defaults = SkyboxConfig::defaults();
        assert_eq!(defaults.len(), SkyboxPreset::ALL.len());
        assert_eq!(defaults[2].preset, SkyboxPreset::Desert);
    }
}
