//! Assembling six face images into one cube-map image.

use std::path::Path;

use image::RgbaImage;
use skypick_core::CubeSource;

use crate::error::{RenderError, RenderResult};

/// Number of faces in a cube map.
pub const FACE_COUNT: usize = 6;

/// Reads an image file and converts it to RGBA8.
pub fn load_rgba(path: &Path) -> RenderResult<RgbaImage> {
    let image = image::open(path).map_err(|source| RenderError::ImageLoadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded image {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgba8())
}

/// Six square RGBA8 faces of equal size stored as consecutive layers.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeImage {
    size: u32,
    data: Vec<u8>,
}

impl CubeImage {
    /// Copies six faces, in layer order, into one image.
    pub fn from_faces(faces: &[RgbaImage]) -> RenderResult<Self> {
        if faces.len() != FACE_COUNT {
            return Err(RenderError::CubeFaceCount(faces.len()));
        }

        let (width, height) = faces[0].dimensions();
        for (face, image) in faces.iter().enumerate() {
            let (actual_width, actual_height) = image.dimensions();
            if actual_width != width || actual_height != height || width != height || width == 0 {
                return Err(RenderError::CubeFaceMismatch {
                    face,
                    width,
                    height: width,
                    actual_width,
                    actual_height,
                });
            }
        }

        let mut data = Vec::with_capacity(faces.iter().map(|f| f.as_raw().len()).sum());
        for image in faces {
            data.extend_from_slice(image.as_raw());
        }
        Ok(Self { size: width, data })
    }

    /// Splits a horizontal strip of six square faces.
    pub fn from_strip(strip: &RgbaImage) -> RenderResult<Self> {
        let (width, height) = strip.dimensions();
        let face_size = height;
        if face_size == 0 || width != face_size * 6 {
            return Err(RenderError::CubeFaceMismatch {
                face: 0,
                width: face_size * 6,
                height: face_size,
                actual_width: width,
                actual_height: height,
            });
        }

        let faces: Vec<RgbaImage> = (0..6)
            .map(|i| image::imageops::crop_imm(strip, i * face_size, 0, face_size, face_size).to_image())
            .collect();
        Self::from_faces(&faces)
    }

    /// Loads the images named by `source` under `root`.
    pub fn load(source: &CubeSource, root: &Path) -> RenderResult<Self> {
        let paths = source.paths(root);
        match source {
            CubeSource::Faces { .. } => {
                let faces = paths
                    .iter()
                    .map(|path| load_rgba(path))
                    .collect::<RenderResult<Vec<_>>>()?;
                Self::from_faces(&faces)
            }
            CubeSource::Strip { .. } => {
                let path = paths.first().ok_or(RenderError::CubeFaceCount(0))?;
                Self::from_strip(&load_rgba(path)?)
            }
        }
    }

    /// Every face filled with one color.
    #[must_use]
    pub fn solid(size: u32, color: [u8; 4]) -> Self {
        let texels = size as usize * size as usize * FACE_COUNT;
        Self {
            size,
            data: color.repeat(texels),
        }
    }

    /// Edge length of each face in texels.
    #[must_use]
    pub fn face_size(&self) -> u32 {
        self.size
    }

    /// All faces, layer after layer.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes of a single face.
    #[must_use]
    pub fn layer(&self, index: usize) -> Option<&[u8]> {
        let len = self.layer_len();
        self.data.get(index * len..(index + 1) * len)
    }

    fn layer_len(&self) -> usize {
        self.size as usize * self.size as usize * 4
    }
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn face(size: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([value, value, value, 255]))
    }

    #[test]
    fn test_faces_are_stacked_in_order() {
        let faces: Vec<_> = (0..6).map(|i| face(4, i * 10)).collect();
        let cube = CubeImage::from_faces(&faces).unwrap();
        assert_eq!(cube.face_size(), 4);
        assert_eq!(cube.data().len(), 4 * 4 * 4 * 6);
        for i in 0..6 {
            let layer = cube.layer(i).unwrap();
            #[allow(clippy::cast_possible_truncation)]
            let expected = i as u8 * 10;
            assert!(layer.chunks_exact(4).all(|px| px[0] == expected));
        }
        assert!(cube.layer(6).is_none());
    }

    #[test]
    fn test_mismatched_face_is_rejected() {
        let mut faces: Vec<_> = (0..6).map(|_| face(4, 0)).collect();
        faces[3] = face(8, 0);
        let err = CubeImage::from_faces(&faces).unwrap_err();
        assert!(matches!(
            err,
            RenderError::CubeFaceMismatch {
                face: 3,
                actual_width: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_non_square_faces_are_rejected() {
        let faces: Vec<_> = (0..6).map(|_| RgbaImage::new(4, 2)).collect();
        assert!(CubeImage::from_faces(&faces).is_err());
    }

    #[test]
    fn test_wrong_face_count() {
        let faces: Vec<_> = (0..5).map(|_| face(2, 0)).collect();
        assert!(matches!(
            CubeImage::from_faces(&faces),
            Err(RenderError::CubeFaceCount(5))
        ));
    }

    #[test]
    fn test_strip_is_split_into_faces() {
        let mut strip = RgbaImage::new(12, 2);
        for (x, _, px) in strip.enumerate_pixels_mut() {
            #[allow(clippy::cast_possible_truncation)]
            let face = (x / 2) as u8;
            *px = Rgba([face, 0, 0, 255]);
        }
        let cube = CubeImage::from_strip(&strip).unwrap();
        assert_eq!(cube.face_size(), 2);
        assert_eq!(cube.layer(5).unwrap()[0], 5);
        assert_eq!(cube.layer(2).unwrap()[0], 2);
    }

    #[test]
    fn test_strip_with_wrong_aspect() {
        assert!(CubeImage::from_strip(&RgbaImage::new(10, 2)).is_err());
    }

    #[test]
    fn test_solid_cube() {
        let cube = CubeImage::solid(2, [1, 2, 3, 4]);
        assert_eq!(cube.data().len(), 2 * 2 * 4 * 6);
        assert_eq!(&cube.layer(4).unwrap()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let source = CubeSource::Strip {
            file: "missing.png".to_string(),
        };
        let err = CubeImage::load(&source, Path::new("/nonexistent")).unwrap_err();
        assert!(err.to_string().contains("missing.png"));
    }
}
