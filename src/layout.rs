use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Perspective camera on the z axis, looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub z: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

/// Which frustum axis the plane touches after a contain fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAxis {
    Height,
    Width,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSize {
    pub width: f32,
    pub height: f32,
    pub fit: FitAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("viewport must have positive size, got {width}x{height}")]
    Viewport { width: f32, height: f32 },
    #[error("camera field of view must be within (0, 180) degrees, got {0}")]
    FieldOfView(f32),
    #[error("image aspect ratio must be positive, got {0}")]
    AspectRatio(f32),
    #[error("plane at depth {depth} is not in front of camera at z = {camera_z}")]
    BehindCamera { depth: f32, camera_z: f32 },
}

impl LayoutError {
    /// Stable discriminant, used to rate-limit logging per error kind.
    pub fn kind(&self) -> u8 {
        match self {
            LayoutError::Viewport { .. } => 0,
            LayoutError::FieldOfView(_) => 1,
            LayoutError::AspectRatio(_) => 2,
            LayoutError::BehindCamera { .. } => 3,
        }
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Width and height of the frustum cross-section at `depth_offset`.
pub fn visible_extent(
    viewport: Viewport,
    camera: Camera,
    depth_offset: f32,
) -> Result<(f32, f32), LayoutError> {
    if !positive(viewport.width) || !positive(viewport.height) {
        return Err(LayoutError::Viewport { width: viewport.width, height: viewport.height });
    }
    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(LayoutError::FieldOfView(camera.fov));
    }
    let distance = camera.z - depth_offset;
    if !positive(distance) {
        return Err(LayoutError::BehindCamera { depth: depth_offset, camera_z: camera.z });
    }

    let visible_height = 2.0 * distance * (camera.fov.to_radians() / 2.0).tan();
    let visible_width = visible_height * viewport.aspect();
    Ok((visible_width, visible_height))
}

/// Contain-fits an image of `image_aspect_ratio` into the frustum at `depth_offset`.
///
/// The result keeps the image aspect ratio and touches the frustum on exactly
/// one axis: the height when the view is relatively wider than the image, the
/// width otherwise.
pub fn compute_plane_size(
    viewport: Viewport,
    camera: Camera,
    image_aspect_ratio: f32,
    depth_offset: f32,
) -> Result<PlaneSize, LayoutError> {
    if !positive(image_aspect_ratio) {
        return Err(LayoutError::AspectRatio(image_aspect_ratio));
    }
    let (visible_width, visible_height) = visible_extent(viewport, camera, depth_offset)?;

    if visible_width / visible_height > image_aspect_ratio {
        let height = visible_height;
        Ok(PlaneSize { width: height * image_aspect_ratio, height, fit: FitAxis::Height })
    } else {
        let width = visible_width;
        Ok(PlaneSize { width, height: width / image_aspect_ratio, fit: FitAxis::Width })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAMERA: Camera = Camera { z: 7.0, fov: 60.0 };

    #[test]
    fn square_image_in_landscape_fits_height() {
        let size = compute_plane_size(Viewport::new(1600.0, 900.0), CAMERA, 1.0, 0.0).unwrap();
        let (_, visible_height) = visible_extent(Viewport::new(1600.0, 900.0), CAMERA, 0.0).unwrap();
        assert_eq!(size.fit, FitAxis::Height);
        assert!((size.height - visible_height).abs() < 1e-5);
        assert!((size.width - size.height).abs() < 1e-5);
    }

    #[test]
    fn farther_layers_get_larger_planes() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let near = compute_plane_size(viewport, CAMERA, 16.0 / 9.0, 0.0).unwrap();
        let far = compute_plane_size(viewport, CAMERA, 16.0 / 9.0, -2.0).unwrap();
        let ratio = far.height / near.height;
        assert!((ratio - 9.0 / 7.0).abs() < 1e-5);
    }

    #[test]
    fn equal_aspects_take_width_branch() {
        let size = compute_plane_size(Viewport::new(100.0, 100.0), CAMERA, 1.0, 0.0).unwrap();
        assert_eq!(size.fit, FitAxis::Width);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(
            compute_plane_size(Viewport::new(0.0, 600.0), CAMERA, 1.0, 0.0),
            Err(LayoutError::Viewport { width: 0.0, height: 600.0 })
        );
        assert_eq!(
            compute_plane_size(viewport, CAMERA, 0.0, 0.0),
            Err(LayoutError::AspectRatio(0.0))
        );
        assert_eq!(
            compute_plane_size(viewport, Camera { z: 7.0, fov: 180.0 }, 1.0, 0.0),
            Err(LayoutError::FieldOfView(180.0))
        );
        assert_eq!(
            compute_plane_size(viewport, CAMERA, 1.0, 7.0),
            Err(LayoutError::BehindCamera { depth: 7.0, camera_z: 7.0 })
        );
    }
}
