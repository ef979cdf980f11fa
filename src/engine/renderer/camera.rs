// Fixed orthographic camera over the logical canvas

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Maps canvas pixels (origin top-left, y down) to clip space. The canvas
/// keeps its logical size and is stretched over whatever the window is.
#[derive(Debug, Clone)]
pub struct Camera {
    view_proj: Mat4,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            view_proj: Mat4::orthographic_rh(0.0, width, height, 0.0, -1.0, 1.0),
        }
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
