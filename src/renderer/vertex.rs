//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const SKY_HAZE: [f32; 4] = [0.6, 0.85, 0.91, 1.0];
    pub const MEADOW: [f32; 4] = [0.56, 0.93, 0.56, 1.0];
    pub const FOREST: [f32; 4] = [0.13, 0.55, 0.13, 1.0];
    pub const MOUNTAIN: [f32; 4] = [0.27, 0.51, 0.71, 1.0];
    pub const CLOUD: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const TRUNK: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const LEAVES: [f32; 4] = [0.13, 0.55, 0.13, 1.0];
    pub const LEAVES_LIGHT: [f32; 4] = [0.2, 0.8, 0.2, 1.0];

    pub const ROAD_EDGE: [f32; 4] = [0.18, 0.18, 0.18, 1.0];
    pub const ROAD_CENTER: [f32; 4] = [0.31, 0.31, 0.31, 1.0];
    pub const ROAD_BORDER: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const SHOULDER: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const LANE_DASH: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const ROAD_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];

    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.3];
    pub const PLAYER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Indexed by `Obstacle::color`
    pub const OBSTACLES: [[f32; 4]; 4] = [
        [0.0, 0.0, 1.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [1.0, 1.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
    ];
    pub const WINDSHIELD: [f32; 4] = [0.53, 0.81, 0.92, 0.8];
    pub const TIRE: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
    pub const RIM: [f32; 4] = [0.75, 0.75, 0.75, 1.0];
    pub const HEADLIGHT: [f32; 4] = [1.0, 1.0, 0.6, 1.0];
    pub const TAILLIGHT: [f32; 4] = [1.0, 0.27, 0.27, 1.0];
    pub const STRIPE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const COIN_INNER: [f32; 4] = [1.0, 0.93, 0.31, 1.0];
    pub const COIN_RIM: [f32; 4] = [0.72, 0.53, 0.04, 1.0];
    pub const COIN_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 0.6];

    pub const PAUSE_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const BACKGROUND: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
}

/// Lighten an RGB color toward white by `amount` (0..1)
pub fn lighten(color: [f32; 4], amount: f32) -> [f32; 4] {
    let [r, g, b, a] = color;
    [
        r + (1.0 - r) * amount,
        g + (1.0 - g) * amount,
        b + (1.0 - b) * amount,
        a,
    ]
}

/// Darken an RGB color toward black by `amount` (0..1)
pub fn darken(color: [f32; 4], amount: f32) -> [f32; 4] {
    let [r, g, b, a] = color;
    let k = 1.0 - amount;
    [r * k, g * k, b * k, a]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [f32; 4] = [0.2, 0.5, 0.8, 0.6];

    #[test]
    fn test_lighten_endpoints() {
        assert_eq!(lighten(SAMPLE, 0.0), SAMPLE);
        let white = lighten(SAMPLE, 1.0);
        for channel in &white[..3] {
            assert!((channel - 1.0).abs() < 1e-6);
        }
        assert_eq!(white[3], 0.6);
    }

    #[test]
    fn test_darken_endpoints() {
        assert_eq!(darken(SAMPLE, 0.0), SAMPLE);
        assert_eq!(darken(SAMPLE, 1.0), [0.0, 0.0, 0.0, 0.6]);
    }

    #[test]
    fn test_halfway_keeps_alpha() {
        let light = lighten(colors::COIN, 0.5);
        let dark = darken(colors::COIN, 0.5);
        assert_eq!(light[3], colors::COIN[3]);
        assert_eq!(dark[3], colors::COIN[3]);
        for i in 0..3 {
            assert!(light[i] >= colors::COIN[i]);
            assert!(dark[i] <= colors::COIN[i]);
        }
    }
}
