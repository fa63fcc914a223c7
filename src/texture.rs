//! Texture evaluation.
//!
//! A texture maps surface coordinates plus a world-space position to a
//! color. Evaluation is a pure function: no side effects, no randomness.

use glam::Vec3A;

use crate::material::Color;

/// Texture variants for surface color lookup.
#[derive(Debug, Clone)]
pub enum Texture {
    /// Constant color, independent of position.
    SolidColor(
        /// The color returned for every lookup.
        Color,
    ),

    /// 3D checkerboard of two sub-textures over world-space unit cells.
    ///
    /// Evaluated on the world position rather than surface coordinates so
    /// the pattern is continuous across a primitive's surface.
    Checker {
        /// Reciprocal of the lattice cell size.
        inv_scale: f32,
        /// Sub-texture for even lattice cells.
        even: Box<Texture>,
        /// Sub-texture for odd lattice cells.
        odd: Box<Texture>,
    },
}

impl Texture {
    /// Create a checker texture of two solid colors with the given cell size.
    pub fn checker(scale: f32, even: Color, odd: Color) -> Self {
        Texture::Checker {
            inv_scale: 1.0 / scale,
            even: Box::new(Texture::SolidColor(even)),
            odd: Box::new(Texture::SolidColor(odd)),
        }
    }

    /// Evaluate the texture at surface coordinates (u, v) and world point p.
    pub fn value(&self, u: f32, v: f32, p: Vec3A) -> Color {
        match self {
            Texture::SolidColor(albedo) => *albedo,
            Texture::Checker {
                inv_scale,
                even,
                odd,
            } => {
                // Floored lattice coordinates so negative positions
                // alternate correctly.
                let x = (inv_scale * p.x).floor() as i32;
                let y = (inv_scale * p.y).floor() as i32;
                let z = (inv_scale * p.z).floor() as i32;

                if (x + y + z).rem_euclid(2) == 0 {
                    even.value(u, v, p)
                } else {
                    odd.value(u, v, p)
                }
            }
        }
    }
}
