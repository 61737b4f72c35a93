/// SIMD-accelerated vector math from [`glam`].
///
/// Pointer positions, deltas and grab offsets are all [`Vec2`].
///
/// ```
/// use dockyard_core::math::Vec2;
///
/// let pointer = Vec2::new(120.0, 40.0);
/// let origin = Vec2::new(100.0, 30.0);
/// assert_eq!(pointer - origin, Vec2::new(20.0, 10.0));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::Vec2;
