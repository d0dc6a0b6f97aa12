//! Benchmark profiles for the Fleck attribute storage engine.
//!
//! Provides pre-built store sizes and a helper that runs a simple particle
//! integration step, shared by the criterion benches:
//!
//! - [`REFERENCE_ROWS`]: 10K particles
//! - [`STRESS_ROWS`]: 1M particles
//! - [`integrate`]: advance positions by velocity for every live particle

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fleck_arena::Window;
use fleck_core::Float3;

/// Row count of the reference profile.
pub const REFERENCE_ROWS: usize = 10_000;

/// Row count of the stress profile.
pub const STRESS_ROWS: usize = 1_000_000;

/// Advance `position` by `velocity * dt` for every row whose `alive` byte
/// is non-zero.
///
/// Panics if the window's schema lacks `position`, `velocity` (float3) or
/// `alive` (byte).
pub fn integrate(window: &mut Window<'_>, dt: f32) {
    let mut columns = window.columns_mut();
    let velocity: &[Float3] = columns.take_named::<Float3>("velocity");
    let alive: &[u8] = columns.take_named::<u8>("alive");
    let positions = columns.take_named::<Float3>("position");
    for ((p, v), &a) in positions.iter_mut().zip(velocity).zip(alive) {
        if a != 0 {
            p.x += v.x * dt;
            p.y += v.y * dt;
            p.z += v.z * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleck_arena::BufferStore;
    use fleck_test_utils::fixtures::particle_schema;

    #[test]
    fn integrate_moves_only_live_particles() {
        let mut store = BufferStore::new_independent(particle_schema(), 4).unwrap();
        let mut window = store.slice_all();
        window.init_all_defaults();
        window.get_named_mut::<u8>("alive")[2] = 0;
        integrate(&mut window, 0.5);
        let z: Vec<f32> = window.get_named::<Float3>("position").iter().map(|p| p.z).collect();
        assert_eq!(z, vec![0.5, 0.5, 0.0, 0.5]);
    }
}
