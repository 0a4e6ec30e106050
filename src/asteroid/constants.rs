/// Body size constants - the power law is calibrated so the home body and the
/// last catalogued body land on their reference lot counts
pub mod size {
    /// Radius of the home body (id 1) in km
    pub const MAX_RADIUS: f64 = 375.142;
    /// Radius of the last catalogued body (id 250000) in km
    pub const MIN_RADIUS: f64 = 1.023_703_493_398_875_6;
    /// Radius falls off as id^-RADIUS_EXPONENT
    pub const RADIUS_EXPONENT: f64 = 0.475;
    /// Number of bodies in the reference catalog
    pub const TOTAL_ASTEROIDS: u64 = 250_000;
    /// Identifier of the home body
    pub const HOME_ASTEROID_ID: u64 = 1;
    /// Size class upper bounds (km, inclusive)
    pub const SMALL_MAX_RADIUS: f64 = 5.0;
    pub const MEDIUM_MAX_RADIUS: f64 = 20.0;
    pub const LARGE_MAX_RADIUS: f64 = 50.0;
}

/// Bulk density per spectral component in kg/m^3
/// Compound classes average their components
pub mod density {
    pub const C: f64 = 1400.0;
    pub const S: f64 = 2700.0;
    pub const M: f64 = 5300.0;
    pub const I: f64 = 1000.0;
}

/// Spherical lattice constants
pub mod lattice {
    /// Golden angle π(3 - √5) in radians, the azimuth step between lattice points
    pub const GOLDEN_ANGLE: f64 = 2.399963229728653;
}

/// Region partition constants
pub mod regions {
    /// Regions never drop below this count, even for tiny bodies
    pub const MIN_LOT_REGIONS: u32 = 100;
    /// Upper bound on regions for the largest bodies
    pub const MAX_LOT_REGIONS: u32 = 5000;
    /// Target lots per region before saturation
    pub const LOTS_PER_REGION: u32 = 100;
    /// Covering radius of the region lattice as a multiple of its mean spacing
    /// Measured worst case is ~0.77; this keeps a wide margin
    pub const COVER_FACTOR: f64 = 1.25;
}

/// Surface travel (hopper) constants
pub mod travel {
    /// Cruise speed in km/s (2.5 km/h)
    pub const MAX_SPEED: f64 = 1.0 / 1440.0;
    /// Time to reach cruise speed from rest, in seconds
    pub const SPIN_UP_TIME: f64 = 0.25;
    /// Constant acceleration/deceleration in km/s^2
    pub const ACCELERATION: f64 = MAX_SPEED / SPIN_UP_TIME;
    /// Effective distances are compared at this many decimals (0.1 m)
    pub const DISTANCE_DECIMALS: i32 = 4;
    /// Trips up to this effective distance (km) are handled by free local transport
    pub const FREE_TRANSPORT_RADIUS: f64 = 5.0;
}

/// Abundance field constants
pub mod abundance {
    /// Number of raw resource slots in a packed blob
    pub const RESOURCE_SLOTS: usize = 22;
    /// Slots stored per 128-bit half of the blob
    pub const SLOTS_PER_HALF: usize = 11;
    /// Bits per slot (thousandths of abundance)
    pub const SLOT_BITS: u32 = 10;
    /// Maximum absolute point shift applied before sampling noise
    pub const POINT_SHIFT_RANGE: f64 = 25.0;
    /// Point scale is drawn from [POINT_SCALE_MIN, POINT_SCALE_MIN + POINT_SCALE_SPAN)
    pub const POINT_SCALE_MIN: f64 = 0.75;
    pub const POINT_SCALE_SPAN: f64 = 0.5;
    /// Seed of the first fBm octave; octave `k` uses `NOISE_SEED + k`.
    /// Per-body variation comes from point shifts.
    pub const NOISE_SEED: u32 = 0;
    /// Weight ratio between successive octaves
    pub const FBM_PERSISTENCE: f64 = 0.5;
    /// Frequency ratio between successive octaves
    pub const FBM_LACUNARITY: f64 = 2.0;
    /// Ceiling on the surface mean a blob abundance can request
    pub const MAX_MEAN_ABUNDANCE: f64 = 0.6;
    /// Supported octave counts
    pub const MIN_OCTAVES: u32 = 1;
    pub const MAX_OCTAVES: u32 = 6;
    /// Surface-area thresholds selecting octave tiers, largest first
    pub const OCTAVE_TIERS: [(u32, u32); 4] = [(500_000, 6), (100_000, 5), (30_000, 4), (5_000, 3)];
    /// Octaves for bodies below every tier
    pub const MIN_TIER_OCTAVES: u32 = 2;

    /// Degree-7 correction polynomials (ascending powers) per octave count,
    /// least-squares fits of the normal CDF at the fBm spread for that count.
    /// Index 0 is unused.
    pub const SIMPLEX_POLY_FIT: [[f64; 8]; 7] = [
        [0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.5, 1.406393, 0.0, -2.58283, 0.0, 2.977366, 0.0, -1.323241],
        [0.5, 1.834419, 0.0, -5.010864, 0.0, 7.182921, 0.0, -3.573718],
        [0.5, 2.043146, 0.0, -6.389953, 0.0, 9.729756, 0.0, -4.979803],
        [0.5, 2.147114, 0.0, -7.0929, 0.0, 11.043181, 0.0, -5.710091],
        [0.5, 2.199148, 0.0, -7.443061, 0.0, 11.696688, 0.0, -6.073389],
        [0.5, 2.225212, 0.0, -7.617363, 0.0, 12.021193, 0.0, -6.253577],
    ];
}

/// Batch evaluation constants
pub mod batch {
    /// Batches at least this long are spread over the rayon pool
    pub const PARALLEL_THRESHOLD: usize = 2048;
    /// 32-bit words per packed asteroid record
    pub const WORDS_PER_RECORD: usize = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceleration_matches_spin_up() {
        assert!((travel::ACCELERATION * travel::SPIN_UP_TIME - travel::MAX_SPEED).abs() < 1e-15);
    }

    #[test]
    fn test_golden_angle() {
        let expected = std::f64::consts::PI * (3.0 - 5.0f64.sqrt());
        assert_eq!(lattice::GOLDEN_ANGLE, expected);
    }

    #[test]
    fn test_min_radius_matches_power_law() {
        let last = size::MAX_RADIUS / (size::TOTAL_ASTEROIDS as f64).powf(size::RADIUS_EXPONENT);
        assert!((last - size::MIN_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn test_octave_tiers_descending() {
        let tiers = abundance::OCTAVE_TIERS;
        for pair in tiers.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
        assert!(tiers[tiers.len() - 1].1 > abundance::MIN_TIER_OCTAVES);
    }

    #[test]
    fn test_poly_fit_is_monotonic_near_center() {
        for octaves in 1..=abundance::MAX_OCTAVES as usize {
            let c = abundance::SIMPLEX_POLY_FIT[octaves];
            assert_eq!(c[0], 0.5);
            assert!(c[1] > 0.0, "slope at zero must be positive for {} octaves", octaves);
        }
    }
}
