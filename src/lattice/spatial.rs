//! Region partition and k-nearest lot search
//!
//! Region centers are a small golden-angle lattice of their own, bucketed
//! in a latitude/longitude hash grid. Every lot belongs to the region whose
//! center is nearest. Nearest-lot queries grow a ring of regions around the
//! query's home region until the k-th best lot is provably closer than any
//! lot outside the ring, so the work scales with the ring rather than the
//! body.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::rc::Rc;

use bitvec::prelude::*;
use hashbrown::HashMap;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{checked_index, lattice_point};
use crate::asteroid::constants::{lattice::GOLDEN_ANGLE, regions};
use crate::config::EngineConfig;
use crate::error::{LotError, LotResult};
use crate::util::vec3::Vec3;

// Thread-local cache of the last region grid built for a query
thread_local! {
    /// Queries against the same body reuse one grid instead of rebuilding it
    static REGION_GRID_CACHE: RefCell<Option<Rc<RegionGrid>>> = const { RefCell::new(None) };
}

// ============================================================================
// Region Grid Constants
// ============================================================================

/// Grid cell key - (latitude row, longitude column)
pub type CellKey = (i32, i32);

/// Inline capacity for region ids per grid cell
const CELL_INLINE_CAPACITY: usize = 4;

/// Slack on angular comparisons to absorb rounding
const ANGLE_EPSILON: f64 = 1e-12;

/// Slack on the longitude prefilter, which compares θ mod 2π against atan2
const LONGITUDE_EPSILON: f64 = 1e-9;

/// Initial heap capacity for nearest-lot searches
const NEAREST_INITIAL_CAPACITY: usize = 64;

/// Number of regions for a body with `lot_tally` lots
///
/// One region per hundred lots, floored at `MIN_LOT_REGIONS` and capped at
/// `MAX_LOT_REGIONS`.
pub fn region_tally(lot_tally: u32) -> u32 {
    lot_tally
        .div_ceil(regions::LOTS_PER_REGION)
        .clamp(regions::MIN_LOT_REGIONS, regions::MAX_LOT_REGIONS)
}

/// Half-width in longitude of a spherical cap, or None if the cap holds a pole
#[inline]
fn longitude_half_width(latitude: f64, angle: f64) -> Option<f64> {
    if latitude.abs() + angle >= FRAC_PI_2 {
        return None;
    }
    Some((angle.sin() / latitude.cos()).min(1.0).asin())
}

/// Absolute longitude difference folded into [0, π]
#[inline]
fn longitude_gap(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % TAU;
    if d > PI {
        TAU - d
    } else {
        d
    }
}

fn check_position(position: Vec3) -> LotResult<Vec3> {
    if !position.is_finite() || position.length_sq() == 0.0 {
        return Err(LotError::invalid(format!(
            "position must be finite and non-zero, got ({}, {}, {})",
            position.x, position.y, position.z
        )));
    }
    Ok(position.normalize())
}

// ============================================================================
// Region Grid
// ============================================================================

/// Hash grid over region centers
#[derive(Debug, Clone)]
pub struct RegionGrid {
    region_tally: u32,
    /// Region centers, 0-based
    centers: Vec<Vec3>,
    /// Mean angular spacing between neighbouring centers
    spacing: f64,
    /// Upper bound on the angle from any point to its nearest center
    cover_radius: f64,
    /// Cell height in radians of latitude
    cell_size: f64,
    lat_cells: i32,
    lon_cells: i32,
    lon_cell_width: f64,
    cells: HashMap<CellKey, SmallVec<[u32; CELL_INLINE_CAPACITY]>>,
}

impl RegionGrid {
    /// Build the grid for `region_tally` centers
    pub fn new(region_tally: u32) -> LotResult<Self> {
        if region_tally == 0 {
            return Err(LotError::invalid("region tally must be at least 1"));
        }
        let spacing = (4.0 * PI / region_tally as f64).sqrt();
        let cell_size = spacing.min(PI);
        let lat_cells = (PI / cell_size).ceil().max(1.0) as i32;
        let lon_cells = (TAU / cell_size).ceil().max(1.0) as i32;

        let mut grid = Self {
            region_tally,
            centers: (0..region_tally)
                .map(|i| lattice_point(i, region_tally))
                .collect(),
            spacing,
            cover_radius: spacing * regions::COVER_FACTOR,
            cell_size,
            lat_cells,
            lon_cells,
            lon_cell_width: TAU / lon_cells as f64,
            cells: HashMap::with_capacity(region_tally as usize),
        };

        for id in 0..region_tally {
            let key = grid.cell_of(grid.centers[id as usize]);
            grid.cells.entry(key).or_default().push(id);
        }
        Ok(grid)
    }

    #[inline]
    pub fn region_tally(&self) -> u32 {
        self.region_tally
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[inline]
    pub fn cover_radius(&self) -> f64 {
        self.cover_radius
    }

    /// Center of a 1-based region id
    pub fn center(&self, region_id: u32) -> Option<Vec3> {
        let i0 = region_id.checked_sub(1)?;
        self.centers.get(i0 as usize).copied()
    }

    #[inline]
    fn lat_row(&self, latitude: f64) -> i32 {
        (((latitude + FRAC_PI_2) / self.cell_size).floor() as i32).clamp(0, self.lat_cells - 1)
    }

    #[inline]
    fn lon_col(&self, longitude: f64) -> i32 {
        ((longitude / self.lon_cell_width).floor() as i32).rem_euclid(self.lon_cells)
    }

    #[inline]
    fn cell_of(&self, position: Vec3) -> CellKey {
        (self.lat_row(position.latitude()), self.lon_col(position.longitude()))
    }

    /// Visit every cell that may hold a center within `angle` of `position`
    ///
    /// Each cell is visited once. One cell of margin is added on every side.
    fn for_each_cell_in_cap<F>(&self, position: Vec3, angle: f64, mut visit: F)
    where
        F: FnMut(CellKey),
    {
        let latitude = position.latitude();
        let row_lo = (self.lat_row(latitude - angle) - 1).max(0);
        let row_hi = (self.lat_row(latitude + angle) + 1).min(self.lat_cells - 1);

        let cols: SmallVec<[i32; 16]> = match longitude_half_width(latitude, angle) {
            Some(half) => {
                let longitude = position.longitude();
                let lo = ((longitude - half) / self.lon_cell_width).floor() as i32 - 1;
                let hi = ((longitude + half) / self.lon_cell_width).floor() as i32 + 1;
                if hi - lo + 1 >= self.lon_cells {
                    (0..self.lon_cells).collect()
                } else {
                    (lo..=hi).map(|c| c.rem_euclid(self.lon_cells)).collect()
                }
            }
            None => (0..self.lon_cells).collect(),
        };

        for row in row_lo..=row_hi {
            for &col in &cols {
                visit((row, col));
            }
        }
    }

    /// 0-based nearest center, ties to the lowest id
    ///
    /// Starts at the covering radius and widens only when nothing in reach
    /// is confirmed nearest. `position` must be a unit vector.
    pub(crate) fn nearest_region(&self, position: Vec3) -> u32 {
        let mut visited: FxHashSet<CellKey> = FxHashSet::default();
        let mut best: Option<(f64, u32)> = None;
        let mut radius = self.cover_radius.min(PI);

        loop {
            self.for_each_cell_in_cap(position, radius, |key| {
                if !visited.insert(key) {
                    return;
                }
                let Some(ids) = self.cells.get(&key) else {
                    return;
                };
                for &id in ids {
                    let dot = position.dot(self.centers[id as usize]);
                    let better = match best {
                        None => true,
                        Some((best_dot, best_id)) => {
                            dot > best_dot || (dot == best_dot && id < best_id)
                        }
                    };
                    if better {
                        best = Some((dot, id));
                    }
                }
            });

            match best {
                Some((dot, id)) => {
                    let angle = dot.clamp(-1.0, 1.0).acos();
                    if angle <= radius || radius >= PI {
                        return id;
                    }
                    // Anything nearer lies within the best angle found so far
                    radius = (angle + ANGLE_EPSILON).min(PI);
                }
                None => radius = (radius * 2.0).min(PI),
            }
        }
    }

    /// 1-based region of a unit-sphere position
    #[inline]
    pub fn region_of(&self, position: Vec3) -> u32 {
        self.nearest_region(position) + 1
    }

    fn for_each_region_within<F>(&self, center: Vec3, angle: f64, mut visit: F)
    where
        F: FnMut(u32),
    {
        let min_dot = angle.min(PI).cos();
        self.for_each_cell_in_cap(center, angle, |key| {
            if let Some(ids) = self.cells.get(&key) {
                for &id in ids {
                    if self.centers[id as usize].dot(center) >= min_dot - ANGLE_EPSILON {
                        visit(id);
                    }
                }
            }
        });
    }

    /// 1-based ids of regions whose centers lie within `angle` of `center`, ascending
    pub fn regions_within(&self, center: Vec3, angle: f64) -> Vec<u32> {
        let mut ids = Vec::new();
        self.for_each_region_within(center, angle, |id| ids.push(id + 1));
        ids.sort_unstable();
        ids
    }

    /// Membership bitmap (0-based) of regions within `angle` of `center`
    fn ring_mask(&self, center: Vec3, angle: f64) -> BitVec {
        let mut mask = bitvec![0; self.region_tally as usize];
        self.for_each_region_within(center, angle, |id| mask.set(id as usize, true));
        mask
    }

    /// Get statistics about the grid
    pub fn stats(&self) -> RegionGridStats {
        let non_empty_cells = self.cells.values().filter(|c| !c.is_empty()).count();
        let total_regions: usize = self.cells.values().map(|c| c.len()).sum();
        let max_per_cell = self.cells.values().map(|c| c.len()).max().unwrap_or(0);

        RegionGridStats {
            non_empty_cells,
            total_regions,
            max_per_cell,
            spacing: self.spacing,
        }
    }
}

/// Statistics about the region grid
#[derive(Debug, Clone, Serialize)]
pub struct RegionGridStats {
    pub non_empty_cells: usize,
    pub total_regions: usize,
    pub max_per_cell: usize,
    pub spacing: f64,
}

/// Region grid for `region_tally`, reused from the thread-local cache when possible
fn shared_grid(region_tally: u32) -> LotResult<Rc<RegionGrid>> {
    REGION_GRID_CACHE.with(|cache| {
        let mut slot = cache.borrow_mut();
        if let Some(grid) = slot.as_ref() {
            if grid.region_tally == region_tally {
                return Ok(Rc::clone(grid));
            }
        }
        let grid = Rc::new(RegionGrid::new(region_tally)?);
        *slot = Some(Rc::clone(&grid));
        Ok(grid)
    })
}

/// 1-based region containing `position` among `region_tally` regions
pub fn region_of(position: Vec3, region_tally: u32) -> LotResult<u32> {
    let unit = check_position(position)?;
    let grid = shared_grid(region_tally)?;
    Ok(grid.region_of(unit))
}

/// Regions of a flat `[x0, y0, z0, x1, ...]` array of positions
pub fn regions_of_positions(flat: &[f64], region_tally: u32) -> LotResult<Vec<u32>> {
    regions_of_positions_with(flat, region_tally, &EngineConfig::default())
}

pub fn regions_of_positions_with(
    flat: &[f64],
    region_tally: u32,
    config: &EngineConfig,
) -> LotResult<Vec<u32>> {
    if flat.len() % 3 != 0 {
        return Err(LotError::invalid(format!(
            "position array length {} is not a multiple of 3",
            flat.len()
        )));
    }
    let grid = RegionGrid::new(region_tally)?;
    let classify = |xyz: &[f64]| -> LotResult<u32> {
        let unit = check_position(Vec3::new(xyz[0], xyz[1], xyz[2]))?;
        Ok(grid.region_of(unit))
    };

    let count = flat.len() / 3;
    if count >= config.parallel_threshold {
        tracing::debug!(count, region_tally, "Classifying positions in parallel");
        flat.par_chunks_exact(3).map(classify).collect()
    } else {
        flat.chunks_exact(3).map(classify).collect()
    }
}

// ============================================================================
// Closest Lots
// ============================================================================

/// Where a nearest-lot query is centered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum QueryCenter {
    /// Any non-zero point; only its direction matters
    Point(Vec3),
    /// A lot of the same lattice, excluded from the results
    Lot(u32),
}

/// k-nearest lot query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosestLotsQuery {
    pub center: QueryCenter,
    pub lot_tally: u32,
    /// Number of lots to return; every lot when None
    pub find_tally: Option<u32>,
}

impl ClosestLotsQuery {
    pub fn around_point(center: Vec3, lot_tally: u32) -> Self {
        Self {
            center: QueryCenter::Point(center),
            lot_tally,
            find_tally: None,
        }
    }

    pub fn around_lot(lot_index: u32, lot_tally: u32) -> Self {
        Self {
            center: QueryCenter::Lot(lot_index),
            lot_tally,
            find_tally: None,
        }
    }

    pub fn take(mut self, find_tally: u32) -> Self {
        self.find_tally = Some(find_tally);
        self
    }
}

/// Candidate lot ranked for the bounded heap; greater means farther
#[derive(Debug, Clone, Copy)]
struct Ranked {
    dot: f64,
    /// 0-based lot index
    index: u32,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .dot
            .partial_cmp(&self.dot)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Max-heap holding the `limit` best candidates, worst on top
struct NearestHeap {
    limit: usize,
    heap: BinaryHeap<Ranked>,
}

impl NearestHeap {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            heap: BinaryHeap::with_capacity(limit.min(NEAREST_INITIAL_CAPACITY) + 1),
        }
    }

    #[inline]
    fn offer(&mut self, candidate: Ranked) {
        if self.heap.len() < self.limit {
            self.heap.push(candidate);
        } else if let Some(worst) = self.heap.peek() {
            if candidate < *worst {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.heap.len() >= self.limit
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    /// Angle to the worst kept candidate
    fn worst_angle(&self) -> Option<f64> {
        self.heap.peek().map(|r| r.dot.clamp(-1.0, 1.0).acos())
    }

    /// 1-based lot indices, nearest first
    fn into_lot_indices(self) -> Vec<u32> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|r| r.index + 1)
            .collect()
    }
}

/// Visit every lot of an `lot_tally` lattice within `angle` of `center`
///
/// Only the latitude band of the cap is walked. Inside the band a longitude
/// test on the raw spiral angle rejects most lots before their position is
/// computed.
fn for_each_lot_in_cap<F>(center: Vec3, angle: f64, lot_tally: u32, mut visit: F)
where
    F: FnMut(u32, Vec3),
{
    let latitude = center.latitude();
    let y_hi = (latitude + angle).min(FRAC_PI_2).sin();
    let y_lo = (latitude - angle).max(-FRAC_PI_2).sin();

    // y = 1 - 2i/(N-1)  =>  i = (1 - y)(N-1)/2
    let span = lot_tally.saturating_sub(1) as f64;
    let last = lot_tally as i64 - 1;
    let first_index = (((1.0 - y_hi) * span / 2.0).floor() as i64 - 1).clamp(0, last) as u32;
    let last_index = (((1.0 - y_lo) * span / 2.0).ceil() as i64 + 1).clamp(0, last) as u32;

    let half_width = longitude_half_width(latitude, angle);
    let longitude = center.longitude();
    let min_dot = angle.cos();

    for i0 in first_index..=last_index {
        // OPTIMIZATION: a lot's longitude is its spiral angle mod 2π, no trig on the point needed
        if let Some(half) = half_width {
            let theta = (GOLDEN_ANGLE * i0 as f64).rem_euclid(TAU);
            if longitude_gap(theta, longitude) > half + LONGITUDE_EPSILON {
                continue;
            }
        }
        let position = lattice_point(i0, lot_tally);
        if position.dot(center) >= min_dot {
            visit(i0, position);
        }
    }
}

fn full_scan(query: Vec3, lot_tally: u32, exclude: Option<u32>, wanted: u32) -> Vec<u32> {
    let mut nearest = NearestHeap::new(wanted as usize);
    for i0 in 0..lot_tally {
        if Some(i0) == exclude {
            continue;
        }
        nearest.offer(Ranked {
            dot: lattice_point(i0, lot_tally).dot(query),
            index: i0,
        });
    }
    nearest.into_lot_indices()
}

/// Lots nearest to a point or lot, nearest first, ties to the lower index
///
/// A center lot is never part of its own result.
pub fn closest_lots(query: &ClosestLotsQuery) -> LotResult<Vec<u32>> {
    let lot_tally = query.lot_tally;
    if lot_tally == 0 {
        return Err(LotError::invalid("lot tally must be at least 1"));
    }

    let (target, exclude) = match query.center {
        QueryCenter::Point(point) => (check_position(point)?, None),
        QueryCenter::Lot(lot_index) => {
            let i0 = checked_index(lot_index as i64, lot_tally)?;
            (lattice_point(i0, lot_tally), Some(i0))
        }
    };

    let available = lot_tally - exclude.is_some() as u32;
    let wanted = query.find_tally.map_or(available, |k| k.min(available));
    if wanted == 0 {
        return Ok(Vec::new());
    }

    // OPTIMIZATION: asking for most of the body makes every ring pass wasted work
    if wanted >= available / 2 {
        return Ok(full_scan(target, lot_tally, exclude, wanted));
    }

    let grid = shared_grid(region_tally(lot_tally))?;
    let home = grid.centers[grid.nearest_region(target) as usize];
    let home_offset = target.angle_to(home);
    let cover = grid.cover_radius;
    let mut ring_angle = grid.spacing;

    loop {
        let reach = ring_angle + cover;
        if reach >= PI {
            tracing::debug!(lot_tally, wanted, "Search ring covers the body, scanning every lot");
            return Ok(full_scan(target, lot_tally, exclude, wanted));
        }

        let ring = grid.ring_mask(home, ring_angle);
        let mut nearest = NearestHeap::new(wanted as usize);
        for_each_lot_in_cap(home, reach, lot_tally, |i0, position| {
            if Some(i0) == exclude {
                return;
            }
            // Lots deep inside or far outside the ring skip the region lookup
            let from_home = position.angle_to(home);
            let in_ring = if from_home <= ring_angle - cover {
                true
            } else if from_home > reach {
                false
            } else {
                ring[grid.nearest_region(position) as usize]
            };
            if in_ring {
                nearest.offer(Ranked {
                    dot: position.dot(target),
                    index: i0,
                });
            }
        });

        // Lots outside the ring are farther than ring_angle - cover - home_offset
        if nearest.is_full() {
            if let Some(worst) = nearest.worst_angle() {
                if worst + ANGLE_EPSILON <= ring_angle - cover - home_offset {
                    return Ok(nearest.into_lot_indices());
                }
            }
        }

        tracing::debug!(
            ring_angle,
            found = nearest.len(),
            wanted,
            "Widening closest-lot search ring"
        );
        ring_angle *= 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asteroid::size::surface_area;
    use crate::lattice::lot_position;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn brute_force(target: Vec3, lot_tally: u32, exclude: Option<u32>, k: u32) -> Vec<u32> {
        full_scan(target.normalize(), lot_tally, exclude, k)
    }

    fn random_unit(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = Vec3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let len_sq = v.length_sq();
            if len_sq > 1e-6 && len_sq <= 1.0 {
                return v.normalize();
            }
        }
    }

    #[test]
    fn test_region_tally() {
        assert_eq!(region_tally(1), 100);
        assert_eq!(region_tally(12), 100);
        assert_eq!(region_tally(12_345), 124);
        assert_eq!(region_tally(1_234_567), 5000);
        assert_eq!(region_tally(1_768_484), 5000);
        let mut prev = 0;
        for n in (0..2_000_000).step_by(997) {
            let r = region_tally(n);
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn test_region_fixtures() {
        let cases: [(u64, [u32; 5], [u32; 5]); 2] = [
            (1, [1, 101, 25235, 122222, 1_768_484], [1, 1, 60, 363, 5000]),
            (404, [1, 101, 423, 5432, 5909], [1, 4, 12, 86, 100]),
        ];
        for (body, lots, expected) in cases {
            let tally = region_tally(surface_area(body).unwrap());
            for (lot, want) in lots.iter().zip(expected) {
                let p = lot_position(body, *lot as i64, None).unwrap();
                assert_eq!(region_of(p, tally).unwrap(), want, "body {} lot {}", body, lot);
            }
        }
    }

    #[test]
    fn test_region_of_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for tally in [100u32, 124, 1000, 5000] {
            let grid = RegionGrid::new(tally).unwrap();
            for _ in 0..300 {
                let p = random_unit(&mut rng);
                let expected = (0..tally)
                    .max_by(|&a, &b| {
                        let da = p.dot(lattice_point(a, tally));
                        let db = p.dot(lattice_point(b, tally));
                        da.partial_cmp(&db).unwrap_or(Ordering::Equal).then(b.cmp(&a))
                    })
                    .unwrap();
                assert_eq!(grid.region_of(p), expected + 1);
            }
        }
    }

    #[test]
    fn test_region_of_poles() {
        assert_eq!(region_of(Vec3::UP, 100).unwrap(), 1);
        assert_eq!(region_of(Vec3::DOWN, 100).unwrap(), 100);
        assert_eq!(region_of(Vec3::new(0.0, 7.0, 0.0), 5000).unwrap(), 1);
    }

    #[test]
    fn test_region_of_rejects_bad_input() {
        assert!(matches!(region_of(Vec3::ZERO, 100), Err(LotError::InvalidArgument(_))));
        assert!(region_of(Vec3::new(f64::NAN, 0.0, 0.0), 100).is_err());
        assert!(region_of(Vec3::UP, 0).is_err());
    }

    #[test]
    fn test_regions_of_positions_batch() {
        let positions: Vec<f64> = (1..=404u32)
            .flat_map(|i| lot_position(0, i as i64, Some(404)).unwrap().to_array())
            .collect();
        let config = EngineConfig {
            parallel_threshold: 10,
            ..EngineConfig::default()
        };
        let batch = regions_of_positions_with(&positions, 100, &config).unwrap();
        assert_eq!(batch.len(), 404);
        for (i, region) in batch.iter().enumerate() {
            let single = region_of(lattice_point(i as u32, 404), 100).unwrap();
            assert_eq!(*region, single);
        }
        assert!(regions_of_positions(&[1.0, 0.0], 100).is_err());
        assert!(regions_of_positions(&[0.0, 0.0, 0.0], 100).is_err());
    }

    #[test]
    fn test_every_region_has_lots() {
        let tally = 5909;
        let regions = region_tally(tally);
        let grid = RegionGrid::new(regions).unwrap();
        let mut seen = bitvec![0; regions as usize];
        for i in 0..tally {
            seen.set(grid.nearest_region(lattice_point(i, tally)) as usize, true);
        }
        assert!(seen.all());
    }

    #[test]
    fn test_regions_within() {
        let grid = RegionGrid::new(100).unwrap();
        let home = grid.center(1).unwrap();
        assert_eq!(grid.regions_within(home, 0.0), vec![1]);
        let ring = grid.regions_within(home, grid.spacing() * 2.0);
        assert!(ring.len() > 1);
        assert!(ring.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(grid.regions_within(home, PI).len(), 100);
        assert!(grid.center(0).is_none());
        assert!(grid.center(101).is_none());
    }

    #[test]
    fn test_grid_stats() {
        let stats = RegionGrid::new(5000).unwrap().stats();
        assert_eq!(stats.total_regions, 5000);
        assert!(stats.non_empty_cells > 0);
        assert!(stats.max_per_cell >= 1);
    }

    #[test]
    fn test_closest_lots_fixtures() {
        let q = ClosestLotsQuery::around_point(Vec3::new(0.5, 0.5, 0.5), 1000).take(5);
        assert_eq!(closest_lots(&q).unwrap(), vec![216, 182, 237, 250, 195]);

        let q = ClosestLotsQuery::around_point(Vec3::UP, 13).take(5);
        assert_eq!(closest_lots(&q).unwrap(), vec![1, 2, 3, 4, 5]);

        let q = ClosestLotsQuery::around_lot(1, 1000).take(5);
        assert_eq!(closest_lots(&q).unwrap(), vec![2, 3, 4, 5, 6]);

        let q = ClosestLotsQuery::around_lot(824, 1000).take(5);
        assert_eq!(closest_lots(&q).unwrap(), vec![790, 858, 845, 803, 769]);

        let q = ClosestLotsQuery::around_lot(13, 13).take(5);
        assert_eq!(closest_lots(&q).unwrap(), vec![12, 11, 10, 9, 8]);
    }

    #[test]
    fn test_closest_lots_default_returns_all_others() {
        let all = closest_lots(&ClosestLotsQuery::around_lot(13, 13)).unwrap();
        assert_eq!(all.len(), 12);
        assert!(!all.contains(&13));
        assert_eq!(all[..5], [12, 11, 10, 9, 8]);

        let all = closest_lots(&ClosestLotsQuery::around_point(Vec3::UP, 13)).unwrap();
        assert_eq!(all.len(), 13);
    }

    #[test]
    fn test_closest_lots_counts() {
        let q = ClosestLotsQuery::around_lot(1, 13).take(100);
        assert_eq!(closest_lots(&q).unwrap().len(), 12);
        let q = ClosestLotsQuery::around_lot(1, 1).take(5);
        assert!(closest_lots(&q).unwrap().is_empty());
        let q = ClosestLotsQuery::around_point(Vec3::DOWN, 1000).take(0);
        assert!(closest_lots(&q).unwrap().is_empty());

        let center = Vec3::new(0.5, 0.5, 0.5);
        let q = ClosestLotsQuery::around_point(center, 100).take(10);
        assert_eq!(closest_lots(&q).unwrap().len(), 10);
        let q = ClosestLotsQuery::around_point(center, 100);
        assert_eq!(closest_lots(&q).unwrap().len(), 100);
        let q = ClosestLotsQuery::around_lot(1, 100);
        assert_eq!(closest_lots(&q).unwrap().len(), 99);
        let q = ClosestLotsQuery::around_point(center, 500);
        assert_eq!(closest_lots(&q).unwrap().len(), 500);
    }

    #[test]
    fn test_closest_lots_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for tally in [13u32, 404, 5909, 25_000] {
            for _ in 0..40 {
                let p = random_unit(&mut rng);
                let k = rng.gen_range(1..12);
                let q = ClosestLotsQuery::around_point(p, tally).take(k);
                assert_eq!(closest_lots(&q).unwrap(), brute_force(p, tally, None, k));

                let lot = rng.gen_range(1..=tally);
                let q = ClosestLotsQuery::around_lot(lot, tally).take(k);
                let center = lattice_point(lot - 1, tally);
                assert_eq!(
                    closest_lots(&q).unwrap(),
                    brute_force(center, tally, Some(lot - 1), k)
                );
            }
        }
    }

    #[test]
    fn test_closest_lots_large_body() {
        let tally = surface_area(1).unwrap();
        let q = ClosestLotsQuery::around_lot(345_634, tally).take(5);
        let center = lattice_point(345_633, tally);
        assert_eq!(
            closest_lots(&q).unwrap(),
            brute_force(center, tally, Some(345_633), 5)
        );
    }

    #[test]
    fn test_position_to_lot_roundtrip() {
        for lot in [1u32, 2, 404, 2999, 5909] {
            let p = lattice_point(lot - 1, 5909);
            let q = ClosestLotsQuery::around_point(p, 5909).take(1);
            assert_eq!(closest_lots(&q).unwrap(), vec![lot]);
        }
    }

    #[test]
    fn test_closest_lots_errors() {
        let q = ClosestLotsQuery::around_lot(14, 13).take(5);
        assert!(matches!(
            closest_lots(&q),
            Err(LotError::InvalidIndex { index: 14, tally: 13 })
        ));
        let q = ClosestLotsQuery::around_lot(0, 13);
        assert!(matches!(closest_lots(&q), Err(LotError::InvalidIndex { .. })));
        let q = ClosestLotsQuery::around_point(Vec3::ZERO, 13);
        assert!(matches!(closest_lots(&q), Err(LotError::InvalidArgument(_))));
        let q = ClosestLotsQuery::around_point(Vec3::UP, 0);
        assert!(matches!(closest_lots(&q), Err(LotError::InvalidArgument(_))));
    }
}
