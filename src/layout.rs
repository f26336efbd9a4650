use std::collections::{HashMap, HashSet};
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::content::{BoundingBox, CountryBoxes, WordId, WordRecord};

/// Percentage-space grid parameters. Candidate cells span
/// `candidate_min..=candidate_max`; ring-search cells must also fall inside
/// `valid_min..=valid_max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub step: i32,
    pub candidate_min: i32,
    pub candidate_max: i32,
    pub valid_min: i32,
    pub valid_max: i32,
    pub max_ring_radius: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step: 2,
            candidate_min: 4,
            candidate_max: 96,
            valid_min: 5,
            valid_max: 95,
            max_ring_radius: 50,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCell {
    pub left: i32,
    pub top: i32,
}

impl GridCell {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    pub fn longitude(self) -> f32 {
        self.left as f32 * 3.6 - 180.0
    }

    pub fn latitude(self) -> f32 {
        90.0 - self.top as f32 * 1.8
    }

    /// Normalized map position in `[0, 1]`.
    pub fn ratio(self) -> Vec2 {
        vec2(self.left as f32 / 100.0, self.top as f32 / 100.0)
    }
}

pub fn percent_from_lon_lat(lon: f32, lat: f32) -> (f32, f32) {
    ((lon + 180.0) / 3.6, (90.0 - lat) / 1.8)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub cell: GridCell,
    pub longitude: f32,
    pub latitude: f32,
}

impl Placement {
    fn at(cell: GridCell) -> Self {
        Self {
            cell,
            longitude: cell.longitude(),
            latitude: cell.latitude(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GridAllocation {
    pub placements: HashMap<WordId, Placement>,
    /// Words that found no free cell within the maximum ring radius.
    pub dropped: Vec<WordId>,
}

impl GridAllocation {
    pub fn get(&self, id: WordId) -> Option<&Placement> {
        self.placements.get(&id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }
}

pub struct GridAllocator<'a> {
    config: GridConfig,
    boxes: &'a CountryBoxes,
    used: HashSet<GridCell>,
    rng: SmallRng,
}

impl<'a> GridAllocator<'a> {
    pub fn new(config: GridConfig, boxes: &'a CountryBoxes, seed: u64) -> Self {
        Self {
            config,
            boxes,
            used: HashSet::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Full layout pass. Occupancy is rebuilt from scratch every call.
    pub fn allocate(&mut self, words: &[WordRecord]) -> GridAllocation {
        self.used.clear();

        let mut groups: Vec<(&str, Vec<WordId>)> = Vec::new();
        let mut group_by_country: HashMap<&str, usize> = HashMap::new();
        for word in words {
            let country = word.country_code.as_str();
            let group = *group_by_country.entry(country).or_insert_with(|| {
                groups.push((country, Vec::new()));
                groups.len() - 1
            });
            groups[group].1.push(word.id);
        }

        // Stable: equal-sized countries keep first-appearance order.
        groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let mut allocation = GridAllocation {
            placements: HashMap::with_capacity(words.len()),
            dropped: Vec::new(),
        };

        for (country, ids) in groups {
            let cells = self.find_available_cells(country, ids.len());
            for (index, id) in ids.into_iter().enumerate() {
                match cells.get(index) {
                    Some(&cell) => {
                        allocation.placements.insert(id, Placement::at(cell));
                    }
                    None => {
                        warn!(
                            country,
                            word_id = id,
                            "no free grid cell within the search radius, dropping word"
                        );
                        allocation.dropped.push(id);
                    }
                }
            }
        }

        debug!(
            placed = allocation.placements.len(),
            dropped = allocation.dropped.len(),
            "grid allocation finished"
        );
        allocation
    }

    fn country_cells(&mut self, bounds: BoundingBox) -> Vec<GridCell> {
        let mut cells = candidate_cells(self.config)
            .filter(|cell| bounds.contains(cell.longitude(), cell.latitude()))
            .collect::<Vec<_>>();
        cells.shuffle(&mut self.rng);
        cells
    }

    fn find_available_cells(&mut self, country: &str, needed: usize) -> Vec<GridCell> {
        let bounds = self.boxes.bounds_or_world(country);
        let interior = self.country_cells(bounds);

        let mut cells = Vec::with_capacity(needed);
        for &cell in &interior {
            if cells.len() >= needed {
                break;
            }
            if self.used.insert(cell) {
                cells.push(cell);
            }
        }

        if cells.len() < needed {
            let (center_lon, center_lat) = bounds.center();
            let center = percent_from_lon_lat(center_lon, center_lat);
            let considered = interior.into_iter().collect::<HashSet<_>>();
            let overflow = self.expand_from_center(center, needed - cells.len(), &considered);
            cells.extend(overflow);
        }

        cells
    }

    fn expand_from_center(
        &mut self,
        center: (f32, f32),
        needed: usize,
        considered: &HashSet<GridCell>,
    ) -> Vec<GridCell> {
        let step = self.config.step.max(1);
        let mut cells = Vec::new();
        let mut radius = step;

        while cells.len() < needed && radius <= self.config.max_ring_radius {
            for cell in ring_cells(center, radius as f32, step) {
                if cells.len() >= needed {
                    break;
                }
                if self.is_valid(cell) && !considered.contains(&cell) && self.used.insert(cell) {
                    cells.push(cell);
                }
            }
            radius += step;
        }

        cells
    }

    fn is_valid(&self, cell: GridCell) -> bool {
        let range = self.config.valid_min..=self.config.valid_max;
        range.contains(&cell.left) && range.contains(&cell.top)
    }
}

/// Uniform candidate lattice, row by row.
fn candidate_cells(config: GridConfig) -> impl Iterator<Item = GridCell> {
    let GridConfig {
        step,
        candidate_min,
        candidate_max,
        ..
    } = config;
    let step = step.max(1) as usize;

    (candidate_min..=candidate_max)
        .step_by(step)
        .flat_map(move |top| {
            (candidate_min..=candidate_max)
                .step_by(step)
                .map(move |left| GridCell::new(left, top))
        })
}

/// Angularly even points on a ring, snapped to the grid. Adjacent points may
/// snap to the same cell.
pub fn ring_cells(center: (f32, f32), radius: f32, step: i32) -> Vec<GridCell> {
    let step_f = step.max(1) as f32;
    let count = ((TAU * radius / step_f).floor() as usize).max(8);

    (0..count)
        .map(|index| {
            let angle = TAU * index as f32 / count as f32;
            let left = center.0 + radius * angle.cos();
            let top = center.1 + radius * angle.sin();
            GridCell::new(
                ((left / step_f).round() * step_f) as i32,
                ((top / step_f).round() * step_f) as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn word(id: WordId, country: &str) -> WordRecord {
        WordRecord {
            id,
            country_code: country.to_owned(),
            ..WordRecord::default()
        }
    }

    // 10 columns x 5 rows of candidates.
    const US_BOX: BoundingBox = BoundingBox::new(-130.0, 25.0, -58.0, 43.0);
    // Exactly two candidates: (50, 22) and (52, 22).
    const FR_BOX: BoundingBox = BoundingBox::new(-1.0, 49.0, 8.0, 51.0);

    fn test_boxes() -> CountryBoxes {
        CountryBoxes::from_boxes([("US", US_BOX), ("FR", FR_BOX)])
    }

    fn assert_unique(allocation: &GridAllocation) {
        let cells = allocation
            .placements
            .values()
            .map(|placement| placement.cell)
            .collect::<HashSet<_>>();
        assert_eq!(cells.len(), allocation.placements.len());
    }

    #[test]
    fn fixture_boxes_cover_expected_candidates() {
        let boxes = test_boxes();
        let mut allocator = GridAllocator::new(GridConfig::default(), &boxes, 1);
        assert_eq!(allocator.country_cells(US_BOX).len(), 50);
        let mut france = allocator.country_cells(FR_BOX);
        france.sort();
        assert_eq!(france, vec![GridCell::new(50, 22), GridCell::new(52, 22)]);
    }

    #[test]
    fn us_and_france_words_get_distinct_cells_inside_their_boxes() {
        let boxes = test_boxes();
        let words = vec![word(1, "US"), word(2, "FR"), word(3, "US"), word(4, "US")];
        let allocation = GridAllocator::new(GridConfig::default(), &boxes, 7).allocate(&words);

        assert_eq!(allocation.len(), 4);
        assert!(allocation.dropped.is_empty());
        assert_unique(&allocation);

        let france = allocation.get(2).expect("FR word placed");
        assert!(FR_BOX.contains(france.longitude, france.latitude));
        for id in [1, 3, 4] {
            let placement = allocation.get(id).expect("US word placed");
            assert!(US_BOX.contains(placement.longitude, placement.latitude));
        }
    }

    #[test]
    fn derived_coordinates_follow_percent_mapping() {
        let boxes = test_boxes();
        let allocation =
            GridAllocator::new(GridConfig::default(), &boxes, 3).allocate(&[word(9, "FR")]);
        let placement = allocation.get(9).expect("placed");
        let cell = placement.cell;
        assert_eq!(placement.longitude, cell.left as f32 * 3.6 - 180.0);
        assert_eq!(placement.latitude, 90.0 - cell.top as f32 * 1.8);
    }

    #[test]
    fn overflow_spirals_out_of_a_full_country() {
        let boxes = test_boxes();
        let words = (0..6).map(|id| word(id, "FR")).collect::<Vec<_>>();
        let allocation = GridAllocator::new(GridConfig::default(), &boxes, 11).allocate(&words);

        assert_eq!(allocation.len(), 6);
        assert_unique(&allocation);
        let outside = allocation
            .placements
            .values()
            .filter(|placement| !FR_BOX.contains(placement.longitude, placement.latitude))
            .count();
        assert_eq!(outside, 4);
        for placement in allocation.placements.values() {
            assert!((5..=95).contains(&placement.cell.left));
            assert!((5..=95).contains(&placement.cell.top));
        }
    }

    #[test]
    fn words_beyond_the_radius_are_dropped() {
        let boxes = test_boxes();
        let config = GridConfig {
            max_ring_radius: 2,
            ..GridConfig::default()
        };
        let words = (0..40).map(|id| word(id, "FR")).collect::<Vec<_>>();
        let allocation = GridAllocator::new(config, &boxes, 5).allocate(&words);

        assert!(!allocation.dropped.is_empty());
        assert_eq!(allocation.len() + allocation.dropped.len(), words.len());
        assert_unique(&allocation);
    }

    #[test]
    fn unknown_country_is_placed_anywhere_on_the_map() {
        let boxes = test_boxes();
        let allocation =
            GridAllocator::new(GridConfig::default(), &boxes, 2).allocate(&[word(1, "ZZ")]);
        assert_eq!(allocation.len(), 1);
    }

    #[test]
    fn same_seed_reproduces_layout() {
        let boxes = test_boxes();
        let words = vec![word(1, "US"), word(2, "US"), word(3, "FR")];
        let first = GridAllocator::new(GridConfig::default(), &boxes, 42).allocate(&words);
        let second = GridAllocator::new(GridConfig::default(), &boxes, 42).allocate(&words);
        assert_eq!(first.placements, second.placements);
    }

    #[test]
    fn ring_has_at_least_eight_snapped_points() {
        let ring = ring_cells((50.0, 50.0), 2.0, 2);
        assert_eq!(ring.len(), 8);
        assert!(ring.iter().all(|cell| cell.left % 2 == 0 && cell.top % 2 == 0));
        assert!(ring.contains(&GridCell::new(52, 50)));
    }

    proptest! {
        #[test]
        fn allocation_never_shares_a_cell(
            countries in proptest::collection::vec(0usize..5, 0..400),
            seed in any::<u64>(),
        ) {
            const CODES: [&str; 5] = ["US", "FR", "DE", "JP", "ZZ"];
            let boxes = CountryBoxes::builtin();
            let words = countries
                .iter()
                .enumerate()
                .map(|(id, &country)| word(id as WordId, CODES[country]))
                .collect::<Vec<_>>();

            let allocation = GridAllocator::new(GridConfig::default(), &boxes, seed).allocate(&words);

            let cells = allocation.placements.values().map(|p| p.cell).collect::<HashSet<_>>();
            prop_assert_eq!(cells.len(), allocation.placements.len());
            prop_assert_eq!(allocation.placements.len() + allocation.dropped.len(), words.len());
        }

        #[test]
        fn small_countries_stay_inside_their_box(count in 1usize..=3, seed in any::<u64>()) {
            let boxes = test_boxes();
            let words = (0..count).map(|id| word(id as WordId, "US")).collect::<Vec<_>>();
            let allocation = GridAllocator::new(GridConfig::default(), &boxes, seed).allocate(&words);
            for placement in allocation.placements.values() {
                prop_assert!(US_BOX.contains(placement.longitude, placement.latitude));
            }
        }
    }
}
