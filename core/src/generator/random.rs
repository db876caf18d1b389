use alloc::vec::Vec;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use super::*;

/// Uniform placement: every assignment of mines and items that keeps the excluded cell empty is
/// equally likely.
///
/// The generator keeps its RNG between boards, so a session that is reset gets a fresh layout
/// while the whole sequence stays reproducible from the seed.
#[derive(Clone, Debug)]
pub struct RandomContentGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomContentGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl ContentGenerator for RandomContentGenerator {
    fn generate(&mut self, config: &GameConfig, exclude: Coord2) -> ContentLayout {
        let size = config.size();
        let mines = usize::from(config.mines());
        let items = usize::from(config.items());
        let excluded = linear_index(exclude, size);

        let mut candidates: Vec<usize> = (0..usize::from(config.total_cells()))
            .filter(|&index| index != excluded)
            .collect();
        // the shuffled prefix is a uniform sample in random order: mines first, then items
        let (chosen, _) = candidates.partial_shuffle(&mut self.rng, mines + items);

        let mut contents: Array2<Content> = Array2::default(size.to_nd_index());
        for (nth, &index) in chosen.iter().enumerate() {
            let content = if nth < mines {
                Content::Mine
            } else {
                Content::Item
            };
            contents[from_linear_index(index, size).to_nd_index()] = content;
        }

        log::debug!(
            "Placed {} mines and {} items on {:?}, keeping {:?} clear",
            mines,
            items,
            size,
            exclude
        );
        ContentLayout::from_contents_unchecked(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_requested_counts_and_keeps_exclusion_clear() {
        let config = GameConfig::new(4, 5, 12, 7).unwrap();
        for seed in 0..64 {
            let exclude = ((seed % 4) as Coord, (seed % 5) as Coord);
            let layout = RandomContentGenerator::new(seed).generate(&config, exclude);

            assert_eq!(layout.mine_count(), 12);
            assert_eq!(layout.item_count(), 7);
            assert_eq!(layout.content_at(exclude), Content::Empty);
            assert!(layout.satisfies(&config, Some(exclude)));
        }
    }

    #[test]
    fn densest_board_leaves_only_the_excluded_cell() {
        let config = GameConfig::new(3, 3, 5, 3).unwrap();
        let layout = RandomContentGenerator::new(7).generate(&config, (1, 1));

        assert_eq!(layout.content_at((1, 1)), Content::Empty);
        let empty = (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .filter(|&coords| layout.content_at(coords) == Content::Empty)
            .count();
        assert_eq!(empty, 1);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Intermediate.config();
        let a = RandomContentGenerator::new(42).generate(&config, (3, 3));
        let b = RandomContentGenerator::new(42).generate(&config, (3, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn successive_boards_differ() {
        let config = Difficulty::Expert.config();
        let mut generator = RandomContentGenerator::new(1);
        let first = generator.generate(&config, (0, 0));
        let second = generator.generate(&config, (0, 0));
        assert_ne!(first, second);
    }

    #[test]
    fn every_candidate_cell_can_hold_the_mine() {
        // 1 mine on a 2x2 board, (0, 0) excluded: each other cell must come up
        let config = GameConfig::new(2, 2, 1, 0).unwrap();
        let mut generator = RandomContentGenerator::new(99);
        let mut hits = [0u32; 4];
        for _ in 0..300 {
            let layout = generator.generate(&config, (0, 0));
            for row in 0..2 {
                for col in 0..2 {
                    if layout.content_at((row, col)).is_mine() {
                        hits[linear_index((row, col), (2, 2))] += 1;
                    }
                }
            }
        }
        assert_eq!(hits[0], 0);
        assert!(hits[1..].iter().all(|&count| count > 50), "{hits:?}");
    }
}
