use crate::*;
pub use random::*;

mod random;

/// Decides where mines and items go once the first cell to open is known.
///
/// Implementations must return a layout of the configured size holding exactly
/// `config.mines()` mines and `config.items()` items, with `exclude` left empty.
pub trait ContentGenerator {
    fn generate(&mut self, config: &GameConfig, exclude: Coord2) -> ContentLayout;
}

impl<G: ContentGenerator + ?Sized> ContentGenerator for &mut G {
    fn generate(&mut self, config: &GameConfig, exclude: Coord2) -> ContentLayout {
        (**self).generate(config, exclude)
    }
}
