//! Layout types for section-reorder
//!
//! A section's layout is derived from its target position: odd positions keep
//! the source order (image first), even positions swap the two containers on
//! wide viewports.

use strum::{Display, EnumIter, EnumString};

/// Ordering token pair placed on the text container of a text-left section.
/// Renders second on narrow viewports and first from `md` upwards.
pub const TEXT_FIRST_TOKENS: &str = "order-2 md:order-1";

/// Ordering token pair placed on the visual container of a text-left section.
pub const VISUAL_SECOND_TOKENS: &str = "order-1 md:order-2";

/// Every ordering token pair the normalizer strips.
pub const ORDER_TOKEN_PAIRS: [&str; 2] = [TEXT_FIRST_TOKENS, VISUAL_SECOND_TOKENS];

/// Layout directive for a single section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Layout {
    /// Image on the left, text on the right (source order, no tokens)
    #[strum(serialize = "image-left")]
    ImageLeft,
    /// Text on the left, image on the right (ordering tokens added)
    #[strum(serialize = "text-left")]
    TextLeft,
}

impl Layout {
    /// Layout for a 1-based target position: odd is image-left, even is text-left
    pub const fn for_position(position: usize) -> Self {
        if position % 2 == 1 {
            Self::ImageLeft
        } else {
            Self::TextLeft
        }
    }

    /// Whether this layout adds ordering tokens
    pub const fn swaps_containers(self) -> bool {
        matches!(self, Self::TextLeft)
    }
}
