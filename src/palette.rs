//! Card color selection for the challenge page.
//!
//! Colors are drawn at random but never repeat back to back, so adjacent
//! question cards stay visually distinct.

use rand::Rng;

/// CSS classes available for question cards
pub const CARD_COLORS: [&str; 6] = [
  "card-sky",
  "card-mint",
  "card-sand",
  "card-rose",
  "card-lilac",
  "card-peach",
];

/// Random color picker that never returns the same color twice in a row
#[derive(Debug)]
pub struct CardPalette {
  colors: &'static [&'static str],
  last: Option<usize>,
}

impl CardPalette {
  pub fn new() -> Self {
    Self::with_colors(&CARD_COLORS)
  }

  /// Use a custom color list; an empty list falls back to the default
  pub fn with_colors(colors: &'static [&'static str]) -> Self {
    let colors: &'static [&'static str] = if colors.is_empty() {
      &CARD_COLORS
    } else {
      colors
    };
    Self { colors, last: None }
  }

  /// Draw the next color, skipping over the previous pick
  pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static str {
    let idx = match self.last {
      Some(last) if self.colors.len() > 1 => {
        // Draw from the remaining indices, skipping over the last pick
        let mut idx = rng.random_range(0..self.colors.len() - 1);
        if idx >= last {
          idx += 1;
        }
        idx
      }
      _ => rng.random_range(0..self.colors.len()),
    };
    self.last = Some(idx);
    self.colors[idx]
  }
}

impl Default for CardPalette {
  fn default() -> Self {
    Self::new()
  }
}
