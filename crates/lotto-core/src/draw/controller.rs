// Draw controller: owns the round counter and the RNG, renders each new draw
// onto the page.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::DrawConfig;
use crate::page::Page;

use super::color::{color_category, ColorCategory};
use super::engine::{generate_draw, Draw};

/// One rendered number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub number: u8,
    pub category: ColorCategory,
    /// Delay before this ball is revealed. Strictly increasing by position.
    pub delay: Duration,
}

/// Render a draw as balls in ascending order, ball `i` delayed by
/// `i * stagger`.
pub fn render_balls(draw: &Draw, stagger: Duration) -> Vec<Ball> {
    draw.iter()
        .enumerate()
        .map(|(i, number)| Ball {
            number,
            category: color_category(number),
            delay: stagger * i as u32,
        })
        .collect()
}

/// Summary line shown under the balls.
pub fn round_note(round: u64, draw: &Draw) -> String {
    format!("{round}회차 추첨 결과: {draw}")
}

// ---------------------------------------------------------------------------
// DrawController
// ---------------------------------------------------------------------------

pub struct DrawController {
    rng: StdRng,
    stagger: Duration,
    /// Rounds drawn so far in this process. The first draw is round 1.
    round: u64,
    last_draw: Option<Draw>,
}

impl DrawController {
    pub fn new(rng: StdRng, stagger: Duration) -> Self {
        DrawController {
            rng,
            stagger,
            round: 0,
            last_draw: None,
        }
    }

    /// Seeded from `[draw] seed` when set, otherwise from OS entropy.
    pub fn from_config(config: &DrawConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                info!("Using fixed draw seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        DrawController::new(rng, config.stagger())
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn last_draw(&self) -> Option<&Draw> {
        self.last_draw.as_ref()
    }

    /// Produce the next draw, bump the round by one, and replace the numbers
    /// display and round note on `page`. Missing elements are skipped.
    pub fn generate(&mut self, page: &mut Page) -> Draw {
        let draw = generate_draw(&mut self.rng);
        self.round += 1;
        self.last_draw = Some(draw);

        match page.numbers.as_mut() {
            Some(numbers) => numbers.show(self.round, render_balls(&draw, self.stagger)),
            None => debug!("No numbers display on page, skipping ball render"),
        }
        if let Some(note) = page.round_note.as_mut() {
            note.set(round_note(self.round, &draw));
        }

        info!("Round {} drawn: {}", self.round, draw);
        draw
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
