// Draw engine: number generation, color bands, and the per-session controller.

pub mod color;
pub mod controller;
pub mod engine;

pub use color::{color_category, ColorCategory};
pub use controller::{render_balls, round_note, Ball, DrawController};
pub use engine::{generate_draw, Draw, DrawError, DRAW_SIZE, MAX_NUMBER, MIN_NUMBER};
