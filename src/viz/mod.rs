pub mod render;

pub use render::{render_ascii, save_png};
