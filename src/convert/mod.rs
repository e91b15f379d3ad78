//! Value conversions shared by the transformer directions
//!
//! - `color`: hex and CSS color literals to normalized RGBA and back
//! - `units`: `px` unit stripping and number formatting

pub mod color;
pub mod units;

pub use color::{color_to_hex, hex_to_color, parse_color};
pub use units::{append_px, format_number, number_to_json, parse_dimension, strip_px};
