// src/assets/mod.rs
//! Asset materialization: local image files plus the flat image index.

mod index;
mod paths;
mod stage;

pub use index::{escape_field, render_index_csv, IndexRow};
pub use paths::{guess_extension, image_filename, partial_path, safe_item_id};
pub use stage::{materialize, MaterializeOptions, MaterializeReport};
