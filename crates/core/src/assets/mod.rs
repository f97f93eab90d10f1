//! Assets module - the holdings being valued.

mod assets_model;


pub use assets_model::{Asset, NewAsset};
