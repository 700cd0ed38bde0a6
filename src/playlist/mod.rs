pub mod generator;
pub mod metadata;
pub mod mood;
pub mod tracks;
pub mod utils;

pub use generator::*;
pub use metadata::*;
pub use mood::*;
pub use tracks::*;
