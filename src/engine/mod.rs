pub mod map;
mod output;
pub mod player;

pub use map::NavContext;
pub use output::{Output, OutputBlock};
