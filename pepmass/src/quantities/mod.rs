mod mass;
mod range;
mod tolerance;

pub use mass::*;
pub use range::*;
pub use tolerance::*;
