mod identity;
mod rule;
mod section;

pub use identity::*;
pub use rule::*;
pub use section::*;
