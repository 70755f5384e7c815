mod classifier;
mod db;
mod error;
mod helpers;
mod types;

pub use classifier::BrowserClassifier;
pub use db::{Rules, ServiceEntry, TridentVersionMap};
pub use error::{Error, Result};
pub use types::*;
