pub mod generators;
pub mod stores;

pub use generators::*;
pub use stores::*;
