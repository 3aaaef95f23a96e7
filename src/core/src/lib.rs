pub mod club;
pub mod r#match;

pub use club::*;
pub use r#match::*;
