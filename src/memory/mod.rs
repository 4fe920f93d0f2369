pub mod identity;
pub mod notes;

pub use identity::*;
pub use notes::*;
