pub mod bracket;
pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod outcome;
pub mod state;
pub mod types;
