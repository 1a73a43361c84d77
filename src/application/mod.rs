pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
