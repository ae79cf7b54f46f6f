pub mod patch;
pub mod resolve;
