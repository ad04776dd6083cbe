pub mod plans;
pub mod stats;
