pub mod phase;
pub mod pivot;
