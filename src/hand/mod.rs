pub mod landmark;

pub use landmark::{Hand, Landmark, LandmarkIndex};
