pub mod classify;
pub mod hold;

pub use classify::{GestureClassifier, GestureLabel};
pub use hold::{HoldTracker, TriggerEvent};
