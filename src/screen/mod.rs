pub mod controller;

pub use controller::{OverlayRequest, Screen, ScreenController, UserIntent};
