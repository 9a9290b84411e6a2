pub mod silhouette;
pub mod window;

pub use minifb::Key;
pub use silhouette::HAND_CONNECTIONS;
pub use window::OverlayRenderer;
