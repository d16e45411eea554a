//! Reusable widget components.

pub mod detail;
pub mod status;
pub mod toast;

pub use detail::DetailPanel;
pub use status::StatusIndicator;
pub use toast::ToastStack;
