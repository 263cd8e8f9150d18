//! Custom widget components

mod device_list;
mod header;
mod log_view;
pub mod modal_overlay;
mod onboarding;
mod params_panel;
mod status_bar;
mod wireless_prompt;

pub use device_list::DeviceList;
pub use header::MainHeader;
pub use log_view::LogView;
pub use onboarding::OnboardingOverlay;
pub use params_panel::ParamsPanel;
pub use status_bar::StatusBar;
pub use wireless_prompt::WirelessPrompt;
