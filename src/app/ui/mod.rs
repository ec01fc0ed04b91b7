pub mod status_bar;
pub mod main_panel;
pub mod control_panel;
pub mod spectrum_panel;

pub use status_bar::render_status_bar;
pub use main_panel::render_main_panel;
pub use control_panel::render_control_panel;
pub use spectrum_panel::render_spectrum_panel;
