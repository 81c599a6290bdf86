mod cursor_light;
mod nav;
mod page;
mod popup;
mod status_bar;

pub use cursor_light::CursorLightWidget;
pub use nav::NavWidget;
pub use page::PageWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
