pub mod anchor;
pub mod config;
pub mod controller;
pub mod effect;
pub mod error;
pub mod form;
pub mod frame;
pub mod geometry;
pub mod headless;
pub mod menu;
pub mod observer;
pub mod page;
pub mod pointer;
pub mod projection;
pub mod reveal;
pub mod smooth_scroll;
pub mod spy;
pub mod to_top;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use controller::{LinkOutcome, PageController, PageEvent};
pub use effect::{Class, Effect, Target};
pub use error::{Error, Result};
pub use frame::{FrameClock, FrameTick};
pub use geometry::{GeometryProbe, Point, Rect, Viewport};
pub use headless::{HeadlessPage, Script};
pub use page::{Document, PageManifest, PageSpec};
pub use projection::Projection;
