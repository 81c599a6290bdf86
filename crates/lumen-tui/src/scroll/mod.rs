//! Native smooth scrolling for the terminal host
//!
//! The page asks for a scroll with [`lumen_core::Effect::ScrollTo`]; how the
//! viewport gets there is up to the host. Here it is an eased, time-based
//! animation over layout units, advanced once per frame.
//!
//! - `easing` - easing curves
//! - `timing` - progress and interpolation helpers
//! - `animation` - the animator combining both with `lumen_core::ScrollConfig`

pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use lumen_core::ScrollConfig;
pub use easing::{EasingType, EasingTypeExt};
