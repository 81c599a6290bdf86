//! DOM writes expressed as data.
//!
//! The engine never touches a document directly: every state change is
//! returned as an [`Effect`] and the host projects it onto whatever it renders.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;

/// Presentation classes toggled by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    #[serde(rename = "is-active")]
    Active,
    #[serde(rename = "is-visible")]
    Visible,
    #[serde(rename = "is-open")]
    Open,
}

impl Class {
    pub fn as_str(&self) -> &'static str {
        match self {
            Class::Active => "is-active",
            Class::Visible => "is-visible",
            Class::Open => "is-open",
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element an effect applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    /// Navigation link by document order
    NavLink(usize),
    /// Reveal-marked element by id
    Reveal(String),
    ToTop,
    CursorLight,
    NavToggle,
    /// Collapsible container holding the navigation links
    NavLinks,
    Year,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Composited `translate3d` position of the cursor light, centred on the point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate3d({}px, {}px, 0) translate(-50%, -50%)",
            self.x, self.y
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Effect {
    SetClass { target: Target, class: Class, on: bool },
    SetAttribute { target: Target, name: String, value: String },
    SetTransform { target: Target, transform: Transform },
    SetOpacity { target: Target, opacity: f64 },
    ScrollTo { top: f64, behavior: ScrollBehavior },
    PushFragment { anchor: Anchor },
    SetText { target: Target, text: String },
    Alert { message: String },
    ResetForm,
}

impl Effect {
    pub fn set_class(target: Target, class: Class, on: bool) -> Self {
        Effect::SetClass { target, class, on }
    }
}
