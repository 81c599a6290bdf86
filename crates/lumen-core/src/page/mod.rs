mod document;
mod layout;
mod models;

pub use document::Document;
pub use layout::{wrap, ItemKind, LayoutItem, PageLayout, RowSpan, FORM_PROMPT};
pub use models::{
    reveal_id, BlockSpec, Features, NavLinkSpec, PageManifest, PageSpec, PageWarning, SectionSpec,
};
