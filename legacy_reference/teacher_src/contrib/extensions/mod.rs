//! Functionality extensions for penrose
pub mod dmenu;
pub mod scratchpad;

#[doc(inline)]
pub use dmenu::{DMenu, DMenuConfig, MenuMatch};

#[doc(inline)]
pub use scratchpad::Scratchpad;
