//! Structural rules. Every value here references the tokens declared in the
//! `:root` block; none of them depend on the chosen mode.

pub mod base;
pub mod components;
pub mod controls;
pub mod sidebar;
