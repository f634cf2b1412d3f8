//! The catalog view: an explicit view-state object derived from a full
//! fetch, and pure render functions that escape everything they interpolate.

pub mod render;
pub mod state;
