//! Calendar popout for text date inputs: month grid projection, per-widget
//! navigation state and a registry of pickers attached to a host form.

pub mod calc;
pub mod data;
pub mod picker;
