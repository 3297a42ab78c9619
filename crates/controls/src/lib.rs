//! Settings UI control state beyond time entry.
//!
//! Currently this is the [`select`] control: a dropdown whose option labels
//! come from the host's translation table and are re-laid-out when the
//! owner signals that translations changed.

pub mod select;

pub use select::{
    RELAYOUT_DEBOUNCE, SelectChange, SelectController, SelectOption, Translator,
    spawn_translation_listener,
};
