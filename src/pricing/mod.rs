//! Pricing configuration: tier editing, validation, form assembly and
//! the selection-driven editor built on top of them.

pub mod defaults;
pub mod editor;
pub mod form;
pub mod resolve;
pub mod tiers;
pub mod validation;

pub use editor::{EditorState, PricingEditor};
pub use form::PricingForm;
pub use tiers::{parse_non_negative_integer, parse_non_negative_number};
