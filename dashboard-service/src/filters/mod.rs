//! Filter selection state: query-string codec and the static value catalog.

pub mod codec;
pub mod registry;

pub use codec::FilterSelection;
pub use registry::FilterRegistry;
