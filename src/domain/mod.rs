pub mod drill;

pub use drill::{DataEnvelope, DrillSetItem, DrillSlot, ResponseRecord, WordItem};
