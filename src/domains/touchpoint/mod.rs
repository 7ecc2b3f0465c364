pub mod catalog;
pub mod timeline;
pub mod types;

pub use catalog::{InterventionCatalog, DEFAULT_CATALOG};
pub use timeline::TimelineSummary;
pub use types::{EventStatus, EventType, TimelineEvent, TouchpointCategory, TouchpointIntervention};
