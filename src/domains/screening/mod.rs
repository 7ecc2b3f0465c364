pub mod types;

pub use types::{
    completed_screenings, find_screening, next_scheduled, ScreeningEvent, ScreeningResult, ScreeningStatus,
};
