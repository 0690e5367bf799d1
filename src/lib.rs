pub mod data;
pub mod grid;
pub mod heatmap;
pub mod intensity;
pub mod key;
pub mod selection;
pub mod slots;
pub mod submission;
#[cfg(feature = "wasm")]
pub mod wasm;
pub mod zone;

pub use data::{AvailabilityRow, EventConfig, EventWindow, TimeSlot, ValidationError};
pub use heatmap::{calculate_heatmap, max_count, Heatmap, HeatmapEntry};
#[cfg(feature = "rayon")]
pub use heatmap::calculate_heatmap_par;
pub use intensity::{intensity_bucket, Intensity, IntensityLadder};
pub use key::{parse_slot_key, slot_key};
pub use slots::generate_time_slots;
