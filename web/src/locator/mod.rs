pub mod assets;
pub mod controller;
pub mod errors;
pub mod filter;
pub mod geolocate;
pub mod leaflet;
pub mod map_adapter;
pub mod popup;
pub mod viewport;

pub use controller::{Followup, LocatorAction, LocatorController, LocatorSnapshot, ViewMode};
pub use errors::{GeolocationError, MapLoadError};
pub use filter::{compute_visible, FilterOutcome, FilterState};
pub use map_adapter::{MapAdapter, MapPhase, MapSurface};
