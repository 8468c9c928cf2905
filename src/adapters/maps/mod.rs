//! Maps adapters: Google Distance Matrix route provider.

mod google_maps_provider;

pub use google_maps_provider::{GoogleMapsConfig, GoogleMapsProvider};
