//! Map rendering of the filtered listings

mod basemap;
pub mod camera;
pub mod cluster;
mod map_view;

pub use camera::{Camera, FlyTo};
pub use cluster::{cluster_listings, cluster_style, ClusterStyle, MapMarker, PlacedListing};
pub use map_view::{compact_price, MapView};
