//! Screen-space marker clustering

use std::sync::Arc;

use ahash::AHashMap;
use egui::{Color32, Pos2};
use estate_core::Property;

/// A listing placed on screen
#[derive(Debug, Clone)]
pub struct PlacedListing {
    pub property: Arc<Property>,
    pub pos: Pos2,
}

/// What the map draws for one or more nearby listings
#[derive(Debug, Clone)]
pub enum MapMarker {
    Single(PlacedListing),
    Cluster {
        members: Vec<Arc<Property>>,
        /// Centroid of the members on screen
        pos: Pos2,
    },
}

impl MapMarker {
    pub fn pos(&self) -> Pos2 {
        match self {
            MapMarker::Single(listing) => listing.pos,
            MapMarker::Cluster { pos, .. } => *pos,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MapMarker::Single(_) => 1,
            MapMarker::Cluster { members, .. } => members.len(),
        }
    }
}

/// Fill color and radius of a cluster bubble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterStyle {
    pub color: Color32,
    pub radius: f32,
}

/// Bubbles step up at 10 and 30 members
pub fn cluster_style(count: usize) -> ClusterStyle {
    if count >= 30 {
        ClusterStyle {
            color: Color32::from_rgb(0x1E, 0x40, 0xAF),
            radius: 40.0,
        }
    } else if count >= 10 {
        ClusterStyle {
            color: Color32::from_rgb(0x1D, 0x4E, 0xD8),
            radius: 30.0,
        }
    } else {
        ClusterStyle {
            color: Color32::from_rgb(0x3B, 0x82, 0xF6),
            radius: 20.0,
        }
    }
}

/// Group listings closer than `radius` pixels to a seed listing.
///
/// Seeds are taken in input order, so the output is stable for a stable
/// result order. A group of one stays a single marker.
pub fn cluster_listings(listings: Vec<PlacedListing>, radius: f32) -> Vec<MapMarker> {
    if radius <= 0.0 || listings.len() < 2 {
        return listings.into_iter().map(MapMarker::Single).collect();
    }

    let cell_of = |pos: Pos2| -> (i32, i32) {
        ((pos.x / radius).floor() as i32, (pos.y / radius).floor() as i32)
    };

    let mut grid: AHashMap<(i32, i32), Vec<usize>> = AHashMap::new();
    for (i, listing) in listings.iter().enumerate() {
        grid.entry(cell_of(listing.pos)).or_default().push(i);
    }

    let mut taken = vec![false; listings.len()];
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for seed in 0..listings.len() {
        if taken[seed] {
            continue;
        }
        taken[seed] = true;
        let seed_pos = listings[seed].pos;
        let (cx, cy) = cell_of(seed_pos);
        let mut group = vec![seed];

        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(cell) = grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &other in cell {
                    if !taken[other] && listings[other].pos.distance(seed_pos) <= radius {
                        taken[other] = true;
                        group.push(other);
                    }
                }
            }
        }

        group.sort_unstable();
        groups.push(group);
    }

    groups
        .into_iter()
        .map(|group| {
            if group.len() == 1 {
                return MapMarker::Single(listings[group[0]].clone());
            }
            let n = group.len() as f32;
            let sum = group
                .iter()
                .fold(egui::Vec2::ZERO, |acc, &i| acc + listings[i].pos.to_vec2());
            MapMarker::Cluster {
                members: group.iter().map(|&i| listings[i].property.clone()).collect(),
                pos: (sum / n).to_pos2(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::property;

    fn placed(id: &str, x: f32, y: f32) -> PlacedListing {
        PlacedListing {
            property: Arc::new(property(id, "Paris", "Paris", 2.35, 48.85)),
            pos: Pos2::new(x, y),
        }
    }

    fn ids(marker: &MapMarker) -> Vec<String> {
        match marker {
            MapMarker::Single(l) => vec![l.property.id.to_string()],
            MapMarker::Cluster { members, .. } => {
                members.iter().map(|p| p.id.to_string()).collect()
            }
        }
    }

    #[test]
    fn test_nearby_listings_merge() {
        let markers = cluster_listings(
            vec![
                placed("a", 100.0, 100.0),
                placed("b", 130.0, 100.0),
                placed("c", 400.0, 400.0),
            ],
            50.0,
        );
        assert_eq!(markers.len(), 2);
        assert_eq!(ids(&markers[0]), ["a", "b"]);
        assert_eq!(markers[0].pos(), Pos2::new(115.0, 100.0));
        assert!(matches!(markers[1], MapMarker::Single(_)));
    }

    #[test]
    fn test_neighbor_cells_are_searched() {
        // 49 and 51 fall in different grid cells but are 2px apart
        let markers = cluster_listings(vec![placed("a", 49.0, 10.0), placed("b", 51.0, 10.0)], 50.0);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].len(), 2);
    }

    #[test]
    fn test_far_listings_stay_single() {
        let markers = cluster_listings(
            vec![placed("a", 0.0, 0.0), placed("b", 60.0, 0.0), placed("c", 0.0, 60.0)],
            50.0,
        );
        assert_eq!(markers.len(), 3);
        assert!(markers.iter().all(|m| m.len() == 1));
    }

    #[test]
    fn test_zero_radius_disables_clustering() {
        let markers = cluster_listings(vec![placed("a", 0.0, 0.0), placed("b", 0.0, 0.0)], 0.0);
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn test_cluster_style_steps() {
        assert_eq!(cluster_style(2).radius, 20.0);
        assert_eq!(cluster_style(9).color, Color32::from_rgb(0x3B, 0x82, 0xF6));
        assert_eq!(cluster_style(10).radius, 30.0);
        assert_eq!(cluster_style(29).color, Color32::from_rgb(0x1D, 0x4E, 0xD8));
        assert_eq!(cluster_style(30).radius, 40.0);
        assert_eq!(cluster_style(500).color, Color32::from_rgb(0x1E, 0x40, 0xAF));
    }
}
