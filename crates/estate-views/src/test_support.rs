use std::sync::Arc;

use estate_core::{
    AppSettings, Catalog, CoordinatorOptions, Coordinates, EnergyClass, Location, Property,
    PropertyId, PropertyType, ViewCoordinator,
};

use crate::ViewerContext;

pub fn property(id: &str, city: &str, department: &str, lng: f64, lat: f64) -> Property {
    Property {
        id: PropertyId::from(id),
        title: format!("Appartement à {city}"),
        kind: PropertyType::Apartment,
        price: 300_000.0,
        surface: 60.0,
        rooms: 3,
        location: Location {
            city: city.to_string(),
            department: department.to_string(),
            coordinates: Coordinates::new(lng, lat),
        },
        images: Vec::new(),
        description: String::new(),
        features: vec!["Balcon".to_string()],
        energy_class: EnergyClass::C,
    }
}

/// Paris "1", Lyon "2", Marseille "3"
pub fn coordinator() -> Arc<ViewCoordinator> {
    let catalog = Catalog::new(vec![
        property("1", "Paris", "Paris", 2.3522, 48.8566),
        property("2", "Lyon", "Rhône", 4.8357, 45.7640),
        property("3", "Marseille", "Bouches-du-Rhône", 5.3698, 43.2965),
    ])
    .unwrap();
    Arc::new(ViewCoordinator::new(catalog, CoordinatorOptions::default()))
}

pub fn viewer_context() -> ViewerContext {
    ViewerContext::new(coordinator(), Arc::new(AppSettings::default()))
}
