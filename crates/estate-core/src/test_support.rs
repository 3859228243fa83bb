//! Listing builders shared by the unit tests

use crate::catalog::Catalog;
use crate::model::{Coordinates, EnergyClass, Location, Property, PropertyId, PropertyType};

pub fn property(
    id: &str,
    city: &str,
    price: f64,
    rooms: u32,
    kind: PropertyType,
    surface: f64,
) -> Property {
    Property {
        id: PropertyId::from(id),
        title: format!("{} à {}", kind, city),
        kind,
        price,
        surface,
        rooms,
        location: Location {
            city: city.to_string(),
            department: String::new(),
            coordinates: Coordinates::new(2.35, 48.85),
        },
        images: Vec::new(),
        description: String::new(),
        features: Vec::new(),
        energy_class: EnergyClass::C,
    }
}

/// The two-listing catalog used by the worked examples
pub fn paris_lyon() -> Catalog {
    let mut paris = property("1", "Paris 7e", 850_000.0, 3, PropertyType::Apartment, 85.0);
    paris.location.department = "Paris".to_string();
    let mut lyon = property("2", "Lyon", 450_000.0, 5, PropertyType::House, 120.0);
    lyon.location.department = "Rhône".to_string();
    lyon.location.coordinates = Coordinates::new(4.8357, 45.7640);

    Catalog::new(vec![paris, lyon]).expect("fixture listings are valid")
}

/// A wider catalog covering every type, with prices and surfaces on both sides of round bounds
pub fn mixed() -> Catalog {
    let rows = [
        ("a", "Paris 7e", "Paris", "Appartement lumineux", PropertyType::Apartment, 850_000.0, 85.0, 3),
        ("b", "Lyon", "Rhône", "Maison familiale avec jardin", PropertyType::House, 450_000.0, 120.0, 5),
        ("c", "Marseille", "Bouches-du-Rhône", "Studio moderne", PropertyType::Studio, 180_000.0, 25.0, 1),
        ("d", "Bordeaux", "Gironde", "Loft atypique", PropertyType::Loft, 650_000.0, 95.0, 2),
        ("e", "Nantes", "Loire-Atlantique", "Appartement neuf", PropertyType::Apartment, 320_000.0, 65.0, 3),
        ("f", "Toulouse", "Haute-Garonne", "Maison de maître", PropertyType::House, 780_000.0, 180.0, 7),
        ("g", "Nice", "Alpes-Maritimes", "Appartement vue mer", PropertyType::Apartment, 590_000.0, 75.0, 3),
        ("h", "Rennes", "Ille-et-Vilaine", "Maison contemporaine", PropertyType::House, 420_000.0, 110.0, 4),
        ("i", "Villeurbanne", "Rhône", "Studio étudiant", PropertyType::Studio, 0.0, 18.0, 1),
    ];

    let records = rows
        .iter()
        .map(|&(id, city, department, title, kind, price, surface, rooms)| {
            let mut p = property(id, city, price, rooms, kind, surface);
            p.title = title.to_string();
            p.location.department = department.to_string();
            p
        })
        .collect::<Vec<_>>();

    Catalog::new(records).expect("fixture listings are valid")
}
