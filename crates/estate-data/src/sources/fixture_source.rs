//! Built-in demonstration listings

use async_trait::async_trait;
use estate_core::{Coordinates, EnergyClass, Location, Property, PropertyId, PropertyType};

use super::CatalogSource;
use crate::DataError;

/// The eight demonstration listings shown when no catalog is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSource;

impl FixtureSource {
    pub const NAME: &'static str = "annonces de démonstration";

    pub fn new() -> Self {
        Self
    }

    pub fn properties() -> Vec<Property> {
        vec![
            listing(
                "1",
                "Appartement lumineux avec vue sur Seine",
                PropertyType::Apartment,
                (850_000.0, 85.0, 3),
                ("Paris 7e", "Paris", 2.3175, 48.8566),
                "Magnifique appartement rénové dans un immeuble haussmannien",
                &["Balcon", "Cave", "Gardien", "Ascenseur"],
                EnergyClass::C,
            ),
            listing(
                "2",
                "Maison familiale avec jardin",
                PropertyType::House,
                (450_000.0, 120.0, 5),
                ("Lyon", "Rhône", 4.8357, 45.7640),
                "Belle maison avec jardin arboré dans quartier calme",
                &["Jardin", "Garage", "Cheminée", "Terrasse"],
                EnergyClass::B,
            ),
            listing(
                "3",
                "Studio moderne centre-ville",
                PropertyType::Studio,
                (180_000.0, 25.0, 1),
                ("Marseille", "Bouches-du-Rhône", 5.3698, 43.2965),
                "Studio récemment rénové, idéal investissement locatif",
                &["Climatisation", "Proche transports", "Meublé"],
                EnergyClass::D,
            ),
            // West of Greenwich: negative longitude
            listing(
                "4",
                "Loft atypique ancien entrepôt",
                PropertyType::Loft,
                (650_000.0, 95.0, 2),
                ("Bordeaux", "Gironde", -0.5792, 44.8378),
                "Loft unique dans ancien entrepôt réhabilité",
                &["Hauteur sous plafond", "Poutres apparentes", "Mezzanine"],
                EnergyClass::E,
            ),
            listing(
                "5",
                "Appartement neuf standing",
                PropertyType::Apartment,
                (320_000.0, 65.0, 3),
                ("Nantes", "Loire-Atlantique", -1.5534, 47.2184),
                "Appartement neuf dans résidence de standing",
                &["Balcon", "Parking", "Piscine", "Concierge"],
                EnergyClass::A,
            ),
            listing(
                "6",
                "Maison de maître rénovée",
                PropertyType::House,
                (780_000.0, 180.0, 7),
                ("Toulouse", "Haute-Garonne", 1.4442, 43.6047),
                "Maison de maître entièrement rénovée avec goût",
                &["Jardin", "Piscine", "Garage double", "Bureau"],
                EnergyClass::B,
            ),
            listing(
                "7",
                "Appartement vue mer",
                PropertyType::Apartment,
                (590_000.0, 75.0, 3),
                ("Nice", "Alpes-Maritimes", 7.2619, 43.7102),
                "Splendide appartement avec vue panoramique sur la mer",
                &["Vue mer", "Terrasse", "Climatisation", "Parking"],
                EnergyClass::C,
            ),
            listing(
                "8",
                "Maison contemporaine",
                PropertyType::House,
                (420_000.0, 110.0, 4),
                ("Rennes", "Ille-et-Vilaine", -1.6778, 48.1173),
                "Maison contemporaine dans quartier résidentiel",
                &["Jardin", "Garage", "Cellier", "Buanderie"],
                EnergyClass::A,
            ),
        ]
    }
}

#[async_trait]
impl CatalogSource for FixtureSource {
    async fn load(&self) -> Result<Vec<Property>, DataError> {
        Ok(Self::properties())
    }

    fn source_name(&self) -> &str {
        Self::NAME
    }
}

#[allow(clippy::too_many_arguments)]
fn listing(
    id: &str,
    title: &str,
    kind: PropertyType,
    (price, surface, rooms): (f64, f64, u32),
    (city, department, lng, lat): (&str, &str, f64, f64),
    description: &str,
    features: &[&str],
    energy_class: EnergyClass,
) -> Property {
    Property {
        id: PropertyId::from(id),
        title: title.to_string(),
        kind,
        price,
        surface,
        rooms,
        location: Location {
            city: city.to_string(),
            department: department.to_string(),
            coordinates: Coordinates::new(lng, lat),
        },
        images: vec!["/placeholder.svg".to_string()],
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        energy_class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::Catalog;

    #[test]
    fn test_fixture_is_a_valid_catalog() {
        let catalog = Catalog::new(FixtureSource::properties()).unwrap();
        assert_eq!(catalog.len(), 8);
        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_fixture_stays_inside_metropolitan_france() {
        for property in FixtureSource::properties() {
            let c = property.coordinates();
            assert!((-5.5..=9.6).contains(&c.lng), "{} lng {}", property.id, c.lng);
            assert!((41.0..=51.5).contains(&c.lat), "{} lat {}", property.id, c.lat);
        }
    }

    #[tokio::test]
    async fn test_fixture_source_loads() {
        let records = FixtureSource::new().load().await.unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[6].title, "Appartement vue mer");
    }
}
