//! CSV catalog files
//!
//! One listing per row with the header
//! `id,title,type,price,surface,rooms,city,department,lng,lat,images,description,features,energyClass`.
//! The `images` and `features` columns hold lists joined by the list separator.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use async_trait::async_trait;
use csv::ReaderBuilder;
use estate_core::{Coordinates, EnergyClass, Location, Property, PropertyId, PropertyType};
use serde::Deserialize;

use super::CatalogSource;
use crate::DataError;

/// CSV data source for listing catalogs
pub struct CsvSource {
    path: PathBuf,
    name: String,
    delimiter: char,
    list_separator: char,
}

/// A row as it appears in the file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRecord {
    id: String,
    title: String,
    #[serde(rename = "type")]
    kind: PropertyType,
    price: f64,
    surface: f64,
    rooms: u32,
    city: String,
    #[serde(alias = "region")]
    department: String,
    lng: f64,
    lat: f64,
    #[serde(default)]
    images: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: String,
    energy_class: EnergyClass,
}

impl CsvRecord {
    fn into_property(self, list_separator: char) -> Property {
        Property {
            id: PropertyId::new(self.id),
            title: self.title,
            kind: self.kind,
            price: self.price,
            surface: self.surface,
            rooms: self.rooms,
            location: Location {
                city: self.city,
                department: self.department,
                coordinates: Coordinates::new(self.lng, self.lat),
            },
            images: split_list(&self.images, list_separator),
            description: self.description,
            features: split_list(&self.features, list_separator),
            energy_class: self.energy_class,
        }
    }
}

fn split_list(field: &str, separator: char) -> Vec<String> {
    field
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        let name = path.display().to_string();
        Self {
            path,
            name,
            delimiter: ',',
            list_separator: '|',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_list_separator(mut self, separator: char) -> Self {
        self.list_separator = separator;
        self
    }

    /// Parse CSV rows into listings
    pub fn parse_records<R: Read>(
        reader: R,
        delimiter: char,
        list_separator: char,
    ) -> Result<Vec<Property>, DataError> {
        if !delimiter.is_ascii() {
            return Err(DataError::Csv(format!(
                "delimiter {delimiter:?} is not a single ASCII character"
            )));
        }
        let delimiter = delimiter as u8;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<CsvRecord>() {
            records.push(row?.into_property(list_separator));
        }
        Ok(records)
    }
}

#[async_trait]
impl CatalogSource for CsvSource {
    async fn load(&self) -> Result<Vec<Property>, DataError> {
        let path = self.path.clone();
        let delimiter = self.delimiter;
        let list_separator = self.list_separator;

        let records = tokio::task::spawn_blocking(move || {
            let file = File::open(&path)?;
            Self::parse_records(BufReader::new(file), delimiter, list_separator)
        })
        .await??;

        tracing::debug!("Read {} rows from {}", records.len(), self.name);
        Ok(records)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "id,title,type,price,surface,rooms,city,department,lng,lat,images,description,features,energyClass";

    fn parse(body: &str) -> Result<Vec<Property>, DataError> {
        let text = format!("{HEADER}\n{body}");
        CsvSource::parse_records(text.as_bytes(), ',', '|')
    }

    #[test]
    fn test_parse_rows() {
        let records = parse(
            "4,Loft atypique,loft,650000,95,2,Bordeaux,Gironde,-0.5792,44.8378,/a.jpg|/b.jpg,Loft unique,Mezzanine | Poutres apparentes,E\n\
             5,Appartement neuf,apartment,320000,65,3,Nantes,Loire-Atlantique,-1.5534,47.2184,,,,A\n",
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        let loft = &records[0];
        assert_eq!(loft.id.as_str(), "4");
        assert_eq!(loft.kind, PropertyType::Loft);
        assert_eq!(loft.location.coordinates, Coordinates::new(-0.5792, 44.8378));
        assert_eq!(loft.images, ["/a.jpg", "/b.jpg"]);
        assert_eq!(loft.features, ["Mezzanine", "Poutres apparentes"]);
        assert_eq!(loft.energy_class, EnergyClass::E);

        let flat = &records[1];
        assert!(flat.images.is_empty());
        assert!(flat.features.is_empty());
        assert_eq!(flat.description, "");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let records = parse(
            "1,\"Studio, centre-ville\",studio,180000,25,1,Marseille,Bouches-du-Rhône,5.3698,43.2965,,\"Rénové, meublé\",,D\n",
        )
        .unwrap();
        assert_eq!(records[0].title, "Studio, centre-ville");
        assert_eq!(records[0].description, "Rénové, meublé");
    }

    #[test]
    fn test_custom_delimiter() {
        let text = "id;title;type;price;surface;rooms;city;department;lng;lat;images;description;features;energyClass\n\
                    2;Maison;house;450000;120;5;Lyon;Rhône;4.8357;45.7640;;;Jardin/Garage;B\n";
        let records = CsvSource::parse_records(text.as_bytes(), ';', '/').unwrap();
        assert_eq!(records[0].features, ["Jardin", "Garage"]);
    }

    #[test]
    fn test_bad_values_are_csv_errors() {
        assert!(matches!(
            parse("1,T,castle,1,1,1,C,D,0,0,,,,A\n"),
            Err(DataError::Csv(_))
        ));
        assert!(matches!(
            parse("1,T,house,cheap,1,1,C,D,0,0,,,,A\n"),
            Err(DataError::Csv(_))
        ));
    }

    #[test]
    fn test_multibyte_delimiter_is_rejected() {
        let result = CsvSource::parse_records("".as_bytes(), '→', '|');
        assert!(matches!(result, Err(DataError::Csv(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let source = CsvSource::new(PathBuf::from("/nonexistent/listings.csv"));
        assert!(matches!(source.load().await, Err(DataError::Io(_))));
    }
}
