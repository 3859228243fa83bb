//! Display helpers for the presentation layer.
//!
//! All functions are total over the closed enums; amounts follow the fr-FR
//! conventions used by the listing cards (narrow no-break space between digit
//! groups, no-break space before the unit).

use crate::model::{EnergyClass, Property, PropertyType};

const GROUP_SEPARATOR: char = '\u{202F}';
const UNIT_SEPARATOR: char = '\u{00A0}';

impl PropertyType {
    /// French display label
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Appartement",
            PropertyType::House => "Maison",
            PropertyType::Studio => "Studio",
            PropertyType::Loft => "Loft",
        }
    }
}

pub fn type_label(kind: PropertyType) -> &'static str {
    kind.label()
}

/// Severity bucket of an energy class, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnergyTier {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Mediocre,
    Poor,
    VeryPoor,
}

impl EnergyTier {
    /// Badge color as RGB
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            EnergyTier::Excellent => [0x22, 0xC5, 0x5E],
            EnergyTier::VeryGood => [0x4A, 0xDE, 0x80],
            EnergyTier::Good => [0xFA, 0xCC, 0x15],
            EnergyTier::Fair => [0xFB, 0x92, 0x3C],
            EnergyTier::Mediocre => [0xF9, 0x73, 0x16],
            EnergyTier::Poor => [0xF8, 0x71, 0x71],
            EnergyTier::VeryPoor => [0xEF, 0x44, 0x44],
        }
    }

    /// 0 (best) to 6 (worst)
    pub fn severity(&self) -> u8 {
        *self as u8
    }
}

impl EnergyClass {
    pub fn tier(&self) -> EnergyTier {
        match self {
            EnergyClass::A => EnergyTier::Excellent,
            EnergyClass::B => EnergyTier::VeryGood,
            EnergyClass::C => EnergyTier::Good,
            EnergyClass::D => EnergyTier::Fair,
            EnergyClass::E => EnergyTier::Mediocre,
            EnergyClass::F => EnergyTier::Poor,
            EnergyClass::G => EnergyTier::VeryPoor,
        }
    }
}

pub fn color_tier(class: EnergyClass) -> EnergyTier {
    class.tier()
}

/// Group the digits of a whole number by thousands
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}

/// Round to a whole number and group it, keeping the sign
fn format_whole(amount: f64) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let rounded = amount.round();
    let grouped = group_digits(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Euro amount without decimals, e.g. `850 000 €`
pub fn format_currency(amount: f64) -> String {
    format!("{}{}€", format_whole(amount), UNIT_SEPARATOR)
}

/// `85 m²`, keeping a decimal part when there is one
pub fn format_surface(surface: f64) -> String {
    format!("{}{}m²", surface, UNIT_SEPARATOR)
}

/// `1 pièce`, `3 pièces`
pub fn format_rooms(rooms: u32) -> String {
    if rooms > 1 {
        format!("{} pièces", rooms)
    } else {
        format!("{} pièce", rooms)
    }
}

/// Rounded price per square meter
pub fn price_per_square_meter(property: &Property) -> f64 {
    (property.price / property.surface).round()
}

/// `10 000 €/m²`
pub fn format_price_per_square_meter(property: &Property) -> String {
    format!(
        "{}{}€/m²",
        format_whole(price_per_square_meter(property)),
        UNIT_SEPARATOR
    )
}

/// `0 bien trouvé`, `1 bien trouvé`, `3 biens trouvés`
pub fn format_result_count(count: usize) -> String {
    if count > 1 {
        format!("{} biens trouvés", count)
    } else {
        format!("{} bien trouvé", count)
    }
}

/// Price slider label; the ceiling reads as open-ended, e.g. `1M€+`
pub fn format_price_ceiling(value: f64, ceiling: f64) -> String {
    if value < ceiling {
        return format_currency(value);
    }
    let whole = ceiling.round().max(0.0) as u64;
    if whole >= 1_000_000 && whole % 1_000_000 == 0 {
        format!("{}M€+", whole / 1_000_000)
    } else if whole >= 1_000 && whole % 1_000 == 0 {
        format!("{}k€+", whole / 1_000)
    } else {
        format!("{}+", format_currency(ceiling))
    }
}

/// Surface slider label; the ceiling reads as open-ended, e.g. `200m²+`
pub fn format_surface_ceiling(value: f64, ceiling: f64) -> String {
    if value < ceiling {
        format_surface(value)
    } else {
        format!("{}m²+", ceiling)
    }
}
