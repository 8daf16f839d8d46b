// src/domain/sectors.rs

use crate::domain::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// City sectors as drawn on the Ames visitor map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "DT")]
    Downtown,
    #[serde(rename = "SO")]
    South,
    #[serde(rename = "WE")]
    West,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "NO")]
    North,
    #[serde(rename = "NW")]
    NorthWest,
}

impl Sector {
    /// Order used by the sidebar selector.
    pub const MENU_ORDER: [Sector; 6] = [
        Sector::Downtown,
        Sector::South,
        Sector::West,
        Sector::SouthEast,
        Sector::North,
        Sector::NorthWest,
    ];

    /// Order used on the x axis of the sector plots.
    pub const PLOT_ORDER: [Sector; 6] = [
        Sector::NorthWest,
        Sector::South,
        Sector::West,
        Sector::SouthEast,
        Sector::North,
        Sector::Downtown,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Sector::Downtown => "DT",
            Sector::South => "SO",
            Sector::West => "WE",
            Sector::SouthEast => "SE",
            Sector::North => "NO",
            Sector::NorthWest => "NW",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Sector::Downtown => "Downtown",
            Sector::South => "South",
            Sector::West => "West",
            Sector::SouthEast => "South East",
            Sector::North => "North",
            Sector::NorthWest => "North West",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::MENU_ORDER.into_iter().find(|s| s.code() == code)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::MENU_ORDER.into_iter().find(|s| s.name() == name)
    }
}

/// `MSSubClass` codes after regrouping into six house types.
pub const HOUSE_TYPES: [(u8, &str); 6] = [
    (1, "Duplex or 2-Family"),
    (2, "2-Story Townhouse"),
    (3, "Split Foyer"),
    (4, "1-Story Townhouse"),
    (5, "1-Story House"),
    (6, "2-Story House"),
];

pub fn house_type_name(code: u8) -> Option<&'static str> {
    HOUSE_TYPES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub struct Landmark {
    pub name: &'static str,
    pub location: GeoPoint,
}

pub const LANDMARKS: [Landmark; 6] = [
    Landmark {
        name: "Iowa State University",
        location: GeoPoint {
            latitude: 42.0267,
            longitude: -93.6465,
        },
    },
    Landmark {
        name: "Municipal Airport",
        location: GeoPoint {
            latitude: 41.9987,
            longitude: -93.6223,
        },
    },
    Landmark {
        name: "North Grand Mall",
        location: GeoPoint {
            latitude: 42.0494,
            longitude: -93.6224,
        },
    },
    Landmark {
        name: "Mary Greeley Medical Center",
        location: GeoPoint {
            latitude: 42.0323,
            longitude: -93.6111,
        },
    },
    Landmark {
        name: "Jack Trice Stadium",
        location: GeoPoint {
            latitude: 42.0140,
            longitude: -93.6359,
        },
    },
    Landmark {
        name: "Walmart Supercenter",
        location: GeoPoint {
            latitude: 42.0160016,
            longitude: -93.6068719,
        },
    },
];

pub const AMES_CENTER: GeoPoint = GeoPoint {
    latitude: 42.034534,
    longitude: -93.620369,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_names_round_trip() {
        for sector in Sector::MENU_ORDER {
            assert_eq!(Sector::from_code(sector.code()), Some(sector));
            assert_eq!(Sector::from_name(sector.name()), Some(sector));
        }
        assert_eq!(Sector::from_name("Uptown"), None);
    }

    #[test]
    fn house_type_lookup() {
        assert_eq!(house_type_name(5), Some("1-Story House"));
        assert_eq!(house_type_name(9), None);
    }

    #[test]
    fn landmarks_project_near_city_center() {
        let center = AMES_CENTER.project().unwrap();
        for mark in &LANDMARKS {
            let p = mark.location.project().unwrap();
            assert!((p.x - center.x).abs() < 8_000.0, "{} too far east/west", mark.name);
            assert!((p.y - center.y).abs() < 8_000.0, "{} too far north/south", mark.name);
        }
    }
}
