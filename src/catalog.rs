//! Terra instrument catalog
//!
//! Static, immutable data loaded at startup. Data points and quiz decks
//! refer to instruments by [`InstrumentId`] and never own them.

use serde::{Deserialize, Serialize};

/// One of the five Terra sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentId {
    Modis,
    Ceres,
    Mopitt,
    Aster,
    Misr,
}

impl InstrumentId {
    /// Every instrument, in catalog order
    pub const ALL: [InstrumentId; 5] = [
        InstrumentId::Modis,
        InstrumentId::Ceres,
        InstrumentId::Mopitt,
        InstrumentId::Aster,
        InstrumentId::Misr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentId::Modis => "modis",
            InstrumentId::Ceres => "ceres",
            InstrumentId::Mopitt => "mopitt",
            InstrumentId::Aster => "aster",
            InstrumentId::Misr => "misr",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "modis" => Some(InstrumentId::Modis),
            "ceres" => Some(InstrumentId::Ceres),
            "mopitt" => Some(InstrumentId::Mopitt),
            "aster" => Some(InstrumentId::Aster),
            "misr" => Some(InstrumentId::Misr),
            _ => None,
        }
    }

    /// Catalog entry for this instrument
    pub fn info(&self) -> &'static Instrument {
        &CATALOG[*self as usize]
    }
}

/// Static description of an instrument
#[derive(Debug, Clone, Serialize)]
pub struct Instrument {
    pub id: InstrumentId,
    pub name: &'static str,
    pub icon: &'static str,
    /// CSS hex color used for the data point marker
    pub color: &'static str,
    pub description: &'static str,
    pub facts: &'static [&'static str],
}

/// Catalog entries, indexed by `InstrumentId as usize`
static CATALOG: [Instrument; 5] = [
    Instrument {
        id: InstrumentId::Modis,
        name: "MODIS",
        icon: "🌍",
        color: "#3b82f6",
        description: "Moderate Resolution Imaging Spectroradiometer",
        facts: &[
            "MODIS views the entire Earth surface every one to two days.",
            "MODIS measures in 36 spectral bands from visible to thermal infrared.",
            "MODIS fire products help track wildfires around the globe.",
        ],
    },
    Instrument {
        id: InstrumentId::Ceres,
        name: "CERES",
        icon: "☀️",
        color: "#f59e0b",
        description: "Clouds and the Earth's Radiant Energy System",
        facts: &[
            "CERES measures the energy Earth absorbs from the Sun and radiates back to space.",
            "CERES data is central to understanding Earth's energy budget.",
        ],
    },
    Instrument {
        id: InstrumentId::Mopitt,
        name: "MOPITT",
        icon: "🏭",
        color: "#ef4444",
        description: "Measurements of Pollution in the Troposphere",
        facts: &[
            "MOPITT tracks carbon monoxide in the lower atmosphere.",
            "MOPITT was provided by the Canadian Space Agency.",
            "MOPITT has mapped pollution plumes crossing oceans and continents.",
        ],
    },
    Instrument {
        id: InstrumentId::Aster,
        name: "ASTER",
        icon: "🏔️",
        color: "#10b981",
        description: "Advanced Spaceborne Thermal Emission and Reflection Radiometer",
        facts: &[
            "ASTER builds high-resolution elevation maps of Earth's land surface.",
            "ASTER was provided by Japan's Ministry of Economy, Trade and Industry.",
        ],
    },
    Instrument {
        id: InstrumentId::Misr,
        name: "MISR",
        icon: "📷",
        color: "#8b5cf6",
        description: "Multi-angle Imaging SpectroRadiometer",
        facts: &[
            "MISR uses nine cameras pointed at different angles.",
            "MISR measures aerosols, clouds and the heights of smoke plumes.",
        ],
    },
];

/// All instruments in catalog order
pub fn instruments() -> &'static [Instrument] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_indexing_matches_ids() {
        for id in InstrumentId::ALL {
            assert_eq!(id.info().id, id);
            assert!(!id.info().facts.is_empty());
        }
        assert_eq!(instruments().len(), 5);
    }

    #[test]
    fn test_instrument_id_strings() {
        for id in InstrumentId::ALL {
            assert_eq!(InstrumentId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(InstrumentId::from_str("ASTER"), Some(InstrumentId::Aster));
        assert_eq!(InstrumentId::from_str("landsat"), None);

        let json = serde_json::to_string(&InstrumentId::Mopitt).unwrap();
        assert_eq!(json, "\"mopitt\"");
    }
}
