//! Static satellite catalog
//!
//! Maps catalog IDs to mission metadata used for category filtering and
//! the detail panel. Objects missing from the table render with the
//! default category and no live feed.

/// Coarse mission category for an object in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Iss,
    Telescope,
    EarthObservation,
    Weather,
    Communication,
    Navigation,
    Unknown,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Iss => "Station",
            Self::Telescope => "Telescope",
            Self::EarthObservation => "Earth observation",
            Self::Weather => "Weather",
            Self::Communication => "Communication",
            Self::Navigation => "Navigation",
            Self::Unknown => "Unknown",
        }
    }
}

/// Catalog metadata for a known satellite.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub catalog_id: &'static str,
    pub category: Category,
    pub has_camera: bool,
    pub description: &'static str,
    pub live_feed_url: Option<&'static str>,
}

/// Look up catalog metadata by catalog ID.
pub fn catalog_entry(catalog_id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.catalog_id == catalog_id)
}

/// Category and camera flag for an entity, with the table's defaults
/// applied for unknown objects.
pub fn category_for(catalog_id: &str) -> (Category, bool) {
    match catalog_entry(catalog_id) {
        Some(entry) => (entry.category, entry.has_camera),
        None => (Category::Unknown, false),
    }
}

static CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        catalog_id: "25544",
        category: Category::Iss,
        has_camera: true,
        description: "International Space Station, crewed LEO laboratory",
        live_feed_url: Some("https://www.nasa.gov/live"),
    },
    CatalogEntry {
        catalog_id: "20580",
        category: Category::Telescope,
        has_camera: false,
        description: "Hubble Space Telescope",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "36411",
        category: Category::Telescope,
        has_camera: false,
        description: "Solar Dynamics Observatory",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "25994",
        category: Category::EarthObservation,
        has_camera: true,
        description: "Terra (EOS AM-1) flagship Earth observer",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "27424",
        category: Category::EarthObservation,
        has_camera: true,
        description: "Aqua (EOS PM-1) water-cycle observer",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "39084",
        category: Category::EarthObservation,
        has_camera: true,
        description: "Landsat 8 land imager",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "49260",
        category: Category::EarthObservation,
        has_camera: true,
        description: "Landsat 9 land imager",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "39634",
        category: Category::EarthObservation,
        has_camera: false,
        description: "Sentinel-1A radar imaging",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "40697",
        category: Category::EarthObservation,
        has_camera: true,
        description: "Sentinel-2A multispectral imaging",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "41335",
        category: Category::EarthObservation,
        has_camera: false,
        description: "Sentinel-3A ocean and land monitoring",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "33591",
        category: Category::Weather,
        has_camera: false,
        description: "NOAA-19 polar weather satellite",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "43013",
        category: Category::Weather,
        has_camera: false,
        description: "NOAA-20 (JPSS-1) polar weather satellite",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "41866",
        category: Category::Weather,
        has_camera: false,
        description: "GOES-16 geostationary weather satellite",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "29155",
        category: Category::Weather,
        has_camera: false,
        description: "GOES-13 geostationary weather satellite",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "26038",
        category: Category::Communication,
        has_camera: false,
        description: "Intelsat 901 GEO communications",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "19548",
        category: Category::Communication,
        has_camera: false,
        description: "TDRS-3 data relay",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "24876",
        category: Category::Navigation,
        has_camera: false,
        description: "GPS BIIR-2 (NAVSTAR 43)",
        live_feed_url: None,
    },
    CatalogEntry {
        catalog_id: "37846",
        category: Category::Navigation,
        has_camera: false,
        description: "Galileo IOV-1 (GSAT0101)",
        live_feed_url: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iss_is_a_camera_equipped_station() {
        let (category, has_camera) = category_for("25544");
        assert_eq!(category, Category::Iss);
        assert!(has_camera);
        assert!(catalog_entry("25544").unwrap().live_feed_url.is_some());
    }

    #[test]
    fn unknown_ids_default() {
        let (category, has_camera) = category_for("99999");
        assert_eq!(category, Category::Unknown);
        assert!(!has_camera);
        assert!(catalog_entry("99999").is_none());
    }

    #[test]
    fn catalog_ids_are_digit_strings() {
        for entry in CATALOG {
            assert!(entry.catalog_id.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
