//! Static reference data: KPI classifications, stations and the name pools
//! used for descriptive record fields.

/// One KPI classification. Records are generated per KPI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiCode {
    pub code: &'static str,
    pub description: &'static str,
    /// Classification tag, e.g. `Cleaning` or `Maintenance`.
    pub category: &'static str,
    pub annual_threshold_hours: u32,
}

/// A station. Stations without a section can be excluded from sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Station {
    pub code: &'static str,
    pub name: &'static str,
    pub section: Option<&'static str>,
}

impl Station {
    pub fn section_or_unknown(&self) -> &'static str {
        self.section.unwrap_or("Unknown")
    }
}

const fn kpi(
    code: &'static str,
    description: &'static str,
    category: &'static str,
    annual_threshold_hours: u32,
) -> KpiCode {
    KpiCode {
        code,
        description,
        category,
        annual_threshold_hours,
    }
}

const fn station(code: &'static str, name: &'static str, section: Option<&'static str>) -> Station {
    Station {
        code,
        name,
        section,
    }
}

pub const KPI_CODES: &[KpiCode] = &[
    kpi("GRAFFITI", "Graffiti Removal", "Cleaning", 24),
    kpi("TRACKSIDE_CLEAN", "Trackside Cleaning", "Cleaning", 48),
    kpi("ESCALATOR_REPAIR", "Escalator Repair", "Maintenance", 100),
    kpi("LIFT_MAINTENANCE", "Lift Maintenance", "Maintenance", 100),
    kpi("STATION_CLEAN", "Station Cleaning", "Cleaning", 48),
    kpi("PLATFORM_REPAIR", "Platform Repair", "Maintenance", 72),
    kpi("LIGHTING_FIX", "Lighting Repair", "Maintenance", 24),
    kpi("SIGNAGE_UPDATE", "Signage Update", "Maintenance", 24),
    kpi("TOILET_CLEAN", "Toilet Cleaning", "Cleaning", 36),
    kpi("HVAC_MAINTENANCE", "HVAC Maintenance", "Maintenance", 120),
];

pub const STATIONS: &[Station] = &[
    station("KGX", "Kings Cross St Pancras", Some("North")),
    station("LBG", "London Bridge", Some("South")),
    station("VIC", "Victoria", Some("South")),
    station("WAT", "Waterloo", Some("South")),
    station("EUS", "Euston", Some("North")),
    station("PAD", "Paddington", Some("West")),
    station("LST", "Liverpool Street", Some("East")),
    station("CHX", "Charing Cross", Some("Central")),
    station("MOG", "Moorgate", Some("Central")),
    station("CAN", "Cannon Street", Some("Central")),
    station("BFR", "Blackfriars", Some("Central")),
    station("FAR", "Farringdon", Some("Central")),
    station("OXC", "Oxford Circus", Some("West")),
    station("BDS", "Bond Street", Some("West")),
    station("TCR", "Tottenham Court Road", Some("Central")),
    station("BAK", "Baker Street", Some("North")),
    station("WAL", "Waterloo East", Some("South")),
    station("CLJ", "Clapham Junction", Some("South")),
    station("STR", "Stratford", Some("East")),
    station("CRY", "Croydon", Some("South")),
    // depots without an operational section
    station("OOC", "Old Oak Common Depot", None),
    station("ILF", "Ilford Depot", None),
];

pub const REPORTERS: &[&str] = &[
    "John Smith",
    "Jane Doe",
    "Robert Johnson",
    "Emily Williams",
    "Michael Brown",
    "Sarah Davis",
    "David Wilson",
    "Lisa Anderson",
    "James Taylor",
    "Mary Thomas",
    "Christopher Moore",
    "Patricia Martin",
    "Daniel Jackson",
    "Jennifer White",
    "Matthew Harris",
];

pub const INSTRUCTION_CODES: &[&str] = &[
    "MAINT", "CLEAN", "REPAIR", "INSPECT", "REPLACE", "INSTALL", "REMOVE", "UPDATE",
];

/// Places within a station; combined with the station name for `LocationName`.
pub const SUBLOCATIONS: &[&str] = &[
    "Platform 1",
    "Platform 2",
    "Platform 3",
    "Main Concourse",
    "North Entrance",
    "South Entrance",
    "East Entrance",
    "West Entrance",
    "Ticket Hall",
    "Gateline",
    "Station Office",
    "Staff Room",
    "Public Toilets",
    "Lift Shaft A",
    "Escalator 1",
    "Escalator 2",
    "Stairwell A",
    "Waiting Room",
];

pub fn find_kpi(code: &str) -> Option<&'static KpiCode> {
    KPI_CODES.iter().find(|k| k.code == code)
}

/// The station pool, optionally without unsectioned stations.
pub fn stations(exclude_null_sections: bool) -> Vec<&'static Station> {
    STATIONS
        .iter()
        .filter(|s| !exclude_null_sections || s.section.is_some())
        .collect()
}
