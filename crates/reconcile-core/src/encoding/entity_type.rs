use serde::{Deserialize, Serialize};

use super::Tag;

/// Harmonized type of a geographic entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Settlement,
    AdministrativeRegion,
    Country,
    Park,
    ArchitecturalStructure,
    Mountain,
    Island,
    BodyOfWater,
    Airport,
    School,
}

impl EntityType {
    /// Parse a type name, ignoring ASCII case. `"no_type_available"` and unknown
    /// names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }
}

impl Tag for EntityType {
    const ALL: &'static [Self] = &[
        Self::Settlement,
        Self::AdministrativeRegion,
        Self::Country,
        Self::Park,
        Self::ArchitecturalStructure,
        Self::Mountain,
        Self::Island,
        Self::BodyOfWater,
        Self::Airport,
        Self::School,
    ];

    fn index(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            Self::Settlement => "Settlement",
            Self::AdministrativeRegion => "AdministrativeRegion",
            Self::Country => "Country",
            Self::Park => "Park",
            Self::ArchitecturalStructure => "ArchitecturalStructure",
            Self::Mountain => "Mountain",
            Self::Island => "Island",
            Self::BodyOfWater => "BodyOfWater",
            Self::Airport => "Airport",
            Self::School => "School",
        }
    }
}
