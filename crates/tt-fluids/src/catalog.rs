//! Practical list of CoolProp fluids, searchable by name or alias.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FluidCatalogEntry {
    /// Name passed to the evaluator.
    pub coolprop_name: &'static str,
    pub display_name: &'static str,
    pub category: FluidCategory,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidCategory {
    Water,
    Refrigerant,
    Gas,
    Hydrocarbon,
}

impl FluidCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Refrigerant => "refrigerant",
            Self::Gas => "gas",
            Self::Hydrocarbon => "hydrocarbon",
        }
    }
}

impl FluidCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.coolprop_name.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }

    fn is_named(&self, name: &str) -> bool {
        self.coolprop_name.eq_ignore_ascii_case(name)
            || self.display_name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

const fn entry(
    coolprop_name: &'static str,
    display_name: &'static str,
    category: FluidCategory,
    aliases: &'static [&'static str],
) -> FluidCatalogEntry {
    FluidCatalogEntry {
        coolprop_name,
        display_name,
        category,
        aliases,
    }
}

use FluidCategory::{Gas, Hydrocarbon, Refrigerant, Water};

const PRACTICAL_COOLPROP_CATALOG: [FluidCatalogEntry; 24] = [
    entry("Water", "Water", Water, &["h2o", "steam", "agua"]),
    entry("HeavyWater", "Heavy Water", Water, &["d2o"]),
    entry("R134a", "R134a", Refrigerant, &["hfc-134a"]),
    entry("R32", "R32", Refrigerant, &["hfc-32"]),
    entry("R125", "R125", Refrigerant, &["hfc-125"]),
    entry("R152A", "R152a", Refrigerant, &["hfc-152a"]),
    entry("R245fa", "R245fa", Refrigerant, &["hfc-245fa"]),
    entry("R1234yf", "R1234yf", Refrigerant, &["hfo-1234yf"]),
    entry("R1234ze(E)", "R1234ze(E)", Refrigerant, &["hfo-1234ze", "r1234ze"]),
    entry("R22", "R22", Refrigerant, &["hcfc-22"]),
    entry("R410A", "R410A", Refrigerant, &["r410a"]),
    entry("Ammonia", "Ammonia", Refrigerant, &["nh3", "r717"]),
    entry("Air", "Air", Gas, &["atmosphere"]),
    entry("Nitrogen", "Nitrogen", Gas, &["n2"]),
    entry("Oxygen", "Oxygen", Gas, &["o2"]),
    entry("Argon", "Argon", Gas, &["ar"]),
    entry("Helium", "Helium", Gas, &["he"]),
    entry("Hydrogen", "Hydrogen", Gas, &["h2"]),
    entry("CarbonDioxide", "Carbon Dioxide", Gas, &["co2", "r744"]),
    entry("Methane", "Methane", Hydrocarbon, &["ch4"]),
    entry("Ethane", "Ethane", Hydrocarbon, &["c2h6"]),
    entry("n-Propane", "Propane", Hydrocarbon, &["c3h8", "r290", "propane"]),
    entry("IsoButane", "Isobutane", Hydrocarbon, &["r600a", "i-butane"]),
    entry("n-Butane", "n-Butane", Hydrocarbon, &["butane", "r600"]),
];

pub fn practical_coolprop_catalog() -> &'static [FluidCatalogEntry] {
    &PRACTICAL_COOLPROP_CATALOG
}

pub fn filter_practical_coolprop_catalog(query: &str) -> Vec<FluidCatalogEntry> {
    practical_coolprop_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Evaluator name for a user-typed fluid.
///
/// Exact (case-insensitive) matches on name or alias resolve to the CoolProp
/// name; anything else is passed through trimmed, so the evaluator decides.
pub fn resolve_fluid_name(name: &str) -> String {
    let trimmed = name.trim();
    practical_coolprop_catalog()
        .iter()
        .find(|entry| entry.is_named(trimmed))
        .map(|entry| entry.coolprop_name.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn coolprop_names_are_unique() {
        let mut seen = HashSet::new();
        for entry in practical_coolprop_catalog() {
            assert!(
                seen.insert(entry.coolprop_name),
                "duplicate name: {}",
                entry.coolprop_name
            );
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(resolve_fluid_name("water"), "Water");
        assert_eq!(resolve_fluid_name(" r134a "), "R134a");
        assert_eq!(resolve_fluid_name("CO2"), "CarbonDioxide");
        assert_eq!(resolve_fluid_name("propane"), "n-Propane");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(resolve_fluid_name(" Toluene "), "Toluene");
    }

    #[test]
    fn search_finds_refrigerants() {
        let results = filter_practical_coolprop_catalog("hfo");
        assert!(results.iter().any(|e| e.coolprop_name == "R1234yf"));
        assert!(results.iter().all(|e| e.category == FluidCategory::Refrigerant));
    }
}
