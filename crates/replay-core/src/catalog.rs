//! Race ability catalog used to classify commands.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::types::Race;

/// Commands every race issues that never count as special abilities.
pub const COMMON_ABILITIES: [&str; 5] = ["Attack", "Stop", "HoldPosition", "Patrol", "RightClick"];

/// The command counted as an attack order.
pub const ATTACK_ABILITY: &str = "Attack";

/// Whether `name` is one of the common commands.
pub fn is_common(name: &str) -> bool {
    COMMON_ABILITIES.contains(&name)
}

const PROTOSS_ABILITIES: &[&str] = &[
    "AdeptPhaseShift",
    "Blink",
    "ChronoBoostEnergyCost",
    "DisruptionBlast",
    "Feedback",
    "ForceField",
    "GravitonBeam",
    "GuardianShield",
    "Hallucination",
    "MassRecallNexus",
    "OracleRevelation",
    "PhasingMode",
    "PsiStorm",
    "PurificationNova",
    "ShieldBatteryRecharge",
    "StasisTrap",
    "TimeWarp",
    "VoidRayPrismaticAlignment",
];

const TERRAN_ABILITIES: &[&str] = &[
    "AssaultMode",
    "CalldownMULE",
    "CloakOnBanshee",
    "EMP",
    "FighterMode",
    "KD8Charge",
    "NukeCalldown",
    "ScannerSweep",
    "SiegeMode",
    "SnipeDoT",
    "Stimpack",
    "StimpackMarauder",
    "SupplyDrop",
    "TacticalJump",
    "Unsiege",
    "WidowMineBurrow",
    "YamatoGun",
];

const ZERG_ABILITIES: &[&str] = &[
    "Abduct",
    "BlindingCloud",
    "BurrowDown",
    "BurrowUp",
    "CausticSpray",
    "Contaminate",
    "CorrosiveBile",
    "FungalGrowth",
    "GenerateCreep",
    "InjectLarva",
    "NeuralParasite",
    "ParasiticBomb",
    "SpawnLocusts",
    "Transfusion",
    "ViperConsume",
];

/// Ability names usable by each race, keyed by canonical race name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityCatalog {
    races: BTreeMap<String, BTreeSet<String>>,
}

impl AbilityCatalog {
    /// Parses a catalog from JSON of the form `{"Protoss": ["Blink", ...], ...}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Abilities a race may use, common commands included if listed.
    pub fn abilities(&self, race: Race) -> Result<&BTreeSet<String>, AnalysisError> {
        self.races
            .get(race.as_str())
            .ok_or(AnalysisError::UnknownRace { race })
    }

    /// Whether `name` is a special ability for `race`.
    pub fn is_special(&self, race: Race, name: &str) -> Result<bool, AnalysisError> {
        Ok(self.abilities(race)?.contains(name) && !is_common(name))
    }
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        let races = Race::ALL
            .into_iter()
            .map(|race| {
                let names = match race {
                    Race::Protoss => PROTOSS_ABILITIES,
                    Race::Terran => TERRAN_ABILITIES,
                    Race::Zerg => ZERG_ABILITIES,
                };
                let mut set: BTreeSet<String> = names.iter().map(ToString::to_string).collect();
                set.extend(COMMON_ABILITIES.iter().map(ToString::to_string));
                (race.as_str().to_string(), set)
            })
            .collect();
        Self { races }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_covers_every_race() {
        let catalog = AbilityCatalog::default();
        for race in Race::ALL {
            assert!(!catalog.abilities(race).unwrap().is_empty());
        }
    }

    #[test]
    fn common_commands_are_never_special() {
        let catalog = AbilityCatalog::default();
        assert!(catalog.abilities(Race::Protoss).unwrap().contains("Attack"));
        assert!(!catalog.is_special(Race::Protoss, "Attack").unwrap());
        assert!(catalog.is_special(Race::Protoss, "Blink").unwrap());
    }

    #[test]
    fn abilities_of_other_races_are_not_special() {
        let catalog = AbilityCatalog::default();
        assert!(!catalog.is_special(Race::Terran, "Blink").unwrap());
        assert!(catalog.is_special(Race::Terran, "Stimpack").unwrap());
    }

    #[test]
    fn catalog_from_json() {
        let catalog = AbilityCatalog::from_json(r#"{"Zerg": ["InjectLarva", "Attack"]}"#).unwrap();

        assert!(catalog.is_special(Race::Zerg, "InjectLarva").unwrap());
        assert!(!catalog.is_special(Race::Zerg, "Attack").unwrap());
        assert_eq!(
            catalog.abilities(Race::Protoss),
            Err(AnalysisError::UnknownRace {
                race: Race::Protoss
            })
        );
    }

    #[test]
    fn catalog_serializes_as_plain_map() {
        let catalog = AbilityCatalog::from_json(r#"{"Terran": ["Stimpack", "EMP"]}"#).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"Terran":["EMP","Stimpack"]}"#);
    }
}
