use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Valeur placée dans `supervisor` quand aucun superviseur n'est éligible.
pub const UNASSIGNED: &str = "unassigned";

/// Rôle d'un membre dans la rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Éligible aux gardes de jour et de nuit.
    Coverage,
    /// Éligible à la supervision hebdomadaire.
    Supervisor,
}

/// Garde réassignable d'une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duty {
    Day,
    Night,
}

/// Membre du pool. Le nom est la seule clé d'identité.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub name: String,
    pub roles: Vec<Role>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Worker {
    pub fn new<N: Into<String>>(name: N, roles: &[Role]) -> Self {
        Self {
            name: name.into(),
            roles: roles.to_vec(),
            active: true,
        }
    }

    pub fn coverage<N: Into<String>>(name: N) -> Self {
        Self::new(name, &[Role::Coverage])
    }

    pub fn supervisor<N: Into<String>>(name: N) -> Self {
        Self::new(name, &[Role::Supervisor])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_coverage_eligible(&self) -> bool {
        self.active && self.has_role(Role::Coverage)
    }

    pub fn is_supervisor_eligible(&self) -> bool {
        self.active && self.has_role(Role::Supervisor)
    }
}

/// Noms des membres actifs éligibles à la garde, dans l'ordre du roster.
pub fn coverage_pool(workers: &[Worker]) -> Vec<&str> {
    workers
        .iter()
        .filter(|w| w.is_coverage_eligible())
        .map(|w| w.name.as_str())
        .collect()
}

/// Noms des superviseurs actifs, dans l'ordre du roster.
pub fn supervisor_pool(workers: &[Worker]) -> Vec<&str> {
    workers
        .iter()
        .filter(|w| w.is_supervisor_eligible())
        .map(|w| w.name.as_str())
        .collect()
}

/// Identifiant fort pour DayRecord
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayId(String);

impl DayId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Une journée du planning.
///
/// `date` suit le format `YYYY/MM/DD` et se trie lexicalement. Les champs
/// `original_*` gardent la trace de l'affectation générée quand un échange
/// manuel l'a remplacée ; ils ne servent qu'à l'affichage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub id: DayId,
    pub weekday: Weekday,
    pub date: String,
    pub day_worker: String,
    pub night_worker: String,
    pub supervisor: String,
    #[serde(default)]
    pub holiday: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_day_worker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_night_worker: Option<String>,
}

impl DayRecord {
    pub fn worker_for(&self, duty: Duty) -> &str {
        match duty {
            Duty::Day => &self.day_worker,
            Duty::Night => &self.night_worker,
        }
    }
}

/// Données complètes : membres + planning ordonné par date.
///
/// `locked_months` contient des clés `YYYY/MM` ; un mois verrouillé n'est
/// plus ni généré ni modifié.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub workers: Vec<Worker>,
    pub days: Vec<DayRecord>,
    #[serde(default)]
    pub locked_months: BTreeSet<String>,
}

impl Roster {
    pub fn find_worker<'a>(&'a self, name: &str) -> Option<&'a Worker> {
        self.workers.iter().find(|w| w.name == name)
    }
    pub fn find_day<'a>(&'a self, date: &str) -> Option<&'a DayRecord> {
        self.days.iter().find(|d| d.date == date)
    }

    /// Vrai si le mois de `date` (ou la clé `YYYY/MM` elle-même) est verrouillé.
    pub fn is_locked(&self, date: &str) -> bool {
        let mut parts = date.split('/');
        match (parts.next(), parts.next()) {
            (Some(year), Some(month)) => {
                self.locked_months.contains(&format!("{year}/{month}"))
            }
            _ => false,
        }
    }
}
