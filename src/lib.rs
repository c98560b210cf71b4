#![forbid(unsafe_code)]
//! Shiftrota — rotation équitable des gardes jour/nuit et de la supervision
//! hebdomadaire, sans base de données.
//!
//! - Bilan de charge rejoué depuis tout l'historique.
//! - Génération gloutonne jour par jour (pas de nuits consécutives, repos
//!   après une nuit, jamais deux gardes le même jour).
//! - Validation et application d'échanges manuels, mois verrouillables.
//! - Relevé d'heures individuel (normal, jeudi/férié, vendredi, nuit).
//! - Stockage fichiers (JSON/CSV) en dehors du cœur.

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use model::{DayId, DayRecord, Duty, Role, Roster, Worker, UNASSIGNED};
pub use report::{
    busiest, load_report, worker_timeline, DayKind, HoursBreakdown, LoadLine, TimelineRow,
    WorkerTimeline,
};
pub use scheduler::{
    aggregate_history, apply_swap, detect_conflicts, generate_block, validate_swap, Conflict,
    ConflictKind, GenerateRequest, GeneratedBlock, Relaxation, SchedError, Scheduler,
    ShiftWeights, SwapRejection, SwapVerdict, WorkerLoad,
};
pub use storage::{JsonStorage, Storage};
