#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use shiftrota::{
    io,
    model::Duty,
    report::{busiest, load_report, worker_timeline},
    scheduler::{GeneratedBlock, Scheduler, ShiftWeights, SwapVerdict},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de rotation des gardes jour/nuit (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster (membres + planning)
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone, Copy)]
struct WeightArgs {
    #[arg(long, default_value_t = 11.0)]
    day_hours: f64,
    #[arg(long, default_value_t = 13.0)]
    night_hours: f64,
    #[arg(long, default_value_t = 1.5)]
    night_multiplier: f64,
}

impl From<WeightArgs> for ShiftWeights {
    fn from(a: WeightArgs) -> Self {
        ShiftWeights {
            day_hours: a.day_hours,
            night_hours: a.night_hours,
            night_multiplier: a.night_multiplier,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DutyArg {
    Day,
    Night,
}

impl From<DutyArg> for Duty {
    fn from(d: DutyArg) -> Self {
        match d {
            DutyArg::Day => Duty::Day,
            DutyArg::Night => Duty::Night,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des membres depuis un CSV
    ImportWorkers {
        #[arg(long)]
        csv: String,
    },

    /// Générer un mois à la suite du planning
    Generate {
        #[arg(long)]
        year: i32,
        /// Code du mois ("01".."12")
        #[arg(long)]
        month: String,
        #[arg(long)]
        leap: bool,
        #[command(flatten)]
        weights: WeightArgs,
    },

    /// Régénérer un mois existant (les modifications manuelles sont perdues)
    Regenerate {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: String,
        #[arg(long)]
        leap: bool,
        #[command(flatten)]
        weights: WeightArgs,
    },

    /// Vérifier un échange sans l'appliquer
    ValidateSwap {
        #[arg(long)]
        date: String,
        #[arg(long)]
        worker: String,
        #[arg(long, value_enum)]
        duty: DutyArg,
    },

    /// Appliquer un échange après validation
    Swap {
        #[arg(long)]
        date: String,
        #[arg(long)]
        worker: String,
        #[arg(long, value_enum)]
        duty: DutyArg,
    },

    /// Remplacer le superviseur d'une journée
    Supervisor {
        #[arg(long)]
        date: String,
        #[arg(long)]
        name: String,
    },

    /// Basculer le drapeau férié d'une journée
    Holiday {
        #[arg(long)]
        date: String,
    },

    /// Vérifier les règles d'adjacence sur tout le planning
    Check,

    /// Bilan de charge par membre
    Stats {
        /// Préfixe de date, ex. "1404/09"
        #[arg(long, default_value = "")]
        prefix: String,
        #[command(flatten)]
        weights: WeightArgs,
    },

    /// Relevé d'heures d'un membre sur une période (bornes incluses)
    Report {
        #[arg(long)]
        worker: String,
        /// Première date, ex. "1404/09/01"
        #[arg(long)]
        from: Option<String>,
        /// Dernière date, ex. "1404/09/30"
        #[arg(long)]
        to: Option<String>,
        #[command(flatten)]
        weights: WeightArgs,
    },

    /// Verrouiller un mois (plus de génération ni de modification)
    Lock {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: String,
    },

    /// Déverrouiller un mois
    Unlock {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    let mut scheduler = if storage.exists() {
        Scheduler::with_roster(storage.load()?)
    } else {
        Scheduler::new()
    };

    let code = match cli.cmd {
        Commands::ImportWorkers { csv } => {
            let workers = io::import_workers_csv(csv)?;
            for w in &workers {
                if scheduler.roster().find_worker(&w.name).is_some() {
                    bail!("duplicate worker name: {}", w.name);
                }
            }
            scheduler.add_workers(workers);
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Generate {
            year,
            month,
            leap,
            weights,
        } => {
            let block = scheduler.generate_month(year, &month, leap, &weights.into())?;
            storage.save(scheduler.roster())?;
            report_block(&block)
        }
        Commands::Regenerate {
            year,
            month,
            leap,
            weights,
        } => {
            let block = scheduler.regenerate_month(year, &month, leap, &weights.into())?;
            storage.save(scheduler.roster())?;
            report_block(&block)
        }
        Commands::ValidateSwap { date, worker, duty } => {
            match scheduler.validate_swap(&date, &worker, duty.into()) {
                SwapVerdict::Valid => {
                    println!("OK: swap allowed");
                    0
                }
                SwapVerdict::Invalid(rejection) => {
                    eprintln!("rejected: {rejection}");
                    2
                }
            }
        }
        Commands::Swap { date, worker, duty } => {
            scheduler.apply_swap(&date, &worker, duty.into())?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Supervisor { date, name } => {
            scheduler.set_supervisor(&date, &name)?;
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Holiday { date } => {
            let holiday = scheduler.toggle_holiday(&date)?;
            storage.save(scheduler.roster())?;
            println!("{date}: holiday={holiday}");
            0
        }
        Commands::Check => {
            let conflicts = scheduler.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                for c in &conflicts {
                    eprintln!("{} | {} → {} | {}", c.worker, c.date_a, c.date_b, c.kind.as_str());
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Stats { prefix, weights } => {
            let roster = scheduler.roster();
            let lines = load_report(&roster.days, &roster.workers, &prefix, &weights.into());
            for l in &lines {
                println!(
                    "{} | day {} | night {} | {}h | score {}",
                    l.name, l.day_shifts, l.night_shifts, l.hours, l.weighted_score
                );
            }
            let top: Vec<&str> = busiest(&lines)
                .into_iter()
                .map(|l| l.name.as_str())
                .collect();
            if !top.is_empty() {
                println!("busiest: {}", top.join(", "));
            }
            0
        }
        Commands::Report {
            worker,
            from,
            to,
            weights,
        } => {
            if scheduler.roster().find_worker(&worker).is_none() {
                bail!("unknown worker: {worker}");
            }
            let timeline = worker_timeline(
                &scheduler.roster().days,
                &worker,
                from.as_deref(),
                to.as_deref(),
                &weights.into(),
            );
            for r in &timeline.rows {
                println!("{} {} | {:?} | {}h", r.date, r.weekday, r.kind, r.hours);
            }
            let t = timeline.totals;
            println!(
                "normal {}h | thursday/holiday {}h | friday {}h | night {}h | total {}h",
                t.normal,
                t.holiday_thursday,
                t.friday,
                t.night,
                t.total()
            );
            0
        }
        Commands::Lock { year, month } => {
            if !scheduler.lock_month(year, &month) {
                eprintln!("{year}/{month} already locked");
            }
            storage.save(scheduler.roster())?;
            0
        }
        Commands::Unlock { year, month } => {
            if !scheduler.unlock_month(year, &month) {
                eprintln!("{year}/{month} was not locked");
            }
            storage.save(scheduler.roster())?;
            0
        }
        Commands::List { out_json, out_csv } => {
            if let Some(path) = out_json {
                io::export_roster_json(path, scheduler.roster())?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, scheduler.roster())?;
            }
            // impression compacte
            for d in &scheduler.roster().days {
                println!(
                    "{} {} | day {} | night {} | sup {}{}",
                    d.date,
                    d.weekday,
                    d.day_worker,
                    d.night_worker,
                    d.supervisor,
                    if d.holiday { " | holiday" } else { "" }
                );
            }
            0
        }
    };

    std::process::exit(code);
}

fn report_block(block: &GeneratedBlock) -> i32 {
    println!("generated {} day(s)", block.days.len());
    if block.relaxations.is_empty() && block.conflicts.is_empty() {
        return 0;
    }
    for r in &block.relaxations {
        eprintln!("relaxed {:?} rule on {} for {}", r.duty, r.date, r.worker);
    }
    for c in &block.conflicts {
        eprintln!("seam {} | {} → {} | {}", c.worker, c.date_a, c.date_b, c.kind.as_str());
    }
    2
}
