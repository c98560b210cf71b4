use crate::model::{Role, Roster, Worker};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import de membres depuis CSV: header `name,roles[,active]`
/// (`roles` séparés par `|` : `coverage`, `supervisor`).
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let roles = rec.get(1).context("missing roles")?.trim();
        if name.is_empty() {
            bail!("invalid worker row (empty name)");
        }
        let roles = parse_roles(roles).with_context(|| format!("invalid roles for {name}"))?;
        let mut worker = Worker::new(name, &roles);
        if let Some(flag) = rec.get(2) {
            let flag = flag.trim();
            if !flag.is_empty() {
                worker.active = parse_bool(flag)
                    .with_context(|| format!("invalid active value for {name}"))?;
            }
        }
        out.push(worker);
    }
    Ok(out)
}

fn parse_roles(raw: &str) -> anyhow::Result<Vec<Role>> {
    let roles = raw
        .split('|')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| match r.to_ascii_lowercase().as_str() {
            "coverage" | "shift" => Ok(Role::Coverage),
            "supervisor" => Ok(Role::Supervisor),
            other => bail!("unknown role: {other}"),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    if roles.is_empty() {
        bail!("at least one role required");
    }
    Ok(roles)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV du planning: header `date,weekday,day,night,supervisor,holiday`
pub fn write_schedule_csv<W: Write>(out: W, roster: &Roster) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(out);
    w.write_record(["date", "weekday", "day", "night", "supervisor", "holiday"])?;
    for d in &roster.days {
        let weekday = d.weekday.to_string();
        w.write_record([
            d.date.as_str(),
            weekday.as_str(),
            d.day_worker.as_str(),
            d.night_worker.as_str(),
            d.supervisor.as_str(),
            if d.holiday { "true" } else { "false" },
        ])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let file = fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_schedule_csv(file, roster)
}
