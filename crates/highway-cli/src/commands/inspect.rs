use std::io::{self, sink, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use highway_lib::Registry;

use crate::commands::read_script;
use crate::commands::run::execute_script;
use crate::output::{write_inspect, InspectReport, OutputFormat, StationRecord};
use crate::GlobalOptions;

#[derive(Args, Debug, Clone, Default)]
pub struct InspectArgs {
    /// Script to replay before inspecting (reads stdin when omitted).
    pub script: Option<PathBuf>,
}

pub fn handle_inspect(global: &GlobalOptions, args: &InspectArgs) -> Result<()> {
    let script = read_script(args.script.as_deref())?;
    let mut registry = Registry::new(global.registry_config()?);
    execute_script(
        &mut registry,
        &script,
        OutputFormat::Text,
        false,
        &mut sink(),
    )?;

    let report = build_report(&registry)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_inspect(&mut out, global.format, &report).context("failed to write report")?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

/// Snapshot the registry, verifying the index structure first.
pub fn build_report(registry: &Registry) -> Result<InspectReport> {
    let black_height = registry
        .index()
        .check_invariants()
        .context("station index is corrupted")?;
    Ok(InspectReport {
        stations: registry.stations().map(StationRecord::from).collect(),
        height: registry.index().height(),
        black_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_stations_in_order() {
        let mut registry = Registry::default();
        registry.add_station(30, [1, 9]).expect("added");
        registry.add_station(10, []).expect("added");
        registry.add_station(20, [4]).expect("added");

        let report = build_report(&registry).expect("valid tree");
        let positions: Vec<_> = report.stations.iter().map(|s| s.km).collect();
        assert_eq!(positions, vec![10, 20, 30]);
        assert_eq!(report.stations[2].max_autonomy, 9);
        assert_eq!(report.stations[2].vehicles, 2);
        assert_eq!(report.height, 2);
        assert!(report.black_height >= 1);
    }

    #[test]
    fn empty_registry_report() {
        let report = build_report(&Registry::default()).expect("valid tree");
        assert!(report.stations.is_empty());
        assert_eq!(report.height, 0);
    }
}
