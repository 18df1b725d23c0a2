//! Output formatting for command responses and registry reports.
//!
//! Text output reproduces the protocol tokens exactly (one line per command);
//! JSON output emits one object per line.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use highway_lib::{Autonomy, Keyword, Km, PathResult, Response, Station};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Protocol tokens, one response per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// JSON view of a single command response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRecord {
    pub command: &'static str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stations: Option<Vec<Km>>,
}

impl ResponseRecord {
    pub fn new(keyword: Keyword, response: &Response) -> Self {
        let (outcome, stations) = match response {
            Response::Added(true) => ("added", None),
            Response::Added(false) => ("not_added", None),
            Response::Demolished(true) => ("demolished", None),
            Response::Demolished(false) => ("not_demolished", None),
            Response::Scrapped(true) => ("scrapped", None),
            Response::Scrapped(false) => ("not_scrapped", None),
            Response::Path(PathResult::SamePoint(km)) => ("same_point", Some(vec![*km])),
            Response::Path(PathResult::Sequence(stops)) => ("path", Some(stops.clone())),
            Response::Path(PathResult::NoPath) => ("no_path", None),
            Response::Path(PathResult::EndpointNotFound(_)) => ("endpoint_not_found", None),
        };
        Self {
            command: keyword.as_str(),
            outcome,
            stations,
        }
    }
}

/// Write one response in the requested format.
pub fn write_response<W: Write>(
    out: &mut W,
    format: OutputFormat,
    keyword: Keyword,
    response: &Response,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{response}"),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &ResponseRecord::new(keyword, response))?;
            writeln!(out)
        }
    }
}

/// One station in an inspection report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRecord {
    pub km: Km,
    pub max_autonomy: Autonomy,
    pub vehicles: usize,
}

impl From<&Station> for StationRecord {
    fn from(station: &Station) -> Self {
        Self {
            km: station.km(),
            max_autonomy: station.max_autonomy(),
            vehicles: station.fleet().len(),
        }
    }
}

/// Registry contents and tree shape after a script has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub stations: Vec<StationRecord>,
    pub height: usize,
    pub black_height: usize,
}

/// Render an inspection report.
pub fn write_inspect<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &InspectReport,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)
        }
        OutputFormat::Text => {
            writeln!(out, "{:>10}  {:>12}  {:>8}", "km", "max autonomy", "vehicles")?;
            for station in &report.stations {
                writeln!(
                    out,
                    "{:>10}  {:>12}  {:>8}",
                    station.km, station.max_autonomy, station.vehicles
                )?;
            }
            writeln!(
                out,
                "\n{} stations; tree height {}, black height {}",
                report.stations.len(),
                report.height,
                report.black_height
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: OutputFormat, keyword: Keyword, response: &Response) -> String {
        let mut buffer = Vec::new();
        write_response(&mut buffer, format, keyword, response).expect("in-memory write");
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn text_output_uses_protocol_tokens() {
        assert_eq!(
            render(OutputFormat::Text, Keyword::RemoveStation, &Response::Demolished(true)),
            "demolita\n"
        );
        assert_eq!(
            render(
                OutputFormat::Text,
                Keyword::PlanPath,
                &Response::Path(PathResult::Sequence(vec![0, 4, 8]))
            ),
            "0 4 8\n"
        );
    }

    #[test]
    fn json_output_includes_stations_only_for_paths() {
        let line = render(OutputFormat::Json, Keyword::AddVehicle, &Response::Added(false));
        assert_eq!(
            line,
            "{\"command\":\"aggiungi-auto\",\"outcome\":\"not_added\"}\n"
        );
        let line = render(
            OutputFormat::Json,
            Keyword::PlanPath,
            &Response::Path(PathResult::Sequence(vec![9, 3])),
        );
        assert_eq!(
            line,
            "{\"command\":\"pianifica-percorso\",\"outcome\":\"path\",\"stations\":[9,3]}\n"
        );
    }

    #[test]
    fn inspect_text_lists_stations_and_shape() {
        let report = InspectReport {
            stations: vec![StationRecord {
                km: 12,
                max_autonomy: 30,
                vehicles: 2,
            }],
            height: 1,
            black_height: 2,
        };
        let mut buffer = Vec::new();
        write_inspect(&mut buffer, OutputFormat::Text, &report).expect("in-memory write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("        12            30         2"));
        assert!(text.ends_with("1 stations; tree height 1, black height 2\n"));
    }
}
