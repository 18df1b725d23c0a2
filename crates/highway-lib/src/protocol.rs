//! Textual command protocol.
//!
//! Input is a stream of whitespace-separated tokens; line breaks carry no
//! meaning. Each command is a keyword followed by non-negative integers:
//!
//! ```text
//! aggiungi-stazione <km> <count> <autonomy>...
//! demolisci-stazione <km>
//! aggiungi-auto <km> <autonomy>
//! rottama-auto <km> <autonomy>
//! pianifica-percorso <start> <end>
//! ```
//!
//! English aliases (`add-station`, `remove-station`, `add-vehicle`,
//! `scrap-vehicle`, `plan-route`) are accepted as well. Every command
//! produces exactly one [`Response`] line.

use std::fmt;
use std::iter::Peekable;
use std::str::{FromStr, SplitWhitespace};

use crate::error::{Error, Result};
use crate::planner::PathResult;
use crate::registry::Registry;
use crate::station::{Autonomy, Km};

/// Command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    AddStation,
    RemoveStation,
    AddVehicle,
    ScrapVehicle,
    PlanPath,
}

impl Keyword {
    /// Canonical spelling used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::AddStation => "aggiungi-stazione",
            Keyword::RemoveStation => "demolisci-stazione",
            Keyword::AddVehicle => "aggiungi-auto",
            Keyword::ScrapVehicle => "rottama-auto",
            Keyword::PlanPath => "pianifica-percorso",
        }
    }
}

impl FromStr for Keyword {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "aggiungi-stazione" | "add-station" => Ok(Keyword::AddStation),
            "demolisci-stazione" | "remove-station" => Ok(Keyword::RemoveStation),
            "aggiungi-auto" | "add-vehicle" => Ok(Keyword::AddVehicle),
            "rottama-auto" | "scrap-vehicle" => Ok(Keyword::ScrapVehicle),
            "pianifica-percorso" | "plan-route" => Ok(Keyword::PlanPath),
            other => Err(Error::UnknownCommand {
                keyword: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddStation { km: Km, vehicles: Vec<Autonomy> },
    RemoveStation { km: Km },
    AddVehicle { km: Km, autonomy: Autonomy },
    ScrapVehicle { km: Km, autonomy: Autonomy },
    PlanPath { start: Km, end: Km },
}

impl Command {
    pub fn keyword(&self) -> Keyword {
        match self {
            Command::AddStation { .. } => Keyword::AddStation,
            Command::RemoveStation { .. } => Keyword::RemoveStation,
            Command::AddVehicle { .. } => Keyword::AddVehicle,
            Command::ScrapVehicle { .. } => Keyword::ScrapVehicle,
            Command::PlanPath { .. } => Keyword::PlanPath,
        }
    }

    /// Apply the command to `registry` and describe the outcome.
    pub fn execute(&self, registry: &mut Registry) -> Response {
        match self {
            Command::AddStation { km, vehicles } => Response::Added(
                registry
                    .add_station(*km, vehicles.iter().copied())
                    .is_ok(),
            ),
            Command::RemoveStation { km } => {
                Response::Demolished(registry.remove_station(*km).is_ok())
            }
            Command::AddVehicle { km, autonomy } => {
                Response::Added(registry.add_vehicle(*km, *autonomy).is_ok())
            }
            Command::ScrapVehicle { km, autonomy } => {
                Response::Scrapped(registry.scrap_vehicle(*km, *autonomy).is_ok())
            }
            Command::PlanPath { start, end } => Response::Path(registry.plan_path(*start, *end)),
        }
    }
}

/// Result line printed for a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A station or vehicle was (or was not) added.
    Added(bool),
    /// A station was (or was not) demolished.
    Demolished(bool),
    /// A vehicle was (or was not) scrapped.
    Scrapped(bool),
    Path(PathResult),
}

impl Response {
    /// Whether the command changed the registry or found a path.
    pub fn succeeded(&self) -> bool {
        match self {
            Response::Added(done) | Response::Demolished(done) | Response::Scrapped(done) => *done,
            Response::Path(result) => result.stops().is_some(),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Added(true) => f.write_str("aggiunta"),
            Response::Added(false) => f.write_str("non aggiunta"),
            Response::Demolished(true) => f.write_str("demolita"),
            Response::Demolished(false) => f.write_str("non demolita"),
            Response::Scrapped(true) => f.write_str("rottamata"),
            Response::Scrapped(false) => f.write_str("non rottamata"),
            Response::Path(result) => fmt::Display::fmt(result, f),
        }
    }
}

/// Lazy parser over a command script.
///
/// After a malformed command the stream skips ahead to the next recognized
/// keyword, so one bad command does not hide the rest of the script.
#[derive(Debug)]
pub struct CommandStream<'a> {
    tokens: Peekable<SplitWhitespace<'a>>,
}

impl<'a> CommandStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: input.split_whitespace().peekable(),
        }
    }

    fn parse_command(&mut self, keyword: Keyword) -> Result<Command> {
        let command = keyword.as_str();
        match keyword {
            Keyword::AddStation => {
                let km = self.number(command, "km")?;
                let count: usize = self.number(command, "vehicle count")?;
                let vehicles = (0..count)
                    .map(|_| self.number(command, "autonomy"))
                    .collect::<Result<Vec<Autonomy>>>()?;
                Ok(Command::AddStation { km, vehicles })
            }
            Keyword::RemoveStation => Ok(Command::RemoveStation {
                km: self.number(command, "km")?,
            }),
            Keyword::AddVehicle => Ok(Command::AddVehicle {
                km: self.number(command, "km")?,
                autonomy: self.number(command, "autonomy")?,
            }),
            Keyword::ScrapVehicle => Ok(Command::ScrapVehicle {
                km: self.number(command, "km")?,
                autonomy: self.number(command, "autonomy")?,
            }),
            Keyword::PlanPath => Ok(Command::PlanPath {
                start: self.number(command, "start")?,
                end: self.number(command, "end")?,
            }),
        }
    }

    /// Consume the next token as a number. A token that is a keyword is left
    /// in place so the following command still parses.
    fn number<T: FromStr>(&mut self, command: &'static str, argument: &'static str) -> Result<T> {
        let token = self
            .tokens
            .peek()
            .copied()
            .ok_or(Error::MissingArgument { command, argument })?;
        if token.parse::<Keyword>().is_ok() {
            return Err(Error::MissingArgument { command, argument });
        }
        self.tokens.next();
        token.parse().map_err(|_| Error::InvalidArgument {
            command,
            argument,
            value: token.to_string(),
        })
    }

    fn skip_to_next_keyword(&mut self) {
        while let Some(token) = self.tokens.peek() {
            if token.parse::<Keyword>().is_ok() {
                break;
            }
            self.tokens.next();
        }
    }
}

impl Iterator for CommandStream<'_> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.tokens.next()?;
        let parsed = token
            .parse::<Keyword>()
            .and_then(|keyword| self.parse_command(keyword));
        if parsed.is_err() {
            self.skip_to_next_keyword();
        }
        Some(parsed)
    }
}
