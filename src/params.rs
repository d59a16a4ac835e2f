//! Line-oriented parameter files.
//!
//! ```text
//! name:Koch snowflake
//! axiom:F--F--F
//! angle:60
//! distance:0.2
//! iterations:3
//! F:F+F--F+F
//! ```
//!
//! Parsing builds an [`LSystemParams`] first, so a file that fails to parse
//! never touches the system it was meant for.

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::LSystemError;
use crate::lsystem::LSystem;

/// Values read from a parameter file. Absent fields leave the target system
/// as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LSystemParams {
    pub name: Option<String>,
    pub axiom: Option<String>,
    pub angle: Option<f32>,
    pub distance: Option<f32>,
    pub iterations: Option<u32>,
    pub rules: Vec<(char, String)>,
}

impl FromStr for LSystemParams {
    type Err = LSystemError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut params = LSystemParams::default();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                continue;
            }

            if let Some(value) = line.strip_prefix("name:") {
                params.name = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("axiom:") {
                if value.is_empty() {
                    return Err(parse_error(line_no, "axiom is empty"));
                }
                params.axiom = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("angle:") {
                params.angle = Some(parse_number(line_no, "angle", value)?);
            } else if let Some(value) = line.strip_prefix("distance:") {
                params.distance = Some(parse_number(line_no, "distance", value)?);
            } else if let Some(value) = line.strip_prefix("iterations:") {
                params.iterations = Some(parse_number(line_no, "iterations", value)?);
            } else if let Some((trigger, successor)) = split_rule(line) {
                params.rules.push((trigger, successor.to_string()));
            }
        }

        Ok(params)
    }
}

fn split_rule(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let trigger = chars.next()?;
    if chars.next()? != ':' || !trigger.is_ascii_graphic() {
        return None;
    }
    Some((trigger, chars.as_str()))
}

fn parse_number<T: FromStr>(line: usize, field: &str, value: &str) -> Result<T, LSystemError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|err| parse_error(line, &format!("invalid {field} {value:?}: {err}")))
}

fn parse_error(line: usize, message: &str) -> LSystemError {
    LSystemError::Parse {
        line,
        message: message.to_string(),
    }
}

impl LSystem {
    /// Parses a new system from parameter text, starting from the defaults.
    pub fn from_params_str(text: &str) -> Result<Self, LSystemError> {
        let mut system = LSystem::default();
        system.apply_params_str(text)?;
        Ok(system)
    }

    /// Parses `text` and applies it. On error the system is left unchanged.
    pub fn apply_params_str(&mut self, text: &str) -> Result<(), LSystemError> {
        let params: LSystemParams = text.parse()?;
        self.apply_params(params)
    }

    /// Applies parsed parameters. Rules are merged into the existing table.
    pub fn apply_params(&mut self, params: LSystemParams) -> Result<(), LSystemError> {
        // All triggers are checked before anything is assigned.
        if let Some((trigger, _)) = params.rules.iter().find(|(c, _)| !c.is_ascii_graphic()) {
            return Err(LSystemError::InvalidTrigger(*trigger));
        }

        if let Some(name) = params.name {
            self.set_name(name);
        }
        if let Some(axiom) = params.axiom {
            self.set_axiom(axiom);
        }
        if let Some(angle) = params.angle {
            self.set_angle(angle);
        }
        if let Some(distance) = params.distance {
            self.set_distance(distance);
        }
        if let Some(iterations) = params.iterations {
            self.set_iterations(iterations);
        }
        for (trigger, successor) in params.rules {
            self.add_rule(trigger, successor)?;
        }
        self.reset();
        Ok(())
    }

    /// Serializes the system in the parameter file format.
    pub fn to_params_string(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "name:{}", self.name());
        let _ = writeln!(out, "axiom:{}", self.axiom());
        let _ = writeln!(out, "angle:{}", self.angle());
        let _ = writeln!(out, "distance:{}", self.distance());
        let _ = writeln!(out, "iterations:{}", self.iterations());
        for (trigger, successor) in self.rules().iter() {
            if successor.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{trigger}:{successor}");
        }
        out
    }

    /// Loads parameters from `path`. A missing or malformed file leaves the
    /// system unchanged.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), LSystemError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LSystemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.apply_params_str(&text)?;
        info!(path = %path.display(), name = %self.name(), "loaded lsystem");
        Ok(())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LSystemError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_params_string()).map_err(|source| LSystemError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), name = %self.name(), "saved lsystem");
        Ok(())
    }
}
