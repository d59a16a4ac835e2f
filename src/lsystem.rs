//! The rewriting engine.
//!
//! An [`LSystem`] holds an axiom, a [`RuleTable`] and the turtle parameters
//! (step distance and turn angle). [`LSystem::rewrite`] expands the axiom
//! through a number of parallel substitution passes and stores the result as
//! the generated string the turtle later interprets.

use tracing::{debug, info, warn};

use crate::error::LSystemError;
use crate::rules::{RuleTable, strip_control_symbols};

/// Upper bound on the generated string, in characters.
pub const DEFAULT_MAX_GENERATED_LEN: usize = 1_000_000;

/// Outcome of a call to [`LSystem::rewrite`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Passes that ran to completion.
    pub generations: u32,
    /// Length of the generated string in characters.
    pub length: usize,
    /// Set when the length cap stopped a pass early.
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct LSystem {
    name: String,
    axiom: String,
    generated: Option<String>,
    rules: RuleTable,
    iterations: u32,
    distance: f32,
    angle: f32,
    max_generated_len: usize,
}

impl Default for LSystem {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            axiom: "F--F--F".to_string(),
            generated: None,
            rules: RuleTable::new(),
            iterations: 1,
            distance: 0.2,
            angle: 60.0,
            max_generated_len: DEFAULT_MAX_GENERATED_LEN,
        }
    }
}

impl LSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axiom(mut self, axiom: impl Into<String>) -> Self {
        self.set_axiom(axiom);
        self
    }

    pub fn with_rule(
        mut self,
        trigger: char,
        successor: impl Into<String>,
    ) -> Result<Self, LSystemError> {
        self.add_rule(trigger, successor)?;
        Ok(self)
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.set_iterations(iterations);
        self
    }

    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.set_angle(degrees);
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.set_distance(distance);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    /// The string produced by the last [`rewrite`](Self::rewrite), if it is
    /// still current.
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// The string a turtle should interpret: the generated string, or the
    /// axiom if nothing has been generated.
    pub fn source(&self) -> &str {
        self.generated.as_deref().unwrap_or(&self.axiom)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn max_generated_len(&self) -> usize {
        self.max_generated_len
    }

    /// Control characters are stripped.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = strip_control_symbols(name.into());
    }

    /// Control characters are stripped, they would be dropped by the first
    /// rewriting pass anyway.
    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.axiom = strip_control_symbols(axiom.into());
        self.generated = None;
    }

    pub fn set_iterations(&mut self, iterations: u32) {
        self.iterations = iterations;
        self.generated = None;
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees;
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance;
    }

    pub fn set_max_generated_len(&mut self, max_len: usize) {
        self.max_generated_len = max_len;
        self.generated = None;
    }

    /// Adds a rule, overwriting any existing rule for `trigger`.
    pub fn add_rule(
        &mut self,
        trigger: char,
        successor: impl Into<String>,
    ) -> Result<(), LSystemError> {
        self.rules.insert(trigger, successor)?;
        self.generated = None;
        Ok(())
    }

    /// Adds a rule written as `c:successor`.
    pub fn add_rule_from_str(&mut self, text: &str) -> Result<(), LSystemError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(trigger), Some(':')) => self.add_rule(trigger, chars.as_str()),
            _ => Err(LSystemError::MalformedRule(text.to_string())),
        }
    }

    pub fn remove_rule(&mut self, trigger: char) -> Option<String> {
        let removed = self.rules.remove(trigger);
        if removed.is_some() {
            self.generated = None;
        }
        removed
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
        self.generated = None;
    }

    /// Discards the generated string so the next draw or rewrite starts from
    /// the axiom.
    pub fn reset(&mut self) {
        self.generated = None;
    }

    /// Expands the axiom through `iterations` substitution passes.
    ///
    /// Every call starts over from the axiom. An empty axiom is a no-op. If a
    /// pass would grow the string past [`max_generated_len`](Self::max_generated_len)
    /// it stops at that point and the truncated string is kept. An axiom that
    /// is already over the cap is cut to it and no pass runs.
    pub fn rewrite(&mut self) -> RewriteSummary {
        if self.axiom.is_empty() {
            debug!("rewrite skipped, axiom is empty");
            return RewriteSummary::default();
        }

        let mut current = self.axiom.clone();
        let mut summary = RewriteSummary {
            length: current.chars().count(),
            ..Default::default()
        };

        if summary.length > self.max_generated_len {
            warn!(
                cap = self.max_generated_len,
                length = summary.length,
                "axiom is longer than the length cap, truncating"
            );
            current = current.chars().take(self.max_generated_len).collect();
            summary.length = self.max_generated_len;
            summary.truncated = true;
            self.generated = Some(current);
            return summary;
        }

        for pass in 0..self.iterations {
            let (next, length, complete) = self.expand_once(&current);
            current = next;
            summary.length = length;
            if !complete {
                warn!(
                    pass,
                    cap = self.max_generated_len,
                    "generated string hit the length cap, rewriting stopped"
                );
                summary.truncated = true;
                break;
            }
            summary.generations += 1;
            debug!(pass, length, "rewrite pass complete");
        }

        info!(
            name = %self.name,
            generations = summary.generations,
            length = summary.length,
            "rewrite finished"
        );
        self.generated = Some(current);
        summary
    }

    /// One left-to-right pass. Returns the output, its length in characters
    /// and whether the whole source was consumed within the length cap.
    fn expand_once(&self, source: &str) -> (String, usize, bool) {
        let mut output = String::with_capacity(source.len());
        let mut length = 0usize;

        for symbol in source.chars() {
            match self.rules.get(symbol) {
                Some(successor) => {
                    let added = successor.chars().count();
                    if length + added > self.max_generated_len {
                        return (output, length, false);
                    }
                    output.push_str(successor);
                    length += added;
                }
                None => {
                    if length + 1 > self.max_generated_len {
                        return (output, length, false);
                    }
                    output.push(symbol);
                    length += 1;
                }
            }
        }

        (output, length, true)
    }
}
