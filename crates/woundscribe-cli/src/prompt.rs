//! Terminal prompts for reconciliation.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use woundscribe::registry::PatientRegistry;
use woundscribe::{Decision, DecisionSource, ReviewItem, WoundscribeError};

/// Asks the operator about each review item on a terminal.
///
/// Blank answers, anything but `y`/`yes` for duplicates, and end of input all
/// count as declining.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> woundscribe::Result<String> {
        write!(self.output, "{}", question).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(io_error)?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, line: String) -> woundscribe::Result<()> {
        writeln!(self.output, "{}", line).map_err(io_error)
    }
}

impl<R: BufRead, W: Write> DecisionSource for TerminalPrompt<R, W> {
    fn decide(
        &mut self,
        item: &ReviewItem,
        registry: &PatientRegistry,
    ) -> woundscribe::Result<Decision> {
        match item {
            ReviewItem::UnknownClinic { key } => {
                self.say(format!("Unknown patient: {}", key.cyan().bold()))?;
                let answer = self.ask("Assign a clinic (or press Enter to skip): ")?;
                Ok(Decision::assign(answer))
            }
            ReviewItem::Fuzzy(candidate) => {
                let clinic = registry
                    .lookup_exact(&candidate.candidate_key)
                    .map(|r| r.clinic.as_str())
                    .unwrap_or("?");
                self.say("Possible duplicate detected:".to_string())?;
                self.say(format!(
                    "  {} ≈ {} ({:.1}%, clinic {})",
                    candidate.source_key.cyan().bold(),
                    candidate.candidate_key.green().bold(),
                    candidate.score,
                    clinic
                ))?;
                let answer = self.ask("Is this a duplicate? (y/n) [default: n]: ")?;
                match answer.to_lowercase().as_str() {
                    "y" | "yes" => Ok(Decision::ConfirmMerge),
                    _ => Ok(Decision::Decline),
                }
            }
        }
    }
}

fn io_error(e: io::Error) -> WoundscribeError {
    WoundscribeError::Io {
        path: "<terminal>".into(),
        source: e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use woundscribe::FuzzyCandidate;

    fn prompt(input: &str) -> TerminalPrompt<&[u8], Vec<u8>> {
        TerminalPrompt::new(input.as_bytes(), Vec::new())
    }

    fn fuzzy() -> ReviewItem {
        ReviewItem::Fuzzy(FuzzyCandidate {
            source_key: "John Smith".into(),
            candidate_key: "Jon Smith".into(),
            score: 90.0,
        })
    }

    #[test]
    fn test_unknown_assigns_clinic() {
        let item = ReviewItem::UnknownClinic { key: "Jane Doe".into() };
        let decision = prompt("Riverside\n").decide(&item, &PatientRegistry::new()).unwrap();
        assert_eq!(decision, Decision::AssignClinic("Riverside".into()));
    }

    #[test]
    fn test_blank_or_eof_declines() {
        let item = ReviewItem::UnknownClinic { key: "Jane Doe".into() };
        let registry = PatientRegistry::new();
        assert_eq!(prompt("\n").decide(&item, &registry).unwrap(), Decision::Decline);
        assert_eq!(prompt("").decide(&item, &registry).unwrap(), Decision::Decline);
    }

    #[test]
    fn test_duplicate_answers() {
        let registry = PatientRegistry::new();
        assert_eq!(prompt("y\n").decide(&fuzzy(), &registry).unwrap(), Decision::ConfirmMerge);
        assert_eq!(prompt("YES\n").decide(&fuzzy(), &registry).unwrap(), Decision::ConfirmMerge);
        assert_eq!(prompt("n\n").decide(&fuzzy(), &registry).unwrap(), Decision::Decline);
        assert_eq!(prompt("\n").decide(&fuzzy(), &registry).unwrap(), Decision::Decline);
    }
}
