//! Console lines printed at the end of a run.
//!
//! Messages are in French and prefixed with an emoji marker. The message
//! text is colored when the stream supports it; the wording itself is fixed.

use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;

use crate::models::Summary;
use crate::pipeline::PipelineError;

pub const MSG_TRANSPORT: &str = "Erreur lors de la requête API :";
pub const MSG_DECODE: &str = "Erreur : la réponse n'est pas un JSON valide.";
pub const MSG_PERSISTENCE: &str = "Erreur : impossible d'écrire dans le fichier CSV.";

/// Formats the user-facing lines for a run.
pub struct TerminalReporter;

impl TerminalReporter {
    /// `✅ Fichier '<path>' créé avec succès.`
    pub fn success(&self, path: &Path) -> String {
        format!(
            "✅ {}",
            format!("Fichier '{}' créé avec succès.", path.display()).green()
        )
    }

    /// `📊 Total users: <n> | Companies: [...]`
    pub fn summary(&self, summary: &Summary) -> String {
        format!("📊 {summary}")
    }

    /// One line naming the stage that failed, colored only when stderr is a terminal.
    pub fn failure(&self, err: &PipelineError) -> String {
        self.failure_line(err, std::io::stderr().is_terminal())
    }

    fn failure_line(&self, err: &PipelineError, colorize: bool) -> String {
        let message = match err {
            PipelineError::Transport(detail) => format!("{MSG_TRANSPORT} {detail}"),
            PipelineError::Decode(_) => MSG_DECODE.to_string(),
            PipelineError::Persistence(_) => MSG_PERSISTENCE.to_string(),
        };
        if colorize {
            format!("❌ {}", message.red())
        } else {
            format!("❌ {message}")
        }
    }
}
