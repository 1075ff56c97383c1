//! Output mode routing.

/// How a command writes its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// JSON only
    Json,
    /// Stable line-oriented text for pipes and scripts
    #[default]
    Plain,
    /// Tables and colors for a terminal
    Pretty,
}

impl OutputMode {
    /// Pick a mode from flags and the terminal.
    ///
    /// `--json` always wins. `--format plain` or `TERM=dumb` force plain,
    /// and pretty output needs a TTY on stdout.
    pub fn resolve(
        json_flag: bool,
        format_flag: Option<&str>,
        is_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        if json_flag {
            return Self::Json;
        }
        if format_flag == Some("plain") || term_is_dumb {
            return Self::Plain;
        }
        if is_tty || format_flag == Some("table") {
            Self::Pretty
        } else {
            Self::Plain
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
