//! Terminal output for the shop CLI.
//!
//! Human mode writes styled lines through [`console::Term`]. JSON mode stays
//! quiet except for payloads passed to [`Output::json`] and errors, which are
//! printed as `{"error": ...}` objects on stderr.

use std::time::Duration;

use console::{style, StyledObject, Term};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
}

impl Tone {
    fn mark(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Error => style("✗").red(),
        }
    }

    fn is_diagnostic(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error)
    }
}

/// Where CLI messages, listings, and JSON payloads go.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    stdout: Term,
    stderr: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn info(&self, msg: &str) {
        self.status(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.status(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.status(Tone::Warn, msg);
    }

    /// Errors are the one message JSON mode still prints.
    pub fn error(&self, msg: &str) {
        if self.json {
            self.write(&self.stderr, &serde_json::json!({ "error": msg }).to_string());
            return;
        }
        self.status(Tone::Error, &style(msg).red().to_string());
    }

    /// Diagnostics shown only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            let line = format!("{} {}", style("→").dim(), style(msg).dim());
            self.write(&self.stderr, &line);
        }
    }

    /// Section title, separated from what came before by a blank line.
    pub fn header(&self, title: &str) {
        if !self.json {
            self.write(&self.stdout, "");
            self.write(&self.stdout, &style(title).bold().underlined().to_string());
        }
    }

    /// Pretty-printed JSON payload on stdout.
    pub fn json<T: Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            self.write(&self.stdout, &json);
        }
    }

    /// Labelled detail line, e.g. `price: $109.95`.
    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            let label = style(format!("{}:", key)).dim();
            self.write(&self.stdout, &format!("  {} {}", label, value));
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            self.write(&self.stdout, &format!("  {} {}", style("•").dim(), item));
        }
    }

    /// Print `table` with a bold heading, clipped to the terminal width.
    pub fn table(&self, table: &Table) {
        if self.json {
            return;
        }
        let max_width = self
            .stdout
            .size_checked()
            .map(|(_, cols)| usize::from(cols));

        for (index, line) in table.render().iter().enumerate() {
            let line = match max_width {
                Some(width) => console::truncate_str(line, width, "…").into_owned(),
                None => line.clone(),
            };
            if index == 0 {
                self.write(&self.stdout, &style(line).bold().to_string());
            } else {
                self.write(&self.stdout, &line);
            }
        }
    }

    /// Spinner for a catalog round-trip; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    fn status(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        let term = if tone.is_diagnostic() {
            &self.stderr
        } else {
            &self.stdout
        };
        self.write(term, &format!("{} {}", tone.mark(), msg));
    }

    // A closed pipe is not worth failing a command over.
    fn write(&self, term: &Term, line: &str) {
        let _ = term.write_line(line);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
struct Column {
    title: &'static str,
    width: usize,
    align: Align,
}

/// Fixed-width listing: text columns pad right, amounts pad left so the
/// decimal points line up.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Left-aligned text column.
    pub fn text(mut self, title: &'static str, width: usize) -> Self {
        self.columns.push(Column {
            title,
            width,
            align: Align::Left,
        });
        self
    }

    /// Right-aligned column for ids, quantities, and prices.
    pub fn amount(mut self, title: &'static str, width: usize) -> Self {
        self.columns.push(Column {
            title,
            width,
            align: Align::Right,
        });
        self
    }

    /// Append a row. Missing trailing cells render blank.
    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Heading line followed by one line per row, unstyled.
    fn render(&self) -> Vec<String> {
        let heading = self.render_line(self.columns.iter().map(|c| c.title));
        let body = self
            .rows
            .iter()
            .map(|row| self.render_line(row.iter().map(String::as_str)));
        std::iter::once(heading).chain(body).collect()
    }

    fn render_line<'a>(&self, mut cells: impl Iterator<Item = &'a str>) -> String {
        let padded: Vec<String> = self
            .columns
            .iter()
            .map(|column| {
                let cell = truncate(cells.next().unwrap_or(""), column.width);
                let width = column.width;
                match column.align {
                    Align::Left => format!("{:<width$}", cell),
                    Align::Right => format!("{:>width$}", cell),
                }
            })
            .collect();
        format!("  {}", padded.join("  ").trim_end())
    }
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
