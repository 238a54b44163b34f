use anstyle::{AnsiColor, Style};
use std::io::{self, IsTerminal, Write};

use crate::error::FigmaError;

fn pretty_print_json_colored(value: &serde_json::Value) -> String {
    use colored_json::{Color, ColoredFormatter, PrettyFormatter, Styler};
    let styler = Styler {
        key: Color::Yellow.bold(),
        ..Default::default()
    };
    let formatter = ColoredFormatter::with_styler(PrettyFormatter::new(), styler);
    // Colors only when stdout is a terminal.
    formatter
        .to_colored_json_auto(value)
        .unwrap_or_else(|_| serde_json::to_string_pretty(value).unwrap_or_default())
}

/// Renders a response body for standard output
///
/// Pretty (and, on a terminal, colored) by default; a single line when
/// `compact` is set.
pub fn format_json(value: &serde_json::Value, compact: bool) -> String {
    if compact {
        value.to_string()
    } else {
        pretty_print_json_colored(value)
    }
}

fn format_error_line(err: &FigmaError, colored: bool) -> String {
    if colored {
        let style = Style::new()
            .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)))
            .bold();
        format!("{}Error:{} {err}", style.render(), anstyle::Reset.render())
    } else {
        format!("Error: {err}")
    }
}

/// Prints a successful result to stdout
pub fn print_json(value: &serde_json::Value, compact: bool) {
    let _ = print_json_to(&mut io::stdout(), value, compact);
}

/// Prints the single `Error:` line to stderr
pub fn print_error(err: &FigmaError) {
    let stderr = io::stderr();
    let colored = stderr.is_terminal();
    let _ = print_error_to(&mut stderr.lock(), err, colored);
}

fn print_json_to<W: Write>(
    writer: &mut W,
    value: &serde_json::Value,
    compact: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", format_json(value, compact))
}

fn print_error_to<W: Write>(writer: &mut W, err: &FigmaError, colored: bool) -> io::Result<()> {
    writeln!(writer, "{}", format_error_line(err, colored))
}
