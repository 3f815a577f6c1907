//! User-facing console lines.
//! Progress and summaries go to stdout, warnings and errors to stderr; each
//! stream is coloured only when it is a terminal.

use owo_colors::{OwoColorize, Style};

use crate::progress::{ItemResult, ProgressTally};

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

impl Stream {
    fn is_tty(self) -> bool {
        match self {
            Stream::Out => atty::is(atty::Stream::Stdout),
            Stream::Err => atty::is(atty::Stream::Stderr),
        }
    }

    fn line(self, text: &str) {
        match self {
            Stream::Out => println!("{text}"),
            Stream::Err => eprintln!("{text}"),
        }
    }
}

fn emit(stream: Stream, label: &str, style: Style, msg: &str) {
    let text = if stream.is_tty() {
        format!("{} {msg}", label.style(style))
    } else {
        format!("{label} {msg}")
    };
    stream.line(&text);
}

pub fn print_info(msg: &str) {
    emit(Stream::Out, "info:", Style::new().cyan().bold(), msg);
}

pub fn print_warn(msg: &str) {
    emit(Stream::Err, "warn:", Style::new().yellow().bold(), msg);
}

pub fn print_error(msg: &str) {
    emit(Stream::Err, "error:", Style::new().red().bold(), msg);
}

pub fn print_success(msg: &str) {
    emit(Stream::Out, "ok:", Style::new().green().bold(), msg);
}

/// Unprefixed stdout line, for output scripts may parse.
pub fn print_user(msg: &str) {
    Stream::Out.line(msg);
}

/// `[processed/total] <item>`; the item part is exactly `ItemResult`'s Display.
pub fn print_item(item: &ItemResult, tally: &ProgressTally) {
    let counter = format!("[{}/{}]", tally.processed, tally.total);
    if !Stream::Out.is_tty() {
        Stream::Out.line(&format!("{counter} {item}"));
        return;
    }
    let style = if item.success {
        Style::new().green()
    } else {
        Style::new().red()
    };
    Stream::Out.line(&format!("{} {}", counter.dimmed(), item.style(style)));
}
