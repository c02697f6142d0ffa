//! Interactive ask loop.
//!
//! A plain line is a question; `:`-prefixed lines are directives. One
//! request at a time: the prompt only returns once the current query has
//! settled.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use askviz_common::ChartType;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::Transport;
use crate::output;
use crate::session::QuerySession;

/// Run the interactive session until `:quit` or end of input
pub async fn run<T: Transport>(transport: &T) -> Result<()> {
    let mut session = QuerySession::new();
    print_welcome();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("askviz> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(directive) = input.strip_prefix(':') {
            if !handle_directive(&mut session, directive) {
                break;
            }
            continue;
        }

        let spinner = thinking_spinner();
        session.execute(transport, input).await;
        spinner.finish_and_clear();

        render_settled(&session);
    }

    Ok(())
}

fn print_welcome() {
    println!();
    println!("{}", style("askviz - ask questions about your data").bold());
    println!(
        "{}",
        style("directives: :chart <bar|line|pie|area|auto>  :clear  :quit").dim()
    );
    println!();
}

/// Handle a `:` directive; returns false when the loop should exit
fn handle_directive(session: &mut QuerySession, directive: &str) -> bool {
    let mut parts = directive.split_whitespace();
    match parts.next() {
        Some("quit") | Some("q") => return false,
        Some("clear") => {
            session.clear();
            println!("cleared");
        }
        Some("chart") => match parts.next() {
            Some("auto") => {
                session.clear_chart_override();
                rerender(session);
            }
            Some(value) => match value.parse::<ChartType>() {
                Ok(chart) => {
                    session.set_chart_override(chart);
                    rerender(session);
                }
                Err(e) => println!("{}", e),
            },
            None => println!("usage: :chart <bar|line|pie|area|auto>"),
        },
        _ => println!("unknown directive; try :chart, :clear or :quit"),
    }
    true
}

/// Re-render the held result after a chart-type change
fn rerender(session: &QuerySession) {
    if let Some(result) = session.result() {
        let chart = session.chart_type().unwrap_or_default();
        output::display_result(result, chart);
    }
}

fn render_settled(session: &QuerySession) {
    if let Some(err) = session.error() {
        output::display_error(err);
    } else if let Some(result) = session.result() {
        let chart = session.chart_type().unwrap_or_default();
        output::display_result(result, chart);
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
