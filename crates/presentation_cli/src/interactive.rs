//! Interactive search loop
//!
//! Reads one city per line. Only one search runs at a time: submitting a new
//! city drops the in-flight search future, and its ticket is no longer
//! current, so a late result could not be shown either.

use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use application::{
    ApplicationError, SearchService, SearchSession, SearchState, SearchTicket, WeatherReport,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::render::render_state;

/// Lines that end the session
const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", ":q"];

type SearchFuture<'a> = Pin<Box<dyn Future<Output = Result<WeatherReport, ApplicationError>> + 'a>>;

struct InFlight<'a> {
    ticket: SearchTicket,
    future: SearchFuture<'a>,
}

/// Resolve the in-flight search, or never if there is none
async fn next_outcome(
    in_flight: &mut Option<InFlight<'_>>,
) -> (SearchTicket, Result<WeatherReport, ApplicationError>) {
    match in_flight {
        Some(search) => (search.ticket, search.future.as_mut().await),
        None => std::future::pending().await,
    }
}

fn write_state<W: Write>(output: &mut W, state: &SearchState, json: bool) -> anyhow::Result<()> {
    if json {
        writeln!(output, "{}", serde_json::to_string(state)?)?;
    } else {
        writeln!(output, "{}", render_state(state))?;
    }
    output.flush()?;
    Ok(())
}

/// Run the loop until the input ends or a quit command is read
///
/// A search still running when the input ends is awaited and shown.
pub async fn run<R, W>(
    service: &SearchService,
    input: R,
    output: &mut W,
    json: bool,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut session = SearchSession::new();
    let mut in_flight: Option<InFlight<'_>> = None;
    let mut input_open = true;

    write_state(output, session.state(), json)?;

    while input_open || in_flight.is_some() {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    input_open = false;
                    continue;
                };
                let text = line.trim();
                if QUIT_COMMANDS.contains(&text) {
                    break;
                }

                match session.submit(text) {
                    Ok((city, ticket)) => {
                        if let Some(previous) = in_flight.take() {
                            info!(cancelled = %previous.ticket, %ticket, "Cancelling superseded search");
                        }
                        in_flight = Some(InFlight {
                            ticket,
                            future: Box::pin(async move { service.search(&city).await }),
                        });
                        write_state(output, session.state(), json)?;
                    },
                    Err(e) => {
                        writeln!(output, "{}", e.user_message())?;
                        output.flush()?;
                    },
                }
            },
            (ticket, outcome) = next_outcome(&mut in_flight) => {
                in_flight = None;
                if session.resolve(ticket, outcome) {
                    write_state(output, session.state(), json)?;
                }
            },
        }
    }

    Ok(())
}
