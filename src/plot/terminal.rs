//! Interactive chart in the terminal.
//!
//! The chart stays up until the user acknowledges it. When stdout is not a
//! terminal a one-line summary is printed and the plotter waits for return
//! on stdin instead.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use super::series::Series;
use super::{PlotRequest, Plotter};
use crate::app::App;
use crate::{events, ui};

/// Event poll interval; also bounds how long status messages linger.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shows the chart in the terminal and blocks until acknowledged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPlotter;

impl Plotter for TerminalPlotter {
    fn plot(&mut self, request: &PlotRequest) -> Result<()> {
        let series = Series::load(&request.data_path, request.time_format)?;

        if !io::stdout().is_terminal() {
            debug!("stdout is not a terminal, falling back to prompt");
            let stdin = io::stdin();
            return prompt(request, &series, &mut io::stdout(), &mut stdin.lock());
        }

        run_tui(App::new(series, request.clone()))
    }
}

/// Print a summary line and wait for return.
fn prompt<W: Write, R: BufRead>(
    request: &PlotRequest,
    series: &Series,
    out: &mut W,
    input: &mut R,
) -> Result<()> {
    writeln!(
        out,
        "{}: {} points, {}",
        request.metric.label(),
        series.len(),
        request.x_label
    )?;
    write!(out, "Press return to exit")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Run the TUI until the user exits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(Event::Key(key)) = events::poll_event(POLL_INTERVAL)? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}
