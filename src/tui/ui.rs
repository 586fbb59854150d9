use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use super::app::App;
use super::render::render_ui;
use crate::constants::{UI_POLL_INTERVAL_MS, UI_SCROLL_PAGE_LINES};

/// Run the terminal UI
pub async fn run_ui(mut app: App) -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        anyhow::bail!("kbchat needs an interactive terminal; use --prompt for scripted runs");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let (tx, mut rx) = mpsc::channel::<String>(1);
    let res = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<String>,
    rx: &mut mpsc::Receiver<String>,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(Duration::from_millis(UI_POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
                    app.quit();
                    break;
                }

                match key.code {
                    KeyCode::Esc => app.quit(),
                    KeyCode::Enter => {
                        // An empty input line while the presets are up means
                        // the highlighted preset is what gets asked
                        let question = if app.session.presets_visible() && app.input.is_empty() {
                            app.begin_submit_preset()
                        } else {
                            app.begin_submit()
                        };
                        if let Some(question) = question {
                            spawn_query(app, question, tx.clone());
                        } else if !app.is_querying {
                            app.set_status("Type a question first");
                        }
                    }
                    KeyCode::Char(c @ '1'..='4')
                        if app.session.presets_visible() && app.input.is_empty() =>
                    {
                        app.selected_preset = (c as usize) - ('1' as usize);
                        if let Some(question) = app.begin_submit_preset() {
                            spawn_query(app, question, tx.clone());
                        }
                    }
                    KeyCode::Up if app.session.presets_visible() => app.select_prev_preset(),
                    KeyCode::Down if app.session.presets_visible() => app.select_next_preset(),
                    KeyCode::Tab => app.toggle_sidebar(),
                    KeyCode::PageUp => app.scroll_up(UI_SCROLL_PAGE_LINES),
                    KeyCode::PageDown => app.scroll_down(UI_SCROLL_PAGE_LINES),
                    KeyCode::Char(c) => {
                        if !app.is_querying {
                            app.input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    _ => {}
                }
            }
        }

        // Land the answer of a finished dispatch
        while let Ok(answer) = rx.try_recv() {
            app.finish_submit(answer);
        }
    }

    Ok(())
}

/// Dispatch on a background task so the querying indicator keeps drawing.
/// `is_querying` stays set until the answer lands, so at most one call is
/// ever in flight and turn order stays serialized.
fn spawn_query(app: &App, question: String, tx: mpsc::Sender<String>) {
    let dispatcher = app.dispatcher.clone();
    tokio::spawn(async move {
        let answer = dispatcher
            .dispatch(&question)
            .await
            .unwrap_or_else(|e| e.to_string());
        let _ = tx.send(answer).await;
    });
}
