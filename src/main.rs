use unirag::adapters::FileStore;
use unirag::app::App;
use unirag::chat_service::ChatServiceClient;
use unirag::cli::{parse_args, run_cli_command, USAGE};
use unirag::session::{SessionController, SessionEvent};
use unirag::startup::{init_logging, ClientConfig};
use unirag::terminal::{setup_panic_hook, TerminalManager};
use unirag::thread_store::ThreadStore;
use unirag::ui;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind, MouseEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

fn main() -> Result<()> {
    // Informational flags are handled before any initialization
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };
    let Some(overrides) = run_cli_command(command) else {
        return Ok(());
    };

    color_eyre::install()?;

    let config = ClientConfig::from_env()
        .and_then(|config| config.apply_overrides(&overrides))
        .wrap_err("Invalid configuration")?;

    std::fs::create_dir_all(config.data_dir())
        .wrap_err_with(|| format!("Cannot create {}", config.data_dir().display()))?;
    init_logging(&config.log_file()).wrap_err("Failed to open log file")?;
    info!(
        api_url = %config.api_url,
        data_dir = %config.data_dir().display(),
        timeout_secs = config.request_timeout.as_secs(),
        "Starting unirag {}",
        unirag::cli::VERSION
    );

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;

    let client = ChatServiceClient::from_config(&config).wrap_err("Failed to build HTTP client")?;
    let store = ThreadStore::new(Arc::new(FileStore::new(config.data_dir())));

    let mut term_manager = TerminalManager::new()?;

    let result = runtime.block_on(async {
        let session = SessionController::new(client, store);
        session.check_health();
        let mut app = App::new(session);
        run_app(term_manager.terminal(), &mut app).await
    });

    term_manager.restore()?;

    if let Err(e) = &result {
        error!("Exited with error: {:?}", e);
    }
    info!("Shutting down");
    result
}

/// Main event loop: terminal input, session events and the animation tick.
async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the session receiver (we need ownership for select!)
    let mut session_rx: Option<mpsc::UnboundedReceiver<SessionEvent>> =
        app.session.take_event_receiver();

    loop {
        // Draw the UI only when needed
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        // 16ms tick drives the loading animation
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Mouse(mouse))) => match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_mouse_scroll(true),
                        MouseEventKind::ScrollDown => app.handle_mouse_scroll(false),
                        _ => {}
                    },
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("Terminal input error: {}", e);
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            Some(event) = async {
                match session_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_session_event(event);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
