//! Menu TUI: terminal client for the food menu service.
//!
//! Browse categories → dishes → ingredients ordered by caloric priority,
//! sign in or create an account, and mark dishes as favorites.
//!
//! ```text
//! menu-tui                                 # http://localhost:3000, token in ~/.menu-client
//! menu-tui --api-url https://menu.example  # other server
//! menu-tui --config menu.toml --ephemeral  # config file, token kept in memory only
//! ```
//!
//! Logs go to `--log-file` (default `menu-tui.log`) because the terminal owns
//! stdout. `RUST_LOG` overrides `--log-level`.

mod app;
mod events;
mod forms;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use menu_core::{ClientConfig, MemoryTokenStore, MenuClient, ReqwestTransport};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use events::{AppEvent, Command};

#[derive(Parser, Debug)]
#[command(name = "menu-tui")]
#[command(about = "Browse food menus and manage favorite dishes")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Menu service base URL (overrides config and MENU_API_URL)
    #[arg(short = 'u', long)]
    api_url: Option<String>,

    /// Where the session token is persisted (overrides config and MENU_TOKEN_PATH)
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Keep the session token in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Log file
    #[arg(long, default_value = "menu-tui.log")]
    log_file: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => ClientConfig::default(),
        };
        config.apply_env();
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(path) = &self.token_file {
            config.session.token_path = Some(path.clone());
        }
        config.validate()?;
        Ok(config)
    }

    fn client(&self, config: &ClientConfig) -> Result<MenuClient> {
        if !self.ephemeral {
            return Ok(MenuClient::from_config(config)?);
        }
        let transport = ReqwestTransport::new(
            config.api.base_url.trim(),
            config.api.request_timeout(),
            config.api.connect_timeout(),
        )?;
        Ok(MenuClient::with_transport(
            Arc::new(transport),
            Arc::new(MemoryTokenStore::new()),
            config.session.unauthorized_policy(),
        )?)
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)
        .with_context(|| format!("opening log file {}", args.log_file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = args.client_config()?;
    let client = args.client(&config)?;
    info!(
        base_url = %config.api.base_url,
        authenticated = client.is_authenticated(),
        "starting menu-tui"
    );

    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let app = App::new(config.api.base_url.clone(), config.browse.require_sign_in);
    let result = run_app(&mut terminal, app, client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {err:?}");
    }
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    client: MenuClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let dispatch = |commands: Vec<Command>| {
        for command in commands {
            events::spawn(&client, command, tx.clone());
        }
    };

    dispatch(app.mount());

    loop {
        while let Ok(event) = rx.try_recv() {
            dispatch(app.apply(event));
        }

        let favorites = client.favorites();
        app.observe(
            client.is_authenticated(),
            favorites.favorites(),
            favorites.is_refreshing(),
        );

        terminal.draw(|frame| ui::render(frame, &app))?;

        // Blocking poll; spawned requests progress on the runtime's worker threads
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    dispatch(app.on_key(key.code));
                }
            }
        }

        if app.should_quit {
            info!("quit requested");
            return Ok(());
        }
    }
}
