//! Menu loop and command dispatch.

use crate::config::AppConfig;
use crate::console::Console;
use crate::display::status_lines;
use crate::error::AppError;
use crate::menu::{MENU, MenuChoice, MenuParseError};
use crate::persistence;
use std::path::PathBuf;
use ticket_pool_core::{PoolConfig, PoolKind};
use ticket_pool_runtime::PoolRegistry;
use ticket_pool_runtime::metrics::MetricsExporter;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, warn};

/// Whether the menu loop continues after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Show the menu again
    Continue,
    /// Leave the loop
    Exit,
}

/// The interactive ticket system: both pools plus the operator console.
pub struct TicketSystem<R, W> {
    registry: PoolRegistry,
    console: Console<R, W>,
    metrics: Option<MetricsExporter>,
}

impl<R, W> std::fmt::Debug for TicketSystem<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketSystem")
            .field("registry", &self.registry)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl<R, W> TicketSystem<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Two unconfigured pools driven from `reader`, answering on `writer`
    pub fn new(config: &AppConfig, reader: R, writer: W) -> Self {
        Self {
            registry: PoolRegistry::new(config.runtime),
            console: Console::new(reader, writer),
            metrics: None,
        }
    }

    /// Attach an installed metrics exporter (enables menu entry 13)
    #[must_use]
    pub fn with_metrics(mut self, exporter: MetricsExporter) -> Self {
        self.metrics = Some(exporter);
        self
    }

    /// The pools behind the console
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Give back the console writer
    pub fn into_writer(self) -> W {
        self.console.into_writer()
    }

    /// Run the menu until Exit or end of input.
    ///
    /// Every running session is stopped before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Console`] if the console cannot be read or written.
    /// Sessions are still stopped in that case.
    pub async fn run(&mut self) -> Result<(), AppError> {
        let result = self.menu_loop().await;
        if result.is_err() {
            self.registry.shutdown().await;
        }
        result
    }

    async fn menu_loop(&mut self) -> Result<(), AppError> {
        loop {
            self.console.say(MENU).await?;
            let Some(answer) = self.console.prompt("Enter your choice: ").await? else {
                self.exit().await?;
                return Ok(());
            };

            let flow = match answer.parse::<MenuChoice>() {
                Ok(choice) => self.handle(choice).await?,
                Err(MenuParseError::NotANumber) => {
                    self.console.say("Invalid input. Please enter a number.").await?;
                    Flow::Continue
                }
                Err(MenuParseError::UnknownChoice(_)) => {
                    self.console.say("Invalid choice. Please try again.").await?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Execute one menu command.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Console`] if the console cannot be read or written.
    pub async fn handle(&mut self, choice: MenuChoice) -> Result<Flow, AppError> {
        match choice {
            MenuChoice::Configure(kind) => {
                self.console.say(format!("Configuring {kind} ticket system...")).await?;
                self.configure(kind).await
            }
            MenuChoice::ChangeDetails(kind) => {
                self.console
                    .say(format!("Changing details for {kind} ticket system..."))
                    .await?;
                self.configure(kind).await
            }
            MenuChoice::Start(kind) => self.start(kind).await,
            MenuChoice::Status(kind) => self.status(kind).await,
            MenuChoice::StopAll => self.stop_all().await,
            MenuChoice::Save => self.save().await,
            MenuChoice::Load => self.load().await,
            MenuChoice::Metrics => self.show_metrics().await,
            MenuChoice::Exit => {
                self.exit().await?;
                Ok(Flow::Exit)
            }
        }
    }

    async fn configure(&mut self, kind: PoolKind) -> Result<Flow, AppError> {
        let Some(config) = self.read_config().await? else {
            self.exit().await?;
            return Ok(Flow::Exit);
        };

        self.registry.configure(kind, config).await;
        self.console
            .say(format!("{kind} ticket system configured successfully."))
            .await?;
        Ok(Flow::Continue)
    }

    /// Prompt for the four values until they form a valid configuration.
    async fn read_config(&mut self) -> Result<Option<PoolConfig>, AppError> {
        const PROMPTS: [&str; 4] = [
            "Enter total tickets: ",
            "Enter ticket release rate (tickets/sec): ",
            "Enter customer retrieval rate (tickets/sec): ",
            "Enter maximum ticket capacity: ",
        ];

        loop {
            let mut values = [0; 4];
            for (value, prompt) in values.iter_mut().zip(PROMPTS) {
                match self.console.prompt_number(prompt).await? {
                    Some(answer) => *value = answer,
                    None => return Ok(None),
                }
            }

            let [total, release, retrieval, capacity] = values;
            match PoolConfig::validated(total, release, retrieval, capacity) {
                Ok(config) => return Ok(Some(config)),
                Err(e) => {
                    self.console
                        .say(format!("{e}. Please enter the configuration again."))
                        .await?;
                }
            }
        }
    }

    async fn start(&mut self, kind: PoolKind) -> Result<Flow, AppError> {
        match self.registry.start(kind).await {
            Ok(()) => {
                self.console
                    .say(format!("Starting {kind} Ticket Operation..."))
                    .await?;
            }
            Err(e) => self.console.say(format!("{e}.")).await?,
        }
        Ok(Flow::Continue)
    }

    async fn status(&mut self, kind: PoolKind) -> Result<Flow, AppError> {
        let status = self.registry.status(kind).await;
        let running = self.registry.is_running(kind);
        for line in status_lines(&status, running) {
            self.console.say(line).await?;
        }
        Ok(Flow::Continue)
    }

    async fn stop_all(&mut self) -> Result<Flow, AppError> {
        match self.registry.stop_all().await {
            Ok(reports) => {
                for report in reports.iter().filter(|r| !r.is_graceful()) {
                    warn!(pool = %report.kind, ?report, "Session did not stop gracefully");
                }
                self.console.say("All ticket operations stopped.").await?;
            }
            Err(e) => self.console.say(format!("{e}.")).await?,
        }
        Ok(Flow::Continue)
    }

    async fn prompt_path(&mut self, prompt: &str) -> Result<Option<PathBuf>, AppError> {
        loop {
            match self.console.prompt(prompt).await? {
                None => return Ok(None),
                Some(name) if name.is_empty() => {
                    self.console.say("Please enter a file name.").await?;
                }
                Some(name) => return Ok(Some(PathBuf::from(name))),
            }
        }
    }

    async fn save(&mut self) -> Result<Flow, AppError> {
        let Some(path) = self
            .prompt_path("Enter filename to save configuration (e.g., config.json): ")
            .await?
        else {
            self.exit().await?;
            return Ok(Flow::Exit);
        };

        let document = self.registry.export_document().await;
        match persistence::save(&path, &document).await {
            Ok(()) => {
                self.console
                    .say(format!("Configuration saved successfully to {}", path.display()))
                    .await?;
            }
            Err(e) => {
                self.console.say(format!("Error saving configuration: {e}")).await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn load(&mut self) -> Result<Flow, AppError> {
        let Some(path) = self
            .prompt_path("Enter filename to load configuration (e.g., config.json): ")
            .await?
        else {
            self.exit().await?;
            return Ok(Flow::Exit);
        };

        match persistence::load(&path).await {
            Ok(document) => {
                self.registry.load_document(&document).await;
                self.console
                    .say(format!("Configuration loaded successfully from {}", path.display()))
                    .await?;
            }
            Err(e) => {
                self.console.say(format!("Error loading configuration: {e}")).await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn show_metrics(&mut self) -> Result<Flow, AppError> {
        let text = match &self.metrics {
            None => "Metrics are disabled. Set TICKET_METRICS=true to enable them.".to_string(),
            Some(exporter) => exporter
                .render()
                .unwrap_or_else(|| "No metrics recorded yet.".to_string()),
        };
        self.console.say(text.trim_end()).await?;
        Ok(Flow::Continue)
    }

    async fn exit(&mut self) -> Result<(), AppError> {
        let reports = self.registry.shutdown().await;
        info!(sessions = reports.len(), "Ticket system shutting down");
        self.console.say("Exiting Ticket System. Goodbye!").await?;
        Ok(())
    }
}
