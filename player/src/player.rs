//! Headless host shell
//!
//! Wires the preloader, producer, lifecycle and a threaded engine together
//! and maps stdin commands onto the calls a UI shell would make.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use nativestate_core::config::{self, Config};
use nativestate_core::{
    AssetPreloader, HostLifecycle, ImageFileSource, LifecycleState, StateBridge, StateProducer,
    ThreadedEngine,
};

use crate::commands::{Command, HELP, parse_command};
use crate::scene::HeadlessScene;

/// Player configuration passed from CLI
#[derive(Debug, Clone, Default)]
pub struct PlayerConfig {
    /// Explicit config file; the platform config directory otherwise
    pub config_path: Option<PathBuf>,
    /// Overrides `[assets] dir`
    pub asset_dir: Option<PathBuf>,
    /// Overrides `[runtime] tick_rate`
    pub tick_rate: Option<u32>,
    /// Start the engine before reading commands
    pub autostart: bool,
}

/// Host-side objects of a running player
struct Shell {
    lifecycle: HostLifecycle,
    producer: Arc<StateProducer>,
    engine: ThreadedEngine<HeadlessScene>,
    config: Config,
    config_path: Option<PathBuf>,
}

enum Flow {
    Continue,
    Quit,
}

impl Shell {
    fn new(player: &PlayerConfig) -> Result<Self> {
        let mut config = match &player.config_path {
            Some(path) => config::load_from(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => config::load(),
        };
        if let Some(dir) = &player.asset_dir {
            config.assets.dir = dir.clone();
        }
        if let Some(tick_rate) = player.tick_rate {
            config.runtime.tick_rate = tick_rate;
        }

        let preloader = Arc::new(
            AssetPreloader::new(
                config.assets.entries.clone(),
                ImageFileSource::new(&config.assets.dir),
            )
            .context("Invalid asset list")?,
        );
        let producer = Arc::new(StateProducer::with_state(
            Arc::new(StateBridge::new()),
            preloader.clone(),
            config.initial,
        ));
        let engine = ThreadedEngine::new(
            producer.clone(),
            config.runtime.runtime_config(),
            HeadlessScene::default,
        );

        Ok(Self {
            lifecycle: HostLifecycle::new(preloader),
            producer,
            engine,
            config,
            config_path: player.config_path.clone(),
        })
    }

    fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Start => match self.lifecycle.start(&mut self.engine) {
                Ok(report) => info!(
                    loaded = report.loaded,
                    failed = report.failed,
                    skipped = report.skipped,
                    "Engine ready"
                ),
                Err(e) => warn!("{e}"),
            },
            Command::Stop => {
                if let Err(e) = self.lifecycle.stop(&mut self.engine) {
                    warn!("{e}");
                }
            }
            Command::Scale(scale) => self.producer.set_scale(scale),
            Command::Visible(visible) => self.producer.set_visible(visible),
            Command::Texture(texture) => self.producer.set_texture(texture),
            Command::Spotlight(spotlight) => self.producer.set_spotlight(spotlight),
            Command::State => self.print_state(),
            Command::Save => self.save(),
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn print_state(&self) {
        let fields = self.producer.fields();
        let record = self.producer.snapshot();
        println!("lifecycle: {}", self.lifecycle.state());
        println!(
            "fields:    scale={} visible={} texture={} spotlight={}",
            fields.scale, fields.visible, fields.texture, fields.spotlight
        );
        match record.texture {
            Some(texture) => println!(
                "record:    texture #{} {}x{}",
                texture.id(),
                texture.width(),
                texture.height()
            ),
            None => println!("record:    no texture"),
        }
        if let Some(handle) = self.engine.handle() {
            println!(
                "engine:    {} ticks, {} records received",
                handle.frames(),
                self.engine.consumer().received()
            );
        }
    }

    fn save(&mut self) {
        self.config.initial = self.producer.fields();
        let result = match &self.config_path {
            Some(path) => config::save_to(&self.config, path).map(|()| path.clone()),
            None => config::save(&self.config),
        };
        match result {
            Ok(path) => info!("Saved config to {}", path.display()),
            Err(e) => warn!("Failed to save config: {e}"),
        }
    }

    fn shutdown(&mut self) {
        if self.lifecycle.state() == LifecycleState::Ready
            && let Err(e) = self.lifecycle.stop(&mut self.engine)
        {
            warn!("{e}");
        }
    }
}

/// Run the headless player until `quit` or end of input
pub fn run(player: PlayerConfig) -> Result<()> {
    let mut shell = Shell::new(&player)?;
    info!(
        assets = %shell.config.assets.dir.display(),
        tick_rate = shell.config.runtime.tick_rate,
        "Player initialized"
    );

    if player.autostart {
        shell.execute(Command::Start);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush().context("Failed to write prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read command")?;

        match parse_command(&line) {
            Ok(Some(command)) => {
                if let Flow::Quit = shell.execute(command) {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => println!("{e}"),
        }
    }

    shell.shutdown();
    Ok(())
}
