use tokio_util::sync::CancellationToken;

use crate::animation::synergy::SynergyAnimation;
use crate::animation::text::MonoTextPainter;
use crate::sprite::Sprite;

mod animation;
mod canvas;
mod cli;
mod config;
mod display;
mod error;
mod logging;
mod playlist;
mod sequencer;
mod sprite;

#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::eyre::Result<()> {
    setup_panic();
    color_eyre::install().map_err(crate::error::Error::InstallingColorEyre)?;
    let cli = <crate::cli::Cli as clap::Parser>::parse();
    crate::logging::setup(cli.verbosity)?;
    let cfg = crate::config::Config::load(&cli.config).await?;

    match cli.command {
        cli::Command::Run => {
            run(cfg).await?;
        }
        cli::Command::VerifyConfig => {
            Assets::load(&cfg.assets).await?;
            tracing::info!("Configuration verified");
        }
    }

    Ok(())
}

fn setup_panic() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
}

/// Sprites loaded once at startup, checked to contain the frames the
/// animations use.
struct Assets {
    logo: Sprite,
    arrows: Sprite,
}

impl Assets {
    async fn load(config: &crate::config::AssetsConfig) -> Result<Self, crate::error::Error> {
        let assets = Self {
            logo: Sprite::load(&config.logo).await?,
            arrows: Sprite::load(&config.arrows).await?,
        };

        // both sprites need an "approach from left/up" and "approach from right/down" frame
        for (sprite, path) in [(&assets.logo, &config.logo), (&assets.arrows, &config.arrows)] {
            sprite
                .frame(1)
                .map_err(|source| crate::error::Error::DecodingAsset {
                    path: path.clone(),
                    source,
                })?;
        }

        Ok(assets)
    }
}

fn spawn_signal_handler(cancellation_token: CancellationToken) -> Result<(), crate::error::Error> {
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .map_err(crate::error::Error::SignalHandler)?;

    tokio::task::spawn(async move {
        tokio::select! {
            _ctrl_c = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl-C received, shutting down");
            }
            _term = terminate.recv() => {
                tracing::info!("SIGTERM received, shutting down");
            }
        }
        cancellation_token.cancel();
    });

    Ok(())
}

async fn run(config: crate::config::Config) -> Result<(), crate::error::Error> {
    let assets = Assets::load(&config.assets).await?;
    let icons = crate::playlist::Icons::from_sprite(&assets.arrows).map_err(|source| {
        crate::error::Error::DecodingAsset {
            path: config.assets.arrows.clone(),
            source,
        }
    })?;

    let ddp_connection = ddp_rs::connection::DDPConnection::try_new(
        format!("{}:{}", config.display.host, config.display.port),
        ddp_rs::protocol::PixelConfig::default(), // Default is RGB, 8 bits per channel
        ddp_rs::protocol::ID::Default,
        std::net::UdpSocket::bind(format!("0.0.0.0:{}", config.display.udp_port))
            .map_err(crate::error::Error::UDPBind)?,
    )?;
    let mut panel = crate::display::LedPanel::new(
        crate::display::DdpWriter::new(ddp_connection),
        config.display.initial_brightness,
    )?;

    let cancellation_token = CancellationToken::new();
    spawn_signal_handler(cancellation_token.clone())?;

    let painter = MonoTextPainter::new(config.text.font.mono_font(), config.text.color.into());
    let mut synergy = SynergyAnimation::new(
        assets.logo.frame(0).map_err(|source| crate::error::Error::DecodingAsset {
            path: config.assets.logo.clone(),
            source,
        })?,
        assets.logo.frame(1).map_err(|source| crate::error::Error::DecodingAsset {
            path: config.assets.logo.clone(),
            source,
        })?,
        config.logo.timing(),
        config.logo.color.into(),
    );

    let program = crate::sequencer::Program {
        synergy: &mut synergy,
        messages: &config.assets.messages,
        icons,
        painter: &painter,
        frame_sleep: config.text.frame_sleep,
    };
    crate::sequencer::run(program, &mut panel, &cancellation_token).await?;

    tracing::info!("Exiting");
    Ok(())
}
