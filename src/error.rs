#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Setting up error reporting failed")]
    InstallingColorEyre(#[source] color_eyre::Report),

    #[error("Setting up logging failed")]
    SettingUpLogging(#[source] tracing::subscriber::SetGlobalDefaultError),

    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("DDP error")]
    Ddp(#[from] ddp_rs::error::DDPError),

    #[error("Failed to bind UDP socket")]
    UDPBind(#[source] std::io::Error),

    #[error("Failed to install signal handler")]
    SignalHandler(#[source] std::io::Error),

    #[error("Failed to read sprite from '{}'", .path)]
    ReadingAsset {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sprite in '{}'", .path)]
    DecodingAsset {
        path: camino::Utf8PathBuf,
        #[source]
        source: crate::sprite::AssetError,
    },

    #[error("Failed to read messages from '{}'", .path)]
    MessageSource {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
