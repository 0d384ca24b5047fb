use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

/// Installs the global subscriber: human readable output on stderr, filtered by
/// `RUST_LOG` plus whatever the verbosity flags on the command line ask for.
pub fn setup<Level>(
    verbosity: clap_verbosity_flag::Verbosity<Level>,
) -> Result<(), crate::error::Error>
where
    Level: clap_verbosity_flag::LogLevel,
{
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();

    if verbosity.is_present() {
        let directive = tracing_subscriber::filter::Directive::from(
            verbosity.tracing_level_filter(),
        );
        env_filter = env_filter.add_directive(directive);
    }

    let subscriber = tracing_subscriber::registry::Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(crate::error::Error::SettingUpLogging)
}
