use embedded_graphics::pixelcolor::Rgb888;

#[derive(Debug, serde::Deserialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub assets: AssetsConfig,

    #[serde(default)]
    pub logo: LogoConfig,

    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, serde::Deserialize)]
pub struct DisplayConfig {
    pub host: std::net::IpAddr,
    pub port: u16,
    pub udp_port: u16,
    pub initial_brightness: u8,
}

#[derive(Debug, serde::Deserialize)]
pub struct AssetsConfig {
    /// Sprite with the two halves of the logo
    pub logo: camino::Utf8PathBuf,

    /// Sprite with the up and down arrow
    pub arrows: camino::Utf8PathBuf,

    /// Text file with the ticker lines, re-read before every pass
    pub messages: camino::Utf8PathBuf,
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub offset: u32,
    pub delay: u32,

    #[serde(with = "humantime_serde")]
    pub assemble_sleep: std::time::Duration,

    #[serde(with = "humantime_serde")]
    pub pause_sleep: std::time::Duration,

    #[serde(with = "humantime_serde")]
    pub scroll_sleep: std::time::Duration,

    pub color: Color,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            offset: 20,
            delay: 10,
            assemble_sleep: std::time::Duration::from_millis(5),
            pause_sleep: std::time::Duration::from_secs(1),
            scroll_sleep: std::time::Duration::from_millis(60),
            color: Color::default(),
        }
    }
}

impl LogoConfig {
    /// Upper bound for `offset` and `delay`, both counted in frames.
    pub const MAX_TICKS: u32 = 10_000;

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("offset", self.offset), ("delay", self.delay)] {
            if value > Self::MAX_TICKS {
                return Err(ConfigError::LogoTiming {
                    field,
                    value,
                    max: Self::MAX_TICKS,
                });
            }
        }
        Ok(())
    }

    pub fn timing(&self) -> crate::animation::synergy::Timing {
        crate::animation::synergy::Timing {
            offset: self.offset,
            delay: self.delay,
            assemble_sleep: self.assemble_sleep,
            pause_sleep: self.pause_sleep,
            scroll_sleep: self.scroll_sleep,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font: Font,
    pub color: Color,

    #[serde(with = "humantime_serde")]
    pub frame_sleep: std::time::Duration,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: Font::Font6x10,
            color: Color::default(),
            frame_sleep: std::time::Duration::from_millis(55),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub enum Font {
    Font5x8,
    Font6x10,
}

impl Font {
    pub fn mono_font(self) -> &'static embedded_graphics::mono_font::MonoFont<'static> {
        match self {
            Font::Font5x8 => &embedded_graphics::mono_font::ascii::FONT_5X8,
            Font::Font6x10 => &embedded_graphics::mono_font::ascii::FONT_6X10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct Color(pub [u8; 3]);

impl Default for Color {
    fn default() -> Self {
        Self([150, 150, 150])
    }
}

impl From<Color> for Rgb888 {
    fn from(Color([r, g, b]): Color) -> Self {
        Rgb888::new(r, g, b)
    }
}

impl From<Color> for rgb::RGB8 {
    fn from(Color([r, g, b]): Color) -> Self {
        rgb::RGB8::new(r, g, b)
    }
}

impl Config {
    pub async fn load(path: &camino::Utf8Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        Self::parse(&config_str)
    }

    fn parse(config_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(config_str).map_err(ConfigError::ParsingConfig)?;
        config.logo.validate()?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path)]
    ReadingFile {
        path: camino::Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),

    #[error("logo.{field} is {value}, at most {max} is allowed")]
    LogoTiming {
        field: &'static str,
        value: u32,
        max: u32,
    },
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Color;
    use super::Config;
    use super::ConfigError;
    use super::Font;

    const MINIMAL: &str = r#"
        [display]
        host = "10.0.0.7"
        port = 4048
        udp_port = 4048
        initial_brightness = 40

        [assets]
        logo = "synergy.bin"
        arrows = "arrows.bin"
        messages = "coupons.txt"
    "#;

    #[test]
    fn test_defaults() {
        let config = Config::parse(MINIMAL).unwrap();

        assert_eq!(config.logo.offset, 20);
        assert_eq!(config.logo.delay, 10);
        assert_eq!(config.logo.assemble_sleep, Duration::from_millis(5));
        assert_eq!(config.logo.pause_sleep, Duration::from_secs(1));
        assert_eq!(config.logo.scroll_sleep, Duration::from_millis(60));
        assert_eq!(config.text.frame_sleep, Duration::from_millis(55));
        assert_eq!(config.text.color, Color([150, 150, 150]));
        assert_eq!(config.assets.messages, "coupons.txt");
    }

    #[test]
    fn test_partial_sections() {
        let config_str = format!(
            "{MINIMAL}
            [logo]
            pause_sleep = \"2s 500ms\"
            color = [0, 0, 255]

            [text]
            font = \"Font5x8\"
            "
        );
        let config = Config::parse(&config_str).unwrap();

        assert_eq!(config.logo.pause_sleep, Duration::from_millis(2500));
        assert_eq!(config.logo.color, Color([0, 0, 255]));
        assert_eq!(config.logo.offset, 20);
        assert_eq!(config.text.font, Font::Font5x8);
        assert_eq!(config.text.frame_sleep, Duration::from_millis(55));
    }

    #[test]
    fn test_logo_timing_is_bounded() {
        let config_str = format!(
            "{MINIMAL}
            [logo]
            delay = 2147483649
            "
        );
        let err = Config::parse(&config_str).unwrap_err();
        assert!(
            matches!(
                err,
                ConfigError::LogoTiming {
                    field: "delay",
                    value: 2147483649,
                    max: 10_000,
                }
            ),
            "{err:?}"
        );

        let config_str = format!(
            "{MINIMAL}
            [logo]
            offset = 10000
            delay = 10000
            "
        );
        assert!(Config::parse(&config_str).is_ok());
    }

    #[test]
    fn test_missing_assets_is_an_error() {
        let config_str = r#"
            [display]
            host = "10.0.0.7"
            port = 4048
            udp_port = 4048
            initial_brightness = 40
        "#;
        assert!(Config::parse(config_str).is_err());
    }

    #[test]
    fn test_deser_example_config() {
        let config = Config::parse(include_str!("../config.example.toml")).unwrap();
        insta::assert_debug_snapshot!(config.logo.timing(), @r"
        Timing {
            offset: 20,
            delay: 10,
            assemble_sleep: 5ms,
            pause_sleep: 1s,
            scroll_sleep: 60ms,
        }
        ");
    }
}
