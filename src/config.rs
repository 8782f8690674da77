use anyhow::Context;
use poise::serenity_prelude as serenity;
use serde::{de::Error, Deserialize, Deserializer};
use tracing::warn;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(flatten)]
    pub secrets: Secrets,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(deserialize_with = "hex_color", default = "default_embed_color")]
    pub default_embed_color: serenity::Color,
    #[serde(default = "default_topics_path")]
    pub topics_path: String,
    /// Where users can propose new conversation topics.
    pub suggestion_form: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct Secrets {
    pub bot_token: String,
    /// Unhandled errors are reported here when set.
    pub webhook_url: Option<String>,
}

// Error reports include `Data` debug output, so secrets never show up there.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("bot_token", &"<redacted>")
            .field("webhook_url", &self.webhook_url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn default_prefix() -> String {
    "-".into()
}

fn default_embed_color() -> serenity::Color {
    serenity::Color::BLURPLE
}

fn default_topics_path() -> String {
    "data/topics.toml".into()
}

fn hex_color<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<serenity::Color, D::Error> {
    let s: String = Deserialize::deserialize(d)?;
    let result = u32::from_str_radix(s.trim_start_matches('#'), 16).map_err(D::Error::custom)?;
    Ok(serenity::Colour(result))
}

impl Config {
    /// Loads `.env` (or `.dev.env` in development) and reads the configuration
    /// from the environment.
    pub fn from_env(dev: bool) -> anyhow::Result<Self> {
        let loaded = if dev {
            dotenvy::from_filename(".dev.env")
        } else {
            dotenvy::dotenv()
        };
        match loaded {
            Ok(_) => {}
            Err(e) if e.not_found() => {
                warn!("No environment file found; using the process environment only")
            }
            Err(e) => return Err(e).context("Environment file is invalid"),
        }

        envy::from_env::<Config>().context("Configuration is invalid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<Config, envy::Error> {
        envy::from_iter(
            vars.iter()
                .map(|(key, value)| (key.to_string(), value.to_string())),
        )
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = parse(&[("BOT_TOKEN", "secret")]).unwrap();
        assert_eq!(config.secrets.bot_token, "secret");
        assert_eq!(config.secrets.webhook_url, None);
        assert_eq!(config.prefix, "-");
        assert_eq!(config.default_embed_color, serenity::Color::BLURPLE);
        assert_eq!(config.topics_path, "data/topics.toml");
        assert_eq!(config.suggestion_form, None);
    }

    #[test]
    fn reads_every_field() {
        let config = parse(&[
            ("BOT_TOKEN", "secret"),
            ("WEBHOOK_URL", "https://example.com/hook"),
            ("PREFIX", "!"),
            ("DEFAULT_EMBED_COLOR", "#cd6d6d"),
            ("TOPICS_PATH", "/srv/topics.toml"),
            ("SUGGESTION_FORM", "https://example.com/form"),
        ])
        .unwrap();
        assert_eq!(
            config.secrets.webhook_url.as_deref(),
            Some("https://example.com/hook")
        );
        assert_eq!(config.prefix, "!");
        assert_eq!(config.default_embed_color, serenity::Colour(0xcd6d6d));
        assert_eq!(config.topics_path, "/srv/topics.toml");
        assert_eq!(
            config.suggestion_form.as_deref(),
            Some("https://example.com/form")
        );
    }

    #[test]
    fn token_is_required() {
        assert!(parse(&[("PREFIX", "!")]).is_err());
    }

    #[test]
    fn rejects_bad_colors() {
        assert!(parse(&[("BOT_TOKEN", "x"), ("DEFAULT_EMBED_COLOR", "blue")]).is_err());
    }
}
