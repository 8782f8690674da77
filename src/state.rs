use crate::{config::Config, topics::Topics, Result};

// Shared state
#[derive(Debug)]
pub struct Data {
    pub config: Config,
    pub topics: Topics,
}

impl Data {
    pub fn from_config(config: Config) -> Result<Self> {
        let topics = Topics::load(&config.topics_path)?;
        Ok(Self { config, topics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_token() {
        let config: Config = envy::from_iter([
            ("BOT_TOKEN".to_string(), "very-secret-token".to_string()),
            ("WEBHOOK_URL".to_string(), "https://example.com/hook/secret".to_string()),
        ])
        .unwrap();
        let data = Data {
            config,
            topics: Topics::from_toml("default = [\"Cats or dogs?\"]").unwrap(),
        };

        let output = format!("{data:?}");
        assert!(output.contains("Cats or dogs?"));
        assert!(!output.contains("very-secret-token"));
        assert!(!output.contains("hook/secret"));
    }
}
