use std::{
    collections::HashMap,
    path::Path,
    sync::{Mutex, PoisonError},
};

use anyhow::Context as _;
use poise::serenity_prelude::ChannelId;
use serde::Deserialize;
use tracing::info;

use crate::randomization::RandomCycle;

pub const NO_TOPICS: &str = "No topics found for this channel.";

pub type TopicCycle = Mutex<RandomCycle<String>>;

#[derive(Deserialize, Debug, Default)]
struct TopicFile {
    #[serde(default)]
    default: Vec<String>,
    /// Keyed by channel or category ID.
    #[serde(default)]
    channels: HashMap<String, Vec<String>>,
}

/// Conversation starters, one cycle per configured channel plus the default set.
#[derive(Debug)]
pub struct Topics {
    default: TopicCycle,
    channels: HashMap<ChannelId, TopicCycle>,
}

fn cycle_of(topics: Vec<String>) -> anyhow::Result<TopicCycle> {
    let mut topics: Vec<String> = topics
        .into_iter()
        .filter(|topic| !topic.trim().is_empty())
        .collect();
    if topics.is_empty() {
        topics.push(NO_TOPICS.to_string());
    }
    Ok(Mutex::new(RandomCycle::new(topics)?))
}

impl Topics {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read topics from {}", path.display()))?;
        let topics = Self::from_toml(&source)
            .with_context(|| format!("Topic file {} is invalid", path.display()))?;
        let defaults = topics
            .default
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        info!(
            "Loaded {defaults} default topics and {} channel topic sets from {}",
            topics.channels.len(),
            path.display()
        );
        Ok(topics)
    }

    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        let file: TopicFile = toml::from_str(source)?;

        let mut keys: HashMap<ChannelId, String> = HashMap::new();
        let mut channels = HashMap::new();
        for (key, topics) in file.channels {
            let id: u64 = key
                .trim()
                .parse()
                .with_context(|| format!("`{key}` is not a channel ID"))?;
            anyhow::ensure!(id != 0, "channel ID cannot be zero");
            let id = ChannelId::new(id);
            if let Some(previous) = keys.insert(id, key.clone()) {
                anyhow::bail!("`{previous}` and `{key}` both refer to channel {id}");
            }
            channels.insert(id, cycle_of(topics)?);
        }

        Ok(Self {
            default: cycle_of(file.default)?,
            channels,
        })
    }

    pub fn lookup(&self, id: ChannelId) -> Option<&TopicCycle> {
        self.channels.get(&id)
    }

    pub fn default_topics(&self) -> &TopicCycle {
        &self.default
    }

    /// Picks the channel's own topics, then its category's, then the defaults.
    pub fn select(&self, channel: ChannelId, category: Option<ChannelId>) -> &TopicCycle {
        self.lookup(channel)
            .or_else(|| category.and_then(|category| self.lookup(category)))
            .unwrap_or(&self.default)
    }

    pub fn next_topic(&self, channel: ChannelId, category: Option<ChannelId>) -> String {
        self.select(channel, category)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .draw()
            .clone()
    }
}
