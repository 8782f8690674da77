use poise::{serenity_prelude as serenity, CreateReply};
use tracing::debug;

use crate::{Context, Result};

use super::Cog;

pub fn cog() -> Cog {
    Cog::new(vec![topic()], "Conversation".to_string())
}

fn topic_embed(
    topic: &str,
    colour: serenity::Colour,
    suggestion_form: Option<&str>,
) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .colour(colour)
        .title(format!("**{topic}**"));
    match suggestion_form {
        Some(url) => embed.description(format!("Suggest more topics [here]({url})!")),
        None => embed,
    }
}

/// Responds with a random topic to start a conversation.
///
/// Channels with their own topic list (or inside a category with one) get
/// a topic from that list; everywhere else gets a general conversation topic.
#[poise::command(prefix_command, slash_command, channel_cooldown = 5)]
async fn topic(ctx: Context<'_>) -> Result<()> {
    let channel = ctx.channel_id();
    let category = ctx
        .guild_channel()
        .await
        .and_then(|channel| channel.parent_id);

    let topic = ctx.data().topics.next_topic(channel, category);
    debug!("Picked topic for channel {channel}: {topic}");

    let config = &ctx.data().config;
    let embed = topic_embed(
        &topic,
        config.default_embed_color,
        config.suggestion_form.as_deref(),
    );
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}
