mod cogs;
mod config;
mod constants;
mod cooldown;
mod errors;
mod paginate;
mod randomization;
mod state;
mod suggest;
mod topics;
mod util;

use config::Config;
use poise::{builtins, serenity_prelude as serenity, Framework, FrameworkOptions};
use state::Data;
use tracing::info;

// Common types
pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type Result<T> = std::result::Result<T, Error>;
pub type Command = poise::Command<Data, Error>;
pub type Commands = Vec<Command>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().compact().init();

    let dev = std::env::var("DEV").is_ok();
    let config = Config::from_env(dev)?;

    if dev {
        info!("Starting bot in development configuration")
    } else {
        info!("Starting bot using main configuration")
    }

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let token = config.secrets.bot_token.clone();
    let prefix = config.prefix.clone();
    // fail before connecting if the topic data is broken
    let data = Data::from_config(config)?;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: cogs::commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                mention_as_prefix: true,
                ..Default::default()
            },
            on_error: |e| Box::pin(errors::global_error_handler(e)),
            command_check: Some(|ctx| Box::pin(cooldown::check(ctx))),
            post_command: |ctx| Box::pin(cooldown::start(ctx)),
            manual_cooldowns: true,
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);
            Box::pin(async move {
                builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {e}");
            return;
        }
        info!("Shutting down");
        shard_manager.shutdown_all().await;
    });

    client.start().await?;
    Ok(())
}
