use std::{sync::Arc, time::Duration};

use poise::{
    builtins,
    serenity_prelude::{
        self as serenity, CreateAttachment, CreateEmbed, CreateEmbedAuthor, CreateMessage,
        ExecuteWebhook,
    },
    CreateReply, FrameworkContext, FrameworkError,
};
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    constants::{
        ERROR_DELETE_DELAY, ERROR_REPLIES, NEGATIVE_REPLIES, QUESTION_MARK_ICON, SOFT_RED,
        SUGGESTION_DELETE_DELAY,
    },
    state::Data,
    suggest, Context, Error, Result,
};

/// Failures a command reports on purpose, each with its own user-facing reply.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    BadArgument(String),
    // no command restricts where it runs yet
    #[allow(dead_code)]
    #[error("{0}")]
    CheckFailure(String),
    #[error("command is on cooldown for another {0:?}")]
    OnCooldown(Duration),
    // reserved for commands backed by external services
    #[allow(dead_code)]
    #[error("{api} responded with status {status_code}")]
    Api {
        api: String,
        status_code: u16,
        message: Option<String>,
    },
}

struct ErrorReply {
    message: String,
    titles: &'static [&'static str],
    /// Removed after a while in text channels, ephemeral for interactions.
    transient: bool,
}

impl ErrorReply {
    fn new(message: impl Into<String>, titles: &'static [&'static str]) -> Self {
        Self {
            message: message.into(),
            titles,
            transient: false,
        }
    }

    fn transient(self) -> Self {
        Self {
            transient: true,
            ..self
        }
    }
}

pub fn error_embed(message: impl Into<String>, titles: &[&str]) -> CreateEmbed {
    let title = titles.choose(&mut rand::thread_rng()).copied().unwrap_or("Error");
    CreateEmbed::new()
        .colour(SOFT_RED)
        .title(title)
        .description(message)
}

pub fn cooldown_message(remaining: Duration) -> String {
    let total = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    let (mins, secs) = (total / 60, total % 60);
    format!("This command is on cooldown:\nPlease retry in {mins} minutes {secs} seconds.")
}

pub fn api_message(api: &str, message: Option<&str>) -> String {
    let mut text = format!("There was an error when communicating with the {api}.");
    if let Some(message) = message {
        text.push('\n');
        text.push_str(message);
    }
    text
}

/// Renders parameters as `<required> [optional]`.
pub fn signature<'a>(parameters: impl IntoIterator<Item = (&'a str, bool)>) -> String {
    parameters
        .into_iter()
        .map(|(name, required)| {
            if required {
                format!("<{name}>")
            } else {
                format!("[{name}]")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn usage_block(prefix: &str, qualified_name: &str, signature: &str) -> String {
    if signature.is_empty() {
        format!("```{prefix}{qualified_name}```")
    } else {
        format!("```{prefix}{qualified_name} {signature}```")
    }
}

fn usage(ctx: Context<'_>) -> String {
    let command = ctx.command();
    let signature = signature(
        command
            .parameters
            .iter()
            .map(|parameter| (parameter.name.as_str(), parameter.required)),
    );
    usage_block(ctx.prefix(), &command.qualified_name, &signature)
}

fn not_authorized() -> ErrorReply {
    ErrorReply::new("You are not authorized to use this command.", NEGATIVE_REPLIES)
}

fn translate_command_error(error: &CommandError, ctx: Context<'_>) -> ErrorReply {
    command_error_reply(error, &usage(ctx))
}

fn command_error_reply(error: &CommandError, usage: &str) -> ErrorReply {
    match error {
        CommandError::BadArgument(message) => ErrorReply::new(
            format!("The argument you provided was invalid: {message}\n\nUsage:\n{usage}"),
            ERROR_REPLIES,
        ),
        CommandError::CheckFailure(message) => {
            ErrorReply::new(message.clone(), NEGATIVE_REPLIES).transient()
        }
        CommandError::OnCooldown(remaining) => {
            ErrorReply::new(cooldown_message(*remaining), NEGATIVE_REPLIES).transient()
        }
        CommandError::Api {
            api,
            status_code,
            message,
        } => {
            debug!("{api} returned status {status_code}");
            ErrorReply::new(api_message(api, message.as_deref()), NEGATIVE_REPLIES)
        }
    }
}

fn translate(e: &FrameworkError<'_, Data, Error>) -> Option<ErrorReply> {
    let reply = match e {
        FrameworkError::ArgumentParse { error, ctx, .. } => ErrorReply::new(
            format!("Your input was invalid: {error}\n\nUsage:{}", usage(*ctx)),
            ERROR_REPLIES,
        ),
        FrameworkError::CooldownHit {
            remaining_cooldown, ..
        } => ErrorReply::new(cooldown_message(*remaining_cooldown), NEGATIVE_REPLIES).transient(),
        FrameworkError::GuildOnly { .. } => ErrorReply::new(
            "This command can only be used in a server.",
            NEGATIVE_REPLIES,
        ),
        FrameworkError::SubcommandRequired { ctx, .. } => ErrorReply::new(
            format!("Please pick a subcommand.\n\nUsage:{}", usage(*ctx)),
            ERROR_REPLIES,
        ),
        FrameworkError::NotAnOwner { .. } | FrameworkError::MissingUserPermissions { .. } => {
            not_authorized()
        }
        FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            match error.as_ref().and_then(|error| error.downcast_ref::<CommandError>()) {
                Some(error) => translate_command_error(error, *ctx),
                None => not_authorized(),
            }
        }
        FrameworkError::Command { error, ctx, .. } => {
            translate_command_error(error.downcast_ref::<CommandError>()?, *ctx)
        }
        _ => return None,
    };
    Some(reply)
}

fn schedule_delete(http: Arc<serenity::Http>, message: serenity::Message, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = message.delete(&http).await {
            warn!("Could not remove message {}: {e}", message.id);
        }
    });
}

async fn send_reply(ctx: Context<'_>, reply: ErrorReply) -> Result<()> {
    let embed = error_embed(reply.message, reply.titles);
    let handle = ctx
        .send(
            CreateReply::default()
                .embed(embed)
                .ephemeral(reply.transient),
        )
        .await?;

    if reply.transient {
        if let Context::Prefix(_) = ctx {
            let message = handle.into_message().await?;
            schedule_delete(
                ctx.serenity_context().http.clone(),
                message,
                ERROR_DELETE_DELAY,
            );
        }
    }
    Ok(())
}

async fn suggest_command(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    msg_content: &str,
    framework: FrameworkContext<'_, Data, Error>,
) -> Result<()> {
    let Some(typed) = msg_content.split_whitespace().next() else {
        return Ok(());
    };
    let options = framework.options();
    let Some((name, command)) =
        suggest::closest_match(typed, suggest::visible_names(&options.commands))
    else {
        return Ok(());
    };

    if !suggest::can_run(
        command,
        msg.author.id,
        msg.guild_id.is_some(),
        &options.owners,
    ) {
        debug!("Cancelling attempt to suggest a command due to failed checks.");
        return Ok(());
    }

    let embed = CreateEmbed::new()
        .author(CreateEmbedAuthor::new("Did you mean:").icon_url(QUESTION_MARK_ICON))
        .description(suggest::corrected_content(&msg.content, typed, name));
    let sent = msg
        .channel_id
        .send_message(ctx, CreateMessage::new().embed(embed))
        .await?;
    schedule_delete(ctx.http.clone(), sent, SUGGESTION_DELETE_DELAY);
    Ok(())
}

async fn webhook_alert(ctx: Context<'_>, e: &FrameworkError<'_, Data, Error>) -> Result<()> {
    let Some(url) = &ctx.data().config.secrets.webhook_url else {
        return Ok(());
    };
    let webhook = ctx.http().get_webhook_from_url(url).await?;

    let debug_output = format!("{e:?}");
    let payload = ExecuteWebhook::new()
        .content(format!("{e}"))
        .add_file(CreateAttachment::bytes(debug_output, "full_error.txt"));

    webhook.execute(ctx, true, payload).await?;
    Ok(())
}

async fn report_unhandled(e: FrameworkError<'_, Data, Error>) {
    error!("Unhandled command error: {e}");
    if let Some(ctx) = e.ctx() {
        if let Err(failure) = webhook_alert(ctx, &e).await {
            error!("Bot could not report errors to discord: {e}, {failure:?}")
        }
    }
    if let Err(e) = builtins::on_error(e).await {
        error!("Error from the error handler: {e:?}");
    }
}

pub async fn global_error_handler(e: FrameworkError<'_, Data, Error>) {
    match e {
        FrameworkError::Setup {
            framework, error, ..
        } => {
            error!("Bot setup failed: {error:?}");
            framework.shard_manager().shutdown_all().await;
        }
        FrameworkError::UnknownCommand {
            ctx,
            msg,
            msg_content,
            framework,
            ..
        } => {
            if let Err(failure) = suggest_command(ctx, msg, msg_content, framework).await {
                warn!("Could not suggest a command: {failure:?}");
            }
        }
        e => {
            let Some(ctx) = e.ctx() else {
                report_unhandled(e).await;
                return;
            };
            debug!(
                "Error encountered: {e}, Command: {}, Author: {}, Channel: {}",
                ctx.command().qualified_name,
                ctx.author().name,
                ctx.channel_id()
            );
            match translate(&e) {
                Some(reply) => {
                    if let Err(failure) = send_reply(ctx, reply).await {
                        error!("Could not send error reply: {failure:?}");
                    }
                }
                None => report_unhandled(e).await,
            }
        }
    }
}
