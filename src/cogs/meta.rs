use poise::{builtins::autocomplete_command, samples::HelpConfiguration};

use crate::{Context, Result};

use super::Cog;

pub fn cog() -> Cog {
    Cog::new(vec![help()], "Meta".to_string())
}

/// Get help on the bot or a command
#[poise::command(prefix_command, slash_command, track_edits)]
async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help about"]
    #[autocomplete = "autocomplete_command"]
    command: Option<String>,
) -> Result<()> {
    let config = HelpConfiguration {
        extra_text_at_bottom: "Mistyped a command? I'll suggest the closest match.",
        show_subcommands: true,
        ..Default::default()
    };
    poise::builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}
