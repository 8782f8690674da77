//! Cooldowns are tracked manually so that only successful invocations are
//! charged: the framework check rejects commands still cooling down, and the
//! post-command hook, which poise only runs after a command succeeds, starts
//! the cooldown.

use std::{sync::PoisonError, time::Duration};

use poise::{CooldownConfig, CooldownContext, CooldownTracker};
use tracing::debug;

use crate::{errors::CommandError, Context, Result};

/// Time left before `ctx` may use the command again, if any. Only charged
/// invocations count.
pub fn remaining(
    tracker: &CooldownTracker,
    config: &CooldownConfig,
    ctx: CooldownContext,
) -> Option<Duration> {
    tracker.remaining_cooldown(ctx, config)
}

pub async fn check(ctx: Context<'_>) -> Result<bool> {
    let command = ctx.command();
    let remaining = {
        let tracker = command
            .cooldowns
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let config = command
            .cooldown_config
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        remaining(&tracker, &config, ctx.cooldown_context())
    };

    match remaining {
        Some(remaining) => {
            debug!(
                "Command {} is on cooldown for another {remaining:?}",
                command.qualified_name
            );
            Err(CommandError::OnCooldown(remaining).into())
        }
        None => Ok(true),
    }
}

pub async fn start(ctx: Context<'_>) {
    ctx.command()
        .cooldowns
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .start_cooldown(ctx.cooldown_context());
}
