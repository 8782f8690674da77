use poise::serenity_prelude as serenity;

use crate::Command;

/// Minimum similarity for a command name to count as a suggestion.
pub const SIMILARITY_CUTOFF: f64 = 0.6;

/// Names and aliases of every visible command, subcommands included.
pub fn visible_names(commands: &[Command]) -> Vec<(&str, &Command)> {
    let mut names = vec![];
    for command in commands {
        if command.hide_in_help {
            continue;
        }
        names.push((command.name.as_str(), command));
        names.extend(command.aliases.iter().map(|alias| (alias.as_str(), command)));
        names.extend(visible_names(&command.subcommands));
    }
    names
}

/// The candidate most similar to `name`, if any reaches the cutoff.
/// Ties go to the earlier candidate.
pub fn closest_match<'a, T>(
    name: &str,
    candidates: impl IntoIterator<Item = (&'a str, T)>,
) -> Option<(&'a str, T)> {
    let mut best: Option<(f64, (&'a str, T))> = None;
    for (candidate, value) in candidates {
        let score = strsim::normalized_damerau_levenshtein(name, candidate);
        if score < SIMILARITY_CUTOFF {
            continue;
        }
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, (candidate, value)));
        }
    }
    best.map(|(_, found)| found)
}

/// Whether the author could plausibly run `command` where they typed.
pub fn can_run(
    command: &Command,
    author: serenity::UserId,
    in_guild: bool,
    owners: &std::collections::HashSet<serenity::UserId>,
) -> bool {
    if command.owners_only && !owners.contains(&author) {
        return false;
    }
    if command.guild_only && !in_guild {
        return false;
    }
    true
}

/// The user's message with the mistyped command swapped for the suggestion.
pub fn corrected_content(content: &str, typed: &str, suggestion: &str) -> String {
    content.replacen(typed, suggestion, 1)
}
