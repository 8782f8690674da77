use std::time::Duration;

use poise::serenity_prelude as serenity;

pub const SOFT_RED: serenity::Colour = serenity::Colour(0xcd6d6d);

pub const QUESTION_MARK_ICON: &str = "https://cdn.discordapp.com/emojis/512367613339369475.png";
pub const SNOWFLAKE_ICON: &str =
    "https://github.com/twitter/twemoji/blob/master/assets/72x72/2744.png?raw=true";

/// How long error replies stay up in text channels.
pub const ERROR_DELETE_DELAY: Duration = Duration::from_millis(7_500);
pub const SUGGESTION_DELETE_DELAY: Duration = Duration::from_secs(10);

pub const ERROR_REPLIES: &[&str] = &[
    "Please don't do that.",
    "You have to stop.",
    "Do you mind?",
    "In the future, don't do that.",
    "That was a mistake.",
    "You blew it.",
    "You're bad at computers.",
    "Are you trying to kill me?",
    "Noooooo!!",
    "I can't believe you've done this",
];

pub const NEGATIVE_REPLIES: &[&str] = &[
    "Noooooo!!",
    "Nope.",
    "I'm sorry Dave, I'm afraid I can't do that.",
    "I don't think so.",
    "Not gonna happen.",
    "Out of the question.",
    "Huh? No.",
    "Nah.",
    "Naw.",
    "Not likely.",
    "No way, José.",
    "Not in a million years.",
    "Fat chance.",
    "Certainly not.",
    "NEGATORY.",
    "Nuh-uh.",
    "Not in my house!",
];
