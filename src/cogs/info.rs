use std::sync::LazyLock;

use chrono::DateTime;
use poise::{
    serenity_prelude::{self as serenity, utils::FormattedTimestamp, CreateEmbed, CreateEmbedAuthor},
    CreateReply,
};
use regex::Regex;

use crate::{
    constants::SNOWFLAKE_ICON,
    errors::CommandError,
    paginate::{chunk_lines, paginate, DESCRIPTION_LIMIT},
    util::{escape_markdown, parse_id},
    Context, Result,
};

use super::Cog;

pub fn cog() -> Cog {
    Cog::new(
        vec![char_info(), snowflake(), slash_snowflake()],
        "Info".to_string(),
    )
}

const MAX_CHARACTERS: usize = 50;
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;
const SNOWFLAKES_PER_PAGE: usize = 5;
const SNOWFLAKE_PAGE_CHARS: usize = 1000;

static CUSTOM_EMOJI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(a?):(\w+):(\d+)>").expect("emoji pattern should compile"));

/// Why the input can't be described, if it can't.
fn rejection(characters: &str) -> Option<String> {
    if CUSTOM_EMOJI.is_match(characters) {
        return Some(
            "**Non-Character Detected**\n\
            Only unicode characters can be processed, but a custom Discord emoji \
            was found. Please remove it and try again."
                .into(),
        );
    }
    let count = characters.chars().count();
    if count > MAX_CHARACTERS {
        return Some(format!("Too many characters ({count}/{MAX_CHARACTERS})"));
    }
    None
}

/// Returns the embed line for `c` and its escape sequence.
fn describe_char(c: char) -> (String, String) {
    let digit = format!("{:x}", u32::from(c));
    let escape = if digit.len() <= 4 {
        format!("\\u{digit:0>4}")
    } else {
        format!("\\U{digit:0>8}")
    };
    let url = format!("https://www.compart.com/en/unicode/U+{digit:0>4}");
    let name = unicode_names2::name(c)
        .map(|name| name.to_string())
        .unwrap_or_default();
    let line = format!(
        "`{escape:<10}`: [{name}]({url}) - {}",
        escape_markdown(&c.to_string())
    );
    (line, escape)
}

/// Shows you information on up to 50 unicode characters.
#[poise::command(prefix_command, slash_command, rename = "char-info")]
async fn char_info(
    ctx: Context<'_>,
    #[description = "The characters to look up"]
    #[rest]
    characters: String,
) -> Result<()> {
    if let Some(message) = rejection(&characters) {
        ctx.say(message).await?;
        return Ok(());
    }

    paginate(ctx, &char_info_pages(&characters)).await
}

fn char_info_pages(characters: &str) -> Vec<CreateEmbed> {
    let (lines, escapes): (Vec<String>, Vec<String>) =
        characters.chars().map(describe_char).unzip();
    // at most 500 characters, well within the field limit
    let raw = (lines.len() > 1).then(|| format!("`{}`", escapes.concat()));

    chunk_lines(&lines, MAX_CHARACTERS, DESCRIPTION_LIMIT)
        .into_iter()
        .map(|page| {
            let embed = CreateEmbed::new()
                .author(CreateEmbedAuthor::new("Character Info"))
                .description(page);
            match &raw {
                Some(raw) => embed.field("Full Raw Text", raw.clone(), false),
                None => embed,
            }
        })
        .collect()
}

/// Unix seconds at which the snowflake was minted.
fn created_at(id: u64) -> i64 {
    (((id >> 22) + DISCORD_EPOCH_MS) / 1000) as i64
}

fn snowflake_line(id: u64) -> String {
    let created = created_at(id);
    let timestamp =
        serenity::Timestamp::from(DateTime::from_timestamp(created, 0).unwrap_or_default());
    format!(
        "**{id}** ({created})\nCreated at {} ({}).",
        FormattedTimestamp::new(timestamp, Some(serenity::FormattedTimestampStyle::ShortDateTime)),
        FormattedTimestamp::new(timestamp, Some(serenity::FormattedTimestampStyle::RelativeTime)),
    )
}

/// Parses every argument, dropping repeats but keeping the order given.
fn parse_snowflakes(args: &[String]) -> std::result::Result<Vec<u64>, CommandError> {
    if args.is_empty() {
        return Err(CommandError::BadArgument(
            "At least one snowflake must be provided.".into(),
        ));
    }
    let mut ids: Vec<u64> = Vec::with_capacity(args.len());
    for arg in args {
        let id = parse_id(arg)
            .ok_or_else(|| CommandError::BadArgument(format!("`{arg}` is not a valid snowflake.")))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn snowflake_embed(author: &str, description: String) -> CreateEmbed {
    CreateEmbed::new()
        .colour(serenity::Colour::BLUE)
        .author(CreateEmbedAuthor::new(author).icon_url(SNOWFLAKE_ICON))
        .description(description)
}

/// Get Discord snowflake creation time.
#[poise::command(prefix_command, aliases("snf", "snfl", "sf"))]
async fn snowflake(
    ctx: Context<'_>,
    #[description = "IDs or mentions to decode"] snowflakes: Vec<String>,
) -> Result<()> {
    let ids = parse_snowflakes(&snowflakes)?;
    paginate(ctx, &snowflake_pages(&ids)).await
}

fn snowflake_pages(ids: &[u64]) -> Vec<CreateEmbed> {
    let author = if ids.len() == 1 { "Snowflake" } else { "Snowflakes" };
    let lines: Vec<String> = ids.iter().map(|&id| snowflake_line(id)).collect();
    chunk_lines(&lines, SNOWFLAKES_PER_PAGE, SNOWFLAKE_PAGE_CHARS)
        .into_iter()
        .map(|page| snowflake_embed(author, page))
        .collect()
}

/// Get creation date of a snowflake.
#[poise::command(slash_command, rename = "snowflake")]
async fn slash_snowflake(
    ctx: Context<'_>,
    #[description = "The snowflake."] snowflake: String,
) -> Result<()> {
    let Ok(id) = snowflake.trim().parse::<u64>() else {
        ctx.send(
            CreateReply::default()
                .content("`snowflake` must be an integer!")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let embed = snowflake_embed("Snowflake", snowflake_line(id));
    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn as_json(embeds: &[CreateEmbed]) -> Vec<Value> {
        embeds
            .iter()
            .map(|embed| serde_json::to_value(embed).unwrap())
            .collect()
    }

    #[test]
    fn char_info_pages_fit_the_description_limit() {
        // one of the longest character names there is
        let longest = '\u{FBF9}'.to_string().repeat(MAX_CHARACTERS);
        for input in ["a".repeat(MAX_CHARACTERS), longest] {
            assert_eq!(rejection(&input), None);
            let pages = as_json(&char_info_pages(&input));
            assert!(pages.len() > 1);

            let mut described = 0;
            for page in &pages {
                let description = page["description"].as_str().unwrap();
                assert!(description.chars().count() <= DESCRIPTION_LIMIT);
                described += description.lines().count();
                assert_eq!(page["author"]["name"], json!("Character Info"));
                assert_eq!(page["fields"][0]["name"], json!("Full Raw Text"));
            }
            assert_eq!(described, MAX_CHARACTERS);
        }
    }

    #[test]
    fn single_characters_skip_the_raw_text_field() {
        let pages = as_json(&char_info_pages("a"));
        assert_eq!(pages.len(), 1);
        assert!(pages[0]
            .get("fields")
            .and_then(Value::as_array)
            .map_or(true, Vec::is_empty));
    }

    #[test]
    fn every_snowflake_page_keeps_the_embed_style() {
        let ids: Vec<u64> = (1..=12).map(|n| n << 22).collect();
        let pages = as_json(&snowflake_pages(&ids));
        assert_eq!(pages.len(), 3);
        for page in &pages {
            assert_eq!(page["color"], json!(serenity::Colour::BLUE.0));
            assert_eq!(page["author"]["name"], json!("Snowflakes"));
            assert_eq!(page["author"]["icon_url"], json!(SNOWFLAKE_ICON));
        }
        assert_eq!(
            pages[2]["description"].as_str().unwrap().matches("Created at").count(),
            2
        );
    }

    #[test]
    fn a_single_snowflake_is_singular() {
        let pages = as_json(&snowflake_pages(&[175928847299117063]));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0]["author"]["name"], json!("Snowflake"));
    }

    #[test]
    fn describes_basic_characters() {
        let (line, escape) = describe_char('a');
        assert_eq!(escape, "\\u0061");
        assert_eq!(
            line,
            "`\\u0061    `: [LATIN SMALL LETTER A](https://www.compart.com/en/unicode/U+0061) - a"
        );
    }

    #[test]
    fn uses_long_escapes_outside_the_bmp() {
        let (line, escape) = describe_char('🐍');
        assert_eq!(escape, "\\U0001f40d");
        assert!(line.contains("[SNAKE](https://www.compart.com/en/unicode/U+1f40d)"));
    }

    #[test]
    fn escapes_markdown_characters() {
        let (line, _) = describe_char('*');
        assert!(line.ends_with(" - \\*"));
    }

    #[test]
    fn rejects_custom_emoji_and_long_input() {
        assert!(rejection("<:python:123456>").is_some());
        assert!(rejection("<a:dance:42> hi").is_some());
        assert_eq!(
            rejection(&"x".repeat(51)).as_deref(),
            Some("Too many characters (51/50)")
        );
        assert_eq!(rejection(&"é".repeat(50)), None);
    }

    #[test]
    fn decodes_snowflake_timestamps() {
        assert_eq!(created_at(80351110224678912), 1439227597);
        assert_eq!(created_at(0), 1420070400);
    }

    #[test]
    fn formats_snowflake_lines() {
        assert_eq!(
            snowflake_line(175928847299117063),
            "**175928847299117063** (1462015105)\n\
             Created at <t:1462015105:f> (<t:1462015105:R>)."
        );
    }

    #[test]
    fn snowflake_arguments_are_deduplicated_in_order() {
        let args: Vec<String> = ["<@2>", "1", "2", "<#1>", "3"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(parse_snowflakes(&args).unwrap(), [2, 1, 3]);
    }

    #[test]
    fn snowflake_arguments_must_be_present_and_valid() {
        assert!(matches!(
            parse_snowflakes(&[]),
            Err(CommandError::BadArgument(message)) if message == "At least one snowflake must be provided."
        ));
        assert!(matches!(
            parse_snowflakes(&["abc".to_string()]),
            Err(CommandError::BadArgument(_))
        ));
    }
}
