//! Button pagination over full embeds, so every page keeps its colour and
//! author.

use std::time::Duration;

use poise::{
    serenity_prelude::{self as serenity, CreateEmbed, CreateEmbedFooter},
    CreateReply,
};

use crate::{Context, Result};

/// Discord's cap on an embed description, in characters.
pub const DESCRIPTION_LIMIT: usize = 4096;

const BUTTON_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Groups lines into pages of at most `max_lines` lines and `max_chars`
/// characters (newlines included). A single line over `max_chars` gets a page
/// of its own.
pub fn chunk_lines(lines: &[String], max_lines: usize, max_chars: usize) -> Vec<String> {
    let mut pages = vec![];
    let mut page = String::new();
    let mut page_lines = 0;
    let mut page_chars = 0;

    for line in lines {
        let line_chars = line.chars().count();
        let needed = if page_lines == 0 { line_chars } else { line_chars + 1 };
        if page_lines > 0 && (page_lines == max_lines || page_chars + needed > max_chars) {
            pages.push(std::mem::take(&mut page));
            page_lines = 0;
            page_chars = 0;
        }
        if page_lines > 0 {
            page.push('\n');
            page_chars += 1;
        }
        page.push_str(line);
        page_chars += line_chars;
        page_lines += 1;
    }
    if page_lines > 0 {
        pages.push(page);
    }
    pages
}

/// The page shown after pressing a button, wrapping around at both ends.
fn turn(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else {
        current.checked_sub(1).unwrap_or(len - 1)
    }
}

fn with_footer(page: &CreateEmbed, index: usize, len: usize) -> CreateEmbed {
    page.clone()
        .footer(CreateEmbedFooter::new(format!("Page {}/{len}", index + 1)))
}

/// Sends the embeds as one message, with previous/next buttons when there is
/// more than one.
pub async fn paginate(ctx: Context<'_>, pages: &[CreateEmbed]) -> Result<()> {
    let Some(first) = pages.first() else {
        return Ok(());
    };
    if pages.len() == 1 {
        ctx.send(CreateReply::default().embed(first.clone())).await?;
        return Ok(());
    }

    let ctx_id = ctx.id();
    let prev_button_id = format!("{ctx_id}prev");
    let next_button_id = format!("{ctx_id}next");

    let buttons = serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(&prev_button_id).emoji('◀'),
        serenity::CreateButton::new(&next_button_id).emoji('▶'),
    ]);
    ctx.send(
        CreateReply::default()
            .embed(with_footer(first, 0, pages.len()))
            .components(vec![buttons]),
    )
    .await?;

    let mut current = 0;
    while let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
        .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
        .timeout(BUTTON_TIMEOUT)
        .await
    {
        if press.data.custom_id == next_button_id {
            current = turn(current, pages.len(), true);
        } else if press.data.custom_id == prev_button_id {
            current = turn(current, pages.len(), false);
        } else {
            continue;
        }

        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(with_footer(&pages[current], current, pages.len())),
                ),
            )
            .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn splits_by_line_count() {
        let pages = chunk_lines(&lines(&["a", "b", "c", "d", "e", "f", "g"]), 3, 1000);
        assert_eq!(pages, ["a\nb\nc", "d\ne\nf", "g"]);
    }

    #[test]
    fn splits_by_size_counting_newlines() {
        // "aaaa\nbbbb" is 9 characters
        let pages = chunk_lines(&lines(&["aaaa", "bbbb", "cccc"]), 10, 9);
        assert_eq!(pages, ["aaaa\nbbbb", "cccc"]);
        let pages = chunk_lines(&lines(&["aaaa", "bbbb", "cccc"]), 10, 8);
        assert_eq!(pages, ["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let pages = chunk_lines(&lines(&["éé", "éé"]), 10, 5);
        assert_eq!(pages, ["éé\néé"]);
    }

    #[test]
    fn no_lines_means_no_pages() {
        assert!(chunk_lines(&[], 5, 100).is_empty());
    }

    #[test]
    fn buttons_wrap_around() {
        assert_eq!(turn(0, 3, true), 1);
        assert_eq!(turn(2, 3, true), 0);
        assert_eq!(turn(0, 3, false), 2);
        assert_eq!(turn(2, 3, false), 1);
    }
}
