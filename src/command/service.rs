use crate::message::model::{Embed, Message};
use crate::user::model::User;

use super::Error;
use super::model::{Effect, GIF_PLACEHOLDER_URL, Outcome, extract_youtube_id};

/// Interprets one line of input. Lines starting with `/` are commands
/// (case-insensitive name, whitespace-split arguments); anything else is a
/// plain message from the sender. Pure: the shell appends the messages and
/// executes the effect.
pub fn dispatch(sender: &User, line: &str) -> Outcome {
    let line = line.trim();
    if !line.starts_with('/') {
        return Outcome::message(Message::plain(sender.nickname.clone(), line));
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    match command.as_str() {
        "/help" => Outcome::message(Message::command("help")),
        "/whoami" => dispatch_whoami(sender),
        "/lastseen" => dispatch_lastseen(&args),
        "/whisper" => dispatch_whisper(sender, &args),
        "/askai" => dispatch_askai(sender, &args),
        "/yt" => dispatch_youtube(sender, &args),
        "/link" => dispatch_link(sender, &args),
        "/gif" => dispatch_gif(sender, &args),
        unknown => Outcome::message(Message::system(format!(
            "Unknown command: {unknown}. Type /help for available commands."
        ))),
    }
}

fn dispatch_whoami(sender: &User) -> Outcome {
    let content = if sender.previous_nicknames.is_empty() {
        format!("You are {}. No previous nicknames.", sender.nickname)
    } else {
        format!(
            "You are {}. Previous nicknames: {}",
            sender.nickname,
            sender.previous_nicknames.join(", ")
        )
    };
    Outcome::message(Message::system(content))
}

fn dispatch_lastseen(args: &[&str]) -> Outcome {
    match args.first() {
        None => Outcome::notice(Error::Usage("/lastseen <username>")),
        Some(username) => Outcome {
            effect: Some(Effect::LastSeen {
                username: username.to_string(),
            }),
            ..Default::default()
        },
    }
}

fn dispatch_whisper(sender: &User, args: &[&str]) -> Outcome {
    match args.split_first() {
        Some((target, text)) if !text.is_empty() => Outcome::message(Message::whisper(
            sender.nickname.clone(),
            target,
            &text.join(" "),
        )),
        // Missing target or message goes to the stream, not a notice.
        _ => Outcome::message(Message::system("Usage: /whisper <username> <message>")),
    }
}

fn dispatch_askai(sender: &User, args: &[&str]) -> Outcome {
    if args.is_empty() {
        return Outcome::notice(Error::Usage("/askai <your question>"));
    }

    let question = args.join(" ");
    Outcome {
        messages: vec![Message::plain(
            sender.nickname.clone(),
            format!("@Genie {question}"),
        )],
        effect: Some(Effect::AskAi { question }),
        notice: None,
    }
}

fn dispatch_youtube(sender: &User, args: &[&str]) -> Outcome {
    let url = args.join(" ");
    match extract_youtube_id(&url) {
        Some(video_id) => Outcome::message(
            Message::plain(sender.nickname.clone(), "Shared a YouTube video").with_embed(
                Embed::Youtube {
                    video_id: video_id.to_string(),
                    title: "YouTube Video".into(),
                },
            ),
        ),
        None => Outcome::message(Message::system(
            "Invalid YouTube URL. Use: /yt https://youtube.com/watch?v=VIDEO_ID",
        )),
    }
}

fn dispatch_link(sender: &User, args: &[&str]) -> Outcome {
    let raw = args.join(" ");
    if is_http_url(&raw) {
        Outcome::message(
            Message::plain(sender.nickname.clone(), format!("Shared a link: {raw}")).with_embed(
                Embed::Url {
                    url: raw,
                    title: "Shared Link".into(),
                },
            ),
        )
    } else {
        Outcome::message(Message::system(
            "Invalid URL. Use: /link https://example.com",
        ))
    }
}

fn dispatch_gif(sender: &User, args: &[&str]) -> Outcome {
    let query = (!args.is_empty()).then(|| args.join(" "));
    let content = match &query {
        Some(query) => format!("Shared a GIF: {query}"),
        None => "Shared a GIF".to_string(),
    };

    Outcome::message(
        Message::plain(sender.nickname.clone(), content).with_embed(Embed::Gif {
            url: GIF_PLACEHOLDER_URL.into(),
            title: query.unwrap_or("GIF".into()),
        }),
    )
}

fn is_http_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
