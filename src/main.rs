use std::io::Write;
use std::path::Path;
use std::process::exit;

use futures::StreamExt;
use log::error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use chatconnect_client::files::model::{Kind, Upload};
use chatconnect_client::files::service::Event;
use chatconnect_client::message::Kind as MessageKind;
use chatconnect_client::message::model::{Embed, Message};
use chatconnect_client::state::AppState;
use chatconnect_client::user::Name;
use chatconnect_client::user::model::time_since;
use chatconnect_client::{integration, thread};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() {
    let config = integration::Config::default();
    let http = integration::init_http_client();
    let state = AppState::init(&config, http);

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    if let Err(e) = run(&state, &mut input).await {
        error!("{e}");
        exit(1);
    }
}

async fn run(state: &AppState, input: &mut Input) -> std::io::Result<()> {
    println!("ChatConnect: connect with people around the world.");

    let Some(me) = login(state, input).await? else {
        return Ok(());
    };
    println!(
        "Welcome, {}! Type a message, /help for commands, :help for view actions.",
        me.nickname
    );

    let mut printed = 0;
    render_new(state, &mut printed).await;

    loop {
        prompt(state).await;
        let Some(line) = input.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line == ":quit" {
            break;
        }

        if let Some(action) = line.strip_prefix(':') {
            if let Err(notice) = view_action(state, action, input).await {
                println!("! {notice}");
            }
        } else if state.chat.active_private().await.is_some() {
            match state.chat.send_private(&line).await {
                Ok(message) => println!("(pm) {}: {}", message.nickname, message.content),
                Err(notice) => println!("! {notice}"),
            }
        } else if let Err(notice) = state.chat.submit(&line).await {
            println!("! {notice}");
        }

        render_new(state, &mut printed).await;
    }
    Ok(())
}

async fn login(
    state: &AppState,
    input: &mut Input,
) -> std::io::Result<Option<chatconnect_client::user::model::User>> {
    loop {
        let Some(nickname) = ask(input, "nickname (4-20 chars)> ").await? else {
            return Ok(None);
        };
        let Some(age_group) = ask(input, "age group [teens|young-adults|adults]> ").await? else {
            return Ok(None);
        };

        match state.login(&nickname, &age_group).await {
            Ok(user) => return Ok(Some(user)),
            Err(notice) => println!("! {notice}"),
        }
    }
}

async fn ask(input: &mut Input, question: &str) -> std::io::Result<Option<String>> {
    print!("{question}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

async fn prompt(state: &AppState) {
    let mark = match state.chat.active_private().await {
        Some(with) => format!("pm:{with}> "),
        None => "> ".to_string(),
    };
    print!("{mark}");
    let _ = std::io::stdout().flush();
}

async fn view_action(
    state: &AppState,
    action: &str,
    input: &mut Input,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut parts = action.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match (verb, rest.as_slice()) {
        ("help", _) => render_actions(),
        ("inbox", _) => {
            state.threads.load().await?;
            render_inbox(state).await;
        }
        ("pin", [id]) => {
            let updated = state.threads.toggle_pin(&thread::Id::from(*id)).await?;
            let flag = if updated.is_pinned() { "pinned" } else { "unpinned" };
            println!("{flag} {}", updated.id);
        }
        ("copy", [id]) => {
            let fork = state.threads.copy(&thread::Id::from(*id)).await?;
            println!("duplicated into {}", fork.id);
        }
        ("delete", [id]) => {
            let confirm = ask(input, "Are you sure you want to delete this thread? [y/N] ")
                .await?
                .unwrap_or_default();
            if confirm.eq_ignore_ascii_case("y") {
                state.threads.delete(&thread::Id::from(*id)).await?;
                println!("thread deleted");
            }
        }
        ("status", [status]) => state.chat.set_status(status.parse()?).await?,
        ("members", _) => render_members(state).await,
        ("friends", _) => render_friends(state).await,
        ("refresh", _) => {
            let count = state.chat.refresh_members().await?;
            println!("members list updated, {count} online");
        }
        ("refresh-friends", _) => {
            let count = state.chat.refresh_friends().await?;
            println!("friends list updated, {count} friends");
        }
        ("friend", [name]) => {
            state.chat.befriend(&Name::from(*name)).await?;
        }
        ("unfriend", [name]) => {
            state.chat.unfriend(&Name::from(*name)).await?;
        }
        ("pm", [name]) => {
            let chat = state.chat.open_private(&Name::from(*name)).await?;
            println!("-- private chat with {} --", chat.with_user);
            for message in &chat.messages {
                println!("(pm) {}: {}", message.nickname, message.content);
            }
        }
        ("back", _) => state.chat.close_private().await,
        ("mention", text) => {
            for user in state.chat.mention_candidates(&text.join(" ")).await {
                println!("@{}", user.nickname);
            }
        }
        ("upload", [path]) => upload(state, Path::new(path)).await?,
        ("embed", [url]) => {
            state.chat.share_link(url).await?;
        }
        ("mute", [name]) => println!("{}", state.chat.mute(&Name::from(*name))),
        ("block", [name]) => println!("{}", state.chat.block(&Name::from(*name))),
        ("kick", [name]) => state.chat.kick(&Name::from(*name)).await,
        ("ban", [name]) => state.chat.ban(&Name::from(*name)).await,
        _ => println!("unknown action :{verb}; try :help"),
    }
    Ok(())
}

async fn upload(state: &AppState, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let payload = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or("upload".into());
    let mime = guess_mime(path);
    let kind = Kind::infer(mime);

    let upload = Upload {
        filename,
        mime: mime.to_string(),
        payload: payload.into(),
    };

    let mut events = state.files.upload(upload, kind);
    while let Some(event) = events.next().await {
        match event {
            Event::Progress(percent) => {
                print!("\ruploading... {percent}%");
                let _ = std::io::stdout().flush();
            }
            Event::Done(uploaded) => {
                println!("\r{} uploaded successfully", uploaded.filename);
                state.chat.share_file(kind, uploaded.into()).await?;
            }
            Event::Failed(notice) => println!("\n! {notice}"),
        }
    }
    Ok(())
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

async fn render_new(state: &AppState, printed: &mut usize) {
    let messages = state.chat.messages().await;
    let me = state.chat.me().await.ok().map(|me| me.nickname);
    for message in &messages[*printed..] {
        render_message(message, me.as_ref());
    }
    *printed = messages.len();
}

fn render_message(message: &Message, me: Option<&Name>) {
    match message.kind {
        MessageKind::System => println!("-- {} --", message.content),
        MessageKind::Command => {
            if message.content == "help" {
                render_help();
            }
        }
        MessageKind::Whisper => println!(
            "[whisper] {} {}: {}",
            message.timestamp.format("%H:%M"),
            message.nickname,
            message.content
        ),
        MessageKind::Message => {
            let mentioned = me.map(|me| message.mentions(me)).unwrap_or(false);
            let mark = if mentioned { "*" } else { " " };
            println!(
                "{mark}{} {}: {}",
                message.timestamp.format("%H:%M"),
                message.nickname,
                message.content
            );
            if let Some(embed) = &message.embed {
                render_embed(embed);
            }
            if let Some(file) = &message.file {
                println!("   [file] {} ({} bytes, {}) {}", file.name, file.size, file.mime, file.url);
            }
        }
    }
}

fn render_embed(embed: &Embed) {
    match embed {
        Embed::Youtube { video_id, title } => {
            println!("   [youtube] {title} https://youtube.com/watch?v={video_id}")
        }
        Embed::Url { url, title } => println!("   [link] {title} {url}"),
        Embed::Gif { url, title } => println!("   [gif] {title} {url}"),
    }
}

// Help content is a view concern; the dispatcher only emits the marker.
fn render_help() {
    println!("Available commands:");
    println!("  /help                          show this help message");
    println!("  /whoami                        show your previous nicknames");
    println!("  /lastseen <username>           check when a user was last seen");
    println!("  /whisper <username> <message>  send a whisper in general chat");
    println!("  /askai <question>              ask the AI assistant");
    println!("  /yt <url>                      embed a YouTube video");
    println!("  /link <url>                    embed a URL with preview");
    println!("  /gif [query]                   send a GIF");
    println!("Features: @mentions, #hashtags");
}

fn render_actions() {
    println!("View actions:");
    println!("  :inbox                 load and show the thread inbox");
    println!("  :pin|:copy|:delete <thread-id>");
    println!("  :status <online|idle|busy|invisible>");
    println!("  :members :friends :refresh :refresh-friends");
    println!("  :friend|:unfriend|:mute|:block|:kick|:ban <name>");
    println!("  :pm <name> / :back     open or leave a private chat");
    println!("  :mention <text>        show @-completion candidates");
    println!("  :upload <path> / :embed <url>");
    println!("  :quit");
}

async fn render_inbox(state: &AppState) {
    let threads = state.threads.snapshot().await;
    if threads.is_empty() {
        println!("inbox is empty");
        return;
    }

    for thread in &threads {
        let pin = if thread.is_pinned() { "*" } else { " " };
        let fork = match state.threads.parent_of(thread).await {
            Some(parent) => format!("  (fork of {})", parent.id),
            None => String::new(),
        };
        println!(
            "{pin} {}  [{:?}]  {}{fork}",
            thread.id,
            thread.status,
            thread.preview()
        );
    }
}

async fn render_members(state: &AppState) {
    let roster = state.chat.roster().await;
    println!("Online: {} members", roster.len());
    for user in roster {
        let unread = state.chat.unread_count(&user.nickname).await;
        let badge = if unread > 0 {
            format!("  ({unread} unread)")
        } else {
            String::new()
        };
        println!("  {} [{}]{badge}", user.nickname, user.status);
    }
}

async fn render_friends(state: &AppState) {
    let friends = state.users.friends().await;
    println!("Friends: {}", friends.len());
    let now = chrono::Utc::now();
    for friend in friends {
        println!(
            "  {} [{}] last online {}",
            friend.nickname,
            friend.presence,
            time_since(friend.last_online, now)
        );
    }
}
