// SPDX-License-Identifier: GPL-3.0-only

//! Drives a [`DexApp`]: spawns the tasks `update` returns and feeds their
//! messages back, interleaved with commands read from stdin.

use std::io::{IsTerminal, Write};

use futures::{StreamExt, stream::FuturesUnordered};
use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use super::{DexApp, Location, LocationError, Message, PaginationAction, Task, pagination};
use crate::core::{
    api::{Collection, FetchError},
    cache::CachedDex,
};
use crate::entities::{Cursor, ENGLISH};
use crate::fl;
use crate::utils::{capitalize_string, dex_number};

/// One line of interactive input
#[derive(Debug, PartialEq)]
pub enum Input {
    Message(Message),
    OpenSprite,
    Help,
    Redraw,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl Input {
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let (command, argument) = line
            .split_once(char::is_whitespace)
            .map(|(command, argument)| (command, argument.trim()))
            .unwrap_or((line, ""));

        let message = match command {
            "" => return Ok(Input::Redraw),
            "q" | "quit" | "exit" => return Ok(Input::Quit),
            "h" | "help" | "?" => return Ok(Input::Help),
            "o" | "open" => return Ok(Input::OpenSprite),
            "n" | "next" => Message::Paginate(PaginationAction::Next),
            "p" | "prev" => Message::Paginate(PaginationAction::Previous),
            "b" | "back" => Message::Back,
            "r" | "reload" => Message::Reload,
            "g" | "go" => Message::Navigate(argument.parse::<Location>()?),
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 => Message::OpenCard(number - 1),
                _ => return Err(InputError::Unknown(line.to_string())),
            },
        };
        Ok(Input::Message(message))
    }
}

/// Applies `message` and every message its tasks lead to, until nothing is pending
pub async fn settle(app: &mut DexApp, message: Message) {
    let mut pending: FuturesUnordered<Task> = app.update(message).into_iter().collect();
    while let Some(next) = pending.next().await {
        pending.extend(app.update(next));
    }
}

/// Renders `location` once every load it starts has finished
pub async fn show(app: &mut DexApp, location: Location) -> String {
    settle(app, Message::Navigate(location)).await;
    app.view()
}

/// One page of a collection listing, numbered when the entries carry an id
pub async fn collection(
    dex: &CachedDex,
    kind: Collection,
    cursor: Cursor,
) -> Result<String, FetchError> {
    let page = dex.page(kind, cursor).await?;
    let count: i64 = page.count;

    let mut lines = vec![fl!("collection-header", kind = kind.path(), count = count)];
    for resource in &page.results {
        let number = resource.id().map(dex_number).unwrap_or_default();
        lines.push(format!("  {number:>6}  {}", capitalize_string(&resource.name)));
    }
    if let Some(next_offset) = pagination::next_offset(cursor, page.has_next()) {
        lines.push(fl!("collection-more", offset = next_offset));
    }

    Ok(lines.join("\n"))
}

/// An ability's name and English short effect
pub async fn ability(dex: &CachedDex, id: &str) -> Result<String, FetchError> {
    let ability = dex.ability(id).await?;
    let effect = ability
        .short_effect(ENGLISH)
        .unwrap_or_else(|| fl!("ability-no-effect"));

    Ok(format!("{}\n  {effect}", capitalize_string(&ability.name)))
}

/// Interactive viewer, redraws after every message or command until `q` or end of input
pub async fn browse(mut app: DexApp, start: Location) -> std::io::Result<()> {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notice: Option<String> = None;

    spawn_all(&sender, app.update(Message::Navigate(start)));
    draw(&app, notice.as_deref())?;

    loop {
        tokio::select! {
            Some(message) = receiver.recv() => {
                spawn_all(&sender, app.update(message));
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                notice = None;

                match Input::parse(&line) {
                    Ok(Input::Message(message)) => spawn_all(&sender, app.update(message)),
                    Ok(Input::OpenSprite) => notice = open_sprite(&app),
                    Ok(Input::Help) => notice = Some(fl!("help")),
                    Ok(Input::Redraw) => {}
                    Ok(Input::Quit) => break,
                    Err(InputError::Location(err)) => {
                        notice = Some(fl!("invalid-location", reason = err.to_string()));
                    }
                    Err(InputError::Unknown(command)) => {
                        notice = Some(fl!("unknown-command", command = command));
                    }
                }
            }
        }

        draw(&app, notice.as_deref())?;
    }

    Ok(())
}

fn spawn_all(sender: &mpsc::UnboundedSender<Message>, tasks: Vec<Task>) {
    for task in tasks {
        let sender = sender.clone();
        tokio::spawn(async move {
            // the receiver is gone once the viewer quits
            let _ = sender.send(task.await);
        });
    }
}

/// Hands the current sprite to the desktop, returns a notice when that is not possible
fn open_sprite(app: &DexApp) -> Option<String> {
    let Some(url) = app.current_sprite() else {
        return Some(fl!("no-sprite-to-open"));
    };

    match open::that_detached(&url) {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(%err, %url, "failed to open sprite");
            Some(fl!("open-failed", url = url))
        }
    }
}

fn draw(app: &DexApp, notice: Option<&str>) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if stdout.is_terminal() {
        write!(stdout, "\x1b[2J\x1b[H")?;
    }
    writeln!(stdout, "{}", app.view())?;
    if let Some(notice) = notice {
        writeln!(stdout, "{notice}")?;
    }
    write!(stdout, "> ")?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::DexConfig;
    use crate::core::testing::FakeDex;
    use crate::entities::fixtures;

    #[test]
    fn parses_commands() {
        assert_eq!(
            Input::parse("n"),
            Ok(Input::Message(Message::Paginate(PaginationAction::Next)))
        );
        assert_eq!(
            Input::parse(" prev "),
            Ok(Input::Message(Message::Paginate(PaginationAction::Previous)))
        );
        assert_eq!(Input::parse("b"), Ok(Input::Message(Message::Back)));
        assert_eq!(Input::parse("3"), Ok(Input::Message(Message::OpenCard(2))));
        assert_eq!(Input::parse(""), Ok(Input::Redraw));
        assert_eq!(Input::parse("q"), Ok(Input::Quit));
        assert_eq!(Input::parse("o"), Ok(Input::OpenSprite));
    }

    #[test]
    fn go_takes_a_location() {
        assert_eq!(
            Input::parse("g /pokemon/?id=25&offset=24"),
            Ok(Input::Message(Message::Navigate(Location::Detail {
                id: 25,
                offset: 24
            })))
        );
        assert!(matches!(
            Input::parse("g /pokemon/?id=0"),
            Err(InputError::Location(LocationError::InvalidId(_)))
        ));
    }

    #[test]
    fn rejects_unknown_commands() {
        assert_eq!(
            Input::parse("0"),
            Err(InputError::Unknown("0".to_string()))
        );
        assert!(matches!(Input::parse("jump 4"), Err(InputError::Unknown(_))));
    }

    #[tokio::test]
    async fn show_waits_for_every_load() {
        let fake = FakeDex::new()
            .with_pokemon(7, "squirtle", &["water"])
            .with_type("water", &["grass", "electric"]);
        let mut app = DexApp::new(CachedDex::new(Arc::new(fake)), &DexConfig::default());

        let view = show(&mut app, Location::Detail { id: 7, offset: 0 }).await;

        assert!(view.contains("Squirtle"));
        assert!(view.contains("Electric, Grass"));
        assert!(!view.contains("Loading"));
    }

    #[tokio::test]
    async fn collection_pages() {
        let dex = CachedDex::new(Arc::new(FakeDex::new().with_many_pokemon(30)));

        let first = collection(&dex, Collection::Pokemon, Cursor::new(0, 12))
            .await
            .unwrap();
        assert!(first.starts_with("pokemon: 30 entries"));
        assert!(first.contains("#0001  Mon 1"));
        assert!(first.contains("#0012  Mon 12"));
        assert!(!first.contains("Mon 13"));
        assert!(first.ends_with("more with --offset 12"));

        let last = collection(&dex, Collection::Pokemon, Cursor::new(24, 12))
            .await
            .unwrap();
        assert!(last.contains("#0030  Mon 30"));
        assert!(!last.contains("more with"));
    }

    #[tokio::test]
    async fn collection_errors_propagate() {
        let dex = CachedDex::new(Arc::new(
            FakeDex::new().failing("pokemon?offset=0&limit=20"),
        ));

        let err = collection(&dex, Collection::Pokemon, Cursor::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn ability_effects() {
        let dex = CachedDex::new(Arc::new(FakeDex::new().with_ability(fixtures::ability(
            65,
            "overgrow",
            "Powers up Grass-type moves\nin a pinch.",
        ))));

        let by_name = ability(&dex, "overgrow").await.unwrap();
        assert_eq!(by_name, "Overgrow\n  Powers up Grass-type moves in a pinch.");
        assert_eq!(ability(&dex, "65").await.unwrap(), by_name);

        assert!(matches!(
            ability(&dex, "levitate").await,
            Err(FetchError::NotFound(_))
        ));
    }
}
