//! Interactive browser
//!
//! Reads one command per line from stdin. Search text goes through the
//! debouncer, so only the settled value triggers a fetch.

use crate::{describe, print_footer};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracklist_client::{ClientConfig, TracksClient};
use tracklist_core::{SortField, TrackId};
use tracklist_sync::{
    Debouncer, FetchOutcome, PlaybackCoordinator, QueryState, Selection, TracksController,
};

const HELP: &str = "\
Commands:
  /TEXT        search (empty clears)      r            reload
  n | p        next / previous page       g N          go to page N
  sort FIELD   title|artist|album|createdAt
  o            flip sort order            genre [G]    filter by genre
  artist [A]   filter by artist           artists      list all artists
  m            toggle selection mode      x N          toggle row N
  a            select / clear all rows    d            delete selected rows
  rm N         delete row N               play N       play / pause row N
  stop         stop playback              h            help
  q            quit";

enum Flow {
    Continue,
    Fetch,
    Render,
    Quit,
}

struct Session<'a> {
    controller: &'a TracksController<TracksClient>,
    query: QueryState,
    selection: Selection,
    playback: PlaybackCoordinator,
    search: Debouncer<String>,
}

pub async fn run(
    controller: &TracksController<TracksClient>,
    config: &ClientConfig,
) -> anyhow::Result<()> {
    let search = Debouncer::new(String::new(), Duration::from_millis(config.ui.debounce_ms));
    let mut settled = search.subscribe();
    let mut session = Session {
        controller,
        query: QueryState::new(),
        selection: Selection::new(),
        playback: PlaybackCoordinator::new(),
        search,
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    session.fetch().await;
    println!("{}", HELP);

    loop {
        let flow = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => session.handle(line.trim()).await,
                None => Flow::Quit,
            },
            changed = settled.changed() => {
                if changed.is_err() {
                    Flow::Quit
                } else {
                    let text = settled.borrow_and_update().clone();
                    if session.query.set_search(text) {
                        Flow::Fetch
                    } else {
                        Flow::Continue
                    }
                }
            }
        };

        match flow {
            Flow::Continue => {}
            Flow::Fetch => session.fetch().await,
            Flow::Render => session.render().await,
            Flow::Quit => break,
        }
    }

    session.search.cancel();
    Ok(())
}

impl Session<'_> {
    async fn handle(&mut self, line: &str) -> Flow {
        if let Some(text) = line.strip_prefix('/') {
            self.search.push(text.trim().to_string());
            return Flow::Continue;
        }

        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => Flow::Continue,
            "q" | "quit" => Flow::Quit,
            "h" | "help" => {
                println!("{}", HELP);
                Flow::Continue
            }
            "r" => Flow::Fetch,
            "n" => {
                let has_next = self.controller.read(|s| s.meta().has_next()).await;
                if has_next && self.query.set_page(self.query.page() + 1) {
                    Flow::Fetch
                } else {
                    Flow::Continue
                }
            }
            "p" => {
                if self.query.set_page(self.query.page().saturating_sub(1)) {
                    Flow::Fetch
                } else {
                    Flow::Continue
                }
            }
            "g" => match arg.parse::<u32>() {
                Ok(page) if self.query.set_page(page) => Flow::Fetch,
                Ok(_) => Flow::Continue,
                Err(_) => {
                    eprintln!("Usage: g N");
                    Flow::Continue
                }
            },
            "sort" => match arg.parse::<SortField>() {
                Ok(sort) if self.query.set_sort(sort) => Flow::Fetch,
                Ok(_) => Flow::Continue,
                Err(err) => {
                    eprintln!("{}", err);
                    Flow::Continue
                }
            },
            "o" => {
                self.query.toggle_order();
                Flow::Fetch
            }
            "genre" => self.fetch_if(|q| q.set_genre(arg)),
            "artist" => self.fetch_if(|q| q.set_artist(arg)),
            "artists" => {
                match self.controller.refresh_artists().await {
                    Ok(artists) => println!("{}", artists.join(", ")),
                    Err(err) => eprintln!("Error: {}", err),
                }
                Flow::Continue
            }
            "m" => {
                self.selection.toggle_selection_mode();
                Flow::Render
            }
            "x" => {
                if let Some(id) = self.row(arg).await {
                    self.selection.toggle_select(&id);
                }
                Flow::Render
            }
            "a" => {
                let visible = self.controller.read(|s| s.ids()).await;
                self.selection.select_all(&visible);
                Flow::Render
            }
            "d" => {
                self.delete_selected().await;
                Flow::Render
            }
            "rm" => {
                if let Some(id) = self.row(arg).await {
                    if let Err(err) = self.controller.delete_optimistic(&id).await {
                        eprintln!("Error: {}", err);
                    }
                }
                Flow::Render
            }
            "play" => {
                if let Some(id) = self.row(arg).await {
                    self.playback.request_play(&id, false);
                }
                Flow::Render
            }
            "stop" => {
                self.playback.stop();
                Flow::Render
            }
            other => {
                eprintln!("Unknown command '{}' (h for help)", other);
                Flow::Continue
            }
        }
    }

    fn fetch_if(&mut self, change: impl FnOnce(&mut QueryState) -> bool) -> Flow {
        if change(&mut self.query) {
            Flow::Fetch
        } else {
            Flow::Continue
        }
    }

    async fn delete_selected(&mut self) {
        let visible = self.controller.read(|s| s.ids()).await;
        let targets = self.selection.bulk_targets(&visible);
        if targets.is_empty() {
            eprintln!("Nothing selected on this page");
            return;
        }

        match self.controller.bulk_delete_optimistic(&targets).await {
            Ok(summary) if summary.is_complete() => {
                println!("Deleted {} track(s)", summary.succeeded.len());
                self.selection.finish_bulk_action();
            }
            Ok(summary) => {
                eprintln!(
                    "Deleted {}, failed {}",
                    summary.succeeded.len(),
                    summary.failed.len()
                );
            }
            Err(err) => eprintln!("Error: {}", err),
        }
    }

    /// Track id for a 1-based row number on the current page
    async fn row(&self, arg: &str) -> Option<TrackId> {
        let index = arg.parse::<usize>().ok()?.checked_sub(1)?;
        let id = self.controller.read(|s| s.ids().get(index).cloned()).await;
        if id.is_none() {
            eprintln!("No row {}", arg);
        }
        id
    }

    async fn fetch(&mut self) {
        match self.controller.fetch_page(self.query.params()).await {
            FetchOutcome::Applied => self.render().await,
            FetchOutcome::Failed(err) => {
                eprintln!("Error: {}", err);
                self.render().await;
            }
            FetchOutcome::Stale => {}
        }
    }

    async fn render(&self) {
        let store = self.controller.snapshot().await;
        let playing = self.playback.playing();

        println!();
        println!(
            "search: '{}'  sort: {} {}  genre: '{}'  artist: '{}'",
            self.query.search(),
            self.query.sort(),
            self.query.order(),
            self.query.genre(),
            self.query.artist()
        );
        if store.is_empty() {
            println!("  (no tracks)");
        }
        for (i, track) in store.tracks().iter().enumerate() {
            let mark = if self.selection.is_selecting() {
                if self.selection.is_selected(&track.id) {
                    "[x] "
                } else {
                    "[ ] "
                }
            } else {
                ""
            };
            let play = if playing.as_ref() == Some(&track.id) { "▶ " } else { "" };
            println!("{:>3}. {}{}{}", i + 1, mark, play, describe(track));
        }
        print_footer(store.meta().page, store.meta().total_pages, store.meta().total);
        if self.selection.is_selecting() {
            println!("{} selected", self.selection.len());
        }
    }
}
