//! Line-oriented terminal front-end.
//!
//! Routes user input to the catalog, detail, add, edit and favorites views
//! and forwards intents to [`crate::commands`].  Generic over its input and
//! output so a whole session can be scripted.

use std::path::Path;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use fishpedia_shared::{CommentId, FishDraft, FishId, MediaId, NewMedia};

use crate::commands::edit::EditDraft;
use crate::commands::{catalog, edit, facts, favorites, session};
use crate::error::CommandError;
use crate::events::CatalogEvent;
use crate::facts::FunFactFetcher;
use crate::state::SharedState;
use crate::views::{self, Input};

const EDIT_HELP: &str = "\
Edit commands:
  name <text> | name-en <text> | sci <text> | desc <text> | desc-en <text> | habitat <text>
  attach <path>      add a photo or video
  rm-media <id>      remove a photo or video
  comment <text>     add a comment
  rm-comment <id>    remove a comment
  show               preview the draft
  save | cancel";

/// Guess a content type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Read a photo or video from disk.
pub async fn load_media(path: &Path) -> std::io::Result<NewMedia> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();
    Ok(NewMedia::new(file_name, content_type_for(path), bytes))
}

/// The screen last shown, re-rendered when an event makes it stale.
#[derive(Debug, Clone, PartialEq, Eq)]
enum View {
    None,
    Catalog(Option<String>),
    Detail(FishId),
    Favorites,
}

impl View {
    fn is_stale(&self, event: &CatalogEvent) -> bool {
        match (self, event) {
            (
                Self::Catalog(_),
                CatalogEvent::FishAdded { .. } | CatalogEvent::FishUpdated { .. },
            ) => true,
            (Self::Detail(id), CatalogEvent::FishUpdated { fish_id })
            | (Self::Detail(id), CatalogEvent::FavoritesChanged { fish_id, .. }) => id == fish_id,
            (
                Self::Favorites,
                CatalogEvent::FavoritesChanged { .. }
                | CatalogEvent::FishUpdated { .. }
                | CatalogEvent::SessionChanged { .. },
            ) => true,
            _ => false,
        }
    }
}

pub struct Frontend<R, W> {
    state: SharedState,
    fetcher: FunFactFetcher,
    lines: Lines<R>,
    out: W,
    events: broadcast::Receiver<CatalogEvent>,
    view: View,
}

impl<R, W> Frontend<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: SharedState, fetcher: FunFactFetcher, input: R, out: W) -> Result<Self> {
        let events = state
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?
            .events
            .subscribe();
        Ok(Self {
            state,
            fetcher,
            lines: input.lines(),
            out,
            events,
            view: View::None,
        })
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.flush().await?;
        Ok(self.lines.next_line().await?.map(|l| l.trim().to_string()))
    }

    /// Process input until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        let user = session::current_user(&self.state)?;
        self.say(&views::render_banner(user.as_ref())).await?;

        while let Some(line) = self.ask("> ").await? {
            match Input::parse(&line) {
                Ok(Input::Quit) => break,
                Ok(input) => self.handle(input).await?,
                Err(e) => self.say(&e.to_string()).await?,
            }
            self.refresh_view().await?;
        }
        Ok(())
    }

    /// Drain pending events and re-render the current view if any of them
    /// touched it.
    async fn refresh_view(&mut self) -> Result<()> {
        let mut stale = false;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    debug!(event = event.name(), "Event received");
                    stale |= self.view.is_stale(&event);
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!(skipped, "Events lagged");
                    stale = true;
                }
                Err(_) => break,
            }
        }
        if !stale || self.view == View::None {
            return Ok(());
        }

        debug!(view = ?self.view, "View refresh");
        let text = self.render_view()?;
        self.say(&text).await
    }

    fn render_view(&mut self) -> Result<String> {
        let mut logged_out = false;
        let text = match &self.view {
            View::None => String::new(),
            View::Catalog(filter) => {
                let fish = catalog::list_fish(&self.state, filter.as_deref())?;
                views::render_catalog(&fish, filter.as_deref())
            }
            View::Detail(id) => match catalog::get_fish(&self.state, id) {
                Ok(fish) => views::render_detail(&fish, favorites::is_favorite(&self.state, id)?),
                Err(e) => views::render_error(&e),
            },
            View::Favorites => {
                if session::current_user(&self.state)?.is_none() {
                    logged_out = true;
                    views::render_error(&CommandError::LoginRequired)
                } else {
                    views::render_favorites(&favorites::list_favorites(&self.state)?)
                }
            }
        };
        if logged_out {
            self.view = View::None;
        }
        Ok(text)
    }

    async fn handle(&mut self, input: Input) -> Result<()> {
        let text = match input {
            Input::Nothing | Input::Quit => return Ok(()),
            Input::Help => views::HELP.to_string(),
            Input::List(filter) => match catalog::list_fish(&self.state, filter.as_deref()) {
                Ok(fish) => {
                    let text = views::render_catalog(&fish, filter.as_deref());
                    self.view = View::Catalog(filter);
                    text
                }
                Err(e) => views::render_error(&e),
            },
            Input::Show(id) => match catalog::get_fish(&self.state, &id) {
                Ok(fish) => {
                    let favorite = favorites::is_favorite(&self.state, &id)?;
                    self.view = View::Detail(id);
                    views::render_detail(&fish, favorite)
                }
                Err(e) => views::render_error(&e),
            },
            Input::Facts(id) => {
                self.say("Asking the AI...").await?;
                match facts::fetch_fun_facts(&self.state, &self.fetcher, &id).await {
                    Ok(facts) => views::render_facts(&facts),
                    Err(e) => views::render_error(&e),
                }
            }
            Input::ToggleFavorite(id) => match favorites::toggle_favorite(&self.state, &id) {
                Ok(true) => format!("Added {id} to favorites."),
                Ok(false) => format!("Removed {id} from favorites."),
                Err(e) => views::render_error(&e),
            },
            Input::Favorites => {
                if session::current_user(&self.state)?.is_none() {
                    views::render_error(&CommandError::LoginRequired)
                } else {
                    self.view = View::Favorites;
                    views::render_favorites(&favorites::list_favorites(&self.state)?)
                }
            }
            Input::Login(email) => match session::login(&self.state, &email) {
                Ok(user) => format!("Welcome, {}!", user.name),
                Err(e) => views::render_error(&e),
            },
            Input::Logout => {
                session::logout(&self.state)?;
                "Logged out.".to_string()
            }
            Input::WhoAmI => match session::current_user(&self.state)? {
                Some(user) => format!("{} <{}>", user.name, user.email),
                None => "Not logged in.".to_string(),
            },
            Input::Add => self.add_form().await?,
            Input::Edit(id) => match edit::begin_edit(&self.state, &id) {
                Ok(draft) => self.edit_form(draft).await?,
                Err(e) => views::render_error(&e),
            },
        };
        self.say(&text).await
    }

    async fn add_form(&mut self) -> Result<String> {
        const ABORTED: &str = "Add cancelled.";

        let Some(name) = self.ask("Name: ").await? else { return Ok(ABORTED.into()) };
        let Some(name_en) = self.ask("English name (optional): ").await? else {
            return Ok(ABORTED.into());
        };
        let Some(scientific_name) = self.ask("Scientific name: ").await? else {
            return Ok(ABORTED.into());
        };
        let Some(description) = self.ask("Description: ").await? else {
            return Ok(ABORTED.into());
        };
        let Some(description_en) = self.ask("English description (optional): ").await? else {
            return Ok(ABORTED.into());
        };
        let Some(habitat) = self.ask("Habitat: ").await? else { return Ok(ABORTED.into()) };
        let Some(paths) = self.ask("Photo/video files (comma separated): ").await? else {
            return Ok(ABORTED.into());
        };

        if [&name, &scientific_name, &description, &habitat]
            .iter()
            .any(|v| v.is_empty())
            || paths.is_empty()
        {
            return Ok("Fill in every field and add at least one photo or video.".into());
        }

        let mut media = Vec::new();
        for path in paths.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match load_media(Path::new(path)).await {
                Ok(file) => media.push(file),
                Err(e) => return Ok(format!("Could not read {path}: {e}")),
            }
        }

        let draft = FishDraft {
            name,
            name_en: Some(name_en).filter(|s| !s.is_empty()),
            scientific_name,
            description,
            description_en: Some(description_en).filter(|s| !s.is_empty()),
            habitat,
            media,
        };
        Ok(match catalog::add_fish(&self.state, draft) {
            Ok(fish) => format!("Added [{}] {}.", fish.id, fish.name),
            Err(e) => views::render_error(&e),
        })
    }

    /// Run the edit prompt. Whatever ends it (save, cancel, end of input or
    /// an I/O failure), files attached but never saved are released.
    async fn edit_form(&mut self, mut draft: EditDraft) -> Result<String> {
        let outcome = self.edit_prompt(&mut draft).await;
        let released = edit::cancel_edit(&self.state, draft);
        match outcome {
            Ok(reply) => {
                released?;
                Ok(reply.unwrap_or_else(|| "Edit cancelled.".into()))
            }
            Err(e) => {
                if let Err(release_err) = released {
                    warn!(error = %release_err, "Could not release draft media");
                }
                Err(e)
            }
        }
    }

    /// `Some(reply)` once saved, `None` when abandoned.
    async fn edit_prompt(&mut self, draft: &mut EditDraft) -> Result<Option<String>> {
        self.say(EDIT_HELP).await?;

        loop {
            let Some(line) = self.ask("edit> ").await? else {
                return Ok(None);
            };
            let (command, rest) = match line.split_once(char::is_whitespace) {
                Some((command, rest)) => (command.to_string(), rest.trim().to_string()),
                None => (line.clone(), String::new()),
            };

            let reply = match command.as_str() {
                "" => continue,
                "name" => {
                    draft.set_name(rest);
                    "ok".to_string()
                }
                "name-en" => {
                    draft.set_name_en(Some(rest));
                    "ok".to_string()
                }
                "sci" => {
                    draft.set_scientific_name(rest);
                    "ok".to_string()
                }
                "desc" => {
                    draft.set_description(rest);
                    "ok".to_string()
                }
                "desc-en" => {
                    draft.set_description_en(Some(rest));
                    "ok".to_string()
                }
                "habitat" => {
                    draft.set_habitat(rest);
                    "ok".to_string()
                }
                "attach" => match load_media(Path::new(&rest)).await {
                    Ok(file) => match edit::attach_media(&self.state, draft, file) {
                        Ok(media) => format!("Attached [{}].", media.id),
                        Err(e) => views::render_error(&e),
                    },
                    Err(e) => format!("Could not read {rest}: {e}"),
                },
                "rm-media" => {
                    if draft.remove_media(&MediaId(rest.clone())) {
                        format!("Removed media {rest}.")
                    } else {
                        format!("No media {rest}.")
                    }
                }
                "comment" => match edit::add_comment(&self.state, draft, &rest) {
                    Ok(comment) => format!("Comment [{}] added.", comment.id),
                    Err(e) => views::render_error(&e),
                },
                "rm-comment" => {
                    if draft.remove_comment(&CommentId(rest.clone())) {
                        format!("Removed comment {rest}.")
                    } else {
                        format!("No comment {rest}.")
                    }
                }
                "show" => views::render_detail(draft.fish(), false),
                "save" => match edit::commit_edit(&self.state, draft) {
                    Ok(fish) => return Ok(Some(format!("Saved [{}] {}.", fish.id, fish.name))),
                    Err(e) => views::render_error(&e),
                },
                "cancel" => return Ok(None),
                _ => EDIT_HELP.to_string(),
            };
            self.say(&reply).await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::ClientConfig;
    use crate::state::AppState;

    async fn run_script(state: &SharedState, script: &str) -> String {
        let fetcher = FunFactFetcher::new(&ClientConfig::default());
        let mut frontend =
            Frontend::new(state.clone(), fetcher, script.as_bytes(), Vec::new()).unwrap();
        frontend.run().await.unwrap();
        String::from_utf8(frontend.into_output()).unwrap()
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for(Path::new("a/b/Clown.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("dive.mov")), "video/quicktime");
        assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_favorites_session() {
        let state = AppState::seeded().into_shared();
        let out = run_script(
            &state,
            "fav 2\nlogin user@example.com\nfav 2\nfavorites\nshow 404\nquit\n",
        )
        .await;

        assert!(out.contains("Login required"));
        assert!(out.contains("Welcome, user!"));
        assert!(out.contains("Added 2 to favorites."));
        assert!(out.contains("[2] ツノダシ (Moorish Idol)"));
        assert!(out.contains("No fish with id 404"));
    }

    #[tokio::test]
    async fn test_add_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lionfish.jpg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0xFF, 0xD8, 0xFF])
            .unwrap();

        let state = AppState::seeded().into_shared();
        let script = format!(
            "add\nハナミノカサゴ\nLionfish\nPterois volitans\nVenomous spines\n\nIndo-Pacific\n{}\nlist lion\n",
            path.display()
        );
        let out = run_script(&state, &script).await;

        assert!(out.contains("Added ["));
        assert!(out.contains("ハナミノカサゴ (Lionfish) - Pterois volitans"));
        let guard = state.lock().unwrap();
        assert_eq!(guard.catalog.len(), 4);
        assert_eq!(guard.catalog.list()[0].name_en.as_deref(), Some("Lionfish"));
        assert_eq!(guard.catalog.media().len(), 1);
    }

    #[tokio::test]
    async fn test_add_form_missing_file() {
        let state = AppState::seeded().into_shared();
        let out = run_script(
            &state,
            "add\nName\n\nSci\nDesc\n\nHabitat\n/definitely/not/here.png\n",
        )
        .await;
        assert!(out.contains("Could not read /definitely/not/here.png"));
        assert_eq!(state.lock().unwrap().catalog.len(), 3);
    }

    #[tokio::test]
    async fn test_edit_form() {
        let state = AppState::seeded().into_shared();
        let out = run_script(
            &state,
            "login diver@reef.io\nedit 3\nhabitat Home aquarium\ncomment Saw one today\nrm-media m3-2\nsave\nshow 3\n",
        )
        .await;

        assert!(out.contains("Saved [3]"));
        assert!(out.contains("Habitat: Home aquarium"));
        assert!(out.contains("diver: Saw one today"));
        assert!(out.contains("Media (1):"));
    }

    #[tokio::test]
    async fn test_edit_requires_login() {
        let state = AppState::seeded().into_shared();
        let out = run_script(&state, "edit 1\n").await;
        assert!(out.contains("Login required"));
    }

    #[tokio::test]
    async fn test_facts_without_key() {
        let state = AppState::seeded().into_shared();
        let out = run_script(&state, "facts 1\n").await;
        assert!(out.contains("no API key configured"));
    }

    #[tokio::test]
    async fn test_detail_refreshes_after_favorite_toggle() {
        let state = AppState::seeded().into_shared();
        let out = run_script(&state, "login user@example.com
show 2
fav 2
list
fav 2
").await;

        assert_eq!(out.matches("Habitat: インド太平洋のサンゴ礁。").count(), 2);
        assert!(out.contains("ツノダシ (Moorish Idol) ★"));
        // The catalog view does not care about favorites.
        assert_eq!(out.matches("Catalog (3):").count(), 1);
    }

    #[tokio::test]
    async fn test_favorites_view_refreshes_on_logout() {
        let state = AppState::seeded().into_shared();
        let out = run_script(&state, "login user@example.com
fav 1
favorites
logout
").await;

        assert!(out.contains("Favorites (1):"));
        assert!(out.ends_with("Login required. Use `login <email>` first.\n> "));
    }

    #[tokio::test]
    async fn test_edit_io_failure_releases_attached_media() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reef.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let state = AppState::seeded().into_shared();
        let mut script =
            format!("login diver@reef.io\nedit 3\nattach {}\n", path.display()).into_bytes();
        script.extend_from_slice(b"\xff\xfe\n");

        let fetcher = FunFactFetcher::new(&ClientConfig::default());
        let mut frontend =
            Frontend::new(state.clone(), fetcher, script.as_slice(), Vec::new()).unwrap();

        assert!(frontend.run().await.is_err());
        let out = String::from_utf8(frontend.into_output()).unwrap();
        assert!(out.contains("Attached ["));
        assert_eq!(state.lock().unwrap().catalog.media().len(), 0);
        assert_eq!(state.lock().unwrap().catalog.get(&FishId::from("3")).unwrap().media.len(), 2);
    }

    #[tokio::test]
    async fn test_save_then_end_of_input_keeps_media() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let state = AppState::seeded().into_shared();
        let script = format!("login diver@reef.io\nedit 3\nattach {}\nsave\n", path.display());
        let out = run_script(&state, &script).await;

        assert!(out.contains("Saved [3]"));
        let guard = state.lock().unwrap();
        assert_eq!(guard.catalog.media().len(), 1);
        assert_eq!(guard.catalog.get(&FishId::from("3")).unwrap().media.len(), 3);
    }
}
