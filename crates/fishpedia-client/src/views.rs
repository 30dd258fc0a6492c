//! Text views and the input grammar of the terminal front-end.
//!
//! Views are pure functions from state snapshots to text; they carry no
//! business rules.

use thiserror::Error;

use fishpedia_shared::constants::APP_NAME;
use fishpedia_shared::{Fish, FishId, MediaKind, User};

use crate::commands::facts::FunFacts;
use crate::error::CommandError;

pub const HELP: &str = "\
Commands:
  list [term]      catalog, optionally filtered by name
  show <id>        details of one fish
  facts <id>       ask the AI for fun facts
  add              add a new fish
  edit <id>        edit a fish (login required)
  fav <id>         toggle favorite (login required)
  favorites        list favorites (login required)
  login <email>    log in
  logout           log out
  whoami           show the current user
  help             this text
  quit             exit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Nothing,
    List(Option<String>),
    Show(FishId),
    Facts(FishId),
    Add,
    Edit(FishId),
    ToggleFavorite(FishId),
    Favorites,
    Login(String),
    Logout,
    WhoAmI,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
}

impl Input {
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let arg = |name: &'static str| {
            if rest.is_empty() {
                Err(InputError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };

        Ok(match command {
            "" => Self::Nothing,
            "list" | "ls" => Self::List(Some(rest.to_string()).filter(|s| !s.is_empty())),
            "show" => Self::Show(FishId(arg("id")?)),
            "facts" => Self::Facts(FishId(arg("id")?)),
            "add" => Self::Add,
            "edit" => Self::Edit(FishId(arg("id")?)),
            "fav" => Self::ToggleFavorite(FishId(arg("id")?)),
            "favorites" | "favs" => Self::Favorites,
            "login" => Self::Login(arg("email")?),
            "logout" => Self::Logout,
            "whoami" => Self::WhoAmI,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(InputError::Unknown(other.to_string())),
        })
    }
}

fn display_name(fish: &Fish) -> String {
    match &fish.name_en {
        Some(en) => format!("{} ({en})", fish.name),
        None => fish.name.clone(),
    }
}

fn summary_line(fish: &Fish) -> String {
    format!(
        "  [{}] {} - {}",
        fish.id,
        display_name(fish),
        fish.scientific_name
    )
}

pub fn render_banner(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("{APP_NAME} - logged in as {}", user.name),
        None => format!("{APP_NAME} - type `help` for commands"),
    }
}

pub fn render_catalog(fish: &[Fish], filter: Option<&str>) -> String {
    let mut lines = vec![match filter {
        Some(term) => format!("Catalog matching \"{term}\" ({}):", fish.len()),
        None => format!("Catalog ({}):", fish.len()),
    }];
    if fish.is_empty() {
        lines.push("  (no fish found)".to_string());
    }
    lines.extend(fish.iter().map(summary_line));
    lines.join("\n")
}

pub fn render_detail(fish: &Fish, favorite: bool) -> String {
    let star = if favorite { " ★" } else { "" };
    let mut lines = vec![
        format!("{}{star}", display_name(fish)),
        format!("Scientific name: {}", fish.scientific_name),
        format!("Habitat: {}", fish.habitat),
        String::new(),
        fish.description.clone(),
    ];
    if let Some(en) = &fish.description_en {
        lines.push(String::new());
        lines.push(en.clone());
    }

    lines.push(String::new());
    lines.push(format!("Media ({}):", fish.media.len()));
    for m in &fish.media {
        let kind = match m.kind {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        };
        lines.push(format!("  [{}] {kind} {}", m.id, m.url()));
    }

    lines.push(format!("Comments ({}):", fish.comments.len()));
    for c in &fish.comments {
        lines.push(format!("  [{}] {}: {}", c.id, c.author_name, c.text));
    }
    lines.join("\n")
}

pub fn render_not_found(id: &FishId) -> String {
    format!("No fish with id {id}. Type `list` to go back to the catalog.")
}

pub fn render_favorites(fish: &[Fish]) -> String {
    if fish.is_empty() {
        return "No favorites yet. Use `fav <id>` to add one.".to_string();
    }
    let mut lines = vec![format!("Favorites ({}):", fish.len())];
    lines.extend(fish.iter().map(summary_line));
    lines.join("\n")
}

pub fn render_facts(facts: &FunFacts) -> String {
    let mut lines = vec!["Fun facts:".to_string()];
    lines.extend(facts.items.iter().map(|fact| format!("  • {fact}")));
    lines.join("\n")
}

pub fn render_error(error: &CommandError) -> String {
    match error {
        CommandError::LoginRequired => "Login required. Use `login <email>` first.".to_string(),
        CommandError::NotFound(id) => render_not_found(id),
        other => format!("Error: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use fishpedia_store::seed::seed_fish;

    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("   "), Ok(Input::Nothing));
        assert_eq!(Input::parse("list"), Ok(Input::List(None)));
        assert_eq!(
            Input::parse("list  blue tang "),
            Ok(Input::List(Some("blue tang".into())))
        );
        assert_eq!(Input::parse("show 2"), Ok(Input::Show(FishId::from("2"))));
        assert_eq!(
            Input::parse("login user@example.com"),
            Ok(Input::Login("user@example.com".into()))
        );
        assert_eq!(Input::parse("quit"), Ok(Input::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Input::parse("show"), Err(InputError::MissingArgument("id")));
        assert_eq!(
            Input::parse("swim fast"),
            Err(InputError::Unknown("swim".into()))
        );
    }

    #[test]
    fn test_render_detail() {
        let fish = &seed_fish()[0];
        let text = render_detail(fish, true);
        assert!(text.starts_with("カクレクマノミ (Clownfish) ★"));
        assert!(text.contains("Amphiprioninae"));
        assert!(text.contains("https://picsum.photos/seed/clownfish/800/600"));
        assert!(text.contains("AquaFan: ファインディング・ニモで有名ですよね！"));
    }

    #[test]
    fn test_render_catalog_empty() {
        let text = render_catalog(&[], Some("shark"));
        assert!(text.contains("(no fish found)"));
    }

    #[test]
    fn test_render_facts() {
        let facts = FunFacts {
            fish_id: FishId::from("1"),
            text: "• A\n• B".into(),
            items: vec!["A".into(), "B".into()],
        };
        assert_eq!(render_facts(&facts), "Fun facts:\n  • A\n  • B");
    }

    #[test]
    fn test_render_login_required() {
        assert!(render_error(&CommandError::LoginRequired).contains("login <email>"));
    }
}
