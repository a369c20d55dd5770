//! Command surface: turns one invocation from the dispatch layer into
//! registry and lookup calls, and returns the reply text to deliver.

pub mod reply;

use crate::lookup::{Lookup, LookupOutcome};
use crate::registry::Registry;
use crate::store::HuntStore;
use crate::types::{AddOutcome, CompletionResult, UserId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ShowList,
    Add,
    Remove,
    Complete,
    Count,
    Clear,
    RandomAdd,
    ShowAll,
    ClearUser,
    Help,
}

impl Command {
    /// Help order.
    pub const ALL: [Command; 10] = [
        Command::ShowList,
        Command::Add,
        Command::Remove,
        Command::Complete,
        Command::Count,
        Command::Clear,
        Command::RandomAdd,
        Command::ShowAll,
        Command::ClearUser,
        Command::Help,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::ShowList => "shinylist",
            Command::Add => "addshiny",
            Command::Remove => "removeshiny",
            Command::Complete => "completeshiny",
            Command::Count => "totalshiny",
            Command::Clear => "cleanshiny",
            Command::RandomAdd => "randomshiny",
            Command::ShowAll => "allshiny",
            Command::ClearUser => "cleanuser",
            Command::Help => "shinyhelp",
        }
    }

    /// Case-insensitive lookup by command name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Command::ClearUser)
    }

    pub fn usage(self) -> String {
        let args = match self {
            Command::ShowList => " [@member]",
            Command::Add | Command::Remove | Command::Complete => " <hunt name>",
            Command::ClearUser => " <@member>",
            _ => "",
        };
        format!("{}{args}", self.name())
    }

    fn icon(self) -> &'static str {
        match self {
            Command::ShowList => "✨",
            Command::Add => "➕",
            Command::Remove => "➖",
            Command::Complete => "🌟",
            Command::Count => "🔢",
            Command::Clear => "🧹",
            Command::RandomAdd => "🎲",
            Command::ShowAll => "👥",
            Command::ClearUser => "🛡️",
            Command::Help => "ℹ️",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Command::ShowList => {
                "Shows the Shiny Hunts list of the specified member. If no member is specified, shows your own list."
            }
            Command::Add => "Adds a shiny hunt to your list. The Pokémon type is automatically detected.",
            Command::Remove => "Removes a shiny hunt from your list.",
            Command::Complete => "Marks a shiny hunt in your list as completed.",
            Command::Count => "Shows the total number of shiny hunts in your list.",
            Command::Clear => "Clears all shiny hunts from your list.",
            Command::RandomAdd => "Adds a random Pokémon to your list.",
            Command::ShowAll => "Shows the Shiny Hunts of every user the bot knows about.",
            Command::ClearUser => "Administrators only: clears the list of the mentioned member.",
            Command::Help => "Shows this help message with all available commands and their usage.",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: UserId,
    pub display_name: String,
}

impl Member {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// One command delivered by the dispatch layer.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub author: Member,
    /// Command name as typed, without the prefix.
    pub command: String,
    /// Raw argument text after the command name, trimmed.
    pub args: String,
    /// Member resolved from a mention in `args`, if any.
    pub target: Option<Member>,
}

/// Resolves user ids to display names for the cross-user view.
pub trait Directory {
    fn display_name(&self, user: &UserId) -> Option<String>;
}

/// Split `"!addshiny Mr. Mime"` into `("addshiny", "Mr. Mime")`.
/// Returns `None` when `text` does not start with `prefix`.
pub fn split_message<'a>(prefix: &str, text: &'a str) -> Option<(&'a str, &'a str)> {
    let rest = text.trim_start().strip_prefix(prefix)?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    match rest.split_once(char::is_whitespace) {
        Some((name, args)) => Some((name, args.trim())),
        None => Some((rest, "")),
    }
}

/// Uniform pick from the non-blank names in `pool`.
pub fn pick_random<'a, R: Rng + ?Sized>(pool: &'a [String], rng: &mut R) -> Option<&'a str> {
    let candidates: Vec<&str> = pool
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    candidates.choose(rng).copied()
}

// ---------------------------------------------------------------------------
// HuntBot
// ---------------------------------------------------------------------------

/// Owns the registry and lookup client; handles one invocation at a time.
pub struct HuntBot<S: HuntStore, L: Lookup> {
    registry: Registry<S>,
    lookup: L,
    prefix: String,
    random_pool: Vec<String>,
}

impl<S: HuntStore, L: Lookup> HuntBot<S, L> {
    pub fn new(
        registry: Registry<S>,
        lookup: L,
        prefix: impl Into<String>,
        random_pool: Vec<String>,
    ) -> Self {
        Self {
            registry,
            lookup,
            prefix: prefix.into(),
            random_pool,
        }
    }

    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    /// Run one invocation to completion and return the reply to send.
    ///
    /// Administrator checks happen in the dispatch layer before this is
    /// called.
    pub async fn handle(&mut self, inv: &Invocation, directory: &impl Directory) -> String {
        let Some(command) = Command::parse(&inv.command) else {
            return reply::decorate(&reply::unknown_command(&self.prefix, &inv.command));
        };
        tracing::debug!(%command, user = %inv.author.id, "handling command");

        let text = match command {
            Command::Help => return reply::help(&self.prefix),
            Command::ShowList => self.show_list(inv),
            Command::ShowAll => reply::all_hunts(self.registry.all(), directory),
            Command::Add => match required_arg(inv) {
                Some(name) => self.add(&inv.author.id, name).await,
                None => reply::usage(&self.prefix, command),
            },
            Command::RandomAdd => {
                let pick = pick_random(&self.random_pool, &mut rand::thread_rng())
                    .map(str::to_string);
                match pick {
                    Some(name) => self.add(&inv.author.id, &name).await,
                    None => reply::empty_pool(),
                }
            }
            Command::Remove => match required_arg(inv) {
                Some(name) => {
                    if self.registry.remove(&inv.author.id, name) {
                        reply::removed(name)
                    } else {
                        reply::not_in_list(name)
                    }
                }
                None => reply::usage(&self.prefix, command),
            },
            Command::Complete => match required_arg(inv) {
                Some(name) => match self.registry.complete(&inv.author.id, name) {
                    CompletionResult::Marked => reply::marked_complete(name),
                    CompletionResult::AlreadyComplete => reply::already_complete(name),
                    CompletionResult::NotFound => reply::not_in_list(name),
                },
                None => reply::usage(&self.prefix, command),
            },
            Command::Count => reply::total(self.registry.count(&inv.author.id)),
            Command::Clear => reply::cleared(self.registry.clear(&inv.author.id)),
            Command::ClearUser => match &inv.target {
                Some(target) => {
                    let had_list = self.registry.clear_other(&target.id);
                    if had_list {
                        tracing::info!(admin = %inv.author.id, target = %target.id, "cleared another user's hunts");
                    }
                    reply::cleared_other(&target.display_name, had_list)
                }
                None if inv.args.is_empty() => reply::usage(&self.prefix, command),
                None => reply::unknown_member(&inv.args),
            },
        };
        reply::decorate(&text)
    }

    fn show_list(&mut self, inv: &Invocation) -> String {
        let owner = match (&inv.target, inv.args.is_empty()) {
            (Some(target), _) => target,
            (None, true) => &inv.author,
            (None, false) => return reply::unknown_member(&inv.args),
        };
        reply::hunt_list(&owner.display_name, self.registry.list(&owner.id))
    }

    /// Lookup first; the registry is only touched when the lookup succeeds.
    async fn add(&mut self, user: &UserId, name: &str) -> String {
        match self.lookup.lookup(name).await {
            LookupOutcome::Found(categories) => {
                match self.registry.add(user, name, &categories) {
                    AddOutcome::Added => reply::added(name, &categories),
                    AddOutcome::Merged => {
                        let merged = self
                            .registry
                            .all()
                            .get(user)
                            .and_then(|list| list.iter().find(|e| e.name == name))
                            .map(|e| e.categories.clone())
                            .unwrap_or(categories);
                        reply::merged(name, &merged)
                    }
                }
            }
            LookupOutcome::NotFound => reply::lookup_failed(name),
        }
    }
}

fn required_arg(inv: &Invocation) -> Option<&str> {
    let arg = inv.args.trim();
    (!arg.is_empty()).then_some(arg)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
