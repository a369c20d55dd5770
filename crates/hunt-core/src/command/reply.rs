//! Reply text for every command. All user-facing wording lives here.

use crate::emoji::{category_emoji, emojis_for, UNKNOWN_EMOJI};
use crate::types::{HuntEntry, HuntMap, UserId};

use super::{Command, Directory};

pub const COMPLETED_MARKER: &str = "✅";

pub fn decorate(msg: &str) -> String {
    format!("🎉 ✨ {msg} 🎉")
}

/// `Charizard 🔥🦅 (fire, flying) ✅`
pub fn entry_line(entry: &HuntEntry) -> String {
    let mut line = if entry.categories.is_empty() {
        format!("{} {UNKNOWN_EMOJI}", entry.name)
    } else {
        format!(
            "{} {} ({})",
            entry.name,
            emojis_for(&entry.categories),
            entry.categories.join(", ")
        )
    };
    if entry.completed {
        line.push(' ');
        line.push_str(COMPLETED_MARKER);
    }
    line
}

pub fn hunt_list(owner: &str, entries: &[HuntEntry]) -> String {
    if entries.is_empty() {
        return format!("{owner} has no Shiny Hunts in their list.");
    }
    let lines: Vec<String> = entries.iter().map(entry_line).collect();
    format!("{owner}'s Shiny Hunts list:\n{}", lines.join("\n"))
}

pub fn all_hunts(hunts: &HuntMap, directory: &impl Directory) -> String {
    if hunts.is_empty() {
        return "No users have Shiny Hunts in their lists.".to_string();
    }
    let blocks: Vec<String> = hunts
        .iter()
        .map(|(user, entries)| {
            let names = if entries.is_empty() {
                "none".to_string()
            } else {
                entries
                    .iter()
                    .map(|e| {
                        if e.completed {
                            format!("{} {COMPLETED_MARKER}", e.name)
                        } else {
                            e.name.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            format!("**{}**: {names}", display_name(user, directory))
        })
        .collect();
    format!("Shiny Hunts by user:\n{}", blocks.join("\n"))
}

pub fn display_name(user: &UserId, directory: &impl Directory) -> String {
    directory
        .display_name(user)
        .unwrap_or_else(|| user.mention())
}

fn categories_suffix(categories: &[String]) -> String {
    let lead = categories
        .first()
        .map(|c| category_emoji(c))
        .unwrap_or(UNKNOWN_EMOJI);
    format!("{lead} ({})", categories.join(", "))
}

pub fn added(name: &str, categories: &[String]) -> String {
    format!(
        "✅ You have added the Shiny Hunt '{name}' {} to your list!",
        categories_suffix(categories)
    )
}

pub fn merged(name: &str, categories: &[String]) -> String {
    format!(
        "✅ '{name}' is already in your list, its types are now {}.",
        categories_suffix(categories)
    )
}

pub fn lookup_failed(name: &str) -> String {
    format!("❌ The Pokémon '{name}' could not be found. Please make sure the name is correct.")
}

pub fn removed(name: &str) -> String {
    format!("✅ You have removed the Shiny Hunt '{name}' from your list!")
}

pub fn not_in_list(name: &str) -> String {
    format!("❌ You don't have the Shiny Hunt '{name}' in your list.")
}

pub fn marked_complete(name: &str) -> String {
    format!("🌟 Congratulations! You have completed the Shiny Hunt '{name}'!")
}

pub fn already_complete(name: &str) -> String {
    format!("⚠️ The Shiny Hunt '{name}' is already marked as completed.")
}

pub fn total(count: usize) -> String {
    if count == 0 {
        "❌ You have no Shiny Hunts in your list.".to_string()
    } else {
        format!("🔢 You have a total of {count} Shiny Hunts in your list.")
    }
}

pub fn cleared(removed: usize) -> String {
    if removed == 0 {
        "❌ You have no Shiny Hunts to clean.".to_string()
    } else {
        "🧹 All Shiny Hunts have been removed from your list!".to_string()
    }
}

pub fn cleared_other(target: &str, had_list: bool) -> String {
    if had_list {
        format!("🧹 All Shiny Hunts of {target} have been removed.")
    } else {
        format!("❌ {target} has no Shiny Hunts list.")
    }
}

pub fn empty_pool() -> String {
    "❌ There are no Pokémon configured for random picks.".to_string()
}

pub fn unknown_member(raw: &str) -> String {
    format!("❌ Could not find the member '{raw}'.")
}

pub fn usage(prefix: &str, command: Command) -> String {
    format!("❌ Usage: {prefix}{}", command.usage())
}

pub fn not_allowed(prefix: &str, command: Command) -> String {
    format!("⛔ Only administrators can use {prefix}{}.", command.name())
}

pub fn unknown_command(prefix: &str, name: &str) -> String {
    format!("❓ Unknown command '{name}'. Try {prefix}shinyhelp.")
}

/// Static command reference.
pub fn help(prefix: &str) -> String {
    let mut out = String::new();
    for (i, command) in Command::ALL.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&format!(
            "{} **{prefix}{}**\n{}",
            command.icon(),
            command.usage(),
            command.summary()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Names(HashMap<String, String>);

    impl Directory for Names {
        fn display_name(&self, user: &UserId) -> Option<String> {
            self.0.get(user.as_str()).cloned()
        }
    }

    #[test]
    fn entry_line_formats_categories_and_marker() {
        let mut entry = HuntEntry::new("Charizard", vec!["fire".into(), "flying".into()]);
        assert_eq!(entry_line(&entry), "Charizard 🔥🦅 (fire, flying)");
        entry.completed = true;
        assert_eq!(entry_line(&entry), "Charizard 🔥🦅 (fire, flying) ✅");
    }

    #[test]
    fn entry_line_without_categories() {
        let entry = HuntEntry::new("Unown", vec![]);
        assert_eq!(entry_line(&entry), "Unown ❓");
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(hunt_list("Ash", &[]), "Ash has no Shiny Hunts in their list.");
    }

    #[test]
    fn all_hunts_uses_directory_and_mention_fallback() {
        let mut hunts = HuntMap::new();
        let mut mew = HuntEntry::new("Mew", vec!["psychic".into()]);
        mew.completed = true;
        hunts.insert(UserId::parse("1").unwrap(), vec![mew, HuntEntry::new("Abra", vec![])]);
        hunts.insert(UserId::parse("2").unwrap(), vec![]);
        let names = Names(HashMap::from([("1".to_string(), "Misty".to_string())]));

        let text = all_hunts(&hunts, &names);
        assert_eq!(
            text,
            "Shiny Hunts by user:\n**Misty**: Mew ✅, Abra\n**<@2>**: none"
        );
    }

    #[test]
    fn all_hunts_empty() {
        let names = Names(HashMap::new());
        assert_eq!(
            all_hunts(&HuntMap::new(), &names),
            "No users have Shiny Hunts in their lists."
        );
    }

    #[test]
    fn help_lists_every_command() {
        let text = help("!");
        for command in Command::ALL {
            assert!(text.contains(&format!("!{}", command.name())), "{}", command.name());
        }
    }
}
