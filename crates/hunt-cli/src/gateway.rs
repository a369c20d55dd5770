//! Line-oriented dispatch layer used by `shinybot serve`.
//!
//! Each stdin line is one chat message: `<user id>|<display name>|<message>`.
//! Messages that do not start with the command prefix are ignored.

use anyhow::{anyhow, Context};
use hunt_core::command::{reply, split_message, Command, Directory, HuntBot, Invocation, Member};
use hunt_core::lookup::Lookup;
use hunt_core::store::HuntStore;
use hunt_core::types::UserId;
use std::collections::HashMap;

pub struct ConsoleGateway {
    prefix: String,
    admins: Vec<UserId>,
    names: HashMap<UserId, String>,
}

impl ConsoleGateway {
    pub fn new(prefix: impl Into<String>, admins: &[String]) -> Self {
        Self {
            prefix: prefix.into(),
            admins: admins
                .iter()
                .filter_map(|a| UserId::parse(a).ok())
                .collect(),
            names: HashMap::new(),
        }
    }

    /// Handle one line. `Ok(None)` when the line is not a command.
    pub async fn dispatch<S: HuntStore, L: Lookup>(
        &mut self,
        bot: &mut HuntBot<S, L>,
        line: &str,
    ) -> anyhow::Result<Option<String>> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let (author, message) = parse_line(line)?;
        self.names
            .insert(author.id.clone(), author.display_name.clone());

        let Some((name, args)) = split_message(&self.prefix, message) else {
            return Ok(None);
        };

        if let Some(command) = Command::parse(name) {
            if command.requires_admin() && !self.admins.contains(&author.id) {
                tracing::info!(%command, user = %author.id, "rejected admin command");
                return Ok(Some(reply::decorate(&reply::not_allowed(
                    &self.prefix,
                    command,
                ))));
            }
        }

        let inv = Invocation {
            target: self.resolve_target(args),
            author,
            command: name.to_string(),
            args: args.to_string(),
        };
        Ok(Some(bot.handle(&inv, &*self).await))
    }

    /// First mention in `args`, named from the members seen so far.
    fn resolve_target(&self, args: &str) -> Option<Member> {
        let id = args
            .split_whitespace()
            .find_map(|token| UserId::parse(token).ok().filter(|_| token.starts_with("<@")))?;
        let display = self
            .display_name(&id)
            .unwrap_or_else(|| id.mention());
        Some(Member::new(id, display))
    }
}

impl Directory for ConsoleGateway {
    fn display_name(&self, user: &UserId) -> Option<String> {
        self.names.get(user).cloned()
    }
}

fn parse_line(line: &str) -> anyhow::Result<(Member, &str)> {
    let mut parts = line.splitn(3, '|');
    let (Some(id), Some(name), Some(message)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(anyhow!("expected '<user id>|<display name>|<message>', got '{line}'"));
    };
    let id = UserId::parse(id).with_context(|| format!("bad author in line '{line}'"))?;
    let name = name.trim();
    let display = if name.is_empty() {
        id.mention()
    } else {
        name.to_string()
    };
    Ok((Member::new(id, display), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::lookup::LookupOutcome;
    use hunt_core::registry::Registry;
    use hunt_core::store::JsonFileStore;
    use tempfile::TempDir;

    struct StaticLookup;

    impl Lookup for StaticLookup {
        async fn lookup(&self, name: &str) -> LookupOutcome {
            match name.to_lowercase().as_str() {
                "pikachu" => LookupOutcome::Found(vec!["electric".into()]),
                "charizard" => LookupOutcome::Found(vec!["fire".into(), "flying".into()]),
                _ => LookupOutcome::NotFound,
            }
        }
    }

    fn bot(dir: &TempDir) -> HuntBot<JsonFileStore, StaticLookup> {
        let store = JsonFileStore::new(dir.path().join("hunts.json"));
        HuntBot::new(Registry::open(store), StaticLookup, "!", vec!["Charizard".into()])
    }

    #[test]
    fn parse_line_splits_three_fields() {
        let (author, message) = parse_line("42|Ash Ketchum|!addshiny Mr. Mime|x").unwrap();
        assert_eq!(author.id.as_str(), "42");
        assert_eq!(author.display_name, "Ash Ketchum");
        assert_eq!(message, "!addshiny Mr. Mime|x");
    }

    #[test]
    fn parse_line_rejects_malformed_input() {
        assert!(parse_line("just text").is_err());
        assert!(parse_line("ash|Ash|!totalshiny").is_err());
    }

    #[tokio::test]
    async fn non_commands_are_ignored() {
        let dir = TempDir::new().unwrap();
        let mut bot = bot(&dir);
        let mut gw = ConsoleGateway::new("!", &[]);
        assert_eq!(gw.dispatch(&mut bot, "1|Ash|hello there").await.unwrap(), None);
        assert_eq!(gw.dispatch(&mut bot, "   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_and_list_through_gateway() {
        let dir = TempDir::new().unwrap();
        let mut bot = bot(&dir);
        let mut gw = ConsoleGateway::new("!", &[]);

        let reply = gw.dispatch(&mut bot, "1|Ash|!addshiny Pikachu").await.unwrap().unwrap();
        assert!(reply.contains("'Pikachu' ⚡ (electric)"), "{reply}");

        let reply = gw
            .dispatch(&mut bot, "2|Misty|!shinylist <@1>")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("Ash's Shiny Hunts list"), "{reply}");
        assert!(dir.path().join("hunts.json").exists());
    }

    #[tokio::test]
    async fn admin_command_rejected_for_regular_users() {
        let dir = TempDir::new().unwrap();
        let mut bot = bot(&dir);
        let mut gw = ConsoleGateway::new("!", &["99".to_string()]);

        gw.dispatch(&mut bot, "1|Ash|!addshiny Pikachu").await.unwrap();
        let reply = gw
            .dispatch(&mut bot, "2|Misty|!cleanuser <@1>")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("Only administrators"), "{reply}");
        assert_eq!(bot.registry().count(&UserId::parse("1").unwrap()), 1);

        let reply = gw
            .dispatch(&mut bot, "99|Oak|!cleanuser <@1>")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("All Shiny Hunts of Ash have been removed"), "{reply}");
        assert_eq!(bot.registry().count(&UserId::parse("1").unwrap()), 0);
    }

    #[tokio::test]
    async fn all_view_uses_seen_names() {
        let dir = TempDir::new().unwrap();
        let mut bot = bot(&dir);
        let mut gw = ConsoleGateway::new("!", &[]);

        gw.dispatch(&mut bot, "1|Ash|!randomshiny").await.unwrap();
        let reply = gw
            .dispatch(&mut bot, "2|Misty|!allshiny")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("**Ash**: Charizard"), "{reply}");
    }

    #[tokio::test]
    async fn unseen_mention_falls_back_to_mention_text() {
        let dir = TempDir::new().unwrap();
        let mut bot = bot(&dir);
        let mut gw = ConsoleGateway::new("!", &[]);
        let reply = gw
            .dispatch(&mut bot, "1|Ash|!shinylist <@!77>")
            .await
            .unwrap()
            .unwrap();
        assert!(reply.contains("<@77> has no Shiny Hunts"), "{reply}");
    }
}
