//! Parsing of typed console commands

use anyhow::{Context as _, Result, bail};
use statbot_core::UserId;
use statbot_session::Action;

/// One line of console input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Activate a control, optionally as someone other than the owner
    Act { actor: Option<UserId>, action: Action },
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  next | prev | first | last | stop
  select <category>      switch help category
  confirm | cancel       answer a confirmation prompt
  pick <value>           choose an option or a picker action
  as <user-id> <command> act as another user
  help | quit";

/// Parse a console line
pub fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        bail!("empty command");
    };

    if head == "as" {
        let user = words.next().context("`as` needs a user id")?;
        let user: u64 = user
            .parse()
            .with_context(|| format!("'{user}' is not a user id"))?;
        let rest: Vec<&str> = words.collect();
        return match parse(&rest.join(" "))? {
            Command::Act { action, .. } => Ok(Command::Act {
                actor: Some(UserId(user)),
                action,
            }),
            _ => bail!("`as` only applies to session controls"),
        };
    }

    let argument = words.collect::<Vec<_>>().join(" ");
    let action = match (head, argument.is_empty()) {
        ("help" | "?", true) => return Ok(Command::Help),
        ("quit" | "exit" | "q", true) => return Ok(Command::Quit),
        ("next" | "n", true) => Action::Next,
        ("prev" | "previous" | "p", true) => Action::Previous,
        ("first", true) => Action::First,
        ("last", true) => Action::Last,
        ("stop", true) => Action::Stop,
        ("confirm" | "yes", true) => Action::Confirm,
        ("cancel" | "no", true) => Action::Cancel,
        ("select", false) => Action::Select(argument),
        ("pick", false) => Action::Choose(argument),
        ("select" | "pick", true) => bail!("`{head}` needs a value"),
        _ => bail!("unknown command '{}'", line.trim()),
    };
    Ok(Command::Act {
        actor: None,
        action,
    })
}
