//! Console harness for statbot sessions
//!
//! Plays the host platform: sessions render to stdout and every line typed on
//! stdin becomes a component interaction routed through the registry.

mod console;
mod demo;
mod input;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use console::ConsoleTransport;
use input::Command;
use statbot_core::{ChannelId, Interaction, UserId};
use statbot_session::{
    Behavior, Capabilities, Dispatch, InboundEvent, Outcome, Session, SessionBuilder,
    SessionConfig, SessionError, SessionId, SessionRegistry,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const CHANNEL: ChannelId = ChannelId(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Browse a paginated match history
    Paginate,
    /// Help browser with category select
    Help,
    /// Confirm/cancel prompt
    Prompt,
    /// Option select prompt
    Choice,
    /// Profile manager action picker
    Picker,
}

#[derive(Parser, Debug)]
#[command(name = "statbot-cli")]
#[command(about = "Drive statbot sessions from the terminal", long_about = None)]
struct Args {
    /// Kind of session to open
    #[arg(short, long, value_enum, default_value_t = Mode::Paginate)]
    mode: Mode,

    /// Number of history pages in paginate mode
    #[arg(short, long, default_value_t = 7)]
    pages: usize,

    /// User id owning the session
    #[arg(short, long, default_value_t = 1)]
    owner: u64,

    /// Idle timeout in seconds, overriding the configured one
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Pretend the originating interaction is already past its window
    #[arg(long)]
    expired: bool,

    /// Pretend the channel only allows plain text
    #[arg(long)]
    plain_only: bool,

    /// Build pages with the premium colour scheme
    #[arg(long)]
    premium: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = statbot_utils::Config::from_env()?;
    statbot_utils::init_tracing_with(&config.log_filter);

    let args = Args::parse();
    let session_config = SessionConfig::from_env()?;
    info!(
        app = %config.app_name,
        env = %config.environment,
        mode = ?args.mode,
        "Starting statbot-cli"
    );

    let transport = Arc::new(ConsoleTransport::new());
    let registry = Arc::new(SessionRegistry::from_config(&session_config));
    let owner = UserId(args.owner);
    let context = demo::context(args.premium);

    let mut origin = Interaction::new("cli-origin", CHANNEL, owner);
    if args.expired {
        origin = origin.issued_at(chrono::Utc::now() - chrono::Duration::seconds(30));
    }

    let mut builder = SessionBuilder::new(transport, origin)
        .config(session_config)
        .owner(owner);
    if args.plain_only {
        builder = builder.capabilities(Capabilities::PLAIN_ONLY);
    }
    if let Some(secs) = args.timeout {
        builder = builder.idle_timeout(Duration::from_secs(secs));
    }

    match args.mode {
        Mode::Paginate => {
            let session = builder
                .pages(demo::match_history(args.pages, &context))
                .paginator()?;
            drive(session, &registry, owner).await
        }
        Mode::Help => {
            let categories = demo::help_categories(&context)?;
            drive(builder.help_browser(categories, &context)?, &registry, owner).await
        }
        Mode::Prompt => {
            let session = builder.page(demo::prompt_page(&context)).confirm()?;
            drive(session, &registry, owner).await
        }
        Mode::Choice => {
            let session = builder
                .page(statbot_core::Page::text("Pick your region"))
                .choice(demo::region_options())?;
            drive(session, &registry, owner).await
        }
        Mode::Picker => {
            let (page, actions) = demo::profile_manager(&context);
            let session = builder.page(page).action_picker(actions)?;
            drive(session, &registry, owner).await
        }
    }
}

/// Run `session` while feeding it console commands
async fn drive<B>(
    session: Session<B>,
    registry: &Arc<SessionRegistry>,
    owner: UserId,
) -> Result<()>
where
    B: Behavior + 'static,
{
    let id = session.id();
    let headline = session.current_page().headline().to_string();
    println!("{}", input::HELP);

    let mut task = tokio::spawn({
        let registry = registry.clone();
        async move { session.run(&registry).await }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut interactions = 0_u64;
    let finished = loop {
        tokio::select! {
            joined = &mut task => break joined?,
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => {
                    interactions += 1;
                    if !feed(registry, id, owner, &line, interactions) {
                        registry.shutdown();
                    }
                }
                Ok(None) | Err(_) => {
                    stdin_open = false;
                    registry.shutdown();
                }
            },
        }
    };

    match finished {
        Ok(Outcome::Resolved(value)) => println!("Resolved: {value:?}"),
        Ok(Outcome::Stopped) => println!("Stopped."),
        Ok(Outcome::TimedOut) => println!("Timed out."),
        Ok(Outcome::Suppressed) => println!("Cannot post in this channel; nothing shown."),
        Ok(Outcome::Dropped) => println!("The first render failed; nothing shown."),
        Ok(Outcome::Disconnected) => println!("Closed."),
        Err(SessionError::CannotRenderRichContent) => {
            println!("Rich content is not allowed here. {headline}");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Dispatch one console line; false once the user asked to quit
fn feed(registry: &SessionRegistry, id: SessionId, owner: UserId, line: &str, n: u64) -> bool {
    match input::parse(line) {
        Ok(Command::Quit) => false,
        Ok(Command::Help) => {
            println!("{}", input::HELP);
            true
        }
        Ok(Command::Act { actor, action }) => {
            let actor = actor.unwrap_or(owner);
            let interaction = Interaction::new(format!("cli-{n}"), CHANNEL, actor);
            match registry.dispatch(InboundEvent::new(id, action, interaction)) {
                Dispatch::Delivered => {}
                Dispatch::Unknown => println!("The session is no longer running."),
                Dispatch::Dropped => warn!("Too many pending commands, input dropped"),
            }
            true
        }
        Err(err) => {
            println!("{err}");
            true
        }
    }
}
