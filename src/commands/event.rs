use super::{parse_date, parse_datetime};
use crate::{
    db::events::Events,
    libs::{event::Event, messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct EventArgs {
    #[command(subcommand)]
    command: EventCommand,
}

#[derive(Debug, Subcommand)]
enum EventCommand {
    /// Add an event
    Add {
        title: String,
        /// When, "YYYY-MM-DD HH:MM"
        #[arg(short, long)]
        at: String,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List events of a day, or upcoming events
    List {
        /// Day (YYYY-MM-DD or 'today')
        #[arg(short, long, conflicts_with = "upcoming")]
        date: Option<String>,
        /// Show the next N events
        #[arg(short, long)]
        upcoming: Option<usize>,
    },
    /// Mark an event as done
    Done {
        id: i64,
        /// Mark it as not done instead
        #[arg(long)]
        undo: bool,
    },
    /// Delete an event
    Delete { id: i64 },
}

pub fn cmd(args: EventArgs) -> Result<()> {
    let mut events = Events::new()?;
    match args.command {
        EventCommand::Add {
            title,
            at,
            location,
            notes,
        } => {
            let mut event = Event::new(&title, parse_datetime(&at)?);
            if let Some(location) = location {
                event = event.with_location(&location);
            }
            if let Some(notes) = notes {
                event = event.with_notes(&notes);
            }
            let id = events.insert(&event)?;
            msg_success!(Message::EventCreated(title, id));
        }
        EventCommand::List { date, upcoming } => {
            let list = match upcoming {
                Some(limit) => events.upcoming(Local::now().naive_local(), limit)?,
                None => events.fetch_for_date(parse_date(date.as_deref().unwrap_or("today"))?)?,
            };
            if list.is_empty() {
                msg_info!(Message::NoEvents);
                return Ok(());
            }
            msg_print!(Message::EventsHeader, true);
            View::events(&list)?;
        }
        EventCommand::Done { id, undo } => {
            events.set_completed(id, !undo)?;
            msg_success!(Message::EventUpdated(id));
        }
        EventCommand::Delete { id } => {
            events.delete(id)?;
            msg_success!(Message::EventDeleted(id));
        }
    }
    Ok(())
}
