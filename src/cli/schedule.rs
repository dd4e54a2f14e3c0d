use anyhow::Result;
use clap::{Args, Subcommand};
use log::info;
use qiocli::{auth, schedule, CalendarClient, QueueClient};

#[derive(Debug, Args, Clone)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    operation: ScheduleOperation,
}

#[derive(Debug, Subcommand, Clone)]
enum ScheduleOperation {
    /// Build next week's office hours schedule from a Google Calendar and
    /// upload it
    Put {
        /// Queue id on the office hours service
        queue: String,

        /// Google Calendar ID to read office hours events from
        #[arg(short = 'g', long = "google-calendar")]
        calendar: String,
    },
    /// Print the schedule currently on a queue
    Get {
        /// Queue id on the office hours service
        queue: String,
    },
}

pub(crate) fn handle(args: ScheduleArgs) -> Result<()> {
    let session = auth::resolve("session", auth::SESSION_FILENAME)?;
    match args.operation {
        ScheduleOperation::Put { queue, calendar } => {
            let key = auth::resolve("calendar key", auth::GCAL_KEY_FILENAME)?;
            let gcal = CalendarClient::new(key)?;
            let events = gcal.events(&calendar)?;
            info!("Fetched {} calendar events", events.items.len());

            let week = schedule::form_schedule(&events.items)?;
            let client = QueueClient::new(session)?;
            client.put_schedule(&queue, &week)?;
            info!("Uploaded schedule to queue {}", queue);
        }
        ScheduleOperation::Get { queue } => {
            let client = QueueClient::new(session)?;
            let current = client.get_schedule(&queue)?;
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
    }

    Ok(())
}
