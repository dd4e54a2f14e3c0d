use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use log::info;
use qiocli::{auth, groups, QueueClient};

#[derive(Debug, Args, Clone)]
pub struct GroupsArgs {
    #[command(subcommand)]
    operation: GroupsOperation,
}

#[derive(Debug, Subcommand, Clone)]
enum GroupsOperation {
    /// Upload a groups roster to a queue
    Put {
        /// Queue id on the office hours service
        queue: String,

        /// File containing the list of groups
        #[arg(short, long)]
        filename: PathBuf,
    },
    /// Print the groups currently on a queue
    Get {
        /// Queue id on the office hours service
        queue: String,
    },
}

pub(crate) fn handle(args: GroupsArgs) -> Result<()> {
    let session = auth::resolve("session", auth::SESSION_FILENAME)?;
    match args.operation {
        GroupsOperation::Put { queue, filename } => {
            let roster = groups::load_groups(&filename)?;
            let client = QueueClient::new(session)?;
            info!("Uploading {} groups to queue {}", roster.len(), queue);
            client.put_groups(&queue, &roster)?;
        }
        GroupsOperation::Get { queue } => {
            let client = QueueClient::new(session)?;
            let current = client.get_groups(&queue)?;
            println!("{}", serde_json::to_string_pretty(&current)?);
        }
    }

    Ok(())
}
