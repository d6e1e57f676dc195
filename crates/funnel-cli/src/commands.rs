use crate::error::Result as CliResult;

use std::str::FromStr;

use clap::{Args, Subcommand};
use funnel_core::{NewWorkItem, Priority, WorkItemPatch};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Load the board and print it grouped by column
    Board,

    /// Move a challenge to another column
    Move {
        /// Challenge ID
        id: String,

        /// Destination column key (e.g. pretriagem)
        column: String,
    },

    /// Create a challenge in the first funnel stage
    Create(CreateArgs),

    /// Update fields of a challenge
    Update(UpdateArgs),

    /// Delete a challenge
    Delete {
        /// Challenge ID
        id: String,
    },

    /// Print the column / stage table
    Stages,

    /// Reload periodically and print the board whenever it changes
    Watch {
        /// Seconds between reloads (default: board.poll_interval_secs, else 5)
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Args)]
pub(crate) struct CreateArgs {
    /// Challenge title
    #[arg(long)]
    pub(crate) title: String,

    /// Challenge description
    #[arg(long)]
    pub(crate) description: Option<String>,

    /// Priority: low, medium, high (default: medium)
    #[arg(long)]
    pub(crate) priority: Option<String>,

    /// Assignee name
    #[arg(long)]
    pub(crate) assignee: Option<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) due_date: Option<String>,
}

impl CreateArgs {
    pub(crate) fn into_new_work_item(self) -> CliResult<NewWorkItem> {
        Ok(NewWorkItem {
            title: self.title,
            description: self.description,
            priority: parse_priority(self.priority.as_deref())?.unwrap_or_default(),
            assignee: self.assignee,
            due_date: self.due_date,
            ..NewWorkItem::default()
        })
    }
}

#[derive(Args)]
pub(crate) struct UpdateArgs {
    /// Challenge ID
    pub(crate) id: String,

    /// New title
    #[arg(long)]
    pub(crate) title: Option<String>,

    /// New description
    #[arg(long)]
    pub(crate) description: Option<String>,

    /// New priority: low, medium, high
    #[arg(long)]
    pub(crate) priority: Option<String>,

    /// New status
    #[arg(long)]
    pub(crate) status: Option<String>,

    /// New assignee
    #[arg(long)]
    pub(crate) assignee: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) due_date: Option<String>,
}

impl UpdateArgs {
    pub(crate) fn into_patch(self) -> CliResult<(String, WorkItemPatch)> {
        let patch = WorkItemPatch {
            title: self.title,
            description: self.description,
            priority: parse_priority(self.priority.as_deref())?,
            status: self.status,
            assignee: self.assignee,
            due_date: self.due_date,
        };
        Ok((self.id, patch))
    }
}

fn parse_priority(value: Option<&str>) -> CliResult<Option<Priority>> {
    Ok(value.map(Priority::from_str).transpose()?)
}
