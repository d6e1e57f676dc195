use crate::commands::Commands;
use crate::error::Result as CliResult;

use std::sync::Arc;
use std::time::Duration;

use funnel_board::{BoardView, FunnelBoardController, spawn_poller};
use funnel_client::ChallengeBackend;
use funnel_core::STAGE_TABLE;
use log::info;
use serde::Serialize;
use serde_json::{Value, json};

const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(5);

/// Run a one-shot command and return what should be printed.
///
/// `Watch` streams its own output; use [`watch`] for it.
pub(crate) async fn execute<B>(
    command: Commands,
    controller: &FunnelBoardController<B>,
) -> CliResult<Value>
where
    B: ChallengeBackend,
{
    let value = match command {
        Commands::Board => {
            controller.load().await?;
            serde_json::to_value(controller.board())?
        }

        Commands::Move { id, column } => {
            controller.load().await?;
            let outcome = controller.move_item(&id, &column).await?;
            info!("Challenge {} -> {} ({:?})", id, column, outcome);
            serde_json::to_value(controller.board().find(&id))?
        }

        Commands::Create(args) => {
            let created = controller.create(args.into_new_work_item()?).await?;
            serde_json::to_value(created)?
        }

        Commands::Update(args) => {
            let (id, patch) = args.into_patch()?;
            controller.load().await?;
            let updated = controller.update(&id, patch).await?;
            serde_json::to_value(updated)?
        }

        Commands::Delete { id } => {
            controller.load().await?;
            controller.delete(&id).await?;
            json!({ "deleted": id })
        }

        Commands::Stages => stages(),

        Commands::Watch { .. } => Value::Null,
    };

    Ok(value)
}

/// The fixed column / stage table
pub(crate) fn stages() -> Value {
    Value::Array(
        STAGE_TABLE
            .iter()
            .map(|(_, column, stage)| json!({ "column": column, "stage": stage }))
            .collect(),
    )
}

/// Pick the watch interval: flag, then config, then the default
pub(crate) fn watch_interval(flag_secs: Option<u64>, configured: Option<Duration>) -> Duration {
    flag_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .or(configured)
        .unwrap_or(DEFAULT_WATCH_INTERVAL)
}

/// Poll until Ctrl-C, printing the view each time the board or error changes.
pub(crate) async fn watch<B>(
    controller: Arc<FunnelBoardController<B>>,
    interval: Duration,
    pretty: bool,
) -> CliResult<()>
where
    B: ChallengeBackend + 'static,
{
    info!("Watching board every {:?} (Ctrl-C to stop)", interval);
    watch_until(controller, interval, pretty, tokio::signal::ctrl_c()).await
}

/// Poll and print changes until `shutdown` resolves.
pub(crate) async fn watch_until<B, S>(
    controller: Arc<FunnelBoardController<B>>,
    interval: Duration,
    pretty: bool,
    shutdown: S,
) -> CliResult<()>
where
    B: ChallengeBackend + 'static,
    S: Future,
{
    let mut rx = controller.subscribe();
    let poller = spawn_poller(controller, interval);
    tokio::pin!(shutdown);

    let mut last: Option<(u64, Option<String>)> = None;
    let result = loop {
        tokio::select! {
            _ = &mut shutdown => break Ok(()),
            changed = rx.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let view: BoardView = rx.borrow_and_update().clone();
                let key = (view.revision, view.error.clone());
                if last.as_ref() == Some(&key) || view.loading {
                    continue;
                }
                last = Some(key);
                if let Err(e) = print_json(&view, pretty) {
                    break Err(e);
                }
            }
        }
    };

    poller.shutdown().await;
    result
}

pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> CliResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
