use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, bounded};
use tokio::signal;
use tokio::time::{MissedTickBehavior, interval};
use toaster::Result;
use toaster::config::Config;
use toaster::telemetry::init_tracing;
use toaster::{App, CONTAINER_ID, TimerState, ToastContainer, Toaster, use_toaster};
use tracing::{info, warn};

use super::cli::Cli;
use super::desktop::run_mirror;
use super::input::{Command, read_stdin};

const DEFAULT_CONFIG: &str = "toaster.toml";
const PROGRESS_REDRAW: Duration = Duration::from_millis(250);

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let mut config = match cli.config.as_ref() {
        Some(path) => Config::from_env_and_file(path, true)?,
        None => Config::from_env_and_file(PathBuf::from(DEFAULT_CONFIG), false)?,
    };
    if let Some(duration) = cli.duration {
        config.toaster.toast.duration = duration;
    }
    if let Some(position) = cli.position {
        config.toaster.toast.position = position;
    }
    if cli.no_pause_on_hover {
        config.toaster.toast.pause_on_hover = false;
    }

    let mut app = App::new();
    app.use_plugin(&Toaster::new(config.toaster.clone())?);
    let toaster = use_toaster(&app)?;
    mount_manually(&mut app, &toaster);

    if cli.desktop || config.desktop.enabled {
        tokio::spawn(run_mirror(toaster.subscribe(), config.desktop.clone()));
    }

    let (tx, rx) = bounded(config.queue_bound);
    tokio::spawn(read_stdin(tx));

    for spec in cli.toasts {
        toaster.show(spec.message, spec.kind, None);
    }

    event_loop(&app, &toaster, &rx, cli.stay).await;
    Ok(())
}

/// With `global_mount` off nothing was mounted during install; the CLI still
/// needs a surface, so it mounts one itself.
fn mount_manually(app: &mut App, toaster: &Toaster) {
    let components = app.components().clone();
    let Some(document) = app.document_mut() else {
        return;
    };
    if document.query_selector(CONTAINER_ID).is_none() {
        document.mount(
            CONTAINER_ID,
            Arc::new(ToastContainer::new(toaster.clone(), components)),
        );
    }
}

async fn event_loop(app: &App, toaster: &Toaster, rx: &Receiver<Command>, stay: bool) {
    let mut subscription = toaster.subscribe();
    let mut input_open = true;
    let mut ticker = interval(PROGRESS_REDRAW);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    redraw(app);

    loop {
        if toaster.is_empty() && !stay {
            info!("all toasts dismissed, exiting");
            break;
        }

        tokio::select! {
            biased;
            _ = signal::ctrl_c() => {
                info!("shutdown signal received, stopping");
                break;
            }
            alive = subscription.changed() => {
                if !alive {
                    break;
                }
                subscription.snapshot();
                redraw(app);
            }
            command = rx.recv(), if input_open => {
                match command {
                    Ok(Command::Quit) => break,
                    Ok(command) => apply(app, toaster, &command),
                    Err(_) => input_open = false,
                }
            }
            _ = ticker.tick(), if progress_running(toaster) => redraw(app),
        }
    }
}

fn apply(app: &App, toaster: &Toaster, command: &Command) {
    match command {
        Command::Show(kind, message) => toaster.show(message.clone(), *kind, None),
        Command::Clear => {
            for toast in toaster.toasts() {
                toaster.remove_toast(&toast);
            }
        }
        Command::Quit => {}
        row_command => {
            let Some(row) = row_command.row() else {
                return;
            };
            let Some(toast) = toaster.toasts().get(row - 1).cloned() else {
                warn!(row, "no toast on that row");
                return;
            };
            let Some(event) = row_command.surface_event(toast.transition_key.clone()) else {
                return;
            };
            let handled = app
                .document()
                .is_some_and(|document| document.dispatch(CONTAINER_ID, &event));
            if !handled {
                warn!(row, ?event, "interaction had no effect");
            }
        }
    }
}

/// Whether some visible progress bar is counting down and needs redrawing.
fn progress_running(toaster: &Toaster) -> bool {
    toaster.toasts().iter().any(|toast| {
        !toast.options.hide_progress
            && toast.options.duration.duration().is_some()
            && toast.timer.state() == TimerState::Running
    })
}

fn redraw(app: &App) {
    let Some(document) = app.document() else {
        return;
    };
    let rendered = document.render();
    println!("----");
    if rendered.is_empty() {
        println!("(no toasts)");
    } else {
        print!("{rendered}");
    }
}
