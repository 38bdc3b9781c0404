use std::io::Write;
use std::sync::Arc;

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trip_planner::form::TripForm;
use trip_planner::{
    render, PlannerConfig, PlannerError, PlanningServiceClient, RequestCoordinator, TripRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads `.env` too, so RUST_LOG set there reaches the filter below.
    let config = PlannerConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = PlanningServiceClient::new(&config)?;
    info!(endpoint = %client.endpoint(), "planning service configured");
    let coordinator = Arc::new(RequestCoordinator::new(client));

    println!("Smart Travel Planner");
    println!("--------------------------------------------------");
    println!("Type 'help' for commands.");
    println!("--------------------------------------------------");

    // Idle updates only happen when a submission settles.
    let mut updates = coordinator.subscribe();
    tokio::spawn(async move {
        let mut was_busy = false;
        while updates.changed().await.is_ok() {
            let (busy, view) = {
                let state = updates.borrow_and_update();
                (state.is_busy(), render::render_state(&state))
            };
            if !busy {
                println!("\n{}", view.trim_end());
                prompt();
            } else if !was_busy {
                println!("\nPlanning...");
            }
            was_busy = busy;
        }
    });

    let mut lines = io::BufReader::new(io::stdin()).lines();
    prompt();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "help" => {
                println!("Available commands:");
                println!("  plan     - Enter destination, origin and date, then submit");
                println!("  status   - Show the current plan, error and service status");
                println!("  quit     - Exit");
            }
            "quit" | "exit" => break,
            "status" => {
                let view = render::render_state(&coordinator.state());
                if view.is_empty() {
                    println!("Nothing planned yet.");
                } else {
                    println!("{}", view.trim_end());
                }
            }
            "plan" => match read_form(&mut lines).await? {
                Some(request) => {
                    let coordinator = Arc::clone(&coordinator);
                    tokio::spawn(async move {
                        match coordinator.submit(request).await {
                            Err(PlannerError::SubmissionInProgress) => {
                                println!("A trip is already being planned, please wait.");
                                prompt();
                            }
                            Err(err) => debug!(error = %err, "submission finished with error"),
                            Ok(_) => {}
                        }
                    });
                    continue;
                }
                None => break,
            },
            _ => println!("Unknown command. Type 'help'."),
        }

        prompt();
    }

    Ok(())
}

/// Prompts for each form field until it is accepted. `None` on end of input.
async fn read_form<R>(lines: &mut Lines<R>) -> io::Result<Option<TripRequest>>
where
    R: AsyncBufRead + Unpin,
{
    let mut form = TripForm::new();
    while let Some(field) = form.next_field() {
        print!("{}: ", field.prompt());
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        if let Err(msg) = form.fill(field, &line) {
            println!("  {}", msg);
        }
    }
    Ok(form.build())
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
