use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use stepwise_lib::bootstrap::{
    build_session, init_tracing_subscriber, load_with_defaults, resolve_config_path,
};
use stepwise_lib::shell::{handle_line, render_status, write_current, ShellAction};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("stepwise exited with error: {err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    // A missing .env is fine; only its values matter when present.
    let _ = dotenvy::dotenv();

    let config_path = resolve_config_path(std::env::args().nth(1));
    let config = load_with_defaults(&config_path)?;

    init_tracing_subscriber(&config.log_dir).context("Failed to initialize tracing")?;
    info!(config = %config_path.display(), "starting stepwise");

    let mut session = build_session(&config).await?;

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", render_status(&session.controller))?;
    write_current(&mut session.controller, &mut stdout)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if handle_line(&mut session, &line, &mut stdout).await? == ShellAction::Quit {
            break;
        }
    }

    // dropping the controller closes the draft channel so the writer drains
    drop(session.controller);
    let written = session.writer.await.context("Draft writer task failed")?;
    info!(written, "stepwise stopped");
    Ok(())
}
