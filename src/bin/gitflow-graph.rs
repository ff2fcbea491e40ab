use anyhow::Context;
use clap::{CommandFactory, Parser};
use rand::Rng;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use gitflow_graph::{
    Args, Config, Result,
    export::write_graph,
    generate_history,
    logging::{init_logging, parse_early_log_config},
    message::MessageProvider,
    models::{Commands, GenerateArgs, MessagesArgs},
};
use tracing::info;

fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();
    let _log_guard =
        init_logging(&parse_early_log_config(&raw_args)).context("Failed to open log file")?;

    let args = Args::parse();

    if args.create_config {
        let (path, created) = Config::create_sample_config()?;
        if created {
            println!("Sample config created at: {}", path.display());
        } else {
            println!("Config already exists at: {}", path.display());
        }
        return Ok(());
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let config = command.resolve_config()?;
    match &command {
        Commands::Generate(generate) => run_generate(generate, config),
        Commands::Messages(messages) => run_messages(messages, config),
    }
}

fn run_generate(args: &GenerateArgs, config: Config) -> Result<()> {
    let settings = config.into_settings()?;
    let graph = generate_history(&settings)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_graph(&graph, args.format, &mut writer)?;
            writer.flush()?;
            info!(path = %path.display(), format = %args.format, "Wrote history");
            eprintln!(
                "Wrote {} commits to {}",
                graph.commits().len(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_graph(&graph, args.format, &mut stdout)?;
        }
    }
    Ok(())
}

fn run_messages(args: &MessagesArgs, config: Config) -> Result<()> {
    let settings = config.into_settings()?;
    let seed = settings.seed.unwrap_or_else(|| rand::thread_rng().r#gen());
    let mut provider = settings.message_provider(seed)?;

    let mut stdout = io::stdout().lock();
    for _ in 0..args.count {
        writeln!(stdout, "{}", provider.message(None)?)?;
    }
    Ok(())
}
