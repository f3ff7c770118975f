//! adakit CLI binary entry point.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use adakit_cli::{
    cli::{Cli, Commands},
    commands::{self, MintArgs},
    config::{default_config_path, CliConfig},
    context::CliContext,
    error::{CliError, CliResult},
    output::OutputFormat,
    prompt,
};

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on --verbose flag or RUST_LOG env var
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if cli.verbose || has_rust_log {
        let mut filter = EnvFilter::from_default_env();
        if cli.verbose {
            if let Ok(directive) = "adakit=debug".parse() {
                filter = filter.add_directive(directive);
            }
        }
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    if let Err(e) = run(cli) {
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Print a user-friendly error message with error code and recovery hint.
fn print_error(e: &CliError) {
    let code = e.error_code();

    eprintln!(
        "{} [{}]: {}",
        "Error".red().bold(),
        code.to_string().yellow(),
        e
    );

    if let Some(suggestion) = code.suggestion() {
        eprintln!("{}: {}", "Hint".cyan(), suggestion);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Load configuration, then apply command-line overrides
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut config = CliConfig::load(&config_path)?;
    if let Some(dir) = cli.work_dir {
        config.workspace.dir = dir;
    }
    if let Some(secs) = cli.timeout {
        config.cli.timeout_secs = secs;
    }

    let format: OutputFormat = match cli.format {
        Some(arg) => arg.into(),
        None => config.display.format()?,
    };
    let ctx = CliContext::new(config, format);

    let output = match cli.command {
        // Environment commands
        Commands::CheckEnv => commands::check_env(&ctx)?,

        Commands::Init { dir } => commands::init(&ctx, dir, &config_path)?,

        // Node query commands
        Commands::GetTip => commands::get_tip(&ctx)?,

        Commands::CheckSync => commands::check_sync(&ctx)?,

        Commands::GetBalance { address } => commands::get_balance(&ctx, address.as_deref())?,

        Commands::GetTx { hash, index } => commands::get_tx(&ctx, &hash, index)?,

        Commands::GetProtocolParams { out } => {
            commands::get_protocol_params(&ctx, out.as_deref())?
        }

        Commands::CalcMinUtxo { output_size } => commands::calc_min_utxo(&ctx, output_size)?,

        // Wallet commands
        Commands::GenerateWallet { name, force } => {
            let interactive = format == OutputFormat::Human && prompt::is_interactive();
            commands::generate_wallet(&ctx, &name, force, interactive)?
        }

        // Token commands
        Commands::GetPolicyId { script } => commands::get_policy_id(&ctx, &script)?,

        Commands::Mint {
            tx_in,
            change_address,
            script,
            asset_name,
            quantity,
            policy_id,
            out_file,
        } => commands::mint(
            &ctx,
            MintArgs {
                tx_in,
                change_address,
                script,
                asset_name,
                quantity,
                policy_id,
                out_file,
            },
        )?,

        // Conversion commands
        Commands::LovelaceToAda { amount } => commands::lovelace_to_ada(format, &amount)?,

        Commands::AdaToLovelace { amount } => commands::ada_to_lovelace(format, &amount)?,

        Commands::TextToHex { text } => commands::text_to_hex(format, &text)?,

        Commands::HexToText { hex } => commands::hex_to_text(format, &hex)?,

        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}
