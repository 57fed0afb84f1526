use clap::Parser;
use code_reviewer::cli::args::{Args, OutputFormat};
use code_reviewer::config::Config;
use code_reviewer::core::ai::OpenAIProviderFactory;
use code_reviewer::infrastructure::{setup_logging, LoggingConfig};
use code_reviewer::shell::render;
use code_reviewer::shell::{ReviewShell, Submission, SubmitOutcome};
use std::io::{self, IsTerminal, Read, Write};
use tracing::debug;

/// 读取待审查的代码：文件或标准输入
fn read_code(args: &Args) -> anyhow::Result<String> {
    if args.reads_stdin() {
        let mut stdin = io::stdin();
        if stdin.is_terminal() {
            eprintln!("Enter your Python code here (Ctrl-D to finish):");
        }
        let mut code = String::new();
        stdin.read_to_string(&mut code)?;
        return Ok(code);
    }

    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| anyhow::anyhow!("failed to read {}: {}", path.display(), err)),
        None => Ok(String::new()),
    }
}

async fn run(args: &Args, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
    let text_output = args.format == OutputFormat::Text;
    if text_output {
        render::render_header(out)?;
    }

    let code = match read_code(args) {
        Ok(code) => code,
        Err(err) => {
            if text_output {
                render::render_shell_error(out, &err)?;
            }
            return Err(err);
        }
    };

    let submission = Submission::new(config.api_key.clone().unwrap_or_default(), code);
    let mut shell = ReviewShell::new(OpenAIProviderFactory, config.provider_config());
    let outcome = shell.submit(&submission, &mut io::stderr()).await?;

    match args.format {
        OutputFormat::Text => render::render_outcome(out, &outcome)?,
        OutputFormat::Json => {
            if let SubmitOutcome::Reviewed(result) = &outcome {
                writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
            }
        }
    }

    if args.copy {
        if let Some(result) = outcome.result() {
            if shell.copy_fixed_code(result) && text_output {
                render::render_copy_confirmation(out)?;
            }
        }
    }

    if text_output {
        render::render_help(out)?;
        render::render_footer(out)?;
    }

    debug!(phase = ?shell.phase(), copied = shell.session().is_copied(), "Session finished");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    config.update_from_args(&args);

    setup_logging(LoggingConfig::for_cli(config.debug, config.log_file.as_deref()))?;
    debug!(?config, "Configuration loaded");

    config.validate()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &config, &mut out).await?;
    out.flush()?;

    Ok(())
}
