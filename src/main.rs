use clap::Parser;
use dotenvy::dotenv;
use genai_prompt_frontend::common::PROMPT_RAW_SCHEMA;
use genai_prompt_frontend::config;
use genai_prompt_frontend::frontend::{self, ExitPolicy, Session};
use genai_prompt_frontend::network::{KafkaAnswerConsumer, SchemaProducer};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(
    name = "genai-prompt-frontend",
    version,
    about = "Publish a prompt to Kafka and print the pipeline's answer"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    /// Stop without publishing when the prompt is `exit`
    #[arg(long)]
    quit_on_exit: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config)?;
    let policy = if cli.quit_on_exit {
        ExitPolicy::Quit
    } else {
        ExitPolicy::PublishAnyway
    };

    let mut producer = SchemaProducer::new(&app_config, PROMPT_RAW_SCHEMA)?;
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    let session = frontend::run(
        &app_config,
        policy,
        &mut stdin,
        &mut stdout,
        &mut producer,
        KafkaAnswerConsumer::subscribe,
    );

    tokio::select! {
        result = session => match result {
            Ok(Session::Answered { prompt, .. }) => {
                log::info!("Session for prompt {} finished", prompt.id);
            }
            Ok(Session::Quit) => {}
            Err(err) => {
                log::error!("Frontend terminated: {err}");
                return Err(err.into());
            }
        },
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted while waiting; no answer collected");
        }
    }

    Ok(())
}
