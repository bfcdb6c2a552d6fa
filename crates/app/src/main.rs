use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::Topic;
use services::{Clock, ControllerError, QuestionSourceChain, QuizConfig, QuizController};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod terminal;

use terminal::RoundEnd;

const DEFAULT_TOPIC: &str = "9";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTopic { raw: String },
    InvalidTimeout { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTopic { raw } => write!(f, "invalid --topic value: {raw:?}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play   [--topic <id>] [--timeout <secs>] [--seed <n>]");
    eprintln!("  cargo run -p app -- topics");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --topic {DEFAULT_TOPIC}");
    eprintln!("  --timeout 5");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_TRIVIA_URL, QUIZ_HTTP_TIMEOUT_SECS, QUIZ_GENERATION_PASSES");
    eprintln!("  QUIZ_INFERENCE_URL, QUIZ_INFERENCE_TOKEN");
    eprintln!("  QUIZ_AI_API_KEY, QUIZ_AI_BASE_URL, QUIZ_AI_MODEL");
    eprintln!("  RUST_LOG (default: warn)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Topics,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "topics" => Some(Self::Topics),
            _ => None,
        }
    }
}

struct PlayArgs {
    topic: Topic,
    timeout: Option<Duration>,
    seed: Option<u64>,
}

impl PlayArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut topic = Topic::parse(DEFAULT_TOPIC).map_err(|_| ArgsError::InvalidTopic {
            raw: DEFAULT_TOPIC.into(),
        })?;
        let mut timeout = None;
        let mut seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--topic" => {
                    let value = require_value(args, "--topic")?;
                    topic = Topic::parse(&value)
                        .map_err(|_| ArgsError::InvalidTopic { raw: value.clone() })?;
                }
                "--timeout" => {
                    let value = require_value(args, "--timeout")?;
                    let secs: u64 = value
                        .parse()
                        .ok()
                        .filter(|secs| *secs > 0)
                        .ok_or_else(|| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    timeout = Some(Duration::from_secs(secs));
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            topic,
            timeout,
            seed,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => Command::Play,
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(0);
        }
        Some(first) => match Command::from_arg(&first) {
            Some(cmd) => cmd,
            None => {
                eprintln!("unknown subcommand: {first}");
                print_usage();
                return Ok(2);
            }
        },
    };

    match cmd {
        Command::Topics => {
            if let Some(extra) = argv.next() {
                return Err(ArgsError::UnknownArg(extra).into());
            }
            print!("{}", terminal::render_topics());
            Ok(0)
        }
        Command::Play => {
            let parsed = PlayArgs::parse(&mut argv).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;
            play(parsed).await
        }
    }
}

async fn play(args: PlayArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut config = QuizConfig::from_env();
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }

    let mut chain = QuestionSourceChain::from_config(&config)?;
    if let Some(seed) = args.seed {
        chain = chain.with_seed(seed);
    }
    debug!(generators = chain.generator_count(), "question sources ready");

    let mut controller = QuizController::new(Arc::new(chain), Clock::default());
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        println!("Loading questions for {}...", args.topic);
        match controller.start(args.topic.clone()).await {
            Ok(_) => {}
            Err(ControllerError::Acquisition(err)) => {
                error!(%err, topic = %args.topic.id(), "question acquisition failed");
                eprintln!("Could not load questions right now. Please try again in a moment.");
                return Ok(1);
            }
            Err(err) => return Err(err.into()),
        }

        match terminal::play(controller.session_mut(), &mut input, &mut out)? {
            RoundEnd::Quit => {
                controller.reset();
                println!("Quiz abandoned.");
                return Ok(0);
            }
            RoundEnd::Completed => {
                if let Some(summary) = controller.session().summary() {
                    println!("{}", terminal::render_summary(&summary));
                }
            }
        }

        if !ask_again(&mut input, &mut out)? {
            return Ok(0);
        }
    }
}

fn ask_again<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "\nPlay again? [y/N]: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    match run().await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}
