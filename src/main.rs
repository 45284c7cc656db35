use anyhow::Result;
use clap::{Parser, Subcommand};
use od_client::{load_wav, AuthSession, ClientConfig, Recognition, RecognitionSession};
use tracing::info;

#[derive(Parser)]
#[command(name = "od-client", about = "Oleg Detection client")]
struct Cli {
    /// Path to the client configuration file
    #[arg(long, default_value = "config/od-client")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue a new API token
    NewToken {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// List all tokens belonging to the account
    Tokens {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show recognized seconds for the account
    Usage {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        /// Reporting window: "month" or "all"
        #[arg(long, default_value = "month")]
        period: String,
    },
    /// Show owner and expiry of a token
    TokenInfo {
        #[arg(long)]
        token: String,
    },
    /// Recognize a WAV file
    Recognize {
        file: String,
        #[arg(long)]
        token: String,
        /// Recognition mode: "short" or "long"
        #[arg(long, default_value = "short")]
        mode: String,
        /// Max seconds to load from the start of the clip (-1 = whole clip)
        #[arg(long, default_value_t = -1.0)]
        max_duration: f64,
        /// Channel to extract from multi-channel files
        #[arg(long, default_value_t = 0)]
        channel: u16,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = ClientConfig::load(&cli.config)?;

    match cli.command {
        Command::NewToken { username, password } => {
            let session = AuthSession::sign_in(&config, &username, &password)?;
            let token = session.new_token()?;
            println!("{} (expires {})", token.token, token.expires);
        }
        Command::Tokens { username, password } => {
            let session = AuthSession::sign_in(&config, &username, &password)?;
            for token in session.all_tokens()? {
                println!("{} (expires {})", token.token, token.expires);
            }
        }
        Command::Usage {
            username,
            password,
            period,
        } => {
            let session = AuthSession::sign_in(&config, &username, &password)?;
            let usage = session.usage(&period)?;
            println!("Short mode: {}", usage.short_mode);
            println!("Long mode:  {}", usage.long_mode);
            println!("Overall:    {}", usage.all);
        }
        Command::TokenInfo { token } => {
            let session = RecognitionSession::connect(&config, &token)?;
            let token_info = session.token_info()?;
            println!("Owner:   {}", token_info.owner);
            println!("Expires: {}", token_info.expires);
        }
        Command::Recognize {
            file,
            token,
            mode,
            max_duration,
            channel,
        } => {
            let clip = load_wav(&file, max_duration, channel)?;
            info!("Submitting {:.2}s of audio in {} mode", clip.duration_seconds, mode);

            let session = RecognitionSession::connect(&config, &token)?;
            match session.recognize(&clip, &mode)? {
                None => println!("No speech detected"),
                Some(Recognition::Label(label)) => println!("{}", label),
                Some(Recognition::Segments(segments)) => {
                    for s in segments {
                        println!(
                            "{:.2}-{:.2}s ({:.2}s, confidence {:.2}): {}",
                            s.start, s.end, s.duration, s.confidence, s.label
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
