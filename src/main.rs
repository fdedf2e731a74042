use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jarvis::context::{http_client, recognizer_from_config, speaker_from_config};
use jarvis::render::render;
use jarvis::services::MyMemoryTranslator;
use jarvis::voice::{AudioCapture, Capture, Microphone, SpeechCapture, calculate_energy};
use jarvis::{Assistant, Config, Language};

/// Jarvis - Voice-activated desktop assistant
#[derive(Parser)]
#[command(name = "jarvis", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Listen for commands without waiting for a wake phrase
    #[arg(long)]
    no_wake: bool,

    /// Response language (e.g. "en", "hi", "spanish")
    #[arg(short, long)]
    language: Option<Language>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Speak a line through the configured voice
    Say {
        /// Text to speak
        text: String,
    },
    /// Capture one command and print the transcript
    Listen,
}

/// How the main loop ended
enum Outcome {
    Finished(jarvis::Result<()>),
    Interrupted,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,jarvis=info",
        1 => "info,jarvis=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if cli.no_wake {
        config.wake.enabled = false;
    }
    if let Some(language) = cli.language {
        config.language = language;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(duration).await,
            Command::Say { text } => say(&config, &text).await,
            Command::Listen => listen(&config).await,
        };
    }

    tracing::info!(
        name = %config.name,
        language = %config.language,
        wake = config.wake.enabled,
        stt = ?config.voice.stt_provider,
        tts = ?config.voice.tts_backend,
        "starting assistant"
    );
    tracing::debug!(?config, "loaded configuration");

    let mut assistant = Assistant::from_config(&config)?;

    if config.wake.enabled {
        tracing::info!(phrases = ?config.wake.phrases, "ready - say a wake phrase");
    } else {
        tracing::info!("ready (wake phrase disabled)");
    }

    let outcome = tokio::select! {
        result = async {
            assistant.greet().await;
            assistant.run().await
        } => Outcome::Finished(result),
        _ = tokio::signal::ctrl_c() => Outcome::Interrupted,
    };

    match outcome {
        Outcome::Finished(Ok(())) => Ok(()),
        Outcome::Interrupted => {
            tracing::info!("interrupted");
            assistant.shutdown().await;
            Ok(())
        }
        Outcome::Finished(Err(e)) => {
            tracing::error!(error = %e, "assistant stopped");
            assistant.fatal().await;
            Err(e.into())
        }
    }
}

/// Speak one line in the configured language
#[allow(clippy::future_not_send)]
async fn say(config: &Config, text: &str) -> anyhow::Result<()> {
    let client = http_client(config)?;
    let translator = MyMemoryTranslator::new(client.clone(), config.services.translate_url.clone());
    let mut speaker = speaker_from_config(config, client)?;

    let rendered = render(&translator, text, config.language).await;
    println!("Jarvis: {rendered}");
    speaker.say(&rendered, config.language).await?;

    Ok(())
}

/// Capture a single command and print what was recognized
#[allow(clippy::future_not_send)]
async fn listen(config: &Config) -> anyhow::Result<()> {
    let client = http_client(config)?;
    let mut speech = SpeechCapture::new(
        Box::new(Microphone::new(config.listen.settings)),
        recognizer_from_config(config, client)?,
    );

    println!("Listening...");
    match speech
        .capture(config.listen.command_window, config.language)
        .await?
    {
        Capture::Transcript(text) => println!("You said: {text}"),
        Capture::Nothing => println!("(nothing recognized)"),
        Capture::ServiceFailure(reason) => println!("Recognition service failed: {reason}"),
    }

    Ok(())
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let capture = AudioCapture::open()?;

    let sample_rate = capture.sample_rate();
    println!("Sample rate: {sample_rate} Hz");
    println!("---");

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.peek_buffer();
        let energy = calculate_energy(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        // Visual meter
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "█".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!(
            "[{:2}s] RMS: {:.4} | Peak: {:.4} | [{}]",
            i + 1,
            energy,
            peak,
            meter
        );

        capture.clear_buffer();
    }

    drop(capture);

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");
    println!("If RMS stayed near 0, check:");
    println!("  1. Is your mic plugged in?");
    println!("  2. Run: pactl info | grep 'Default Source'");
    println!("  3. Run: arecord -l (to list devices)");

    Ok(())
}
