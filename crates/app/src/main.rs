use std::{io, path::PathBuf, thread, time::Duration};

use algo_visualiser_core::{
    generate, Algorithm, AppConfig, DiagramRenderer, Recorder, RenderGraph, Session,
    TextRenderer, Value, Visualisation, VisualiserError,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() -> algo_visualiser_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Play(args) => run_play(config, args),
        Commands::Export {
            algorithm,
            output,
            values,
            target,
        } => run_export(&config, algorithm.into(), values, target, &output),
        Commands::List => {
            run_list(&config);
            Ok(())
        }
    }
}

fn run_play(mut config: AppConfig, args: PlayArgs) -> algo_visualiser_core::Result<()> {
    let visualisation = Visualisation::from(args.visualisation);
    if let Some(values) = args.values {
        *config.seeds.for_kind_mut(visualisation) = values;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.playback.interval_ms = interval_ms;
    }
    tracing::info!(%visualisation, autoplay = args.autoplay, "starting playback");

    let mut session = Session::new(visualisation, &config);
    let mut graph = RenderGraph::new(TextRenderer::new(io::stdout()));
    graph.present(session.frame()?)?;

    match visualisation {
        Visualisation::LinearSearch | Visualisation::BinarySearch => {
            let target = args.target.ok_or_else(|| {
                VisualiserError::msg(format!("{visualisation} needs --target"))
            })?;
            session.search(&target)?;
        }
        Visualisation::BubbleSort | Visualisation::InsertionSort | Visualisation::SelectionSort => {
            session.start_run()?;
        }
        Visualisation::Array | Visualisation::LinkedList => return Ok(()),
    }
    graph.present(session.frame()?)?;

    let poll = (config.playback.interval() / 4).max(Duration::from_millis(5));
    play_through(&mut session, &mut graph, args.autoplay, poll)?;

    tracing::info!(frames = graph.frames_drawn(), "playback finished");
    Ok(())
}

/// Steps the loaded run to its end, presenting every cursor position once.
fn play_through<R: DiagramRenderer>(
    session: &mut Session,
    graph: &mut RenderGraph<R>,
    autoplay: bool,
    poll: Duration,
) -> algo_visualiser_core::Result<()> {
    if !autoplay {
        while session.next()?.is_applied() {
            graph.present(session.frame()?)?;
        }
        return Ok(());
    }

    let mut drawn = session.cursor()?;
    session.toggle_autoplay()?;
    // Autoplay switches itself off on the tick that completes the run.
    while session.is_autoplaying()? {
        thread::sleep(poll);
        drawn = present_until_cursor(session, graph, drawn)?;
    }
    present_until_cursor(session, graph, drawn)?;
    Ok(())
}

/// Presents every position after `drawn` up to the cursor, which may have
/// moved several steps since the last poll.
fn present_until_cursor<R: DiagramRenderer>(
    session: &Session,
    graph: &mut RenderGraph<R>,
    drawn: isize,
) -> algo_visualiser_core::Result<isize> {
    let cursor = session.cursor()?;
    for position in drawn + 1..=cursor {
        if let Some(frame) = session.frame_at(position)? {
            graph.present(frame)?;
        }
    }
    Ok(cursor.max(drawn))
}

fn run_export(
    config: &AppConfig,
    algorithm: Algorithm,
    values: Option<Vec<Value>>,
    target: Option<Value>,
    output: &PathBuf,
) -> algo_visualiser_core::Result<()> {
    let visualisation = match algorithm {
        Algorithm::LinearSearch => Visualisation::LinearSearch,
        Algorithm::BinarySearch => Visualisation::BinarySearch,
        Algorithm::BubbleSort => Visualisation::BubbleSort,
        Algorithm::InsertionSort => Visualisation::InsertionSort,
        Algorithm::SelectionSort => Visualisation::SelectionSort,
    };
    let values = values.unwrap_or_else(|| config.seeds.for_kind(visualisation).to_vec());

    if algorithm.is_search() && target.is_none() {
        return Err(VisualiserError::msg(format!("{algorithm} needs --target")));
    }
    let run = generate(algorithm, &values, target);

    tracing::info!(?output, %algorithm, steps = run.len(), "exporting transcript");
    Recorder::new().pretty(true).write_json(&run, output)
}

fn run_list(config: &AppConfig) {
    for visualisation in Visualisation::ALL {
        println!(
            "{:<16} {:?}",
            visualisation.name(),
            config.seeds.for_kind(visualisation)
        );
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Step-by-step algorithm visualiser", long_about = None)]
struct Cli {
    /// JSON config file with playback pacing and seed collections.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Step through a visualisation, printing every frame.
    Play(PlayArgs),
    /// Generate the full step sequence of an algorithm and save it as JSON.
    Export {
        algorithm: AlgorithmArg,
        /// Path of the transcript to write.
        #[arg(short, long)]
        output: PathBuf,
        /// Comma separated input values; defaults to the seed collection.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Option<Vec<Value>>,
        /// Value to look for (searches only).
        #[arg(short, long, allow_hyphen_values = true)]
        target: Option<Value>,
    },
    /// Show every visualisation with its seed collection.
    List,
}

#[derive(Args, Debug)]
struct PlayArgs {
    visualisation: VisualisationArg,
    /// Comma separated starting values; defaults to the seed collection.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    values: Option<Vec<Value>>,
    /// Value to look for (searches only).
    #[arg(short, long, allow_hyphen_values = true)]
    target: Option<String>,
    /// Advance on a timer instead of stepping straight through.
    #[arg(short, long)]
    autoplay: bool,
    /// Autoplay interval in milliseconds.
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VisualisationArg {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    InsertionSort,
    SelectionSort,
    Array,
    LinkedList,
}

impl From<VisualisationArg> for Visualisation {
    fn from(value: VisualisationArg) -> Self {
        match value {
            VisualisationArg::LinearSearch => Self::LinearSearch,
            VisualisationArg::BinarySearch => Self::BinarySearch,
            VisualisationArg::BubbleSort => Self::BubbleSort,
            VisualisationArg::InsertionSort => Self::InsertionSort,
            VisualisationArg::SelectionSort => Self::SelectionSort,
            VisualisationArg::Array => Self::Array,
            VisualisationArg::LinkedList => Self::LinkedList,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AlgorithmArg {
    LinearSearch,
    BinarySearch,
    BubbleSort,
    InsertionSort,
    SelectionSort,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::LinearSearch => Self::LinearSearch,
            AlgorithmArg::BinarySearch => Self::BinarySearch,
            AlgorithmArg::BubbleSort => Self::BubbleSort,
            AlgorithmArg::InsertionSort => Self::InsertionSort,
            AlgorithmArg::SelectionSort => Self::SelectionSort,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algo_visualiser_core::{DiagramFrame, Phase};
    use clap::CommandFactory;

    #[derive(Debug, Default)]
    struct FrameLog(Vec<DiagramFrame>);

    impl DiagramRenderer for FrameLog {
        fn draw(&mut self, frame: &DiagramFrame) -> algo_visualiser_core::Result<()> {
            self.0.push(frame.clone());
            Ok(())
        }
    }

    fn fast_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.playback.interval_ms = 1;
        config
    }

    fn played_frames(session: &mut Session, autoplay: bool) -> Vec<DiagramFrame> {
        let mut graph = RenderGraph::new(FrameLog::default());
        graph.present(session.frame().unwrap()).unwrap();
        play_through(session, &mut graph, autoplay, Duration::from_millis(5)).unwrap();
        graph.renderer().0.clone()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_play_with_values_and_target() {
        let cli = Cli::parse_from([
            "algo-visualiser",
            "play",
            "binary-search",
            "--values",
            "-3,1,4",
            "--target",
            "4",
            "--autoplay",
        ]);
        let Commands::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.values, Some(vec![-3, 1, 4]));
        assert_eq!(args.target.as_deref(), Some("4"));
        assert!(args.autoplay);
    }

    #[test]
    fn autoplay_draws_the_same_frames_as_stepping() {
        let mut manual = Session::new(Visualisation::BubbleSort, &fast_config());
        manual.start_run().unwrap();
        let stepped = played_frames(&mut manual, false);

        let mut timed = Session::new(Visualisation::BubbleSort, &fast_config());
        timed.start_run().unwrap();
        let autoplayed = played_frames(&mut timed, true);

        let steps = timed.run().unwrap().map_or(0, |run| run.len());
        assert_eq!(stepped.len(), steps + 1);
        assert_eq!(autoplayed, stepped);
        assert_eq!(timed.phase().unwrap(), Phase::Complete);
    }

    #[test]
    fn autoplay_of_an_already_complete_run_returns() {
        let mut config = fast_config();
        config.seeds.sort = vec![7];
        let mut session = Session::new(Visualisation::InsertionSort, &config);
        session.start_run().unwrap();
        assert_eq!(session.phase().unwrap(), Phase::Complete);

        let frames = played_frames(&mut session, true);
        assert_eq!(frames.len(), 1);
        assert!(!session.is_autoplaying().unwrap());
    }
}
