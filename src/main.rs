use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, error, info};

use input_simulation::config::{ExecutionConfig, RECOMMENDED_TYPE_INTERVAL};
use input_simulation::executor::Runtime;
use input_simulation::lock::SimulationLock;
use input_simulation::logging;
use input_simulation::model::InputAction;
use input_simulation::parser::{self, ParseContext};
use input_simulation::platform::{
    EnigoDriver, EnigoInjector, NoopClock, NoopDriver, NoopInjector, NoopLocator, SystemClock,
    TemplateLocator,
};

const MOUSE_EXAMPLES: &str = "\
examples:
  move                  mouse \"100,200\" or mouse \"M,100,200\"
  move relative         mouse \"+50,-30\" (50 right, 30 up; use +0 to keep an axis)
  move on image         mouse \"/path/to/image.png\"
  single click          mouse \"L,100,200\" or mouse \"LEFT,100,200\"
  double click          mouse \"LL,100,200\" or mouse \"DOUBLELEFT,100,200\"
  click on image        mouse \"L,/path/to/image.png\"
  click current         mouse \"L\" or mouse \"R\" or mouse \"LL\"
  sleep                 mouse \"S,2.5\" (sleeps 2.5 seconds)
  multiple actions      mouse \"100,200 R S,0.5 L,/path/to/image.png L,+50,-30\"";

const KEYBOARD_EXAMPLES: &str = "\
examples:
  press key             keyboard \"K,Enter\" or keyboard \"KEY,Enter\"
  press hotkey          keyboard \"K,ctrl+shift+c\" (case insensitive)
  press multiple        keyboard \"K,Enter,3\" (presses Enter 3 times, hotkeys too)
  type (string)         keyboard \"T,'Hello World'\" (quotes keep the spaces)
  type (file)           keyboard \"TF,/path/to/file.txt\" (types the file's content)
  sleep                 keyboard \"S,2.5\" (sleeps 2.5 seconds)
  multiple actions      keyboard \"S,1.5 T,'Hello World' K,Enter,2 K,Ctrl+S\"";

const INPUT_EXAMPLES: &str = "\
examples:
  mixed sequence        input \"L,100,200 T,'Hello World' K,Enter +10,+0 R\"
  tokens are classified by their keyword and keep their order";

/// input-simulation CLI
#[derive(Debug, Parser)]
#[command(
    name = input_simulation::PKG_NAME,
    version = input_simulation::PKG_VERSION,
    about = "Simulate input such as clicking, moving the mouse or typing"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate a sequence of mouse movements and clicks, on coordinates
    /// or on images located on the screen
    #[command(after_help = MOUSE_EXAMPLES)]
    Mouse(MouseArgs),

    /// Simulate a sequence of key presses, hotkeys and typing
    #[command(after_help = KEYBOARD_EXAMPLES)]
    Keyboard(KeyboardArgs),

    /// Simulate a mixed sequence of mouse and keyboard actions, in order
    #[command(after_help = INPUT_EXAMPLES)]
    Input(InputArgs),
}

impl Command {
    fn common(&self) -> &CommonOpts {
        match self {
            Self::Mouse(args) => &args.common,
            Self::Keyboard(args) => &args.common,
            Self::Input(args) => &args.common,
        }
    }
}

#[derive(Debug, Args)]
struct MouseArgs {
    /// The sequence of mouse actions (see the examples below)
    actions: String,

    #[command(flatten)]
    mouse: MouseOpts,

    #[command(flatten)]
    common: CommonOpts,
}

#[derive(Debug, Args)]
struct KeyboardArgs {
    /// The sequence of keyboard actions (see the examples below)
    actions: String,

    #[command(flatten)]
    keyboard: KeyboardOpts,

    #[command(flatten)]
    common: CommonOpts,
}

#[derive(Debug, Args)]
struct InputArgs {
    /// The mixed sequence of mouse and keyboard actions
    actions: String,

    #[command(flatten)]
    mouse: MouseOpts,

    #[command(flatten)]
    keyboard: KeyboardOpts,

    #[command(flatten)]
    common: CommonOpts,
}

#[derive(Debug, Args)]
struct CommonOpts {
    /// Seconds to sleep after each action; a literal S,seconds in the
    /// sequence overrides it for that step
    #[arg(long, default_value_t = 0.0)]
    sleep: f64,

    /// Enable debug logging (console and log file)
    #[arg(long)]
    debug: bool,

    /// Log actions instead of simulating input
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Args)]
struct MouseOpts {
    /// Seconds between the two presses of a double click
    #[arg(long, default_value_t = 0.1)]
    doubleclick_interval: f64,

    /// Seconds the cursor takes to reach its target; 0 moves instantly
    #[arg(long, default_value_t = 0.0)]
    duration: f64,

    /// Confidence level (0.0 to 1.0) for image recognition
    #[arg(long, default_value_t = 0.8)]
    confidence: f64,

    /// Use grayscale for image recognition (default)
    #[arg(long, overrides_with = "no_grayscale")]
    grayscale: bool,

    /// Use full color for image recognition
    #[arg(long)]
    no_grayscale: bool,

    /// Base directory for relative image paths
    #[arg(long)]
    images_path: Option<PathBuf>,
}

impl MouseOpts {
    fn apply(&self, config: &mut ExecutionConfig) {
        config.doubleclick_interval = self.doubleclick_interval;
        config.duration = self.duration;
        config.confidence = self.confidence;
        config.grayscale = self.grayscale || !self.no_grayscale;
        config.images_path = self.images_path.clone();
    }
}

#[derive(Debug, Args)]
struct KeyboardOpts {
    /// Seconds between typed characters; below 0.025 the whole text is
    /// sent at once via the clipboard
    #[arg(long, default_value_t = RECOMMENDED_TYPE_INTERVAL)]
    typing_interval: f64,

    /// Seconds between repeated key presses
    #[arg(long, default_value_t = 0.0)]
    press_interval: f64,

    /// Base directory for relative TYPEFILE paths
    #[arg(long)]
    files_path: Option<PathBuf>,
}

impl KeyboardOpts {
    fn apply(&self, config: &mut ExecutionConfig) {
        config.typing_interval = self.typing_interval;
        config.press_interval = self.press_interval;
        config.files_path = self.files_path.clone();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init(cli.command.common().debug);
    info!(
        version = input_simulation::PKG_VERSION,
        "Starting input-simulation"
    );

    match run(cli.command) {
        Ok(()) => {
            info!("Finishing input-simulation");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "input-simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    let (sequence, config, dry_run) = prepare(command)?;
    debug!(actions = sequence.len(), "Sequence parsed and validated");

    // One invocation at a time drives the machine's input: hold the
    // machine-wide lock for the whole run, released on every exit path.
    let _lock = SimulationLock::acquire()?;
    if dry_run {
        let mut runtime = Runtime::new(
            config,
            NoopDriver::default(),
            NoopLocator,
            NoopInjector,
            NoopClock,
        );
        runtime.run(&sequence)?;
    } else {
        let mut runtime = Runtime::new(
            config,
            EnigoDriver::new(),
            TemplateLocator,
            EnigoInjector::new(),
            SystemClock,
        );
        runtime.run(&sequence)?;
    }
    Ok(())
}

/// Validate options and parse the action string, before any lock or
/// side effect.
fn prepare(command: Command) -> anyhow::Result<(Vec<InputAction>, ExecutionConfig, bool)> {
    match command {
        Command::Mouse(args) => {
            let mut config = ExecutionConfig {
                sleep: args.common.sleep,
                ..Default::default()
            };
            args.mouse.apply(&mut config);
            config.validate()?;

            let ctx = ParseContext::from_config(&config);
            let sequence = parser::parse_mouse_actions(&args.actions, &ctx)?
                .into_iter()
                .map(InputAction::from)
                .collect();
            Ok((sequence, config, args.common.dry_run))
        }

        Command::Keyboard(args) => {
            let mut config = ExecutionConfig {
                sleep: args.common.sleep,
                ..Default::default()
            };
            args.keyboard.apply(&mut config);
            config.validate()?;

            let ctx = ParseContext::from_config(&config);
            let sequence = parser::parse_keyboard_actions(&args.actions, &ctx)?
                .into_iter()
                .map(InputAction::from)
                .collect();
            Ok((sequence, config, args.common.dry_run))
        }

        Command::Input(args) => {
            let mut config = ExecutionConfig {
                sleep: args.common.sleep,
                ..Default::default()
            };
            args.mouse.apply(&mut config);
            args.keyboard.apply(&mut config);
            config.validate()?;

            let ctx = ParseContext::from_config(&config);
            let sequence = parser::parse_input_actions(&args.actions, &ctx)?;
            Ok((sequence, config, args.common.dry_run))
        }
    }
}
