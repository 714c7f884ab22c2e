mod terminal;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::path::{Path, PathBuf};

use vanba::{
    BirthForm, ChartKind, ChartRegistry, ChartSurface, DocumentView, ErrorKind, ReadingController,
    VanbaError, View,
};
use vanba_config::{load_settings, VanbaSettings};

use terminal::{TerminalChart, TerminalView};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ChartArg {
    /// Degrees within the sign per planet.
    Bar,
    /// Strength derived from planetary speed.
    Radar,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Radar => ChartKind::Radar,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vanba", version, about = "Vedic astrology and palm reading client")]
struct Cli {
    /// Config file (default: configs/vanba.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the calculation API base URL.
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    /// Print the rendered document as JSON instead of terminal output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate a birth chart, optionally followed by a palm reading.
    Calculate {
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        /// Time of birth (HH:MM, 24h)
        #[arg(long)]
        tob: String,
        /// Latitude in degrees (blank uses the configured default)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        lat: String,
        /// Longitude in degrees (blank uses the configured default)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        lng: String,
        #[arg(long, value_enum)]
        chart: Option<ChartArg>,
        /// Palm photo to analyze against the calculated chart.
        #[arg(long)]
        palm: Option<PathBuf>,
    },
    /// Palm reading without astrology data.
    Palm {
        #[arg(long)]
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())
        .context("loading vanba configuration")?
        .with_base_url_override(cli.api_base_url.as_deref());
    if let Commands::Calculate {
        chart: Some(chart), ..
    } = &cli.command
    {
        settings.chart.kind = (*chart).into();
    }
    log::info!("calculation API: {}", settings.api.base_url);

    let outcome = if cli.json {
        let mut controller = ReadingController::from_settings(&settings, Box::new(ChartRegistry::new()));
        let mut view = DocumentView::new();
        let outcome = run(&cli.command, &mut controller, &mut view).await;
        print_document(&controller, &view)?;
        outcome
    } else {
        let color = std::env::var_os("NO_COLOR").is_none();
        let mut controller = controller_for_terminal(&settings, color);
        let mut view = TerminalView::new(color);
        run(&cli.command, &mut controller, &mut view).await
    };

    if let Err(err) = outcome {
        std::process::exit(exit_code(&err));
    }
    Ok(())
}

fn controller_for_terminal(settings: &VanbaSettings, color: bool) -> ReadingController {
    let surface: Box<dyn ChartSurface> = Box::new(TerminalChart::new(color));
    ReadingController::from_settings(settings, surface)
}

async fn run(
    command: &Commands,
    controller: &mut ReadingController,
    view: &mut dyn View,
) -> vanba::Result<()> {
    match command {
        Commands::Calculate {
            dob,
            tob,
            lat,
            lng,
            palm,
            ..
        } => {
            let form = BirthForm::new(dob.as_str(), tob.as_str(), lat.as_str(), lng.as_str());
            controller.handle_astrology_calculation(&form, view).await?;
            if let Some(image) = palm {
                read_palm(controller, image, view).await?;
            }
            Ok(())
        }
        Commands::Palm { image } => read_palm(controller, image, view).await,
    }
}

async fn read_palm(
    controller: &mut ReadingController,
    image: &Path,
    view: &mut dyn View,
) -> vanba::Result<()> {
    controller.handle_image_upload(image, view).await?;
    controller.handle_palm_analysis(view).await
}

fn print_document(controller: &ReadingController, view: &DocumentView) -> anyhow::Result<()> {
    let chart = controller
        .renderer()
        .current_chart()
        .map(|(_, spec)| spec.to_chartjs_config());
    let output = json!({
        "document": view.to_json()?,
        "chart": chart,
        "session": serde_json::to_value(controller.session())?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn exit_code(err: &VanbaError) -> i32 {
    match err.kind() {
        ErrorKind::Validation => 2,
        ErrorKind::Network => 3,
        ErrorKind::FileRead => 4,
    }
}
