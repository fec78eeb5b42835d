use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

use cue::config::{self, AppConfig};
use cue::convert;
use cue::error::CueResult;
use cue::gamut::GamutType;
use cue::light::{kelvin_to_mirek, LightControl, UpdateWriter};
use cue::types::{ChromaticityPoint, Rgb, XY};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "cue.yaml")]
    config: Utf8PathBuf,

    /// Gamut profile (A, B, C or full), overrides the configuration file
    #[arg(short, long)]
    gamut: Option<GamutType>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an sRGB color to xy and brightness
    Convert {
        /// Color as #rrggbb or r,g,b
        color: Rgb,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Do not map the result into the gamut
        #[arg(long)]
        unclamped: bool,
    },

    /// Check if an xy coordinate is inside the gamut
    Check {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Print the updates a light would receive, without sending them
    Light {
        #[command(subcommand)]
        action: LightAction,
    },
}

#[derive(Subcommand, Debug)]
enum LightAction {
    On,
    Off,
    Brightness {
        percent: f64,
    },
    Xy {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    Rgb {
        color: Rgb,
    },
    Temperature {
        kelvin: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
    Yaml,
}

fn init_logging() -> CueResult<()> {
    let mut builder = pretty_env_logger::formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        builder.parse_filters("warn");
    }

    Ok(builder.try_init()?)
}

fn print_point(point: &ChromaticityPoint, format: Format) -> CueResult<()> {
    match format {
        Format::Text => println!("{point}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(point)?),
        Format::Yaml => print!("{}", serde_yaml::to_string(point)?),
    }
    Ok(())
}

fn light_action(conf: &AppConfig, action: LightAction) -> CueResult<()> {
    let out = std::io::stdout().lock();
    let mut light = UpdateWriter::new(out, conf.gamut()?, conf.light.mirek_schema());

    log::debug!("Driving light [{}]", conf.light.name);

    match action {
        LightAction::On => light.power_on(),
        LightAction::Off => light.power_off(),
        LightAction::Brightness { percent } => light.set_brightness(percent),
        LightAction::Xy { x, y } => {
            let xy = light.set_color_xy(XY::new(x, y))?;
            log::info!("Color set as {xy}");
            Ok(())
        }
        LightAction::Temperature { kelvin } => {
            light.set_color_temperature(kelvin_to_mirek(kelvin))
        }
        LightAction::Rgb { color } => {
            let point = light.set_color_rgb(color)?;
            log::info!("Color {color} set as {point}");
            Ok(())
        }
    }
}

fn run() -> CueResult<()> {
    init_logging()?;

    let args = Args::parse();

    let conf = config::parse(&args.config)?.with_gamut(args.gamut.map(Into::into));
    log::debug!("Configuration loaded successfully");

    match args.command {
        Command::Convert {
            color,
            format,
            unclamped,
        } => {
            let point = if unclamped {
                convert::rgb_to_chromaticity(color)
            } else {
                convert::rgb_to_xy(color, &conf.gamut()?)
            };
            print_point(&point, format)
        }

        Command::Check { x, y } => {
            let gamut = conf.gamut()?;
            let xy = XY::new(x, y);
            if gamut.contains(xy) {
                println!("{xy} is inside the gamut");
            } else {
                let nearest = gamut.clamp(ChromaticityPoint::new(x, y, 0.0)).xy();
                println!("{xy} is outside the gamut, nearest is {nearest}");
            }
            Ok(())
        }

        Command::Light { action } => light_action(&conf, action),
    }
}

fn main() {
    if let Err(err) = run() {
        log::error!("Cue error: {err}");
        std::process::exit(1);
    }
}
