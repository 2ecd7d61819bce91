use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use generator::datasets::{builtin_survey, BUILTIN_SURVEYS};
use generator::profile::build_synthetic_survey;
use log::info;
use report::{render_contour_map, render_rl_table, render_summary, MapStyle};
use std::fs;
use std::path::{Path, PathBuf};
use workflow::config::SurveyConfig;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Dataset {
    AdminMining,
    TacheoSite,
    Synthetic,
}

#[derive(Parser)]
#[command(author, version, about = "Reduce a grid levelling survey and draw its contour map")]
struct Args {
    /// Load the survey from a YAML field book
    #[arg(long, conflicts_with = "dataset")]
    survey: Option<PathBuf>,
    /// Built-in survey to reduce when no field book is given
    #[arg(long, value_enum, default_value_t = Dataset::AdminMining)]
    dataset: Dataset,
    /// Station rows of the synthetic survey (at least 4)
    #[arg(long, default_value_t = 11)]
    rows: usize,
    /// Station columns of the synthetic survey (at least 4)
    #[arg(long, default_value_t = 11)]
    cols: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Fine-mesh samples per axis
    #[arg(long)]
    resolution: Option<usize>,
    /// Contour interval in metres
    #[arg(long)]
    step: Option<f64>,
    /// Number of filled colour levels
    #[arg(long)]
    fill_levels: Option<usize>,
    /// Write the contour map to this SVG file
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Fill colour bands under the isolines
    #[arg(long, default_value_t = false)]
    filled: bool,
    /// Write the reduced surface as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn load_survey(args: &Args) -> anyhow::Result<SurveyConfig> {
    if let Some(path) = &args.survey {
        return SurveyConfig::load(path);
    }
    let survey = match args.dataset {
        Dataset::AdminMining => builtin_survey(BUILTIN_SURVEYS[0]),
        Dataset::TacheoSite => builtin_survey(BUILTIN_SURVEYS[1]),
        Dataset::Synthetic => Some(build_synthetic_survey(args.rows, args.cols, args.seed)?),
    };
    match survey {
        Some(survey) => Ok(survey),
        None => bail!("no built-in survey for {:?}", args.dataset),
    }
}

fn write_output(path: &Path, contents: &str, what: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("writing {} to {}", what, path.display()))?;
    info!("{} saved to {}", what, path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let survey = load_survey(&args)?.with_overrides(args.resolution, args.step, args.fill_levels);
    let runner = Runner::new(survey);
    let model = runner.execute()?;
    let survey = runner.config();

    print!("{}", render_summary(&survey.name, &model));

    if let Some(path) = &args.svg {
        let style = if args.filled {
            MapStyle::coloured(survey.grid_spacing)
        } else {
            MapStyle::plain(survey.grid_spacing)
        };
        let svg = render_contour_map(&survey.name, &model, &style);
        write_output(path, &svg, "contour map")?;
        println!("Map saved as SVG: {}", path.display());
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&model).context("serializing surface model")?;
        write_output(path, &json, "surface model")?;
    }

    println!("\n--- Reduced Levels (RLs) Grid ---");
    print!("{}", render_rl_table(&model));

    Ok(())
}
