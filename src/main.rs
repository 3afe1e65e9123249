use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde_json::json;

use skeleton_rs::config::{load_translator, load_trial};
use skeleton_rs::types::{Region, Sex, Side};
use skeleton_rs::{HelperConfig, InternationalSocietyBiomechanics, Model, SkeletonHelper};

#[derive(Parser, Debug)]
#[command(name = "skeleton_calibrate")]
#[command(about = "Calibrate an ISB skeleton on a static trial and reconstruct dynamic trials", long_about = None)]
struct Args {
    /// Static trial (.json or .json.gz)
    #[arg(long = "static", value_name = "TRIAL")]
    static_trial: PathBuf,

    /// Dynamic trials to reconstruct
    #[arg(long = "trial", value_name = "TRIAL")]
    trials: Vec<PathBuf>,

    /// Helper configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Landmark translation table: canonical name -> marker label (JSON)
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Subject sex
    #[arg(long, value_enum)]
    sex: Option<SexArg>,

    #[arg(long, value_enum)]
    region: Option<RegionArg>,

    #[arg(long, value_enum)]
    side: Option<SideArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RegionArg {
    Upper,
    Lower,
    Full,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Upper => Region::Upper,
            RegionArg::Lower => Region::Lower,
            RegionArg::Full => Region::Full,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    Left,
    Right,
    Both,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => Side::Left,
            SideArg::Right => Side::Right,
            SideArg::Both => Side::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SexArg {
    Female,
    Male,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Female => Sex::Female,
            SexArg::Male => Sex::Male,
        }
    }
}

fn model_summary(model: &Model) -> serde_json::Value {
    let segments: Vec<_> = model
        .segments()
        .iter()
        .map(|segment| {
            let series: Vec<_> = segment
                .pose_series()
                .iter()
                .map(|s| json!({ "name": s.name, "samples": s.len(), "valid": s.valid_count() }))
                .collect();
            let frames: Vec<_> = segment.frames().iter().map(|f| f.name.as_str()).collect();
            json!({ "name": segment.name, "length": segment.length(), "frames": frames, "pose_series": series })
        })
        .collect();
    json!({ "name": model.name(), "segments": segments })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => HelperConfig::load(path)?,
        None => HelperConfig::default(),
    };
    if let Some(region) = args.region {
        config.region = region.into();
    }
    if let Some(side) = args.side {
        config.side = side.into();
    }
    if let Some(sex) = args.sex {
        config.sex = Some(sex.into());
    }
    if config.side == Side::Center {
        anyhow::bail!("The helper side must be left, right or both");
    }

    let mut helper = InternationalSocietyBiomechanics::from_config(&config);
    if let Some(path) = &args.landmarks {
        helper.set_landmarks_translator(load_translator(path, &config.name)?);
    }

    let static_trial = load_trial(&args.static_trial)?;
    helper.calibrate(std::slice::from_ref(&static_trial), None)?;

    let trials = args
        .trials
        .iter()
        .map(|path| load_trial(path))
        .collect::<Result<Vec<_>>>()?;
    let models = helper.reconstruct(&trials)?;

    let lengths: serde_json::Map<_, _> = helper
        .properties()
        .iter()
        .filter(|(key, _)| key.ends_with(".length"))
        .map(|(key, value)| (key.clone(), json!(value)))
        .collect();
    let summary = json!({
        "helper": helper.name(),
        "static_trial": static_trial.name,
        "lengths": lengths,
        "models": models.iter().map(model_summary).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
