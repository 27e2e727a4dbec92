use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use motion_kinematics::eval::{self, MILESTONE_FRAMES, MILESTONE_MS};
use motion_kinematics::{io, CoordinateSpaceReverter, FkSolver, JointPositions, Skeleton};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

/// Forward kinematics and evaluation for exponential-map pose sequences.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stitch ground truth and prediction, then write 96-value joint position frames
    Positions(PositionsArgs),
    /// Euler-angle error of a prediction against its ground truth
    Error(ErrorArgs),
}

#[derive(Args, Debug)]
struct PositionsArgs {
    /// Ground-truth pose file, one 99-value frame per line
    #[arg(short, long)]
    ground_truth: PathBuf,

    /// Predicted pose file continuing the ground truth
    #[arg(short, long)]
    prediction: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exchange y and z in the written positions
    #[arg(long, default_value_t = false)]
    swap_yz: bool,
}

#[derive(Args, Debug)]
struct ErrorArgs {
    /// Ground-truth pose file; repeat to average over several sequences
    #[arg(short, long, required = true)]
    ground_truth: Vec<PathBuf>,

    /// Predicted pose file, one per ground-truth file and in the same order
    #[arg(short, long, required = true)]
    prediction: Vec<PathBuf>,

    /// Label printed in front of the error row
    #[arg(long, default_value = "sequence")]
    label: String,
}

fn positions(args: &PositionsArgs) -> Result<()> {
    let skeleton = Skeleton::h36m();
    let ground_truth = io::read_pose_file(&args.ground_truth)
        .with_context(|| format!("reading {}", args.ground_truth.display()))?;
    let prediction = match &args.prediction {
        Some(path) => io::read_pose_file(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => Vec::new(),
    };
    log::info!(
        "{} ground-truth frames, {} predicted frames",
        ground_truth.len(),
        prediction.len()
    );

    let reverted = CoordinateSpaceReverter::revert_concatenated(&ground_truth, &prediction);
    let mut frames = FkSolver::solve_sequence(&skeleton, &reverted.frames);
    if args.swap_yz {
        frames = frames.iter().map(JointPositions::swap_yz).collect();
    }

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            io::write_positions(file, &frames)?;
            log::info!("wrote {} frames to {}", frames.len(), path.display());
        }
        None => io::write_positions(std::io::stdout().lock(), &frames)?,
    }
    Ok(())
}

fn error(args: &ErrorArgs) -> Result<()> {
    if args.ground_truth.len() != args.prediction.len() {
        anyhow::bail!(
            "{} ground-truth files but {} prediction files",
            args.ground_truth.len(),
            args.prediction.len()
        );
    }

    let curves = args
        .ground_truth
        .iter()
        .zip(&args.prediction)
        .map(|(gt_path, pred_path)| -> Result<Vec<f64>> {
            let ground_truth = eval::to_euler_sequence(&io::read_pose_file(gt_path)?);
            let prediction = eval::to_euler_sequence(&io::read_pose_file(pred_path)?);
            eval::euler_error(&ground_truth, &prediction)
                .with_context(|| format!("comparing {}", pred_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let errors = eval::mean_errors(&curves)?;

    print!("{: <16} |", "milliseconds");
    for ms in MILESTONE_MS {
        print!(" {ms:>5} |");
    }
    println!();

    print!("{: <16} |", args.label);
    for frame in MILESTONE_FRAMES {
        match errors.get(frame) {
            Some(e) => print!(" {e:.3} |"),
            None => print!("   n/a |"),
        }
    }
    println!();
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Positions(args) => positions(args),
        Commands::Error(args) => error(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
