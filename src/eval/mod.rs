//! Euler-angle evaluation of predicted motion.
//!
//! Predictions are compared with ground truth in Euler angles rather than
//! exponential maps. Global translation and rotation are ignored, and only
//! channels that actually move in the ground truth take part in the error.

use crate::error::{KinematicsError, Result};
use crate::pose::{PoseVector, GROUP_COUNT, POSE_DIM};
use crate::rotation::expmap_to_euler;

/// Channels whose ground-truth standard deviation is at or below this are
/// left out of the error.
pub const ACTIVE_CHANNEL_STD: f64 = 1e-4;

/// Frame indices reported in summaries, and what they mean at 25 fps.
pub const MILESTONE_FRAMES: [usize; 6] = [1, 3, 7, 9, 13, 24];
pub const MILESTONE_MS: [u32; 6] = [80, 160, 320, 400, 560, 1000];

/// Converts every rotation group (channels `3..99`) to Euler angles, keeping
/// the root translation as is.
pub fn to_euler_frame(pose: &PoseVector) -> PoseVector {
    let mut out = pose.clone();
    for k in 1..GROUP_COUNT {
        out.set_group(k, expmap_to_euler(pose.group(k)));
    }
    out
}

pub fn to_euler_sequence(frames: &[PoseVector]) -> Vec<PoseVector> {
    frames.iter().map(to_euler_frame).collect()
}

/// Per-frame Euclidean distance between two Euler sequences.
pub fn euler_error(ground_truth: &[PoseVector], prediction: &[PoseVector]) -> Result<Vec<f64>> {
    if ground_truth.len() != prediction.len() {
        return Err(KinematicsError::dimension(
            "prediction sequence",
            ground_truth.len(),
            prediction.len(),
        ));
    }

    let active = active_channels(ground_truth);
    log::debug!(
        "euler error over {} frames, {} active channels",
        ground_truth.len(),
        active.len()
    );

    Ok(ground_truth
        .iter()
        .zip(prediction)
        .map(|(gt, pred)| {
            let (gt, pred) = (gt.as_slice(), pred.as_slice());
            active
                .iter()
                .map(|&c| (gt[c] - pred[c]).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect())
}

/// Frame-wise mean of several equally long error curves.
pub fn mean_errors(per_sequence: &[Vec<f64>]) -> Result<Vec<f64>> {
    let Some(first) = per_sequence.first() else {
        return Ok(Vec::new());
    };
    let frames = first.len();
    if let Some(bad) = per_sequence.iter().find(|e| e.len() != frames) {
        return Err(KinematicsError::dimension("error curve", frames, bad.len()));
    }

    let count = per_sequence.len() as f64;
    Ok((0..frames)
        .map(|i| per_sequence.iter().map(|e| e[i]).sum::<f64>() / count)
        .collect())
}

/// Non-root channels whose population standard deviation over the ground
/// truth exceeds [`ACTIVE_CHANNEL_STD`].
fn active_channels(ground_truth: &[PoseVector]) -> Vec<usize> {
    if ground_truth.is_empty() {
        return Vec::new();
    }
    let n = ground_truth.len() as f64;

    (6..POSE_DIM)
        .filter(|&c| {
            let mean = ground_truth.iter().map(|f| f.as_slice()[c]).sum::<f64>() / n;
            let var = ground_truth
                .iter()
                .map(|f| (f.as_slice()[c] - mean).powi(2))
                .sum::<f64>()
                / n;
            var.sqrt() > ACTIVE_CHANNEL_STD
        })
        .collect()
}
