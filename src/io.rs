//! Plain-text frame files.
//!
//! One frame per line, values separated by commas and/or whitespace. Blank
//! lines and lines starting with `#` are skipped.

use crate::error::{KinematicsError, Result};
use crate::pose::{JointPositions, PoseVector};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Parses every frame in `reader`, requiring `width` values per line.
pub fn parse_frames<R: BufRead>(reader: R, width: usize) -> Result<Vec<Vec<f64>>> {
    let mut frames = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let values = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .map(|field| {
                field.parse::<f64>().map_err(|e| KinematicsError::Parse {
                    line: number,
                    message: format!("{field:?}: {e}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if values.len() != width {
            return Err(KinematicsError::Parse {
                line: number,
                message: format!("expected {width} values, found {}", values.len()),
            });
        }
        frames.push(values);
    }

    Ok(frames)
}

pub fn read_poses<R: BufRead>(reader: R) -> Result<Vec<PoseVector>> {
    parse_frames(reader, crate::pose::POSE_DIM)?
        .iter()
        .map(|values| PoseVector::from_slice(values))
        .collect()
}

pub fn read_pose_file(path: impl AsRef<Path>) -> Result<Vec<PoseVector>> {
    let path = path.as_ref();
    let frames = read_poses(BufReader::new(File::open(path)?))?;
    log::debug!("read {} frames from {}", frames.len(), path.display());
    Ok(frames)
}

/// Writes one comma-separated line per row. `f64` display output parses
/// back to the identical value.
pub fn write_rows<'a, W, I>(mut writer: W, rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a [f64]>,
{
    for row in rows {
        let mut first = true;
        for value in row {
            if !first {
                writer.write_all(b",")?;
            }
            write!(writer, "{value}")?;
            first = false;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_positions<W: Write>(writer: W, frames: &[JointPositions]) -> Result<()> {
    write_rows(BufWriter::new(writer), frames.iter().map(JointPositions::as_flat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::POSE_DIM;
    use glam::DVec3;
    use std::io::Cursor;

    fn pose_line(fill: f64) -> String {
        vec![fill.to_string(); POSE_DIM].join(", ")
    }

    #[test]
    fn parses_mixed_separators_and_comments() {
        let text = "# header\n1, 2 3\n\n  4\t5,6  \n";
        let frames = parse_frames(Cursor::new(text), 3).unwrap();
        assert_eq!(frames, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn reports_bad_value_line() {
        let text = "1 2 3\n4 x 6\n";
        let err = parse_frames(Cursor::new(text), 3).unwrap_err();
        assert!(matches!(err, KinematicsError::Parse { line: 2, .. }));
    }

    #[test]
    fn reports_wrong_width_line() {
        let text = format!("{}\n# skip\n1 2\n", pose_line(0.0));
        let err = read_poses(Cursor::new(text)).unwrap_err();
        match err {
            KinematicsError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("expected 99"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn reads_pose_vectors() {
        let text = format!("{}\n{}\n", pose_line(0.5), pose_line(-1.25));
        let poses = read_poses(Cursor::new(text)).unwrap();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[1].as_slice()[98], -1.25);
    }

    #[test]
    fn written_rows_parse_back_exactly() {
        let frames = vec![JointPositions::new(vec![
            DVec3::new(0.1, -2.0 / 3.0, 1e-9),
            DVec3::new(123456.789, 0.0, -0.5),
        ])];
        let mut out = Vec::new();
        write_positions(&mut out, &frames).unwrap();

        let parsed = parse_frames(Cursor::new(out), 6).unwrap();
        assert_eq!(parsed[0].as_slice(), frames[0].as_flat());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_pose_file("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, KinematicsError::Io(_)));
    }
}
