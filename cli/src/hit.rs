use crate::commands::{CliError, HitCmd};
use curvedraw::geom::{hit_test_line, to_device};
use curvedraw::path::PathSegment;

use log::debug;
use std::io::Write;

/// Prints the path and segment indices of the segments near the point.
pub fn hit(mut cmd: HitCmd) -> Result<(), CliError> {
    let mut num_hits = 0;
    for (path_idx, path) in cmd.paths.iter().enumerate() {
        let mut from = match path.first_point() {
            Some(p) => p,
            None => continue,
        };

        for (segment_idx, segment) in path.segments().iter().enumerate().skip(1) {
            let is_hit = match *segment {
                PathSegment::Bezier { .. } => segment
                    .to_cubic(from)
                    .map(|curve| {
                        curve
                            .transformed(&cmd.transform)
                            .to_device()
                            .hit_test(cmd.at, cmd.tolerance)
                    })
                    .unwrap_or(false),
                PathSegment::Line { to } => hit_test_line(
                    to_device(cmd.transform.transform_point(from)),
                    to_device(cmd.transform.transform_point(to)),
                    cmd.at,
                    cmd.tolerance,
                ),
            };

            if is_hit {
                writeln!(&mut *cmd.output, "path {} segment {}", path_idx, segment_idx)?;
                num_hits += 1;
            }

            from = segment.to();
        }
    }

    debug!("{} segment(s) hit at {:?}.", num_hits, cmd.at);

    Ok(())
}
