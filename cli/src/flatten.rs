use crate::commands::{CliError, FlattenCmd};
use curvedraw::raster::{compose, estimate_composite_points, CompositeOptions};

use std::io::Write;

pub fn flatten(mut cmd: FlattenCmd) -> Result<(), CliError> {
    let options = CompositeOptions::DEFAULT
        .with_filled(cmd.fill)
        .with_clip_rect(cmd.clip_rect)
        .with_optimize_clip(cmd.clip_rect.is_some());

    let composition = compose(&cmd.paths, &cmd.transform, &options)?;

    if cmd.count {
        writeln!(
            &mut *cmd.output,
            "points: {} (upper bound {})",
            composition.len(),
            estimate_composite_points(&cmd.paths, cmd.fill),
        )?;
        writeln!(&mut *cmd.output, "paths: {}", composition.subpath_ranges().len())?;

        return Ok(());
    }

    for polyline in composition.subpaths() {
        let mut separator = "";
        for p in polyline {
            write!(&mut *cmd.output, "{}{} {}", separator, p.x, p.y)?;
            separator = ", ";
        }
        writeln!(&mut *cmd.output)?;
    }

    if cmd.fill && composition.subpath_ranges().len() > 1 {
        // The points linking the subpaths belong to the polygon but to none of them.
        writeln!(&mut *cmd.output, "polygon: {} points", composition.len())?;
    }

    Ok(())
}
