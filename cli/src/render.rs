use crate::commands::{CliError, RenderCmd};
use curvedraw::extra::canvas::Canvas;
use curvedraw::raster::recording::Recorder;
use curvedraw::raster::target::PolygonRegion;
use curvedraw::raster::{draw_multi_path, FillStyle, MultiPathStyle};

use log::info;
use std::io::Write;

pub fn render(mut cmd: RenderCmd) -> Result<(), CliError> {
    let style = MultiPathStyle::DEFAULT
        .with_fill(if cmd.fill { FillStyle::Solid } else { FillStyle::None })
        .with_line(cmd.stroke);

    if cmd.dump {
        let mut recorder = Recorder::new();
        let mut region = PolygonRegion::new();
        draw_multi_path(
            &mut recorder,
            &mut region,
            &cmd.paths,
            &cmd.transform,
            cmd.clip_rect,
            &style,
        )?;

        for command in recorder.commands() {
            writeln!(&mut *cmd.output, "{:?}", command)?;
        }

        return Ok(());
    }

    let mut canvas = Canvas::new(cmd.width, cmd.height);
    let mut region = canvas.new_region();
    draw_multi_path(
        &mut canvas,
        &mut region,
        &cmd.paths,
        &cmd.transform,
        cmd.clip_rect,
        &style,
    )?;

    info!(
        "{} of {} pixels set.",
        canvas.pixels().count(),
        cmd.width as u64 * cmd.height as u64
    );

    write!(&mut *cmd.output, "{}", canvas.to_pbm())?;

    Ok(())
}
