mod commands;
mod flatten;
mod hit;
mod render;

use clap::*;
use commands::*;
use curvedraw::extra::parser::parse_path_set;
use curvedraw::math::point;

use log::error;
use std::fs::File;
use std::io::{self, stdout, Read};
use std::process;

fn transform_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("TRANSFORM")
        .long("transform")
        .help("Sets the path to device transform as six coefficients \"a b c d e f\"")
        .value_name("TRANSFORM")
        .takes_value(true)
}

fn clip_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("CLIP")
        .long("clip")
        .help("Sets the visible area in path space \"x0 y0 x1 y1\"")
        .value_name("CLIP")
        .takes_value(true)
}

fn main() {
    env_logger::init();

    let matches = App::new("curvedraw command-line interface")
        .version("0.1")
        .about("Path rasterization tools")
        .subcommand(
            SubCommand::with_name("flatten")
                .about("Flattens the paths into device space points")
                .arg(
                    Arg::with_name("FILL")
                        .short("f")
                        .long("fill")
                        .help("Closes and links the paths into one polygon"),
                )
                .arg(
                    Arg::with_name("COUNT")
                        .short("c")
                        .long("count")
                        .help("Prints the number of points"),
                )
                .arg(transform_arg())
                .arg(clip_arg()),
        )
        .subcommand(
            SubCommand::with_name("hit")
                .about("Prints the segments near a device space position")
                .arg(
                    Arg::with_name("X")
                        .short("x")
                        .long("x")
                        .value_name("X")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("Y")
                        .short("y")
                        .long("y")
                        .value_name("Y")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("TOLERANCE")
                        .short("t")
                        .long("tolerance")
                        .help("Sets the hit distance in pixels (1 by default)")
                        .value_name("TOLERANCE")
                        .takes_value(true),
                )
                .arg(transform_arg()),
        )
        .subcommand(
            SubCommand::with_name("render")
                .about("Renders the paths into a PBM image")
                .arg(
                    Arg::with_name("WIDTH")
                        .long("width")
                        .value_name("WIDTH")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("HEIGHT")
                        .long("height")
                        .value_name("HEIGHT")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("FILL")
                        .short("f")
                        .long("fill")
                        .help("Fills the paths"),
                )
                .arg(
                    Arg::with_name("STROKE")
                        .short("s")
                        .long("stroke")
                        .help("Strokes the paths"),
                )
                .arg(
                    Arg::with_name("DUMP")
                        .long("dump")
                        .help("Prints the draw calls instead of rendering"),
                )
                .arg(transform_arg())
                .arg(clip_arg()),
        )
        .arg(
            Arg::with_name("PATH")
                .value_name("PATH")
                .help("An SVG path")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> std::result::Result<(), CliError> {
    let mut input_buffer = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        let mut file = File::open(input_file)?;
        file.read_to_string(&mut input_buffer)?;
    }

    let output: Box<dyn io::Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    let paths = parse_path_set(&input_buffer)?;

    if let Some(flatten_matches) = matches.subcommand_matches("flatten") {
        flatten::flatten(FlattenCmd {
            paths,
            output,
            transform: parse_transform(flatten_matches.value_of("TRANSFORM"))?,
            clip_rect: parse_clip_rect(flatten_matches.value_of("CLIP"))?,
            fill: flatten_matches.is_present("FILL"),
            count: flatten_matches.is_present("COUNT"),
        })
    } else if let Some(hit_matches) = matches.subcommand_matches("hit") {
        let x = parse_value("x", hit_matches.value_of("X"), 0)?;
        let y = parse_value("y", hit_matches.value_of("Y"), 0)?;
        hit::hit(HitCmd {
            paths,
            output,
            transform: parse_transform(hit_matches.value_of("TRANSFORM"))?,
            at: point(x, y),
            tolerance: parse_value("tolerance", hit_matches.value_of("TOLERANCE"), 1.0)?,
        })
    } else if let Some(render_matches) = matches.subcommand_matches("render") {
        let fill = render_matches.is_present("FILL");
        let stroke = render_matches.is_present("STROKE");
        render::render(RenderCmd {
            paths,
            output,
            transform: parse_transform(render_matches.value_of("TRANSFORM"))?,
            clip_rect: parse_clip_rect(render_matches.value_of("CLIP"))?,
            width: parse_value("width", render_matches.value_of("WIDTH"), 64)?,
            height: parse_value("height", render_matches.value_of("HEIGHT"), 64)?,
            fill: fill || !stroke,
            stroke,
            dump: render_matches.is_present("DUMP"),
        })
    } else {
        eprintln!("{}", matches.usage());
        Ok(())
    }
}
