use curvedraw::extra::parser::ParseError;
use curvedraw::math::{point, Box2D, DevicePoint, Transform};
use curvedraw::path::PathSet;
use curvedraw::raster::RasterError;

use std::fmt;
use std::io;

pub struct FlattenCmd {
    pub paths: PathSet,
    pub output: Box<dyn io::Write>,
    pub transform: Transform,
    pub clip_rect: Option<Box2D>,
    pub fill: bool,
    pub count: bool,
}

pub struct HitCmd {
    pub paths: PathSet,
    pub output: Box<dyn io::Write>,
    pub transform: Transform,
    pub at: DevicePoint,
    pub tolerance: f64,
}

pub struct RenderCmd {
    pub paths: PathSet,
    pub output: Box<dyn io::Write>,
    pub transform: Transform,
    pub clip_rect: Option<Box2D>,
    pub width: u32,
    pub height: u32,
    pub fill: bool,
    pub stroke: bool,
    pub dump: bool,
}

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Parse(ParseError),
    Raster(RasterError),
    InvalidArgument { name: &'static str, value: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Io(err) => write!(f, "{}", err),
            CliError::Parse(err) => write!(f, "Invalid path: {}", err),
            CliError::Raster(err) => write!(f, "{}", err),
            CliError::InvalidArgument { name, value } => {
                write!(f, "Invalid value for {}: {:?}", name, value)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<ParseError> for CliError {
    fn from(err: ParseError) -> Self {
        CliError::Parse(err)
    }
}

impl From<RasterError> for CliError {
    fn from(err: RasterError) -> Self {
        CliError::Raster(err)
    }
}

fn parse_numbers(name: &'static str, src: &str, expected: usize) -> Result<Vec<f64>, CliError> {
    let invalid = || CliError::InvalidArgument {
        name,
        value: src.to_string(),
    };

    let numbers = src
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>, CliError>>()?;

    if numbers.len() != expected {
        return Err(invalid());
    }

    Ok(numbers)
}

/// Parses the six coefficients of an affine transform, `"a b c d e f"`.
pub fn parse_transform(src: Option<&str>) -> Result<Transform, CliError> {
    match src {
        Some(src) => {
            let n = parse_numbers("transform", src, 6)?;
            Ok(Transform::new(n[0], n[1], n[2], n[3], n[4], n[5]))
        }
        None => Ok(Transform::identity()),
    }
}

/// Parses a rectangle given by its two corners, `"x0 y0 x1 y1"`.
pub fn parse_clip_rect(src: Option<&str>) -> Result<Option<Box2D>, CliError> {
    match src {
        Some(src) => {
            let n = parse_numbers("clip", src, 4)?;
            Ok(Some(Box2D::from_points(&[point(n[0], n[1]), point(n[2], n[3])])))
        }
        None => Ok(None),
    }
}

pub fn parse_value<T: std::str::FromStr>(
    name: &'static str,
    src: Option<&str>,
    default: T,
) -> Result<T, CliError> {
    match src {
        Some(src) => src.trim().parse().map_err(|_| CliError::InvalidArgument {
            name,
            value: src.to_string(),
        }),
        None => Ok(default),
    }
}

#[test]
fn transform_argument() {
    let transform = parse_transform(Some("2 0 0 2 10, 20")).unwrap();
    assert_eq!(transform, Transform::new(2.0, 0.0, 0.0, 2.0, 10.0, 20.0));
    assert_eq!(parse_transform(None).unwrap(), Transform::identity());
    assert!(parse_transform(Some("1 2 3")).is_err());
    assert!(parse_transform(Some("1 0 0 1 0 x")).is_err());
}

#[test]
fn clip_argument() {
    let clip = parse_clip_rect(Some("0 0 100 50")).unwrap();
    assert_eq!(clip, Some(Box2D::new(point(0.0, 0.0), point(100.0, 50.0))));
    assert_eq!(parse_clip_rect(None).unwrap(), None);

    // The corners can be given in any order.
    let clip = parse_clip_rect(Some("100 0 0 50")).unwrap();
    assert_eq!(clip, Some(Box2D::new(point(0.0, 0.0), point(100.0, 50.0))));
}

#[test]
fn value_argument() {
    assert_eq!(parse_value("width", Some(" 64"), 0u32).unwrap(), 64);
    assert_eq!(parse_value("width", None, 32u32).unwrap(), 32);
    assert!(parse_value("width", Some("-1"), 0u32).is_err());
}
