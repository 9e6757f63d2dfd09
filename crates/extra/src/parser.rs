//! Reading paths written in the SVG path syntax.
//!
//! Only the commands that map onto line and cubic bézier segments are understood:
//! `M`, `L`, `H`, `V`, `C`, `S` and `Z`, in their absolute (upper case) and relative
//! (lower case) forms. Each move-to starts a new sub-path. `Z` ends the sub-path with
//! [`PathBuilder::end`], so the builder adds the line back to the sub-path's first
//! point when it is missing.
//!
//! ```
//! use curvedraw_extra::parser::parse_path_set;
//!
//! let paths = parse_path_set("M 0 0 h 10 v 10 Z M 2 2 C 4 2 4 4 2 4").unwrap();
//! assert_eq!(paths.len(), 2);
//! assert!(paths[0].is_closed());
//! assert_eq!(paths[0].last_point(), paths[0].first_point());
//! ```

use crate::path::math::{point, Point};
use crate::path::traits::PathBuilder;
use crate::path::PathSet;

use thiserror::Error;

/// An error and the position in the source text where it was found.
///
/// Lines and columns are counted from zero, columns in characters.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Line {line} Column {column}: {kind}.")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("Expected number, got {0:?}")]
    Number(String),
    #[error("Unsupported command {0:?}")]
    Command(char),
    #[error("Expected move-to command after closing the sub-path, got {0:?}")]
    MissingMoveTo(char),
}

/// Reads the sub-paths of a string and sends them to a [`PathBuilder`].
pub struct PathParser<'l> {
    src: &'l str,
    offset: usize,
    current: Point,
    subpath_start: Point,
    // The second control point of the previous command, if it was a curve.
    last_ctrl: Option<Point>,
}

impl<'l> PathParser<'l> {
    pub fn new(src: &'l str) -> Self {
        PathParser {
            src,
            offset: 0,
            // A relative move-to at the beginning is relative to the origin.
            current: point(0.0, 0.0),
            subpath_start: point(0.0, 0.0),
            last_ctrl: None,
        }
    }

    /// Byte offset of the first character that wasn't consumed.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reads the whole string.
    ///
    /// On error, the sub-paths read so far have been sent to `output` and the one in
    /// progress is ended without closing it.
    pub fn parse<Builder: PathBuilder>(&mut self, output: &mut Builder) -> Result<(), ParseError> {
        let mut in_subpath = false;
        let result = self.parse_commands(output, &mut in_subpath);

        if in_subpath {
            output.end(false);
        }

        result
    }

    fn parse_commands<Builder: PathBuilder>(
        &mut self,
        output: &mut Builder,
        in_subpath: &mut bool,
    ) -> Result<(), ParseError> {
        // Numbers without a command repeat the previous one, or start with a move-to.
        let mut repeated = 'M';
        let mut just_closed = false;

        loop {
            self.skip_separators();
            let command_offset = self.offset;
            let command = match self.peek() {
                None => return Ok(()),
                Some(c) if c.is_ascii_alphabetic() => {
                    self.offset += 1;
                    c
                }
                Some(_) => repeated,
            };

            if just_closed && command != 'M' && command != 'm' {
                self.offset = command_offset;
                return Err(self.error_at(command_offset, ParseErrorKind::MissingMoveTo(command)));
            }

            let relative = command.is_ascii_lowercase();
            let mut curve_ctrl = None;

            match command.to_ascii_uppercase() {
                'M' => {
                    if *in_subpath {
                        output.end(false);
                    }
                    let to = self.read_point(relative)?;
                    output.begin(to);
                    self.current = to;
                    self.subpath_start = to;
                    *in_subpath = true;
                    just_closed = false;
                }
                'L' => {
                    let to = self.read_point(relative)?;
                    self.line_to(output, to);
                }
                'H' => {
                    let y = self.current.y;
                    let x = self.read_coordinate(relative, self.current.x)?;
                    self.line_to(output, point(x, y));
                }
                'V' => {
                    let x = self.current.x;
                    let y = self.read_coordinate(relative, self.current.y)?;
                    self.line_to(output, point(x, y));
                }
                'C' => {
                    let ctrl1 = self.read_point(relative)?;
                    let ctrl2 = self.read_point(relative)?;
                    let to = self.read_point(relative)?;
                    output.cubic_bezier_to(ctrl1, ctrl2, to);
                    self.current = to;
                    curve_ctrl = Some(ctrl2);
                }
                'S' => {
                    // The first control point mirrors the previous curve's second one.
                    let ctrl1 = match self.last_ctrl {
                        Some(prev) => self.current + (self.current - prev),
                        None => self.current,
                    };
                    let ctrl2 = self.read_point(relative)?;
                    let to = self.read_point(relative)?;
                    output.cubic_bezier_to(ctrl1, ctrl2, to);
                    self.current = to;
                    curve_ctrl = Some(ctrl2);
                }
                'Z' => {
                    output.end(true);
                    self.current = self.subpath_start;
                    *in_subpath = false;
                    just_closed = true;
                }
                _ => {
                    self.offset = command_offset;
                    return Err(self.error_at(command_offset, ParseErrorKind::Command(command)));
                }
            }

            self.last_ctrl = curve_ctrl;
            repeated = match command {
                'M' => 'L',
                'm' => 'l',
                'Z' => 'M',
                'z' => 'm',
                c => c,
            };
        }
    }

    fn line_to(&mut self, output: &mut impl PathBuilder, to: Point) {
        output.line_to(to);
        self.current = to;
    }

    fn peek(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() && c != ',' {
                break;
            }
            self.offset += c.len_utf8();
        }
    }

    fn read_point(&mut self, relative: bool) -> Result<Point, ParseError> {
        let x = self.read_coordinate(relative, self.current.x)?;
        let y = self.read_coordinate(relative, self.current.y)?;

        Ok(point(x, y))
    }

    fn read_coordinate(&mut self, relative: bool, base: f64) -> Result<f64, ParseError> {
        let value = self.read_number()?;

        Ok(if relative { base + value } else { value })
    }

    // Numbers are an optional minus sign, digits, an optional fraction and an
    // optional exponent. "0.6.5" reads as 0.6 followed by .5.
    fn read_number(&mut self) -> Result<f64, ParseError> {
        self.skip_separators();

        let src = self.src;
        let bytes = src.as_bytes();
        let skip_digits = |mut i: usize| {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            i
        };

        let start = self.offset;
        let mut end = start;
        if bytes.get(end) == Some(&b'-') {
            end += 1;
        }
        end = skip_digits(end);
        if bytes.get(end) == Some(&b'.') {
            end = skip_digits(end + 1);
        }
        if let Some(b'e') | Some(b'E') = bytes.get(end) {
            end += 1;
            if bytes.get(end) == Some(&b'-') {
                end += 1;
            }
            end = skip_digits(end);
        }

        match src[start..end].parse::<f64>() {
            Ok(value) => {
                self.offset = end;
                Ok(value)
            }
            Err(_) => {
                let token = src[start..]
                    .split(|c: char| c.is_whitespace() || c == ',')
                    .next()
                    .unwrap_or("");
                Err(self.error_at(start, ParseErrorKind::Number(token.to_string())))
            }
        }
    }

    fn error_at(&self, offset: usize, kind: ParseErrorKind) -> ParseError {
        let before = &self.src[..offset];

        ParseError {
            kind,
            line: before.matches('\n').count(),
            column: before.chars().rev().take_while(|c| *c != '\n').count(),
        }
    }
}

/// Parses a string into a [`PathSet`] with one path per sub-path.
pub fn parse_path_set(src: &str) -> Result<PathSet, ParseError> {
    let mut builder = PathSet::builder();
    PathParser::new(src).parse(&mut builder)?;

    Ok(builder.build())
}

#[cfg(test)]
use crate::path::{Path, PathSegment};

#[test]
fn empty() {
    assert!(parse_path_set("").unwrap().is_empty());
    assert!(parse_path_set(" ,\n").unwrap().is_empty());
}

#[test]
fn closed_square() {
    let set = parse_path_set("M 0 0 L 1 0 L 1 1 L 0 1 Z").unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set[0].len(), 5);
    assert!(set[0].is_closed());
    assert_eq!(set[0].last_point(), Some(point(0.0, 0.0)));

    // Already back at the start, closing adds nothing.
    let set = parse_path_set("M 0 0 L 1 0 L 1 1 L 0 0 Z").unwrap();
    assert_eq!(set[0].len(), 4);
}

#[test]
fn implicit_commands() {
    let set = parse_path_set("0 0 1 1 2 2 3 3").unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set[0].len(), 4);
    assert!(!set[0].is_closed());
    assert_eq!(set[0].last_point(), Some(point(3.0, 3.0)));

    let set = parse_path_set("M0,0 C 1,0 2,0 3,0 3,1 3,2 3,3").unwrap();
    assert_eq!(set[0].num_curves(), 2);
}

#[test]
fn relative_commands() {
    let set = parse_path_set("m 10 10 l 5 0 v 5 h -5 c 0 -1 1 -2 2 -2 s 3 1 3 3 z m 1 1").unwrap();

    assert_eq!(set.len(), 2);
    assert_eq!(
        set[0].segments(),
        &[
            PathSegment::start(point(10.0, 10.0)),
            PathSegment::Line {
                to: point(15.0, 10.0)
            },
            PathSegment::Line {
                to: point(15.0, 15.0)
            },
            PathSegment::Line {
                to: point(10.0, 15.0)
            },
            PathSegment::Bezier {
                ctrl1: point(10.0, 14.0),
                ctrl2: point(11.0, 13.0),
                to: point(12.0, 13.0),
            },
            PathSegment::Bezier {
                ctrl1: point(13.0, 13.0),
                ctrl2: point(15.0, 14.0),
                to: point(15.0, 16.0),
            },
            PathSegment::Line {
                to: point(10.0, 10.0)
            },
        ]
    );
    assert!(set[0].is_closed());
    // After a close, relative coordinates start from the sub-path's first point.
    assert_eq!(set[1].first_point(), Some(point(11.0, 11.0)));
}

#[test]
fn smooth_curve_without_previous_curve() {
    let set = parse_path_set("M 1 1 L 2 2 S 3 4 5 5").unwrap();

    assert_eq!(
        set[0].segments()[2],
        PathSegment::Bezier {
            ctrl1: point(2.0, 2.0),
            ctrl2: point(3.0, 4.0),
            to: point(5.0, 5.0),
        }
    );
}

#[test]
fn unsupported_commands() {
    let error = parse_path_set("x 0 0 0").unwrap_err();
    assert_eq!(
        error,
        ParseError {
            kind: ParseErrorKind::Command('x'),
            line: 0,
            column: 0,
        }
    );

    let error = parse_path_set("\n M 0 \n0 x 1 1").unwrap_err();
    assert_eq!(
        error,
        ParseError {
            kind: ParseErrorKind::Command('x'),
            line: 2,
            column: 2,
        }
    );

    // Quadratic curves and arcs can't be represented.
    assert_eq!(
        parse_path_set("M 0 0 Q 1 1 2 2").unwrap_err().kind,
        ParseErrorKind::Command('Q')
    );
    assert_eq!(
        parse_path_set("M 0 0 a 1 1 0 0 0 2 2").unwrap_err().kind,
        ParseErrorKind::Command('a')
    );
}

#[test]
fn error_message() {
    let error = parse_path_set("M 0 0\nL 1 *").unwrap_err();

    assert_eq!(error.to_string(), "Line 1 Column 4: Expected number, got \"*\".");
}

#[test]
fn number_followed_by_fraction() {
    // Same as "M 0.6 0.5".
    let set = parse_path_set("M 0.6.5").unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set[0].segments(), &[PathSegment::start(point(0.6, 0.5))]);
}

#[test]
fn scientific_notation() {
    let set = parse_path_set("M 1e-2 -1E3").unwrap();
    assert_eq!(set[0].first_point(), Some(point(0.01, -1000.0)));

    parse_path_set("M 1e-9 0").unwrap();
    parse_path_set("M -1e11 0").unwrap();
    parse_path_set("M 1.e-9 1.4e-4z").unwrap();
    parse_path_set("M0 1.6e-9L0 1.4e-4").unwrap();
}

#[test]
fn bad_numbers() {
    let bad_number = |src: &str| match parse_path_set(src) {
        Err(ParseError {
            kind: ParseErrorKind::Number(..),
            ..
        }) => true,
        other => {
            println!("{:?}", other);
            false
        }
    };

    assert!(bad_number("M 0 --1"));
    assert!(bad_number("M 0 1ee2"));
    assert!(bad_number("M 0 1e--1"));
    assert!(bad_number("M 0 *2"));
    assert!(bad_number("M 0 e"));
    assert!(bad_number("M 0 1e"));
    assert!(bad_number("M 0 +1"));
    assert!(bad_number("M 0"));
}

#[test]
fn move_to_after_close() {
    let error = parse_path_set("M 0 0 Z L 1 1 2 2").unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::MissingMoveTo('L'));

    // Numbers after a close start a new sub-path.
    let set = parse_path_set("M 0 0 1 0 1 1 Z 5 5 6 6").unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set[1].first_point(), Some(point(5.0, 5.0)));
    assert_eq!(set[1].len(), 2);
}

#[test]
fn sub_paths_before_an_error_are_kept() {
    let mut builder = PathSet::builder();
    let mut parser = PathParser::new("M 0 0 L 4 0 Z M 1 1 L 2 2 x");

    assert!(parser.parse(&mut builder).is_err());
    assert_eq!(parser.offset(), 26);

    let set = builder.build();
    assert_eq!(set.len(), 2);
    assert!(set[0].is_closed());
    assert!(!set[1].is_closed());
    assert_eq!(set[1].last_point(), Some(point(2.0, 2.0)));
}

#[test]
fn single_path_builder() {
    let mut builder = Path::builder();
    PathParser::new("M 0 0 C 1 0 1 1 0 1 Z").parse(&mut builder).unwrap();

    let path = builder.build();
    assert!(path.is_closed());
    assert_eq!(path.num_curves(), 1);
    assert_eq!(path.last_point(), Some(point(0.0, 0.0)));
}
