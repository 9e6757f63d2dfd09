use thiserror::Error;

/// The rasterizer's result type.
pub type RasterResult<T> = Result<T, RasterError>;

/// Reasons for which a path or a set of paths is not drawn.
///
/// Errors are always detected before any drawing primitive is invoked, so a failed
/// call leaves the target untouched.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RasterError {
    /// The path does not even have a start point.
    #[error("Path has no segment.")]
    EmptyPath,
    /// The point buffer could not be allocated.
    #[error("Could not allocate a buffer of {requested} points.")]
    OutOfMemory { requested: usize },
}

/// Reserves room for exactly `additional` more items, reporting allocation failures
/// instead of aborting.
pub(crate) fn try_reserve<T>(buffer: &mut Vec<T>, additional: usize) -> RasterResult<()> {
    buffer
        .try_reserve_exact(additional)
        .map_err(|_| RasterError::OutOfMemory {
            requested: additional,
        })
}

#[test]
fn error_messages() {
    assert_eq!(RasterError::EmptyPath.to_string(), "Path has no segment.");
    assert_eq!(
        RasterError::OutOfMemory { requested: 12 }.to_string(),
        "Could not allocate a buffer of 12 points."
    );
}

#[test]
fn reserve_failure() {
    let mut buffer: Vec<u64> = Vec::new();
    assert_eq!(
        try_reserve(&mut buffer, usize::MAX),
        Err(RasterError::OutOfMemory {
            requested: usize::MAX
        })
    );
    assert_eq!(try_reserve(&mut buffer, 8), Ok(()));
    assert!(buffer.capacity() >= 8);
}
