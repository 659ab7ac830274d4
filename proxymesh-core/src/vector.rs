//! Slice-based vector utilities
//!
//! These operate on arbitrary-length `f32` slices so callers can mix nalgebra
//! vectors (`as_slice()`) with raw coordinate buffers. Binary operations fail with
//! [`Error::DimensionMismatch`] when the operands differ in length.

use crate::{Error, Result};

/// Magnitude below which [`normalize`] returns the zero vector
pub const NORMALIZE_EPSILON: f32 = 1e-6;

fn check_dimensions(a: &[f32], b: &[f32]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch { left: a.len(), right: b.len() });
    }
    Ok(())
}

/// Dot product of two vectors of equal length
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32> {
    check_dimensions(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Component-wise `a + b`
pub fn add(a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
    check_dimensions(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Component-wise `a - b`
pub fn subtract(a: &[f32], b: &[f32]) -> Result<Vec<f32>> {
    check_dimensions(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// `s * v`
pub fn scale(v: &[f32], s: f32) -> Vec<f32> {
    v.iter().map(|x| s * x).collect()
}

/// Cross product `u x v` of two 3-component vectors
pub fn cross(u: &[f32], v: &[f32]) -> Result<[f32; 3]> {
    check_dimensions(u, v)?;
    if u.len() != 3 {
        return Err(Error::DimensionMismatch { left: u.len(), right: 3 });
    }
    Ok([
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ])
}

/// Euclidean length
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Unit vector in the direction of `v`, or the zero vector when
/// `magnitude(v) < NORMALIZE_EPSILON`.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = magnitude(v);
    if norm < NORMALIZE_EPSILON {
        return vec![0.0; v.len()];
    }
    v.iter().map(|x| x / norm).collect()
}

/// Whether `u` and `v` point the same way, within `tol`.
///
/// Compares `dot(u, v) - |u|·|v|` against `tol` in absolute dot-product units,
/// so the tolerance scales with the lengths of the inputs. Anti-parallel vectors
/// are not considered parallel.
pub fn parallel(u: &[f32], v: &[f32], tol: f32) -> Result<bool> {
    let uv = dot(u, v)?;
    // sqrt(|u|²·|v|²) keeps parallel(u, u, 0) exact
    let lengths = (dot(u, u)? * dot(v, v)?).sqrt();
    Ok((uv - lengths).abs() <= tol)
}
