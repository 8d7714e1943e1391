//! Two dimensional discrete cosine transform on square sample matrices.
//!
//! The forward transform is the orthonormal type-II DCT applied to samples
//! shifted by -128, the inverse is the matching type-III transform which adds
//! the 128 back. For 8x8 blocks the scale factor is the familiar `1/4`.
//!
//! The quantize/dequantize pair against the JPEG luminance table is a side
//! utility, the Zhao-Koch engine works on unquantized coefficients.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::StegoError;
use crate::result::Result;

/// Edge length of a transform block
pub const BLOCK_SIZE: usize = 8;

/// Row major square matrix of samples or coefficients
pub type Matrix = Vec<Vec<f64>>;

/// Standard JPEG luminance quantization table (ITU T.81, Annex K)
pub const JPEG_LUMINANCE_QUANT_TABLE: [[u16; BLOCK_SIZE]; BLOCK_SIZE] = [
    [16, 11, 10, 16, 24, 40, 51, 61],
    [12, 12, 14, 19, 26, 58, 60, 55],
    [14, 13, 16, 24, 40, 57, 69, 56],
    [14, 17, 22, 29, 51, 87, 80, 62],
    [18, 22, 37, 56, 68, 109, 103, 77],
    [24, 35, 55, 64, 81, 104, 113, 92],
    [49, 64, 78, 87, 103, 121, 120, 101],
    [72, 92, 95, 98, 112, 100, 103, 99],
];

const LEVEL_SHIFT: f64 = 128.0;

/// Forward DCT, `D[k][l] = 2/n * c(k) * c(l) * sum((x[i][j] - 128) * cos(..) * cos(..))`
pub fn forward(samples: &[Vec<f64>]) -> Result<Matrix> {
    let n = ensure_square(samples)?;
    let cos = cosine_table(n);
    let scale = 2.0 / n as f64;

    // separable: transform the columns first, then the rows
    let mut temp = vec![vec![0.0; n]; n];
    for k in 0..n {
        for j in 0..n {
            temp[k][j] = (0..n)
                .map(|i| (samples[i][j] - LEVEL_SHIFT) * cos[k][i])
                .sum();
        }
    }

    let mut coefficients = vec![vec![0.0; n]; n];
    for k in 0..n {
        for l in 0..n {
            let sum: f64 = (0..n).map(|j| temp[k][j] * cos[l][j]).sum();
            coefficients[k][l] = scale * c(k) * c(l) * sum;
        }
    }

    Ok(coefficients)
}

/// Inverse DCT, `x[i][j] = 2/n * sum(c(u) * c(v) * D[u][v] * cos(..) * cos(..)) + 128`
pub fn inverse(coefficients: &[Vec<f64>]) -> Result<Matrix> {
    let n = ensure_square(coefficients)?;
    let cos = cosine_table(n);
    let scale = 2.0 / n as f64;

    let mut temp = vec![vec![0.0; n]; n];
    for i in 0..n {
        for v in 0..n {
            temp[i][v] = (0..n)
                .map(|u| c(u) * coefficients[u][v] * cos[u][i])
                .sum();
        }
    }

    let mut samples = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            let sum: f64 = (0..n).map(|v| c(v) * temp[i][v] * cos[v][j]).sum();
            samples[i][j] = scale * sum + LEVEL_SHIFT;
        }
    }

    Ok(samples)
}

/// Element wise division by the JPEG luminance table, 8x8 only
pub fn quantize(coefficients: &[Vec<f64>]) -> Result<Matrix> {
    ensure_block(coefficients)?;

    Ok(coefficients
        .iter()
        .zip(JPEG_LUMINANCE_QUANT_TABLE.iter())
        .map(|(row, q)| row.iter().zip(q).map(|(v, q)| v / *q as f64).collect())
        .collect())
}

/// Element wise multiplication by the JPEG luminance table, 8x8 only
pub fn dequantize(quantized: &[Vec<f64>]) -> Result<Matrix> {
    ensure_block(quantized)?;

    Ok(quantized
        .iter()
        .zip(JPEG_LUMINANCE_QUANT_TABLE.iter())
        .map(|(row, q)| row.iter().zip(q).map(|(v, q)| v * *q as f64).collect())
        .collect())
}

#[inline]
fn c(k: usize) -> f64 {
    if k == 0 {
        FRAC_1_SQRT_2
    } else {
        1.0
    }
}

/// `table[k][i] = cos((2i + 1) * k * PI / 2n)`
fn cosine_table(n: usize) -> Matrix {
    (0..n)
        .map(|k| {
            (0..n)
                .map(|i| ((2 * i + 1) as f64 * k as f64 * PI / (2 * n) as f64).cos())
                .collect()
        })
        .collect()
}

fn ensure_square(matrix: &[Vec<f64>]) -> Result<usize> {
    let n = matrix.len();
    if n == 0 {
        return Err(StegoError::InvalidData("matrix is empty".to_string()));
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(StegoError::InvalidData(format!(
            "matrix width and height are different ({}x{n})",
            row.len()
        )));
    }

    Ok(n)
}

fn ensure_block(matrix: &[Vec<f64>]) -> Result<()> {
    if ensure_square(matrix)? != BLOCK_SIZE {
        return Err(StegoError::InvalidData(format!(
            "matrix width and height are not equal {BLOCK_SIZE}"
        )));
    }

    Ok(())
}
