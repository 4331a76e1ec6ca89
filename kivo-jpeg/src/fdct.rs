//! Forward DCT.
//!
//! The direct evaluation of the 8x8 type-II DCT definition:
//!
//! ```text
//! F(u,v) = 1/4 C(u) C(v) Σx Σy f(x,y) cos((2x+1)uπ/16) cos((2y+1)vπ/16)
//! ```
//!
//! with `C(0) = 1/sqrt(2)` and `C(k) = 1` otherwise. The kernel
//! is symmetric in its two axes, so the same routine serves the
//! row and column direction.

use std::f32::consts::{FRAC_1_SQRT_2, PI};

/// Transform `block` in place from samples to frequency
/// coefficients
pub fn forward_dct(block: &mut [[f32; 8]; 8])
{
    // cos((2x + 1) * u * pi / 16), indexed [x][u]
    let mut cosines = [[0_f32; 8]; 8];

    for (x, row) in cosines.iter_mut().enumerate()
    {
        for (u, value) in row.iter_mut().enumerate()
        {
            *value = ((2 * x + 1) as f32 * u as f32 * PI / 16.0).cos();
        }
    }

    let mut temp = [[0_f32; 8]; 8];

    for (u, temp_row) in temp.iter_mut().enumerate()
    {
        for (v, out) in temp_row.iter_mut().enumerate()
        {
            let mut sum = 0.0_f32;

            for (x, block_row) in block.iter().enumerate()
            {
                for (y, sample) in block_row.iter().enumerate()
                {
                    sum += sample * cosines[x][u] * cosines[y][v];
                }
            }

            let cu = if u == 0 { FRAC_1_SQRT_2 } else { 1.0 };
            let cv = if v == 0 { FRAC_1_SQRT_2 } else { 1.0 };

            *out = 0.25 * cu * cv * sum;
        }
    }

    *block = temp;
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn constant_block_transforms_to_pure_dc()
    {
        let mut block = [[100.0_f32; 8]; 8];

        forward_dct(&mut block);

        // DC of a constant block is 8 times the sample value
        assert!((block[0][0] - 800.0).abs() < 0.01);

        for u in 0..8
        {
            for v in 0..8
            {
                if u == 0 && v == 0
                {
                    continue;
                }
                assert!(
                    block[u][v].abs() < 0.01,
                    "AC({u},{v}) = {} for a flat block",
                    block[u][v]
                );
            }
        }
    }

    #[test]
    fn alternating_columns_excite_the_highest_horizontal_frequency()
    {
        let mut block = [[0.0_f32; 8]; 8];

        for row in block.iter_mut()
        {
            for (y, sample) in row.iter_mut().enumerate()
            {
                *sample = if y % 2 == 0 { 100.0 } else { -100.0 };
            }
        }

        forward_dct(&mut block);

        // no DC, all energy in v-frequencies, none in u
        assert!(block[0][0].abs() < 0.01);
        assert!(block[0][7].abs() > 100.0);
        assert!(block[7][0].abs() < 0.01);
    }

    #[test]
    fn transform_preserves_energy()
    {
        // Parseval: the DCT is orthonormal up to the 1/4 C(u) C(v)
        // scaling used here, so total energy is preserved
        let mut block = [[0.0_f32; 8]; 8];

        for (x, row) in block.iter_mut().enumerate()
        {
            for (y, sample) in row.iter_mut().enumerate()
            {
                *sample = ((x * 13 + y * 31) % 61) as f32 - 30.0;
            }
        }

        let spatial_energy: f32 = block.iter().flatten().map(|v| v * v).sum();

        forward_dct(&mut block);

        let frequency_energy: f32 = block.iter().flatten().map(|v| v * v).sum();

        assert!((spatial_energy - frequency_energy).abs() / spatial_energy < 1e-4);
    }
}
