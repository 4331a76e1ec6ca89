//! Scanline un-filtering.
//!
//! Each function undoes one filter type for a whole scanline.
//! `raw` is the filtered row as stored, `current` receives the
//! reconstructed bytes, `prev_row` is the already reconstructed
//! row above (all zeroes for the first row) and `components` is
//! the byte distance to the left neighbor. All arithmetic wraps
//! modulo 256.
//!
//!
//! ┌─────┬─────┐
//! │ c   │  b  │
//! ├─────┼─────┤
//! │ a   │ x   │
//! └─────┴─────┘

/// The type 4 predictor: whichever of left, up and up-left is
/// closest to `a + b - c`, ties resolved in that order
pub fn paeth_predictor(a: u8, b: u8, c: u8) -> u8
{
    let p = i16::from(a) + i16::from(b) - i16::from(c);

    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();

    if pa <= pb && pa <= pc
    {
        return a;
    }
    if pb <= pc
    {
        return b;
    }
    c
}

pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize)
{
    // leftmost pixel has no left neighbor
    current[..components].copy_from_slice(&raw[..components]);

    for i in components..raw.len()
    {
        let a = current[i - components];

        current[i] = raw[i].wrapping_add(a);
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8])
{
    for i in 0..raw.len()
    {
        current[i] = raw[i].wrapping_add(prev_row[i]);
    }
}

pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize)
{
    for i in 0..components
    {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }

    for i in components..raw.len()
    {
        let a = u16::from(current[i - components]);
        let b = u16::from(prev_row[i]);

        current[i] = raw[i].wrapping_add(((a + b) >> 1) as u8);
    }
}

pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize)
{
    for i in 0..components
    {
        current[i] = raw[i].wrapping_add(paeth_predictor(0, prev_row[i], 0));
    }

    for i in components..raw.len()
    {
        let a = current[i - components];
        let b = prev_row[i];
        let c = prev_row[i - components];

        current[i] = raw[i].wrapping_add(paeth_predictor(a, b, c));
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    /// The predictor exactly as the PNG specification spells it
    /// out, kept separate so the production version is checked
    /// against the text and not against itself
    fn paeth_reference(a: u8, b: u8, c: u8) -> u8
    {
        let p = i32::from(a) + i32::from(b) - i32::from(c);
        let pa = (p - i32::from(a)).abs();
        let pb = (p - i32::from(b)).abs();
        let pc = (p - i32::from(c)).abs();

        if pa <= pb && pa <= pc
        {
            a
        }
        else if pb <= pc
        {
            b
        }
        else
        {
            c
        }
    }

    #[test]
    fn paeth_agrees_with_specification_everywhere()
    {
        for a in 0..=255_u8
        {
            for b in 0..=255_u8
            {
                for c in 0..=255_u8
                {
                    let got = paeth_predictor(a, b, c);

                    assert_eq!(got, paeth_reference(a, b, c));
                    // the predictor always returns one of its inputs
                    assert!(got == a || got == b || got == c);
                }
            }
        }
    }

    /// Forward-filter a row so the unfilter functions can be
    /// checked for exact reversibility
    fn forward_filter(
        filter: u8, original: &[u8], prev_row: &[u8], components: usize
    ) -> Vec<u8>
    {
        let mut raw = vec![0_u8; original.len()];

        for i in 0..original.len()
        {
            let a = if i >= components { original[i - components] } else { 0 };
            let b = prev_row[i];
            let c = if i >= components { prev_row[i - components] } else { 0 };

            let predictor = match filter
            {
                0 => 0,
                1 => a,
                2 => b,
                3 => (((u16::from(a)) + u16::from(b)) >> 1) as u8,
                4 => paeth_reference(a, b, c),
                _ => unreachable!()
            };

            raw[i] = original[i].wrapping_sub(predictor);
        }
        raw
    }

    #[test]
    fn unfiltering_reverses_filtering()
    {
        // every filter type against every supported pixel layout
        for components in [1_usize, 2, 3, 4]
        {
            let stride = components * 13;

            let original: Vec<u8> = (0..stride).map(|i| (i * 89 + 7) as u8).collect();
            let prev_row: Vec<u8> = (0..stride).map(|i| (i * 37 + 120) as u8).collect();

            for filter in 0..=4_u8
            {
                let raw = forward_filter(filter, &original, &prev_row, components);
                let mut current = vec![0_u8; stride];

                match filter
                {
                    0 => current.copy_from_slice(&raw),
                    1 => handle_sub(&raw, &mut current, components),
                    2 => handle_up(&prev_row, &raw, &mut current),
                    3 => handle_avg(&prev_row, &raw, &mut current, components),
                    4 => handle_paeth(&prev_row, &raw, &mut current, components),
                    _ => unreachable!()
                }

                assert_eq!(
                    current, original,
                    "filter {filter} with {components} components did not reverse"
                );
            }
        }
    }

    #[test]
    fn first_row_filters_treat_missing_row_as_zero()
    {
        let components = 3;
        let zero_row = vec![0_u8; 9];
        let original: Vec<u8> = (0..9).map(|i| (i * 11 + 3) as u8).collect();

        for filter in 0..=4_u8
        {
            let raw = forward_filter(filter, &original, &zero_row, components);
            let mut current = vec![0_u8; 9];

            match filter
            {
                0 => current.copy_from_slice(&raw),
                1 => handle_sub(&raw, &mut current, components),
                2 => handle_up(&zero_row, &raw, &mut current),
                3 => handle_avg(&zero_row, &raw, &mut current, components),
                4 => handle_paeth(&zero_row, &raw, &mut current, components),
                _ => unreachable!()
            }

            assert_eq!(current, original);
        }
    }
}
