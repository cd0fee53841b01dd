//! Batch evaluation of many query points.
//!
//! Pixel-wise retrievals query the same table millions of times. These
//! helpers take points packed row-wise (`dimension_count()` values per point)
//! and evaluate them either serially or across the rayon pool.

use rayon::prelude::*;

use crate::{LutError, LutResult, Table};

/// Points below this count are evaluated serially by [`Table::par_get_values`].
const PAR_THRESHOLD: usize = 4096;

impl Table {
    fn check_packed(&self, coords: &[f64]) -> LutResult<()> {
        let n = self.dimension_count();
        if coords.len() % n != 0 {
            return Err(LutError::ArityMismatch {
                expected: n,
                actual: coords.len() % n,
            });
        }
        Ok(())
    }

    /// Interpolates every point in `coords`, serially.
    ///
    /// # Errors
    ///
    /// [`LutError::ArityMismatch`] if `coords.len()` is not a multiple of
    /// the dimension count.
    pub fn get_values(&self, coords: &[f64]) -> LutResult<Vec<f64>> {
        self.check_packed(coords)?;
        Ok(coords
            .chunks_exact(self.dimension_count())
            .map(|c| self.interpolate(c))
            .collect())
    }

    /// Interpolates every point in `coords` on the rayon thread pool.
    ///
    /// Output order matches input order.
    pub fn par_get_values(&self, coords: &[f64]) -> LutResult<Vec<f64>> {
        self.check_packed(coords)?;
        let n = self.dimension_count();
        if coords.len() / n < PAR_THRESHOLD {
            return self.get_values(coords);
        }
        Ok(coords
            .par_chunks_exact(n)
            .map(|c| self.interpolate(c))
            .collect())
    }

    /// Interpolates into a caller-provided buffer, one output per point.
    pub fn get_values_into(&self, coords: &[f64], out: &mut [f64]) -> LutResult<()> {
        self.check_packed(coords)?;
        let n = self.dimension_count();
        let points = coords.len() / n;
        if out.len() != points {
            return Err(LutError::SizeMismatch {
                expected: points,
                actual: out.len(),
            });
        }
        out.par_iter_mut()
            .zip(coords.par_chunks_exact(n))
            .for_each(|(o, c)| *o = self.interpolate(c));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Axis, Table};

    fn plane() -> Table {
        let x = Axis::new(&[0.0, 1.0, 2.0, 3.0]).unwrap();
        let y = Axis::new(&[0.0, 2.0]).unwrap();
        let values = (0..4)
            .flat_map(|i| (0..2).map(move |j| (i * 10 + j * 2) as f64))
            .collect();
        Table::new(values, vec![x, y]).unwrap()
    }

    #[test]
    fn test_serial_matches_single() {
        let t = plane();
        let coords = [0.5, 1.0, 2.0, 0.0, 3.0, 2.0];
        let out = t.get_values(&coords).unwrap();
        assert_eq!(out.len(), 3);
        for (i, c) in coords.chunks(2).enumerate() {
            assert_eq!(out[i], t.get_value(c).unwrap());
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let t = plane();
        let coords: Vec<f64> = (0..20_000)
            .flat_map(|i| {
                let f = i as f64 / 20_000.0;
                [f * 3.0, 2.0 - f * 2.0]
            })
            .collect();
        let serial = t.get_values(&coords).unwrap();
        let parallel = t.par_get_values(&coords).unwrap();
        assert_eq!(serial, parallel);

        let mut out = vec![0.0; serial.len()];
        t.get_values_into(&coords, &mut out).unwrap();
        assert_eq!(serial, out);
    }

    #[test]
    fn test_ragged_input() {
        let t = plane();
        assert!(t.get_values(&[0.0, 1.0, 2.0]).is_err());
        assert!(t.par_get_values(&[0.0]).is_err());
        let mut out = vec![0.0; 2];
        assert!(t.get_values_into(&[0.0, 1.0], &mut out).is_err());
    }
}
