//! Interpolation properties across table shapes.

use approx::assert_abs_diff_eq;
use rtlut_core::{Axis, Lookup, LutError, MAX_DIMENSIONS, Table};

/// Deterministic pseudo-random coordinates.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn axes(n: usize) -> Vec<Axis> {
    (0..n)
        .map(|k| {
            let len = 2 + k % 3;
            let values: Vec<f64> = (0..len).map(|i| (i * i) as f64 + k as f64).collect();
            Axis::from_vec(values).unwrap()
        })
        .collect()
}

/// Fills a table from a function of the node coordinates.
fn tabulate(axes: Vec<Axis>, f: impl Fn(&[f64]) -> f64) -> Table {
    let shape: Vec<usize> = axes.iter().map(Axis::len).collect();
    let count: usize = shape.iter().product();
    let mut values = Vec::with_capacity(count);
    let mut idx = vec![0usize; shape.len()];
    let mut coord = vec![0.0; shape.len()];
    for _ in 0..count {
        for (k, &i) in idx.iter().enumerate() {
            coord[k] = axes[k].values()[i];
        }
        values.push(f(&coord));
        for k in (0..shape.len()).rev() {
            idx[k] += 1;
            if idx[k] < shape[k] {
                break;
            }
            idx[k] = 0;
        }
    }
    Table::new(values, axes).unwrap()
}

fn random_coord(table: &Table, rng: &mut Lcg, margin: f64) -> Vec<f64> {
    table
        .axes()
        .iter()
        .map(|a| {
            let span = a.max() - a.min();
            a.min() - margin * span + rng.next_unit() * span * (1.0 + 2.0 * margin)
        })
        .collect()
}

#[test]
fn test_affine_functions_are_exact() {
    for n in 1..=6 {
        let f = |c: &[f64]| 3.0 + c.iter().enumerate().map(|(k, x)| (k as f64 + 0.5) * x).sum::<f64>();
        let table = tabulate(axes(n), f);
        let mut rng = Lcg(n as u64);
        for _ in 0..200 {
            let coord = random_coord(&table, &mut rng, 0.0);
            assert_abs_diff_eq!(table.get_value(&coord).unwrap(), f(&coord), epsilon = 1e-9);
        }
    }
}

#[test]
fn test_bilinear_term_is_exact() {
    let table = tabulate(axes(2), |c| c[0] * c[1]);
    let mut rng = Lcg(99);
    for _ in 0..100 {
        let coord = random_coord(&table, &mut rng, 0.0);
        assert_abs_diff_eq!(table.get_value(&coord).unwrap(), coord[0] * coord[1], epsilon = 1e-9);
    }
}

#[test]
fn test_result_within_table_range() {
    let table = tabulate(axes(5), |c| (c.iter().sum::<f64>()).sin());
    let lo = table.values().iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = table.values().iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mut rng = Lcg(7);
    for _ in 0..500 {
        let coord = random_coord(&table, &mut rng, 0.5);
        let v = table.get_value(&coord).unwrap();
        assert!(v >= lo - 1e-12 && v <= hi + 1e-12, "{v} outside [{lo}, {hi}]");
    }
}

#[test]
fn test_clamping_equals_projection() {
    let table = tabulate(axes(4), |c| c.iter().map(|x| x * x).sum());
    let mut rng = Lcg(11);
    for _ in 0..200 {
        let coord = random_coord(&table, &mut rng, 1.0);
        let projected: Vec<f64> = coord
            .iter()
            .zip(table.axes())
            .map(|(&x, a)| x.clamp(a.min(), a.max()))
            .collect();
        assert_eq!(table.get_value(&coord).unwrap(), table.get_value(&projected).unwrap());
    }
}

#[test]
fn test_nan_component() {
    let table = tabulate(axes(3), |c| c[0]);
    for k in 0..3 {
        let mut coord = vec![0.5; 3];
        coord[k] = f64::NAN;
        assert!(table.get_value(&coord).unwrap().is_nan());
    }
}

#[test]
fn test_parallel_batch_matches_serial() {
    let table = tabulate(axes(6), |c| c.iter().product::<f64>().cbrt());
    let mut rng = Lcg(2024);
    let coords: Vec<f64> = (0..10_000).flat_map(|_| random_coord(&table, &mut rng, 0.2)).collect();

    let serial = table.get_values(&coords).unwrap();
    let parallel = table.par_get_values(&coords).unwrap();
    assert_eq!(serial.len(), 10_000);
    assert_eq!(serial, parallel);

    for (i, point) in coords.chunks_exact(6).enumerate().step_by(997) {
        assert_eq!(serial[i], table.get_value(point).unwrap());
    }
}

#[test]
fn test_dimension_limit() {
    let two = || Axis::new(&[0.0, 1.0]).unwrap();
    let axes: Vec<Axis> = (0..=MAX_DIMENSIONS).map(|_| two()).collect();
    // rejected before the value count is compared
    let err = Table::new(vec![0.0; 1], axes).unwrap_err();
    assert!(matches!(err, LutError::InvalidAxis { .. }), "{err}");

    let axes: Vec<Axis> = (0..3).map(|_| two()).collect();
    let err = Table::new(vec![0.0; 7], axes).unwrap_err();
    assert!(matches!(err, LutError::SizeMismatch { expected: 8, actual: 7 }));
}

#[test]
fn test_shared_lookup_across_threads() {
    let table = tabulate(axes(3), |c| c[0] + 2.0 * c[1] - c[2]);
    let lut = Lookup::with_names(table, ["a", "b", "c"]).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let lut = lut.clone();
            std::thread::spawn(move || {
                let x = 0.25 * t as f64;
                lut.value_named(&[("c", 2.0), ("a", x), ("b", 1.5)]).unwrap()
            })
        })
        .collect();

    for (t, h) in handles.into_iter().enumerate() {
        let expected = 0.25 * t as f64 + 3.0 - 2.0;
        assert_abs_diff_eq!(h.join().unwrap(), expected, epsilon = 1e-12);
    }
}
