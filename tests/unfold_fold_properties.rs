//! Property-based tests for mode-n unfolding and folding
//!
//! These tests use proptest to check the matricization invariants over
//! arbitrary shapes and modes.

mod common;

use common::create_cpu_client;
use cpals::prelude::*;
use proptest::prelude::*;

fn shape_and_mode() -> impl Strategy<Value = (Vec<usize>, usize)> {
    prop::collection::vec(1..5usize, 2..5)
        .prop_flat_map(|shape| {
            let ndim = shape.len();
            (Just(shape), 0..ndim)
        })
}

fn iota(shape: &[usize]) -> Tensor<CpuRuntime> {
    let (_client, device) = create_cpu_client();
    let numel: usize = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|v| v as f64).collect();
    Tensor::from_slice(&data, shape, &device)
}

// Property: fold inverts unfold
proptest! {
    #[test]
    fn prop_fold_inverts_unfold((shape, mode) in shape_and_mode()) {
        let (client, _device) = create_cpu_client();
        let tensor = iota(&shape);

        let unfolded = client.unfold(&tensor, mode).unwrap();
        let folded = client.fold(&unfolded, mode, &shape).unwrap();

        prop_assert_eq!(folded.shape(), &shape[..]);
        prop_assert_eq!(folded.to_vec::<f64>(), tensor.to_vec::<f64>());
    }
}

// Property: unfolding rows are mode-n fibers, remaining modes ascending
proptest! {
    #[test]
    fn prop_unfold_layout((shape, mode) in shape_and_mode()) {
        let (client, _device) = create_cpu_client();
        let tensor = iota(&shape);
        let unfolded = client.unfold(&tensor, mode).unwrap();

        let cols: usize = shape.iter().product::<usize>() / shape[mode];
        prop_assert_eq!(unfolded.shape(), &[shape[mode], cols][..]);

        let others: Vec<usize> = (0..shape.len()).filter(|&d| d != mode).collect();
        let mut index = vec![0usize; shape.len()];
        for row in 0..shape[mode] {
            for col in 0..cols {
                // Decode `col` row-major over the remaining modes
                let mut rem = col;
                for &d in others.iter().rev() {
                    index[d] = rem % shape[d];
                    rem /= shape[d];
                }
                index[mode] = row;
                prop_assert_eq!(
                    unfolded.get(&[row, col]).unwrap(),
                    tensor.get(&index).unwrap()
                );
            }
        }
    }
}

// Property: unfold rejects out-of-range modes
proptest! {
    #[test]
    fn prop_unfold_bad_mode(shape in prop::collection::vec(1..4usize, 2..4), extra in 0..3usize) {
        let (client, _device) = create_cpu_client();
        let tensor = iota(&shape);
        prop_assert!(client.unfold(&tensor, shape.len() + extra).is_err());
    }
}
