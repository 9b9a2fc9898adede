//! Integration tests for the element-wise, reduction, matmul and random ops

mod common;

use common::{assert_allclose_f64, create_cpu_client};
use cpals::prelude::*;

#[test]
fn test_broadcast_column_scaling() {
    let (client, device) = create_cpu_client();
    let m = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
    let scale = Tensor::<CpuRuntime>::from_slice(&[10.0f64, 100.0], &[2], &device);

    let out = client.mul(&m, &scale).unwrap();
    assert_eq!(out.shape(), &[3, 2]);
    assert_eq!(out.to_vec::<f64>(), vec![10.0, 200.0, 30.0, 400.0, 50.0, 600.0]);

    let out = client.div(&out, &scale.unsqueeze(0).unwrap()).unwrap();
    assert_eq!(out.to_vec::<f64>(), m.to_vec::<f64>());
}

#[test]
fn test_binary_on_transposed_view() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);

    let out = client.sub(&a, &a.t().unwrap()).unwrap();
    assert_eq!(out.to_vec::<f64>(), vec![0.0, -1.0, 1.0, 0.0]);
}

#[test]
fn test_incompatible_broadcast() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::ones(&[2, 3], DType::F64, &device);
    let b = Tensor::<CpuRuntime>::ones(&[2], DType::F64, &device);
    assert!(matches!(client.add(&a, &b), Err(Error::BroadcastError { .. })));
}

#[test]
fn test_sum_dims() {
    let (client, device) = create_cpu_client();
    let t = build_index_sum_tensor::<CpuRuntime>(&device);

    let total = client.sum(&t, &[], false).unwrap();
    assert_eq!(total.shape(), &[] as &[usize]);
    assert_eq!(total.item::<f64>().unwrap(), 36.0);

    let by_i = client.sum(&t, &[1, 2], false).unwrap();
    assert_eq!(by_i.to_vec::<f64>(), vec![16.0, 20.0]);

    let kept = client.sum(&t, &[0], true).unwrap();
    assert_eq!(kept.shape(), &[1, 2, 2]);
    assert_eq!(kept.to_vec::<f64>(), vec![7.0, 9.0, 9.0, 11.0]);

    assert!(client.sum(&t, &[3], false).is_err());
}

#[test]
fn test_matmul_and_gram() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);

    let gram = client.matmul(&a.t().unwrap(), &a).unwrap();
    assert_eq!(gram.shape(), &[2, 2]);
    assert_eq!(gram.to_vec::<f64>(), vec![35.0, 44.0, 44.0, 56.0]);

    assert!(client.matmul(&a, &a).is_err());
}

#[test]
fn test_matmul_parallel_rows() {
    let (client, device) = create_cpu_client();
    // Enough rows to take the parallel path when rayon is enabled
    let rows = 130;
    let a = Tensor::<CpuRuntime>::from_fn(&[rows, 3], &device, |idx| (idx[0] + idx[1]) as f64);
    let b = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 0.0, 1.0], &[3, 1], &device);

    let out = client.matmul(&a, &b).unwrap().to_vec::<f64>();
    let expected: Vec<f64> = (0..rows).map(|i| (2 * i + 2) as f64).collect();
    assert_allclose_f64(&out, &expected, 0.0, 0.0, "row sums");
}

#[test]
fn test_sqrt_abs() {
    let (client, device) = create_cpu_client();
    let t = Tensor::<CpuRuntime>::from_slice(&[-4.0f64, 9.0], &[2], &device);

    let out = client.sqrt(&client.abs(&t).unwrap()).unwrap();
    assert_eq!(out.to_vec::<f64>(), vec![2.0, 3.0]);

    let ints = Tensor::<CpuRuntime>::from_slice(&[4i64], &[1], &device);
    assert!(client.sqrt(&ints).is_err());
}

#[test]
fn test_randn_seeded() {
    let (client, _device) = create_cpu_client();

    let a = client.randn_seeded(&[64, 4], DType::F64, 42).unwrap();
    let b = client.randn_seeded(&[64, 4], DType::F64, 42).unwrap();
    let c = client.randn_seeded(&[64, 4], DType::F64, 43).unwrap();
    assert_eq!(a.to_vec::<f64>(), b.to_vec::<f64>());
    assert_ne!(a.to_vec::<f64>(), c.to_vec::<f64>());

    let values = a.to_vec::<f64>();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    assert!(mean.abs() < 0.5, "mean {mean}");

    assert_eq!(client.randn(&[3], DType::F32).unwrap().dtype(), DType::F32);
    assert!(client.randn(&[3], DType::I64).is_err());
}
