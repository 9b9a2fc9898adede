//! Integration tests for the linear algebra building blocks of CP-ALS
//!
//! Tests verify:
//! - solve: single and multiple right-hand sides, transposed views, singular input
//! - khatri_rao: row ordering and shape validation
//! - svd_decompose: reconstruction, descending singular values, orthonormal U

mod common;

use common::{assert_allclose_f64, create_cpu_client};
use cpals::prelude::*;

// ============================================================================
// solve
// ============================================================================

#[test]
fn test_solve_3x3() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(
        &[2.0f64, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0],
        &[3, 3],
        &device,
    );
    let b = Tensor::<CpuRuntime>::from_slice(&[8.0f64, -11.0, -3.0], &[3], &device);

    let x = client.solve(&a, &b).unwrap();
    assert_eq!(x.shape(), &[3]);
    assert_allclose_f64(&x.to_vec::<f64>(), &[2.0, 3.0, -1.0], 1e-12, 1e-12, "solve 3x3");
}

#[test]
fn test_solve_transposed_view() {
    let (client, device) = create_cpu_client();
    // aᵀ = [[1, 3], [2, 4]]
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0], &[2, 2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[7.0f64, 10.0], &[2, 1], &device);

    let x = client.solve(&a.t().unwrap(), &b).unwrap();
    assert_eq!(x.shape(), &[2, 1]);
    assert_allclose_f64(&x.to_vec::<f64>(), &[1.0, 2.0], 1e-12, 1e-12, "solve aᵀ");
}

#[test]
fn test_solve_singular() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(
        &[1.0f64, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 0.0, 1.0],
        &[3, 3],
        &device,
    );
    let b = Tensor::<CpuRuntime>::ones(&[3], DType::F64, &device);
    assert!(matches!(
        client.solve(&a, &b),
        Err(Error::SingularMatrix { op: "solve", .. })
    ));
}

#[test]
fn test_solve_validation() {
    let (client, device) = create_cpu_client();
    let square = Tensor::<CpuRuntime>::ones(&[2, 2], DType::F64, &device);
    let rect = Tensor::<CpuRuntime>::ones(&[2, 3], DType::F64, &device);
    let short = Tensor::<CpuRuntime>::ones(&[3], DType::F64, &device);
    let wrong_dtype = Tensor::<CpuRuntime>::ones(&[2], DType::F32, &device);

    assert!(client.solve(&rect, &short).is_err());
    assert!(client.solve(&square, &short).is_err());
    assert!(matches!(
        client.solve(&square, &wrong_dtype),
        Err(Error::DTypeMismatch { .. })
    ));
}

// ============================================================================
// khatri_rao
// ============================================================================

#[test]
fn test_khatri_rao_columns_are_kronecker_products() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2], &device);
    let b = Tensor::<CpuRuntime>::from_slice(&[1.0f64, -1.0, 2.0, 0.5], &[2, 2], &device);

    let kr = client.khatri_rao(&a, &b).unwrap();
    assert_eq!(kr.shape(), &[6, 2]);

    let kr = kr.to_vec::<f64>();
    let (a, b) = (a.to_vec::<f64>(), b.to_vec::<f64>());
    for i in 0..3 {
        for j in 0..2 {
            for r in 0..2 {
                assert_eq!(kr[(i * 2 + j) * 2 + r], a[i * 2 + r] * b[j * 2 + r]);
            }
        }
    }
}

#[test]
fn test_khatri_rao_rank_mismatch() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::ones(&[3, 2], DType::F64, &device);
    let b = Tensor::<CpuRuntime>::ones(&[3, 3], DType::F64, &device);
    assert!(client.khatri_rao(&a, &b).is_err());
}

// ============================================================================
// svd_decompose
// ============================================================================

#[test]
fn test_svd_orthonormal_u() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(
        &[4.0f64, 0.0, 3.0, -5.0, 1.0, 2.0, 0.0, 1.0, 1.0, 2.0, 2.0, 0.0],
        &[3, 4],
        &device,
    );

    let svd = client.svd_decompose(&a).unwrap();
    assert_eq!(svd.u.shape(), &[3, 3]);
    assert_eq!(svd.s.shape(), &[3]);
    assert_eq!(svd.vt.shape(), &[3, 4]);

    let s = svd.s.to_vec::<f64>();
    assert!(s.windows(2).all(|w| w[0] >= w[1]), "{s:?}");

    let utu = client.matmul(&svd.u.t().unwrap(), &svd.u).unwrap();
    assert_allclose_f64(
        &utu.to_vec::<f64>(),
        &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        1e-10,
        1e-10,
        "UᵀU",
    );

    let us = client.mul(&svd.u, &svd.s.unsqueeze(0).unwrap()).unwrap();
    let rebuilt = client.matmul(&us, &svd.vt).unwrap();
    assert_allclose_f64(
        &rebuilt.to_vec::<f64>(),
        &a.to_vec::<f64>(),
        1e-10,
        1e-10,
        "U diag(S) Vᵀ",
    );
}

#[test]
fn test_svd_rejects_integers() {
    let (client, device) = create_cpu_client();
    let a = Tensor::<CpuRuntime>::from_slice(&[1i64, 2, 3, 4], &[2, 2], &device);
    assert!(matches!(
        client.svd_decompose(&a),
        Err(Error::UnsupportedDType { .. })
    ));
}
