//! CPU implementation of unary operations.

use crate::error::Result;
use crate::ops::{UnaryOp, UnaryOps};
use crate::runtime::cpu::{
    CpuClient, CpuRuntime,
    helpers::{ensure_float, unary_op_impl},
};
use crate::tensor::Tensor;

impl UnaryOps<CpuRuntime> for CpuClient {
    fn abs(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        unary_op_impl(self, UnaryOp::Abs, a)
    }

    fn sqrt(&self, a: &Tensor<CpuRuntime>) -> Result<Tensor<CpuRuntime>> {
        ensure_float(a.dtype(), "sqrt")?;
        unary_op_impl(self, UnaryOp::Sqrt, a)
    }
}
