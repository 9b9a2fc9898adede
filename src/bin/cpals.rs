//! Decompose the index-sum tensor at rank 2 and print weights and factors
//!
//! Set `RUST_LOG=cpals=debug` to trace the ALS sweeps on stderr.

use cpals::error::Result;
use cpals::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);

    let tensor = build_index_sum_tensor::<CpuRuntime>(&device);
    let cp = client.cp_decompose(&tensor, CP_RANK, &CpOptions::default())?;

    println!("{}", format_decomposition(&cp));

    Ok(())
}

/// Weights on the first line, then the factor list
fn format_decomposition<R: Runtime>(cp: &CpDecomposition<R>) -> String {
    format!("{}\n{}", cp.weights, format_factors(&cp.factors))
}

/// Bracketed list of matrices, inner lines indented under the outer bracket
fn format_factors<R: Runtime>(factors: &[Tensor<R>]) -> String {
    let items: Vec<String> = factors
        .iter()
        .map(|f| f.to_string().replace('\n', "\n "))
        .collect();
    format!("[{}]", items.join(",\n "))
}
