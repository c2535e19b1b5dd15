use anyhow::{ensure, Result};
use clap::Parser;

use cutout_rs::{manifest, BatchRunner, Config};

fn main() -> Result<()> {
    let config = Config::parse();

    println!("{}", "=".repeat(60));
    println!("🎨 Background Removal Tool");
    println!("{}", "=".repeat(60));

    ensure!(
        config.model_path.exists(),
        "Model path does not exist: {}",
        config.model_path.display()
    );

    println!("\nOutput directory: {}", config.output_dir.display());

    let output_dir = config.output_dir.clone();
    let runner = BatchRunner::with_onnx_model(config)?;
    let summary = runner.run(manifest::CUTOUT_TARGETS)?;

    // per-file failures are already tallied; the run itself still exits zero
    println!("\n{summary}");
    println!("\nCutout images saved to: {}", output_dir.display());

    Ok(())
}
