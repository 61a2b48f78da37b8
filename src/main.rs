use clap::Parser;
use hstretch::cli::Args;
use hstretch::error::ProcessError;
use hstretch::memory::Ram;
use hstretch::testbench::Testbench;
use hstretch::types::Byte;
use hstretch::{display, frame, stretch};

fn main() {
    let args = Args::parse();

    if let Err(e) = process_file(&args) {
        println!("Error: {e}");
        std::process::exit(exit_code(&e));
    }
}

/// 2 when the controller itself misbehaved, 1 for every other failure
fn exit_code(error: &ProcessError) -> i32 {
    if error.is_simulation_fault() { 2 } else { 1 }
}

/// Stretch one image file through the simulated controller
fn process_file(args: &Args) -> Result<(), ProcessError> {
    // Stage 1: Decode to 8-bit grayscale
    let original = frame::load_grayscale(&args.input, args.fit)
        .map_err(ProcessError::LoadFailed)?;

    // Stage 2: Lay the image out in controller memory
    let dimensions = frame::check_layout(&original).map_err(ProcessError::Layout)?;
    let pixels = original.as_raw();
    let mut bench = Testbench::new(Ram::with_image(dimensions, pixels)).with_trace(args.trace);

    // Stage 3: Clock the controller through every pass
    for pass in 1..=args.passes {
        let report = bench
            .run_pass(args.max_ticks)
            .map_err(|error| ProcessError::SimulationFailed { pass, error })?;

        if args.verbose {
            hstretch::print_report(pass, &report);
        }
    }

    // Stage 4: Cross-check against the reference model
    let actual = bench.output_pixels();
    verify_output(&stretch::stretch(pixels).pixels, &actual)?;

    // Stage 5: Save
    let stretched = frame::to_image(dimensions, actual).map_err(ProcessError::SaveFailed)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| frame::default_output_path(&args.input));
    frame::save(&stretched, &output).map_err(ProcessError::SaveFailed)?;

    if args.verbose {
        println!("{:20}: {}", "Output", output.display());
    }

    // Stage 6: Display
    if args.show {
        display::print_comparison(&original, &stretched).map_err(ProcessError::DisplayFailed)?;
    }

    Ok(())
}

fn verify_output(expected: &[Byte], actual: &[Byte]) -> Result<(), ProcessError> {
    if expected.len() != actual.len() {
        return Err(ProcessError::LengthMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    match expected.iter().zip(actual).position(|(e, a)| e != a) {
        Some(index) => Err(ProcessError::Mismatch {
            index,
            expected: expected[index],
            actual: actual[index],
        }),
        None => Ok(()),
    }
}
