//! Test signal generation command.

use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tono_io::{WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "1000.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate a unit impulse followed by silence
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "44100")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "44100")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Sine {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            let len = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..len)
                .map(|n| (TAU * freq * n as f32 / sample_rate as f32).sin() * amplitude)
                .collect();
            write(&output, &samples, sample_rate)?;
            println!("Wrote {:.2}s sine at {freq} Hz to {}", duration, output.display());
        }
        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
        } => {
            let mut samples = vec![0.0_f32; length.max(1)];
            samples[0] = 1.0;
            write(&output, &samples, sample_rate)?;
            println!("Wrote {length}-sample impulse to {}", output.display());
        }
        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            let len = (duration * sample_rate as f32) as usize;
            let mut state = 0x1234_5678_u32;
            let samples: Vec<f32> = (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 17;
                    state ^= state << 5;
                    (state as i32 as f32) / (i32::MAX as f32) * amplitude
                })
                .collect();
            write(&output, &samples, sample_rate)?;
            println!("Wrote {:.2}s noise to {}", duration, output.display());
        }
    }
    Ok(())
}

fn write(path: &Path, samples: &[f32], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(path, samples, spec)?;
    Ok(())
}
