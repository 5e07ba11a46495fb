//! File-based equalizer processing command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tono_eq::{EqParams, EqProcessor, params};
use tono_io::{StereoBuffer, read_wav, read_wav_stereo, write_wav, write_wav_stereo};

use crate::preset::Preset;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset file (TOML)
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Parameter override (e.g., "lowGain=6.0"), repeatable
    #[arg(short, long, value_parser = parse_param, number_of_values = 1)]
    set: Vec<(String, f32)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

fn parse_param(s: &str) -> Result<(String, f32), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format: '{s}' (expected id=value)"))?;
    if params::index_of(id).is_none() {
        return Err(format!("unknown parameter id: '{id}'"));
    }
    let value: f32 = value
        .parse()
        .map_err(|_| format!("invalid value for '{id}': '{value}'"))?;
    Ok((id.to_string(), value))
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        anyhow::bail!("bit depth must be 16, 24, or 32");
    }

    let shared = Arc::new(EqParams::new());
    if let Some(preset_path) = &args.preset {
        let text = std::fs::read_to_string(preset_path)?;
        let preset = Preset::from_toml(&text)?;
        println!("Loading preset: {}", preset.name);
        preset.apply(&shared);
    }
    for (id, value) in &args.set {
        shared.set_by_id(id, *value);
    }

    println!("Reading {}...", args.input.display());
    let info = tono_io::read_wav_info(&args.input)?;
    println!(
        "  {} frames, {} ch, {} Hz, {:.2}s",
        info.num_frames, info.channels, info.sample_rate, info.duration_secs
    );

    let mut eq = EqProcessor::new(shared);

    if info.channels == 1 {
        let (mut samples, mut spec) = read_wav(&args.input)?;
        eq.prepare(spec.sample_rate as f32, args.block_size);
        let pb = progress_bar(samples.len() as u64);
        let stats_in = Stats::measure(&samples);
        for (i, chunk) in samples.chunks_mut(args.block_size).enumerate() {
            eq.process(&mut [chunk], 1);
            pb.set_position(((i + 1) * args.block_size) as u64);
        }
        pb.finish_with_message("done");
        print_stats(&stats_in, &Stats::measure(&samples));
        spec.bits_per_sample = args.bit_depth;
        write_wav(&args.output, &samples, spec)?;
    } else {
        let (mut stereo, mut spec) = read_wav_stereo(&args.input)?;
        eq.prepare(spec.sample_rate as f32, args.block_size);
        let pb = progress_bar(stereo.len() as u64);
        let stats_in = stereo_stats(&stereo);
        let StereoBuffer { left, right } = &mut stereo;
        for (i, (l, r)) in left
            .chunks_mut(args.block_size)
            .zip(right.chunks_mut(args.block_size))
            .enumerate()
        {
            eq.process(&mut [l, r], 2);
            pb.set_position(((i + 1) * args.block_size) as u64);
        }
        pb.finish_with_message("done");
        print_stats(&stats_in, &stereo_stats(&stereo));
        spec.bits_per_sample = args.bit_depth;
        write_wav_stereo(&args.output, &stereo, spec)?;
    }

    println!("Wrote {}", args.output.display());
    Ok(())
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

struct Stats {
    rms: f32,
    peak: f32,
}

impl Stats {
    fn measure(samples: &[f32]) -> Self {
        let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
        Self {
            rms: (sum_sq / samples.len().max(1) as f32).sqrt(),
            peak: samples.iter().fold(0.0_f32, |acc, s| acc.max(s.abs())),
        }
    }
}

fn stereo_stats(stereo: &StereoBuffer) -> Stats {
    let left = Stats::measure(&stereo.left);
    let right = Stats::measure(&stereo.right);
    Stats {
        rms: ((left.rms * left.rms + right.rms * right.rms) / 2.0).sqrt(),
        peak: left.peak.max(right.peak),
    }
}

fn print_stats(input: &Stats, output: &Stats) {
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        to_db(input.rms),
        to_db(input.peak)
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        to_db(output.rms),
        to_db(output.peak)
    );
}

fn to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}
