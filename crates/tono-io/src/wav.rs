//! WAV file reading and writing.

use crate::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::io::Read;
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels);

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
        format: match spec.sample_format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        },
    })
}

/// WAV file specification.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            // 32-bit is written as float, everything narrower as PCM.
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// A stereo buffer stored as two separate channel vectors.
#[derive(Debug, Clone, Default)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Creates a buffer from separate channel vectors.
    #[must_use]
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        Self { left, right }
    }

    /// Duplicates a mono signal onto both channels.
    #[must_use]
    pub fn from_mono(samples: Vec<f32>) -> Self {
        let right = samples.clone();
        Self {
            left: samples,
            right,
        }
    }

    /// Deinterleaves `L R L R ...` frames.
    #[must_use]
    pub fn from_interleaved(frames: &[f32]) -> Self {
        let mut left = Vec::with_capacity(frames.len() / 2);
        let mut right = Vec::with_capacity(frames.len() / 2);
        for frame in frames.chunks_exact(2) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
        Self { left, right }
    }

    /// Number of sample frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// Whether the buffer holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode all samples to f32, normalizing integer PCM to `[-1, 1)`.
fn decode_samples<R: Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };
    Ok(samples)
}

/// Read a WAV file as a mono f32 buffer along with its spec.
///
/// Multi-channel files are mixed down by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    let samples = decode_samples(reader)?;

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}

/// Read a WAV file as a stereo buffer along with its spec.
///
/// Mono files are duplicated onto both channels; files with more than two
/// channels keep only the first two.
pub fn read_wav_stereo<P: AsRef<Path>>(path: P) -> Result<(StereoBuffer, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    let samples = decode_samples(reader)?;

    let stereo = match channels {
        1 => StereoBuffer::from_mono(samples),
        2 => StereoBuffer::from_interleaved(&samples),
        _ => {
            let frames = samples.len() / channels;
            let mut left = Vec::with_capacity(frames);
            let mut right = Vec::with_capacity(frames);
            for frame in samples.chunks(channels) {
                left.push(frame[0]);
                right.push(frame[1]);
            }
            StereoBuffer::new(left, right)
        }
    };

    Ok((stereo, spec))
}

fn write_samples<W>(
    writer: &mut WavWriter<W>,
    samples: impl Iterator<Item = f32>,
    bits_per_sample: u16,
) -> Result<()>
where
    W: std::io::Write + std::io::Seek,
{
    if bits_per_sample == 32 {
        for sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i32 << (bits_per_sample - 1)) as f32;
        for sample in samples {
            let quantized = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(quantized)?;
        }
    }
    Ok(())
}

/// Write a mono f32 buffer to a WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let mut mono_spec = spec;
    mono_spec.channels = 1;
    let mut writer = WavWriter::create(path, hound::WavSpec::from(mono_spec))?;
    write_samples(&mut writer, samples.iter().copied(), spec.bits_per_sample)?;
    writer.finalize()?;
    Ok(())
}

/// Write a stereo buffer to a WAV file, interleaving the channels.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoBuffer,
    spec: WavSpec,
) -> Result<()> {
    let mut stereo_spec = spec;
    stereo_spec.channels = 2;
    let mut writer = WavWriter::create(path, hound::WavSpec::from(stereo_spec))?;
    let interleaved = samples
        .left
        .iter()
        .zip(&samples.right)
        .flat_map(|(&l, &r)| [l, r]);
    write_samples(&mut writer, interleaved, spec.bits_per_sample)?;
    writer.finalize()?;
    Ok(())
}
