//! WAV file I/O for the tono equalizer.
//!
//! Thin layer over [`hound`] that always hands audio to the rest of the
//! workspace as `f32` samples: [`read_wav`] / [`write_wav`] for mono
//! buffers, [`read_wav_stereo`] / [`write_wav_stereo`] for deinterleaved
//! stereo pairs. Integer PCM files are converted on the way in and out.

mod wav;

pub use wav::{
    StereoBuffer, WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, read_wav_stereo,
    write_wav, write_wav_stereo,
};

/// Error types for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
