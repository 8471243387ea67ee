//! Sample format conversion: native decoded buffers to interleaved f32.

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::conv::FromSample;
use symphonia::core::sample::Sample;

/// Convert a decoded buffer of any supported sample format and layout into
/// interleaved f32 samples in [-1.0, 1.0].
///
/// Decoders hand back planar buffers in whatever width the codec produced
/// (u8 through f64); the canonical representation downstream is always
/// interleaved float, so every arm funnels into the same interleaving walk.
pub(crate) fn interleaved_f32(decoded: &AudioBufferRef<'_>) -> Vec<f32> {
    match decoded {
        AudioBufferRef::U8(buf) => interleave(&**buf),
        AudioBufferRef::U16(buf) => interleave(&**buf),
        AudioBufferRef::U24(buf) => interleave(&**buf),
        AudioBufferRef::U32(buf) => interleave(&**buf),
        AudioBufferRef::S8(buf) => interleave(&**buf),
        AudioBufferRef::S16(buf) => interleave(&**buf),
        AudioBufferRef::S24(buf) => interleave(&**buf),
        AudioBufferRef::S32(buf) => interleave(&**buf),
        AudioBufferRef::F32(buf) => interleave(&**buf),
        AudioBufferRef::F64(buf) => interleave(&**buf),
    }
}

fn interleave<S>(buf: &AudioBuffer<S>) -> Vec<f32>
where
    S: Sample,
    f32: FromSample<S>,
{
    let channels = buf.spec().channels.count();
    let frames = buf.frames();
    let mut out = Vec::with_capacity(frames * channels);

    for frame in 0..frames {
        for channel in 0..channels {
            out.push(f32::from_sample(buf.chan(channel)[frame]));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::audio::SignalSpec;

    fn stereo_buffer_i16(left: &[i16], right: &[i16]) -> AudioBuffer<i16> {
        let spec = SignalSpec::new(44100, symphonia::core::audio::Channels::FRONT_LEFT | symphonia::core::audio::Channels::FRONT_RIGHT);
        let mut buf = AudioBuffer::new(left.len() as u64, spec);
        buf.render_reserved(Some(left.len()));
        buf.chan_mut(0).copy_from_slice(left);
        buf.chan_mut(1).copy_from_slice(right);
        buf
    }

    #[test]
    fn planar_i16_interleaves_and_normalizes() {
        let buf = stereo_buffer_i16(&[0, 16384, -16384], &[32767, 0, -32768]);
        let samples = interleave(&buf);

        assert_eq!(samples.len(), 6);
        // Interleaved LRLRLR
        assert_eq!(samples[0], 0.0);
        assert!((samples[1] - 32767.0 / 32768.0).abs() < 1e-6);
        assert_eq!(samples[2], 0.5);
        assert_eq!(samples[3], 0.0);
        assert_eq!(samples[4], -0.5);
        assert_eq!(samples[5], -1.0);
    }

    #[test]
    fn float_input_passes_through() {
        let spec = SignalSpec::new(48000, symphonia::core::audio::Channels::FRONT_LEFT);
        let mut buf: AudioBuffer<f32> = AudioBuffer::new(4, spec);
        buf.render_reserved(Some(4));
        buf.chan_mut(0).copy_from_slice(&[0.25, -0.25, 1.0, -1.0]);

        assert_eq!(interleave(&buf), vec![0.25, -0.25, 1.0, -1.0]);
    }
}
