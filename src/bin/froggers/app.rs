//! Audio device setup and the realtime callback

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use froggers::{EngineConfig, Froggers, KnobPages, ToneStage, MAX_BLOCK_SIZE};

use super::control::ControlLoop;

/// Input samples buffered between the input and output callbacks
const INPUT_QUEUE_SIZE: usize = 8 * MAX_BLOCK_SIZE;

/// Open the default devices, start the engine and hand the terminal to the
/// control loop until it quits.
pub fn run<T: ToneStage + 'static>(mut config: EngineConfig) -> EyreResult<()> {
    let host = cpal::default_host();
    let output = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let output_config = output
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let device_rate = output_config.sample_rate().0 as f32;
    if device_rate != config.sample_rate {
        tracing::info!(
            configured = config.sample_rate,
            device = device_rate,
            "using the output device sample rate"
        );
        config.sample_rate = device_rate;
    }
    let channels = output_config.channels() as usize;
    let block_size = config.block_size;

    let (mut engine, handle) = Froggers::<T>::new(&config)?;
    let modulation = engine.modulation();

    // Input arrives on its own callback; forward channel 0 through a ring
    let (mut input_tx, mut input_rx) = RingBuffer::<f32>::new(INPUT_QUEUE_SIZE);
    let input_stream = match host.default_input_device() {
        Some(device) => {
            let input_config = device
                .default_input_config()
                .wrap_err("failed to fetch default input config")?;
            let input_channels = input_config.channels() as usize;
            let stream = device.build_input_stream(
                &input_config.into(),
                move |data: &[f32], _| {
                    for frame in data.chunks(input_channels) {
                        // Overruns drop samples; the output side reads silence
                        let _ = input_tx.push(frame[0]);
                    }
                },
                |err| tracing::error!("input stream error: {}", err),
                None,
            )?;
            Some(stream)
        }
        None => {
            tracing::warn!("no default input device, processing silence");
            None
        }
    };

    let mut input_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut left_buf = vec![0.0f32; MAX_BLOCK_SIZE];
    let mut right_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let output_stream = output.build_output_stream(
        &output_config.into(),
        move |data: &mut [f32], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames = (total_frames - frames_written).min(block_size);

                let input = &mut input_buf[..frames];
                for sample in input.iter_mut() {
                    *sample = input_rx.pop().unwrap_or(0.0);
                }

                let left = &mut left_buf[..frames];
                let right = &mut right_buf[..frames];
                engine.process_block(input, left, right);

                // Channel 0 carries the effect, channel 1 the engine's
                // silent companion, anything beyond is zeroed
                let out_off = frames_written * channels;
                for i in 0..frames {
                    let frame = &mut data[out_off + i * channels..out_off + (i + 1) * channels];
                    for (ch, out) in frame.iter_mut().enumerate() {
                        *out = match ch {
                            0 => left[i],
                            1 => right[i],
                            _ => 0.0,
                        };
                    }
                }

                frames_written += frames;
            }
        },
        |err| tracing::error!("output stream error: {}", err),
        None,
    )?;

    if let Some(stream) = &input_stream {
        stream.play()?;
    }
    output_stream.play()?;

    tracing::info!(
        sample_rate = config.sample_rate,
        channels,
        block_size,
        "audio running"
    );

    ControlLoop::new(handle, KnobPages::for_stage::<T>(), T::LABELS, modulation).run()
}
