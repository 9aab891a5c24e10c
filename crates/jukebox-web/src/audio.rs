use web_sys as web;

/// WebAudio wiring for the looping track: media element -> gain -> analyser
/// -> destination. The gain is the volume-ramp target; the analyser feeds
/// the bloom pass.
pub struct AudioGraph {
    pub ctx: web::AudioContext,
    pub gain: web::GainNode,
    pub analyser: Option<web::AnalyserNode>,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => Err(anyhow::anyhow!("{label} GainNode error: {e:?}")),
    }
}

pub fn build_graph(media: &web::HtmlMediaElement) -> anyhow::Result<AudioGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext error: {e:?}"))?;

    let source = ctx
        .create_media_element_source(media)
        .map_err(|e| anyhow::anyhow!("media source error: {e:?}"))?;

    // Volume starts at silence; the frame loop ramps it up.
    let gain = create_gain(&ctx, 0.0, "master")?;
    let _ = source.connect_with_audio_node(&gain);
    let _ = gain.connect_with_audio_node(&ctx.destination());

    // Analyser taps the post-gain signal. Missing analyser support just
    // means zero loudness, so this is optional rather than fatal.
    let analyser = match ctx.create_analyser() {
        Ok(a) => {
            a.set_fft_size(128);
            let _ = gain.connect_with_audio_node(&a);
            Some(a)
        }
        Err(e) => {
            log::warn!("[audio] AnalyserNode unavailable: {e:?}");
            None
        }
    };

    media.set_loop(true);

    Ok(AudioGraph { ctx, gain, analyser })
}

/// Rolling average of the byte frequency spectrum, 0 when no analyser or no
/// data yet. Matches the analyser's own 0-255 bin scale; the core divides by
/// the reference loudness.
pub fn average_loudness(analyser: &Option<web::AnalyserNode>, buf: &mut Vec<u8>) -> f32 {
    let Some(a) = analyser else {
        return 0.0;
    };
    let bins = a.frequency_bin_count() as usize;
    if bins == 0 {
        return 0.0;
    }
    if buf.len() != bins {
        buf.resize(bins, 0);
    }
    a.get_byte_frequency_data(buf);
    let sum: u32 = buf.iter().map(|&v| v as u32).sum();
    sum as f32 / bins as f32
}
