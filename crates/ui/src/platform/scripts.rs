use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use dioxus::document::eval;
use serde::Deserialize;

/// What the bridge scripts report back.
#[derive(Clone, Debug, Deserialize)]
struct ScriptOutcome {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl ScriptOutcome {
    fn into_result(self) -> Result<(), String> {
        if self.ok {
            Ok(())
        } else {
            Err(self.error.unwrap_or_else(|| "script failed".to_string()))
        }
    }
}

const PLAY_PCM_SCRIPT_TEMPLATE: &str = r#"
    try {
        const Ctx = window.AudioContext || window.webkitAudioContext;
        if (!Ctx) { return { ok: false, error: "audio unavailable" }; }
        const ctx = window.__quizAudio || (window.__quizAudio = new Ctx());
        if (ctx.state === "suspended") { await ctx.resume(); }
        const bytes = Uint8Array.from(atob("{payload}"), (c) => c.charCodeAt(0));
        const pcm = new Int16Array(bytes.buffer);
        const buffer = ctx.createBuffer(1, pcm.length, {sample_rate});
        const channel = buffer.getChannelData(0);
        for (let i = 0; i < pcm.length; i++) {
            channel[i] = pcm[i] / 32768;
        }
        const source = ctx.createBufferSource();
        source.buffer = buffer;
        source.connect(ctx.destination);
        await new Promise((resolve) => {
            source.onended = resolve;
            source.start();
        });
        return { ok: true };
    } catch (err) {
        return { ok: false, error: String(err) };
    }
"#;

const CONFETTI_SCRIPT: &str = r##"
    if (typeof window.confetti !== "function") { return { ok: false, error: "confetti unavailable" }; }
    try {
        window.confetti({
            particleCount: 150,
            spread: 90,
            origin: { y: 0.6 },
            colors: ["#00BFFF", "#1E90FF", "#FFD700"]
        });
        return { ok: true };
    } catch (err) {
        return { ok: false, error: String(err) };
    }
"##;

const TYPESET_SCRIPT: &str = r#"
    const mj = window.MathJax;
    if (mj && typeof mj.typesetPromise === "function") {
        try {
            if (typeof mj.typesetClear === "function") { mj.typesetClear(); }
            await mj.typesetPromise();
        } catch (err) {}
    }
    return true;
"#;

/// Samples as base64 little-endian PCM16, the same layout the TTS service returns.
#[must_use]
pub fn encode_pcm16_base64(samples: &[f32]) -> String {
    let bytes: Vec<u8> = samples
        .iter()
        .flat_map(|sample| {
            #[allow(clippy::cast_possible_truncation)]
            let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            value.to_le_bytes()
        })
        .collect();
    STANDARD.encode(bytes)
}

pub(crate) fn play_pcm_script(payload: &str, sample_rate: u32) -> String {
    PLAY_PCM_SCRIPT_TEMPLATE
        .replace("{payload}", payload)
        .replace("{sample_rate}", &sample_rate.to_string())
}

/// Play PCM inside the WebView and wait for it to end.
///
/// Resolves to the JS-side error message on failure.
pub(crate) async fn play_pcm(samples: &[f32], sample_rate: u32) -> Result<(), String> {
    let script = play_pcm_script(&encode_pcm16_base64(samples), sample_rate);
    eval(&script)
        .join::<ScriptOutcome>()
        .await
        .map_err(|err| err.to_string())?
        .into_result()
}

pub(crate) async fn fire_confetti() -> Result<(), String> {
    eval(CONFETTI_SCRIPT)
        .join::<ScriptOutcome>()
        .await
        .map_err(|err| err.to_string())?
        .into_result()
}

/// Re-typeset math on the page if MathJax has loaded; otherwise a no-op.
pub async fn typeset_math() {
    let _ = eval(TYPESET_SCRIPT).await;
}

pub fn focus_element(element_id: &str) {
    let _ = eval(&format!("document.getElementById({element_id:?})?.focus();"));
}
