use once_cell::sync::Lazy;
use regex::Regex;

use crate::timestamp_aligner::TimedCue;

// @module: ASS subtitle file rendering

/// Title used when the caller passes a blank title.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Fixed target canvas, matching the downstream video resolution.
const PLAY_RES_X: u32 = 1920;
const PLAY_RES_Y: u32 = 1080;

/// Style name used by every dialogue line.
const DIALOGUE_STYLE: &str = "Default";

// Inline override for the emphasized keyword: orange primary color plus
// bold, reset back to the style defaults afterwards.
const EMPHASIS_OVERRIDE: &str = r"{\1c&H00A5FF&\b1}";
const EMPHASIS_RESET: &str = r"{\r}";

// First run of 2-4 contiguous CJK ideographs.
static CJK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{4E00}-\x{9FFF}]{2,4}").expect("CJK run pattern is valid"));

/// Serializes timed cues into an ASS (Advanced SubStation Alpha) document.
///
/// The header block is fixed apart from the title: one canvas size, one
/// events format, and exactly two style records (`Default` for dialogue,
/// `Highlight` reserved for emphasized spans). Consumers parse the
/// `Dialogue:` lines positionally, so the field layout and the
/// centisecond-precision time format are exact contracts.
#[derive(Debug, Default)]
pub struct SubtitleRenderer;

impl SubtitleRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        SubtitleRenderer
    }

    /// Render cues into a complete ASS document. Never fails; a blank
    /// title falls back to [`DEFAULT_TITLE`].
    pub fn render(&self, cues: &[TimedCue], title: &str) -> String {
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            title
        };

        let mut output = render_header(title);
        for cue in cues {
            output.push_str(&render_dialogue_line(cue));
            output.push('\n');
        }

        output
    }
}

/// Fixed header block: script info, the two style records, and the
/// events format line.
fn render_header(title: &str) -> String {
    format!(
        "[Script Info]\n\
         Title: {title}\n\
         ScriptType: v4.00+\n\
         WrapStyle: 0\n\
         ScaledBorderAndShadow: yes\n\
         PlayResX: {PLAY_RES_X}\n\
         PlayResY: {PLAY_RES_Y}\n\
         \n\
         [V4+ Styles]\n\
         Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding\n\
         Style: Default,思源黑体,72,&H00FFFFFF,&H000000FF,&H00000000,&H80000000,0,0,0,0,100,100,0,0,1,3,1,2,60,60,80,1\n\
         Style: Highlight,思源黑体,72,&H0000A5FF,&H000000FF,&H00000000,&H80000000,-1,0,0,0,100,100,0,0,1,3,1,2,60,60,80,1\n\
         \n\
         [Events]\n\
         Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n"
    )
}

/// One positional dialogue record for a cue.
fn render_dialogue_line(cue: &TimedCue) -> String {
    let text = emphasize_keyword(&escape_text(&cue.text));
    format!(
        "Dialogue: 0,{start},{end},{style},,0,0,0,,{text}",
        start = format_ass_timestamp(cue.start_time),
        end = format_ass_timestamp(cue.end_time),
        style = DIALOGUE_STYLE,
    )
}

/// Format seconds as an ASS timestamp (`H:MM:SS.CC`, unbounded hours,
/// floored to centiseconds).
pub fn format_ass_timestamp(seconds: f64) -> String {
    let total_cs = (seconds.max(0.0) * 100.0).floor() as u64;
    let hours = total_cs / 360_000;
    let minutes = (total_cs % 360_000) / 6_000;
    let secs = (total_cs % 6_000) / 100;
    let centis = total_cs % 100;

    format!("{}:{:02}:{:02}.{:02}", hours, minutes, secs, centis)
}

/// Escape quote characters in cue text. Straight and curly double quotes
/// both become a backslash-quote sequence.
fn escape_text(text: &str) -> String {
    text.replace('"', "\\\"")
        .replace('“', "\\\"")
        .replace('”', "\\\"")
}

/// Best-effort keyword emphasis: the first run of 2-4 contiguous CJK
/// ideographs is wrapped in an inline color+bold override, but only when
/// that run occurs exactly once in the text. This is a display heuristic,
/// not named-entity recognition; it may pick an arbitrary word.
fn emphasize_keyword(text: &str) -> String {
    let Some(run) = CJK_RUN.find(text) else {
        return text.to_string();
    };

    let keyword = run.as_str();
    if text.match_indices(keyword).count() != 1 {
        return text.to_string();
    }

    format!(
        "{}{}{}{}{}",
        &text[..run.start()],
        EMPHASIS_OVERRIDE,
        keyword,
        EMPHASIS_RESET,
        &text[run.end()..]
    )
}
