//! Deterministic stand-ins used when a provider has no credential.
//! Same input, same output: the dashboard stays demoable offline.

use super::text::CopyBrief;

pub const PLACEHOLDER_CONTENT_TYPE: &str = "image/svg+xml";

const COPY_TEMPLATES: [&str; 5] = [
    "{product}, made for {segment}. CasaVida brings {tone} comfort home this season.",
    "Your home deserves better. Discover the {product} that {segment} love, with free delivery.",
    "Less hassle, more living: the {product} from CasaVida, picked for {segment}.",
    "Come back to CasaVida. A {tone} welcome and 10% off the {product} is waiting for you.",
    "Built to last, priced to move. See why {segment} choose our {product}.",
];

pub fn copy_variations(brief: &CopyBrief) -> Vec<String> {
    COPY_TEMPLATES
        .iter()
        .take(brief.variation_count())
        .map(|t| {
            t.replace("{product}", brief.product.trim())
                .replace("{segment}", brief.segment.trim())
                .replace("{tone}", &brief.tone.trim().to_lowercase())
        })
        .collect()
}

/// A 1024x1024 SVG card carrying the prompt text.
pub fn placeholder_image(prompt: &str) -> String {
    let caption = xml_escape(&prompt.chars().take(120).collect::<String>());
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="1024" height="1024" viewBox="0 0 1024 1024"><rect width="1024" height="1024" fill="#f4efe6"/><rect x="64" y="64" width="896" height="896" rx="32" fill="none" stroke="#8a6d4b" stroke-width="6"/><text x="512" y="470" font-family="Georgia, serif" font-size="56" text-anchor="middle" fill="#5b4632">CasaVida</text><text x="512" y="560" font-family="Helvetica, sans-serif" font-size="24" text-anchor="middle" fill="#5b4632">{caption}</text></svg>"##
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, no padding, no CRC.
const MP3_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const MP3_FRAME_LEN: usize = 417;
const CHARS_PER_FRAME: usize = 12;
const MAX_FRAMES: usize = 400;

/// Silent MP3 whose length grows with the text (about 26 ms per frame).
pub fn silent_mp3(text: &str) -> Vec<u8> {
    let frames = (text.chars().count() / CHARS_PER_FRAME).clamp(1, MAX_FRAMES);
    let mut out = Vec::with_capacity(frames * MP3_FRAME_LEN);
    for _ in 0..frames {
        out.extend_from_slice(&MP3_FRAME_HEADER);
        out.resize(out.len() + MP3_FRAME_LEN - MP3_FRAME_HEADER.len(), 0);
    }
    out
}
