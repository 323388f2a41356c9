/// Minimal ANSI color helpers for the REPL.

pub const RESET: &str = "\x1b[0m";

pub fn fg_rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Split a `0xRRGGBB` body color into channels.
pub fn rgb_from_hex(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xff) as u8,
        ((color >> 8) & 0xff) as u8,
        (color & 0xff) as u8,
    )
}

pub fn paint_fg(text: impl AsRef<str>, (r, g, b): (u8, u8, u8)) -> String {
    format!("{}{}{}", fg_rgb(r, g, b), text.as_ref(), RESET)
}

pub fn scale_rgb((r, g, b): (u8, u8, u8), factor: f32) -> (u8, u8, u8) {
    fn scale_u8(v: u8, factor: f32) -> u8 {
        let scaled = (f32::from(v) * factor).round();
        scaled.clamp(0.0, 255.0) as u8
    }

    (scale_u8(r, factor), scale_u8(g, factor), scale_u8(b, factor))
}
