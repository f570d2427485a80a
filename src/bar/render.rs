//! Cairo/Pango text and box rendering for one bar segment list.
//!
//! The original rasterizes glyphs itself against an XCB pixmap through
//! `Drw`/`drw_text`; here that work is delegated to `cairo-rs`'s image
//! surface and `pangocairo` for font shaping, matching the stack already
//! pulled in for the popup menu. The finished frame is a raw Z-pixmap
//! buffer the caller hands to `XConn::put_image` — nothing in this module
//! talks to the X server directly, so it is exercised the same way
//! whether the connection behind it is x11rb or a test mock.

use cairo::{Format, ImageSurface};
use pangocairo::functions::{create_layout, show_layout};
use pangocairo::pango;

use crate::color::{Color, ColorScheme};

use super::Segment;

/// Render one bar's worth of segments and return the resulting frame as a
/// `width * height * 4` byte buffer in the host's native-endian 32-bit
/// Z-pixmap layout (cairo's `ARgb32` format and X's depth-24 `ZPixmap`
/// share byte order on every platform this crate targets, so the buffer
/// is handed to `put_image` unmodified — the alpha byte lands in the
/// pixmap's unused pad byte).
pub fn draw_to_buffer(width: u32, height: u32, font: &str, segments: &[Segment], scheme: ColorScheme, tag_scheme: impl Fn(&super::TagState) -> ColorScheme) -> Result<Vec<u8>, cairo::Error> {
    let mut surface = ImageSurface::create(Format::ARgb32, width.max(1) as i32, height.max(1) as i32)?;
    {
        let cr = cairo::Context::new(&surface)?;

        fill_rect(&cr, scheme.bg, 0.0, 0.0, width as f64, height as f64);

        let mut x = 0.0f64;
        for seg in segments {
            match seg {
                Segment::Tags { labels } => {
                    for tag in labels {
                        let sch = tag_scheme(tag);
                        let w = draw_text_box(&cr, font, &format!(" {} ", tag.index + 1), x, height as f64, sch, tag.urgent);
                        x += w;
                    }
                }
                Segment::LayoutSymbol(sym) => {
                    x += draw_text_box(&cr, font, &format!(" {sym} "), x, height as f64, scheme, false);
                }
                Segment::Title(title) => {
                    x += draw_text_box(&cr, font, title, x, height as f64, scheme, false);
                }
                Segment::Status(status) => {
                    let w = text_width(&cr, font, status);
                    draw_text_box(&cr, font, status, width as f64 - w, height as f64, scheme, false);
                }
                Segment::TraySlot { width: tw } => {
                    x += *tw as f64;
                }
            }
        }
    }
    surface.flush();

    let stride = surface.stride() as usize;
    let data = surface.data()?;
    if stride == width as usize * 4 {
        Ok(data.to_vec())
    } else {
        // Pad rows never happen for ARgb32 (stride is always width * 4),
        // but fall back to a row-by-row copy rather than assume it.
        let mut out = Vec::with_capacity(width as usize * 4 * height as usize);
        for row in data.chunks(stride) {
            out.extend_from_slice(&row[..(width as usize * 4).min(row.len())]);
        }
        Ok(out)
    }
}

fn fill_rect(cr: &cairo::Context, color: Color, x: f64, y: f64, w: f64, h: f64) {
    cr.set_source_rgb(color.r as f64 / 65535.0, color.g as f64 / 65535.0, color.b as f64 / 65535.0);
    cr.rectangle(x, y, w, h);
    let _ = cr.fill();
}

fn text_width(cr: &cairo::Context, font: &str, text: &str) -> f64 {
    let layout = create_layout(cr);
    layout.set_text(text);
    let desc = pango::FontDescription::from_string(font);
    layout.set_font_description(Some(&desc));
    layout.pixel_size().0 as f64 + 16.0
}

fn draw_text_box(cr: &cairo::Context, font: &str, text: &str, x: f64, height: f64, scheme: ColorScheme, urgent: bool) -> f64 {
    let w = text_width(cr, font, text);
    let bg = if urgent { scheme.border } else { scheme.bg };
    fill_rect(cr, bg, x, 0.0, w, height);

    let layout = create_layout(cr);
    layout.set_text(text);
    let desc = pango::FontDescription::from_string(font);
    layout.set_font_description(Some(&desc));

    cr.save().ok();
    cr.translate(x + 8.0, (height - layout.pixel_size().1 as f64) / 2.0);
    cr.set_source_rgb(scheme.fg.r as f64 / 65535.0, scheme.fg.g as f64 / 65535.0, scheme.fg.b as f64 / 65535.0);
    show_layout(cr, &layout);
    cr.restore().ok();
    w
}
