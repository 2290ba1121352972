use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use super::layout::{DrawOp, PAGE_HEIGHT, PAGE_WIDTH, Page, RgbF};

/// Resource name of the single report font.
const FONT: Name<'static> = Name(b"F1");
const BASE_FONT: Name<'static> = Name(b"HeiseiKakuGo-W5");
const ENCODING: Name<'static> = Name(b"UniJIS-UCS2-H");

struct Refs {
    next: i32,
}

impl Refs {
    fn bump(&mut self) -> Ref {
        let r = Ref::new(self.next);
        self.next += 1;
        r
    }
}

/// Text as UCS-2 big-endian, as the `UniJIS-UCS2-H` CMap expects.
pub fn ucs2_be(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

fn fill(content: &mut Content, c: RgbF) {
    content.set_fill_rgb(c.0, c.1, c.2);
}

fn page_content(page: &Page) -> Content {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                color,
                text,
            } => {
                content.save_state();
                fill(&mut content, *color);
                content.begin_text();
                content.set_font(FONT, *size);
                content.next_line(*x, *y);
                content.show(Str(&ucs2_be(text)));
                content.end_text();
                content.restore_state();
            }
            DrawOp::FillRect { x, y, w, h, color } => {
                content.save_state();
                fill(&mut content, *color);
                content.rect(*x, *y, *w, *h);
                content.fill_nonzero();
                content.restore_state();
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                content.save_state();
                content.set_stroke_rgb(color.0, color.1, color.2);
                content.set_line_width(*width);
                content.move_to(from.0, from.1);
                content.line_to(to.0, to.1);
                content.stroke();
                content.restore_state();
            }
        }
    }
    content
}

/// Non-embedded Japanese CID font shared by every page.
fn write_font(pdf: &mut Pdf, type0: Ref, cid: Ref, descriptor: Ref) {
    pdf.type0_font(type0)
        .base_font(BASE_FONT)
        .encoding_predefined(ENCODING)
        .descendant_font(cid);

    let mut font = pdf.cid_font(cid);
    font.subtype(CidFontType::Type0)
        .base_font(BASE_FONT)
        .system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Japan1"),
            supplement: 2,
        })
        .font_descriptor(descriptor)
        .default_width(1000.0);
    // Half-width Latin and katakana ranges.
    font.widths().same(1, 95, 500.0).same(231, 632, 500.0);
    font.finish();

    pdf.font_descriptor(descriptor)
        .name(BASE_FONT)
        .flags(FontFlags::SYMBOLIC)
        .bbox(Rect::new(-92.0, -250.0, 1010.0, 922.0))
        .italic_angle(0.0)
        .ascent(752.0)
        .descent(-221.0)
        .cap_height(737.0)
        .stem_v(114.0);
}

/// Serialize laid-out pages into a PDF 1.7 document.
pub fn encode(pages: &[Page], title: &str) -> Vec<u8> {
    let mut refs = Refs { next: 1 };
    let catalog = refs.bump();
    let tree = refs.bump();
    let type0 = refs.bump();
    let cid = refs.bump();
    let descriptor = refs.bump();
    let info = refs.bump();
    let ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (refs.bump(), refs.bump())).collect();

    let mut pdf = Pdf::new();
    pdf.set_version(1, 7);
    pdf.catalog(catalog).pages(tree);
    pdf.pages(tree)
        .kids(ids.iter().map(|(page, _)| *page))
        .count(ids.len() as i32);

    for (page, (page_id, content_id)) in pages.iter().zip(&ids) {
        let mut writer = pdf.page(*page_id);
        writer
            .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(tree)
            .contents(*content_id);
        writer.resources().fonts().pair(FONT, type0);
        writer.finish();

        let content = page_content(page);
        pdf.stream(*content_id, &content.finish());
    }

    write_font(&mut pdf, type0, cid, descriptor);
    pdf.document_info(info)
        .title(TextStr(title))
        .producer(TextStr("posterkit"));
    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::layout::{BLACK, layout};
    use crate::report::model::january;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn ucs2_is_big_endian() {
        assert_eq!(ucs2_be("A合"), vec![0x00, 0x41, 0x54, 0x08]);
    }

    #[test]
    fn document_declares_pages_and_font() {
        let bytes = encode(&layout(&january()), "2025年1月 売上レポート");
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(contains(&bytes, b"/HeiseiKakuGo-W5"));
        assert!(contains(&bytes, b"/UniJIS-UCS2-H"));
        assert!(contains(&bytes, b"/Count 2"));
        assert!(contains(&bytes, b"/MediaBox [0 0 595.27"));
    }

    #[test]
    fn blank_pages_are_kept() {
        let page = Page {
            ops: vec![DrawOp::Text {
                x: 10.0,
                y: 10.0,
                size: 9.0,
                color: BLACK,
                text: "x".into(),
            }],
        };
        let bytes = encode(&[page, Page::default()], "t");
        assert!(contains(&bytes, b"/Count 2"));
        assert!(bytes.ends_with(b"%%EOF") || bytes.ends_with(b"%%EOF\n"));
    }
}
