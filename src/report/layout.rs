//! Page layout for the sales report.
//!
//! The report is described as a list of [`Flowable`]s which [`paginate`] flows top to bottom
//! into A4 pages of [`DrawOp`]s. Coordinates are PDF points with the origin at the bottom-left.

use super::model::{MonthlyReport, group_thousands};

pub const MM: f32 = 72.0 / 25.4;
pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;

pub const MARGIN_LEFT: f32 = 20.0 * MM;
pub const MARGIN_RIGHT: f32 = 20.0 * MM;
pub const MARGIN_TOP: f32 = 22.0 * MM;
pub const MARGIN_BOTTOM: f32 = 20.0 * MM;

/// Width available to flowables.
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;

const CELL_PADDING: f32 = 4.0;
const GRID_WIDTH: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RgbF(pub f32, pub f32, pub f32);

impl RgbF {
    pub const fn hex(v: u32) -> Self {
        Self(
            ((v >> 16) & 0xff) as f32 / 255.0,
            ((v >> 8) & 0xff) as f32 / 255.0,
            (v & 0xff) as f32 / 255.0,
        )
    }
}

pub const DARK_BLUE: RgbF = RgbF::hex(0x1a365d);
pub const MEDIUM_BLUE: RgbF = RgbF::hex(0x2b6cb0);
pub const LIGHT_GRAY: RgbF = RgbF::hex(0xf7fafc);
pub const BORDER_GRAY: RgbF = RgbF::hex(0xe2e8f0);
pub const GRAY: RgbF = RgbF(0.5, 0.5, 0.5);
pub const BLACK: RgbF = RgbF(0.0, 0.0, 0.0);
pub const WHITE: RgbF = RgbF(1.0, 1.0, 1.0);

/// Paragraph style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub size: f32,
    pub leading: f32,
    pub color: RgbF,
    pub space_before: f32,
    pub space_after: f32,
}

pub const TITLE: Style = Style {
    size: 22.0,
    leading: 30.0,
    color: DARK_BLUE,
    space_before: 0.0,
    space_after: 6.0 * MM,
};

pub const SUBTITLE: Style = Style {
    size: 12.0,
    leading: 16.0,
    color: MEDIUM_BLUE,
    space_before: 0.0,
    space_after: 12.0 * MM,
};

pub const HEADING: Style = Style {
    size: 14.0,
    leading: 20.0,
    color: DARK_BLUE,
    space_before: 8.0 * MM,
    space_after: 4.0 * MM,
};

pub const BODY: Style = Style {
    size: 10.0,
    leading: 16.0,
    color: BLACK,
    space_before: 0.0,
    space_after: 3.0 * MM,
};

#[derive(Clone, Debug, PartialEq)]
pub struct TableSpec {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Flowable {
    Spacer(f32),
    Paragraph { text: String, style: Style },
    Table(TableSpec),
    PageBreak,
}

impl Flowable {
    fn paragraph(text: impl Into<String>, style: Style) -> Self {
        Self::Paragraph {
            text: text.into(),
            style,
        }
    }
}

/// One drawing instruction on a page.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        color: RgbF,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: RgbF,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: RgbF,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Every text string on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Advance width of `text` at `size`: half an em for ASCII, a full em otherwise.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.5 } else { 1.0 })
        .sum::<f32>()
        * size
}

/// Greedy character wrap to `max_width`.
pub fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let w = text_width(c.encode_utf8(&mut [0; 4]), size);
        if width + w > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            width = 0.0;
        }
        line.push(c);
        width += w;
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// The report body, top to bottom.
pub fn story(report: &MonthlyReport) -> Vec<Flowable> {
    let data = &report.data;
    let mut story = vec![
        Flowable::Spacer(40.0 * MM),
        Flowable::paragraph(report.title(), TITLE),
        Flowable::paragraph(data.company.clone(), SUBTITLE),
        Flowable::Spacer(20.0 * MM),
        Flowable::paragraph("レポート概要", HEADING),
        Flowable::paragraph(format!("対象期間: {}", report.year_month), BODY),
        Flowable::paragraph(
            format!("全社売上合計: {}円", group_thousands(data.total)),
            BODY,
        ),
    ];
    if let Some(diff) = data.prev_diff.as_deref().filter(|d| !d.is_empty()) {
        story.push(Flowable::paragraph(format!("前月比: {diff}"), BODY));
    }
    story.push(Flowable::paragraph(
        format!("部門数: {}部門", data.departments.len()),
        BODY,
    ));
    story.push(Flowable::PageBreak);

    story.push(Flowable::paragraph("部門別売上", HEADING));
    story.push(Flowable::paragraph(
        format!("　{}の部門別売上実績をまとめます。", report.month_label),
        BODY,
    ));
    story.push(Flowable::Table(TableSpec {
        headers: ["部門", "売上金額", "構成比"].map(String::from).to_vec(),
        rows: data.department_rows(),
    }));
    story.push(Flowable::Spacer(6.0 * MM));

    story.push(Flowable::paragraph("商品別売上 TOP5", HEADING));
    story.push(Flowable::paragraph(
        format!(
            "　{}に最も売上が高かった商品のランキングです。",
            report.month_label
        ),
        BODY,
    ));
    story.push(Flowable::Table(TableSpec {
        headers: ["順位", "商品名", "部門", "売上金額"]
            .map(String::from)
            .to_vec(),
        rows: data.product_rows(),
    }));
    story
}

struct Flow {
    pages: Vec<Page>,
    /// Current top of the free area.
    y: f32,
}

impl Flow {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_HEIGHT - MARGIN_TOP,
        }
    }

    fn at_top(&self) -> bool {
        self.y >= PAGE_HEIGHT - MARGIN_TOP
    }

    fn remaining(&self) -> f32 {
        self.y - MARGIN_BOTTOM
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_HEIGHT - MARGIN_TOP;
    }

    fn ops(&mut self) -> &mut Vec<DrawOp> {
        let last = self.pages.len() - 1;
        &mut self.pages[last].ops
    }

    /// Make room for `h` points, starting a page when the current one is full.
    fn reserve(&mut self, h: f32) {
        if h > self.remaining() && !self.at_top() {
            self.new_page();
        }
    }

    fn spacer(&mut self, h: f32) {
        if h > self.remaining() {
            self.new_page();
        } else {
            self.y -= h;
        }
    }

    fn paragraph(&mut self, text: &str, style: Style) {
        if !self.at_top() {
            self.y -= style.space_before;
        }
        for line in wrap(text, style.size, CONTENT_WIDTH) {
            self.reserve(style.leading);
            let baseline = self.y - style.size;
            self.ops().push(DrawOp::Text {
                x: MARGIN_LEFT,
                y: baseline,
                size: style.size,
                color: style.color,
                text: line,
            });
            self.y -= style.leading;
        }
        self.y -= style.space_after;
    }

    fn table(&mut self, spec: &TableSpec) {
        let cols = spec.headers.len().max(1);
        let col_w = CONTENT_WIDTH / cols as f32;

        let header = TableRow {
            cells: &spec.headers,
            size: 10.0,
            fill: Some(DARK_BLUE),
            text: WHITE,
        };
        self.table_row(&header, col_w);
        for (i, cells) in spec.rows.iter().enumerate() {
            // Data row `i` is table row `i + 1`; even table rows are shaded.
            let fill = ((i + 1) % 2 == 0).then_some(LIGHT_GRAY);
            let row = TableRow {
                cells,
                size: 9.0,
                fill,
                text: BLACK,
            };
            self.table_row(&row, col_w);
        }
    }

    fn table_row(&mut self, row: &TableRow<'_>, col_w: f32) {
        let h = row.size * 1.2 + 2.0 * CELL_PADDING;
        self.reserve(h);
        let top = self.y;
        let bottom = top - h;
        let width = col_w * row.cells.len().max(1) as f32;

        if let Some(color) = row.fill {
            self.ops().push(DrawOp::FillRect {
                x: MARGIN_LEFT,
                y: bottom,
                w: width,
                h,
                color,
            });
        }
        for (i, cell) in row.cells.iter().enumerate() {
            let cell_x = MARGIN_LEFT + i as f32 * col_w;
            let x = cell_x + (col_w - text_width(cell, row.size)) / 2.0;
            let y = bottom + (h - row.size * 0.7) / 2.0;
            self.ops().push(DrawOp::Text {
                x,
                y,
                size: row.size,
                color: row.text,
                text: cell.clone(),
            });
        }

        let grid = |from, to| DrawOp::Line {
            from,
            to,
            width: GRID_WIDTH,
            color: BORDER_GRAY,
        };
        let right = MARGIN_LEFT + width;
        self.ops().push(grid((MARGIN_LEFT, top), (right, top)));
        self.ops().push(grid((MARGIN_LEFT, bottom), (right, bottom)));
        for i in 0..=row.cells.len() {
            let x = MARGIN_LEFT + i as f32 * col_w;
            self.ops().push(grid((x, top), (x, bottom)));
        }
        self.y = bottom;
    }
}

struct TableRow<'a> {
    cells: &'a [String],
    size: f32,
    fill: Option<RgbF>,
    text: RgbF,
}

/// Header rule and title, footer rule, page number and company name.
fn decorate(page: &mut Page, number: usize, title: &str, company: &str) {
    let left = MARGIN_LEFT;
    let right = PAGE_WIDTH - MARGIN_RIGHT;
    let header_y = PAGE_HEIGHT - 15.0 * MM;

    page.ops.push(DrawOp::Line {
        from: (left, header_y),
        to: (right, header_y),
        width: 0.5,
        color: MEDIUM_BLUE,
    });
    page.ops.push(DrawOp::Text {
        x: left,
        y: PAGE_HEIGHT - 13.0 * MM,
        size: 8.0,
        color: MEDIUM_BLUE,
        text: title.to_string(),
    });
    page.ops.push(DrawOp::Line {
        from: (left, 15.0 * MM),
        to: (right, 15.0 * MM),
        width: 0.5,
        color: BORDER_GRAY,
    });

    let number = format!("- {number} -");
    page.ops.push(DrawOp::Text {
        x: PAGE_WIDTH / 2.0 - text_width(&number, 8.0) / 2.0,
        y: 10.0 * MM,
        size: 8.0,
        color: GRAY,
        text: number,
    });
    page.ops.push(DrawOp::Text {
        x: right - text_width(company, 8.0),
        y: 10.0 * MM,
        size: 8.0,
        color: GRAY,
        text: company.to_string(),
    });
}

/// Flow `story` onto pages and add the running header and footer to each.
pub fn paginate(story: &[Flowable], title: &str, company: &str) -> Vec<Page> {
    let mut flow = Flow::new();
    for item in story {
        match item {
            Flowable::Spacer(h) => flow.spacer(*h),
            Flowable::Paragraph { text, style } => flow.paragraph(text, *style),
            Flowable::Table(spec) => flow.table(spec),
            Flowable::PageBreak => {
                if !flow.at_top() {
                    flow.new_page();
                }
            }
        }
    }

    let mut pages = flow.pages;
    for (i, page) in pages.iter_mut().enumerate() {
        decorate(page, i + 1, title, company);
    }
    pages
}

/// Lay out a full report.
pub fn layout(report: &MonthlyReport) -> Vec<Page> {
    paginate(&story(report), &report.title(), &report.data.company)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{SampleMonth, january};

    #[test]
    fn widths_follow_the_em_rule() {
        assert_eq!(text_width("AB", 10.0), 10.0);
        assert_eq!(text_width("合計", 10.0), 20.0);
    }

    #[test]
    fn wrapping_respects_the_width() {
        let lines = wrap("あいうえおかきくけこ", 10.0, 35.0);
        assert_eq!(lines, vec!["あいう", "えおか", "きくけ", "こ"]);
        assert_eq!(wrap("", 10.0, 35.0), vec![String::new()]);
    }

    #[test]
    fn title_page_then_tables_page() {
        let pages = layout(&january());
        assert_eq!(pages.len(), 2);
        let first: Vec<&str> = pages[0].texts().collect();
        assert!(first.contains(&"2025年1月 売上レポート"));
        assert!(first.contains(&"全社売上合計: 287,450,000円"));
        assert!(first.contains(&"前月比: +8.3%（12月比）"));
        assert!(first.contains(&"- 1 -"));
        let second: Vec<&str> = pages[1].texts().collect();
        assert!(second.contains(&"部門別売上"));
        assert!(second.contains(&"- 2 -"));
    }

    #[test]
    fn total_row_is_the_last_department_row() {
        let pages = layout(&january());
        let texts: Vec<&str> = pages[1].texts().collect();
        let at = texts.iter().position(|t| *t == "合計").unwrap();
        assert_eq!(texts[at + 1], "287,450,000円");
        assert_eq!(texts[at + 2], "100.0%");
        // The product table header follows the total row's section.
        assert!(texts[at..].contains(&"商品別売上 TOP5"));
    }

    #[test]
    fn long_tables_continue_on_new_pages() {
        let mut report = SampleMonth::Feb.report();
        let rows = report.data.departments.clone();
        for _ in 0..30 {
            report.data.departments.extend(rows.iter().cloned());
        }
        report.data.total = report.data.departments.iter().map(|d| d.amount).sum();
        let pages = layout(&report);
        assert!(pages.len() > 2);
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::FillRect { y, .. } = op {
                    assert!(*y >= MARGIN_BOTTOM - 0.01);
                }
            }
        }
    }
}
