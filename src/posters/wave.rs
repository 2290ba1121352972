//! Variant B: three interfering signal sources crossed by two diagonal corridors.

use crate::foundation::core::{Point, Rect, Rgb8, Rgba8};
use crate::layers::labels::{BIG_SHOULDERS, ERICA_ONE, GEIST_MONO, TEKTUR_MEDIUM};
use crate::layers::{
    AccentBlocks, BlockZone, Cluster, ColumnSpan, DiagonalZebra, Diamonds, Flow, FlowDots,
    Labels, LayerGroup, Polyline, Ring, Rings, SignalLight, Signals, Strokes, TextSpec, TitleBar,
    Vignette, WaveMosaic, WaveSource,
};
use crate::palette::{
    ACID_YELLOW, CYAN, DEEP_ORANGE, ELECTRIC_BLUE, HOT_PINK, NEON_GREEN, ULTRA_VIOLET,
    VIVID_MAGENTA, WHITE,
};
use crate::pipeline::Compositor;
use crate::posters::TITLE_BAR_HEIGHT;

const CORRIDOR: f64 = 38.0;
const WAVELENGTH: f64 = 160.0;
const GRID_SPACING: i32 = 160;

struct Frame {
    w: i32,
    bar: i32,
    sources: Vec<WaveSource>,
}

impl Frame {
    fn new(comp: &Compositor) -> Self {
        let w = comp.size().width as i32;
        let h = comp.size().height as i32;
        let upper = h * 7 / 32;
        let lower = h * 11 / 16;
        let source = |x: i32, y: i32, colors| WaveSource {
            at: Point::new(f64::from(x), f64::from(y)),
            colors,
        };
        Self {
            w,
            bar: h - TITLE_BAR_HEIGHT as i32,
            sources: vec![
                source(w / 4, upper, [HOT_PINK, VIVID_MAGENTA, DEEP_ORANGE]),
                source(w * 3 / 4, upper, [ELECTRIC_BLUE, CYAN, ULTRA_VIOLET]),
                source(w / 2, lower, [NEON_GREEN, ACID_YELLOW, CYAN]),
            ],
        }
    }

    fn wf(&self) -> f64 {
        f64::from(self.w)
    }

    fn barf(&self) -> f64 {
        f64::from(self.bar)
    }

    /// Area above the title bar.
    fn field(&self) -> Rect {
        Rect::new(0.0, 0.0, self.wf(), self.barf())
    }

    /// Where the two diagonals cross.
    fn crossing(&self) -> Point {
        let half = f64::from(self.w / 2);
        Point::new(half, half)
    }

    fn focus(&self) -> Point {
        Point::new(f64::from(self.w / 2), f64::from(self.bar / 2))
    }

    fn source_xy(&self, i: usize) -> (i32, i32) {
        let at = self.sources[i].at;
        (at.x as i32, at.y as i32)
    }
}

fn xy(x: i32, y: i32) -> (f64, f64) {
    (f64::from(x), f64::from(y))
}

pub(crate) fn push_layers(comp: &mut Compositor) {
    let f = Frame::new(comp);

    comp.push(LayerGroup::new("wave-mosaic").with(WaveMosaic {
        cell: 24,
        bottom: f.bar as u32,
        sources: f.sources.clone(),
        wavelength: WAVELENGTH,
        corridor_half: CORRIDOR,
        reach: 1400.0,
        max_dark_p: 0.75,
    }))
    .push(LayerGroup::new("diagonal-zebra").with(DiagonalZebra {
        period: 50,
        thickness: 4.0,
        bottom: f.barf(),
        color: WHITE.with_alpha(35),
    }))
    .push(LayerGroup::new("diagonal-glow").with(diagonal_glow(&f)))
    .push(dots(&f))
    .push(LayerGroup::new("diamonds").with(Diamonds {
        center: f.focus(),
        rings: vec![
            Ring::new(100.0, HOT_PINK, 90, 3.0),
            Ring::new(200.0, CYAN, 60, 2.0),
            Ring::new(340.0, ACID_YELLOW, 45, 2.0),
            Ring::new(500.0, NEON_GREEN, 35, 2.0),
            Ring::new(700.0, ELECTRIC_BLUE, 25, 1.0),
            Ring::new(920.0, VIVID_MAGENTA, 18, 1.0),
            Ring::new(1160.0, DEEP_ORANGE, 12, 1.0),
        ],
        clip: f.field(),
    }))
    .push(LayerGroup::new("signals").with(signals(&f)))
    .push(halos(&f))
    .push(LayerGroup::new("corner-blocks").with(corner_blocks(&f)))
    .push(
        LayerGroup::new("watermark").with(Labels::new(vec![TextSpec::centered(
            "FP",
            BIG_SHOULDERS,
            520.0,
            f.focus(),
            -20.0,
            ULTRA_VIOLET.with_alpha(22),
        )])),
    )
    .push(LayerGroup::new("diamond-grid").with(Strokes::diamond_grid(
        f.wf(),
        f.barf(),
        GRID_SPACING as u32,
        WHITE.with_alpha(10),
    )))
    .push(LayerGroup::new("typography").with(typography(&f)))
    .push(LayerGroup::new("title-bar").with(title_bar(&f)))
    .push(Vignette {
        depth: 40,
        step: 1.8,
        bar_top: f.bar as u32,
    });
}

fn diagonal_glow(f: &Frame) -> Strokes {
    let (w, bar) = (f.wf(), f.barf());
    let offset = (CORRIDOR * std::f64::consts::SQRT_2).trunc();
    let mut glow = Strokes::corridor_edges(
        w,
        bar,
        offset,
        HOT_PINK.with_alpha(140),
        ELECTRIC_BLUE.with_alpha(140),
        2.0,
    );
    let mid_y = f64::from(f.bar / 2) + 0.5;
    let mid_x = f64::from(f.w / 2) + 0.5;
    glow.lines.push(Polyline::segment(
        Point::new(0.0, mid_y),
        Point::new(w, mid_y),
        1.0,
        ACID_YELLOW.with_alpha(25),
    ));
    glow.lines.push(Polyline::segment(
        Point::new(mid_x, 0.0),
        Point::new(mid_x, bar),
        1.0,
        CYAN.with_alpha(25),
    ));
    glow
}

fn dots(f: &Frame) -> LayerGroup {
    let w = f.wf();
    let mut group = LayerGroup::new("diagonal-dots")
        .with(FlowDots {
            flow: Flow::Diagonal {
                from: Point::new(0.0, 0.0),
                to: Point::new(w, w),
                jitter: 30,
            },
            count: 400,
            radius: (2, 5),
            colors: vec![WHITE, ACID_YELLOW, HOT_PINK, VIVID_MAGENTA],
            alpha: (150, 240),
            clip: Some(f.field()),
        })
        .with(FlowDots {
            flow: Flow::Diagonal {
                from: Point::new(0.0, w),
                to: Point::new(w, 0.0),
                jitter: 30,
            },
            count: 400,
            radius: (2, 5),
            colors: vec![WHITE, CYAN, ELECTRIC_BLUE, NEON_GREEN],
            alpha: (150, 240),
            clip: Some(f.field()),
        });

    if f.w / 2 < f.bar {
        group = group.with(Cluster {
            center: f.crossing(),
            count: 80,
            sigma: 20.0,
            size: (2, 6),
            colors: vec![WHITE, HOT_PINK, ACID_YELLOW, CYAN, NEON_GREEN],
            alpha: (180, 255),
        });
    }
    group
}

fn signals(f: &Frame) -> Signals {
    let (w, bar) = (f.w, f.bar);
    let half = w / 2;
    let at = |x: i32, y: i32, lit| SignalLight::new(f64::from(x), f64::from(y), lit);
    let near = |i: usize, lit| {
        let (sx, sy) = f.source_xy(i);
        at(sx - 14, sy - 38, lit)
    };
    Signals {
        lights: vec![
            near(0, 0),
            near(1, 2),
            near(2, 1),
            at(half - 14, half - 38, 0),
            at(half + 80, half - 38, 2),
            at(half - 100, half - 38, 1),
            at(200, 400, 2),
            at(w - 230, 400, 0),
            at(200, bar - 300, 1),
            at(w - 230, bar - 300, 0),
        ],
        bottom: Some(f.barf()),
    }
}

/// Three outlines around a source, fainter toward the center.
fn halo_rings(center: Point, color: Rgb8) -> Rings {
    Rings {
        center,
        rings: [(60.0, 50), (45.0, 35), (30.0, 25)]
            .into_iter()
            .map(|(r, alpha)| Ring::new(r, color, alpha, 3.0))
            .collect(),
    }
}

fn halos(f: &Frame) -> LayerGroup {
    let mut group = LayerGroup::new("source-halos");
    for source in &f.sources {
        if source.at.y >= f.barf() {
            continue;
        }
        let c = source.colors[0];
        group = group
            .with(halo_rings(source.at, c))
            .with(Cluster {
                center: source.at,
                count: 30,
                sigma: 12.0,
                size: (2, 4),
                colors: source.colors.iter().copied().chain([WHITE]).collect(),
                alpha: (160, 240),
            });
    }
    group
}

fn corner_blocks(f: &Frame) -> AccentBlocks {
    let (w, bar) = (f.w, f.bar);
    let upper = |columns| BlockZone {
        rows: (40, 320),
        columns,
        fill_p: 0.78,
        alpha: (130, 245),
    };
    let lower = |columns| BlockZone {
        rows: (bar - 280, bar - 60),
        columns,
        fill_p: 0.72,
        alpha: (120, 235),
    };
    AccentBlocks {
        block: 12,
        step: 14,
        zones: vec![
            upper(ColumnSpan::FromLeft {
                inset: 40,
                pivot: 320,
                rate: 1.2,
                limit: w - 40,
            }),
            upper(ColumnSpan::FromRight {
                inset: 40,
                pivot: 320,
                rate: 1.2,
                limit: 40,
            }),
            lower(ColumnSpan::FromLeft {
                inset: 40,
                pivot: bar - 280,
                rate: 0.9,
                limit: 360,
            }),
            lower(ColumnSpan::FromRight {
                inset: 40,
                pivot: bar - 280,
                rate: 0.9,
                limit: w - 360,
            }),
        ],
    }
}

fn typography(f: &Frame) -> Labels {
    let (w, bar) = (f.w, f.bar);
    let mut items = TextSpec::letter_stack(
        "INTERFERENCE",
        BIG_SHOULDERS,
        44.0,
        (20.0, 340.0),
        48.0,
        HOT_PINK.with_alpha(130),
    );
    items.extend(TextSpec::letter_stack(
        "FIELD",
        BIG_SHOULDERS,
        44.0,
        xy(w - 52, 340),
        48.0,
        NEON_GREEN.with_alpha(110),
    ));
    items.push(TextSpec::at(
        "03",
        ERICA_ONE,
        260.0,
        (80.0, 60.0),
        ELECTRIC_BLUE.with_alpha(30),
    ));

    let src = |i: usize| {
        let (x, y) = f.source_xy(i);
        (x - 40, y + 70)
    };
    let frags: [(&str, &'static str, f32, (i32, i32), Rgba8); 9] = [
        ("SOURCE.A", GEIST_MONO, 18.0, src(0), HOT_PINK.with_alpha(70)),
        ("SOURCE.B", GEIST_MONO, 18.0, src(1), ELECTRIC_BLUE.with_alpha(70)),
        ("SOURCE.C", GEIST_MONO, 18.0, src(2), NEON_GREEN.with_alpha(70)),
        ("WAVE", TEKTUR_MEDIUM, 36.0, (w / 2 + 60, 60), CYAN.with_alpha(80)),
        ("λ=160", GEIST_MONO, 18.0, (w / 2 + 60, 100), ACID_YELLOW.with_alpha(60)),
        ("NODES", GEIST_MONO, 18.0, (w - 130, bar / 2 - 10), WHITE.with_alpha(55)),
        ("35.6595N", GEIST_MONO, 18.0, (50, bar - 60), CYAN.with_alpha(55)),
        ("139.7004E", GEIST_MONO, 18.0, (50, bar - 40), CYAN.with_alpha(55)),
        ("FREQ.003", GEIST_MONO, 18.0, (w - 180, 70), VIVID_MAGENTA.with_alpha(55)),
    ];
    for (text, font, size, (x, y), color) in frags {
        if y < bar - 20 {
            items.push(TextSpec::at(text, font, size, xy(x, y), color));
        }
    }

    let index = WHITE.with_alpha(28);
    for i in 0..12 {
        let x = GRID_SPACING * (i + 1);
        if x < w {
            items.push(TextSpec::at(format!("{i:02}"), GEIST_MONO, 11.0, xy(x + 2, bar - 22), index));
        }
    }
    Labels::new(items)
}

fn title_bar(f: &Frame) -> TitleBar {
    TitleBar {
        top: f.barf(),
        accent: ELECTRIC_BLUE,
        hairline: NEON_GREEN,
        title: "FLUORESCENT PULSE".into(),
        subtitle: "WAVE INTERFERENCE STUDY  //  FIELD OBSERVATION NO.003".into(),
        detail_inset: 340.0,
        details: vec![
            ("SOURCES:     3 / ACTIVE".into(), NEON_GREEN.with_alpha(85)),
            ("WAVELENGTH:  160 px".into(), CYAN.with_alpha(85)),
            ("INTERFERENCE: CONSTRUCTIVE".into(), ACID_YELLOW.with_alpha(100)),
            ("EPOCH: 2003.08.15".into(), VIVID_MAGENTA.with_alpha(75)),
            ("SECTOR: TRI-NODE".into(), HOT_PINK.with_alpha(65)),
        ],
        footer: "FLUORESCENT PULSE SERIES  |  WAVE INTERFERENCE FIELD RESEARCH".into(),
    }
}
