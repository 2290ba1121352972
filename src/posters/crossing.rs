//! Variant A: a radial mosaic split by a street crossing.

use crate::foundation::core::{Point, Rgba8};
use crate::layers::labels::{BIG_SHOULDERS, ERICA_ONE, GEIST_MONO, PIXELIFY_SANS, TEKTUR_MEDIUM};
use crate::layers::{
    AccentBlocks, BlockZone, Cluster, CrossingZebra, Flow, FlowDots, Labels, LayerGroup,
    Polyline, RadialMosaic, Ring, Rings, SignalLight, Signals, Strokes, TextSpec, TitleBar,
    Vignette,
};
use crate::palette::{
    ACID_YELLOW, CYAN, DEEP_ORANGE, ELECTRIC_BLUE, HOT_PINK, NEON_GREEN, SIGNAL_RED, VIVID_MAGENTA,
    WHITE,
};
use crate::pipeline::Compositor;
use crate::posters::TITLE_BAR_HEIGHT;

/// Half the corridor band width.
const HALF: i32 = 32;

struct Frame {
    w: i32,
    h: i32,
    cx: i32,
    cy: i32,
}

impl Frame {
    fn new(comp: &Compositor) -> Self {
        let w = comp.size().width as i32;
        let h = comp.size().height as i32;
        Self {
            w,
            h,
            cx: w / 2,
            cy: h / 2 - 100,
        }
    }

    fn wf(&self) -> f64 {
        f64::from(self.w)
    }

    fn hf(&self) -> f64 {
        f64::from(self.h)
    }

    fn center(&self) -> Point {
        Point::new(f64::from(self.cx), f64::from(self.cy))
    }

    fn bar_top(&self) -> i32 {
        self.h - TITLE_BAR_HEIGHT as i32
    }
}

fn xy(x: i32, y: i32) -> (f64, f64) {
    (f64::from(x), f64::from(y))
}

pub(crate) fn push_layers(comp: &mut Compositor) {
    let f = Frame::new(comp);

    comp.push(LayerGroup::new("mosaic").with(RadialMosaic {
        cell: 26,
        center: f.center(),
        reach: 1700.0,
        corridor_half: f64::from(HALF + 6),
    }))
    .push(LayerGroup::new("zebra").with(CrossingZebra {
        center: f.center(),
        stripe: 36,
        gap: 18,
        skip: 180.0,
        half_length: f64::from(HALF - 6),
        bottom: f64::from(f.h - 240),
        color: WHITE.with_alpha(50),
    }))
    .push(LayerGroup::new("edge-glow").with(edge_glow(&f)))
    .push(dots(&f))
    .push(focal_center(&f))
    .push(LayerGroup::new("signals").with(signals(&f)))
    .push(LayerGroup::new("rings").with(Rings {
        center: f.center(),
        rings: vec![
            Ring::new(80.0, HOT_PINK, 80, 3.0),
            Ring::new(160.0, CYAN, 55, 2.0),
            Ring::new(260.0, ACID_YELLOW, 40, 2.0),
            Ring::new(380.0, NEON_GREEN, 30, 2.0),
            Ring::new(520.0, ELECTRIC_BLUE, 22, 1.0),
            Ring::new(680.0, VIVID_MAGENTA, 16, 1.0),
            Ring::new(860.0, DEEP_ORANGE, 12, 1.0),
        ],
    }))
    .push(LayerGroup::new("corner-blocks").with(corner_blocks(&f)))
    .push(
        LayerGroup::new("watermark").with(Labels::new(vec![TextSpec::centered(
            "109",
            BIG_SHOULDERS,
            480.0,
            f.center(),
            -10.0,
            HOT_PINK.with_alpha(28),
        )])),
    )
    .push(LayerGroup::new("grid").with(Strokes::grid(
        f.wf(),
        f.hf(),
        200,
        WHITE.with_alpha(12),
    )))
    .push(LayerGroup::new("typography").with(typography(&f)))
    .push(LayerGroup::new("title-bar").with(title_bar(&f)))
    .push(Vignette {
        depth: 40,
        step: 1.8,
        bar_top: f.bar_top() as u32,
    });
}

fn edge_glow(f: &Frame) -> Strokes {
    let (w, h) = (f.wf(), f.hf());
    let (cx, cy) = (f64::from(f.cx), f64::from(f.cy));
    let half = f64::from(HALF);
    let yellow = ACID_YELLOW.with_alpha(180);
    let cyan = CYAN.with_alpha(160);

    Strokes::new(vec![
        Polyline::segment(Point::new(0.0, cy - half), Point::new(w, cy - half), 3.0, yellow),
        Polyline::segment(Point::new(0.0, cy + half), Point::new(w, cy + half), 3.0, yellow),
        Polyline::segment(Point::new(cx - half, 0.0), Point::new(cx - half, h), 3.0, cyan),
        Polyline::segment(Point::new(cx + half, 0.0), Point::new(cx + half, h), 3.0, cyan),
        Polyline::segment(
            Point::new(0.0, 0.0),
            Point::new(w, h),
            2.0,
            HOT_PINK.with_alpha(35),
        ),
        Polyline::segment(
            Point::new(w, 0.0),
            Point::new(0.0, h),
            2.0,
            NEON_GREEN.with_alpha(35),
        ),
    ])
}

fn dots(f: &Frame) -> LayerGroup {
    let spread = HALF - 8;
    let (w, h) = (f.wf(), f.hf());

    LayerGroup::new("pedestrian-dots")
        .with(FlowDots {
            flow: Flow::Horizontal {
                y: f.cy,
                spread,
                x_range: (10, f.w - 10),
            },
            count: 350,
            radius: (2, 5),
            colors: vec![WHITE, ACID_YELLOW, CYAN, HOT_PINK, NEON_GREEN],
            alpha: (160, 250),
            clip: None,
        })
        .with(FlowDots {
            flow: Flow::Vertical {
                x: f.cx,
                spread,
                y_range: (10, f.h - 250),
            },
            count: 280,
            radius: (2, 5),
            colors: vec![WHITE, NEON_GREEN, ELECTRIC_BLUE, SIGNAL_RED, CYAN],
            alpha: (160, 250),
            clip: None,
        })
        .with(FlowDots {
            flow: Flow::Diagonal {
                from: Point::new(0.0, 0.0),
                to: Point::new(w, h),
                jitter: 25,
            },
            count: 80,
            radius: (1, 3),
            colors: vec![HOT_PINK, DEEP_ORANGE],
            alpha: (80, 150),
            clip: None,
        })
        .with(FlowDots {
            flow: Flow::Diagonal {
                from: Point::new(w, 0.0),
                to: Point::new(0.0, h),
                jitter: 25,
            },
            count: 80,
            radius: (1, 3),
            colors: vec![NEON_GREEN, CYAN],
            alpha: (80, 150),
            clip: None,
        })
}

fn focal_center(f: &Frame) -> LayerGroup {
    LayerGroup::new("focal-center")
        .with(Rings {
            center: f.center(),
            rings: vec![
                Ring::new(45.0, HOT_PINK, 130, 5.0),
                Ring::new(35.0, ACID_YELLOW, 100, 3.0),
                Ring::new(25.0, WHITE, 80, 2.0),
            ],
        })
        .with(Cluster {
            center: f.center(),
            count: 60,
            sigma: 15.0,
            size: (2, 5),
            colors: vec![WHITE, HOT_PINK, ACID_YELLOW, CYAN],
            alpha: (180, 255),
        })
        .with(Labels::new(vec![TextSpec::at(
            "00:00",
            PIXELIFY_SANS,
            44.0,
            xy(f.cx - 38, f.cy - 24),
            SIGNAL_RED.with_alpha(200),
        )]))
}

fn signals(f: &Frame) -> Signals {
    let (cx, cy, w, h) = (f.cx, f.cy, f.w, f.h);
    let at = |x: i32, y: i32, lit| SignalLight::new(f64::from(x), f64::from(y), lit);
    Signals {
        lights: vec![
            at(cx - 180, cy - 180, 0),
            at(cx + 130, cy - 180, 2),
            at(cx - 180, cy + 120, 1),
            at(cx + 130, cy + 120, 2),
            at(180, cy - 90, 0),
            at(w - 220, cy - 90, 2),
            at(cx - 90, 280, 1),
            at(cx - 90, h - 480, 0),
        ],
        bottom: None,
    }
}

fn corner_blocks(f: &Frame) -> AccentBlocks {
    let (w, h) = (f.w, f.h);
    let alpha = (120, 245);
    AccentBlocks {
        block: 14,
        step: 16,
        zones: vec![
            BlockZone::rect(50, 50, 440, 340, 0.75, alpha),
            BlockZone::rect(w - 440, 50, w - 50, 340, 0.75, alpha),
            BlockZone::rect(50, h - 460, 340, h - 260, 0.75, alpha),
            BlockZone::rect(w - 340, h - 460, w - 50, h - 260, 0.75, alpha),
        ],
    }
}

fn typography(f: &Frame) -> Labels {
    let (w, h, cx, cy) = (f.w, f.h, f.cx, f.cy);
    let mut items = TextSpec::letter_stack(
        "FLUORESCENT",
        BIG_SHOULDERS,
        42.0,
        (24.0, 380.0),
        52.0,
        ACID_YELLOW.with_alpha(140),
    );
    items.extend(TextSpec::letter_stack(
        "PULSE",
        BIG_SHOULDERS,
        42.0,
        xy(w - 52, 380),
        52.0,
        CYAN.with_alpha(120),
    ));
    items.push(TextSpec::at(
        "97",
        ERICA_ONE,
        240.0,
        xy(w - 440, 55),
        NEON_GREEN.with_alpha(35),
    ));

    let frags: [(&str, &'static str, f32, (i32, i32), Rgba8); 6] = [
        ("SIGNAL", TEKTUR_MEDIUM, 38.0, (cx + 50, 60), CYAN.with_alpha(85)),
        ("CROSS", TEKTUR_MEDIUM, 38.0, (cx + 50, cy + 55), VIVID_MAGENTA.with_alpha(75)),
        ("Hz", GEIST_MONO, 18.0, (w - 110, cy - 70), WHITE.with_alpha(65)),
        ("FREQ.097", GEIST_MONO, 18.0, (160, cy + 55), ACID_YELLOW.with_alpha(60)),
        ("35.6595N", GEIST_MONO, 18.0, (50, h - 265), CYAN.with_alpha(55)),
        ("139.7004E", GEIST_MONO, 18.0, (50, h - 245), CYAN.with_alpha(55)),
    ];
    for (text, font, size, (x, y), color) in frags {
        items.push(TextSpec::at(text, font, size, xy(x, y), color));
    }

    let index = WHITE.with_alpha(30);
    for (i, x) in (200..w).step_by(200).enumerate() {
        items.push(TextSpec::at(format!("{i:02}"), GEIST_MONO, 11.0, xy(x + 2, h - 242), index));
    }
    for (i, y) in (200..h - 240).step_by(200).enumerate() {
        items.push(TextSpec::at(format!("{i:02}"), GEIST_MONO, 11.0, xy(w - 26, y + 2), index));
    }
    Labels::new(items)
}

fn title_bar(f: &Frame) -> TitleBar {
    TitleBar {
        top: f64::from(f.bar_top()),
        accent: HOT_PINK,
        hairline: ACID_YELLOW,
        title: "FLUORESCENT PULSE".into(),
        subtitle: "CHROMATIC DENSITY STUDY  //  FIELD OBSERVATION NO.097".into(),
        detail_inset: 310.0,
        details: vec![
            ("LATITUDE  35.6595 N".into(), CYAN.with_alpha(85)),
            ("LONGITUDE 139.7004 E".into(), CYAN.with_alpha(85)),
            ("DENSITY: CRITICAL".into(), SIGNAL_RED.with_alpha(100)),
            ("EPOCH: 1997.04.12".into(), ACID_YELLOW.with_alpha(75)),
            ("SECTOR: NW-CROSSING".into(), NEON_GREEN.with_alpha(65)),
        ],
        footer: "FLUORESCENT PULSE SERIES  |  CHROMATIC FIELD RESEARCH".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::{Rgb8, Size};

    fn frame() -> Frame {
        let comp = Compositor::new(Size::new(2400, 3200).unwrap(), Rgb8::new(0, 0, 0), 1);
        Frame::new(&comp)
    }

    #[test]
    fn focal_center_sits_above_the_middle() {
        let f = frame();
        assert_eq!((f.cx, f.cy), (1200, 1500));
        assert_eq!(f.bar_top(), 2975);
    }

    #[test]
    fn typography_lists_every_index() {
        let labels = typography(&frame());
        let indices = labels.items.iter().filter(|t| t.size == 11.0).count();
        // 11 along the bottom edge, 14 along the right edge.
        assert_eq!(indices, 11 + 14);
    }

    #[test]
    fn signal_positions_match_the_layout() {
        let s = signals(&frame());
        assert_eq!(s.lights.len(), 8);
        assert_eq!(s.lights[5], SignalLight::new(2180.0, 1410.0, 2));
    }

    #[test]
    fn glow_edges_bracket_the_corridors() {
        let g = edge_glow(&frame());
        assert_eq!(g.lines[0].points[0].y, 1468.0);
        assert_eq!(g.lines[3].points[0].x, 1232.0);
    }
}
