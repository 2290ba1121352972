#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    OutQuad,
    OutBounce,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutBounce => out_bounce(t),
        }
    }

    /// Value between `from` and `to` at eased progress `t`.
    pub fn lerp(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

fn out_bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 3] = [Ease::Linear, Ease::OutQuad, Ease::OutBounce];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn out_quad_is_monotonic() {
        let a = Ease::OutQuad.apply(0.25);
        let b = Ease::OutQuad.apply(0.5);
        let c = Ease::OutQuad.apply(0.75);
        assert!(a < b && b < c);
        assert_eq!(b, 0.75);
    }

    #[test]
    fn bounce_touches_down_before_the_end() {
        // First landing at 1/2.75.
        assert!((Ease::OutBounce.apply(1.0 / 2.75) - 1.0).abs() < 1e-12);
        assert!(Ease::OutBounce.apply(0.5) < 1.0);
        assert!(Ease::OutBounce.apply(0.8) > 0.9);
    }

    #[test]
    fn lerp_clamps_progress() {
        assert_eq!(Ease::Linear.lerp(-30.0, 68.0, 2.0), 68.0);
        assert_eq!(Ease::OutQuad.lerp(0.5, 1.0, 0.0), 0.5);
    }
}
