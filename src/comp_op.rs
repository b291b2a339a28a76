//! Porter-Duff compositing operations.
//!
//! Twelve blend functions over premultiplied 8-bit ARGB plus the table that
//! collapses a requested mode into a cheaper one when the source alpha is
//! known to be exactly 0 or exactly 255.
//!
//! Every function takes the destination [`Pixel`] and the premultiplied
//! source channels `a, r, g, b` in `0..=255`, and rounds each channel
//! independently.

use crate::color::{div255, Pixel};

// ============================================================================
// BlendMode
// ============================================================================

/// Porter-Duff compositing mode. `Dst` keeps the destination untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BlendMode {
    Clear = 0,
    Src = 1,
    Dst = 2,
    #[default]
    SrcOver = 3,
    DstOver = 4,
    SrcIn = 5,
    DstIn = 6,
    SrcOut = 7,
    DstOut = 8,
    SrcATop = 9,
    DstATop = 10,
    Xor = 11,
}

/// What is known about the alpha of every source pixel of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAlpha {
    /// Every source pixel has alpha 0.
    Transparent,
    /// Every source pixel has alpha 255.
    Opaque,
    /// Nothing is known.
    Partial,
}

impl SourceAlpha {
    /// Classify a flat color alpha. Only exact 0 and exact 1 count.
    pub fn from_alpha(a: f32) -> Self {
        if a <= 0.0 {
            SourceAlpha::Transparent
        } else if a >= 1.0 {
            SourceAlpha::Opaque
        } else {
            SourceAlpha::Partial
        }
    }
}

/// Signature shared by all blend functions.
pub type BlendProc = fn(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel;

impl BlendMode {
    pub const ALL: [BlendMode; 12] = [
        BlendMode::Clear,
        BlendMode::Src,
        BlendMode::Dst,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcIn,
        BlendMode::DstIn,
        BlendMode::SrcOut,
        BlendMode::DstOut,
        BlendMode::SrcATop,
        BlendMode::DstATop,
        BlendMode::Xor,
    ];

    /// The blend function implementing this mode.
    pub fn proc(self) -> BlendProc {
        match self {
            BlendMode::Clear => blend_clear,
            BlendMode::Src => blend_src,
            BlendMode::Dst => blend_dst,
            BlendMode::SrcOver => blend_src_over,
            BlendMode::DstOver => blend_dst_over,
            BlendMode::SrcIn => blend_src_in,
            BlendMode::DstIn => blend_dst_in,
            BlendMode::SrcOut => blend_src_out,
            BlendMode::DstOut => blend_dst_out,
            BlendMode::SrcATop => blend_src_atop,
            BlendMode::DstATop => blend_dst_atop,
            BlendMode::Xor => blend_xor,
        }
    }

    /// Collapse the mode given what is known about source alpha.
    ///
    /// | mode    | alpha 0 | alpha 255 |
    /// |---------|---------|-----------|
    /// | Src     | Clear   |           |
    /// | SrcOver | Dst     | Src       |
    /// | DstOver | Dst     |           |
    /// | SrcIn   | Clear   |           |
    /// | DstIn   | Clear   | Dst       |
    /// | SrcOut  | Clear   |           |
    /// | DstOut  | Dst     | Clear     |
    /// | SrcATop | Dst     | SrcIn     |
    /// | DstATop | Clear   | DstOver   |
    /// | Xor     | Dst     | SrcOut    |
    pub fn simplify(self, alpha: SourceAlpha) -> BlendMode {
        use BlendMode::*;
        match alpha {
            SourceAlpha::Partial => self,
            SourceAlpha::Transparent => match self {
                Src | SrcIn | DstIn | SrcOut | DstATop => Clear,
                SrcOver | DstOver | DstOut | SrcATop | Xor => Dst,
                Clear | Dst => self,
            },
            SourceAlpha::Opaque => match self {
                SrcOver => Src,
                DstIn => Dst,
                DstOut => Clear,
                SrcATop => SrcIn,
                DstATop => DstOver,
                Xor => SrcOut,
                _ => self,
            },
        }
    }
}

/// Blend a premultiplied source pixel onto `dst` with `mode`.
#[inline]
pub fn blend(mode: BlendMode, dst: Pixel, src: Pixel) -> Pixel {
    (mode.proc())(dst, src.a(), src.r(), src.g(), src.b())
}

// ============================================================================
// Blend functions
// ============================================================================

/// Apply `f(s, d, sa, da)` to each channel; alpha is combined with itself.
#[inline]
fn combine(dst: Pixel, sa: u32, sr: u32, sg: u32, sb: u32, f: impl Fn(u32, u32, u32, u32) -> u32) -> Pixel {
    let da = dst.a();
    Pixel::pack(
        f(sa, da, sa, da),
        f(sr, dst.r(), sa, da),
        f(sg, dst.g(), sa, da),
        f(sb, dst.b(), sa, da),
    )
}

fn blend_clear(_dst: Pixel, _a: u32, _r: u32, _g: u32, _b: u32) -> Pixel {
    Pixel::TRANSPARENT
}

fn blend_src(_dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    Pixel::pack(a, r, g, b)
}

fn blend_dst(dst: Pixel, _a: u32, _r: u32, _g: u32, _b: u32) -> Pixel {
    dst
}

// S + D*(1 - Sa)
fn blend_src_over(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, d, sa, _| s + div255(d * (255 - sa)))
}

// D + S*(1 - Da)
fn blend_dst_over(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, d, _, da| d + div255(s * (255 - da)))
}

// S*Da
fn blend_src_in(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, _, _, da| div255(s * da))
}

// D*Sa
fn blend_dst_in(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |_, d, sa, _| div255(d * sa))
}

// S*(1 - Da)
fn blend_src_out(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, _, _, da| div255(s * (255 - da)))
}

// D*(1 - Sa)
fn blend_dst_out(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |_, d, sa, _| div255(d * (255 - sa)))
}

// S*Da + D*(1 - Sa)
fn blend_src_atop(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, d, sa, da| div255(s * da + d * (255 - sa)))
}

// D*Sa + S*(1 - Da)
fn blend_dst_atop(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, d, sa, da| div255(d * sa + s * (255 - da)))
}

// S*(1 - Da) + D*(1 - Sa)
fn blend_xor(dst: Pixel, a: u32, r: u32, g: u32, b: u32) -> Pixel {
    combine(dst, a, r, g, b, |s, d, sa, da| {
        div255(s * (255 - da) + d * (255 - sa))
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Pixel = Pixel(0xFFFF_0000);
    const HALF_BLUE: Pixel = Pixel(0x8000_0080);
    const GREEN: Pixel = Pixel(0xFF00_FF00);

    #[test]
    fn test_discriminants() {
        for (i, m) in BlendMode::ALL.iter().enumerate() {
            assert_eq!(*m as u8 as usize, i);
        }
        assert_eq!(BlendMode::default(), BlendMode::SrcOver);
    }

    #[test]
    fn test_trivial_modes() {
        assert_eq!(blend(BlendMode::Clear, GREEN, RED), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::Src, GREEN, HALF_BLUE), HALF_BLUE);
        assert_eq!(blend(BlendMode::Dst, GREEN, RED), GREEN);
    }

    #[test]
    fn test_src_over() {
        // opaque source replaces
        assert_eq!(blend(BlendMode::SrcOver, GREEN, RED), RED);
        // half source keeps half the destination
        let p = blend(BlendMode::SrcOver, GREEN, HALF_BLUE);
        assert_eq!(p.argb(), [255, 0, 127, 128]);
        // over a transparent destination it is a copy
        assert_eq!(blend(BlendMode::SrcOver, Pixel::TRANSPARENT, HALF_BLUE), HALF_BLUE);
    }

    #[test]
    fn test_dst_over() {
        assert_eq!(blend(BlendMode::DstOver, GREEN, RED), GREEN);
        assert_eq!(blend(BlendMode::DstOver, Pixel::TRANSPARENT, RED), RED);
        let p = blend(BlendMode::DstOver, HALF_BLUE, RED);
        assert_eq!(p.argb(), [255, 127, 0, 128]);
    }

    #[test]
    fn test_in_out() {
        assert_eq!(blend(BlendMode::SrcIn, GREEN, RED), RED);
        assert_eq!(blend(BlendMode::SrcIn, Pixel::TRANSPARENT, RED), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::DstIn, GREEN, HALF_BLUE).argb(), [128, 0, 128, 0]);
        assert_eq!(blend(BlendMode::SrcOut, GREEN, RED), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::SrcOut, Pixel::TRANSPARENT, RED), RED);
        assert_eq!(blend(BlendMode::DstOut, GREEN, RED), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::DstOut, GREEN, HALF_BLUE).argb(), [127, 0, 127, 0]);
    }

    #[test]
    fn test_atop_xor() {
        assert_eq!(blend(BlendMode::SrcATop, GREEN, RED), RED);
        assert_eq!(blend(BlendMode::SrcATop, Pixel::TRANSPARENT, RED), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::DstATop, GREEN, RED), GREEN);
        assert_eq!(blend(BlendMode::DstATop, Pixel::TRANSPARENT, RED), RED);
        assert_eq!(blend(BlendMode::Xor, GREEN, RED), Pixel::TRANSPARENT);
        assert_eq!(blend(BlendMode::Xor, Pixel::TRANSPARENT, RED), RED);
        assert_eq!(blend(BlendMode::Xor, GREEN, Pixel::TRANSPARENT), GREEN);
    }

    #[test]
    fn test_results_stay_premultiplied() {
        let srcs = [RED, HALF_BLUE, Pixel(0x4020_1008), Pixel::TRANSPARENT];
        let dsts = [GREEN, HALF_BLUE, Pixel(0xC0C0_0000), Pixel::TRANSPARENT];
        for m in BlendMode::ALL {
            for s in srcs {
                for d in dsts {
                    let p = blend(m, d, s);
                    assert!(p.r() <= p.a() && p.g() <= p.a() && p.b() <= p.a(), "{:?}", m);
                }
            }
        }
    }

    #[test]
    fn test_simplify_table() {
        use BlendMode::*;
        let t = SourceAlpha::Transparent;
        let o = SourceAlpha::Opaque;
        assert_eq!(Src.simplify(t), Clear);
        assert_eq!(SrcOver.simplify(t), Dst);
        assert_eq!(SrcOver.simplify(o), Src);
        assert_eq!(DstOver.simplify(t), Dst);
        assert_eq!(DstOver.simplify(o), DstOver);
        assert_eq!(SrcIn.simplify(t), Clear);
        assert_eq!(DstIn.simplify(t), Clear);
        assert_eq!(DstIn.simplify(o), Dst);
        assert_eq!(SrcOut.simplify(t), Clear);
        assert_eq!(DstOut.simplify(t), Dst);
        assert_eq!(DstOut.simplify(o), Clear);
        assert_eq!(SrcATop.simplify(t), Dst);
        assert_eq!(SrcATop.simplify(o), SrcIn);
        assert_eq!(DstATop.simplify(t), Clear);
        assert_eq!(DstATop.simplify(o), DstOver);
        assert_eq!(Xor.simplify(t), Dst);
        assert_eq!(Xor.simplify(o), SrcOut);
        for m in BlendMode::ALL {
            assert_eq!(m.simplify(SourceAlpha::Partial), m);
        }
    }

    #[test]
    fn test_simplify_is_exact() {
        // the simplified mode produces the same pixels as the requested one
        let opaque = [RED, GREEN, Pixel(0xFF10_2030)];
        let dsts = [GREEN, HALF_BLUE, Pixel(0x4020_1008), Pixel::TRANSPARENT];
        for m in BlendMode::ALL {
            let simple = m.simplify(SourceAlpha::Opaque);
            for s in opaque {
                for d in dsts {
                    assert_eq!(blend(m, d, s), blend(simple, d, s), "{:?}", m);
                }
            }
            let simple = m.simplify(SourceAlpha::Transparent);
            for d in dsts {
                assert_eq!(blend(m, d, Pixel::TRANSPARENT), blend(simple, d, Pixel::TRANSPARENT));
            }
        }
    }

    #[test]
    fn test_source_alpha_from_color() {
        assert_eq!(SourceAlpha::from_alpha(0.0), SourceAlpha::Transparent);
        assert_eq!(SourceAlpha::from_alpha(1.0), SourceAlpha::Opaque);
        assert_eq!(SourceAlpha::from_alpha(0.999), SourceAlpha::Partial);
    }
}
