/// Main QR encoder - wires every stage together
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::encoder::capacity::{boost_level, build_data_codewords, select_version};
use crate::encoder::config;
use crate::encoder::format::FormatInfo;
use crate::encoder::function_patterns::{FunctionMask, draw_function_patterns};
use crate::encoder::mask::apply_mask;
use crate::encoder::options::EncodeOptions;
use crate::encoder::penalty::penalty_score;
use crate::encoder::placement::draw_codewords;
use crate::encoder::reed_solomon::add_ec_and_interleave;
use crate::encoder::segment::{Mode, Segment};
use crate::error::Result;
use crate::models::{BitMatrix, ECLevel, MaskPattern, QrCode, Version};

/// Encoder entry points. Stateless; every call owns its buffers.
pub struct QrEncoder;

impl QrEncoder {
    /// Encode caller-built segments, in order
    pub fn encode_segments(
        segs: &[Segment],
        ec_level: ECLevel,
        opts: &EncodeOptions,
    ) -> Result<QrCode> {
        let (min, max, mask) = opts.resolve()?;
        let (version, used_bits) =
            select_version(ec_level, min, max, |ver| Segment::total_bits(segs, ver))?;
        Ok(Self::build(segs, version, ec_level, used_bits, mask, opts.boost_ecl))
    }

    /// Encode text, choosing segment modes automatically.
    ///
    /// Segmentation depends on the count-field widths, so it runs once per
    /// version bracket visited by the search.
    pub fn encode_text(text: &str, ec_level: ECLevel, opts: &EncodeOptions) -> Result<QrCode> {
        let (min, max, mask) = opts.resolve()?;

        let mut by_bracket: [Option<Vec<Segment>>; 3] = Default::default();
        let (version, used_bits) = select_version(ec_level, min, max, |ver| {
            let segs = by_bracket[ver.bracket()]
                .get_or_insert_with(|| Segment::make_segments(text, ver));
            Segment::total_bits(segs, ver)
        })?;

        let segs = by_bracket[version.bracket()]
            .take()
            .unwrap_or_else(|| Segment::make_segments(text, version));
        let modes: Vec<Mode> = segs.iter().map(Segment::mode).collect();
        debug!(segments = segs.len(), ?modes, "segmented text");
        Ok(Self::build(&segs, version, ec_level, used_bits, mask, opts.boost_ecl))
    }

    /// Encode raw bytes as a single byte-mode segment
    pub fn encode_binary(data: &[u8], ec_level: ECLevel, opts: &EncodeOptions) -> Result<QrCode> {
        Self::encode_segments(&[Segment::make_bytes(data)], ec_level, opts)
    }

    /// Penalty of each of the 8 masks for the data carried by `qr`, by mask index
    pub fn mask_penalties(qr: &QrCode) -> [u32; 8] {
        let mut unmasked = qr.modules().clone();
        let func = FunctionMask::new(qr.version());
        apply_mask(&mut unmasked, qr.mask(), &func);

        let mut scores = [0u32; 8];
        for mask in MaskPattern::ALL {
            let candidate = Self::masked_candidate(&unmasked, &func, qr.ec_level(), mask);
            scores[mask.index() as usize] = penalty_score(&candidate);
        }
        scores
    }

    fn build(
        segs: &[Segment],
        version: Version,
        ec_level: ECLevel,
        used_bits: usize,
        mask: Option<MaskPattern>,
        boost: bool,
    ) -> QrCode {
        let ec_level = if boost {
            boost_level(version, ec_level, used_bits)
        } else {
            ec_level
        };

        let data = build_data_codewords(segs, version, ec_level);
        let codewords = add_ec_and_interleave(&data, version, ec_level);

        let mut modules = BitMatrix::square(version.size());
        let func = draw_function_patterns(version, &mut modules);
        draw_codewords(&mut modules, &func, &codewords);

        let mask = match mask {
            Some(mask) => {
                debug!(mask = mask.index(), "using pinned mask");
                mask
            }
            None => Self::choose_mask(&modules, &func, ec_level),
        };
        apply_mask(&mut modules, mask, &func);
        FormatInfo::new(ec_level, mask).draw(&mut modules);

        QrCode::new(version, ec_level, mask, modules)
    }

    /// Lowest-penalty mask; ties go to the lowest index
    fn choose_mask(modules: &BitMatrix, func: &FunctionMask, ec_level: ECLevel) -> MaskPattern {
        let score = |&mask: &MaskPattern| {
            let candidate = Self::masked_candidate(modules, func, ec_level, mask);
            let penalty = penalty_score(&candidate);
            trace!(mask = mask.index(), penalty, "mask penalty");
            (penalty, mask)
        };
        let key = |&(penalty, mask): &(u32, MaskPattern)| (penalty, mask.index());

        let best = if func.version().number() >= config::parallel_mask_min_version() {
            MaskPattern::ALL.par_iter().map(score).min_by_key(key)
        } else {
            MaskPattern::ALL.iter().map(score).min_by_key(key)
        };

        let (penalty, mask) = best.unwrap_or((0, MaskPattern::Pattern0));
        debug!(mask = mask.index(), penalty, "selected mask");
        mask
    }

    /// Copy of `modules` with `mask` applied and its format bits drawn
    fn masked_candidate(
        modules: &BitMatrix,
        func: &FunctionMask,
        ec_level: ECLevel,
        mask: MaskPattern,
    ) -> BitMatrix {
        let mut candidate = modules.clone();
        apply_mask(&mut candidate, mask, func);
        FormatInfo::new(ec_level, mask).draw(&mut candidate);
        candidate
    }
}
