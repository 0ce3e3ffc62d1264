//! Typed data segments and automatic segmentation of text payloads.

use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, eci::EciEncoder, kanji::KanjiEncoder,
    numeric::NumericEncoder,
};
use crate::error::Result;
use crate::models::Version;

/// Segment encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Decimal digits
    Numeric,
    /// 0-9, A-Z, space, $%*+-./:
    Alphanumeric,
    /// Arbitrary bytes
    Byte,
    /// Shift JIS double-byte characters
    Kanji,
    /// Extended channel interpretation designator
    Eci,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn mode_bits(&self) -> u32 {
        match self {
            Mode::Numeric => 0x1,
            Mode::Alphanumeric => 0x2,
            Mode::Byte => 0x4,
            Mode::Kanji => 0x8,
            Mode::Eci => 0x7,
        }
    }

    /// Width of the character-count field at `version`
    pub fn char_count_bits(&self, version: Version) -> u8 {
        let widths: [u8; 3] = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
            Mode::Eci => [0, 0, 0],
        };
        widths[version.bracket()]
    }

    /// Lowercase mode name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
            Mode::Kanji => "kanji",
            Mode::Eci => "eci",
        }
    }
}

/// A mode, a character count and the packed character data.
///
/// The mode indicator and count field are not stored; they are written
/// when segments are concatenated for a specific version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    num_chars: usize,
    data: BitBuffer,
}

impl Segment {
    /// Build a segment from already-packed data
    pub fn new(mode: Mode, num_chars: usize, data: BitBuffer) -> Self {
        Self {
            mode,
            num_chars,
            data,
        }
    }

    /// Byte-mode segment holding `data` verbatim
    pub fn make_bytes(data: &[u8]) -> Self {
        let mut bb = BitBuffer::with_capacity(ByteEncoder::data_bits(data.len()));
        ByteEncoder::encode(data, &mut bb);
        Self::new(Mode::Byte, data.len(), bb)
    }

    /// Numeric-mode segment; fails on any non-digit
    pub fn make_numeric(digits: &str) -> Result<Self> {
        let mut bb = BitBuffer::with_capacity(NumericEncoder::data_bits(digits.len()));
        NumericEncoder::encode(digits, &mut bb)?;
        Ok(Self::new(Mode::Numeric, digits.len(), bb))
    }

    /// Alphanumeric-mode segment; fails outside the 45-symbol set
    pub fn make_alphanumeric(text: &str) -> Result<Self> {
        let mut bb = BitBuffer::with_capacity(AlphanumericEncoder::data_bits(text.len()));
        AlphanumericEncoder::encode(text, &mut bb)?;
        Ok(Self::new(Mode::Alphanumeric, text.len(), bb))
    }

    /// Kanji-mode segment from Shift JIS double-byte values
    pub fn make_kanji(chars: &[u16]) -> Result<Self> {
        let mut bb = BitBuffer::with_capacity(KanjiEncoder::data_bits(chars.len()));
        KanjiEncoder::encode(chars, &mut bb)?;
        Ok(Self::new(Mode::Kanji, chars.len(), bb))
    }

    /// ECI designator segment
    pub fn make_eci(assign_value: u32) -> Result<Self> {
        let mut bb = BitBuffer::with_capacity(24);
        EciEncoder::encode(assign_value, &mut bb)?;
        Ok(Self::new(Mode::Eci, 0, bb))
    }

    /// True if `text` can be carried in numeric mode
    pub fn is_numeric(text: &str) -> bool {
        NumericEncoder::is_numeric(text)
    }

    /// True if `text` can be carried in alphanumeric mode
    pub fn is_alphanumeric(text: &str) -> bool {
        AlphanumericEncoder::is_alphanumeric(text)
    }

    /// Split `text` into segments sized for the count-field widths of `version`.
    ///
    /// Runs of digits, alphanumeric characters and other bytes become
    /// separate segments unless merging neighbours into the wider mode
    /// saves bits. Empty text yields no segments.
    pub fn make_segments(text: &str, version: Version) -> Vec<Segment> {
        let mut runs = classify_runs(text);
        while let Some((start, span, class)) = best_merge(&runs, version) {
            let end = runs[start + span - 1].end;
            runs[start] = Run {
                class,
                start: runs[start].start,
                end,
            };
            runs.drain(start + 1..start + span);
        }

        runs.iter()
            .map(|run| {
                let chunk = &text[run.start..run.end];
                let seg = match run.class {
                    CharClass::Numeric => Segment::make_numeric(chunk),
                    CharClass::Alphanumeric => Segment::make_alphanumeric(chunk),
                    CharClass::Byte => Ok(Segment::make_bytes(chunk.as_bytes())),
                };
                seg.unwrap_or_else(|_| Segment::make_bytes(chunk.as_bytes()))
            })
            .collect()
    }

    /// Segment mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Character count written into the count field
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Packed character data (without header)
    pub fn data(&self) -> &BitBuffer {
        &self.data
    }

    /// Total bits for `segs` at `version`, headers included.
    ///
    /// None if any segment's character count overflows its count field.
    pub fn total_bits(segs: &[Segment], version: Version) -> Option<usize> {
        segs.iter().try_fold(0usize, |acc, seg| {
            let cc_bits = seg.mode.char_count_bits(version);
            if seg.num_chars >= 1usize << cc_bits {
                return None;
            }
            acc.checked_add(4 + cc_bits as usize + seg.data.len())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Numeric,
    Alphanumeric,
    Byte,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_ascii_digit() {
            CharClass::Numeric
        } else if c.is_ascii() && AlphanumericEncoder::char_value(c as u8).is_some() {
            CharClass::Alphanumeric
        } else {
            CharClass::Byte
        }
    }

    fn mode(&self) -> Mode {
        match self {
            CharClass::Numeric => Mode::Numeric,
            CharClass::Alphanumeric => Mode::Alphanumeric,
            CharClass::Byte => Mode::Byte,
        }
    }

    /// Header plus data bits for `len` bytes of text in this class
    fn cost(&self, len: usize, version: Version) -> usize {
        let data = match self {
            CharClass::Numeric => NumericEncoder::data_bits(len),
            CharClass::Alphanumeric => AlphanumericEncoder::data_bits(len),
            CharClass::Byte => ByteEncoder::data_bits(len),
        };
        4 + self.mode().char_count_bits(version) as usize + data
    }
}

/// Byte range of `text` sharing one character class
#[derive(Debug, Clone, Copy)]
struct Run {
    class: CharClass,
    start: usize,
    end: usize,
}

impl Run {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

fn classify_runs(text: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (idx, c) in text.char_indices() {
        let class = CharClass::of(c);
        let end = idx + c.len_utf8();
        match runs.last_mut() {
            Some(last) if last.class == class => last.end = end,
            _ => runs.push(Run {
                class,
                start: idx,
                end,
            }),
        }
    }
    runs
}

/// Most profitable merge of 2 or 3 adjacent runs: (first index, span, merged class).
/// Ties go to the leftmost, shortest window.
fn best_merge(runs: &[Run], version: Version) -> Option<(usize, usize, CharClass)> {
    let mut best: Option<(usize, usize, CharClass, usize)> = None;
    for span in 2..=3 {
        for start in 0..runs.len().saturating_sub(span - 1) {
            let window = &runs[start..start + span];
            let class = window.iter().map(|r| r.class).max()?;
            let separate: usize = window.iter().map(|r| r.class.cost(r.len(), version)).sum();
            let len: usize = window.iter().map(Run::len).sum();
            let merged = class.cost(len, version);
            if merged >= separate {
                continue;
            }
            let gain = separate - merged;
            if best.is_none_or(|(_, _, _, g)| gain > g) {
                best = Some((start, span, class, gain));
            }
        }
    }
    best.map(|(start, span, class, _)| (start, span, class))
}
