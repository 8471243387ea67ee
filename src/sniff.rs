//! # Header Rule Matcher
//!
//! Lightweight content sniffing over the first bytes of a file. Upstream
//! classification uses this to guess a buffer's true container before
//! handing it to [`crate::AudioStream::open`]; the decode pipeline itself
//! never depends on it.

/// A single expectation: `text` must appear verbatim at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRule {
    /// Byte offset into the header where the text must start.
    pub offset: usize,
    /// Expected ASCII text at that offset.
    pub text: &'static str,
}

/// Ordered list of header rules for one container type.
///
/// A match succeeds only if every rule's byte range lies entirely within
/// the supplied header and compares byte-equal to the expected text. An
/// out-of-range offset or a single mismatch fails the whole match.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    name: &'static str,
    rules: &'static [HeaderRule],
}

impl HeaderMatcher {
    /// Build a matcher from an ordered rule list.
    pub const fn new(name: &'static str, rules: &'static [HeaderRule]) -> Self {
        Self { name, rules }
    }

    /// Human-readable container name, e.g. `"wav"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check every rule against `header`.
    pub fn matches(&self, header: &[u8]) -> bool {
        self.rules.iter().all(|rule| {
            rule.offset
                .checked_add(rule.text.len())
                .and_then(|end| header.get(rule.offset..end))
                .is_some_and(|range| range == rule.text.as_bytes())
        })
    }

    /// RIFF/WAVE container: `RIFF` at 0, `WAVE` at 8.
    pub const fn wav() -> Self {
        const RULES: &[HeaderRule] = &[
            HeaderRule { offset: 0, text: "RIFF" },
            HeaderRule { offset: 8, text: "WAVE" },
        ];
        Self::new("wav", RULES)
    }

    /// Native FLAC stream: `fLaC` marker at 0.
    pub const fn flac() -> Self {
        const RULES: &[HeaderRule] = &[HeaderRule { offset: 0, text: "fLaC" }];
        Self::new("flac", RULES)
    }

    /// Ogg container (Vorbis and friends): `OggS` capture pattern at 0.
    pub const fn ogg() -> Self {
        const RULES: &[HeaderRule] = &[HeaderRule { offset: 0, text: "OggS" }];
        Self::new("ogg", RULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_matches() {
        let header = b"RIFF\x24\x08\x00\x00WAVEfmt ";
        assert!(HeaderMatcher::wav().matches(header));
    }

    #[test]
    fn single_mismatch_fails_whole_match() {
        // RIFF present but the form type is AVI, not WAVE
        let header = b"RIFF\x24\x08\x00\x00AVI fmt ";
        assert!(!HeaderMatcher::wav().matches(header));
    }

    #[test]
    fn out_of_range_offset_fails() {
        // Too short to contain the rule at offset 8
        assert!(!HeaderMatcher::wav().matches(b"RIFF\x00\x00"));
        assert!(!HeaderMatcher::flac().matches(b""));
    }

    #[test]
    fn flac_and_ogg_markers() {
        assert!(HeaderMatcher::flac().matches(b"fLaC\x00\x00\x00\x22"));
        assert!(HeaderMatcher::ogg().matches(b"OggS\x00\x02"));
        assert!(!HeaderMatcher::ogg().matches(b"fLaC"));
    }
}
